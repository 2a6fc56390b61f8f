//! End-to-end pipeline tests against real directories
//!
//! Exercise the library the way the binary wires it: a file-system source,
//! and either the recording sink or the PNG renderer.

use latency_grapher::{
    AppError, Config, EmptyRunPolicy, FileSystemSource, Pipeline, PlottersRenderer, RecordingSink,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create `base/clients_<n>` for each entry, writing the given lines as files
fn write_runs(base: &Path, runs: &[(u32, &[&str])]) {
    for (clients, lines) in runs {
        let dir = base.join(format!("clients_{}", clients));
        fs::create_dir_all(&dir).unwrap();
        for (i, line) in lines.iter().enumerate() {
            fs::write(dir.join(format!("client_{}.txt", i)), format!("{}\n", line)).unwrap();
        }
    }
}

fn config_for(temp_dir: &TempDir) -> Config {
    Config {
        base_dir: temp_dir.path().join("out"),
        output_path: temp_dir.path().join("latencies.png"),
        enable_color: false,
        ..Config::default()
    }
}

fn full_layout(temp_dir: &TempDir) {
    let base = temp_dir.path().join("out");
    for clients in 1..=10u32 {
        let lines: Vec<String> = (0..clients)
            .map(|i| format!("{},{}", 5 * clients + i, 9 * clients + i))
            .collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        write_runs(&base, &[(clients, &refs)]);
    }
}

#[test]
fn single_file_run_averages_to_its_values() {
    let temp_dir = TempDir::new().unwrap();
    write_runs(&temp_dir.path().join("out"), &[(1, &["10.0,20.0"])]);
    let config = Config { last_run: 1, ..config_for(&temp_dir) };
    let sink = RecordingSink::new();

    let series = Pipeline::new(config, FileSystemSource::new(), &sink).run().unwrap();

    assert_eq!(series.query, vec![10.0]);
    assert_eq!(series.buy, vec![20.0]);
}

#[test]
fn two_file_run_averages() {
    let temp_dir = TempDir::new().unwrap();
    write_runs(&temp_dir.path().join("out"), &[(1, &["10,20", "20,40"])]);
    let config = Config { last_run: 1, ..config_for(&temp_dir) };
    let sink = RecordingSink::new();

    let series = Pipeline::new(config, FileSystemSource::new(), &sink).run().unwrap();

    assert_eq!(series.query, vec![15.0]);
    assert_eq!(series.buy, vec![30.0]);
}

#[test]
fn series_has_ten_aligned_entries() {
    let temp_dir = TempDir::new().unwrap();
    full_layout(&temp_dir);
    let sink = RecordingSink::new();

    let series = Pipeline::new(config_for(&temp_dir), FileSystemSource::new(), &sink).run().unwrap();

    assert_eq!(series.clients, (1..=10).collect::<Vec<u32>>());
    assert_eq!(series.query.len(), 10);
    assert_eq!(series.buy.len(), 10);
    for (index, run) in series.runs.iter().enumerate() {
        let clients = index as f64 + 1.0;
        let offset = (clients - 1.0) / 2.0;
        assert_eq!(run.sample_count, index + 1);
        assert!((series.query[index] - (5.0 * clients + offset)).abs() < 1e-9);
        assert!((series.buy[index] - (9.0 * clients + offset)).abs() < 1e-9);
    }
    assert_eq!(sink.render_count(), 1);
}

#[test]
fn repeated_runs_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    full_layout(&temp_dir);
    let pipeline = Pipeline::new(config_for(&temp_dir), FileSystemSource::new(), RecordingSink::new());

    let first = pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(first, second);
}

#[test]
fn malformed_file_aborts_before_rendering() {
    let temp_dir = TempDir::new().unwrap();
    full_layout(&temp_dir);
    write_runs(&temp_dir.path().join("out"), &[(6, &["abc,20"])]);
    let config = config_for(&temp_dir);
    let output = config.output_path.clone();

    let error = Pipeline::new(config, FileSystemSource::new(), PlottersRenderer::new())
        .run()
        .unwrap_err();

    assert!(matches!(error, AppError::Parse(_)));
    assert!(!output.exists());
}

#[test]
fn empty_run_is_an_error_by_default() {
    let temp_dir = TempDir::new().unwrap();
    write_runs(&temp_dir.path().join("out"), &[(1, &["1,2"]), (2, &[])]);
    let config = Config { last_run: 2, ..config_for(&temp_dir) };
    let sink = RecordingSink::new();

    let error = Pipeline::new(config, FileSystemSource::new(), &sink).run().unwrap_err();

    assert!(matches!(error, AppError::Statistics(_)));
    assert_eq!(sink.render_count(), 0);
}

#[test]
fn empty_run_is_nan_when_requested() {
    let temp_dir = TempDir::new().unwrap();
    write_runs(&temp_dir.path().join("out"), &[(1, &["1,2"]), (2, &[]), (3, &["3,4"])]);
    let config = Config {
        last_run: 3,
        empty_runs: EmptyRunPolicy::Nan,
        ..config_for(&temp_dir)
    };
    let output = config.output_path.clone();

    let series = Pipeline::new(config, FileSystemSource::new(), PlottersRenderer::new())
        .run()
        .unwrap();

    assert_eq!(series.len(), 3);
    assert!(series.query[1].is_nan());
    assert!(series.buy[1].is_nan());
    assert!(output.exists());
}

#[test]
fn renders_png_for_full_layout() {
    let temp_dir = TempDir::new().unwrap();
    full_layout(&temp_dir);
    let config = config_for(&temp_dir);
    let output = config.output_path.clone();

    Pipeline::new(config, FileSystemSource::new(), PlottersRenderer::new())
        .run()
        .unwrap();

    let bytes = fs::read(output).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

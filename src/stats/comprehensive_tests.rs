//! Comprehensive tests for measurement parsing and averaging
//!
//! Property-based tests for the averaging math plus edge cases of the
//! line parser.

use super::{aggregate, mean, parse_measurement_line, RunSamples};
use crate::models::{EmptyRunPolicy, Measurement};
use proptest::collection::vec;
use proptest::prelude::*;

/// Property-based test generators
mod generators {
    use super::*;

    /// Latencies in milliseconds as a client would report them
    pub fn latency() -> impl Strategy<Value = f64> {
        0.0f64..100_000.0
    }

    pub fn measurement() -> impl Strategy<Value = Measurement> {
        (latency(), latency()).prop_map(|(query, buy)| Measurement::new(query, buy))
    }

    pub fn measurements() -> impl Strategy<Value = Vec<Measurement>> {
        vec(measurement(), 1..200)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

mod property_tests {
    use super::*;

    proptest! {
        /// Mean should always be between min and max
        #[test]
        fn mean_between_min_max(numbers in vec(generators::latency(), 1..500)) {
            let min = numbers.iter().fold(f64::INFINITY, |a, &b| a.min(b));
            let max = numbers.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let avg = mean(&numbers).unwrap();

            prop_assert!(avg >= min - 1e-9);
            prop_assert!(avg <= max + 1e-9);
        }

        /// File processing order does not change the averages
        #[test]
        fn aggregate_is_order_independent(measurements in generators::measurements(), seed in any::<u64>()) {
            let forward: RunSamples = measurements.iter().copied().collect();

            let mut shuffled = measurements.clone();
            let len = shuffled.len();
            let shift = (seed as usize) % len;
            shuffled.rotate_left(shift);
            shuffled.reverse();
            let permuted: RunSamples = shuffled.into_iter().collect();

            let (q1, b1) = aggregate(&forward, EmptyRunPolicy::Error, "run").unwrap();
            let (q2, b2) = aggregate(&permuted, EmptyRunPolicy::Error, "run").unwrap();

            prop_assert!(approx_eq(q1, q2));
            prop_assert!(approx_eq(b1, b2));
        }

        /// Every formatted pair parses back to the same values
        #[test]
        fn formatted_lines_parse(measurement in generators::measurement()) {
            let line = format!("{},{}\n", measurement.query_ms, measurement.buy_ms);
            let parsed = parse_measurement_line(&line).unwrap();
            prop_assert_eq!(parsed, measurement);
        }

        /// Query and buy series never mix
        #[test]
        fn aggregate_keeps_series_apart(measurements in generators::measurements()) {
            let samples: RunSamples = measurements.iter().copied().collect();
            let (query_avg, buy_avg) = aggregate(&samples, EmptyRunPolicy::Error, "run").unwrap();

            let queries: Vec<f64> = measurements.iter().map(|m| m.query_ms).collect();
            let buys: Vec<f64> = measurements.iter().map(|m| m.buy_ms).collect();
            prop_assert_eq!(query_avg, mean(&queries).unwrap());
            prop_assert_eq!(buy_avg, mean(&buys).unwrap());
        }

        /// Lines that are not two fields never parse
        #[test]
        fn wrong_field_count_is_rejected(fields in vec(generators::latency(), 3..6)) {
            let line = fields.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(",");
            prop_assert!(parse_measurement_line(&line).is_err());
        }
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn constant_samples_average_to_the_constant() {
        let samples: RunSamples = std::iter::repeat(Measurement::new(12.5, 7.0)).take(1000).collect();
        let (query, buy) = aggregate(&samples, EmptyRunPolicy::Error, "run").unwrap();
        assert!(approx_eq(query, 12.5));
        assert!(approx_eq(buy, 7.0));
    }

    #[test]
    fn zero_latencies_from_idle_clients_are_kept() {
        // Clients that sent no buy request report 0 for that series
        let samples: RunSamples = vec![Measurement::new(8.0, 0.0), Measurement::new(12.0, 30.0)]
            .into_iter()
            .collect();
        assert_eq!(aggregate(&samples, EmptyRunPolicy::Error, "run").unwrap(), (10.0, 15.0));
    }

    #[test]
    fn whitespace_only_line_is_rejected() {
        assert!(parse_measurement_line("\t \r\n").is_err());
    }

    #[test]
    fn float_parser_accepts_special_values() {
        let parsed = parse_measurement_line("NaN,inf").unwrap();
        assert!(parsed.query_ms.is_nan());
        assert!(parsed.buy_ms.is_infinite());
    }
}

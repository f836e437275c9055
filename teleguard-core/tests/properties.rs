//! Property tests for validators, history and emission

use proptest::prelude::*;

use teleguard_core::{
    frame::{normalize_value, parse_value},
    validators::{is_monotonic_increase, is_outlier, is_valid_numeric_value, relative_deviation},
    Channel, EmissionState, History, MeasurementPipeline, Outcome, PipelineConfig,
    RateLimitedEmitter, Sample,
};

fn range_accepts(token: &str) -> bool {
    parse_value(normalize_value(token))
        .map(|value| is_valid_numeric_value(value, 1, 9000))
        .unwrap_or(false)
}

fn history_of(values: &[u64]) -> History {
    let mut history = History::with_capacity(10);
    for &value in values {
        history.push(value);
    }
    history
}

proptest! {
    #[test]
    fn digit_tokens_in_bounds_pass_range(value in 1u64..=9000, zeros in 0usize..4) {
        let token = format!("{}{}", "0".repeat(zeros), value);
        prop_assert!(range_accepts(&token));
    }

    #[test]
    fn digit_tokens_out_of_bounds_fail_range(value in 9001u64..10_000_000) {
        prop_assert!(!range_accepts(&value.to_string()));
        prop_assert!(!range_accepts("0000"));
    }

    #[test]
    fn tokens_with_non_digits_fail_range(token in "[0-9]{0,4}[^0-9][0-9a-z.+-]{0,4}") {
        prop_assert!(!range_accepts(&token));
        prop_assert!(parse_value(&token).is_none());
    }

    #[test]
    fn monotonic_accepts_anything_on_empty_history(value in any::<u64>()) {
        prop_assert!(is_monotonic_increase(value, &History::with_capacity(10)));
    }

    #[test]
    fn monotonic_compares_with_last_entry(
        values in prop::collection::vec(any::<u64>(), 1..20),
        candidate in any::<u64>(),
    ) {
        let history = history_of(&values);
        let last = *values.last().unwrap();
        prop_assert_eq!(is_monotonic_increase(candidate, &history), candidate > last);
    }

    #[test]
    fn outlier_needs_three_samples(
        values in prop::collection::vec(1u64..1_000_000, 0..3),
        candidate in any::<u64>(),
    ) {
        prop_assert!(!is_outlier(candidate, &history_of(&values), 0.3));
    }

    #[test]
    fn outlier_matches_median_deviation(
        values in prop::collection::vec(1u64..1_000_000, 3..12),
        candidate in 0u64..2_000_000,
    ) {
        let history = history_of(&values);
        let median = history.median().unwrap();
        let expected = relative_deviation(candidate, median) > 0.3;
        prop_assert_eq!(is_outlier(candidate, &history, 0.3), expected);
    }

    #[test]
    fn history_keeps_most_recent_accepted(
        values in prop::collection::vec(1u64..9000, 0..40),
    ) {
        let mut pipeline = MeasurementPipeline::new(
            PipelineConfig::default().with_outlier_threshold(1_000.0),
        ).unwrap();
        let mut accepted = Vec::new();

        for &value in &values {
            let outcome = pipeline.process_sample(Sample {
                channel: Channel::InstantaneousPower,
                value,
                timestamp: 0,
            });
            if let Outcome::Accepted { value, .. } = outcome {
                accepted.push(value);
            }
        }

        let history: Vec<u64> = pipeline
            .history(Channel::InstantaneousPower)
            .unwrap()
            .iter()
            .collect();
        let start = accepted.len().saturating_sub(10);

        prop_assert!(history.len() <= 10);
        prop_assert_eq!(history, accepted[start..].to_vec());
    }

    #[test]
    fn emissions_respect_min_interval(
        gaps in prop::collection::vec(0u64..25_000, 1..60),
    ) {
        let emitter = RateLimitedEmitter::new(&PipelineConfig::default());
        let mut state = EmissionState::default();
        let mut now = 0;
        let mut emitted = Vec::new();
        let mut pending = false;

        for gap in gaps {
            now += gap;
            let due = state.is_due(now, 10_000);
            match emitter.offer(Channel::InstantaneousPower, 1, now, &mut state) {
                Some(emission) => {
                    prop_assert!(due);
                    emitted.push(emission.timestamp);
                    pending = false;
                }
                None => {
                    prop_assert!(!due);
                    pending = true;
                }
            }
        }

        prop_assert!(emitted.windows(2).all(|w| w[1] - w[0] >= 10_000));
        // Any suppressed acceptance is delivered by the next due offer
        if pending {
            let later = now.max(state.last_emitted().unwrap_or(0)) + 10_000;
            prop_assert!(emitter.offer(Channel::InstantaneousPower, 1, later, &mut state).is_some());
        }
    }
}

//! Property-based tests for the pipeline invariants.
//!
//! These run on random finite series, including short, flat and
//! plateau-heavy ones.

use chromatrace::analysis::baseline::ANCHOR_GAP;
use chromatrace::analysis::{estimate_anchors, Floor, Reversals};
use chromatrace::data::model::Series;
use chromatrace::{AnalysisConfig, AnalysisContext};
use proptest::prelude::*;

/// Random finite series, values rounded to quarters so plateaus and ties
/// show up often.
fn series_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-40i32..40, 0..max_len)
        .prop_map(|v| v.into_iter().map(|x| x as f64 * 0.25).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn anchors_are_spaced_and_end_at_last_index(values in series_strategy(120)) {
        let anchors = estimate_anchors(&values);
        let n = values.len();

        if n < 2 {
            prop_assert!(anchors.is_empty());
        } else {
            prop_assert_eq!(anchors[0], 0);
            prop_assert_eq!(*anchors.last().unwrap(), n - 1);
            // Termination bound: every step advances by at least one.
            prop_assert!(anchors.len() <= n);

            for (k, pair) in anchors.windows(2).enumerate() {
                prop_assert!(pair[1] > pair[0]);
                let is_last_pair = k + 2 == anchors.len();
                if !is_last_pair {
                    prop_assert!(pair[1] - pair[0] >= ANCHOR_GAP + 1);
                }
            }
        }
    }

    #[test]
    fn floor_passes_through_every_anchor_but_the_last(values in series_strategy(120)) {
        let anchors = estimate_anchors(&values);
        let floor = Floor::interpolate(&values, &anchors);

        if let Some((&last, rest)) = anchors.split_last() {
            prop_assert_eq!(floor.len(), last);
            for &a in rest {
                prop_assert_eq!(floor.at(a), Some(values[a]));
            }
            prop_assert_eq!(floor.at(last), None);
        } else {
            prop_assert!(floor.is_empty());
        }
    }

    #[test]
    fn valleys_and_peaks_alternate(values in series_strategy(120)) {
        let found = Reversals::detect(&values);

        prop_assert!(
            found.valleys.len() == found.peaks.len()
                || found.valleys.len() == found.peaks.len() + 1
        );
        for (k, &peak) in found.peaks.iter().enumerate() {
            prop_assert!(peak > found.valleys[k]);
            if let Some(&next_valley) = found.valleys.get(k + 1) {
                prop_assert!(next_valley > peak);
            }
        }
        for &i in found.valleys.iter().chain(&found.peaks) {
            prop_assert!(i >= 1 && i < values.len());
        }
    }

    #[test]
    fn one_area_per_valley_pair(values in series_strategy(120), noise in 0.0..5.0_f64) {
        let config = AnalysisConfig { noise_threshold: noise, ..Default::default() };
        let ctx = AnalysisContext::from_series(Series::from_values(&values), config).unwrap();

        prop_assert_eq!(ctx.areas.len(), ctx.reversals.valleys.len().saturating_sub(1));
        for span in &ctx.areas {
            prop_assert!(span.area.is_finite());
            prop_assert!(span.peak_height.is_finite() && span.qualified);
            prop_assert!(span.start < span.end);
            let peak = span.peak.unwrap();
            prop_assert!(span.start < peak && peak < span.end);
        }
    }
}

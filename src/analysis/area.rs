//! Trapezoidal area between the series and its floor.

use serde::Serialize;

use super::floor::Floor;
use super::reversal::Reversals;
use crate::config::StepWidth;

/// Signed area over one valley-to-valley span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaSpan {
    pub start: usize,
    pub end: usize,
    /// Confirmed peak inside the span.
    pub peak: Option<usize>,
    pub area: f64,
    /// Largest `series - floor` over `start..end`.
    pub peak_height: f64,
    /// Cleared by [`mark_min_height`] for peaks below the height requirement.
    pub qualified: bool,
}

/// Integrate `series - floor` over every pair of consecutive valleys.
///
/// Areas are signed: the floor is not guaranteed to stay under the series
/// between anchors, so a span can come out negative.
pub fn integrate_spans(
    times: &[f64],
    values: &[f64],
    floor: &Floor,
    reversals: &Reversals,
    step: StepWidth,
) -> Vec<AreaSpan> {
    reversals
        .valleys
        .windows(2)
        .enumerate()
        .filter_map(|(k, pair)| {
            let (start, end) = (pair[0], pair[1]);
            // Valleys never pass N - 1, which is the last anchor, and the
            // floor is closed there, so every span has a value.
            debug_assert!(end < values.len() && end <= floor.len());
            let area = area_between(times, values, floor, start, end, step)?;
            // The closing valley marker is already on the next rise.
            let peak_height = (start..end)
                .map(|i| -> Option<f64> { Some(values.get(i)? - floor.closed_at(i)?) })
                .try_fold(f64::NEG_INFINITY, |top, h| h.map(|h| top.max(h)))?;
            Some(AreaSpan {
                start,
                end,
                peak: reversals.peaks.get(k).copied(),
                area,
                peak_height,
                qualified: true,
            })
        })
        .collect()
}

/// Clear `qualified` on spans whose peak rises less than `min_height` above
/// the floor. `None` leaves every span qualified.
pub fn mark_min_height(spans: &mut [AreaSpan], min_height: Option<f64>) {
    let Some(min_height) = min_height else {
        return;
    };
    for span in spans {
        span.qualified = span.peak_height >= min_height;
    }
}

/// Area of the whole series above its floor, over `[0, last_anchor]`.
pub fn total_area(times: &[f64], values: &[f64], floor: &Floor, step: StepWidth) -> f64 {
    if floor.is_empty() {
        return 0.0;
    }
    area_between(times, values, floor, 0, floor.len(), step).unwrap_or(0.0)
}

/// `Σ w_i · ((v[i] - f[i]) + (v[i+1] - f[i+1])) / 2` for `i` in `start..end`.
///
/// `None` when an index has no floor value.
fn area_between(
    times: &[f64],
    values: &[f64],
    floor: &Floor,
    start: usize,
    end: usize,
    step: StepWidth,
) -> Option<f64> {
    let height = |i: usize| -> Option<f64> { Some(values.get(i)? - floor.closed_at(i)?) };

    let mut area = 0.0;
    for i in start..end {
        let width = match step {
            StepWidth::Index => 1.0,
            StepWidth::Time => times.get(i + 1)? - times.get(i)?,
        };
        area += width * (height(i)? + height(i + 1)?) / 2.0;
    }
    Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn index_times(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn integrates_between_consecutive_valleys() {
        let values = [5.0, 3.0, 1.0, 2.0, 4.0, 6.0, 5.0, 4.0, 6.0, 8.0];
        let floor = Floor::interpolate(&values, &[0, 6, 9]);
        let reversals = Reversals {
            valleys: vec![3, 8],
            peaks: vec![6],
        };
        let spans = integrate_spans(
            &index_times(values.len()),
            &values,
            &floor,
            &reversals,
            StepWidth::Index,
        );
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end, spans[0].peak), (3, 8, Some(6)));
        // Heights 3..=8: -3, -1, 1, 0, -2, -1
        assert_relative_eq!(spans[0].area, -4.0, epsilon = 1e-12);
        assert_relative_eq!(spans[0].peak_height, 1.0, epsilon = 1e-12);
        assert!(spans[0].qualified);
    }

    #[test]
    fn min_height_marks_low_peaks() {
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 6.0, 0.0, 0.0];
        let floor = Floor::interpolate(&values, &[0, 6, 12]);
        let reversals = Reversals {
            valleys: vec![6, 9, 12],
            peaks: vec![8, 11],
        };
        let mut spans = integrate_spans(
            &index_times(values.len()),
            &values,
            &floor,
            &reversals,
            StepWidth::Index,
        );
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].peak_height, 1.0);
        assert_eq!(spans[1].peak_height, 6.0);

        mark_min_height(&mut spans, None);
        assert!(spans.iter().all(|s| s.qualified));

        mark_min_height(&mut spans, Some(2.0));
        assert!(!spans[0].qualified);
        assert!(spans[1].qualified);
        // Areas themselves are untouched.
        assert_eq!(spans[0].area, 1.0);
    }

    #[test]
    fn valley_on_last_index_uses_floor_endpoint() {
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 1.0, 0.0, 1.0];
        let floor = Floor::interpolate(&values, &[0, 6, 11]);
        let reversals = Reversals {
            valleys: vec![9, 11],
            peaks: vec![10],
        };
        let spans = integrate_spans(
            &index_times(values.len()),
            &values,
            &floor,
            &reversals,
            StepWidth::Index,
        );
        assert_eq!(spans.len(), 1);
        assert!(spans[0].area.is_finite());
    }

    #[test]
    fn time_width_scales_with_spacing() {
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0, 8.0, 4.0, 0.0];
        let floor = Floor::interpolate(&values, &[0, 6, 10]);
        let reversals = Reversals {
            valleys: vec![6, 10],
            peaks: vec![9],
        };
        let by_index = integrate_spans(
            &index_times(values.len()),
            &values,
            &floor,
            &reversals,
            StepWidth::Index,
        );
        let half_spaced: Vec<f64> = (0..values.len()).map(|i| i as f64 * 0.5).collect();
        let by_time = integrate_spans(&half_spaced, &values, &floor, &reversals, StepWidth::Time);
        assert_relative_eq!(by_index[0].area, 16.0, epsilon = 1e-12);
        assert_relative_eq!(by_time[0].area, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn fewer_than_two_valleys_yield_no_spans() {
        let values = [1.0, 0.0, 1.0];
        let floor = Floor::interpolate(&values, &[0, 2]);
        let reversals = Reversals {
            valleys: vec![2],
            peaks: vec![],
        };
        assert!(integrate_spans(&index_times(3), &values, &floor, &reversals, StepWidth::Index)
            .is_empty());
    }

    #[test]
    fn total_area_over_floor_domain() {
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0, 8.0, 4.0, 0.0];
        let floor = Floor::interpolate(&values, &[0, 6, 10]);
        assert_relative_eq!(
            total_area(&index_times(values.len()), &values, &floor, StepWidth::Index),
            16.0,
            epsilon = 1e-12
        );
        assert_eq!(total_area(&[], &[], &Floor::default(), StepWidth::Index), 0.0);
    }
}

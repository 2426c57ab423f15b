//! Reversal detection: confirmed valleys/peaks and derivative markers.
//!
//! The two detectors are independent. Only [`Reversals`] feeds the area
//! integrator; [`DerivativeMarkers`] is an overlay for display.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Confirmed reversals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversalKind {
    Valley,
    Peak,
}

/// One marker in the alternating valley/peak sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reversal {
    pub index: usize,
    pub kind: ReversalKind,
    pub value: f64,
}

/// Confirmed local minima and maxima.
///
/// Each marker sits on the first sample that confirms the turn, one past
/// the extremum itself. Valleys and peaks alternate starting with a valley,
/// and `peaks[k] > valleys[k]` for every `k`, so there is either one valley
/// more than peaks or the same number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reversals {
    pub valleys: Vec<usize>,
    pub peaks: Vec<usize>,
}

impl Reversals {
    /// Scan the series once for confirmed reversals.
    ///
    /// Series shorter than three samples, and monotonic series, have none.
    pub fn detect(values: &[f64]) -> Self {
        let n = values.len();
        let mut found = Reversals::default();
        if n < 3 || is_monotonic(values) {
            return found;
        }

        let mut i = 1;
        while i < n {
            while i < n && values[i - 1] > values[i] {
                i += 1;
            }
            if i >= n {
                break;
            }

            let valley = i;
            while i < n && values[i - 1] < values[i] {
                i += 1;
            }
            if i == valley {
                // Flat step: nothing rises after it, so no valley yet.
                i += 1;
                continue;
            }
            found.valleys.push(valley);
            if i >= n {
                break;
            }

            found.peaks.push(i);
            i += 1;
        }

        found
    }

    /// Interleave valleys and peaks into one ordered marker list.
    pub fn markers(&self, values: &[f64]) -> Vec<Reversal> {
        let mut markers = Vec::with_capacity(self.valleys.len() + self.peaks.len());
        for (k, &valley) in self.valleys.iter().enumerate() {
            markers.push(Reversal {
                index: valley,
                kind: ReversalKind::Valley,
                value: values[valley],
            });
            if let Some(&peak) = self.peaks.get(k) {
                markers.push(Reversal {
                    index: peak,
                    kind: ReversalKind::Peak,
                    value: values[peak],
                });
            }
        }
        markers
    }

    pub fn is_empty(&self) -> bool {
        self.valleys.is_empty()
    }
}

fn is_monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1]) || values.windows(2).all(|w| w[0] >= w[1])
}

// ---------------------------------------------------------------------------
// Noise-gated derivative markers
// ---------------------------------------------------------------------------

/// Two-lag finite difference: `d[i] = (v[i] - v[i - 2]) / 2` for `i >= 2`.
///
/// The first two entries are copied from the input unchanged.
pub fn finite_difference(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    out.extend(values.iter().take(2));
    for i in 2..values.len() {
        out.push((values[i] - values[i - 2]) / 2.0);
    }
    out
}

/// Indices `i - 1` where `d[i - 1] * d[i] <= -noise`.
fn sign_changes(derivative: &[f64], noise: f64) -> Vec<usize> {
    derivative
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] * w[1] <= -noise)
        .map(|(i, _)| i)
        .collect()
}

/// Dense overlay: the series value at flagged indices, `None` elsewhere.
fn overlay(values: &[f64], flagged: &[usize]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for &i in flagged {
        if let Some(slot) = out.get_mut(i) {
            *slot = Some(values[i]);
        }
    }
    out
}

/// Cosmetic reversal markers from first and second finite differences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivativeMarkers {
    /// Flagged indices from the first difference.
    pub first: Vec<usize>,
    /// Flagged indices from the second difference.
    pub second: Vec<usize>,
    pub first_overlay: Vec<Option<f64>>,
    pub second_overlay: Vec<Option<f64>>,
    /// The second difference itself.
    pub second_derivative: Vec<f64>,
}

impl DerivativeMarkers {
    /// `noise` must be non-negative; larger values suppress markers caused
    /// by small fluctuations.
    pub fn compute(values: &[f64], noise: f64) -> Self {
        let d1 = finite_difference(values);
        let d2 = finite_difference(&d1);

        let first = sign_changes(&d1, noise);
        let second = sign_changes(&d2, noise);

        DerivativeMarkers {
            first_overlay: overlay(values, &first),
            second_overlay: overlay(values, &second),
            first,
            second,
            second_derivative: d2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_lag_true_extrema_by_one() {
        let values = [5.0, 3.0, 1.0, 2.0, 4.0, 6.0, 5.0, 4.0, 6.0, 8.0];
        let found = Reversals::detect(&values);
        assert_eq!(found.valleys, vec![3, 8]);
        assert_eq!(found.peaks, vec![6]);

        let kinds: Vec<_> = found.markers(&values).iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![ReversalKind::Valley, ReversalKind::Peak, ReversalKind::Valley]
        );
    }

    #[test]
    fn rising_start_opens_with_valley_at_one() {
        let values = [1.0, 2.0, 3.0, 2.0, 1.0, 2.0];
        let found = Reversals::detect(&values);
        assert_eq!(found.valleys, vec![1, 5]);
        assert_eq!(found.peaks, vec![3]);
    }

    #[test]
    fn short_and_monotonic_series_have_no_reversals() {
        assert!(Reversals::detect(&[]).is_empty());
        assert!(Reversals::detect(&[1.0]).is_empty());
        assert!(Reversals::detect(&[2.0, 1.0]).is_empty());
        assert!(Reversals::detect(&[1.0, 2.0, 2.0, 5.0]).is_empty());
        assert!(Reversals::detect(&[9.0, 7.0, 7.0, 1.0]).is_empty());
        assert!(Reversals::detect(&[4.0; 8]).is_empty());
    }

    #[test]
    fn flat_bottom_confirms_on_first_rise() {
        let found = Reversals::detect(&[5.0, 3.0, 3.0, 4.0, 2.0]);
        assert_eq!(found.valleys, vec![3]);
        assert_eq!(found.peaks, vec![4]);
    }

    #[test]
    fn flat_top_keeps_alternation() {
        let values = [1.0, 3.0, 3.0, 3.0, 1.0, 2.0];
        let found = Reversals::detect(&values);
        assert_eq!(found.valleys, vec![1, 5]);
        assert_eq!(found.peaks, vec![2]);
        for (v, p) in found.valleys.iter().zip(&found.peaks) {
            assert!(p > v);
        }
    }

    #[test]
    fn finite_difference_copies_head() {
        assert_eq!(finite_difference(&[]), Vec::<f64>::new());
        assert_eq!(finite_difference(&[7.0]), vec![7.0]);
        assert_eq!(
            finite_difference(&[0.0, 2.0, 4.0, 2.0, 0.0]),
            vec![0.0, 2.0, 2.0, 0.0, -2.0]
        );
    }

    #[test]
    fn noise_threshold_gates_markers() {
        let values = [0.0, 1.0, 3.0, 2.0, 0.0, 1.0, 4.0];
        // d1 = [0, 1, 1.5, 0.5, -1.5, -0.5, 2]
        let loose = DerivativeMarkers::compute(&values, 0.0);
        assert_eq!(loose.first, vec![0, 3, 5]);
        assert_eq!(loose.second, vec![0, 2, 5]);

        let strict = DerivativeMarkers::compute(&values, 0.5);
        assert_eq!(strict.first, vec![3, 5]);
        // d2 = [0, 1, 0.75, -0.25, -1.5, -0.5, 1.75]
        assert_eq!(strict.second, vec![5]);
        assert_eq!(
            strict.second_derivative,
            vec![0.0, 1.0, 0.75, -0.25, -1.5, -0.5, 1.75]
        );

        assert_eq!(strict.first_overlay.len(), values.len());
        assert_eq!(strict.first_overlay[3], Some(2.0));
        assert_eq!(strict.first_overlay[4], None);
    }

    #[test]
    fn derivative_markers_on_tiny_input() {
        let markers = DerivativeMarkers::compute(&[3.0], 0.0);
        assert!(markers.first.is_empty());
        assert!(markers.second.is_empty());
        assert_eq!(markers.first_overlay, vec![None]);
    }
}

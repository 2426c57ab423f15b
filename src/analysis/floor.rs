//! Piecewise-linear floor through the baseline anchors.

/// Dense baseline curve, one point per index in `[0, last_anchor)`.
///
/// The last anchor itself has no entry: the curve stops where the final
/// segment ends. [`Floor::closed_at`] additionally answers for that endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Floor {
    points: Vec<f64>,
    /// Series value at the last anchor (index `points.len()`).
    endpoint: Option<f64>,
}

impl Floor {
    /// Interpolate between consecutive anchors.
    ///
    /// For each pair `(left, right)` the points `left..right` lie on the
    /// straight line from `values[left]` to `values[right]`, so every anchor
    /// but the last carries its own series value.
    pub fn interpolate(values: &[f64], anchors: &[usize]) -> Self {
        let Some(&last) = anchors.last() else {
            return Floor::default();
        };

        let mut points = Vec::with_capacity(last);
        for pair in anchors.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let slope = (values[right] - values[left]) / (right - left) as f64;
            for x in 0..right - left {
                points.push(slope * x as f64 + values[left]);
            }
        }

        Floor {
            points,
            endpoint: values.get(last).copied(),
        }
    }

    /// Floor value at `index`, `None` at or past the last anchor.
    pub fn at(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    /// Like [`Floor::at`], but also defined at the last anchor.
    pub fn closed_at(&self, index: usize) -> Option<f64> {
        if index == self.points.len() {
            self.endpoint
        } else {
            self.at(index)
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

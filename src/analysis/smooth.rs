//! Centered moving-average smoothing applied before the other stages.

/// Mean of `values[i - radius..=i + radius]`, clipped at the series edges.
///
/// The output has the same length as the input so times stay aligned.
/// A radius of 0 returns the series unchanged.
pub fn mean_filter(values: &[f64], radius: usize) -> Vec<f64> {
    if radius == 0 {
        return values.to_vec();
    }

    let n = values.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(radius);
            let end = (i + radius + 1).min(n);
            let sum: f64 = values[start..end].iter().sum();
            sum / (end - start) as f64
        })
        .collect()
}

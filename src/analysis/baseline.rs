//! Greedy lower-envelope baseline.
//!
//! Starting from index 0, each step looks [`ANCHOR_GAP`] samples past the
//! last anchor and picks the later sample that the steepest-descending line
//! from that reference point reaches. The chosen samples ("anchors") form a
//! lower envelope of the series.

/// Distance from the last anchor to the slope reference point. Candidates
/// start one past the reference, so consecutive anchors are at least
/// `ANCHOR_GAP + 1` apart (except a final snap to `N - 1`).
pub const ANCHOR_GAP: usize = 5;

/// Select the anchor indices of the lower envelope.
///
/// The result starts at 0, is strictly increasing, and ends at `N - 1`.
/// Series shorter than two samples have no envelope and yield an empty list.
///
/// Runs in at most `N - 1` steps: every step moves strictly forward.
pub fn estimate_anchors(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let mut anchors = vec![0];
    let mut last = 0;
    while last + 1 < n {
        let next = next_anchor(values, last);
        debug_assert!(next > last, "anchor {next} does not advance past {last}");
        anchors.push(next);
        last = next;
    }

    log::debug!("baseline: {} anchors over {n} samples", anchors.len());
    anchors
}

/// Next anchor after `last`; always greater than `last` while `last + 1 < N`.
fn next_anchor(values: &[f64], last: usize) -> usize {
    let n = values.len();
    let end = n - 1;
    let reference = last + ANCHOR_GAP;
    if reference >= end {
        return end;
    }

    let origin = values[reference];
    let mut best = None;
    let mut best_slope = f64::INFINITY;
    for (offset, &value) in values[reference + 1..].iter().enumerate() {
        let slope = (value - origin) / (offset + 1) as f64;
        // Strict comparison keeps the first of equal slopes.
        if slope < best_slope {
            best_slope = slope;
            best = Some(reference + 1 + offset);
        }
    }

    best.unwrap_or(end)
}

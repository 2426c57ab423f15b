use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Time window: which samples are admitted into the series
// ---------------------------------------------------------------------------

/// Closed interval `[low, high]` on the time axis.
///
/// Rows whose time falls outside the window never enter the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub low: f64,
    pub high: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            low: 8.85,
            high: 36.0,
        }
    }
}

impl TimeWindow {
    /// Build a window, rejecting non-finite or inverted bounds.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let window = Self { low, high };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(AnalysisError::invalid_config(format!(
                "time window bounds must be finite, got [{}, {}]",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(AnalysisError::invalid_config(format!(
                "time window is inverted: [{}, {}]",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, time: f64) -> bool {
        self.low <= time && time <= self.high
    }
}

// ---------------------------------------------------------------------------
// Axis labels
// ---------------------------------------------------------------------------

/// Label shown under a sample on the time axis: the time itself when it is
/// an exact multiple of `period`, otherwise empty.
pub fn display_label(time: f64, period: f64) -> String {
    if period > 0.0 && time % period == 0.0 {
        format!("{time}")
    } else {
        String::new()
    }
}

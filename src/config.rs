//! Caller-supplied analysis settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::filter::TimeWindow;
use crate::error::{AnalysisError, Result};

/// Width of one integration step in the area integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepWidth {
    /// Every step is one sample wide; areas are in index units.
    #[default]
    Index,
    /// Step `i` is `time[i + 1] - time[i]` wide; areas are in time units.
    Time,
}

/// Settings for one analysis run.
///
/// Every field has a default so a partial JSON file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows outside this window are dropped by the loader.
    pub time_window: TimeWindow,
    /// Minimum magnitude of a derivative sign-change product to flag a
    /// cosmetic reversal marker.
    pub noise_threshold: f64,
    pub step_width: StepWidth,
    /// Times that are exact multiples of this get an axis label.
    pub label_period: f64,
    /// Radius of the moving average applied before analysis; 0 disables it.
    pub smoothing: usize,
    /// Spans whose peak rises less than this above the floor are marked
    /// unqualified and left out of the text report.
    pub min_peak_height: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            time_window: TimeWindow::default(),
            noise_threshold: 0.0,
            step_width: StepWidth::Index,
            label_period: 150.0,
            smoothing: 0,
            min_peak_height: None,
        }
    }
}

impl AnalysisConfig {
    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AnalysisConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.time_window.validate()?;
        if !self.noise_threshold.is_finite() || self.noise_threshold < 0.0 {
            return Err(AnalysisError::invalid_config(format!(
                "noise threshold must be a finite number >= 0, got {}",
                self.noise_threshold
            )));
        }
        if !self.label_period.is_finite() || self.label_period <= 0.0 {
            return Err(AnalysisError::invalid_config(format!(
                "label period must be positive, got {}",
                self.label_period
            )));
        }
        if let Some(height) = self.min_peak_height {
            if !height.is_finite() || height < 0.0 {
                return Err(AnalysisError::invalid_config(format!(
                    "minimum peak height must be a finite number >= 0, got {height}"
                )));
            }
        }
        Ok(())
    }
}

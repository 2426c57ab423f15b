//! # chromatrace
//!
//! Structural features of a tab-delimited time series such as a
//! chromatography trace: a lower-envelope baseline, confirmed valleys and
//! peaks, and the area of each peak above the baseline.
//!
//! ```text
//!  loader → baseline → floor → reversal → area → report
//! ```
//!
//! Each run owns an [`AnalysisContext`]; nothing is shared between runs.

pub mod analysis;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod report;

pub use config::{AnalysisConfig, StepWidth};
pub use context::AnalysisContext;
pub use data::filter::TimeWindow;
pub use error::{AnalysisError, Result};

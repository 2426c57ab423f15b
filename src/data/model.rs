use serde::Serialize;

use super::filter::display_label;

// ---------------------------------------------------------------------------
// Sample – one row of the trace file
// ---------------------------------------------------------------------------

/// A single `(time, value)` reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

// ---------------------------------------------------------------------------
// Series – the filtered trace
// ---------------------------------------------------------------------------

/// Ordered samples in original file order, split column-wise.
///
/// `times`, `values` and `labels` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// Time axis (x).
    pub times: Vec<f64>,
    /// Intensity axis (y) – same length as `times`.
    pub values: Vec<f64>,
    /// Axis label per sample, empty for unlabelled samples.
    pub labels: Vec<String>,
}

impl Series {
    /// Build a series from samples, labelling times that are multiples of
    /// `label_period`.
    pub fn from_samples(samples: &[Sample], label_period: f64) -> Self {
        let mut series = Series {
            times: Vec::with_capacity(samples.len()),
            values: Vec::with_capacity(samples.len()),
            labels: Vec::with_capacity(samples.len()),
        };
        for sample in samples {
            series.times.push(sample.time);
            series.values.push(sample.value);
            series.labels.push(display_label(sample.time, label_period));
        }
        series
    }

    /// Series with index-valued times, handy when only values matter.
    pub fn from_values(values: &[f64]) -> Self {
        Series {
            times: (0..values.len()).map(|i| i as f64).collect(),
            values: values.to_vec(),
            labels: vec![String::new(); values.len()],
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample(&self, index: usize) -> Option<Sample> {
        Some(Sample::new(*self.times.get(index)?, *self.values.get(index)?))
    }
}

// ---------------------------------------------------------------------------
// Load bookkeeping
// ---------------------------------------------------------------------------

/// Row counts gathered while loading; dropped rows never affect results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub total_rows: usize,
    pub kept: usize,
    /// Rows that were not exactly two finite numbers.
    pub dropped_malformed: usize,
    /// Well-formed rows whose time fell outside the window.
    pub dropped_out_of_window: usize,
}

impl LoadStats {
    pub fn dropped(&self) -> usize {
        self.dropped_malformed + self.dropped_out_of_window
    }
}

/// Everything the loader hands to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadedTrace {
    /// Sample name from a `SampleName` header row, if the file had one.
    pub title: Option<String>,
    pub series: Series,
    pub stats: LoadStats,
}

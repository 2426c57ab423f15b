use std::path::Path;

use super::filter::TimeWindow;
use super::model::{LoadStats, LoadedTrace, Sample, Series};
use crate::error::{AnalysisError, Result};

/// Header key whose second field names the sample.
const SAMPLE_NAME_KEY: &str = "SampleName";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a trace file from disk and parse it.
///
/// When the file carries no `SampleName` header the file stem becomes the
/// title.
pub fn load_file(path: &Path, window: &TimeWindow, label_period: f64) -> Result<LoadedTrace> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut trace = parse_trace(Some(&text), window, label_period)?;
    if trace.title.is_none() {
        trace.title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }
    Ok(trace)
}

/// Parse raw trace text into a filtered [`Series`].
///
/// Layout: one record per line (`\n` or `\r\n`), two tab-separated fields
/// `time` and `value`. Rows that are not exactly two finite numbers, and
/// rows whose time is outside `window`, are dropped and only counted.
///
/// Fails only when `raw` is missing or empty.
pub fn parse_trace(
    raw: Option<&str>,
    window: &TimeWindow,
    label_period: f64,
) -> Result<LoadedTrace> {
    let raw = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return Err(AnalysisError::InputAbsent),
    };

    // Quoting stays off: an unbalanced quote in one bad row must not swallow
    // the rows after it.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut stats = LoadStats::default();
    let mut title = None;
    let mut samples = Vec::new();

    for result in reader.records() {
        stats.total_rows += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::trace!("unreadable row {}: {e}", stats.total_rows);
                stats.dropped_malformed += 1;
                continue;
            }
        };

        if title.is_none() {
            title = sample_name(&record);
        }

        let Some(sample) = parse_row(&record) else {
            stats.dropped_malformed += 1;
            continue;
        };

        if !window.contains(sample.time) {
            stats.dropped_out_of_window += 1;
            continue;
        }

        samples.push(sample);
    }

    stats.kept = samples.len();
    log::debug!(
        "parsed {} rows: kept {}, dropped {} malformed, {} out of window [{}, {}]",
        stats.total_rows,
        stats.kept,
        stats.dropped_malformed,
        stats.dropped_out_of_window,
        window.low,
        window.high
    );

    Ok(LoadedTrace {
        title,
        series: Series::from_samples(&samples, label_period),
        stats,
    })
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn parse_row(record: &csv::StringRecord) -> Option<Sample> {
    if record.len() != 2 {
        return None;
    }
    let time = parse_finite(record.get(0)?)?;
    let value = parse_finite(record.get(1)?)?;
    Some(Sample::new(time, value))
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn sample_name(record: &csv::StringRecord) -> Option<String> {
    let key = record.get(0).map(strip_quotes)?;
    if key != SAMPLE_NAME_KEY {
        return None;
    }
    let name = strip_quotes(record.get(1)?);
    (!name.is_empty()).then(|| name.to_string())
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

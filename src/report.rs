use std::io::Write;

use serde::Serialize;

use crate::analysis::{AreaSpan, DerivativeMarkers, Reversal};
use crate::context::AnalysisContext;
use crate::data::model::{LoadStats, Series};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

/// One line per qualified area span: `"<startTime>-<endTime>, <area>, <peakTime>"`.
pub fn report_lines(ctx: &AnalysisContext) -> Vec<String> {
    let series = ctx.series();
    ctx.qualified_areas()
        .map(|span| {
            let row = AreaRow::new(span, series);
            let peak_time = row.peak_time.map(|t| t.to_string()).unwrap_or_default();
            format!("{}-{}, {}, {}", row.start_time, row.end_time, row.area, peak_time)
        })
        .collect()
}

/// The report lines joined for display.
pub fn render_report(ctx: &AnalysisContext) -> String {
    report_lines(ctx).join("\n")
}

// ---------------------------------------------------------------------------
// Structured payload
// ---------------------------------------------------------------------------

/// Area span with its times resolved, as rows of the peak table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaRow {
    pub start_time: f64,
    pub end_time: f64,
    pub area: f64,
    pub peak_time: Option<f64>,
    pub peak_value: Option<f64>,
    pub start_index: usize,
    pub end_index: usize,
    pub peak_index: Option<usize>,
    pub peak_height: f64,
    pub qualified: bool,
}

impl AreaRow {
    fn new(span: &AreaSpan, series: &Series) -> Self {
        let peak = span.peak.and_then(|p| series.sample(p));
        AreaRow {
            start_time: series.times[span.start],
            end_time: series.times[span.end],
            area: span.area,
            peak_time: peak.map(|s| s.time),
            peak_value: peak.map(|s| s.value),
            start_index: span.start,
            end_index: span.end,
            peak_index: span.peak,
            peak_height: span.peak_height,
            qualified: span.qualified,
        }
    }
}

/// Every span, qualified or not.
pub fn area_rows(ctx: &AnalysisContext) -> Vec<AreaRow> {
    let series = ctx.series();
    ctx.areas.iter().map(|span| AreaRow::new(span, series)).collect()
}

/// Everything a renderer needs to draw one trace.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub title: &'a str,
    pub stats: LoadStats,
    pub times: &'a [f64],
    pub values: &'a [f64],
    /// Values after smoothing; equal to `values` when smoothing is off.
    pub signal: &'a [f64],
    pub labels: &'a [String],
    pub anchors: &'a [usize],
    pub floor: &'a [f64],
    pub valleys: &'a [usize],
    pub peaks: &'a [usize],
    pub markers: Vec<Reversal>,
    pub areas: Vec<AreaRow>,
    pub total_area: f64,
    pub derivative: &'a DerivativeMarkers,
    pub report: Vec<String>,
}

impl<'a> Payload<'a> {
    pub fn new(ctx: &'a AnalysisContext) -> Self {
        let series = ctx.series();
        Payload {
            title: ctx.title(),
            stats: ctx.trace.stats,
            times: &series.times,
            values: &series.values,
            signal: &ctx.signal,
            labels: &series.labels,
            anchors: &ctx.anchors,
            floor: ctx.floor.points(),
            valleys: &ctx.reversals.valleys,
            peaks: &ctx.reversals.peaks,
            markers: ctx.reversals.markers(&ctx.signal),
            areas: area_rows(ctx),
            total_area: ctx.total_area,
            derivative: &ctx.derivative,
            report: report_lines(ctx),
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write the payload of every context as a pretty JSON array.
pub fn write_json<W: Write>(contexts: &[AnalysisContext], writer: W) -> Result<()> {
    let payloads: Vec<Payload<'_>> = contexts.iter().map(Payload::new).collect();
    serde_json::to_writer_pretty(writer, &payloads)?;
    Ok(())
}

/// Write the area table of one context as CSV with a header row.
pub fn write_area_csv<W: Write>(ctx: &AnalysisContext, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in area_rows(ctx) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

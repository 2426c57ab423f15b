use std::path::Path;

use crate::analysis::{
    estimate_anchors, integrate_spans, mark_min_height, mean_filter, total_area, AreaSpan,
    DerivativeMarkers, Floor, Reversals,
};
use crate::config::AnalysisConfig;
use crate::data::loader::{load_file, parse_trace};
use crate::data::model::{LoadedTrace, Series};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Per-run analysis context
// ---------------------------------------------------------------------------

/// Everything one analysis run produces, owned by that run.
///
/// Nothing is shared between contexts, so traces can be analysed side by
/// side without interfering.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub config: AnalysisConfig,

    /// Loaded trace (series, title, row counts).
    pub trace: LoadedTrace,

    /// Values every stage works on: the series after smoothing.
    pub signal: Vec<f64>,

    /// Baseline anchor indices.
    pub anchors: Vec<usize>,

    /// Interpolated floor under the series.
    pub floor: Floor,

    /// Confirmed valleys and peaks; these drive the areas.
    pub reversals: Reversals,

    /// Display-only derivative markers.
    pub derivative: DerivativeMarkers,

    /// One signed area per valley-to-valley span.
    pub areas: Vec<AreaSpan>,

    /// Area of the whole series above the floor.
    pub total_area: f64,
}

impl AnalysisContext {
    /// Empty context with validated settings.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// Parse raw text and run the full pipeline.
    pub fn run(raw: Option<&str>, config: AnalysisConfig) -> Result<Self> {
        let mut ctx = Self::new(config)?;
        let trace = parse_trace(
            raw,
            &ctx.config.time_window,
            ctx.config.label_period,
        )?;
        ctx.set_trace(trace);
        Ok(ctx)
    }

    /// Read a trace file and run the full pipeline.
    pub fn from_file(path: &Path, config: AnalysisConfig) -> Result<Self> {
        let mut ctx = Self::new(config)?;
        let trace = load_file(path, &ctx.config.time_window, ctx.config.label_period)?;
        ctx.set_trace(trace);
        Ok(ctx)
    }

    /// Run the pipeline on an already built series.
    pub fn from_series(series: Series, config: AnalysisConfig) -> Result<Self> {
        let mut ctx = Self::new(config)?;
        let kept = series.len();
        let mut trace = LoadedTrace {
            series,
            ..Default::default()
        };
        trace.stats.total_rows = kept;
        trace.stats.kept = kept;
        ctx.set_trace(trace);
        Ok(ctx)
    }

    /// Ingest a newly loaded trace and recompute every stage.
    pub fn set_trace(&mut self, trace: LoadedTrace) {
        self.trace = trace;
        self.recompute();

        let stats = &self.trace.stats;
        log::info!(
            "{}: {} samples ({} rows dropped), {} anchors, {} valleys, {} peaks, {} spans",
            self.title(),
            stats.kept,
            stats.dropped(),
            self.anchors.len(),
            self.reversals.valleys.len(),
            self.reversals.peaks.len(),
            self.areas.len()
        );
    }

    /// Change the noise threshold; only the derivative overlay depends on it.
    pub fn set_noise_threshold(&mut self, noise: f64) -> Result<()> {
        let mut config = self.config.clone();
        config.noise_threshold = noise;
        config.validate()?;
        self.config = config;
        self.derivative = DerivativeMarkers::compute(&self.signal, noise);
        Ok(())
    }

    pub fn series(&self) -> &Series {
        &self.trace.series
    }

    /// Trace title, or a placeholder when the source had none.
    pub fn title(&self) -> &str {
        self.trace.title.as_deref().unwrap_or("<untitled>")
    }

    /// Spans that passed the peak height requirement.
    pub fn qualified_areas(&self) -> impl Iterator<Item = &AreaSpan> {
        self.areas.iter().filter(|span| span.qualified)
    }

    fn recompute(&mut self) {
        let step = self.config.step_width;
        self.signal = mean_filter(&self.trace.series.values, self.config.smoothing);

        let times = &self.trace.series.times;
        let values = &self.signal;
        self.anchors = estimate_anchors(values);
        self.floor = Floor::interpolate(values, &self.anchors);
        self.reversals = Reversals::detect(values);
        self.derivative = DerivativeMarkers::compute(values, self.config.noise_threshold);
        self.areas = integrate_spans(times, values, &self.floor, &self.reversals, step);
        mark_min_height(&mut self.areas, self.config.min_peak_height);
        self.total_area = total_area(times, values, &self.floor, step);
    }
}

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};

use chromatrace::report::{render_report, write_area_csv, write_json};
use chromatrace::{AnalysisConfig, AnalysisContext, StepWidth, TimeWindow};

#[derive(Parser, Debug)]
#[command(author, version, about = "Baseline, peak and area extraction for chromatography traces", long_about = None)]
struct Cli {
    /// Tab-delimited trace files (time<TAB>value per line)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// JSON settings file; flags below override it
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Lower bound of the time window (inclusive)
    #[arg(long)]
    low: Option<f64>,

    /// Upper bound of the time window (inclusive)
    #[arg(long)]
    high: Option<f64>,

    /// Noise threshold for derivative markers
    #[arg(short, long)]
    noise: Option<f64>,

    /// Moving-average radius applied before analysis (0 = off)
    #[arg(long)]
    smoothing: Option<usize>,

    /// Leave spans whose peak rises less than this above the floor out of the report
    #[arg(long)]
    min_peak_height: Option<f64>,

    /// Integrate over elapsed time instead of sample index
    #[arg(long, action = ArgAction::SetTrue)]
    time_width: bool,

    /// Write the structured payload as JSON (`-` for stdout)
    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    /// Directory for per-trace area tables (`<stem>.csv`)
    #[arg(long, value_hint = ValueHint::DirPath)]
    csv_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when at least one input failed.
fn run(cli: &Cli) -> Result<bool> {
    let config = build_config(cli)?;

    let mut contexts = Vec::with_capacity(cli.inputs.len());
    let mut all_ok = true;
    for path in &cli.inputs {
        match AnalysisContext::from_file(path, config.clone()) {
            Ok(ctx) => {
                log::info!("analysed {}", path.display());
                println!("# {}", ctx.title());
                println!("{}", render_report(&ctx));
                println!("total area: {}", ctx.total_area);
                contexts.push((path, ctx));
            }
            Err(e) => {
                log::error!("Failed to analyse {}: {e:#}", path.display());
                all_ok = false;
            }
        }
    }

    if let Some(dir) = &cli.csv_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        for (path, ctx) in &contexts {
            let out = dir.join(csv_name(path));
            let file = File::create(&out).with_context(|| format!("creating {}", out.display()))?;
            write_area_csv(ctx, BufWriter::new(file))
                .with_context(|| format!("writing {}", out.display()))?;
            log::info!("wrote area table {}", out.display());
        }
    }

    if let Some(json_path) = &cli.json {
        let analysed: Vec<AnalysisContext> = contexts.into_iter().map(|(_, ctx)| ctx).collect();
        if json_path.as_os_str() == "-" {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_json(&analysed, &mut handle).context("writing JSON to stdout")?;
            writeln!(handle)?;
        } else {
            let file = File::create(json_path)
                .with_context(|| format!("creating {}", json_path.display()))?;
            write_json(&analysed, BufWriter::new(file))
                .with_context(|| format!("writing {}", json_path.display()))?;
            log::info!("wrote payload {}", json_path.display());
        }
    }

    Ok(all_ok)
}

fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if cli.low.is_some() || cli.high.is_some() {
        config.time_window = TimeWindow::new(
            cli.low.unwrap_or(config.time_window.low),
            cli.high.unwrap_or(config.time_window.high),
        )?;
    }
    if let Some(noise) = cli.noise {
        config.noise_threshold = noise;
    }
    if let Some(radius) = cli.smoothing {
        config.smoothing = radius;
    }
    if cli.min_peak_height.is_some() {
        config.min_peak_height = cli.min_peak_height;
    }
    if cli.time_width {
        config.step_width = StepWidth::Time;
    }

    config.validate()?;
    Ok(config)
}

fn csv_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trace");
    format!("{stem}.csv")
}

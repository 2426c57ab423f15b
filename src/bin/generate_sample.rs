use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic chromatogram as a tab-delimited trace")]
struct Args {
    /// Output trace file
    #[arg(default_value = "sample_trace.txt", value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Slow drift under the peaks, the thing the baseline has to follow.
fn drift(t: f64) -> f64 {
    2.0 + 0.04 * t + 0.6 * (t / 9.0).sin()
}

fn generate_trace(
    times: &[f64],
    peaks: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    times
        .iter()
        .map(|&t| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(t, mu, sigma, amp))
                .sum();
            drift(t) + signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut rng = SimpleRng::new(42);

    // Retention times: 0 → 45 min, step 0.02
    let times: Vec<f64> = (0..2250).map(|i| i as f64 * 0.02).collect();

    // (retention time, width, height)
    let peaks = [
        (11.4, 0.12, 18.0),
        (14.9, 0.20, 42.0),
        (15.6, 0.15, 25.0),
        (21.3, 0.25, 60.0),
        (27.8, 0.18, 12.0),
        (33.1, 0.30, 35.0),
    ];

    let values = generate_trace(&times, &peaks, 0.05, &mut rng);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "\"SampleName\"\t\"Synthetic lipid standard\"")?;
    for (t, v) in times.iter().zip(&values) {
        writeln!(out, "{t:.2}\t{v:.5}")?;
    }
    out.flush()?;

    log::info!("wrote {} samples to {}", times.len(), args.output.display());
    println!(
        "Wrote {} samples ({} peaks) to {}",
        times.len(),
        peaks.len(),
        args.output.display()
    );
    Ok(())
}

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tilenoise_field::{generate, TileCoord};
use tilenoise_testkit::{
    MetricsReportBuilder, MetricsSink, TestExecutionMetrics, TestResult, TileMetric,
    TileMetricSink,
};
use tracing::info;

mod config;
mod preview;
mod region;

use config::{parse_pair, NoiseArgs};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deterministic, tileable fractal noise height fields",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one tile and preview or export it
    Generate {
        #[command(flatten)]
        noise: NoiseArgs,

        /// Columns in the output field
        #[arg(short = 'W', long, default_value_t = 64)]
        width: usize,

        /// Rows in the output field
        #[arg(short = 'H', long, default_value_t = 64)]
        height: usize,

        /// World-space sample centre as X,Y
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true, default_value = "0,0")]
        centre: [f32; 2],

        /// Print an ASCII preview to stdout
        #[arg(long)]
        ascii: bool,

        /// Write a grayscale PNG preview
        #[arg(long)]
        png: Option<PathBuf>,

        /// Write tile metrics as JSON
        #[arg(long)]
        metrics: Option<PathBuf>,
    },
    /// Generate a block of tiles and check that shared edges agree
    Seams {
        #[command(flatten)]
        noise: NoiseArgs,

        /// Tiles per side of the square region
        #[arg(long, default_value_t = 3)]
        tiles: i32,

        /// Samples per tile side (neighbours share their border samples)
        #[arg(long, default_value_t = 33)]
        size: usize,

        /// Largest acceptable edge mismatch
        #[arg(long, default_value_t = 1e-4)]
        tolerance: f32,

        /// Write a metrics report as JSON
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Write per-tile summaries as JSON
        #[arg(long)]
        tile_metrics: Option<PathBuf>,
    },
    /// Print the validated settings as JSON
    Settings {
        #[command(flatten)]
        noise: NoiseArgs,
    },
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            noise,
            width,
            height,
            centre,
            ascii,
            png,
            metrics,
        } => {
            if width == 0 || height == 0 {
                bail!("--width and --height must be positive");
            }
            let settings = noise.resolve()?;
            let started = Instant::now();
            let field = generate(width, height, &settings, centre);
            let stats = field.stats().context("generated field is empty")?;
            info!(
                width,
                height,
                ?centre,
                mode = ?settings.normalize_mode(),
                min = stats.min,
                max = stats.max,
                mean = stats.mean,
                elapsed_us = started.elapsed().as_micros() as u64,
                "generated field"
            );

            if ascii {
                print!("{}", preview::ascii_preview(&field));
            }
            if let Some(path) = png {
                preview::write_png(&field, &path)?;
                info!(path = %path.display(), "wrote png preview");
            }
            if let Some(path) = metrics {
                let metric = TileMetric::from_field(TileCoord::new(0, 0), &field);
                TileMetricSink::create(&path)?.write(&[metric])?;
                info!(path = %path.display(), "wrote tile metrics");
            }
            Ok(())
        }
        Command::Seams {
            noise,
            tiles,
            size,
            tolerance,
            metrics,
            tile_metrics,
        } => {
            if tiles <= 0 || size < 2 {
                bail!("--tiles must be positive and --size at least 2");
            }
            let settings = noise.resolve()?;
            let started = Instant::now();
            let sweep = region::sweep_region(&settings, tiles, size, tolerance);
            let seamless = sweep.seamless();

            if let Some(seams) = &sweep.metrics.seam_validation {
                info!(
                    total = seams.total_seams,
                    failed = seams.seams_failed,
                    max_diff = seams.max_seam_diff,
                    avg_diff = seams.avg_seam_diff,
                    "seam validation finished"
                );
            }

            if let Some(path) = tile_metrics {
                TileMetricSink::create(&path)?.write(&sweep.tiles)?;
                info!(path = %path.display(), tiles = sweep.tiles.len(), "wrote tile metrics");
            }

            if let Some(path) = metrics {
                let checked = sweep
                    .metrics
                    .seam_validation
                    .as_ref()
                    .map_or(0, |s| s.total_seams);
                let result = match (checked, seamless) {
                    (0, _) => TestResult::Skip,
                    (_, true) => TestResult::Pass,
                    (_, false) => TestResult::Fail,
                };
                let report = MetricsReportBuilder::new("seams")
                    .result(result)
                    .generation(sweep.metrics.clone())
                    .execution(TestExecutionMetrics {
                        duration_seconds: started.elapsed().as_secs_f64(),
                        assertions_checked: sweep
                            .metrics
                            .seam_validation
                            .as_ref()
                            .map(|s| s.total_seams),
                        validations_passed: sweep
                            .metrics
                            .seam_validation
                            .as_ref()
                            .map(|s| s.seams_valid),
                    })
                    .build();
                MetricsSink::create(&path)?.write(&report)?;
                info!(path = %path.display(), "wrote metrics report");
            }

            if !seamless {
                bail!(
                    "seams exceed tolerance {tolerance} (use --mode global for tileable output)"
                );
            }
            Ok(())
        }
        Command::Settings { noise } => {
            let settings = noise.resolve()?;
            println!("{}", serde_json::to_string_pretty(settings.as_settings())?);
            Ok(())
        }
    }
}

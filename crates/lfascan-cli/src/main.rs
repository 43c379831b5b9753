// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lfascan — Lateral-flow assay reader
//
// Entry point. Initialises logging, decodes the photo, runs the analysis off
// the main thread, and writes images and the JSON report.

mod integrity;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use image::DynamicImage;
use lfascan_analysis::{PipelineOutcome, analyze_in_background, decode_photo, save_image};
use lfascan_core::human_errors::humanize_error;
use lfascan_core::{AnalysisConfig, Result};
use tracing::{info, warn};

use report::AnalysisReport;

#[derive(Parser)]
#[command(name = "lfascan")]
#[command(about = "Locate a lateral-flow test cassette in a photo and measure its lines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one photo.
    Analyze(AnalyzeArgs),

    /// Print (or write) the default analysis configuration as JSON.
    DefaultConfig {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArgs {
    /// Path to the input photo.
    #[arg(long)]
    image: PathBuf,

    /// JSON configuration file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the rectified cassette image.
    #[arg(long)]
    rectified: Option<PathBuf>,

    /// Where to write the annotated cassette image.
    #[arg(long)]
    annotated: Option<PathBuf>,

    /// Where to write the JSON report.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Analyze(args) => run_analyze(&args).await.map(|report| {
            println!("{}", report.summary);
        }),
        Commands::DefaultConfig { out } => run_default_config(out.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("{}\n{}", human.message, human.suggestion);
            tracing::error!(error = %err, "lfascan failed");
            ExitCode::FAILURE
        }
    }
}

async fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    let bytes = std::fs::read(&args.image)?;
    let photo = decode_photo(&bytes)?;
    info!(path = %args.image.display(), "Analysing photo");

    let outcome = analyze_in_background(photo, config).await?;
    let report = AnalysisReport::new(&args.image, &bytes, &outcome);

    match &outcome {
        PipelineOutcome::Analyzed(analysis) => {
            if let Some(path) = &args.rectified {
                save_image(&analysis.rectified, path)?;
            }
            if let Some(path) = &args.annotated {
                let annotated = DynamicImage::ImageRgba8(analysis.strip.annotated.clone());
                save_image(&annotated, path)?;
            }
        }
        PipelineOutcome::CassetteNotFound => {
            if args.rectified.is_some() || args.annotated.is_some() {
                warn!("Cassette not found; no images written");
            }
        }
    }

    if let Some(path) = &args.report {
        write_json(&report, path)?;
    }
    Ok(report)
}

fn run_default_config(out: Option<&Path>) -> Result<()> {
    let config = AnalysisConfig::default();
    match out {
        Some(path) => {
            config.to_json_file(path)?;
            info!(path = %path.display(), "Default configuration written");
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use lfascan_core::LfaError;

    fn analyze_args(dir: &Path, image: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            image,
            config: None,
            rectified: Some(dir.join("rectified.png")),
            annotated: Some(dir.join("annotated.png")),
            report: Some(dir.join("report.json")),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[tokio::test]
    async fn blank_photo_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let photo_path = dir.path().join("blank.png");
        RgbImage::from_pixel(320, 240, Rgb([140, 140, 140]))
            .save(&photo_path)
            .unwrap();

        let args = analyze_args(dir.path(), photo_path);
        let report = run_analyze(&args).await.unwrap();
        assert!(!report.cassette_found);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(written["cassette_found"], false);
        assert!(!dir.path().join("annotated.png").exists());
    }

    #[tokio::test]
    async fn missing_photo_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = analyze_args(dir.path(), dir.path().join("nope.jpg"));
        let err = run_analyze(&args).await.unwrap_err();
        assert!(matches!(err, LfaError::Io(_)));
    }

    #[test]
    fn default_config_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        run_default_config(Some(&path)).unwrap();
        let loaded = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, AnalysisConfig::default());
    }
}

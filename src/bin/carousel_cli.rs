//! Carousel CLI - compose and export carousels from session files
//!
//! Commands: variants, compose, preview, export
//! Outputs JSON to stdout, logs to stderr
//! Returns 1 on usage or I/O errors, 2 when any slide fails to export

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use carousel_core::{
    DirectorySink, ExportPipeline, ExportReport, OffscreenStage, PreviewController, SessionFile,
    SlideRole, SvgRasterizer, TemplateRegistry,
};

const MANIFEST_FILENAME: &str = "export-manifest.json";

#[derive(Parser)]
#[command(name = "carousel-cli")]
#[command(about = "Carousel CLI - slide composition and raster export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List variant catalogs per role
    Variants,

    /// Print the composed slides of a session
    Compose {
        /// Session file (JSON)
        #[arg(short, long)]
        session: PathBuf,
    },

    /// Write a scaled preview SVG of one slide
    Preview {
        #[arg(short, long)]
        session: PathBuf,

        /// Available width in pixels
        #[arg(long)]
        width: f32,

        /// Available height in pixels
        #[arg(long)]
        height: f32,

        /// Slide number (1-3)
        #[arg(long, default_value_t = 1)]
        slide: usize,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Export slides as PNG files
    Export {
        #[arg(short, long)]
        session: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Export only this slide number (1-3)
        #[arg(long)]
        slide: Option<usize>,

        /// Override the session's export scale
        #[arg(long)]
        scale: Option<f32>,

        /// Override the pause between slides
        #[arg(long)]
        pacing_ms: Option<u64>,
    },
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => println!(r#"{{"success": false, "error": "Failed to serialize output: {}"}}"#, e),
    }
}

fn fail(error: impl std::fmt::Display) -> ExitCode {
    print_json(&serde_json::json!({
        "success": false,
        "error": error.to_string(),
    }));
    ExitCode::FAILURE
}

/// One-based slide number to index
fn slide_index(slide: usize) -> Result<usize, String> {
    slide
        .checked_sub(1)
        .filter(|i| SlideRole::from_index(*i).is_some())
        .ok_or_else(|| format!("Slide must be between 1 and {}, got {}", SlideRole::ALL.len(), slide))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Variants => {
            let registry = TemplateRegistry::builtin();
            let catalogs: serde_json::Map<_, _> = SlideRole::ALL
                .iter()
                .map(|role| {
                    let variants: Vec<_> = registry
                        .variants(*role)
                        .iter()
                        .map(|t| serde_json::json!({
                            "id": t.id,
                            "name": t.name,
                            "description": t.description,
                            "requiredFields": t.required_fields(),
                        }))
                        .collect();
                    (role.to_string(), serde_json::Value::from(variants))
                })
                .collect();

            print_json(&catalogs);
            ExitCode::SUCCESS
        }

        Commands::Compose { session } => {
            let (_, composer) = match SessionFile::open(&session) {
                Ok(s) => s,
                Err(e) => return fail(e),
            };

            print_json(&serde_json::json!({
                "success": true,
                "settings": composer.settings(),
                "slides": composer.get_composed_slides(),
            }));
            ExitCode::SUCCESS
        }

        Commands::Preview { session, width, height, slide, out } => {
            let index = match slide_index(slide) {
                Ok(i) => i,
                Err(e) => return fail(e),
            };
            let (_, composer) = match SessionFile::open(&session) {
                Ok(s) => s,
                Err(e) => return fail(e),
            };

            let frame = PreviewController::new(width, height).frame(&composer, index);
            if let Err(e) = fs::write(&out, frame.to_svg()) {
                return fail(format!("Failed to write {}: {}", out.display(), e));
            }

            print_json(&serde_json::json!({
                "success": true,
                "slide": slide,
                "role": frame.role,
                "scale": frame.scale,
                "width": frame.scaled_width,
                "height": frame.scaled_height,
                "path": out,
            }));
            ExitCode::SUCCESS
        }

        Commands::Export { session, out, slide, scale, pacing_ms } => {
            let index = match slide.map(slide_index).transpose() {
                Ok(i) => i,
                Err(e) => return fail(e),
            };
            let (session_file, composer) = match SessionFile::open(&session) {
                Ok(s) => s,
                Err(e) => return fail(e),
            };

            let mut config = session_file.export_config();
            if let Some(scale) = scale {
                config.scale = scale;
            }
            if let Some(pacing_ms) = pacing_ms {
                config.pacing_ms = pacing_ms;
            }

            let sink = match DirectorySink::new(&out) {
                Ok(s) => s,
                Err(e) => return fail(format!("Failed to create {}: {}", out.display(), e)),
            };

            let mut stage = OffscreenStage::new();
            composer.mount_offscreen(&mut stage);

            let pipeline = ExportPipeline::new(Arc::new(SvgRasterizer::new()), Arc::new(sink), config);
            let started_at = chrono::Utc::now();

            let results = match index {
                Some(i) => pipeline.export_slide(&stage, i).await.map(|r| vec![r]),
                None => pipeline.export_all(&stage).await,
            };
            let results = match results {
                Ok(r) => r,
                Err(e) => return fail(e),
            };

            let report = match ExportReport::new(composer.id(), started_at, results) {
                Ok(r) => r,
                Err(e) => return fail(e),
            };

            match serde_json::to_string_pretty(&report) {
                Ok(json) => {
                    if let Err(e) = fs::write(out.join(MANIFEST_FILENAME), &json) {
                        return fail(format!("Failed to write manifest: {}", e));
                    }
                    println!("{}", json);
                }
                Err(e) => return fail(e),
            }

            if report.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // At least one slide failed
            }
        }
    }
}

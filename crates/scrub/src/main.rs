//! scrub CLI - strip metadata, blur faces, and reset the content hash of
//! an image.
//!
//! The binary is thin glue: it marshals bytes into the core pipeline and
//! the report back out. All processing is in-memory; the only disk writes
//! are the final output file.
//!
//! # Usage
//!
//! ```bash
//! # Scrub an image (writes scrubbed_photo.jpg next to the input)
//! scrub photo.jpg
//!
//! # Choose the output path
//! scrub photo.jpg -o clean.jpg
//!
//! # Count faces and inspect metadata without writing anything
//! scrub photo.jpg --dry-run
//!
//! # Use a SeetaFace model for detection
//! scrub photo.jpg --model ~/.scrub/seeta_fd_frontal_v1.0.bin
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scrub_core::{Config, FaceDetector, NoopDetector, RustfaceDetector, Scrubber};

mod logging;

/// Scrub images of EXIF metadata and facial identifiers.
#[derive(Parser, Debug)]
#[command(name = "scrub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file (JPEG, PNG, or WebP)
    input: PathBuf,

    /// Output file (defaults to scrubbed_<name> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report face count and metadata presence without writing output
    #[arg(long)]
    dry_run: bool,

    /// Path to a SeetaFace detection model (overrides the config file)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
            Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("scrub v{}", scrub_core::VERSION);

    let detector = build_detector(&config, cli.model.as_deref())?;
    let scrubber = Scrubber::new(config, detector).context("invalid configuration")?;

    let raw = std::fs::read(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;

    if cli.dry_run {
        let summary = scrubber.summary(&raw)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let out = scrubber.process(&raw)?;
    let output_path = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.input, &out.report.format));

    std::fs::write(&output_path, &out.bytes)
        .with_context(|| format!("cannot write {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), "wrote scrubbed image");

    println!("{}", serde_json::to_string_pretty(&out.report)?);
    Ok(())
}

/// Load the configured detector backend, or fall back to no detection.
fn build_detector(
    config: &Config,
    model_override: Option<&Path>,
) -> anyhow::Result<Arc<dyn FaceDetector>> {
    let model_path = model_override
        .map(Path::to_path_buf)
        .or_else(|| config.model_path());

    match model_path {
        Some(path) => {
            let detector = RustfaceDetector::from_model_file(&path, &config.detector)
                .with_context(|| format!("cannot load detector model {}", path.display()))?;
            Ok(Arc::new(detector))
        }
        None => {
            tracing::warn!("no detector model configured; faces will not be redacted");
            Ok(Arc::new(NoopDetector))
        }
    }
}

/// Default output path: `scrubbed_<stem>.<ext>` next to the input, with
/// the extension matching the actual container format.
fn default_output_path(input: &Path, format: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let ext = match format {
        "jpeg" => "jpg",
        other => other,
    };
    input.with_file_name(format!("scrubbed_{stem}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        let path = default_output_path(Path::new("/photos/holiday.jpeg"), "jpeg");
        assert_eq!(path, Path::new("/photos/scrubbed_holiday.jpg"));
    }

    #[test]
    fn default_output_follows_detected_format() {
        // A PNG misnamed as .jpg comes out with the real extension
        let path = default_output_path(Path::new("pic.jpg"), "png");
        assert_eq!(path, Path::new("scrubbed_pic.png"));
    }

    #[test]
    fn default_output_handles_missing_stem() {
        let path = default_output_path(Path::new(""), "webp");
        assert_eq!(path, Path::new("scrubbed_image.webp"));
    }

    #[test]
    fn cli_parses_dry_run() {
        let cli = Cli::parse_from(["scrub", "in.jpg", "--dry-run"]);
        assert!(cli.dry_run);
        assert!(cli.output.is_none());
    }

    #[test]
    fn cli_parses_output_and_model() {
        let cli = Cli::parse_from(["scrub", "in.jpg", "-o", "out.jpg", "--model", "m.bin"]);
        assert_eq!(cli.output.unwrap(), PathBuf::from("out.jpg"));
        assert_eq!(cli.model.unwrap(), PathBuf::from("m.bin"));
    }
}

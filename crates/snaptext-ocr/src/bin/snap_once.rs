//! Capture one screen region and print the recognized text.
//!
//! cargo run -p snaptext-ocr --bin snap_once -- --x 100 --y 100 --width 400 --height 80

use anyhow::{Context, Result};
use clap::Parser;
use snaptext_config::ocr::OcrConfig;
use snaptext_core::{Snapshot, text::clean_text};
use snaptext_types::Region;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Run OCR on a single screen region")]
struct Args {
    #[arg(long)]
    x: i32,
    #[arg(long)]
    y: i32,
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
    /// OCR language, e.g. eng or jpn+jpn_vert
    #[arg(long)]
    lang: Option<String>,
    /// Save the captured image here
    #[arg(long)]
    save: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = OcrConfig::default();
    if let Some(lang) = args.lang {
        config.language = lang;
    }

    let region = Region::new(args.x, args.y, args.width, args.height)
        .context("Region must have a non-zero size")?;
    tracing::info!("Capturing {}", region);

    let start = std::time::Instant::now();
    let image = snaptext_ocr::XcapSnapshot::new(args.save).capture(region)?;
    tracing::debug!("Captured {:?} in {:?}", image, start.elapsed());

    let recognizer = snaptext_ocr::recognizer_for(&config)?;
    let start = std::time::Instant::now();
    let raw = recognizer.recognize(&image, &config.language)?;
    tracing::debug!("Recognized {} chars in {:?}", raw.chars().count(), start.elapsed());

    println!("{}", clean_text(&raw, config.is_vertical()));
    Ok(())
}

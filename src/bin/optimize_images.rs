//! Gallery asset optimizer.
//!
//! Walks the input directory, resizes anything wider than 800px down to
//! 800px (no enlargement), and recompresses into web-friendly output:
//! PNGs stay PNG, everything else becomes JPEG at quality 80. Unreadable
//! files are reported and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageFormat;

const MAX_WIDTH: u32 = 800;
const JPEG_QUALITY: u8 = 80;
const SUPPORTED_EXT: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Parser, Debug)]
#[command(name = "optimize_images")]
#[command(about = "Resize and recompress gallery images", long_about = None)]
struct Args {
    /// Directory of source images
    #[arg(default_value = "data/images")]
    input_dir: PathBuf,

    /// Where optimized images are written
    #[arg(long, default_value = "data/images/optimized")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("could not create {}", args.output_dir.display()))?;

    let mut optimized = 0usize;
    let mut failed = 0usize;
    let entries = fs::read_dir(&args.input_dir)
        .with_context(|| format!("could not read {}", args.input_dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || !is_supported(&path) {
            continue;
        }
        let output = output_path(&args.output_dir, &path);
        match optimize(&path, &output) {
            Ok(savings) => {
                optimized += 1;
                println!(
                    "  {} -> {} ({savings:.1}% smaller)",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    output.file_name().unwrap_or_default().to_string_lossy(),
                );
            }
            Err(err) => {
                failed += 1;
                eprintln!("  error processing {}: {err:#}", path.display());
            }
        }
    }

    if optimized == 0 && failed == 0 {
        println!("no images found in {}", args.input_dir.display());
    } else {
        println!("{optimized} optimized, {failed} failed");
    }
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| SUPPORTED_EXT.contains(&e.as_str()))
}

/// Output keeps the stem; PNG stays PNG, everything else becomes JPEG.
fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = if has_ext(input, "png") { "png" } else { "jpg" };
    output_dir.join(format!("{stem}.{ext}"))
}

fn has_ext(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

/// Returns the size saving in percent.
fn optimize(input: &Path, output: &Path) -> Result<f64> {
    let img = image::open(input).context("could not decode")?;
    let img = if img.width() > MAX_WIDTH {
        img.resize(MAX_WIDTH, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    if has_ext(output, "png") {
        img.save_with_format(output, ImageFormat::Png)
            .context("could not write png")?;
    } else {
        let file = fs::File::create(output)
            .with_context(|| format!("could not create {}", output.display()))?;
        let encoder = JpegEncoder::new_with_quality(file, JPEG_QUALITY);
        img.to_rgb8()
            .write_with_encoder(encoder)
            .context("could not write jpeg")?;
    }

    let before = fs::metadata(input)?.len() as f64;
    let after = fs::metadata(output)?.len() as f64;
    Ok((1.0 - after / before) * 100.0)
}

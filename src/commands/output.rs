use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};
use std::path::Path;

use crate::cli::OutputFormat;
use lambertain::render::{classification_to_image, LEGEND};
use lambertain::{ClassificationMap, Label, LabelCounts, ModelSummary};

pub fn load_rgb(path: &str) -> Result<RgbImage> {
    let image = image::open(Path::new(path))
        .with_context(|| format!("Failed to load image: {}", path))?;
    Ok(image.to_rgb8())
}

pub fn load_mask(path: &str) -> Result<GrayImage> {
    let image =
        image::open(Path::new(path)).with_context(|| format!("Failed to load mask: {}", path))?;
    Ok(image.to_luma8())
}

/// Save the palette rendering and, if requested, the raw label codes.
pub fn save_classification(
    map: &ClassificationMap,
    output: &str,
    labels: Option<&str>,
) -> Result<()> {
    classification_to_image(map)
        .save(output)
        .with_context(|| format!("Failed to save classification to: {}", output))?;
    println!("Saved classification to: {}", output);

    if let Some(labels_path) = labels {
        map.to_gray_image()
            .save(labels_path)
            .with_context(|| format!("Failed to save label image to: {}", labels_path))?;
        println!("Saved label codes to: {}", labels_path);
    }
    Ok(())
}

pub fn print_legend() {
    println!("{}", LEGEND);
}

pub fn print_summary(
    summary: &ModelSummary,
    counts: &LabelCounts,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(summary, counts),
        OutputFormat::Table => {
            output_table(summary, counts);
            Ok(())
        }
    }
}

fn output_json(summary: &ModelSummary, counts: &LabelCounts) -> Result<()> {
    let value = serde_json::json!({
        "model": summary,
        "counts": counts,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn output_table(summary: &ModelSummary, counts: &LabelCounts) {
    println!("Model:");
    println!("  Mode: {}", summary.mode);
    println!("  Detection rate: {:.3}", summary.detection_rate);
    println!("  Training samples: {}", summary.sample_count);
    if summary.degraded {
        println!("  Degraded: no training samples, unit variation used");
    }
    if let Some((width, height)) = summary.dimensions {
        println!("  Frame size: {}x{}", width, height);
    }
    if let (Some(mean), Some(stddev)) = (summary.mean, summary.stddev) {
        println!("  Mean: ({:.3}, {:.3}, {:.3})", mean[0], mean[1], mean[2]);
        println!("  Stddev: ({:.3}, {:.3}, {:.3})", stddev[0], stddev[1], stddev[2]);
    }
    if let Some(variation) = summary.variation {
        println!("  Brightness variation: {:.6}", variation.brightness);
        println!("  Chromaticity variation: {:.6}", variation.chromaticity);
    }
    println!("Thresholds:");
    println!("  Chromaticity: {:.4}", summary.thresholds.chromaticity);
    println!(
        "  Brightness: {:.4} .. {:.4}",
        summary.thresholds.brightness_lower, summary.thresholds.brightness_upper
    );

    let total = counts.total().max(1) as f64;
    println!();
    println!("{:<12} {:>10} {:>8}", "Label", "Pixels", "Share");
    println!("{:-<32}", "");
    for label in Label::ALL {
        let count = counts.get(label);
        println!(
            "{:<12} {:>10} {:>7.2}%",
            label.name(),
            count,
            count as f64 * 100.0 / total
        );
    }
}

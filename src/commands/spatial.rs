use anyhow::{Context, Result};
use imageproc::rect::Rect;
use std::sync::Arc;

use super::output::{load_mask, load_rgb, print_legend, print_summary, save_classification};
use crate::cli::ModelOptions;
use lambertain::render::{outline_regions, region_mask};
use lambertain::{ColorModel, ModelObserver, TrainingCorpus};

pub fn run_spatial(
    image_path: &str,
    regions: &[Rect],
    mask_path: Option<&str>,
    output: &str,
    region_output: Option<&str>,
    options: &ModelOptions,
    observer: Arc<dyn ModelObserver>,
) -> Result<()> {
    println!("Loading image: {}", image_path);
    let image = load_rgb(image_path)?;
    println!("Image dimensions: {}x{}", image.width(), image.height());

    let mask = match mask_path {
        Some(path) => load_mask(path)?,
        None => {
            if regions.is_empty() {
                anyhow::bail!("At least one --region or a --mask is required");
            }
            region_mask(image.width(), image.height(), regions)
                .context("Invalid training region")?
        }
    };

    let model = ColorModel::train_with_observer(
        TrainingCorpus::Spatial {
            image: &image,
            mask: &mask,
        },
        options.to_model_config(),
        observer,
    )
    .context("Failed to train spatial model")?;

    let map = model
        .classify(&image)
        .context("Failed to classify image")?;

    save_classification(&map, output, options.labels.as_deref())?;

    if let Some(path) = region_output {
        outline_regions(&image, regions)
            .save(path)
            .with_context(|| format!("Failed to save region image to: {}", path))?;
        println!("Saved training regions to: {}", path);
    }

    print_legend();
    print_summary(&model.summary(), &map.counts(), options.format)
}

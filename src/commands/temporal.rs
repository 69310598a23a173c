use anyhow::{Context, Result};
use std::sync::Arc;

use super::output::{load_rgb, print_legend, print_summary, save_classification};
use crate::cli::ModelOptions;
use lambertain::{ColorModel, ModelObserver, TrainingCorpus};

pub fn run_temporal(
    test_path: &str,
    training_paths: &[String],
    output: &str,
    options: &ModelOptions,
    observer: Arc<dyn ModelObserver>,
) -> Result<()> {
    if training_paths.is_empty() {
        anyhow::bail!("At least one training image is required");
    }

    println!("Loading {} training images", training_paths.len());
    let frames = training_paths
        .iter()
        .map(|path| load_rgb(path))
        .collect::<Result<Vec<_>>>()?;

    let model = ColorModel::train_with_observer(
        TrainingCorpus::Temporal { frames: &frames },
        options.to_model_config(),
        observer,
    )
    .context("Failed to train temporal model")?;

    println!("Loading test image: {}", test_path);
    let test = load_rgb(test_path)?;
    let map = model
        .classify(&test)
        .with_context(|| format!("Failed to classify {}", test_path))?;

    save_classification(&map, output, options.labels.as_deref())?;

    print_legend();
    print_summary(&model.summary(), &map.counts(), options.format)
}

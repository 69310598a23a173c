mod cli;
mod commands;

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_spatial, run_temporal};
use lambertain::{ModelObserver, NoopObserver, TracingObserver};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "lambertain=debug" } else { "lambertain=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let observer: Arc<dyn ModelObserver> = if cli.verbose {
        Arc::new(TracingObserver)
    } else {
        Arc::new(NoopObserver)
    };

    match cli.command {
        Commands::Spatial {
            image,
            regions,
            mask,
            output,
            region_output,
            model_options,
        } => {
            run_spatial(
                &image,
                &regions,
                mask.as_deref(),
                &output,
                region_output.as_deref(),
                &model_options,
                observer,
            )?;
        }
        Commands::Temporal {
            test_image,
            training_images,
            output,
            model_options,
        } => {
            run_temporal(&test_image, &training_images, &output, &model_options, observer)?;
        }
    }

    Ok(())
}

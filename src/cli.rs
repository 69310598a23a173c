use clap::{Parser, Subcommand, ValueEnum};
use imageproc::rect::Rect;
use lambertain::ModelConfig;

#[derive(Parser)]
#[command(name = "lambertain")]
#[command(about = "Label pixels as background, shadow, highlight or foreground", long_about = None)]
pub struct Cli {
    /// Enable debug output of intermediate model values
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train on rectangular regions of one image and classify that image
    Spatial {
        /// Image to train on and classify
        image: String,

        /// Training region as x,y,width,height (repeatable)
        #[arg(long = "region", value_parser = parse_region, required_unless_present = "mask")]
        regions: Vec<Rect>,

        /// Grayscale training mask; non-zero pixels are training samples
        #[arg(short, long, conflicts_with = "regions")]
        mask: Option<String>,

        /// Output path of the rendered classification
        #[arg(short, long)]
        output: String,

        /// Output path of the input image with the training regions outlined
        #[arg(long, requires = "regions")]
        region_output: Option<String>,

        #[command(flatten)]
        model_options: ModelOptions,
    },

    /// Train on a sequence of aligned frames and classify a test image
    Temporal {
        /// Image to classify
        test_image: String,

        /// Training frames, all the size of the test image
        #[arg(required = true)]
        training_images: Vec<String>,

        /// Output path of the rendered classification
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        model_options: ModelOptions,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct ModelOptions {
    /// Fraction of training samples treated as background (0.0-1.0, exclusive)
    #[arg(short = 'r', long, default_value_t = ModelConfig::default().detection_rate)]
    pub detection_rate: f64,

    /// Format of the model summary
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Also write the raw label codes (1-4) as a grayscale image
    #[arg(long)]
    pub labels: Option<String>,
}

impl ModelOptions {
    pub fn to_model_config(&self) -> ModelConfig {
        ModelConfig::with_detection_rate(self.detection_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Parse `x,y,width,height` into a rectangle of non-zero size.
pub fn parse_region(value: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected x,y,width,height but got '{}'", value));
    }

    let x: i32 = parts[0]
        .parse()
        .map_err(|e| format!("invalid x '{}': {}", parts[0], e))?;
    let y: i32 = parts[1]
        .parse()
        .map_err(|e| format!("invalid y '{}': {}", parts[1], e))?;
    let width: u32 = parts[2]
        .parse()
        .map_err(|e| format!("invalid width '{}': {}", parts[2], e))?;
    let height: u32 = parts[3]
        .parse()
        .map_err(|e| format!("invalid height '{}': {}", parts[3], e))?;

    if width == 0 || height == 0 {
        return Err(format!("region '{}' has zero size", value));
    }
    Ok(Rect::at(x, y).of_size(width, height))
}

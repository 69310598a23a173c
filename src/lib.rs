pub mod classifier;
pub mod distortion;
pub mod error;
pub mod model;
pub mod observer;
pub mod parallel;
pub mod render;
pub mod site_statistics;
pub mod thresholds;
pub mod variation;

// Re-export commonly used items
pub use classifier::{ClassificationMap, Label, LabelCounts};
pub use distortion::{DistortionPair, NormalizedDistortion};
pub use error::{LambertainError, Result};
pub use model::{ColorModel, ModelConfig, ModelSummary, TrainingCorpus, TrainingMode};
pub use observer::{ModelObserver, NoopObserver, TracingObserver};
pub use site_statistics::{SiteStatistics, SiteStats};
pub use thresholds::{PercentileBand, ThresholdSet};
pub use variation::{Variation, VariationModel};

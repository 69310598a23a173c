/// Hooks into the training and classification pipeline
use crate::classifier::ClassificationMap;
use crate::site_statistics::SiteStatistics;
use crate::thresholds::ThresholdSet;
use crate::variation::VariationModel;

/// Receives intermediate results of a `ColorModel`.
///
/// Every hook defaults to a no-op, so implementations override only what they need.
pub trait ModelObserver: Send + Sync {
    /// Called once statistics and distortion variation have been estimated.
    fn on_statistics(&self, _statistics: &SiteStatistics, _variation: &VariationModel) {}

    /// Called when training found no samples and fell back to unit variation.
    fn on_degraded_model(&self) {}

    fn on_thresholds(&self, _thresholds: &ThresholdSet) {}

    fn on_classification(&self, _map: &ClassificationMap) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ModelObserver for NoopObserver {}

/// Observer that emits every event as `tracing` debug output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ModelObserver for TracingObserver {
    fn on_statistics(&self, statistics: &SiteStatistics, variation: &VariationModel) {
        match (statistics, variation) {
            (SiteStatistics::Spatial(site), VariationModel::Global(v)) => {
                tracing::debug!("mean {:?}", site.mean);
                tracing::debug!("stddev {:?}", site.stddev);
                tracing::debug!("denom {}", site.brightness_denominator);
                tracing::debug!("bdist variation: {}", v.brightness);
                tracing::debug!("cdist variation: {}", v.chromaticity);
            }
            _ => {
                let sites = statistics.sites();
                let variations = variation.sites();
                let max_stddev = sites
                    .iter()
                    .flat_map(|s| s.stddev)
                    .fold(f64::MIN, f64::max);
                let max_bvar = variations
                    .iter()
                    .map(|v| v.brightness)
                    .fold(f64::MIN, f64::max);
                let max_cvar = variations
                    .iter()
                    .map(|v| v.chromaticity)
                    .fold(f64::MIN, f64::max);
                tracing::debug!(
                    "{} sites, max stddev {:.3}, max variation bdist {:.4} cdist {:.4}",
                    sites.len(),
                    max_stddev,
                    max_bvar,
                    max_cvar
                );
            }
        }
    }

    fn on_degraded_model(&self) {
        tracing::debug!("no training samples, using unit distortion variation");
    }

    fn on_thresholds(&self, thresholds: &ThresholdSet) {
        tracing::debug!("chromaticity threshold: {}", thresholds.chromaticity);
        tracing::debug!(
            "brightness thresholds: {} {}",
            thresholds.brightness_lower,
            thresholds.brightness_upper
        );
    }

    fn on_classification(&self, map: &ClassificationMap) {
        let counts = map.counts();
        tracing::debug!(
            "classified {}x{}: background {} shadow {} highlight {} foreground {}",
            map.width(),
            map.height(),
            counts.background,
            counts.shadow,
            counts.highlight,
            counts.foreground
        );
    }
}

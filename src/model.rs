use std::fmt;
use std::sync::Arc;

use image::{GrayImage, Rgb, RgbImage};
use imageproc::rect::Rect;
use serde::Serialize;

use crate::classifier::{decide, ClassificationMap, Label};
use crate::distortion::{distortion, NormalizedDistortion};
use crate::error::{ensure_same_size, LambertainError, Result};
use crate::observer::{ModelObserver, NoopObserver};
use crate::parallel::par_rows_mut;
use crate::render::region_mask;
use crate::site_statistics::{frame_dimensions, SiteStatistics, Triple};
use crate::thresholds::{select_thresholds, ThresholdSet};
use crate::variation::{Variation, VariationModel};

/// Training parameters of a color model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelConfig {
    /// Fraction of training samples expected inside the background band
    pub detection_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { detection_rate: 0.95 }
    }
}

impl ModelConfig {
    pub fn with_detection_rate(detection_rate: f64) -> Self {
        Self { detection_rate }
    }

    pub fn validate(&self) -> Result<()> {
        let rate = self.detection_rate;
        if !rate.is_finite() || rate <= 0.0 || rate >= 1.0 {
            return Err(LambertainError::configuration(format!(
                "detection rate must lie strictly between 0 and 1, got {}",
                rate
            )));
        }
        Ok(())
    }
}

/// Data a model is trained from.
#[derive(Debug, Clone, Copy)]
pub enum TrainingCorpus<'a> {
    /// One image; non-zero mask pixels select the training samples
    Spatial {
        image: &'a RgbImage,
        mask: &'a GrayImage,
    },
    /// Aligned frames of one scene, one sample per frame and pixel position
    Temporal { frames: &'a [RgbImage] },
}

impl TrainingCorpus<'_> {
    pub fn mode(&self) -> TrainingMode {
        match self {
            TrainingCorpus::Spatial { .. } => TrainingMode::Spatial,
            TrainingCorpus::Temporal { .. } => TrainingMode::Temporal,
        }
    }

    /// Check sizes before any statistics are computed.
    pub fn validate(&self) -> Result<()> {
        match self {
            TrainingCorpus::Spatial { image, mask } => {
                let (width, height) = image.dimensions();
                if width == 0 || height == 0 {
                    return Err(LambertainError::configuration(format!(
                        "training image is empty ({}x{})",
                        width, height
                    )));
                }
                ensure_same_size(image.dimensions(), mask.dimensions())
            }
            TrainingCorpus::Temporal { frames } => frame_dimensions(frames).map(|_| ()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    Spatial,
    Temporal,
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingMode::Spatial => write!(f, "spatial"),
            TrainingMode::Temporal => write!(f, "temporal"),
        }
    }
}

/// Reportable description of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub mode: TrainingMode,
    pub detection_rate: f64,
    pub sample_count: usize,
    pub degraded: bool,
    pub thresholds: ThresholdSet,
    /// Required size of classified images (temporal models only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<Triple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stddev: Option<Triple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<Variation>,
}

/// Trained background color model.
///
/// Immutable once built; `classify` only reads it and may be called
/// concurrently from any number of threads.
pub struct ColorModel {
    statistics: SiteStatistics,
    variation: VariationModel,
    thresholds: ThresholdSet,
    config: ModelConfig,
    sample_count: usize,
    degraded: bool,
    observer: Arc<dyn ModelObserver>,
}

impl fmt::Debug for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorModel")
            .field("mode", &self.mode())
            .field("thresholds", &self.thresholds)
            .field("config", &self.config)
            .field("sample_count", &self.sample_count)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl ColorModel {
    pub fn train(corpus: TrainingCorpus<'_>, config: ModelConfig) -> Result<Self> {
        Self::train_with_observer(corpus, config, Arc::new(NoopObserver))
    }

    pub fn train_with_observer(
        corpus: TrainingCorpus<'_>,
        config: ModelConfig,
        observer: Arc<dyn ModelObserver>,
    ) -> Result<Self> {
        config.validate()?;
        corpus.validate()?;

        let model = match corpus {
            TrainingCorpus::Spatial { image, mask } => {
                Self::fit_spatial(image, mask, config, observer)?
            }
            TrainingCorpus::Temporal { frames } => Self::fit_temporal(frames, config, observer)?,
        };

        tracing::info!(
            "Trained {} model from {} samples (T_cd={:.4}, T_bl={:.4}, T_bu={:.4})",
            model.mode(),
            model.sample_count,
            model.thresholds.chromaticity,
            model.thresholds.brightness_lower,
            model.thresholds.brightness_upper
        );
        Ok(model)
    }

    /// Train on the mask-selected pixels of a single image.
    pub fn train_spatial(image: &RgbImage, mask: &GrayImage, config: ModelConfig) -> Result<Self> {
        Self::train(TrainingCorpus::Spatial { image, mask }, config)
    }

    /// Train on the pixels inside `regions`, given as rectangles of `image`.
    pub fn train_spatial_regions(
        image: &RgbImage,
        regions: &[Rect],
        config: ModelConfig,
    ) -> Result<Self> {
        let mask = region_mask(image.width(), image.height(), regions)?;
        Self::train_spatial(image, &mask, config)
    }

    /// Train on a sequence of aligned frames of identical size.
    pub fn train_temporal(frames: &[RgbImage], config: ModelConfig) -> Result<Self> {
        Self::train(TrainingCorpus::Temporal { frames }, config)
    }

    fn fit_spatial(
        image: &RgbImage,
        mask: &GrayImage,
        config: ModelConfig,
        observer: Arc<dyn ModelObserver>,
    ) -> Result<Self> {
        let (statistics, samples) = SiteStatistics::spatial(image, mask)?;
        let site = *statistics.site_at(0, 0);
        let (variation, sample_count) = VariationModel::spatial(&samples, &site);

        let degraded = sample_count == 0;
        if degraded {
            tracing::warn!(
                "Training mask selects no pixels, falling back to unit distortion variation"
            );
            observer.on_degraded_model();
        }
        observer.on_statistics(&statistics, &variation);

        // Without selected pixels the thresholds come from the whole image
        let distribution: Vec<NormalizedDistortion> = if degraded {
            normalize_image(&statistics, &variation, image)
        } else {
            let global = variation.at(0, 0);
            samples
                .iter()
                .map(|pixel| global.normalize(distortion(pixel, &site)))
                .collect()
        };

        let thresholds = thresholds_from(config.detection_rate, &distribution)?;
        observer.on_thresholds(&thresholds);

        Ok(Self {
            statistics,
            variation,
            thresholds,
            config,
            sample_count,
            degraded,
            observer,
        })
    }

    fn fit_temporal(
        frames: &[RgbImage],
        config: ModelConfig,
        observer: Arc<dyn ModelObserver>,
    ) -> Result<Self> {
        let statistics = SiteStatistics::temporal(frames)?;
        let variation = VariationModel::temporal(frames, &statistics)?;
        observer.on_statistics(&statistics, &variation);

        let mut distribution = Vec::new();
        for frame in frames {
            distribution.extend(normalize_image(&statistics, &variation, frame));
        }
        let sample_count = distribution.len();

        let thresholds = thresholds_from(config.detection_rate, &distribution)?;
        observer.on_thresholds(&thresholds);

        Ok(Self {
            statistics,
            variation,
            thresholds,
            config,
            sample_count,
            degraded: false,
            observer,
        })
    }

    /// Normalized distortions of every pixel of `image`, row-major.
    pub fn normalized_distortions(&self, image: &RgbImage) -> Result<Vec<NormalizedDistortion>> {
        self.check_dimensions(image)?;
        Ok(normalize_image(&self.statistics, &self.variation, image))
    }

    /// Label every pixel of `image`.
    ///
    /// Spatial models accept any size; temporal models only the training size.
    pub fn classify(&self, image: &RgbImage) -> Result<ClassificationMap> {
        self.check_dimensions(image)?;

        let (width, height) = image.dimensions();
        let mut labels = vec![Label::Highlight; width as usize * height as usize];
        par_rows_mut(&mut labels, width as usize, |y, row| {
            for (x, label) in row.iter_mut().enumerate() {
                let (x, y) = (x as u32, y as u32);
                let d = distortion(image.get_pixel(x, y), self.statistics.site_at(x, y));
                let normalized = self.variation.at(x, y).normalize(d);
                *label = decide(&normalized, &self.thresholds);
            }
        });

        let map = ClassificationMap::from_labels(width, height, labels);
        self.observer.on_classification(&map);
        Ok(map)
    }

    fn check_dimensions(&self, image: &RgbImage) -> Result<()> {
        match self.statistics.dimensions() {
            Some(expected) => ensure_same_size(expected, image.dimensions()),
            None => Ok(()),
        }
    }

    pub fn mode(&self) -> TrainingMode {
        match self.statistics {
            SiteStatistics::Spatial(_) => TrainingMode::Spatial,
            SiteStatistics::Temporal { .. } => TrainingMode::Temporal,
        }
    }

    /// True when training found no samples and unit variations were used.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    pub fn statistics(&self) -> &SiteStatistics {
        &self.statistics
    }

    pub fn variation(&self) -> &VariationModel {
        &self.variation
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn summary(&self) -> ModelSummary {
        let (mean, stddev, variation) = match (&self.statistics, &self.variation) {
            (SiteStatistics::Spatial(site), VariationModel::Global(v)) => {
                (Some(site.mean), Some(site.stddev), Some(*v))
            }
            _ => (None, None, None),
        };
        ModelSummary {
            mode: self.mode(),
            detection_rate: self.config.detection_rate,
            sample_count: self.sample_count,
            degraded: self.degraded,
            thresholds: self.thresholds,
            dimensions: self.statistics.dimensions(),
            mean,
            stddev,
            variation,
        }
    }
}

fn normalize_image(
    statistics: &SiteStatistics,
    variation: &VariationModel,
    image: &RgbImage,
) -> Vec<NormalizedDistortion> {
    let (width, height) = image.dimensions();
    let zero = NormalizedDistortion {
        brightness: 0.0,
        chromaticity: 0.0,
    };
    let mut out = vec![zero; width as usize * height as usize];
    par_rows_mut(&mut out, width as usize, |y, row| {
        for (x, value) in row.iter_mut().enumerate() {
            let (x, y) = (x as u32, y as u32);
            let pixel: &Rgb<u8> = image.get_pixel(x, y);
            *value = variation
                .at(x, y)
                .normalize(distortion(pixel, statistics.site_at(x, y)));
        }
    });
    out
}

fn thresholds_from(
    detection_rate: f64,
    distribution: &[NormalizedDistortion],
) -> Result<ThresholdSet> {
    let brightness: Vec<f64> = distribution.iter().map(|d| d.brightness).collect();
    let chromaticity: Vec<f64> = distribution.iter().map(|d| d.chromaticity).collect();
    select_thresholds(detection_rate, &brightness, &chromaticity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_statistics::SiteStats;
    use image::Luma;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Mutex;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    fn full_mask(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    fn config(rate: f64) -> ModelConfig {
        ModelConfig::with_detection_rate(rate)
    }

    fn noisy_gray(width: u32, height: u32, seed: u64) -> RgbImage {
        let mut rng = StdRng::seed_from_u64(seed);
        RgbImage::from_fn(width, height, |_, _| {
            let mut channel = || (128 + rng.gen_range(-12i32..=12)) as u8;
            Rgb([channel(), channel(), channel()])
        })
    }

    fn all_labels(map: &ClassificationMap, label: Label) -> bool {
        map.labels().iter().all(|l| *l == label)
    }

    #[test]
    fn test_config_default_and_validation() {
        assert_eq!(ModelConfig::default().detection_rate, 0.95);
        assert!(ModelConfig::default().validate().is_ok());
        for rate in [0.0, 1.0, -0.2, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                config(rate).validate(),
                Err(LambertainError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_uniform_gray_scenario() {
        let gray = solid(8, 8, [128, 128, 128]);
        let model = ColorModel::train_spatial(&gray, &full_mask(8, 8), config(0.9)).unwrap();

        let site = model.statistics().site_at(0, 0);
        assert_eq!(site.mean, [128.0, 128.0, 128.0]);
        assert_eq!(site.stddev, [1.0, 1.0, 1.0]);
        assert_eq!(*model.variation().at(3, 3), Variation::UNIT);
        assert!(!model.is_degraded());
        assert_eq!(model.sample_count(), 64);

        let classify = |color| model.classify(&solid(8, 8, color)).unwrap();
        assert!(all_labels(&classify([128, 128, 128]), Label::Background));
        assert!(all_labels(&classify([0, 0, 0]), Label::Shadow));
        assert!(all_labels(&classify([255, 255, 255]), Label::Highlight));
        assert!(all_labels(&classify([0, 255, 0]), Label::Foreground));
    }

    #[test]
    fn test_uniform_gray_sweep() {
        let gray = solid(8, 8, [128, 128, 128]);
        let model = ColorModel::train_spatial(&gray, &full_mask(8, 8), config(0.9)).unwrap();
        assert_eq!(model.thresholds().chromaticity, 0.0);

        for v in 0..=255u8 {
            let label = model.classify(&solid(1, 1, [v, v, v])).unwrap().get(0, 0);
            let expected = match v {
                0..=127 => Label::Shadow,
                128 => Label::Background,
                _ => Label::Highlight,
            };
            assert_eq!(label, expected, "gray level {}", v);
        }
    }

    #[test]
    fn test_temporal_uniform_frames_at_any_level() {
        for v in [17u8, 60, 99, 201] {
            let frames = vec![solid(3, 3, [v, v, v]); 4];
            let model = ColorModel::train_temporal(&frames, config(0.9)).unwrap();
            assert!(model.variation().sites().iter().all(|s| *s == Variation::UNIT));

            let map = model.classify(&frames[0]).unwrap();
            assert!(all_labels(&map, Label::Background), "gray level {}", v);
        }
    }

    #[test]
    fn test_spatial_model_classifies_any_size() {
        let gray = solid(4, 4, [128, 128, 128]);
        let model = ColorModel::train_spatial(&gray, &full_mask(4, 4), config(0.9)).unwrap();

        let map = model.classify(&solid(10, 3, [128, 128, 128])).unwrap();
        assert_eq!(map.dimensions(), (10, 3));
        assert!(all_labels(&map, Label::Background));

        let empty = model.classify(&RgbImage::new(0, 0)).unwrap();
        assert!(empty.labels().is_empty());
    }

    #[test]
    fn test_regions_select_training_pixels() {
        let mut image = solid(12, 12, [0, 255, 0]);
        for y in 2..6 {
            for x in 3..9 {
                image.put_pixel(x, y, Rgb([128, 128, 128]));
            }
        }
        let region = Rect::at(3, 2).of_size(6, 4);
        let model = ColorModel::train_spatial_regions(&image, &[region], config(0.9)).unwrap();

        assert_eq!(model.sample_count(), 24);
        let map = model.classify(&image).unwrap();
        assert_eq!(map.get(4, 3), Label::Background);
        assert_eq!(map.get(0, 0), Label::Foreground);
        assert_eq!(map.counts().background, 24);
    }

    #[test]
    fn test_region_outside_image_rejected() {
        let image = solid(5, 5, [10, 10, 10]);
        let region = Rect::at(3, 3).of_size(4, 4);
        assert!(matches!(
            ColorModel::train_spatial_regions(&image, &[region], config(0.9)),
            Err(LambertainError::Configuration(_))
        ));
    }

    #[test]
    fn test_temporal_scenario() {
        let mut frames = vec![solid(5, 4, [128, 128, 128]); 3];
        frames[0].put_pixel(2, 1, Rgb([100, 100, 100]));
        frames[1].put_pixel(2, 1, Rgb([150, 150, 150]));
        frames[2].put_pixel(2, 1, Rgb([100, 100, 100]));

        let model = ColorModel::train_temporal(&frames, config(0.9)).unwrap();
        assert_eq!(model.mode(), TrainingMode::Temporal);
        assert_eq!(model.sample_count(), 60);

        let statistics = model.statistics();
        assert!(statistics.stddev_at(2, 1).iter().all(|s| *s > 1.0));
        assert_eq!(statistics.stddev_at(0, 0), [1.0, 1.0, 1.0]);
        assert_eq!(statistics.stddev_at(4, 3), [1.0, 1.0, 1.0]);

        let map = model.classify(&frames[0]).unwrap();
        for y in 0..4 {
            for x in 0..5 {
                if (x, y) != (2, 1) {
                    assert_eq!(map.get(x, y), Label::Background);
                }
            }
        }
    }

    #[test]
    fn test_temporal_size_mismatch() {
        let frames = vec![solid(4, 4, [50, 60, 70]); 2];
        let model = ColorModel::train_temporal(&frames, config(0.9)).unwrap();
        assert_eq!(
            model.classify(&solid(5, 4, [50, 60, 70])).unwrap_err(),
            LambertainError::dimension_mismatch((4, 4), (5, 4))
        );
        assert!(model.normalized_distortions(&solid(4, 5, [0, 0, 0])).is_err());
    }

    #[test]
    fn test_invalid_corpus() {
        assert!(matches!(
            ColorModel::train_temporal(&[], config(0.9)),
            Err(LambertainError::Configuration(_))
        ));

        let frames = vec![solid(4, 4, [1, 1, 1]), solid(3, 4, [1, 1, 1])];
        assert_eq!(
            ColorModel::train_temporal(&frames, config(0.9)).unwrap_err(),
            LambertainError::dimension_mismatch((4, 4), (3, 4))
        );

        let image = solid(4, 4, [1, 1, 1]);
        assert_eq!(
            ColorModel::train_spatial(&image, &full_mask(4, 3), config(0.9)).unwrap_err(),
            LambertainError::dimension_mismatch((4, 4), (4, 3))
        );

        assert!(matches!(
            ColorModel::train_spatial(&RgbImage::new(0, 0), &GrayImage::new(0, 0), config(0.9)),
            Err(LambertainError::Configuration(_))
        ));

        assert!(matches!(
            ColorModel::train_spatial(&image, &full_mask(4, 4), config(1.0)),
            Err(LambertainError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_mask_degrades() {
        let image = solid(6, 6, [128, 128, 128]);
        let model = ColorModel::train_spatial(&image, &GrayImage::new(6, 6), config(0.9)).unwrap();

        assert!(model.is_degraded());
        assert_eq!(model.sample_count(), 0);
        assert_eq!(*model.variation().at(0, 0), Variation::UNIT);
        assert_eq!(*model.statistics().site_at(0, 0), SiteStats::empty());

        let map = model.classify(&image).unwrap();
        assert_eq!(map.counts().total(), 36);
        assert!(model.summary().degraded);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let training = noisy_gray(64, 64, 7);
        let model = ColorModel::train_spatial(&training, &full_mask(64, 64), config(0.95)).unwrap();

        let test = noisy_gray(64, 64, 11);
        let first = model.classify(&test).unwrap();
        let second = model.classify(&test).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_noisy_background_detection_rate() {
        let training = noisy_gray(64, 64, 42);
        let model = ColorModel::train_spatial(&training, &full_mask(64, 64), config(0.95)).unwrap();

        let map = model.classify(&training).unwrap();
        let counts = map.counts();
        // At most 5% of the training samples exceed the chromaticity threshold
        assert!(counts.foreground * 100 <= counts.total() * 5);

        let mut test = training.clone();
        for y in 10..20 {
            for x in 10..20 {
                test.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }
        let map = model.classify(&test).unwrap();
        for y in 10..20 {
            for x in 10..20 {
                assert_eq!(map.get(x, y), Label::Foreground);
            }
        }
    }

    #[test]
    fn test_foreground_is_monotonic_in_chromaticity() {
        let training = noisy_gray(48, 48, 3);
        let model = ColorModel::train_spatial(&training, &full_mask(48, 48), config(0.95)).unwrap();

        let mut seen_foreground = false;
        for k in 0..=127u8 {
            let pixel = solid(1, 1, [128, 128 + k, 128]);
            let label = model.classify(&pixel).unwrap().get(0, 0);
            if seen_foreground {
                assert_eq!(label, Label::Foreground, "reverted at offset {}", k);
            }
            seen_foreground |= label == Label::Foreground;
        }
        assert!(seen_foreground);
    }

    #[test]
    fn test_large_image_parallel_matches_small_tiles() {
        let training = noisy_gray(32, 32, 5);
        let model = ColorModel::train_spatial(&training, &full_mask(32, 32), config(0.9)).unwrap();

        let big = noisy_gray(256, 80, 9);
        let map = model.classify(&big).unwrap();
        for y in (0..80).step_by(13) {
            for x in (0..256).step_by(17) {
                let tile = solid(1, 1, big.get_pixel(x, y).0);
                assert_eq!(model.classify(&tile).unwrap().get(0, 0), map.get(x, y));
            }
        }
    }

    #[test]
    fn test_observer_receives_events() {
        #[derive(Default)]
        struct Recorder {
            events: Mutex<Vec<String>>,
        }

        impl ModelObserver for Recorder {
            fn on_statistics(&self, _: &SiteStatistics, _: &VariationModel) {
                self.events.lock().unwrap().push("statistics".into());
            }
            fn on_degraded_model(&self) {
                self.events.lock().unwrap().push("degraded".into());
            }
            fn on_thresholds(&self, _: &ThresholdSet) {
                self.events.lock().unwrap().push("thresholds".into());
            }
            fn on_classification(&self, map: &ClassificationMap) {
                self.events
                    .lock()
                    .unwrap()
                    .push(format!("classified {}", map.labels().len()));
            }
        }

        let recorder = Arc::new(Recorder::default());
        let image = solid(3, 3, [128, 128, 128]);
        let model = ColorModel::train_with_observer(
            TrainingCorpus::Spatial {
                image: &image,
                mask: &GrayImage::new(3, 3),
            },
            config(0.9),
            recorder.clone(),
        )
        .unwrap();
        model.classify(&image).unwrap();

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["degraded", "statistics", "thresholds", "classified 9"]
        );
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColorModel>();

        let gray = solid(4, 4, [128, 128, 128]);
        let model =
            Arc::new(ColorModel::train_spatial(&gray, &full_mask(4, 4), config(0.9)).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let model = Arc::clone(&model);
                std::thread::spawn(move || model.classify(&solid(4, 4, [0, 0, 0])).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(all_labels(&handle.join().unwrap(), Label::Shadow));
        }
    }

    #[test]
    fn test_summary() {
        let gray = solid(4, 4, [128, 128, 128]);
        let model = ColorModel::train_spatial(&gray, &full_mask(4, 4), config(0.9)).unwrap();
        let summary = model.summary();
        assert_eq!(summary.mode, TrainingMode::Spatial);
        assert_eq!(summary.sample_count, 16);
        assert_eq!(summary.dimensions, None);
        assert_eq!(summary.mean, Some([128.0, 128.0, 128.0]));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mode"], "spatial");
        assert_eq!(json["thresholds"]["chromaticity"], 0.0);
        assert!(json.get("dimensions").is_none());
    }
}

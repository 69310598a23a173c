use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;

use crate::error::{ensure_same_size, LambertainError, Result};
use crate::parallel::par_rows_mut;

/// One value per color channel, in the channel order of the input images.
pub type Triple = [f64; 3];

/// Trained statistics of a single site (the whole image, or one pixel position).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SiteStats {
    pub mean: Triple,
    /// Population standard deviation, zero channels clamped to 1
    pub stddev: Triple,
    /// Σ (mean_c / stddev_c)², clamped to 1 when zero
    pub brightness_denominator: f64,
    /// mean_c / (denominator · stddev_c²), the per-channel factor of the brightness distortion
    pub brightness_weight: Triple,
}

impl SiteStats {
    /// Build site statistics from raw channel moments.
    pub fn from_moments(mean: Triple, stddev: Triple) -> Self {
        let stddev = stddev.map(|s| if s == 0.0 { 1.0 } else { s });
        let brightness_denominator = brightness_denominator(&mean, &stddev);
        let brightness_weight: Triple = std::array::from_fn(|c| {
            mean[c] / (brightness_denominator * stddev[c] * stddev[c])
        });

        Self {
            mean,
            stddev,
            brightness_denominator,
            brightness_weight,
        }
    }

    /// Mean and population deviation of a sample set, `None` if it is empty.
    pub fn from_samples(samples: &[Rgb<u8>]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let count = samples.len() as f64;

        let mut sum = [0.0f64; 3];
        for pixel in samples {
            for c in 0..3 {
                sum[c] += pixel.0[c] as f64;
            }
        }
        let mean = sum.map(|s| s / count);

        // Second pass keeps constant channels at exactly zero variance
        let mut squared = [0.0f64; 3];
        for pixel in samples {
            for c in 0..3 {
                let delta = pixel.0[c] as f64 - mean[c];
                squared[c] += delta * delta;
            }
        }
        let stddev = squared.map(|s| (s / count).sqrt());

        Some(Self::from_moments(mean, stddev))
    }

    /// Statistics of an empty sample set: zero mean, unit deviation.
    pub fn empty() -> Self {
        Self::from_moments([0.0; 3], [0.0; 3])
    }
}

/// Brightness denominator of Horprasert et al. (1999), Eq. 5.
pub fn brightness_denominator(mean: &Triple, stddev: &Triple) -> f64 {
    let denom: f64 = (0..3).map(|c| (mean[c] / stddev[c]).powi(2)).sum();
    if denom == 0.0 {
        1.0
    } else {
        denom
    }
}

/// Whether a mask value selects its pixel for training.
pub fn is_selected(mask_value: &Luma<u8>) -> bool {
    mask_value.0[0] != 0
}

/// Pixels of `image` selected by `mask`, in row-major order.
pub fn selected_pixels(image: &RgbImage, mask: &GrayImage) -> Result<Vec<Rgb<u8>>> {
    ensure_same_size(image.dimensions(), mask.dimensions())?;
    Ok(image
        .pixels()
        .zip(mask.pixels())
        .filter(|(_, m)| is_selected(m))
        .map(|(p, _)| *p)
        .collect())
}

/// Common size of a non-empty frame sequence.
pub fn frame_dimensions(frames: &[RgbImage]) -> Result<(u32, u32)> {
    let first = frames
        .first()
        .ok_or_else(|| LambertainError::configuration("no training images"))?;
    let dimensions = first.dimensions();
    if dimensions.0 == 0 || dimensions.1 == 0 {
        return Err(LambertainError::configuration(format!(
            "training image is empty ({}x{})",
            dimensions.0, dimensions.1
        )));
    }
    for frame in &frames[1..] {
        ensure_same_size(dimensions, frame.dimensions())?;
    }
    Ok(dimensions)
}

/// Site statistics of a trained model.
///
/// Spatial models hold one site that applies to every pixel of any image;
/// temporal models hold one site per pixel position of the training frames.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteStatistics {
    Spatial(SiteStats),
    Temporal {
        width: u32,
        height: u32,
        sites: Vec<SiteStats>,
    },
}

impl SiteStatistics {
    /// Statistics over the mask-selected pixels of one image.
    ///
    /// Returns the statistics together with the selected pixels.
    /// An empty selection yields `SiteStats::empty()`.
    pub fn spatial(image: &RgbImage, mask: &GrayImage) -> Result<(Self, Vec<Rgb<u8>>)> {
        let samples = selected_pixels(image, mask)?;
        let stats = SiteStats::from_samples(&samples).unwrap_or_else(SiteStats::empty);
        Ok((SiteStatistics::Spatial(stats), samples))
    }

    /// Per-position statistics across a stack of aligned frames.
    pub fn temporal(frames: &[RgbImage]) -> Result<Self> {
        let (width, height) = frame_dimensions(frames)?;
        let mut sites = vec![SiteStats::default(); width as usize * height as usize];

        par_rows_mut(&mut sites, width as usize, |y, row| {
            let mut samples = Vec::with_capacity(frames.len());
            for (x, site) in row.iter_mut().enumerate() {
                samples.clear();
                samples.extend(frames.iter().map(|f| *f.get_pixel(x as u32, y as u32)));
                *site = SiteStats::from_samples(&samples).unwrap_or_else(SiteStats::empty);
            }
        });

        Ok(SiteStatistics::Temporal {
            width,
            height,
            sites,
        })
    }

    /// Statistics applicable to pixel (x, y).
    ///
    /// Temporal statistics require (x, y) inside the training frame size.
    pub fn site_at(&self, x: u32, y: u32) -> &SiteStats {
        match self {
            SiteStatistics::Spatial(stats) => stats,
            SiteStatistics::Temporal {
                width,
                height,
                sites,
            } => {
                debug_assert!(
                    x < *width && y < *height,
                    "site ({}, {}) outside {}x{}",
                    x,
                    y,
                    width,
                    height
                );
                &sites[y as usize * *width as usize + x as usize]
            }
        }
    }

    pub fn mean_at(&self, x: u32, y: u32) -> Triple {
        self.site_at(x, y).mean
    }

    pub fn stddev_at(&self, x: u32, y: u32) -> Triple {
        self.site_at(x, y).stddev
    }

    pub fn brightness_weight_at(&self, x: u32, y: u32) -> Triple {
        self.site_at(x, y).brightness_weight
    }

    /// Size every classified image must have, `None` for spatial statistics.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            SiteStatistics::Spatial(_) => None,
            SiteStatistics::Temporal { width, height, .. } => Some((*width, *height)),
        }
    }

    pub fn sites(&self) -> &[SiteStats] {
        match self {
            SiteStatistics::Spatial(stats) => std::slice::from_ref(stats),
            SiteStatistics::Temporal { sites, .. } => sites,
        }
    }
}

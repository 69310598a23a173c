use image::{Rgb, RgbImage};
use serde::Serialize;

use crate::distortion::{distortion, DistortionPair, NormalizedDistortion};
use crate::error::Result;
use crate::parallel::par_rows_mut;
use crate::site_statistics::{frame_dimensions, SiteStatistics, SiteStats};

/// Root-mean-square distortion spread used to normalize distortions.
/// See Horprasert et al., 1999, Eqs. 7 and 8
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variation {
    /// RMS of (α - 1)
    pub brightness: f64,
    /// RMS of CD
    pub chromaticity: f64,
}

impl Variation {
    /// Variation used when there are no training samples.
    pub const UNIT: Variation = Variation {
        brightness: 1.0,
        chromaticity: 1.0,
    };

    pub fn normalize(&self, d: DistortionPair) -> NormalizedDistortion {
        NormalizedDistortion {
            brightness: (d.brightness - 1.0) / self.brightness,
            chromaticity: d.chromaticity / self.chromaticity,
        }
    }
}

fn clamp_variation(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Running sums of squared distortions for one site.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariationAccumulator {
    brightness_sum: f64,
    chromaticity_sum: f64,
    count: usize,
}

impl VariationAccumulator {
    pub fn push(&mut self, d: DistortionPair) {
        self.brightness_sum += (d.brightness - 1.0) * (d.brightness - 1.0);
        self.chromaticity_sum += d.chromaticity * d.chromaticity;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// RMS variations; `Variation::UNIT` without samples, zero results clamped to 1.
    pub fn finish(&self) -> Variation {
        if self.count == 0 {
            return Variation::UNIT;
        }
        let n = self.count as f64;
        Variation {
            brightness: clamp_variation((self.brightness_sum / n).sqrt()),
            chromaticity: clamp_variation((self.chromaticity_sum / n).sqrt()),
        }
    }
}

/// Distortion variation of a trained model: one global value or one per site.
#[derive(Debug, Clone, PartialEq)]
pub enum VariationModel {
    Global(Variation),
    PerSite {
        width: u32,
        height: u32,
        sites: Vec<Variation>,
    },
}

impl VariationModel {
    /// Global variation over the training samples of a spatial model.
    ///
    /// The sum is accumulated sequentially so the result does not depend on
    /// thread scheduling.
    pub fn spatial(samples: &[Rgb<u8>], site: &SiteStats) -> (Self, usize) {
        let mut accumulator = VariationAccumulator::default();
        for pixel in samples {
            accumulator.push(distortion(pixel, site));
        }
        (VariationModel::Global(accumulator.finish()), accumulator.count())
    }

    /// Per-position variation across all training frames.
    pub fn temporal(frames: &[RgbImage], statistics: &SiteStatistics) -> Result<Self> {
        let (width, height) = frame_dimensions(frames)?;
        let mut sites = vec![Variation::UNIT; width as usize * height as usize];

        par_rows_mut(&mut sites, width as usize, |y, row| {
            for (x, variation) in row.iter_mut().enumerate() {
                let (x, y) = (x as u32, y as u32);
                let site = statistics.site_at(x, y);
                let mut accumulator = VariationAccumulator::default();
                for frame in frames {
                    accumulator.push(distortion(frame.get_pixel(x, y), site));
                }
                *variation = accumulator.finish();
            }
        });

        Ok(VariationModel::PerSite {
            width,
            height,
            sites,
        })
    }

    /// Variation applicable to pixel (x, y).
    ///
    /// Per-site variation requires (x, y) inside the training frame size.
    pub fn at(&self, x: u32, y: u32) -> &Variation {
        match self {
            VariationModel::Global(variation) => variation,
            VariationModel::PerSite {
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

    pub fn sites(&self) -> &[Variation] {
        match self {
            VariationModel::Global(variation) => std::slice::from_ref(variation),
            VariationModel::PerSite { sites, .. } => sites,
        }
    }
}

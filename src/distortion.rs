/// Brightness and chromaticity distortion of a pixel against its site statistics
/// See Horprasert et al., 1999, Eqs. 5 and 6
use image::Rgb;
use serde::Serialize;

use crate::site_statistics::SiteStats;

/// Raw distortions of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistortionPair {
    /// α: 1 for a brightness match, above 1 brighter, below 1 darker
    pub brightness: f64,
    /// CD: distance from the brightness-scaled expected color, 0 for a match
    pub chromaticity: f64,
}

/// Distortions divided by the trained distortion variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedDistortion {
    /// (α - 1) / brightness variation, centered on 0
    pub brightness: f64,
    /// CD / chromaticity variation
    pub chromaticity: f64,
}

/// Distortions closer than this to a perfect match are treated as exact.
///
/// Floating-point rounding leaves residues around 1e-14 on brightness-scaled
/// colors, which zero thresholds from uniform training data would pick up.
pub const DISTORTION_EPSILON: f64 = 1e-9;

pub fn brightness_distortion(pixel: &Rgb<u8>, site: &SiteStats) -> f64 {
    let [r, g, b] = pixel.0;
    let weight = &site.brightness_weight;
    r as f64 * weight[0] + g as f64 * weight[1] + b as f64 * weight[2]
}

pub fn chromaticity_distortion(pixel: &Rgb<u8>, site: &SiteStats, brightness: f64) -> f64 {
    // stddev is never zero: clamped in SiteStats::from_moments
    let sum: f64 = (0..3)
        .map(|c| {
            let delta = (pixel.0[c] as f64 - brightness * site.mean[c]) / site.stddev[c];
            delta * delta
        })
        .sum();
    sum.sqrt()
}

/// Both distortions of `pixel`, with near-exact matches snapped to α = 1 and CD = 0.
pub fn distortion(pixel: &Rgb<u8>, site: &SiteStats) -> DistortionPair {
    let brightness = brightness_distortion(pixel, site);
    let chromaticity = chromaticity_distortion(pixel, site, brightness);
    DistortionPair {
        brightness: if (brightness - 1.0).abs() < DISTORTION_EPSILON {
            1.0
        } else {
            brightness
        },
        chromaticity: if chromaticity < DISTORTION_EPSILON {
            0.0
        } else {
            chromaticity
        },
    }
}

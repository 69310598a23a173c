use serde::Serialize;

use crate::error::{LambertainError, Result};

/// Values read at the lower and upper percentile ranks of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileBand {
    pub lower: f64,
    pub upper: f64,
}

/// Decision thresholds of a trained model.
/// See Horprasert et al., 1999, Section 4.3
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSet {
    /// T_cd: normalized chromaticity distortion above which a pixel is foreground
    pub chromaticity: f64,
    /// T_bl: lower bound of the background brightness band
    pub brightness_lower: f64,
    /// T_bu: upper bound of the background brightness band
    pub brightness_upper: f64,
}

/// Ranks `⌊(1 - rate)·len⌋` and `⌊rate·len⌋`, clamped to `[0, len - 1]`.
pub fn percentile_ranks(len: usize, rate: f64) -> (usize, usize) {
    let last = len.saturating_sub(1);
    // `as usize` truncates toward zero and saturates negative values at 0
    let lower = ((1.0 - rate) * len as f64) as usize;
    let upper = (rate * len as f64) as usize;
    (lower.min(last), upper.min(last))
}

/// Sort a copy of `values` and read it at the percentile ranks of `rate`.
pub fn select_percentiles(values: &[f64], rate: f64) -> Result<PercentileBand> {
    if values.is_empty() {
        return Err(LambertainError::configuration(
            "cannot select thresholds from an empty distortion distribution",
        ));
    }
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(LambertainError::configuration(format!(
            "detection rate must lie in [0, 1], got {}",
            rate
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let (lower, upper) = percentile_ranks(sorted.len(), rate);
    tracing::debug!(
        "size: {} | index_left: {} index_right: {} {} {}",
        sorted.len(),
        lower,
        upper,
        sorted[lower],
        sorted[upper]
    );

    Ok(PercentileBand {
        lower: sorted[lower],
        upper: sorted[upper],
    })
}

/// Thresholds from the normalized training distributions.
///
/// Only the upper rank of the chromaticity distribution is used; both ranks of
/// the brightness distribution bound the background band.
pub fn select_thresholds(
    detection_rate: f64,
    brightness_norm: &[f64],
    chromaticity_norm: &[f64],
) -> Result<ThresholdSet> {
    let chromaticity = select_percentiles(chromaticity_norm, detection_rate)?;
    let brightness = select_percentiles(brightness_norm, detection_rate)?;

    Ok(ThresholdSet {
        chromaticity: chromaticity.upper,
        brightness_lower: brightness.lower,
        brightness_upper: brightness.upper,
    })
}

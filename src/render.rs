use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::classifier::{ClassificationMap, Label};
use crate::error::{LambertainError, Result};

pub const FOREGROUND_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const SHADOW_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const HIGHLIGHT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Color used to outline training regions
pub const REGION_OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

pub const LEGEND: &str = "Blue: foreground, Green: background, Red: shadow, Black: highlight";

pub fn label_color(label: Label) -> Rgb<u8> {
    match label {
        Label::Foreground => FOREGROUND_COLOR,
        Label::Background => BACKGROUND_COLOR,
        Label::Shadow => SHADOW_COLOR,
        Label::Highlight => HIGHLIGHT_COLOR,
    }
}

/// Render a classification map with one palette color per label.
pub fn classification_to_image(map: &ClassificationMap) -> RgbImage {
    RgbImage::from_fn(map.width(), map.height(), |x, y| label_color(map.get(x, y)))
}

fn check_region(width: u32, height: u32, region: &Rect) -> Result<()> {
    let inside = region.left() >= 0
        && region.top() >= 0
        && (region.right() as i64) < width as i64
        && (region.bottom() as i64) < height as i64;
    if !inside {
        return Err(LambertainError::configuration(format!(
            "region {}x{} at ({}, {}) lies outside the {}x{} image",
            region.width(),
            region.height(),
            region.left(),
            region.top(),
            width,
            height
        )));
    }
    Ok(())
}

/// Training mask selecting every pixel inside `regions`.
///
/// Regions may overlap; each must lie completely inside the image.
pub fn region_mask(width: u32, height: u32, regions: &[Rect]) -> Result<GrayImage> {
    let mut mask = GrayImage::new(width, height);
    for region in regions {
        check_region(width, height, region)?;
        draw_filled_rect_mut(&mut mask, *region, Luma([255u8]));
    }
    Ok(mask)
}

/// Copy of `image` with the border of each region drawn in `REGION_OUTLINE_COLOR`.
pub fn outline_regions(image: &RgbImage, regions: &[Rect]) -> RgbImage {
    let mut out = image.clone();
    for region in regions {
        draw_hollow_rect_mut(&mut out, *region, REGION_OUTLINE_COLOR);
    }
    out
}

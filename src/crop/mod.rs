//! # Crop Calculator
//!
//! Turns a crop rectangle given in percentages of the *displayed* image, plus a scale
//! factor, into pixel rectangles on the source image, then copies that region into a new
//! JPEG.
//!
//! ```text
//! src_x      = x% / 100 * source_width * scale        (same for y, width, height)
//! dest_width = round(width% / 100 * source_width * scale)
//! ```
//!
//! The source region is copied onto the destination at the origin with no resampling. Nothing
//! is clamped: samples that fall outside the source come out transparent, which encodes as
//! black.

pub mod raster;

pub use raster::{crop_bytes, crop_image, render, CroppedImage, JPEG_QUALITY};

use thiserror::Error;

/// Errors raised while cropping.
#[derive(Debug, Error)]
pub enum CropError {
    /// The crop would produce an image with no pixels.
    #[error("crop region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    /// A coordinate or size is NaN or infinite.
    #[error("crop geometry is not finite: {0:?}")]
    NonFinite(CropRect),

    /// The output would exceed the largest JPEG side.
    #[error("crop region {width}x{height} exceeds {max}px", max = CropPlan::MAX_DIMENSION)]
    TooLarge { width: f64, height: f64 },

    /// The zoom factor is outside the accepted range.
    #[error("scale {0} is outside [{min}, {max}]", min = CropScale::MIN, max = CropScale::MAX)]
    ScaleOutOfRange(f64),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Selection in percentages of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for CropRect {
    /// The whole image.
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// Zoom multiplier in `[0.5, 2.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropScale(f64);

impl CropScale {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;

    pub fn new(value: f64) -> Result<Self, CropError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CropError::ScaleOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for CropScale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Pixel-space geometry of a crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    pub src_x: f64,
    pub src_y: f64,
    pub src_width: f64,
    pub src_height: f64,
    pub dest_width: u32,
    pub dest_height: u32,
}

impl CropPlan {
    /// Largest output side a baseline JPEG can encode.
    pub const MAX_DIMENSION: u32 = 65_535;

    /// Computes the plan for a source of `source_width` x `source_height` natural pixels.
    ///
    /// Fails before any pixel is touched when the region is empty, not finite, or wider or
    /// taller than [`Self::MAX_DIMENSION`].
    pub fn compute(
        rect: CropRect,
        scale: CropScale,
        source_width: u32,
        source_height: u32,
    ) -> Result<Self, CropError> {
        let scale = scale.get();
        let along_x = |pct: f64| pct / 100.0 * f64::from(source_width) * scale;
        let along_y = |pct: f64| pct / 100.0 * f64::from(source_height) * scale;

        let (src_x, src_y) = (along_x(rect.x), along_y(rect.y));
        let src_width = along_x(rect.width);
        let src_height = along_y(rect.height);
        if ![src_x, src_y, src_width, src_height].iter().all(|v| v.is_finite()) {
            return Err(CropError::NonFinite(rect));
        }

        let limit = f64::from(Self::MAX_DIMENSION);
        if src_width.round() > limit || src_height.round() > limit {
            return Err(CropError::TooLarge {
                width: src_width,
                height: src_height,
            });
        }

        let dest_width = src_width.round().max(0.0) as u32;
        let dest_height = src_height.round().max(0.0) as u32;
        if dest_width == 0 || dest_height == 0 {
            return Err(CropError::EmptyRegion {
                width: dest_width,
                height: dest_height,
            });
        }

        Ok(Self {
            src_x,
            src_y,
            src_width,
            src_height,
            dest_width,
            dest_height,
        })
    }
}

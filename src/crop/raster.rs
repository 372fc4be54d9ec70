use crate::crop::{CropError, CropPlan, CropRect, CropScale};
use crate::framework::PhotoUpload;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, Rgba, RgbaImage};
use tracing::debug;

/// Encoder quality for cropped output.
pub const JPEG_QUALITY: u8 = 90;

/// An encoded crop.
#[derive(Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CroppedImage {
    /// The crop as a photo upload named `cropped-image.jpg`.
    pub fn into_upload(self) -> PhotoUpload {
        PhotoUpload::jpeg(self.bytes)
    }
}

impl std::fmt::Debug for CroppedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CroppedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Copies the planned region onto a fresh canvas at the origin.
///
/// Destination pixel `(dx, dy)` takes the source pixel at
/// `(floor(src_x + dx), floor(src_y + dy))`, or transparent black when that lies outside the
/// source.
pub fn render(source: &DynamicImage, plan: &CropPlan) -> RgbaImage {
    let (width, height) = source.dimensions();
    let origin_x = plan.src_x.floor() as i64;
    let origin_y = plan.src_y.floor() as i64;

    RgbaImage::from_fn(plan.dest_width, plan.dest_height, |dx, dy| {
        let sx = origin_x + i64::from(dx);
        let sy = origin_y + i64::from(dy);
        if sx < 0 || sy < 0 || sx >= i64::from(width) || sy >= i64::from(height) {
            Rgba([0, 0, 0, 0])
        } else {
            source.get_pixel(sx as u32, sy as u32)
        }
    })
}

/// Crops a decoded image and encodes the result as JPEG.
pub fn crop_image(
    source: &DynamicImage,
    rect: CropRect,
    scale: CropScale,
) -> Result<CroppedImage, CropError> {
    let plan = CropPlan::compute(rect, scale, source.width(), source.height())?;
    debug!(?rect, scale = scale.get(), ?plan, "Cropping");

    let canvas = DynamicImage::ImageRgba8(render(source, &plan)).to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode(
        canvas.as_raw(),
        plan.dest_width,
        plan.dest_height,
        ExtendedColorType::Rgb8,
    )?;

    Ok(CroppedImage {
        bytes,
        width: plan.dest_width,
        height: plan.dest_height,
    })
}

/// Decodes `encoded` (JPEG or PNG) and crops it.
pub fn crop_bytes(
    encoded: &[u8],
    rect: CropRect,
    scale: CropScale,
) -> Result<CroppedImage, CropError> {
    let source = image::load_from_memory(encoded)?;
    crop_image(&source, rect, scale)
}

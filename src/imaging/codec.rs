use eframe::egui::ColorImage;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::ViewerError;

/// Frame side limit used until the graphics backend reports its own
/// `max_texture_side`. Matches egui's fallback.
pub const DEFAULT_MAX_FRAME_SIDE: u32 = 2048;

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode raw bytes (JPEG or PNG) into a pixel image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ViewerError> {
    Ok(image::load_from_memory(bytes)?)
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

/// Frame dimensions for `width` × `height` shown at `zoom`.
///
/// Each side is `round(side * zoom)`, at least one pixel. When the longest
/// side would exceed `max_side` the zoom is reduced so the aspect ratio is
/// kept.
pub fn scaled_dimensions(width: u32, height: u32, zoom: f64, max_side: u32) -> (u32, u32) {
    let longest = width.max(height).max(1) as f64;
    let zoom = zoom.min(max_side as f64 / longest);
    let scale = |side: u32| (side as f64 * zoom).round().max(1.0) as u32;
    (scale(width), scale(height))
}

/// Whether `zoom` asks for a frame larger than `max_side` allows.
pub fn exceeds_limit(width: u32, height: u32, zoom: f64, max_side: u32) -> bool {
    (width.max(height) as f64 * zoom).round() > max_side as f64
}

/// Resample to exactly `width` × `height` with a Lanczos filter.
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Render `base` at `zoom`, always resampling from the full-resolution image.
pub fn render(base: &DynamicImage, zoom: f64, max_side: u32) -> ColorImage {
    let (width, height) = scaled_dimensions(base.width(), base.height(), zoom, max_side);
    if (width, height) == (base.width(), base.height()) {
        to_color_image(base)
    } else {
        to_color_image(&resize(base, width, height))
    }
}

// ---------------------------------------------------------------------------
// Display handle
// ---------------------------------------------------------------------------

/// Convert to the RGBA buffer egui uploads as a texture.
pub fn to_color_image(image: &DynamicImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice())
}

/// Encode a solid-colour PNG in memory.
#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encoding test PNG");
    buf
}

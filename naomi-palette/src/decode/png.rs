//! Image palettes: the leading pixels of a PNG become the palette

use image::GenericImageView;

use crate::error::PaletteError;
use crate::palette::{Palette, PaletteFormat, Rgba};
use crate::{LARGE_PALETTE_SIZE, SMALL_PALETTE_SIZE};

/// Take the first 16 or 256 pixels (row-major) of an image.
///
/// Images with at least 256 pixels give a 256-color palette, smaller ones a
/// 16-color palette. Alpha comes straight from the image.
pub fn decode_png(data: &[u8]) -> Result<Palette, PaletteError> {
    let img = image::load_from_memory(data)
        .map_err(|e| PaletteError::format(PaletteFormat::Png, e.to_string()))?;

    let (width, height) = img.dimensions();
    let pixel_count = width as usize * height as usize;

    let count = if pixel_count < SMALL_PALETTE_SIZE {
        return Err(PaletteError::SizeConstraint(pixel_count));
    } else if pixel_count < LARGE_PALETTE_SIZE {
        SMALL_PALETTE_SIZE
    } else {
        LARGE_PALETTE_SIZE
    };

    let rgba = img.to_rgba8();
    let pixels: &[Rgba] = bytemuck::cast_slice(rgba.as_raw());

    let mut palette = Palette::new(PaletteFormat::Png);
    palette.colors.extend_from_slice(&pixels[..count]);

    tracing::debug!(
        "Sampled {} of {} pixels from {}x{} image",
        count,
        pixel_count,
        width,
        height
    );

    Ok(palette)
}

//! Per-format palette decoders
//!
//! Each decoder turns the raw bytes of one source file into a [`Palette`].
//! The set is closed: [`decode`] dispatches on the detected [`PaletteFormat`].
//!
//! - `text` - GIMP/JASC palettes and Paint.NET TXT palettes
//! - `png` - first 16 or 256 pixels of an image
//! - `ase` - Adobe Swatch Exchange chunks
//! - `aco` - Photoshop color swatch records

mod aco;
mod ase;
mod png;
mod read;
mod text;


pub use aco::decode_aco;
pub use ase::decode_ase;
pub use png::decode_png;
pub use text::{decode_gpl_pal, decode_txt};

use crate::error::PaletteError;
use crate::palette::{Palette, PaletteFormat};

/// Per-run decoder settings. The default makes slot 0 transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Palette slot that receives alpha 0 in formats without alpha.
    /// Negative or out-of-range values leave every color opaque.
    pub transparent_index: i64,
    /// Skip signature and declared-count checks. Never skips the final size check.
    pub force: bool,
}

/// Decode `data` as `format`
pub fn decode(
    format: PaletteFormat,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Palette, PaletteError> {
    let palette = match format {
        PaletteFormat::Gpl | PaletteFormat::Pal => {
            decode_gpl_pal(as_text(format, data)?, format, options)?
        }
        PaletteFormat::Txt => decode_txt(as_text(format, data)?, options)?,
        PaletteFormat::Png => decode_png(data)?,
        PaletteFormat::Ase => decode_ase(data, options)?,
        PaletteFormat::Aco => decode_aco(data, options)?,
    };

    tracing::debug!(
        "Decoded {} palette: {} colors (declared {:?})",
        palette.format,
        palette.colors.len(),
        palette.declared_count
    );

    Ok(palette)
}

fn as_text(format: PaletteFormat, data: &[u8]) -> Result<&str, PaletteError> {
    std::str::from_utf8(data)
        .map_err(|e| PaletteError::format(format, format!("file is not valid UTF-8 text: {}", e)))
}

/// Reconcile a declared count with what was actually parsed.
///
/// A disagreement is an error unless forced; an absent declaration becomes
/// the parsed length.
fn settle_declared_count(palette: &mut Palette, force: bool) -> Result<(), PaletteError> {
    let parsed = palette.colors.len();
    match palette.declared_count {
        Some(declared) if declared != parsed => {
            if !force {
                return Err(PaletteError::CountMismatch { declared, parsed });
            }
            tracing::warn!(
                "Ignoring color count mismatch ({} parsed, {} declared) because force is set",
                parsed,
                declared
            );
        }
        Some(_) => {}
        None => palette.declared_count = Some(parsed),
    }
    Ok(())
}

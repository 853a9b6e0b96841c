//! naomi-palette: palette file converter for NAOMI tile accelerator palette banks
//!
//! Reads palettes authored in common paint and design tools and turns them
//! into the 16- or 256-entry tables the TA palette RAM expects, either as a
//! raw binary image or as a C array ready to be `memcpy`'d into a bank.
//!
//! # Supported Sources
//!
//! | Format | Origin | Alpha |
//! |--------|--------|-------|
//! | `.gpl` | GIMP palette | transparent index |
//! | `.pal` | JASC / Paint Shop Pro | transparent index |
//! | `.txt` | Paint.NET | native |
//! | `.png` | first 16/256 pixels of an image | native |
//! | `.ase` | Adobe Swatch Exchange (RGB, Gray) | transparent index |
//! | `.aco` | Photoshop swatches (RGB, Grayscale) | transparent index |
//!
//! # Usage
//!
//! ```ignore
//! use naomi_palette::{ConvertOptions, OutputKind, PixelMode, convert_file};
//! use std::path::Path;
//!
//! let mut options = ConvertOptions::new(PixelMode::Rgba1555);
//! options.output = OutputKind::Raw;
//! let converted = convert_file(Path::new("title.gpl"), Path::new("title.bin"), &options)?;
//! println!("{} colors", converted.packed.len());
//! ```
//!
//! # Pipeline
//!
//! [`detect_format`] -> [`decode`] -> [`validate`] -> [`pack_palette`] -> [`emit`]

mod convert;
mod decode;
mod detect;
mod emit;
mod error;
mod pack;
mod palette;
mod validate;

pub use convert::{ConvertOptions, ConvertedPalette, convert_bytes, convert_file, load_palette};
pub use decode::{DecodeOptions, decode, decode_aco, decode_ase, decode_gpl_pal, decode_png, decode_txt};
pub use detect::{UNKNOWN_TYPE, detect_format};
pub use emit::{OutputKind, emit, emit_raw, emit_source, symbol_name};
pub use error::PaletteError;
pub use pack::{
    PixelMode, pack_palette, pack_rgba1555, pack_rgba8888, unpack_rgba1555, unpack_rgba8888,
};
pub use palette::{
    Palette, PaletteFormat, Provenance, Rgba, alpha_for_position, f32_to_unorm8,
};
pub use validate::{is_valid_palette_size, validate};

// =============================================================================
// Constants
// =============================================================================

/// Entries in a 4bpp palette bank
pub const SMALL_PALETTE_SIZE: usize = 16;

/// Entries in an 8bpp palette bank
pub const LARGE_PALETTE_SIZE: usize = 256;

/// Size in bytes of one palette RAM entry, in either pixel mode
pub const PALETTE_ENTRY_SIZE: usize = 4;

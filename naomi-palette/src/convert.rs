//! End-to-end conversion: detect -> decode -> validate -> pack -> emit

use std::path::Path;

use crate::decode::{DecodeOptions, decode};
use crate::detect::detect_format;
use crate::emit::{OutputKind, emit};
use crate::error::PaletteError;
use crate::pack::{PixelMode, pack_palette};
use crate::palette::{Palette, PaletteFormat};
use crate::validate::validate;

/// Everything one conversion needs besides the paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Explicit source type, bypassing extension detection
    pub format_override: Option<String>,
    pub decode: DecodeOptions,
    pub mode: PixelMode,
    pub output: OutputKind,
}

impl ConvertOptions {
    pub fn new(mode: PixelMode) -> Self {
        Self {
            format_override: None,
            decode: DecodeOptions::default(),
            mode,
            output: OutputKind::default(),
        }
    }
}

/// Result of an in-memory conversion
#[derive(Debug, Clone)]
pub struct ConvertedPalette {
    pub palette: Palette,
    /// One palette RAM word per color
    pub packed: Vec<u32>,
    /// Serialized artifact
    pub bytes: Vec<u8>,
}

/// Detect, read, decode and validate a palette file
pub fn load_palette(
    source: &Path,
    format_override: Option<&str>,
    options: &DecodeOptions,
) -> Result<Palette, PaletteError> {
    let format = detect_format(source, format_override)?;
    let data = std::fs::read(source)?;
    decode_validated(format, &data, options)
}

/// Convert already-loaded file contents.
///
/// `source` is used for detection and naming only; nothing is read from disk.
pub fn convert_bytes(
    source: &Path,
    data: &[u8],
    options: &ConvertOptions,
) -> Result<ConvertedPalette, PaletteError> {
    let format = detect_format(source, options.format_override.as_deref())?;
    let palette = decode_validated(format, data, &options.decode)?;

    let packed = pack_palette(&palette, options.mode);
    let bytes = emit(options.output, &packed, &palette, source);

    Ok(ConvertedPalette {
        palette,
        packed,
        bytes,
    })
}

/// Convert `input` and write the artifact to `output`.
///
/// The output file is only created once every earlier stage succeeded, so a
/// failed conversion never leaves a partial file behind.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertedPalette, PaletteError> {
    // Detection never needs the file contents, so fail before reading
    detect_format(input, options.format_override.as_deref())?;
    let data = std::fs::read(input)?;
    let converted = convert_bytes(input, &data, options)?;

    std::fs::write(output, &converted.bytes)?;

    tracing::info!(
        "Converted {} palette: {} colors as {} -> {:?} ({} bytes)",
        converted.palette.format,
        converted.packed.len(),
        options.mode,
        output,
        converted.bytes.len()
    );

    Ok(converted)
}

fn decode_validated(
    format: PaletteFormat,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Palette, PaletteError> {
    let palette = decode(format, data, options)?;
    validate(&palette)?;
    Ok(palette)
}

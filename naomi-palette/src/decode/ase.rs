//! Adobe Swatch Exchange (.ase) decoder
//!
//! ASE is not publicly documented. The layout below follows the
//! reverse-engineered descriptions of the format:
//!
//! ```text
//! header:  "ASEF" | version u16 u16 | chunk count u32
//! chunk:   type u16 | size u32 | <size bytes of payload>
//! payload: name length u16 | UTF-16BE name | (color entries only:)
//!          mode [u8; 4] | f32 values | color type u16
//! ```
//!
//! All values are big-endian. Groups are flattened, and decoding stops at
//! the first group-end chunk.

use std::io::Cursor;

use crate::decode::DecodeOptions;
use crate::decode::read::{read_f32, read_i16, read_tag, read_u16, read_u32, read_utf16, tag_string};
use crate::error::PaletteError;
use crate::palette::{Palette, PaletteFormat, Provenance, Rgba, f32_to_unorm8};

const FORMAT: PaletteFormat = PaletteFormat::Ase;

/// ASE file signature
pub const ASE_MAGIC: &[u8; 4] = b"ASEF";

/// Size of the fixed file header
pub const ASE_HEADER_SIZE: usize = 12;

/// Chunk type: start of a named group
pub const ASE_GROUP_START: u16 = 0xC001;
/// Chunk type: one color swatch
pub const ASE_COLOR_ENTRY: u16 = 0x0001;
/// Chunk type: end of a group
pub const ASE_GROUP_END: u16 = 0x0000;

const COLOR_TYPES: [&str; 3] = ["Global", "Spot", "Normal"];

/// Decode an ASE swatch file.
///
/// RGB and Gray entries become colors; CMYK and LAB entries need ICC
/// profile data to convert faithfully and are rejected.
pub fn decode_ase(data: &[u8], options: &DecodeOptions) -> Result<Palette, PaletteError> {
    if data.len() < ASE_HEADER_SIZE {
        return Err(PaletteError::format(FORMAT, "file too small to contain ASE header"));
    }

    let mut cursor = Cursor::new(data);

    let signature = read_tag(&mut cursor, FORMAT)?;
    let version_major = read_i16(&mut cursor, FORMAT)?;
    let version_minor = read_i16(&mut cursor, FORMAT)?;
    let chunk_count = read_u32(&mut cursor, FORMAT)?;

    if !signature.eq_ignore_ascii_case(ASE_MAGIC) {
        return Err(PaletteError::format(
            FORMAT,
            format!("bad signature {:?}", tag_string(&signature)),
        ));
    }
    if chunk_count == 0 {
        return Err(PaletteError::format(FORMAT, "header declares zero chunks"));
    }

    let mut palette = Palette::new(FORMAT);
    let mut records = vec![format!(
        "Header: {} {}.{} {}",
        tag_string(&signature),
        version_major,
        version_minor,
        chunk_count
    )];

    while (cursor.position() as usize) < data.len() {
        let chunk_offset = cursor.position();
        let chunk_type = read_u16(&mut cursor, FORMAT)?;
        let chunk_size = read_u32(&mut cursor, FORMAT)?;
        // Chunk size counts the bytes after the size field
        let chunk_end = cursor.position() + chunk_size as u64;

        match chunk_type {
            ASE_GROUP_START => {
                let name_length = read_u16(&mut cursor, FORMAT)?;
                let name = read_utf16(&mut cursor, name_length as usize, FORMAT)?;
                records.push(format!(
                    "GROUP START ({}B) Name ({}B): {}",
                    chunk_size, name_length, name
                ));
            }
            ASE_COLOR_ENTRY => {
                let record = parse_color_entry(&mut cursor, chunk_size, &mut palette, options)?;
                records.push(record);
            }
            ASE_GROUP_END => {
                records.push(format!("GROUP END ({}B)", chunk_size));
                // Only the first group boundary is honored
                tracing::debug!(
                    "Group end at offset {}, stopping after {} colors",
                    chunk_offset,
                    palette.colors.len()
                );
                break;
            }
            other => {
                return Err(PaletteError::format(
                    FORMAT,
                    format!(
                        "malformed chunk header: unknown chunk type 0x{:04X} at offset {}",
                        other, chunk_offset
                    ),
                ));
            }
        }

        cursor.set_position(chunk_end);
    }

    palette.provenance = Provenance::Records(records);

    Ok(palette)
}

/// Parse one color entry payload, append its color and return its trace line
fn parse_color_entry(
    cursor: &mut Cursor<&[u8]>,
    chunk_size: u32,
    palette: &mut Palette,
    options: &DecodeOptions,
) -> Result<String, PaletteError> {
    // Name length includes the terminating NUL
    let name_length = read_u16(cursor, FORMAT)?;
    let name = read_utf16(cursor, name_length as usize, FORMAT)?;

    let mode_tag = read_tag(cursor, FORMAT)?;
    let mode = tag_string(&mode_tag);

    let (values, (r, g, b)) = match mode.trim().to_ascii_lowercase().as_str() {
        "rgb" => {
            let rgb = [
                read_f32(cursor, FORMAT)?,
                read_f32(cursor, FORMAT)?,
                read_f32(cursor, FORMAT)?,
            ];
            let color = (
                f32_to_unorm8(rgb[0]),
                f32_to_unorm8(rgb[1]),
                f32_to_unorm8(rgb[2]),
            );
            (rgb.to_vec(), color)
        }
        "gray" => {
            let gray = read_f32(cursor, FORMAT)?;
            let v = f32_to_unorm8(gray);
            (vec![gray], (v, v, v))
        }
        "cmyk" => {
            read_floats(cursor, 4)?;
            return Err(PaletteError::UnsupportedColorSpace("CMYK".into()));
        }
        "lab" => {
            read_floats(cursor, 3)?;
            return Err(PaletteError::UnsupportedColorSpace("LAB".into()));
        }
        _ => {
            return Err(PaletteError::UnsupportedColorSpace(format!(
                "unknown ASE color mode {:?}",
                mode
            )));
        }
    };

    let position = palette.colors.len();
    palette
        .colors
        .push(Rgba::indexed(r, g, b, position, options.transparent_index));

    // Global / Spot / Normal; irrelevant to palette RAM
    let color_type = read_u16(cursor, FORMAT)?;
    let color_type_name = COLOR_TYPES
        .get(color_type as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Unknown({})", color_type));

    Ok(format!(
        "COLOR ({}B) Name ({}B): {} Mode: {} Val: {:?} Type: {}",
        chunk_size, name_length, name, mode, values, color_type_name
    ))
}

/// Consume the values of a mode we cannot convert
fn read_floats(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<(), PaletteError> {
    for _ in 0..count {
        read_f32(cursor, FORMAT)?;
    }
    Ok(())
}

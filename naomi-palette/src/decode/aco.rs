//! Photoshop color swatch (.aco) decoder
//!
//! ```text
//! version u16 | count u16 | count × record
//! record (v1): space u16 | w u16 | x u16 | y u16 | z u16
//! record (v2): v1 record | name length u32 | UTF-16BE name
//! ```
//!
//! A version 1 file may be followed by a complete version 2 section. When
//! one is found directly after the v1 table, the v2 section is decoded
//! instead so the color names are available.

use std::io::Cursor;

use crate::decode::DecodeOptions;
use crate::decode::read::{read_u16, read_u32, read_utf16, remaining};
use crate::error::PaletteError;
use crate::palette::{Palette, PaletteFormat, Provenance, Rgba};

const FORMAT: PaletteFormat = PaletteFormat::Aco;

/// Fixed part of every record: space + four components
pub const ACO_RECORD_SIZE: u64 = 10;

/// Color space: RGB, components 0..=65535
pub const ACO_SPACE_RGB: u16 = 0;
/// Color space: HSB
pub const ACO_SPACE_HSB: u16 = 1;
/// Color space: CMYK
pub const ACO_SPACE_CMYK: u16 = 2;
/// Color space: LAB
pub const ACO_SPACE_LAB: u16 = 7;
/// Color space: grayscale, component 0..=10000
pub const ACO_SPACE_GRAYSCALE: u16 = 8;

/// 10000 / 256: scales a grayscale component to 8 bits
const GRAYSCALE_DIVISOR: f64 = 39.0625;

/// Decode an ACO swatch file.
///
/// Decoding ends as soon as the declared number of colors has been read;
/// anything after that is ignored.
pub fn decode_aco(data: &[u8], options: &DecodeOptions) -> Result<Palette, PaletteError> {
    let mut cursor = Cursor::new(data);

    let mut version = read_u16(&mut cursor, FORMAT)?;
    if version != 1 && version != 2 {
        return Err(PaletteError::format(
            FORMAT,
            format!("invalid version {} (expected 1 or 2)", version),
        ));
    }
    let declared = read_u16(&mut cursor, FORMAT)?;

    if version == 1 {
        // A v2 section, if present, starts right after the v1 table
        let v2_offset = cursor.position() + declared as u64 * ACO_RECORD_SIZE;
        let mut probe = Cursor::new(data);
        probe.set_position(v2_offset);
        if remaining(&probe) >= 2 && read_u16(&mut probe, FORMAT)? == 2 {
            tracing::debug!("Found version 2 section at offset {}", v2_offset);
            // Skip the v2 version and count fields
            cursor.set_position(v2_offset + 4);
            version = 2;
        }
    }

    let mut palette = Palette::new(FORMAT);
    palette.declared_count = Some(declared as usize);
    let mut records = vec![format!("Header: V{} {}", version, declared)];

    while palette.colors.len() < declared as usize {
        let record_offset = cursor.position();
        let space = read_u16(&mut cursor, FORMAT)?;
        let components = [
            read_u16(&mut cursor, FORMAT)?,
            read_u16(&mut cursor, FORMAT)?,
            read_u16(&mut cursor, FORMAT)?,
            read_u16(&mut cursor, FORMAT)?,
        ];

        let (r, g, b) = convert_components(space, components)?;
        let position = palette.colors.len();
        palette
            .colors
            .push(Rgba::indexed(r, g, b, position, options.transparent_index));

        let name = if version == 2 {
            let name_length = read_u32(&mut cursor, FORMAT)?;
            read_utf16(&mut cursor, name_length as usize, FORMAT)?
        } else {
            String::new()
        };

        tracing::trace!("Record at offset {}: space {}", record_offset, space);
        records.push(format!(
            "Raw: {} {:?} -> Parsed RGB: ({}, {}, {}) {}",
            space, components, r, g, b, name
        ));
    }

    palette.provenance = Provenance::Records(records);

    Ok(palette)
}

/// Convert one record's components to 8-bit RGB
fn convert_components(space: u16, components: [u16; 4]) -> Result<(u8, u8, u8), PaletteError> {
    match space {
        ACO_SPACE_RGB => Ok((
            (components[0] >> 8) as u8,
            (components[1] >> 8) as u8,
            (components[2] >> 8) as u8,
        )),
        ACO_SPACE_GRAYSCALE => {
            // 10000 maps to 256, so saturate
            let gray = (components[0] as f64 / GRAYSCALE_DIVISOR).min(255.0) as u8;
            Ok((gray, gray, gray))
        }
        ACO_SPACE_HSB => Err(PaletteError::UnsupportedColorSpace("HSB".into())),
        ACO_SPACE_CMYK => Err(PaletteError::UnsupportedColorSpace("CMYK".into())),
        ACO_SPACE_LAB => Err(PaletteError::UnsupportedColorSpace("LAB".into())),
        other => Err(PaletteError::UnsupportedColorSpace(format!(
            "unknown ACO color space {}",
            other
        ))),
    }
}

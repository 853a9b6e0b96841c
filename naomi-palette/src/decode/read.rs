//! Big-endian read helpers for the Adobe swatch formats
//!
//! Every helper advances the caller's cursor; running off the end of the
//! buffer is reported as a format error tagged with the decoder's format.

use std::io::{Cursor, Read};

use crate::error::PaletteError;
use crate::palette::PaletteFormat;

fn read_array<const N: usize>(
    cursor: &mut Cursor<&[u8]>,
    format: PaletteFormat,
) -> Result<[u8; N], PaletteError> {
    let offset = cursor.position();
    let mut buf = [0u8; N];
    cursor.read_exact(&mut buf).map_err(|_| {
        PaletteError::format(
            format,
            format!("unexpected end of data reading {} bytes at offset {}", N, offset),
        )
    })?;
    Ok(buf)
}

pub(crate) fn read_u16(cursor: &mut Cursor<&[u8]>, format: PaletteFormat) -> Result<u16, PaletteError> {
    read_array::<2>(cursor, format).map(u16::from_be_bytes)
}

pub(crate) fn read_i16(cursor: &mut Cursor<&[u8]>, format: PaletteFormat) -> Result<i16, PaletteError> {
    read_array::<2>(cursor, format).map(i16::from_be_bytes)
}

pub(crate) fn read_u32(cursor: &mut Cursor<&[u8]>, format: PaletteFormat) -> Result<u32, PaletteError> {
    read_array::<4>(cursor, format).map(u32::from_be_bytes)
}

pub(crate) fn read_f32(cursor: &mut Cursor<&[u8]>, format: PaletteFormat) -> Result<f32, PaletteError> {
    read_array::<4>(cursor, format).map(f32::from_be_bytes)
}

/// Four raw bytes (signatures, color mode tags)
pub(crate) fn read_tag(cursor: &mut Cursor<&[u8]>, format: PaletteFormat) -> Result<[u8; 4], PaletteError> {
    read_array::<4>(cursor, format)
}

/// UTF-16BE string of `units` code units, trailing NULs and whitespace removed
pub(crate) fn read_utf16(
    cursor: &mut Cursor<&[u8]>,
    units: usize,
    format: PaletteFormat,
) -> Result<String, PaletteError> {
    let remaining = remaining(cursor);
    if units.saturating_mul(2) > remaining {
        return Err(PaletteError::format(
            format,
            format!(
                "name of {} characters at offset {} runs past end of data",
                units,
                cursor.position()
            ),
        ));
    }

    let mut code_units = Vec::with_capacity(units);
    for _ in 0..units {
        code_units.push(read_u16(cursor, format)?);
    }

    let name: String = char::decode_utf16(code_units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    Ok(name.trim_end_matches('\0').trim().to_string())
}

/// Bytes left between the cursor and the end of the buffer
pub(crate) fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    let len = cursor.get_ref().len() as u64;
    len.saturating_sub(cursor.position()) as usize
}

/// ASCII rendering of a 4-byte tag for messages and provenance
pub(crate) fn tag_string(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

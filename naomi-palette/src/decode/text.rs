//! Line-oriented text palettes: GIMP (.gpl), JASC (.pal) and Paint.NET (.txt)

use crate::decode::{DecodeOptions, settle_declared_count};
use crate::error::PaletteError;
use crate::palette::{Palette, PaletteFormat, Provenance, Rgba};

const GIMP_MAGIC: &str = "gimp palette";
const JASC_MAGIC: &str = "jasc-pal";
const PAINT_NET_MAGIC: &str = "paint.net palette file";

/// Decode a GIMP or JASC palette.
///
/// The header on line 0 picks the dialect. With `force`, a missing header is
/// tolerated and `format` decides the dialect instead; line 0 is then parsed
/// like any other line.
pub fn decode_gpl_pal(
    text: &str,
    format: PaletteFormat,
    options: &DecodeOptions,
) -> Result<Palette, PaletteError> {
    let mut palette = Palette::new(format);

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let lower = line.to_ascii_lowercase();

        if index == 0 {
            if lower.starts_with(GIMP_MAGIC) {
                palette.format = PaletteFormat::Gpl;
                continue;
            } else if lower.starts_with(JASC_MAGIC) {
                palette.format = PaletteFormat::Pal;
                continue;
            } else if !options.force {
                return Err(PaletteError::format(
                    format,
                    "first line is neither \"GIMP Palette\" nor \"JASC-PAL\"",
                ));
            }
            tracing::warn!("No {} header found, parsing anyway because force is set", format);
        }

        if palette.format == PaletteFormat::Gpl {
            // Name and color count are optional in GIMP palettes
            if lower.contains("name:") {
                palette.name = Some(after_last_colon(line).to_string());
                continue;
            }
            if lower.contains("colors:") {
                palette.declared_count = Some(parse_count(after_last_colon(line), palette.format)?);
                continue;
            }
            if line.contains('#') {
                continue;
            }
        } else {
            // Line 1 is the JASC version, line 2 the mandatory color count
            if index == 1 {
                continue;
            }
            if index == 2 {
                palette.declared_count = Some(parse_count(line, palette.format)?);
                continue;
            }
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() >= 3 {
            let r = parse_component(columns[0], index, palette.format)?;
            let g = parse_component(columns[1], index, palette.format)?;
            let b = parse_component(columns[2], index, palette.format)?;
            let position = palette.colors.len();
            palette
                .colors
                .push(Rgba::indexed(r, g, b, position, options.transparent_index));
        }
    }

    settle_declared_count(&mut palette, options.force)?;
    palette.provenance = Provenance::Text(text.to_string());

    Ok(palette)
}

/// Decode a Paint.NET palette.
///
/// Colors are `AARRGGBB` hex strings and keep their own alpha; the
/// transparent index does not apply.
pub fn decode_txt(text: &str, options: &DecodeOptions) -> Result<Palette, PaletteError> {
    let format = PaletteFormat::Txt;
    let mut palette = Palette::new(format);

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let lower = line.to_ascii_lowercase();

        if index == 0 {
            if lower.contains(PAINT_NET_MAGIC) {
                continue;
            } else if !options.force {
                return Err(PaletteError::format(
                    format,
                    "first line does not name a Paint.NET palette file",
                ));
            }
            tracing::warn!("No TXT header found, parsing anyway because force is set");
        }

        if lower.contains("name:") {
            palette.name = Some(after_last_colon(line).to_string());
            continue;
        }
        if lower.contains("colors:") {
            palette.declared_count = Some(parse_count(after_last_colon(line), format)?);
            continue;
        }
        if line.contains(';') {
            continue;
        }

        if line.len() >= 8 {
            palette.colors.push(parse_argb_hex(line, index)?);
        }
    }

    settle_declared_count(&mut palette, options.force)?;
    palette.provenance = Provenance::Text(text.to_string());

    Ok(palette)
}

fn after_last_colon(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line).trim()
}

fn parse_count(value: &str, format: PaletteFormat) -> Result<usize, PaletteError> {
    value
        .trim()
        .parse()
        .map_err(|_| PaletteError::format(format, format!("invalid color count {:?}", value)))
}

fn parse_component(token: &str, line: usize, format: PaletteFormat) -> Result<u8, PaletteError> {
    token.parse().map_err(|_| {
        PaletteError::format(
            format,
            format!("line {}: {:?} is not a color component in 0..=255", line + 1, token),
        )
    })
}

fn parse_argb_hex(line: &str, index: usize) -> Result<Rgba, PaletteError> {
    let hex = line
        .get(..8)
        .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| {
            PaletteError::format(
                PaletteFormat::Txt,
                format!("line {}: {:?} is not an AARRGGBB color", index + 1, line),
            )
        })?;

    let value = u32::from_str_radix(hex, 16).map_err(|_| {
        PaletteError::format(
            PaletteFormat::Txt,
            format!("line {}: {:?} is not an AARRGGBB color", index + 1, line),
        )
    })?;
    let [a, r, g, b] = value.to_be_bytes();

    Ok(Rgba::new(r, g, b, a))
}

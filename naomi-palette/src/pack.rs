//! Palette RAM pixel packing
//!
//! Converts 8-bit RGBA colors to the two palette entry layouts the tile
//! accelerator understands:
//! - RGBA1555: `A RRRRR GGGGG BBBBB` in the low 16 bits
//! - RGBA8888: `AAAAAAAA RRRRRRRR GGGGGGGG BBBBBBBB`
//!
//! Each entry occupies a full 32-bit word of palette RAM in either mode.

use core::fmt;
use core::str::FromStr;

use crate::error::PaletteError;
use crate::palette::{Palette, Rgba};

/// Target palette entry layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelMode {
    Rgba1555,
    Rgba8888,
}

impl PixelMode {
    pub const fn name(self) -> &'static str {
        match self {
            PixelMode::Rgba1555 => "RGBA1555",
            PixelMode::Rgba8888 => "RGBA8888",
        }
    }

    /// Pack one color into its palette RAM word
    #[inline]
    pub fn pack(self, color: Rgba) -> u32 {
        match self {
            PixelMode::Rgba1555 => pack_rgba1555(color) as u32,
            PixelMode::Rgba8888 => pack_rgba8888(color),
        }
    }

    /// Recover a color from a palette RAM word.
    ///
    /// Exact for RGBA8888. RGBA1555 keeps only the top five bits of each
    /// channel and a one-bit alpha.
    #[inline]
    pub fn unpack(self, value: u32) -> Rgba {
        match self {
            PixelMode::Rgba1555 => unpack_rgba1555(value as u16),
            PixelMode::Rgba8888 => unpack_rgba8888(value),
        }
    }
}

impl FromStr for PixelMode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("rgba1555") {
            Ok(PixelMode::Rgba1555)
        } else if s.eq_ignore_ascii_case("rgba8888") {
            Ok(PixelMode::Rgba8888)
        } else {
            Err(PaletteError::Configuration(s.to_string()))
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pack to RGBA1555. Alpha is on when its high bit is set (a >= 128).
#[inline]
pub fn pack_rgba1555(color: Rgba) -> u16 {
    let (r, g, b, a) = (
        color.r as u16,
        color.g as u16,
        color.b as u16,
        color.a as u16,
    );
    ((b >> 3) & 0x001F) | ((g << 2) & 0x03E0) | ((r << 7) & 0x7C00) | ((a << 8) & 0x8000)
}

/// Pack to RGBA8888 (blue in the low byte, alpha in the high byte)
#[inline]
pub fn pack_rgba8888(color: Rgba) -> u32 {
    (color.b as u32) | ((color.g as u32) << 8) | ((color.r as u32) << 16) | ((color.a as u32) << 24)
}

/// Inverse of [`pack_rgba1555`]; low channel bits come back as zero
#[inline]
pub fn unpack_rgba1555(value: u16) -> Rgba {
    Rgba::new(
        (((value >> 10) & 0x1F) << 3) as u8,
        (((value >> 5) & 0x1F) << 3) as u8,
        ((value & 0x1F) << 3) as u8,
        if value & 0x8000 != 0 { 255 } else { 0 },
    )
}

/// Inverse of [`pack_rgba8888`]
#[inline]
pub fn unpack_rgba8888(value: u32) -> Rgba {
    let [b, g, r, a] = value.to_le_bytes();
    Rgba::new(r, g, b, a)
}

/// Pack a whole palette, preserving color order
pub fn pack_palette(palette: &Palette, mode: PixelMode) -> Vec<u32> {
    palette.colors.iter().map(|&c| mode.pack(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteFormat;

    #[test]
    fn test_rgba1555_extremes() {
        assert_eq!(pack_rgba1555(Rgba::new(255, 255, 255, 255)), 0xFFFF);
        assert_eq!(pack_rgba1555(Rgba::new(0, 0, 0, 0)), 0x0000);
    }

    #[test]
    fn test_rgba1555_channels() {
        // Red only occupies bits 10-14
        assert_eq!(pack_rgba1555(Rgba::new(248, 0, 0, 255)), 0xFC00);
        assert_eq!(pack_rgba1555(Rgba::new(248, 0, 0, 0)), 0x7C00);
        assert_eq!(pack_rgba1555(Rgba::new(0, 248, 0, 0)), 0x03E0);
        assert_eq!(pack_rgba1555(Rgba::new(0, 0, 248, 0)), 0x001F);
    }

    #[test]
    fn test_rgba1555_alpha_threshold() {
        assert_eq!(pack_rgba1555(Rgba::new(0, 0, 0, 128)), 0x8000);
        assert_eq!(pack_rgba1555(Rgba::new(0, 0, 0, 127)), 0x0000);
    }

    #[test]
    fn test_rgba8888() {
        assert_eq!(pack_rgba8888(Rgba::new(16, 32, 48, 255)), 0xFF102030);
        assert_eq!(pack_rgba8888(Rgba::new(0, 0, 0, 0)), 0);
    }

    #[test]
    fn test_rgba8888_round_trip_is_exact() {
        for color in [
            Rgba::new(16, 32, 48, 255),
            Rgba::new(1, 2, 3, 4),
            Rgba::new(255, 0, 127, 0),
        ] {
            let packed = PixelMode::Rgba8888.pack(color);
            assert_eq!(PixelMode::Rgba8888.unpack(packed), color);
        }
    }

    #[test]
    fn test_rgba1555_round_trip_is_lossy() {
        let color = Rgba::new(0x37, 0xC9, 0xFF, 200);
        let back = PixelMode::Rgba1555.unpack(PixelMode::Rgba1555.pack(color));

        // Only the top five bits of each channel survive
        assert_eq!(back.r, 0x37 & 0xF8);
        assert_eq!(back.g, 0xC9 & 0xF8);
        assert_eq!(back.b, 0xFF & 0xF8);
        assert_ne!(back, color);
        // Alpha collapses to on/off
        assert_eq!(back.a, 255);
        assert_eq!(PixelMode::Rgba1555.unpack(PixelMode::Rgba1555.pack(Rgba::new(0, 0, 0, 100))).a, 0);
    }

    #[test]
    fn test_rgba1555_uses_low_half_word() {
        assert_eq!(PixelMode::Rgba1555.pack(Rgba::new(255, 255, 255, 255)), 0x0000_FFFF);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("RGBA1555".parse::<PixelMode>(), Ok(PixelMode::Rgba1555));
        assert_eq!("rgba8888".parse::<PixelMode>(), Ok(PixelMode::Rgba8888));
        assert_eq!(
            "rgb565".parse::<PixelMode>(),
            Err(PaletteError::Configuration("rgb565".into()))
        );
        assert_eq!(PixelMode::Rgba8888.to_string(), "RGBA8888");
    }

    #[test]
    fn test_pack_palette_preserves_order() {
        let mut palette = Palette::new(PaletteFormat::Png);
        palette.colors = vec![Rgba::new(255, 0, 0, 255), Rgba::new(0, 0, 255, 0)];
        assert_eq!(
            pack_palette(&palette, PixelMode::Rgba8888),
            vec![0xFFFF0000, 0x000000FF]
        );
    }
}

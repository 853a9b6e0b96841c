//! Canonical palette model shared by every decoder and encoder

use core::fmt;

use bytemuck::{Pod, Zeroable};

/// Source formats understood by the decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteFormat {
    /// GIMP palette
    Gpl,
    /// JASC (Paint Shop Pro) palette
    Pal,
    /// First 16/256 pixels of an image
    Png,
    /// Adobe Swatch Exchange
    Ase,
    /// Adobe Photoshop color swatch
    Aco,
    /// Paint.NET palette
    Txt,
}

impl PaletteFormat {
    /// All formats in detection order
    pub const ALL: [PaletteFormat; 6] = [
        PaletteFormat::Gpl,
        PaletteFormat::Pal,
        PaletteFormat::Png,
        PaletteFormat::Ase,
        PaletteFormat::Aco,
        PaletteFormat::Txt,
    ];

    /// Upper-case tag, which is also the file extension
    pub const fn tag(self) -> &'static str {
        match self {
            PaletteFormat::Gpl => "GPL",
            PaletteFormat::Pal => "PAL",
            PaletteFormat::Png => "PNG",
            PaletteFormat::Ase => "ASE",
            PaletteFormat::Aco => "ACO",
            PaletteFormat::Txt => "TXT",
        }
    }

    /// Case-insensitive lookup by tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for PaletteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One 8-bit-per-channel color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque or fully transparent color depending on its palette position
    pub const fn indexed(r: u8, g: u8, b: u8, position: usize, transparent_index: i64) -> Self {
        Self::new(r, g, b, alpha_for_position(position, transparent_index))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.r, self.g, self.b, self.a)
    }
}

/// Alpha for formats without a native alpha channel.
///
/// Exactly the slot at `transparent_index` is transparent. Negative or
/// out-of-range indices never match, leaving the palette fully opaque.
pub const fn alpha_for_position(position: usize, transparent_index: i64) -> u8 {
    if transparent_index >= 0 && position as u64 == transparent_index as u64 {
        0
    } else {
        255
    }
}

/// Convert a [0.0, 1.0] float channel to 8 bits, truncating.
///
/// Out-of-range input saturates; NaN maps to 0.
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 255.0) as u8
}

/// Human-readable record of where the colors came from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Provenance {
    /// Original file text (GPL, PAL, TXT)
    Text(String),
    /// One line per interpreted binary block (ASE, ACO)
    Records(Vec<String>),
    /// Nothing worth embedding (PNG)
    #[default]
    None,
}

/// A decoded palette, independent of its source format
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub format: PaletteFormat,
    /// Output order
    pub colors: Vec<Rgba>,
    pub name: Option<String>,
    /// Count claimed by the file itself, if the format has one
    pub declared_count: Option<usize>,
    pub provenance: Provenance,
}

impl Palette {
    pub fn new(format: PaletteFormat) -> Self {
        Self {
            format,
            colors: Vec::new(),
            name: None,
            declared_count: None,
            provenance: Provenance::None,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Name: {}", self.name.as_deref().unwrap_or(""))?;
        match self.declared_count {
            Some(n) => writeln!(f, "Colors: {}", n)?,
            None => writeln!(f, "Colors: {}", self.colors.len())?,
        }
        for (i, color) in self.colors.iter().enumerate() {
            writeln!(f, "{:3}: {}", i, color)?;
        }
        Ok(())
    }
}

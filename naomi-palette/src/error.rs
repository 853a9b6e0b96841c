//! Palette conversion error types

use std::path::PathBuf;

use crate::palette::PaletteFormat;

/// Everything that can stop a palette conversion.
///
/// Every variant is terminal: the pipeline never writes output once one of
/// these has been produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    /// Neither the explicit type nor the file extension named a known format
    #[error("could not determine palette type of {path:?}; check the extension or pass an explicit type")]
    Detection { path: PathBuf },

    /// Bad signature, header, chunk or data line
    #[error("invalid or malformed {format} palette: {reason}")]
    Format {
        format: PaletteFormat,
        reason: String,
    },

    /// CMYK, LAB, HSB or an unrecognized color mode
    #[error("unsupported color mode: {0}")]
    UnsupportedColorSpace(String),

    /// The file declared one color count but contained another
    #[error("parsed color count does not match file declaration: {parsed} != {declared}")]
    CountMismatch { declared: usize, parsed: usize },

    /// Final color count is not a valid palette bank size
    #[error("palette has {0} colors; palette banks hold 16 or 256")]
    SizeConstraint(usize),

    /// Unknown target pixel mode
    #[error("unsupported pixel mode {0:?} (expected RGBA1555 or RGBA8888)")]
    Configuration(String),

    /// Reading the source file failed
    #[error("IO error: {0}")]
    Io(String),
}

impl PaletteError {
    pub(crate) fn format(format: PaletteFormat, reason: impl Into<String>) -> Self {
        PaletteError::Format {
            format,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for PaletteError {
    fn from(e: std::io::Error) -> Self {
        PaletteError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PaletteError::CountMismatch {
                declared: 16,
                parsed: 15
            }
            .to_string(),
            "parsed color count does not match file declaration: 15 != 16"
        );
        assert_eq!(
            PaletteError::SizeConstraint(15).to_string(),
            "palette has 15 colors; palette banks hold 16 or 256"
        );
        assert_eq!(
            PaletteError::format(PaletteFormat::Ase, "bad signature").to_string(),
            "invalid or malformed ASE palette: bad signature"
        );
        assert_eq!(
            PaletteError::UnsupportedColorSpace("CMYK".into()).to_string(),
            "unsupported color mode: CMYK"
        );
    }
}

//! Final palette checks shared by every format

use crate::error::PaletteError;
use crate::palette::Palette;
use crate::{LARGE_PALETTE_SIZE, SMALL_PALETTE_SIZE};

/// Whether `count` is a size the palette bank can hold
#[inline]
pub const fn is_valid_palette_size(count: usize) -> bool {
    count == SMALL_PALETTE_SIZE || count == LARGE_PALETTE_SIZE
}

/// Reject palettes the hardware cannot load.
///
/// Runs after every decoder. The force flag has no say here.
pub fn validate(palette: &Palette) -> Result<(), PaletteError> {
    let count = palette.colors.len();
    if !is_valid_palette_size(count) {
        return Err(PaletteError::SizeConstraint(count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteFormat, Rgba};

    fn palette_of(count: usize) -> Palette {
        let mut palette = Palette::new(PaletteFormat::Gpl);
        palette.colors = vec![Rgba::default(); count];
        palette
    }

    #[test]
    fn test_valid_sizes() {
        assert!(validate(&palette_of(16)).is_ok());
        assert!(validate(&palette_of(256)).is_ok());
    }

    #[test]
    fn test_invalid_sizes() {
        for count in [0, 1, 15, 17, 255, 257, 512] {
            assert_eq!(
                validate(&palette_of(count)),
                Err(PaletteError::SizeConstraint(count))
            );
        }
    }

    #[test]
    fn test_declared_count_is_not_consulted() {
        let mut palette = palette_of(15);
        palette.declared_count = Some(16);
        assert_eq!(validate(&palette), Err(PaletteError::SizeConstraint(15)));
    }
}

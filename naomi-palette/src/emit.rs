//! Output serialization: raw palette RAM images or C source

use std::fmt::Write;
use std::path::Path;

use crate::PALETTE_ENTRY_SIZE;
use crate::palette::{Palette, Provenance};

/// Number of packed values per line of generated C
const VALUES_PER_LINE: usize = 8;

/// Kind of artifact to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// `uint32_t` array definition for inclusion in a C build
    #[default]
    Source,
    /// Little-endian words, ready to copy into a palette bank
    Raw,
}

impl OutputKind {
    /// Conventional file extension for this kind of output
    pub const fn extension(self) -> &'static str {
        match self {
            OutputKind::Source => "c",
            OutputKind::Raw => "bin",
        }
    }
}

/// Serialize packed values as consecutive little-endian 32-bit words
pub fn emit_raw(packed: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed.len() * PALETTE_ENTRY_SIZE);
    for value in packed {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// C identifier derived from the source file name
///
/// `my-palette.gpl` becomes `my_palette_gpl`.
pub fn symbol_name(source: &Path) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Generate a C file defining the packed palette.
///
/// The trailing comment records where the data came from: the original
/// text for text formats, the interpreted block trace for binary formats,
/// and just the path for images.
pub fn emit_source(packed: &[u32], palette: &Palette, source: &Path) -> String {
    let name = symbol_name(source);
    let mut out = String::new();

    out.push_str("#include <stdint.h>\n\n");
    let _ = writeln!(out, "uint32_t __{}_palette[{}] = {{", name, packed.len());
    for line in packed.chunks(VALUES_PER_LINE) {
        let values: Vec<String> = line.iter().map(|v| format!("0x{:08X}", v)).collect();
        let _ = writeln!(out, "    {},", values.join(", "));
    }
    out.push_str("};\n");
    let _ = writeln!(out, "uint32_t *{0}_palette = __{0}_palette;", name);
    out.push('\n');

    match &palette.provenance {
        Provenance::Text(text) => {
            let _ = writeln!(out, "// Original {} file:", palette.format);
            let _ = writeln!(out, "/*\n{}\n*/", defang_comment(text.trim_end()));
        }
        Provenance::Records(records) => {
            let _ = writeln!(out, "// Source file:\n// {}", source.display());
            out.push_str("// Interpreted binary block data:\n");
            let _ = writeln!(out, "/*\n{}\n*/", defang_comment(&records.join("\n")));
        }
        Provenance::None => {
            let _ = writeln!(out, "// Source file:\n// {}", source.display());
        }
    }

    out
}

/// Serialize `packed` in the requested kind
pub fn emit(kind: OutputKind, packed: &[u32], palette: &Palette, source: &Path) -> Vec<u8> {
    match kind {
        OutputKind::Raw => emit_raw(packed),
        OutputKind::Source => emit_source(packed, palette, source).into_bytes(),
    }
}

/// Keep embedded text from closing the surrounding block comment
fn defang_comment(text: &str) -> String {
    text.replace("*/", "* /")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteFormat, Rgba};

    fn sample_palette(provenance: Provenance, format: PaletteFormat) -> Palette {
        let mut palette = Palette::new(format);
        palette.colors = vec![Rgba::new(0, 0, 0, 255); 2];
        palette.provenance = provenance;
        palette
    }

    #[test]
    fn test_raw_is_little_endian() {
        assert_eq!(
            emit_raw(&[0xFF102030, 0x0000FFFF]),
            vec![0x30, 0x20, 0x10, 0xFF, 0xFF, 0xFF, 0x00, 0x00]
        );
        assert!(emit_raw(&[]).is_empty());
    }

    #[test]
    fn test_symbol_name() {
        assert_eq!(symbol_name(Path::new("art/my-palette.gpl")), "my_palette_gpl");
        assert_eq!(symbol_name(Path::new("Title Screen.aco")), "Title_Screen_aco");
        assert_eq!(symbol_name(Path::new("8bit.pal")), "_8bit_pal");
    }

    #[test]
    fn test_source_text_format() {
        let palette = sample_palette(
            Provenance::Text("GIMP Palette\n0 0 0\n".into()),
            PaletteFormat::Gpl,
        );
        let text = emit_source(&[0xFF000000, 0x00000001], &palette, Path::new("dir/test.gpl"));

        assert!(text.starts_with("#include <stdint.h>\n"));
        assert!(text.contains("uint32_t __test_gpl_palette[2] = {\n    0xFF000000, 0x00000001,\n};"));
        assert!(text.contains("uint32_t *test_gpl_palette = __test_gpl_palette;"));
        assert!(text.contains("// Original GPL file:\n/*\nGIMP Palette\n0 0 0\n*/"));
    }

    #[test]
    fn test_source_binary_trace() {
        let palette = sample_palette(
            Provenance::Records(vec!["Header: V1 2".into(), "Raw: 0".into()]),
            PaletteFormat::Aco,
        );
        let text = emit_source(&[0, 0], &palette, Path::new("swatch.aco"));
        assert!(text.contains("// Source file:\n// swatch.aco\n"));
        assert!(text.contains("// Interpreted binary block data:\n/*\nHeader: V1 2\nRaw: 0\n*/"));
    }

    #[test]
    fn test_source_image_has_path_only() {
        let palette = sample_palette(Provenance::None, PaletteFormat::Png);
        let text = emit_source(&[0, 0], &palette, Path::new("colors.png"));
        assert!(text.ends_with("// Source file:\n// colors.png\n"));
        assert!(!text.contains("/*"));
    }

    #[test]
    fn test_wraps_long_arrays() {
        let palette = sample_palette(Provenance::None, PaletteFormat::Png);
        let packed = vec![0u32; 16];
        let text = emit_source(&packed, &palette, Path::new("p.png"));
        let rows = text.lines().filter(|l| l.starts_with("    0x")).count();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_embedded_text_cannot_close_comment() {
        let palette = sample_palette(
            Provenance::Text("GIMP Palette\n# sneaky */ comment\n".into()),
            PaletteFormat::Gpl,
        );
        let text = emit_source(&[0, 0], &palette, Path::new("a.gpl"));
        assert!(text.contains("# sneaky * / comment"));
        assert_eq!(text.matches("*/").count(), 1);
    }
}

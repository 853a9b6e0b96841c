//! Source format detection from an explicit type or the file extension

use std::path::Path;

use crate::error::PaletteError;
use crate::palette::PaletteFormat;

/// Placeholder type name meaning "no override"
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Pick the decoder for `path`.
///
/// An explicit type wins and is used as-is; otherwise the extension decides.
/// File contents are never inspected here.
pub fn detect_format(path: &Path, explicit: Option<&str>) -> Result<PaletteFormat, PaletteError> {
    let detected = match explicit.filter(|t| !t.eq_ignore_ascii_case(UNKNOWN_TYPE)) {
        Some(tag) => PaletteFormat::from_tag(tag.trim()),
        None => path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.trim_matches(|c| matches!(c, ',' | '.' | '-' | '_')))
            .and_then(PaletteFormat::from_tag),
    };

    detected.ok_or_else(|| PaletteError::Detection {
        path: path.to_path_buf(),
    })
}

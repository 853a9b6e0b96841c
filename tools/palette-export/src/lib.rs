//! palette-export library
//!
//! Manifest-driven batch conversion on top of `naomi-palette`, shared by the
//! `palette-export` binary and its tests.

pub mod manifest;

pub use manifest::{Manifest, OutputConfig, PaletteEntry, build_all, check_all, load_manifest};

/// Manifest file name used when none is given
pub const DEFAULT_MANIFEST: &str = "palettes.toml";

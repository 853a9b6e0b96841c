//! Manifest parsing and build orchestration
//!
//! Parses palettes.toml and converts every listed palette in one go.

use anyhow::{Context, Result};
use naomi_palette::{
    ConvertOptions, DecodeOptions, OutputKind, Palette, PixelMode, convert_file, load_palette,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    /// Keyed by output name; iteration is in name order
    #[serde(default)]
    pub palettes: BTreeMap<String, PaletteEntry>,
}

/// Output directory and defaults shared by every entry
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub raw: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            mode: default_mode(),
            raw: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("palettes/")
}

fn default_mode() -> String {
    PixelMode::Rgba1555.name().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PaletteEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        /// Transparent palette slot
        #[serde(default)]
        alpha: Option<i64>,
        #[serde(default)]
        mode: Option<String>,
        #[serde(default)]
        raw: Option<bool>,
        /// Source type, overriding the extension
        #[serde(default, rename = "type")]
        format: Option<String>,
        #[serde(default)]
        force: bool,
    },
}

impl PaletteEntry {
    pub fn path(&self) -> &Path {
        match self {
            PaletteEntry::Simple(p) => p,
            PaletteEntry::Detailed { path, .. } => path,
        }
    }

    /// Conversion settings for this entry, falling back to `defaults`
    pub fn options(&self, defaults: &OutputConfig) -> Result<ConvertOptions> {
        let (alpha, mode, raw, format, force) = match self {
            PaletteEntry::Simple(_) => (None, None, None, None, false),
            PaletteEntry::Detailed {
                alpha,
                mode,
                raw,
                format,
                force,
                ..
            } => (*alpha, mode.as_deref(), *raw, format.clone(), *force),
        };

        let mode: PixelMode = mode
            .unwrap_or(&defaults.mode)
            .parse()
            .with_context(|| format!("Invalid pixel mode for {:?}", self.path()))?;

        let mut options = ConvertOptions::new(mode);
        options.format_override = format;
        options.decode = DecodeOptions {
            transparent_index: alpha.unwrap_or(0),
            force,
        };
        options.output = if raw.unwrap_or(defaults.raw) {
            OutputKind::Raw
        } else {
            OutputKind::Source
        };
        Ok(options)
    }
}

/// Output path for an entry: `<dir>/<name>.bin` or `<dir>/<name>.c`
pub fn output_path(dir: &Path, name: &str, kind: OutputKind) -> PathBuf {
    dir.join(format!("{}.{}", name, kind.extension()))
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Validate a manifest without building: sources exist, settings parse
pub fn validate(manifest: &Manifest) -> Result<()> {
    manifest
        .output
        .mode
        .parse::<PixelMode>()
        .context("Invalid default pixel mode in [output]")?;

    for (name, entry) in &manifest.palettes {
        if !entry.path().exists() {
            anyhow::bail!("Palette '{}' source not found: {:?}", name, entry.path());
        }
        entry
            .options(&manifest.output)
            .with_context(|| format!("Palette '{}'", name))?;
    }
    Ok(())
}

/// Decode and validate every entry without writing anything
pub fn check_all(manifest: &Manifest) -> Result<Vec<(String, Palette)>> {
    validate(manifest)?;

    let mut palettes = Vec::with_capacity(manifest.palettes.len());
    for (name, entry) in &manifest.palettes {
        let options = entry.options(&manifest.output)?;
        let palette = load_palette(
            entry.path(),
            options.format_override.as_deref(),
            &options.decode,
        )
        .with_context(|| format!("Palette '{}' failed to load from {:?}", name, entry.path()))?;

        tracing::info!("{}: {} {} colors", name, palette.format, palette.len());
        palettes.push((name.clone(), palette));
    }
    Ok(palettes)
}

/// Build all palettes from a manifest, returning the written files
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    validate(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut written = Vec::with_capacity(manifest.palettes.len());
    for (name, entry) in &manifest.palettes {
        let options = entry.options(&manifest.output)?;
        let output = output_path(output_dir, name, options.output);
        tracing::info!("Converting palette: {} -> {:?}", name, output);

        convert_file(entry.path(), &output, &options)
            .with_context(|| format!("Palette '{}' failed to convert", name))?;
        written.push(output);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use naomi_palette::PaletteFormat;
    use std::fmt::Write;

    fn gpl_text(count: usize) -> String {
        let mut text = String::from("GIMP Palette\nName: Manifest\n#\n");
        for i in 0..count {
            let _ = writeln!(text, "{} {} {}", i % 256, 0, 255 - (i % 256));
        }
        text
    }

    fn manifest_in(dir: &Path, palettes: &str) -> Manifest {
        let toml_text = format!(
            "[output]\ndir = '{}'\n\n[palettes]\n{}",
            dir.join("out").display(),
            palettes
        );
        toml::from_str(&toml_text).expect("manifest should parse")
    }

    #[test]
    fn test_defaults() {
        let manifest: Manifest = toml::from_str("").unwrap();
        assert_eq!(manifest.output.dir, PathBuf::from("palettes/"));
        assert_eq!(manifest.output.mode, "RGBA1555");
        assert!(!manifest.output.raw);
        assert!(manifest.palettes.is_empty());
    }

    #[test]
    fn test_entry_forms() {
        let manifest: Manifest = toml::from_str(
            r#"
            [output]
            mode = "RGBA8888"
            raw = true

            [palettes]
            title = "art/title.gpl"
            font = { path = "art/font.bin", alpha = -1, mode = "rgba1555", raw = false, type = "aco", force = true }
            "#,
        )
        .unwrap();

        let title = manifest.palettes["title"].options(&manifest.output).unwrap();
        assert_eq!(title.mode, PixelMode::Rgba8888);
        assert_eq!(title.output, OutputKind::Raw);
        assert_eq!(title.decode, DecodeOptions::default());
        assert_eq!(title.format_override, None);

        let font = &manifest.palettes["font"];
        assert_eq!(font.path(), Path::new("art/font.bin"));
        let font = font.options(&manifest.output).unwrap();
        assert_eq!(font.mode, PixelMode::Rgba1555);
        assert_eq!(font.output, OutputKind::Source);
        assert_eq!(font.decode.transparent_index, -1);
        assert!(font.decode.force);
        assert_eq!(font.format_override.as_deref(), Some("aco"));
    }

    #[test]
    fn test_output_path() {
        let dir = Path::new("build");
        assert_eq!(output_path(dir, "title", OutputKind::Raw), dir.join("title.bin"));
        assert_eq!(output_path(dir, "title", OutputKind::Source), dir.join("title.c"));
    }

    #[test]
    fn test_validate_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.gpl");
        let manifest = manifest_in(dir.path(), &format!("gone = '{}'\n", missing.display()));

        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_validate_bad_mode() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.gpl");
        std::fs::write(&source, gpl_text(16)).unwrap();
        let manifest = manifest_in(
            dir.path(),
            &format!("a = {{ path = '{}', mode = 'RGB565' }}\n", source.display()),
        );

        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_build_all_writes_each_entry() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.gpl");
        let large = dir.path().join("large.gpl");
        std::fs::write(&small, gpl_text(16)).unwrap();
        std::fs::write(&large, gpl_text(256)).unwrap();

        let manifest = manifest_in(
            dir.path(),
            &format!(
                "small = '{}'\nlarge = {{ path = '{}', raw = true, mode = 'RGBA8888' }}\n",
                small.display(),
                large.display()
            ),
        );

        let written = build_all(&manifest, None).unwrap();
        let out = dir.path().join("out");
        // Name order
        assert_eq!(written, vec![out.join("large.bin"), out.join("small.c")]);
        assert_eq!(std::fs::read(out.join("large.bin")).unwrap().len(), 256 * 4);

        let source = std::fs::read_to_string(out.join("small.c")).unwrap();
        assert!(source.contains("uint32_t __small_gpl_palette[16]"));
    }

    #[test]
    fn test_build_all_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("p.gpl");
        std::fs::write(&source, gpl_text(16)).unwrap();
        let manifest = manifest_in(dir.path(), &format!("p = '{}'\n", source.display()));

        let elsewhere = dir.path().join("elsewhere");
        let written = build_all(&manifest, Some(&elsewhere)).unwrap();
        assert_eq!(written, vec![elsewhere.join("p.c")]);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_build_stops_at_failing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("a.gpl");
        let good = dir.path().join("b.gpl");
        std::fs::write(&bad, gpl_text(20)).unwrap();
        std::fs::write(&good, gpl_text(16)).unwrap();
        let manifest = manifest_in(
            dir.path(),
            &format!("a = '{}'\nb = '{}'\n", bad.display(), good.display()),
        );

        let err = build_all(&manifest, None).unwrap_err();
        assert!(format!("{:#}", err).contains("20 colors"));
        let out = dir.path().join("out");
        assert!(!out.join("a.c").exists());
        assert!(!out.join("b.c").exists());
    }

    #[test]
    fn test_check_all() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("colors.txt");
        std::fs::write(&source, gpl_text(16)).unwrap();
        let manifest = manifest_in(
            dir.path(),
            &format!("colors = {{ path = '{}', type = 'gpl' }}\n", source.display()),
        );

        let palettes = check_all(&manifest).unwrap();
        assert_eq!(palettes.len(), 1);
        assert_eq!(palettes[0].0, "colors");
        assert_eq!(palettes[0].1.format, PaletteFormat::Gpl);
        assert_eq!(palettes[0].1.name.as_deref(), Some("Manifest"));
        assert!(!dir.path().join("out").exists());
    }
}

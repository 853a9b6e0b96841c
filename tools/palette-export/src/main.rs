//! palette-export - NAOMI palette export tool
//!
//! Converts GIMP, JASC, Paint.NET, PNG, ASE and ACO palettes into TA palette
//! RAM data, either as raw little-endian words or as C source.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use naomi_palette::{
    ConvertOptions, DecodeOptions, OutputKind, PixelMode, UNKNOWN_TYPE, convert_file,
    load_palette, pack_palette,
};
use std::path::PathBuf;

use palette_export::{DEFAULT_MANIFEST, manifest};

#[derive(Parser)]
#[command(name = "palette-export")]
#[command(about = "NAOMI palette export tool")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single palette file
    Convert {
        /// Output file
        output: PathBuf,

        /// Input palette (.gpl, .pal, .txt, .png, .ase, .aco)
        palette: PathBuf,

        /// Pixel mode (RGBA1555 or RGBA8888)
        #[arg(short, long)]
        mode: String,

        /// Write raw palette RAM words instead of C source
        #[arg(short, long)]
        raw: bool,

        /// Source type, overriding the file extension
        #[arg(short = 't', long = "type", default_value = UNKNOWN_TYPE)]
        format: String,

        /// Skip header and color count checks
        #[arg(short, long)]
        force: bool,

        /// Palette slot made transparent (negative for none)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        alpha: i64,
    },

    /// Decode a palette and print its colors
    Info {
        /// Input palette
        palette: PathBuf,

        /// Source type, overriding the file extension
        #[arg(short = 't', long = "type", default_value = UNKNOWN_TYPE)]
        format: String,

        /// Skip header and color count checks
        #[arg(short, long)]
        force: bool,

        /// Palette slot made transparent (negative for none)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        alpha: i64,

        /// Also print packed values in this pixel mode
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Build palettes from a manifest file
    Build {
        /// Path to palettes.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest and decode every palette without writing
    Check {
        /// Path to palettes.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            output,
            palette,
            mode,
            raw,
            format,
            force,
            alpha,
        } => {
            let mode: PixelMode = mode.parse()?;
            let mut options = ConvertOptions::new(mode);
            options.format_override = Some(format);
            options.decode = DecodeOptions {
                transparent_index: alpha,
                force,
            };
            if raw {
                options.output = OutputKind::Raw;
            }

            tracing::info!("Converting {:?} -> {:?}", palette, output);
            convert_file(&palette, &output, &options)
                .with_context(|| format!("Failed to convert {:?}", palette))?;
            tracing::info!("Done!");
        }

        Commands::Info {
            palette,
            format,
            force,
            alpha,
            mode,
        } => {
            let decode = DecodeOptions {
                transparent_index: alpha,
                force,
            };
            let decoded = load_palette(&palette, Some(format.as_str()), &decode)
                .with_context(|| format!("Failed to load {:?}", palette))?;
            print!("{}", decoded);

            if let Some(mode) = mode {
                let mode: PixelMode = mode.parse()?;
                println!("Packed ({}):", mode);
                for (i, value) in pack_palette(&decoded, mode).iter().enumerate() {
                    println!("{:3}: 0x{:08X}", i, value);
                }
            }
        }

        Commands::Build { manifest, output } => {
            tracing::debug!("Building palettes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let written = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} palettes written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let palettes = manifest::check_all(&config)?;
            tracing::info!("Manifest is valid! {} palettes", palettes.len());
        }
    }

    Ok(())
}

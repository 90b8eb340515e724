//! Command line arguments.
//!
//! Parsed with clap, which provides `--help`, `--version` and validation of
//! the positional arguments.

use std::path::PathBuf;

use clap::Parser;
use glbpack_core::PackOptions;

/// glbpack command line arguments.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "glbpack",
    about = "Pack a mesh and its texture maps into one binary glTF file",
    long_about = "Packs <BASE_NAME>.glb and the <BASE_NAME>*.png texture maps found in \
        <INPUT_FOLDER> into a single self-contained <OUTPUT_FOLDER>/<BASE_NAME>.glb.\n\n\
        TEXTURE MAPS:\n\
        Maps are recognised by a keyword in the file name:\n\
        \n\
        • Color, Normal, AmbientOcclusion: embedded as-is.\n\
        \n\
        • Roughness, Metalness: both required; packed into one metallic-roughness texture.\n\
        \n\
        EXAMPLES:\n\
          # Write ./Crate.glb\n\
          glbpack Crate assets/crate\n\
        \n\
          # Write to another folder and reject unrecognised PNG files\n\
          glbpack Crate assets/crate out --strict",
    version
)]
pub struct CliArgs {
    /// Asset base name; selects <BASE_NAME>.glb and <BASE_NAME>*.png.
    pub base_name: String,

    /// Folder holding the source mesh and texture maps.
    pub input_folder: PathBuf,

    /// Folder to write the packed asset to.
    #[arg(default_value = ".")]
    pub output_folder: PathBuf,

    /// Fail on PNG files whose name matches no known map keyword.
    #[arg(long)]
    pub strict: bool,

    /// Skip reloading the packed asset before it is written.
    #[arg(long)]
    pub no_verify: bool,
}

impl From<CliArgs> for PackOptions {
    fn from(args: CliArgs) -> Self {
        if args.no_verify {
            log::warn!("Round-trip verification disabled");
        }

        PackOptions::new(args.base_name, args.input_folder)
            .with_output_dir(args.output_folder)
            .with_strict(args.strict)
            .with_verify(!args.no_verify)
    }
}

//! texel - inspect, convert and round-trip texel images
//!
//! Thin front end over `texel-io`: every command loads through the codec
//! layer, so the same fidelity rules apply as in library use.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about = "Inspect, convert and round-trip texel images")]
#[command(long_about = "
Reads and writes EXR, PFM and PNG through the texel image store.
EXR and PFM keep float samples bit-exact; PNG stores sRGB-encoded bytes.

Examples:
  texel info render.exr                  # Show resolution, format, averages
  texel convert render.exr preview.png   # Quantize to sRGB bytes
  texel convert in.png out.exr -f rgbhalf -c piz
  texel roundtrip render.pfm -e exr      # Check a container keeps the data
  texel srgb --samples 100000            # Report fast sRGB encoder error
  texel -vv --log-file texel.log info a.exr
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert between containers and pixel formats
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Write an image through a container and compare what comes back
    #[command(visible_alias = "rt")]
    Roundtrip(RoundtripArgs),

    /// Report accuracy of the table-driven sRGB encoder
    Srgb(SrgbArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Print per-channel min/max as well as averages
    #[arg(short, long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (container chosen by extension)
    pub output: PathBuf,

    /// Pixel format to store before writing (y8, rgb8, yhalf, rgbhalf, y32, rgb32)
    #[arg(short, long)]
    pub format: Option<String>,

    /// EXR compression (none, rle, zip, piz)
    #[arg(short, long)]
    pub compression: Option<String>,

    /// Flip rows before writing
    #[arg(long)]
    pub flip: bool,
}

#[derive(Args)]
pub struct RoundtripArgs {
    /// Input image
    pub input: PathBuf,

    /// Container to round-trip through (exr, pfm, png)
    #[arg(short, long, default_value = "exr")]
    pub ext: String,

    /// Keep the intermediate file at this path
    #[arg(short, long)]
    pub keep: Option<PathBuf>,
}

#[derive(Args)]
pub struct SrgbArgs {
    /// Number of evenly spaced inputs to measure
    #[arg(short, long, default_value = "100000")]
    pub samples: usize,

    /// Lower end of the measured range
    #[arg(long, default_value = "0.0")]
    pub lo: f64,

    /// Upper end of the measured range
    #[arg(long, default_value = "1.0")]
    pub hi: f64,

    /// Print every table segment
    #[arg(long)]
    pub table: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Roundtrip(args) => commands::roundtrip::run(args, cli.verbose),
        Commands::Srgb(args) => commands::srgb::run(args),
    }
}

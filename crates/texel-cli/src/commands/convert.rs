//! Format conversion command.
//!
//! Loads any supported container, optionally changes the stored pixel
//! format, and writes by output extension. EXR output can pick its
//! compression.

use crate::ConvertArgs;
use anyhow::{Context, Result, bail};
use texel_core::PixelFormat;
use texel_io::exr::{Compression, ExrWriter};
use texel_io::{Format, ImageWriter};
use tracing::{debug, info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let output_format = Format::from_extension(&args.output);
    let compression = args.compression.as_deref().map(parse_compression).transpose()?;
    if compression.is_some() && output_format != Format::Exr {
        bail!("--compression applies to EXR output only");
    }

    let mut image = super::load_image(&args.input)?;
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        output_format = ?output_format,
        "Converting image"
    );

    if let Some(ref name) = args.format {
        let target = parse_format(name)?;
        debug!(from = %image.format(), to = %target, "Converting pixel format");
        if verbose > 0 {
            println!("  Converting format: {} -> {}", image.format(), target);
        }
        image = image.convert_to_format(target)?;
    }

    if args.flip {
        image.flip_y();
    }

    match compression {
        Some(compression) => {
            let data = texel_io::image_to_data(&image, Format::Exr);
            ExrWriter::new()
                .with_compression(compression)
                .write(&args.output, &data)
                .with_context(|| format!("Failed to save: {}", args.output.display()))?;
        }
        None => super::save_image(&args.output, &image)?,
    }

    if verbose > 0 {
        println!("Converted {} -> {}", args.input.display(), args.output.display());
    }
    Ok(())
}

fn parse_format(name: &str) -> Result<PixelFormat> {
    PixelFormat::from_name(name).with_context(|| {
        format!("Unknown pixel format: {name} (use y8, rgb8, yhalf, rgbhalf, y32, rgb32)")
    })
}

fn parse_compression(name: &str) -> Result<Compression> {
    Compression::from_name(name)
        .with_context(|| format!("Unknown compression: {name} (use none, rle, zip, piz)"))
}

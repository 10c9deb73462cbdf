//! Round-trip command.
//!
//! Encodes an image into a container in memory, decodes it again and
//! reports how far the result drifted. EXR and PFM should report an exact
//! match for float input.

use crate::RoundtripArgs;
use anyhow::{Context, Result, bail};
use texel_core::Image;
use texel_io::exr::ExrWriter;
use texel_io::pfm::PfmWriter;
use texel_io::png::PngWriter;
use texel_io::{Format, ImageWriter};
use tracing::{debug, info};

/// Outcome of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub format: Format,
    pub encoded_bytes: usize,
    pub stored_as: String,
    pub max_delta: f32,
}

impl Report {
    pub fn is_exact(&self) -> bool {
        self.max_delta == 0.0
    }
}

/// Runs the roundtrip command.
pub fn run(args: RoundtripArgs, verbose: u8) -> Result<()> {
    let format = Format::from_extension(format!("roundtrip.{}", args.ext));
    let image = super::load_image(&args.input)?;

    let (report, bytes) = roundtrip(&image, format)?;
    if let Some(ref keep) = args.keep {
        std::fs::write(keep, &bytes).with_context(|| format!("Failed to save: {}", keep.display()))?;
        debug!(path = %keep.display(), "kept intermediate file");
    }

    println!("{}", args.input.display());
    println!("  Container:  {:?}", report.format);
    println!("  Encoded:    {}", super::format_size(report.encoded_bytes as u64));
    println!("  Read back:  {}", report.stored_as);
    if report.is_exact() {
        println!("  Result:     exact");
    } else {
        println!("  Result:     max delta {:.6e}", report.max_delta);
    }
    if verbose > 0 {
        println!("  Source:     {}", image.format());
    }
    Ok(())
}

/// Encodes `image` as `format`, decodes it and compares.
pub fn roundtrip(image: &Image, format: Format) -> Result<(Report, Vec<u8>)> {
    let data = texel_io::image_to_data(image, format);
    let bytes = match format {
        Format::Exr => ExrWriter::new().write_to_memory(&data)?,
        Format::Pfm => PfmWriter::new().write_to_memory(&data)?,
        Format::Png => PngWriter::new().write_to_memory(&data)?,
        Format::Unknown => bail!("Unknown container; use exr, pfm or png"),
    };
    let back = texel_io::data_to_image(texel_io::read_from_memory(&bytes)?)?;
    let max_delta = super::max_rgb_delta(image, &back).context("Resolution changed in round trip")?;
    info!(format = ?format, bytes = bytes.len(), max_delta, "round trip done");

    let report = Report {
        format,
        encoded_bytes: bytes.len(),
        stored_as: back.format().to_string(),
        max_delta,
    };
    Ok((report, bytes))
}

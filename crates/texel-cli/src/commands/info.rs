//! Image info command.
//!
//! Prints resolution, stored pixel format and per-channel averages.

use crate::InfoArgs;
use anyhow::Result;
use std::fs;
use std::path::Path;
use texel_core::Image;
use texel_io::Format;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;

        print_text(&args, path, &image, file_size, format, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

fn print_text(args: &InfoArgs, path: &Path, image: &Image, file_size: u64, format: Format, verbose: u8) {
    let (width, height) = image.resolution();
    println!("{}", path.display());
    println!("  Resolution: {}x{}", width, height);
    println!("  Format:     {}", image.format());
    println!("  Channels:   {}", image.channel_count());
    println!("  Pixels:     {}", width as u64 * height as u64);
    println!("  File size:  {}", super::format_size(file_size));
    println!("  Container:  {:?}", format);

    println!("  Average:    {}", join(&image.channel_average()));

    if args.stats {
        let (min, max) = channel_range(image);
        println!("  Min:        {}", join(&min));
        println!("  Max:        {}", join(&max));
    }

    if verbose > 0 {
        println!("  Storage:    {}", image.samples().kind());
        println!("  Float:      {}", image.format().is_float());
    }
}

fn join(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{:.6}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-channel min and max of the linear samples. NaNs are skipped.
fn channel_range(image: &Image) -> (Vec<f32>, Vec<f32>) {
    let n = image.channel_count();
    let mut min = vec![f32::INFINITY; n];
    let mut max = vec![f32::NEG_INFINITY; n];
    for pixel in image.to_linear_f32().chunks_exact(n) {
        for (c, &v) in pixel.iter().enumerate() {
            min[c] = min[c].min(v);
            max[c] = max[c].max(v);
        }
    }
    if image.samples().is_empty() {
        return (vec![0.0; n], vec![0.0; n]);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::{PixelFormat, RgbSpectrum};

    #[test]
    fn test_channel_range() {
        let mut image = Image::new(PixelFormat::Rgb32, 2, 1);
        image.set_spectrum(0, 0, &RgbSpectrum::from_rgb([-1.5, 0.25, 3.0]));
        image.set_spectrum(1, 0, &RgbSpectrum::from_rgb([0.5, f32::NAN, 1.0]));
        let (min, max) = channel_range(&image);
        assert_eq!(min, vec![-1.5, 0.25, 1.0]);
        assert_eq!(max, vec![0.5, 0.25, 3.0]);
    }

    #[test]
    fn test_channel_range_empty() {
        let image = Image::new(PixelFormat::Y32, 0, 4);
        assert_eq!(channel_range(&image), (vec![0.0], vec![0.0]));
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[0.5, -1.0]), "0.500000 -1.000000");
    }
}

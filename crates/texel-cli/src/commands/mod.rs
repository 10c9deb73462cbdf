//! CLI command implementations

pub mod convert;
pub mod info;
pub mod roundtrip;
pub mod srgb;

use anyhow::{Context, Result};
use std::path::Path;
use texel_core::Image;
use texel_io::ImageFile;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    Image::try_read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    image
        .try_write(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Largest per-sample difference between two images of equal resolution,
/// compared as linear RGB. `None` if the resolutions differ.
///
/// A NaN on either side counts as a match only when both sides are NaN.
pub fn max_rgb_delta(a: &Image, b: &Image) -> Option<f32> {
    if a.resolution() != b.resolution() {
        return None;
    }
    let (width, height) = a.resolution();
    let mut max = 0.0f32;
    for y in 0..height {
        for x in 0..width {
            let pa = a.spectrum(x, y).to_rgb();
            let pb = b.spectrum(x, y).to_rgb();
            for (va, vb) in pa.iter().zip(pb.iter()) {
                let d = match (va.is_nan(), vb.is_nan()) {
                    (true, true) => 0.0,
                    (false, false) => (va - vb).abs(),
                    _ => f32::INFINITY,
                };
                max = max.max(d);
            }
        }
    }
    Some(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::{PixelFormat, RgbSpectrum};

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_max_rgb_delta() {
        let mut a = Image::new(PixelFormat::Rgb32, 2, 2);
        let b = a.clone();
        assert_eq!(max_rgb_delta(&a, &b), Some(0.0));

        a.set_spectrum(1, 1, &RgbSpectrum::from_rgb([0.0, 0.25, 0.0]));
        assert_eq!(max_rgb_delta(&a, &b), Some(0.25));

        a.set_channel(0, 0, 0, f32::NAN);
        assert_eq!(max_rgb_delta(&a, &b), Some(f32::INFINITY));

        let small = Image::new(PixelFormat::Rgb32, 1, 2);
        assert_eq!(max_rgb_delta(&a, &small), None);
    }

    #[test]
    fn test_grey_compares_against_rgb() {
        let mut grey = Image::new(PixelFormat::Y32, 1, 1);
        grey.set_channel(0, 0, 0, 0.5);
        let mut rgb = Image::new(PixelFormat::Rgb32, 1, 1);
        rgb.set_spectrum(0, 0, &RgbSpectrum::constant(0.5));
        assert_eq!(max_rgb_delta(&grey, &rgb), Some(0.0));
    }

    #[test]
    fn test_load_and_save_add_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pfm");
        let image = Image::new(PixelFormat::Y32, 3, 1);
        save_image(&path, &image).unwrap();
        assert_eq!(load_image(&path).unwrap(), image);

        let err = load_image(&dir.path().join("missing.exr")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load"));
        let err = save_image(&dir.path().join("missing/a.pfm"), &image).unwrap_err();
        assert!(err.to_string().starts_with("Failed to save"));
    }
}

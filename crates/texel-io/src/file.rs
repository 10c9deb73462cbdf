//! `write`/`read` on [`Image`].
//!
//! The `try_*` methods report errors; [`ImageFile::write`] and
//! [`ImageFile::read`] log them with `tracing::error!` and return
//! `false`/`None`.

use crate::{convert, Format, IoError, IoResult};
use std::path::Path;
use texel_core::Image;
use tracing::{debug, error};

/// File I/O for the image store.
///
/// # Example
///
/// ```rust,no_run
/// use texel_core::{Image, PixelFormat, RgbSpectrum};
/// use texel_io::ImageFile;
///
/// let mut image = Image::new(PixelFormat::Rgb32, 16, 29);
/// image.set_spectrum(0, 0, &RgbSpectrum::from_rgb([0.0, 0.0, -1.5]));
/// assert!(image.write("out.pfm"));
///
/// let back = Image::read("out.pfm").expect("readable");
/// assert_eq!(back.channel(0, 0, 2), -1.5);
/// ```
pub trait ImageFile: Sized {
    /// Writes to `path`, choosing the codec by extension.
    ///
    /// `.exr` and `.pfm` receive exact floats; any other extension receives
    /// sRGB bytes through the PNG codec.
    fn try_write<P: AsRef<Path>>(&self, path: P) -> IoResult<()>;

    /// Reads from `path`, detecting the codec by magic bytes then extension.
    fn try_read<P: AsRef<Path>>(path: P) -> IoResult<Self>;

    /// [`try_write`](Self::try_write), reporting success as a bool.
    fn write<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match self.try_write(path) {
            Ok(()) => true,
            Err(e) => {
                error!(path = %path.display(), "failed to write image: {e}");
                false
            }
        }
    }

    /// [`try_read`](Self::try_read), returning `None` on any failure.
    fn read<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match Self::try_read(path) {
            Ok(image) => Some(image),
            Err(e) => {
                error!(path = %path.display(), "failed to read image: {e}");
                None
            }
        }
    }
}

impl ImageFile for Image {
    fn try_write<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        let format = Format::for_output(path);
        if !format.is_enabled() {
            return Err(IoError::UnsupportedFormat(path.display().to_string()));
        }
        debug!(path = %path.display(), pixel_format = %self.format(), "writing image");
        let data = convert::image_to_data(self, format);
        crate::write_as(path, format, &data)
    }

    fn try_read<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let data = crate::read(path)?;
        convert::data_to_image(data)
    }
}

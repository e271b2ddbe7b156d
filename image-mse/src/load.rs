//! Decoding image files into [`SampleImage`] buffers.
//!
//! The decoder's native layout (grayscale, palette, 16-bit, alpha...) is
//! converted to one fixed [`ChannelLayout`] before any arithmetic, so two
//! files compare the same way regardless of how they were encoded.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, GenericImageView, ImageReader};
use tracing::{debug, warn};

use crate::buffer::SampleImage;
use crate::error::MseError;

/// Channel order and bit depth every image is converted to after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// 8-bit R,G,B. Grayscale is replicated, alpha is dropped.
    #[default]
    Rgb,
    /// 8-bit R,G,B,A. Opaque images get A = 255.
    Rgba,
    /// 8-bit single channel luma.
    Luma,
    /// The file's own channel count and sample depth, widened without
    /// rescaling (16-bit samples stay in `0..=65535`).
    Native,
}

impl ChannelLayout {
    /// All layouts, in CLI listing order.
    pub const ALL: [Self; 4] = [Self::Rgb, Self::Rgba, Self::Luma, Self::Native];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Luma => "luma",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| {
                format!("unknown channel layout '{s}' (expected rgb, rgba, luma or native)")
            })
    }
}

/// Decodes the file at `path` and converts it to `layout`.
///
/// The format is guessed from the file contents, falling back to the
/// extension. The file handle is closed before this returns.
///
/// # Errors
/// Returns [`MseError::Load`] naming `path` if the file can't be opened or
/// decoded.
pub fn load_image(path: impl AsRef<Path>, layout: ChannelLayout) -> Result<SampleImage, MseError> {
    let path = path.as_ref();
    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| MseError::load(path, e))?
        .decode()
        .map_err(|e| MseError::load(path, e))?;

    let (width, height) = decoded.dimensions();
    debug!(
        path = %path.display(),
        width,
        height,
        color = ?decoded.color(),
        "decoded image"
    );

    Ok(decode_image(&decoded, layout))
}

/// Converts an already decoded image to `layout`.
pub fn decode_image(img: &DynamicImage, layout: ChannelLayout) -> SampleImage {
    let (w, h) = img.dimensions();
    let (w, h) = (w as usize, h as usize);

    match layout {
        ChannelLayout::Rgb => SampleImage::from_raw(img.to_rgb8().as_raw(), w, h, 3),
        ChannelLayout::Rgba => SampleImage::from_raw(img.to_rgba8().as_raw(), w, h, 4),
        ChannelLayout::Luma => SampleImage::from_raw(img.to_luma8().as_raw(), w, h, 1),
        ChannelLayout::Native => decode_native(img, w, h),
    }
}

fn decode_native(img: &DynamicImage, w: usize, h: usize) -> SampleImage {
    match img {
        DynamicImage::ImageLuma8(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 1),
        DynamicImage::ImageLumaA8(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 2),
        DynamicImage::ImageRgb8(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 3),
        DynamicImage::ImageRgba8(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 4),
        DynamicImage::ImageLuma16(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 1),
        DynamicImage::ImageLumaA16(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 2),
        DynamicImage::ImageRgb16(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 3),
        DynamicImage::ImageRgba16(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 4),
        DynamicImage::ImageRgb32F(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 3),
        DynamicImage::ImageRgba32F(buf) => SampleImage::from_raw(buf.as_raw(), w, h, 4),
        other => {
            warn!(color = ?other.color(), "no native mapping for color type, using rgba");
            SampleImage::from_raw(other.to_rgba8().as_raw(), w, h, 4)
        }
    }
}

//! Sample buffer type for image-mse.
//!
//! A [`SampleImage`] is a height x width x channels array of `f32` samples,
//! stored row-major with channels interleaved. Integer samples are widened
//! to `f32` on construction so squaring never wraps.

use std::fmt;

use imgref::ImgRef;
use rgb::{RGB8, RGBA8};

use crate::error::MseError;

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// Width, height and channel count of a [`SampleImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Samples per pixel.
    pub channels: usize,
}

impl Shape {
    /// Creates a shape from its three dimensions.
    #[must_use]
    pub const fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Total number of samples, or `None` if it doesn't fit in `usize`.
    #[must_use]
    pub const fn sample_count(&self) -> Option<usize> {
        match self.width.checked_mul(self.height) {
            Some(pixels) => pixels.checked_mul(self.channels),
            None => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Interleaved floating point image.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleImage {
    data: Vec<f32>,
    shape: Shape,
}

impl SampleImage {
    /// Creates an image from interleaved samples.
    ///
    /// # Errors
    /// Returns an error if `channels` is not in `1..=4`, if
    /// `width * height * channels` overflows, or if the data length isn't
    /// that product.
    pub fn from_vec(
        data: Vec<f32>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, MseError> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(MseError::UnsupportedChannels(channels));
        }
        let shape = Shape::new(width, height, channels);
        let expected = shape
            .sample_count()
            .ok_or(MseError::SampleCountOverflow(shape))?;
        if data.len() != expected {
            return Err(MseError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Widens raw decoder samples. The caller guarantees the length.
    pub(crate) fn from_raw<T>(raw: &[T], width: usize, height: usize, channels: usize) -> Self
    where
        T: Copy,
        f32: From<T>,
    {
        debug_assert_eq!(raw.len(), width * height * channels);
        Self {
            data: raw.iter().map(|&v| f32::from(v)).collect(),
            shape: Shape::new(width, height, channels),
        }
    }

    /// Single-channel image from 8-bit samples.
    pub fn from_luma8(img: ImgRef<'_, u8>) -> Self {
        let data = img.rows().flatten().map(|&v| f32::from(v)).collect();
        Self {
            data,
            shape: Shape::new(img.width(), img.height(), 1),
        }
    }

    /// Three-channel image in R,G,B order.
    pub fn from_rgb8(img: ImgRef<'_, RGB8>) -> Self {
        let data = img
            .rows()
            .flatten()
            .flat_map(|px| [px.r, px.g, px.b])
            .map(f32::from)
            .collect();
        Self {
            data,
            shape: Shape::new(img.width(), img.height(), 3),
        }
    }

    /// Four-channel image in R,G,B,A order.
    pub fn from_rgba8(img: ImgRef<'_, RGBA8>) -> Self {
        let data = img
            .rows()
            .flatten()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .map(f32::from)
            .collect();
        Self {
            data,
            shape: Shape::new(img.width(), img.height(), 4),
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Samples per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.shape.channels
    }

    /// Width, height and channel count together.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// All samples, row-major, channels interleaved.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Number of samples (not pixels).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the image holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at pixel `(x, y)`, channel `c`.
    ///
    /// # Panics
    /// Panics if any coordinate is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> f32 {
        assert!(
            x < self.shape.width && y < self.shape.height && c < self.shape.channels,
            "sample ({x}, {y}, {c}) out of bounds for {}",
            self.shape
        );
        self.data[(y * self.shape.width + x) * self.shape.channels + c]
    }
}

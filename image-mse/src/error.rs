//! Error types for image-mse operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::buffer::Shape;

/// Error type for loading images and computing the metric.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MseError {
    /// A path could not be opened or decoded as an image.
    #[error("failed to load '{}': {source}", .path.display())]
    Load {
        /// The offending path, as given by the caller.
        path: PathBuf,
        /// Why loading failed.
        source: LoadErrorKind,
    },

    /// The two images differ in width, height or channel count.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Shape of the first image.
        left: Shape,
        /// Shape of the second image.
        right: Shape,
    },

    /// The images contain no samples, so the mean is undefined.
    #[error("image contains no samples")]
    EmptyImage,

    /// Channel count outside `1..=4`.
    #[error("unsupported channel count: {0} (expected 1 to 4)")]
    UnsupportedChannels(usize),

    /// `width * height * channels` doesn't fit in `usize`.
    #[error("sample count of {0} overflows usize")]
    SampleCountOverflow(Shape),

    /// A NaN or infinite sample made the mean undefined.
    #[error("image contains non-finite samples (NaN or infinity)")]
    NonFiniteSample,

    /// Sample buffer length doesn't match `width * height * channels`.
    #[error("buffer size {actual} doesn't match expected size {expected}")]
    BufferSize {
        /// Expected number of samples.
        expected: usize,
        /// Number of samples provided.
        actual: usize,
    },
}

/// Underlying cause of [`MseError::Load`].
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    /// The file is missing or unreadable.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The bytes are not a supported or well-formed image.
    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

impl MseError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: impl Into<LoadErrorKind>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }
}

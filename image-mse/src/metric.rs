//! The mean squared error metric.

use std::path::Path;

use tracing::debug;

use crate::buffer::{SampleImage, Shape};
use crate::error::MseError;
use crate::load::{load_image, ChannelLayout};

/// Result of comparing two image files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Mean of the squared per-sample differences.
    pub error: f64,
    /// Shape shared by both images.
    pub shape: Shape,
}

/// Computes the mean squared error between two images of identical shape.
///
/// Every sample of every pixel and channel is pooled: the result is
/// `sum((a - b)^2) / (width * height * channels)`. Samples are widened to
/// `f64` before subtracting, so finite inputs always give a finite result.
///
/// # Errors
/// - [`MseError::DimensionMismatch`] if width, height or channel count differ
/// - [`MseError::EmptyImage`] if the images have no samples
/// - [`MseError::NonFiniteSample`] if either image holds NaN or infinity
///
/// # Example
/// ```rust
/// use image_mse::{mean_squared_error, SampleImage};
///
/// let a = SampleImage::from_vec(vec![10.0, 20.0, 30.0, 40.0], 2, 2, 1)?;
/// assert_eq!(mean_squared_error(&a, &a)?, 0.0);
/// # Ok::<(), image_mse::MseError>(())
/// ```
pub fn mean_squared_error(a: &SampleImage, b: &SampleImage) -> Result<f64, MseError> {
    let (left, right) = (a.shape(), b.shape());
    if left != right {
        return Err(MseError::DimensionMismatch { left, right });
    }
    if a.is_empty() {
        return Err(MseError::EmptyImage);
    }

    let sum: f64 = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();

    // Only a NaN or infinite sample can make the f64 sum non-finite
    if !sum.is_finite() {
        return Err(MseError::NonFiniteSample);
    }

    Ok(sum / a.len() as f64)
}

/// Loads both files with the same `layout` and compares them.
///
/// # Errors
/// Returns the first load failure (naming its path), or any error from
/// [`mean_squared_error`].
pub fn compare_files(
    path_a: impl AsRef<Path>,
    path_b: impl AsRef<Path>,
    layout: ChannelLayout,
) -> Result<Comparison, MseError> {
    let a = load_image(path_a, layout)?;
    let b = load_image(path_b, layout)?;

    let error = mean_squared_error(&a, &b)?;
    debug!(shape = %a.shape(), %layout, error, "computed mean squared error");

    Ok(Comparison {
        error,
        shape: a.shape(),
    })
}

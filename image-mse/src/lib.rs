//! # image-mse
//!
//! Mean squared error (MSE) between two raster images.
//!
//! Both images are decoded to a fixed channel layout, every sample is widened
//! to `f32`, and the result is the arithmetic mean of the squared per-sample
//! differences. All pixels and all channels are pooled into one scalar; there
//! is no per-channel breakdown.
//!
//! ## Example
//!
//! ```rust
//! use image_mse::{mean_squared_error, Img, SampleImage};
//!
//! let a = SampleImage::from_luma8(Img::new(vec![0u8, 0, 0, 0], 2, 2).as_ref());
//! let b = SampleImage::from_luma8(Img::new(vec![2u8, 2, 2, 2], 2, 2).as_ref());
//!
//! let error = mean_squared_error(&a, &b)?;
//! assert_eq!(error, 4.0);
//! # Ok::<(), image_mse::MseError>(())
//! ```
//!
//! Comparing files on disk:
//!
//! ```rust,no_run
//! use image_mse::{compare_files, ChannelLayout};
//!
//! let comparison = compare_files("a.png", "b.png", ChannelLayout::Rgb)?;
//! println!("Mean Squared Error: {:?}", comparison.error);
//! # Ok::<(), image_mse::MseError>(())
//! ```
//!
//! ## Decode contract
//!
//! By default every file is converted to 8-bit R,G,B (see [`ChannelLayout`]),
//! so a grayscale PNG and its RGB twin compare as equal and results do not
//! depend on the decoder's native channel order.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]

mod buffer;
mod error;
mod load;
mod metric;

pub use crate::buffer::{SampleImage, Shape, MAX_CHANNELS};
pub use crate::error::{LoadErrorKind, MseError};
pub use crate::load::{decode_image, load_image, ChannelLayout};
pub use crate::metric::{compare_files, mean_squared_error, Comparison};

// Re-export imgref and rgb types for convenience
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{RGB8, RGBA8};

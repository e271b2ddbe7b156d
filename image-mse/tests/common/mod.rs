//! Shared image generators for image-mse tests.
//!
//! Images are produced by an LCG PRNG so inputs are identical on every
//! platform.

#![allow(dead_code)]

use image_mse::SampleImage;

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) & 0xFF) as u8
    }
}

/// Random 8-bit samples widened to f32.
pub fn gen_noise(seed: u64, width: usize, height: usize, channels: usize) -> SampleImage {
    let mut rng = Lcg::new(seed);
    let data = (0..width * height * channels)
        .map(|_| f32::from(rng.next_u8()))
        .collect();
    SampleImage::from_vec(data, width, height, channels).unwrap()
}

/// Every sample of `img` shifted by `offset`, with no clamping.
pub fn shifted(img: &SampleImage, offset: f32) -> SampleImage {
    let data = img.samples().iter().map(|v| v + offset).collect();
    SampleImage::from_vec(data, img.width(), img.height(), img.channels()).unwrap()
}

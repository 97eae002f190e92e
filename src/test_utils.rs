//! Test utilities for piv-filters
//!
//! Raster fixtures shared by the unit tests. Only compiled for tests.

use crate::Image;
use image::Luma;

/// Creates an image with every sample set to `value`.
pub fn constant_image(width: u32, height: u32, value: f32) -> Image<Luma<f32>> {
    Image::from_pixel(width, height, Luma([value]))
}

/// Creates a linear ramp in `[0, 1]` rising along both axes.
pub fn gradient_image(width: u32, height: u32) -> Image<Luma<f32>> {
    let span = (width + height).saturating_sub(2).max(1) as f32;
    Image::from_fn(width, height, |x, y| Luma([(x + y) as f32 / span]))
}

/// Creates a deterministic particle-like pattern in `[0, 1]`.
///
/// Samples come from a small linear congruential generator seeded with
/// `seed`, so the same arguments always give the same image.
pub fn speckle_image(width: u32, height: u32, seed: u32) -> Image<Luma<f32>> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    Image::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        Luma([(state >> 8) as f32 / (1u32 << 24) as f32])
    })
}

/// Checks `predicate` on every sample at least `margin` pixels from each edge.
pub fn interior_all<F>(image: &Image<Luma<f32>>, margin: u32, predicate: F) -> bool
where
    F: Fn(f32) -> bool,
{
    let (width, height) = image.dimensions();
    (margin..height.saturating_sub(margin)).all(|y| {
        (margin..width.saturating_sub(margin)).all(|x| predicate(image.get_pixel(x, y)[0]))
    })
}

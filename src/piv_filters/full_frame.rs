//! Full-frame filtering through reflect padding.
//!
//! The convolution filters only write pixels at least `kernel_size / 2`
//! from every edge. The wrappers here mirror the image outward by that
//! margin first, so every pixel of the original frame becomes interior, and
//! crop the margin off the result. Inputs brighter than `1.0` are scaled into
//! `[0, 1]` by their maximum for the duration of the filter and scaled back
//! afterwards.

use crate::error::{FilterError, FilterResult};
use crate::piv_filters::kernel::validate_kernel_size;
use crate::piv_filters::params::{HighpassParams, LowpassParams, VarianceNormParams};
use crate::piv_filters::spatial_filter::SpatialFilterExt;
use crate::utils::validate_non_empty_image;
use crate::Image;
use image::{imageops, Luma};

/// Mirrors `image` outward by `pad` pixels on every side.
///
/// The edge sample itself is not repeated: with `pad = 2`, a row
/// `[a, b, c, d]` becomes `[c, b, a, b, c, d, c, b]`. Margins wider than the
/// image keep reflecting back and forth.
///
/// # Errors
///
/// * `FilterError::PaddingTooLarge` - If a padded dimension overflows `u32`
pub fn reflect_pad(image: &Image<Luma<f32>>, pad: u32) -> FilterResult<Image<Luma<f32>>> {
    let (width, height) = image.dimensions();
    let grow = |len: u32| pad.checked_mul(2).and_then(|margin| len.checked_add(margin));
    let (Some(padded_width), Some(padded_height)) = (grow(width), grow(height)) else {
        return Err(FilterError::PaddingTooLarge { width, height, pad });
    };
    let offset = i64::from(pad);

    Ok(Image::from_fn(padded_width, padded_height, |x, y| {
        let sx = reflect_index(i64::from(x) - offset, width);
        let sy = reflect_index(i64::from(y) - offset, height);
        *image.get_pixel(sx, sy)
    }))
}

/// Removes a `pad`-pixel margin from every side.
///
/// Returns an empty image if the margin is wider than half the image.
pub fn crop_border(image: &Image<Luma<f32>>, pad: u32) -> Image<Luma<f32>> {
    let (width, height) = image.dimensions();
    let margin = pad.saturating_mul(2);
    let inner_width = width.saturating_sub(margin);
    let inner_height = height.saturating_sub(margin);
    if inner_width == 0 || inner_height == 0 {
        return Image::new(0, 0);
    }
    imageops::crop_imm(image, pad, pad, inner_width, inner_height).to_image()
}

fn reflect_index(index: i64, len: u32) -> u32 {
    if len <= 1 {
        return 0;
    }
    let len = i64::from(len);
    let period = 2 * (len - 1);
    let folded = index.rem_euclid(period);
    let reflected = if folded >= len { period - folded } else { folded };
    reflected as u32
}

/// Filters that cover the whole frame, border included
pub trait FullFrameFilterExt {
    /// [`SpatialFilterExt::lowpass`] on the reflect-padded frame
    fn lowpass_full_frame(&self, params: &LowpassParams) -> FilterResult<Image<Luma<f32>>>;

    /// [`SpatialFilterExt::highpass`] on the reflect-padded frame
    fn highpass_full_frame(&self, params: &HighpassParams) -> FilterResult<Image<Luma<f32>>>;

    /// [`SpatialFilterExt::local_variance_normalization`] on the reflect-padded frame
    fn local_variance_normalization_full_frame(
        &self,
        params: &VarianceNormParams,
    ) -> FilterResult<Image<Luma<f32>>>;
}

impl FullFrameFilterExt for Image<Luma<f32>> {
    fn lowpass_full_frame(&self, params: &LowpassParams) -> FilterResult<Image<Luma<f32>>> {
        with_reflect_padding(self, params.kernel_size, |padded| padded.lowpass(params))
    }

    fn highpass_full_frame(&self, params: &HighpassParams) -> FilterResult<Image<Luma<f32>>> {
        with_reflect_padding(self, params.kernel_size, |padded| padded.highpass(params))
    }

    fn local_variance_normalization_full_frame(
        &self,
        params: &VarianceNormParams,
    ) -> FilterResult<Image<Luma<f32>>> {
        with_reflect_padding(self, params.kernel_size, |padded| {
            padded.local_variance_normalization(params)
        })
    }
}

fn with_reflect_padding<F>(
    image: &Image<Luma<f32>>,
    kernel_size: u32,
    filter: F,
) -> FilterResult<Image<Luma<f32>>>
where
    F: FnOnce(&Image<Luma<f32>>) -> FilterResult<Image<Luma<f32>>>,
{
    validate_non_empty_image(image.width(), image.height())?;
    validate_kernel_size(kernel_size)?;

    let pad = kernel_size / 2;
    let peak = image.iter().copied().fold(f32::MIN, f32::max);
    let scale = (peak > 1.0).then_some(peak);

    let mut padded = reflect_pad(image, pad)?;
    if let Some(scale) = scale {
        log::debug!("scaling frame into [0, 1] by its maximum {scale}");
        for v in padded.iter_mut() {
            *v /= scale;
        }
    }

    let filtered = filter(&padded)?;
    let mut output = crop_border(&filtered, pad);

    if let Some(scale) = scale {
        for v in output.iter_mut() {
            *v *= scale;
        }
    }
    Ok(output)
}

//! Buffer statistics and shared validation helpers.
//!
//! Scalar reductions and elementwise transforms over a flat `f32` buffer.
//! Several filters share these, so they operate on plain slices rather than
//! on image types.

use crate::error::{FilterError, FilterResult};

/// Mean and population standard deviation of a buffer.
///
/// The standard deviation is computed as `sqrt(E[x^2] - mean^2)`. Sums are
/// accumulated in `f64`; a slightly negative variance caused by rounding is
/// treated as zero.
///
/// # Returns
///
/// `None` for an empty buffer, otherwise `(mean, stddev)`
pub fn mean_std(values: &[f32]) -> Option<(f32, f32)> {
    if values.is_empty() {
        return None;
    }

    let (sum, sum_sq) = values.iter().fold((0.0f64, 0.0f64), |(s, sq), &v| {
        let v = f64::from(v);
        (s + v, sq + v * v)
    });
    let n = values.len() as f64;
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);

    Some((mean as f32, variance.sqrt() as f32))
}

/// Replaces every negative sample with zero.
#[inline]
pub fn clip_below_zero(values: &mut [f32]) {
    for v in values.iter_mut().filter(|v| **v < 0.0) {
        *v = 0.0;
    }
}

/// Clamps every sample above `limit` down to `limit`.
///
/// Samples at or below `limit` are left untouched.
#[inline]
pub fn clip_above(values: &mut [f32], limit: f32) {
    for v in values.iter_mut().filter(|v| **v > limit) {
        *v = limit;
    }
}

/// Maximum of a buffer, floored at zero.
///
/// NaN samples are ignored. An all-negative buffer reports `0.0`.
#[inline]
pub fn max_floored_at_zero(values: &[f32]) -> f32 {
    values.iter().copied().fold(0.0f32, f32::max)
}

/// Divides every sample by the buffer maximum.
///
/// The maximum is taken with [`max_floored_at_zero`], so it is never negative.
///
/// # Errors
///
/// * `FilterError::DegenerateNormalization` - If the maximum is zero or not
///   finite. The buffer is left unmodified in that case.
///
/// # Returns
///
/// The maximum the buffer was divided by
pub fn normalize_by_max(values: &mut [f32]) -> FilterResult<f32> {
    let max_value = max_floored_at_zero(values);
    if max_value <= 0.0 || !max_value.is_finite() {
        return Err(FilterError::DegenerateNormalization { max_value });
    }

    for v in values.iter_mut() {
        *v /= max_value;
    }
    Ok(max_value)
}

/// Validates that an image has non-zero dimensions.
pub const fn validate_non_empty_image(width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 {
        Err(FilterError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates that a buffer has the dimensions of the input it is paired with.
///
/// # Arguments
///
/// * `expected` - Dimensions of the input (width, height)
/// * `actual` - Dimensions of the buffer being checked (width, height)
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> FilterResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(FilterError::DimensionMismatch { expected, actual })
    }
}

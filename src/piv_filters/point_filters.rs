//! Statistics-based point filters over flat sample buffers.

use crate::error::{FilterError, FilterResult};
use crate::utils::{clip_above, mean_std};

/// Clamps outliers above `mean + std_mult * stddev` down to that limit.
///
/// Mean and population standard deviation are taken over every sample of
/// `values`. Samples at or below the limit are unchanged.
///
/// # Returns
///
/// The upper limit that was applied, or `None` for an empty buffer
pub fn cap_intensity(values: &mut [f32], std_mult: f32) -> Option<f32> {
    let (mean, std) = mean_std(values)?;
    let upper_limit = mean + std_mult * std;
    log::debug!(
        "intensity cap: mean={mean} std={std} std_mult={std_mult} limit={upper_limit}"
    );

    clip_above(values, upper_limit);
    Some(upper_limit)
}

/// Maps a sample to `1.0` if it is strictly above `threshold`, else `0.0`.
#[inline]
pub fn binarize_sample(value: f32, threshold: f32) -> f32 {
    if value > threshold {
        1.0
    } else {
        0.0
    }
}

/// Binarizes `input` into `output` elementwise.
///
/// # Errors
///
/// * `FilterError::DimensionMismatch` - If the buffers differ in length
pub fn binarize(input: &[f32], output: &mut [f32], threshold: f32) -> FilterResult<()> {
    if input.len() != output.len() {
        return Err(FilterError::DimensionMismatch {
            expected: (buffer_len(input.len()), 1),
            actual: (buffer_len(output.len()), 1),
        });
    }

    for (out, &v) in output.iter_mut().zip(input) {
        *out = binarize_sample(v, threshold);
    }
    Ok(())
}

fn buffer_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

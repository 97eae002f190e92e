use crate::error::FilterResult;
use crate::piv_filters::convolve::correlate;
use crate::piv_filters::kernel::Kernel;
use crate::piv_filters::row_chunks::RowChunkExecutor;
use crate::utils::{clip_below_zero, validate_matching_dimensions, validate_non_empty_image};
use crate::Image;
use image::Luma;
use std::ops::Range;

/// Writes the lowpass of `input` into the interior of `output`.
///
/// Every interior pixel receives the kernel correlation of `input` around
/// it. Pixels within `kernel.half()` of an edge are not written, so the
/// border of `output` keeps whatever the caller put there.
///
/// # Errors
///
/// * `FilterError::EmptyImage` - If `input` has a zero dimension
/// * `FilterError::DimensionMismatch` - If `output` differs in size from `input`
pub fn lowpass_into(
    input: &Image<Luma<f32>>,
    output: &mut Image<Luma<f32>>,
    kernel: &Kernel,
    executor: &RowChunkExecutor,
) -> FilterResult<()> {
    validate_pair(input, output)?;
    log::debug!(
        "lowpass {}x{} with {}x{} kernel",
        input.width(),
        input.height(),
        kernel.size(),
        kernel.size()
    );

    convolve_interior(input, output, kernel, executor, |_, smoothed| smoothed);
    Ok(())
}

/// Writes the highpass residual `input - lowpass(input)` into the interior of `output`.
///
/// With `clip_at_zero`, negative residuals are set to zero in a second pass
/// over the interior once every interior pixel has been written. The border
/// is never written.
///
/// # Errors
///
/// * `FilterError::EmptyImage` - If `input` has a zero dimension
/// * `FilterError::DimensionMismatch` - If `output` differs in size from `input`
pub fn highpass_into(
    input: &Image<Luma<f32>>,
    output: &mut Image<Luma<f32>>,
    kernel: &Kernel,
    clip_at_zero: bool,
    executor: &RowChunkExecutor,
) -> FilterResult<()> {
    validate_pair(input, output)?;
    log::debug!(
        "highpass {}x{} with {}x{} kernel (clip_at_zero={})",
        input.width(),
        input.height(),
        kernel.size(),
        kernel.size(),
        clip_at_zero
    );

    convolve_interior(input, output, kernel, executor, |center, smoothed| {
        center - smoothed
    });

    if clip_at_zero {
        let cols = output.width() as usize;
        let half = kernel.half() as usize;
        let columns = interior_cols(cols, half);
        executor.for_each_interior_row(&mut **output, cols, half, |_, row| {
            clip_below_zero(&mut row[columns.clone()]);
        });
    }
    Ok(())
}

/// Runs the kernel over every interior pixel and stores `combine(center, correlation)`.
pub(crate) fn convolve_interior<F>(
    input: &Image<Luma<f32>>,
    output: &mut Image<Luma<f32>>,
    kernel: &Kernel,
    executor: &RowChunkExecutor,
    combine: F,
) where
    F: Fn(f32, f32) -> f32 + Sync,
{
    let cols = input.width() as usize;
    let half = kernel.half() as usize;
    let columns = interior_cols(cols, half);
    let source: &[f32] = input.as_raw();

    executor.for_each_interior_row(&mut **output, cols, half, |row, out| {
        for col in columns.clone() {
            let center = source[row * cols + col];
            out[col] = combine(center, correlate(source, kernel, row, col, cols));
        }
    });
}

/// Columns at least `half` away from both the left and right edge.
///
/// Always a valid (possibly empty) range into a row of `cols` samples.
#[inline]
pub(crate) fn interior_cols(cols: usize, half: usize) -> Range<usize> {
    let end = cols.saturating_sub(half);
    half.min(end)..end
}

pub(crate) fn validate_pair(
    input: &Image<Luma<f32>>,
    other: &Image<Luma<f32>>,
) -> FilterResult<()> {
    let (width, height) = input.dimensions();
    validate_non_empty_image(width, height)?;
    validate_matching_dimensions((width, height), other.dimensions())
}

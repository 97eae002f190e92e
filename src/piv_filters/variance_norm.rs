//! Local variance normalization.
//!
//! A two-stage contrast normalization: the highpass residual of the input is
//! divided by the square root of its Gaussian-weighted local energy, and the
//! result is scaled so its global maximum is one. Input samples are expected
//! in `[0, 1]`; other ranges are accepted but the output range is then not
//! meaningful.

use crate::error::{FilterError, FilterResult};
use crate::piv_filters::convolve::correlate_map;
use crate::piv_filters::kernel::Kernel;
use crate::piv_filters::params::VarianceNormParams;
use crate::piv_filters::passes::{convolve_interior, interior_cols, validate_pair};
use crate::piv_filters::row_chunks::RowChunkExecutor;
use crate::utils::{clip_below_zero, normalize_by_max};
use crate::Image;
use image::Luma;

/// Runs local variance normalization using caller-owned buffers.
///
/// Stages, each completing before the next starts:
///
/// 1. `working` is cleared to zero, then the highpass residual of `input`
///    (first Gaussian kernel) is written into its interior
/// 2. for every interior pixel, `residual / sqrt(sum(k2 * residual^2))` into
///    `output`, or `0` where that energy is exactly zero
/// 3. the whole of `output`, border included, is divided by its maximum
/// 4. with `clip_at_zero`, negative samples of the whole of `output` become zero
///
/// The border of `output` is not written by stage 2, so its prior contents
/// take part in the maximum of stage 3. `working` is scratch space: its prior
/// contents never affect the result.
///
/// # Errors
///
/// * `FilterError::EmptyImage` - If `input` has a zero dimension
/// * `FilterError::DimensionMismatch` - If `output` or `working` differs in size from `input`
/// * `FilterError::InvalidKernelSize` - If `params.kernel_size` is zero or even
/// * `FilterError::DegenerateNormalization` - If the maximum of `output` after
///   stage 2 is not positive and finite. `output` then holds the stage 2
///   result, not normalized.
pub fn local_variance_normalization_into(
    input: &Image<Luma<f32>>,
    output: &mut Image<Luma<f32>>,
    working: &mut Image<Luma<f32>>,
    params: &VarianceNormParams,
    executor: &RowChunkExecutor,
) -> FilterResult<()> {
    validate_pair(input, output)?;
    validate_pair(input, working)?;

    let highpass_kernel = Kernel::gaussian(params.kernel_size, params.sigma1)?;
    let energy_kernel = Kernel::gaussian(params.kernel_size, params.sigma2)?;

    log::debug!(
        "local variance normalization {}x{}: kernel_size={} sigma1={} sigma2={} chunks={}",
        input.width(),
        input.height(),
        params.kernel_size,
        params.sigma1,
        params.sigma2,
        executor.chunk_count()
    );

    // stage 2 reads the border of `working` near the edges
    (**working).fill(0.0);
    convolve_interior(input, working, &highpass_kernel, executor, |center, smoothed| {
        center - smoothed
    });

    normalize_local_energy(working, output, &energy_kernel, executor);

    if let Err(err) = normalize_by_max(&mut **output) {
        log::warn!("local variance normalization skipped global scaling: {err}");
        return Err(err);
    }

    if params.clip_at_zero {
        clip_below_zero(&mut **output);
    }
    Ok(())
}

/// Divides each interior residual by the root of its weighted local energy.
fn normalize_local_energy(
    residual: &Image<Luma<f32>>,
    output: &mut Image<Luma<f32>>,
    kernel: &Kernel,
    executor: &RowChunkExecutor,
) {
    let cols = residual.width() as usize;
    let half = kernel.half() as usize;
    let columns = interior_cols(cols, half);
    let source: &[f32] = residual.as_raw();

    executor.for_each_interior_row(&mut **output, cols, half, |row, out| {
        for col in columns.clone() {
            let energy = correlate_map(source, kernel, row, col, cols, |v| v * v);
            let denom = energy.sqrt();
            out[col] = if denom != 0.0 {
                source[row * cols + col] / denom
            } else {
                0.0
            };
        }
    });
}

/// Whether an error means the input had no contrast left to normalize.
pub const fn is_degenerate(err: &FilterError) -> bool {
    matches!(err, FilterError::DegenerateNormalization { .. })
}

//! Windowed correlation at a single pixel.

use crate::piv_filters::kernel::Kernel;

/// Correlates `kernel` with `data` around `(row, col)`.
///
/// `data` is a row-major buffer whose rows are `stride` samples long. The
/// window is walked in the kernel's own row-major order (outer loop over
/// rows, inner over columns), so weight `k` always pairs with the `k`-th
/// window sample.
///
/// `(row, col)` must be at least `kernel.half()` away from every edge. The
/// window is not clamped; an out-of-range pixel panics on the slice index.
#[inline]
pub fn correlate(data: &[f32], kernel: &Kernel, row: usize, col: usize, stride: usize) -> f32 {
    correlate_map(data, kernel, row, col, stride, |v| v)
}

/// Correlates `kernel` with `f(sample)` around `(row, col)`.
///
/// Same window walk as [`correlate`]; used for local energy sums where each
/// sample is squared before weighting.
#[inline]
pub fn correlate_map<F>(
    data: &[f32],
    kernel: &Kernel,
    row: usize,
    col: usize,
    stride: usize,
    f: F,
) -> f32
where
    F: Fn(f32) -> f32,
{
    let size = kernel.size() as usize;
    let half = size / 2;
    let top = row - half;
    let left = col - half;

    kernel
        .weights()
        .chunks_exact(size)
        .enumerate()
        .map(|(i, weights)| {
            let start = (top + i) * stride + left;
            weights
                .iter()
                .zip(&data[start..start + size])
                .map(|(&w, &v)| w * f(v))
                .sum::<f32>()
        })
        .sum()
}

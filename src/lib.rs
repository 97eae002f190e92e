//! # piv-filters
//!
//! Spatial filters for preprocessing particle image velocimetry (PIV) frames.
//!
//! Rasters are single-channel `f32` images (`Image<Luma<f32>>`), normally
//! with samples in `[0, 1]`. The crate provides:
//!
//! - **Kernels**: normalized Gaussian and box kernels ([`Kernel`], [`KernelKind`])
//! - **Lowpass / Highpass**: windowed correlation and its residual
//! - **Local Variance Normalization**: highpass, division by local energy, global max scaling
//! - **Point filters**: intensity capping and thresholded binarization
//! - **Row chunking**: the partitioning used to drive every convolution pass
//!
//! Convolution filters only write interior pixels (at least `kernel_size / 2`
//! from every edge). The allocating API leaves the border at `0.0`, the
//! `*_into` API leaves it as the caller supplied it, and
//! [`FullFrameFilterExt`] reflect-pads so the whole frame is filtered.
//!
//! ## Example Usage
//!
//! ```no_run
//! use image::Luma;
//! use piv_filters::{
//!     BinarizeParams, FullFrameFilterExt, Image, SpatialFilterExt, VarianceNormParams,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let frame: Image<Luma<f32>> = Image::new(256, 256);
//!
//! let normalized = frame.local_variance_normalization(&VarianceNormParams::default())?;
//! let mask = normalized.binarize(&BinarizeParams { threshold: 0.2 })?;
//!
//! let whole_frame = frame.local_variance_normalization_full_frame(&VarianceNormParams {
//!     clip_at_zero: true,
//!     ..VarianceNormParams::default()
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `rayon`: runs row chunks on the rayon thread pool

mod error;
mod piv_filters;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{FilterError, FilterResult};
pub use piv_filters::convolve::{correlate, correlate_map};
pub use piv_filters::full_frame::{crop_border, reflect_pad, FullFrameFilterExt};
pub use piv_filters::kernel::{Kernel, KernelKind};
pub use piv_filters::params::{
    BinarizeParams, HighpassParams, IntensityCapParams, LowpassParams, VarianceNormParams,
};
pub use piv_filters::passes::{highpass_into, lowpass_into};
pub use piv_filters::point_filters::{binarize, binarize_sample, cap_intensity};
pub use piv_filters::row_chunks::{
    chunk_ranges, dispatch, interior_row_count, partition, RowChunkExecutor,
};
pub use piv_filters::spatial_filter::SpatialFilterExt;
pub use piv_filters::variance_norm::{is_degenerate, local_variance_normalization_into};
pub use utils::{clip_below_zero, max_floored_at_zero, mean_std, normalize_by_max};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

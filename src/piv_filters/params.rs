//! Filter parameters and their defaults.

use crate::piv_filters::kernel::KernelKind;

/// Parameters of [`lowpass`](crate::SpatialFilterExt::lowpass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassParams {
    /// Side length of the square kernel (odd)
    pub kernel_size: u32,
    /// Gaussian standard deviation; ignored by box kernels
    pub sigma: f32,
    pub kernel: KernelKind,
}

impl Default for LowpassParams {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            sigma: 1.0,
            kernel: KernelKind::Gaussian,
        }
    }
}

/// Parameters of [`highpass`](crate::SpatialFilterExt::highpass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighpassParams {
    pub kernel_size: u32,
    pub sigma: f32,
    /// Set negative residuals to zero after the pass
    pub clip_at_zero: bool,
    pub kernel: KernelKind,
}

impl Default for HighpassParams {
    fn default() -> Self {
        Self {
            kernel_size: 7,
            sigma: 3.0,
            clip_at_zero: false,
            kernel: KernelKind::Gaussian,
        }
    }
}

/// Parameters of local variance normalization
///
/// Both kernels are Gaussian and share `kernel_size`. `sigma1` shapes the
/// highpass stage, `sigma2` the local energy estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceNormParams {
    pub kernel_size: u32,
    pub sigma1: f32,
    pub sigma2: f32,
    pub clip_at_zero: bool,
}

impl Default for VarianceNormParams {
    fn default() -> Self {
        Self {
            kernel_size: 7,
            sigma1: 2.0,
            sigma2: 2.0,
            clip_at_zero: false,
        }
    }
}

/// Parameters of the intensity cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityCapParams {
    /// Number of standard deviations above the mean kept unclipped
    pub std_mult: f32,
}

impl Default for IntensityCapParams {
    fn default() -> Self {
        Self { std_mult: 2.0 }
    }
}

/// Parameters of binarization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarizeParams {
    /// Samples strictly above this value map to one
    pub threshold: f32,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

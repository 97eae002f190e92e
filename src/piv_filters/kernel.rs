use crate::error::{FilterError, FilterResult};
use itertools::iproduct;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Supported kernel shapes
///
/// The set is closed: every kernel used by the filters in this crate is
/// produced through [`KernelKind::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelKind {
    /// Normalized isotropic Gaussian
    #[default]
    Gaussian,
    /// Uniform averaging kernel
    Box,
}

impl KernelKind {
    /// Builds a kernel of this kind.
    ///
    /// `sigma` is ignored by [`KernelKind::Box`].
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero or even
    pub fn generate(self, size: u32, sigma: f32) -> FilterResult<Kernel> {
        match self {
            Self::Gaussian => Kernel::gaussian(size, sigma),
            Self::Box => Kernel::box_kernel(size),
        }
    }

    /// Integer tag of this kind, the inverse of `TryFrom<i32>`.
    pub const fn tag(self) -> i32 {
        match self {
            Self::Gaussian => 0,
            Self::Box => 1,
        }
    }
}

impl TryFrom<i32> for KernelKind {
    type Error = FilterError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Gaussian),
            1 => Ok(Self::Box),
            other => Err(FilterError::UnsupportedKernelKind(other.to_string())),
        }
    }
}

impl FromStr for KernelKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(Self::Gaussian),
            "box" => Ok(Self::Box),
            _ => Err(FilterError::UnsupportedKernelKind(s.to_owned())),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaussian => f.write_str("gaussian"),
            Self::Box => f.write_str("box"),
        }
    }
}

/// A square correlation kernel
///
/// Weights are stored row-major; `size` is always odd so the center cell
/// sits at `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: u32,
    data: Vec<f32>,
}

impl Kernel {
    /// Creates a normalized Gaussian kernel.
    ///
    /// A non-positive `sigma` is replaced by `0.3 * ((size - 1) * 0.5 - 1) + 0.8`,
    /// the usual size-derived default. Each cell `(i, j)` gets
    /// `exp(-0.5 * (((i - c) / sigma)^2 + ((j - c) / sigma)^2)) / (2 * PI * sigma^2)`
    /// with `c = size / 2`, and the weights are then divided by their sum.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero, even, or its
    ///   square overflows `u32`
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        validate_kernel_size(size)?;

        let sigma = if sigma <= 0.0 {
            0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        } else {
            sigma
        };
        let center = (size / 2) as f32;
        let scale = 2.0 * PI * sigma * sigma;

        let mut data: Vec<f32> = iproduct!(0..size, 0..size)
            .map(|(i, j)| {
                let di = (i as f32 - center) / sigma;
                let dj = (j as f32 - center) / sigma;
                (-0.5 * (di * di + dj * dj)).exp() / scale
            })
            .collect();

        let sum: f32 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }

        Ok(Self { size, data })
    }

    /// Creates a uniform averaging kernel.
    ///
    /// Every weight is `1 / (size * size)`.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidKernelSize` - If `size` is zero, even, or its
    ///   square overflows `u32`
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let count = validate_kernel_size(size)?;

        Ok(Self {
            size,
            data: vec![1.0 / count as f32; count],
        })
    }

    /// Side length of the kernel.
    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the center cell to the kernel edge (`size / 2`).
    #[inline]
    pub const fn half(&self) -> u32 {
        self.size / 2
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.data
    }

    /// Weight at `(row, col)`, or `None` outside the kernel.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<f32> {
        if row < self.size && col < self.size {
            Some(self.data[(row * self.size + col) as usize])
        } else {
            None
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Checks that `size` is odd and that `size * size` cells are addressable.
///
/// # Returns
///
/// The number of kernel cells
pub(crate) fn validate_kernel_size(size: u32) -> FilterResult<usize> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize { size });
    }
    size
        .checked_mul(size)
        .map(|cells| cells as usize)
        .ok_or(FilterError::InvalidKernelSize { size })
}

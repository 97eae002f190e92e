use thiserror::Error;

/// Error type for spatial filter operations
///
/// Every fallible operation in this crate reports one of these variants.
/// Nothing is retried; a failure is local to the call that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The raster has a zero dimension
    ///
    /// All filters require `rows, cols >= 1`.
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// An output or working buffer is not congruent with the input
    ///
    /// Returned by the caller-buffer (`*_into`) functions before any
    /// sample is written.
    #[error("Image dimensions mismatch: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Kernel size is zero or even
    ///
    /// A kernel needs a center cell at `size / 2`, so only odd sizes are accepted.
    #[error("Kernel size must be odd and positive, got {size}")]
    InvalidKernelSize { size: u32 },

    /// Reflect padding would grow the image past `u32` dimensions
    #[error("Padding by {pad} overflows image dimensions {width}x{height}")]
    PaddingTooLarge { width: u32, height: u32, pad: u32 },

    /// The requested kernel kind is not one of the supported kinds
    #[error("Unsupported kernel kind: {0}")]
    UnsupportedKernelKind(String),

    /// The global maximum used to normalize the result is not a positive finite value
    ///
    /// This happens when every processed sample is `<= 0` (for example a
    /// constant input, whose highpass residual is zero everywhere). Dividing
    /// by such a maximum would produce non-finite or sign-flipped samples.
    #[error("Degenerate normalization: global maximum is {max_value}")]
    DegenerateNormalization { max_value: f32 },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

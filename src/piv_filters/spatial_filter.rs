use crate::error::FilterResult;
use crate::piv_filters::params::{
    BinarizeParams, HighpassParams, IntensityCapParams, LowpassParams, VarianceNormParams,
};
use crate::piv_filters::passes::{highpass_into, lowpass_into};
use crate::piv_filters::point_filters::{binarize_sample, cap_intensity};
use crate::piv_filters::row_chunks::RowChunkExecutor;
use crate::piv_filters::variance_norm::local_variance_normalization_into;
use crate::utils::validate_non_empty_image;
use crate::Image;
use image::Luma;
use imageproc::map::map_subpixels;

/// Spatial filters returning a freshly allocated raster
///
/// Outputs have the dimensions of the input. Convolution-based filters
/// start from a zero-filled output, so pixels within `kernel_size / 2` of an
/// edge read `0.0` (local variance normalization then scales them with the
/// rest of the buffer). Use the `*_into` functions to supply your own output
/// buffer and border contents.
///
/// # Examples
///
/// ```rust
/// use image::Luma;
/// use piv_filters::{Image, LowpassParams, SpatialFilterExt};
///
/// let image: Image<Luma<f32>> = Image::from_pixel(7, 7, Luma([1.0]));
/// let smoothed = image.lowpass(&LowpassParams::default()).unwrap();
/// assert!((smoothed.get_pixel(3, 3)[0] - 1.0).abs() < 1e-5);
/// ```
pub trait SpatialFilterExt {
    /// Kernel correlation at every interior pixel
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has a zero dimension
    /// * `FilterError::InvalidKernelSize` - If the kernel size is zero or even
    fn lowpass(&self, params: &LowpassParams) -> FilterResult<Image<Luma<f32>>>;

    /// Input minus its lowpass at every interior pixel
    ///
    /// # Errors
    ///
    /// Same as [`SpatialFilterExt::lowpass`]
    fn highpass(&self, params: &HighpassParams) -> FilterResult<Image<Luma<f32>>>;

    /// Local variance normalization
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has a zero dimension
    /// * `FilterError::InvalidKernelSize` - If the kernel size is zero or even
    /// * `FilterError::DegenerateNormalization` - If no processed sample is positive
    fn local_variance_normalization(
        &self,
        params: &VarianceNormParams,
    ) -> FilterResult<Image<Luma<f32>>>;

    /// Clamp samples above `mean + std_mult * stddev`
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has a zero dimension
    fn intensity_cap(&self, params: &IntensityCapParams) -> FilterResult<Image<Luma<f32>>>;

    /// `1.0` where the sample is strictly above the threshold, `0.0` elsewhere
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - If the image has a zero dimension
    fn binarize(&self, params: &BinarizeParams) -> FilterResult<Image<Luma<f32>>>;
}

impl SpatialFilterExt for Image<Luma<f32>> {
    fn lowpass(&self, params: &LowpassParams) -> FilterResult<Image<Luma<f32>>> {
        let kernel = params.kernel.generate(params.kernel_size, params.sigma)?;
        let mut output = Image::new(self.width(), self.height());
        lowpass_into(self, &mut output, &kernel, &RowChunkExecutor::default())?;
        Ok(output)
    }

    fn highpass(&self, params: &HighpassParams) -> FilterResult<Image<Luma<f32>>> {
        let kernel = params.kernel.generate(params.kernel_size, params.sigma)?;
        let mut output = Image::new(self.width(), self.height());
        highpass_into(
            self,
            &mut output,
            &kernel,
            params.clip_at_zero,
            &RowChunkExecutor::default(),
        )?;
        Ok(output)
    }

    fn local_variance_normalization(
        &self,
        params: &VarianceNormParams,
    ) -> FilterResult<Image<Luma<f32>>> {
        let (width, height) = self.dimensions();
        let mut output = Image::new(width, height);
        let mut working = Image::new(width, height);
        local_variance_normalization_into(
            self,
            &mut output,
            &mut working,
            params,
            &RowChunkExecutor::default(),
        )?;
        Ok(output)
    }

    fn intensity_cap(&self, params: &IntensityCapParams) -> FilterResult<Image<Luma<f32>>> {
        validate_non_empty_image(self.width(), self.height())?;
        let mut output = self.clone();
        cap_intensity(&mut *output, params.std_mult);
        Ok(output)
    }

    fn binarize(&self, params: &BinarizeParams) -> FilterResult<Image<Luma<f32>>> {
        validate_non_empty_image(self.width(), self.height())?;
        let threshold = params.threshold;
        Ok(map_subpixels(self, |v: f32| binarize_sample(v, threshold)))
    }
}

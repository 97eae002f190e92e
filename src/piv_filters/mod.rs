pub mod convolve;
pub mod full_frame;
pub mod kernel;
pub mod params;
pub mod passes;
pub mod point_filters;
pub mod row_chunks;
pub mod spatial_filter;
pub mod variance_norm;

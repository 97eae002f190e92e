//! Multi-step workflow tests
//!
//! Chains of filters as they are used to preprocess a PIV frame, plus the
//! guarantees that make those chains composable.

use image::Luma;
use piv_filters::{
    highpass_into, lowpass_into, BinarizeParams, FullFrameFilterExt, HighpassParams, Image,
    IntensityCapParams, Kernel, KernelKind, LowpassParams, RowChunkExecutor, SpatialFilterExt,
    VarianceNormParams,
};
use std::num::NonZeroUsize;

/// Dark background with a few bright gaussian particles
fn create_particle_frame(width: u32, height: u32) -> Image<Luma<f32>> {
    let particles = [(8.0, 6.0, 0.9), (20.0, 15.0, 0.7), (30.0, 9.0, 0.85), (14.0, 22.0, 0.8)];
    Image::from_fn(width, height, |x, y| {
        let background = 0.05 + 0.002 * x as f32;
        let signal: f32 = particles
            .iter()
            .map(|&(px, py, peak)| {
                let dx = x as f32 - px;
                let dy = y as f32 - py;
                peak * (-(dx * dx + dy * dy) / 3.0).exp()
            })
            .sum();
        Luma([background + signal])
    })
}

fn create_ramp(width: u32, height: u32) -> Image<Luma<f32>> {
    let span = (width + height - 2).max(1) as f32;
    Image::from_fn(width, height, |x, y| Luma([(x + y) as f32 / span]))
}

#[test]
fn test_piv_preprocessing_pipeline() {
    let mut frame = create_particle_frame(40, 30);
    // a hot pixel the cap should tame
    frame.put_pixel(2, 27, Luma([25.0]));

    let capped = frame.intensity_cap(&IntensityCapParams::default()).unwrap();
    assert!(capped.get_pixel(2, 27)[0] < 25.0);

    let normalized = capped
        .local_variance_normalization(&VarianceNormParams {
            clip_at_zero: true,
            ..VarianceNormParams::default()
        })
        .unwrap();
    assert_eq!(normalized.dimensions(), (40, 30));
    assert!(normalized.iter().all(|&v| (0.0..=1.0).contains(&v)));
    let max = normalized.iter().copied().fold(0.0f32, f32::max);
    assert!((max - 1.0).abs() < 1e-5);

    let mask = normalized.binarize(&BinarizeParams { threshold: 0.3 }).unwrap();
    assert!(mask.iter().all(|&v| v == 0.0 || v == 1.0));
    // particle centers survive, the smooth background does not
    assert_eq!(mask.get_pixel(20, 15)[0], 1.0);
    assert_eq!(mask.get_pixel(5, 20)[0], 0.0);
}

#[test]
fn test_lowpass_plus_highpass_reconstructs_interior() {
    let frame = create_particle_frame(24, 20);
    let kernel = Kernel::gaussian(5, 1.5).unwrap();
    let executor = RowChunkExecutor::default();

    let mut smooth: Image<Luma<f32>> = Image::new(24, 20);
    let mut detail: Image<Luma<f32>> = Image::new(24, 20);
    lowpass_into(&frame, &mut smooth, &kernel, &executor).unwrap();
    highpass_into(&frame, &mut detail, &kernel, false, &executor).unwrap();

    for y in 2..18 {
        for x in 2..22 {
            let sum = smooth.get_pixel(x, y)[0] + detail.get_pixel(x, y)[0];
            assert!((sum - frame.get_pixel(x, y)[0]).abs() < 1e-5);
        }
    }
}

#[test]
fn test_chunk_count_does_not_change_results() {
    let frame = create_particle_frame(33, 27);
    let kernel = Kernel::gaussian(7, 2.0).unwrap();

    let run = |chunks: usize| {
        let executor = RowChunkExecutor::new(NonZeroUsize::new(chunks).unwrap());
        let mut output: Image<Luma<f32>> = Image::new(33, 27);
        highpass_into(&frame, &mut output, &kernel, true, &executor).unwrap();
        output
    };

    let reference = run(1);
    // more chunks than interior rows leaves some chunks empty
    for chunks in [2, 3, 7, 21, 64] {
        assert_eq!(run(chunks), reference, "chunk count {chunks}");
    }
}

#[test]
fn test_symmetric_lowpass_preserves_linear_ramp() {
    let ramp = create_ramp(15, 15);
    for kernel in [KernelKind::Gaussian, KernelKind::Box] {
        let output = ramp
            .lowpass(&LowpassParams {
                kernel_size: 5,
                sigma: 1.2,
                kernel,
            })
            .unwrap();
        for y in 2..13 {
            for x in 2..13 {
                let expected = ramp.get_pixel(x, y)[0];
                assert!((output.get_pixel(x, y)[0] - expected).abs() < 1e-5);
            }
        }
    }
}

#[test]
fn test_full_frame_matches_interior_filter() {
    let frame = create_particle_frame(26, 21);
    let params = HighpassParams {
        kernel_size: 5,
        sigma: 2.0,
        clip_at_zero: false,
        kernel: KernelKind::Gaussian,
    };

    let interior = frame.highpass(&params).unwrap();
    let full = frame.highpass_full_frame(&params).unwrap();
    assert_eq!(full.dimensions(), frame.dimensions());

    for y in 2..19 {
        for x in 2..24 {
            let a = interior.get_pixel(x, y)[0];
            let b = full.get_pixel(x, y)[0];
            assert!((a - b).abs() < 1e-6, "({x}, {y}): {a} vs {b}");
        }
    }
    // the border is filtered too instead of left at zero
    assert!(full.get_pixel(0, 0)[0] != 0.0 || full.get_pixel(25, 20)[0] != 0.0);
}

#[test]
fn test_full_frame_rescales_bright_frames() {
    let frame = create_particle_frame(20, 20);
    let bright: Image<Luma<f32>> =
        Image::from_fn(20, 20, |x, y| Luma([frame.get_pixel(x, y)[0] * 255.0]));

    let params = LowpassParams::default();
    let unit = frame.lowpass_full_frame(&params).unwrap();
    let scaled = bright.lowpass_full_frame(&params).unwrap();

    let peak = bright.iter().copied().fold(f32::MIN, f32::max);
    let unit_peak = frame.iter().copied().fold(f32::MIN, f32::max);
    assert!(peak > 1.0 && unit_peak <= 1.0);

    // same result up to the linear gain
    for (a, b) in unit.iter().zip(scaled.iter()) {
        assert!((a * 255.0 - b).abs() < 1e-3);
    }
}

#[test]
fn test_reusing_caller_buffers_across_frames() {
    let executor = RowChunkExecutor::new(NonZeroUsize::new(4).unwrap());
    let kernel = Kernel::box_kernel(3).unwrap();
    let mut output: Image<Luma<f32>> = Image::new(18, 14);

    for shift in 0..3 {
        let frame: Image<Luma<f32>> =
            Image::from_fn(18, 14, |x, y| Luma([((x + y + shift) % 5) as f32 / 4.0]));
        lowpass_into(&frame, &mut output, &kernel, &executor).unwrap();

        let expected: f32 = (0..3)
            .flat_map(|dy| (0..3).map(move |dx| (8 + dx, 6 + dy)))
            .map(|(x, y)| frame.get_pixel(x, y)[0])
            .sum::<f32>()
            / 9.0;
        assert!((output.get_pixel(9, 7)[0] - expected).abs() < 1e-5);
    }
}

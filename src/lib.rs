//! ScanSplit Rust Extensions
//!
//! Splits a scanned sheet holding several photographs into individual,
//! upright sub-images. The caller clicks once inside each photo; the engine
//! grows a region from that seed, fits the minimum-area rotated rectangle
//! around it and maps the result back to crop and rotation parameters on the
//! full-resolution sheet.
//!
//! ## Image Format
//! Sheets are `(height, width, channels)` u8 arrays:
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4), alpha is ignored for segmentation
//!
//! ## Pipeline
//! seed → downsample → flood fill → convex hull → rotating calipers →
//! rotation normalization → frame extraction → upright crop
//!
//! Every request is a pure function of the sheet, the seed and a
//! [`ProcessingConfig`]. Several seeds on one sheet may run concurrently.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pipeline;
pub mod raster;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::ProcessingConfig;
pub use error::{Result, SegmentError};
pub use frame::{extract_frame, render_crop, CropRect, FrameExtraction};
pub use geometry::{convex_hull, minimal_bounding_rectangle, normalize_rotation, BoundingFrame, Point2D};
pub use pipeline::{
    detect_scaled_frame, generate_frame, generate_frames, segment, segment_and_crop, ScaledDetection,
    Segmentation,
};
pub use raster::{RasterAccess, Rgb};
pub use selection::{flood_fill, ColorMatch, ColorPredicate, FillOptions, Region};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{self, ProcessingConfig};
    use crate::error::SegmentError;
    use crate::geometry::{BoundingFrame, Point2D};
    use crate::pipeline;

    impl From<SegmentError> for PyErr {
        fn from(err: SegmentError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    type FrameTuple = (f64, f64, f64, f64, f64);
    type CropTuple = (usize, usize, usize, usize);
    type SeedOutcome = (Option<FrameTuple>, Option<(&'static str, String)>);

    fn frame_tuple(frame: BoundingFrame) -> FrameTuple {
        (frame.x, frame.y, frame.width, frame.height, frame.rotation)
    }

    fn build_config(
        downsample_factor: f64,
        brightness_threshold: f32,
        bright_seed_threshold: f32,
        min_area: f64,
        padding: f64,
    ) -> ProcessingConfig {
        ProcessingConfig::default()
            .with_downsample_factor(downsample_factor)
            .with_brightness_threshold(brightness_threshold)
            .with_bright_seed_threshold(bright_seed_threshold)
            .with_min_area(min_area)
            .with_padding(padding)
    }

    // ========================================================================
    // Frame Detection
    // ========================================================================

    /// Detect the photo frame around a seed point.
    ///
    /// # Arguments
    /// * `image` - Scanned sheet (H, W, C) u8, C is 1, 3, or 4
    /// * `seed_x`, `seed_y` - Click position in sheet pixels
    ///
    /// # Returns
    /// `(x, y, width, height, rotation)` in sheet pixels and degrees
    #[pyfunction]
    #[pyo3(signature = (
        image, seed_x, seed_y,
        downsample_factor=config::DEFAULT_DOWNSAMPLE_FACTOR,
        brightness_threshold=config::DEFAULT_BRIGHTNESS_THRESHOLD,
        bright_seed_threshold=config::DEFAULT_BRIGHT_SEED_THRESHOLD,
        min_area=config::DEFAULT_MIN_AREA,
        padding=config::DEFAULT_PADDING,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn generate_frame<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        seed_x: f64,
        seed_y: f64,
        downsample_factor: f64,
        brightness_threshold: f32,
        bright_seed_threshold: f32,
        min_area: f64,
        padding: f64,
    ) -> PyResult<FrameTuple> {
        let input = image.as_array();
        let config = build_config(downsample_factor, brightness_threshold, bright_seed_threshold, min_area, padding);
        let frame = py.allow_threads(|| pipeline::generate_frame(input, Point2D::new(seed_x, seed_y), &config))?;
        Ok(frame_tuple(frame))
    }

    /// Detect the frame around a seed and cut out the upright photo.
    ///
    /// # Returns
    /// `(frame, crop, counter_rotation, photo)` where `frame` is
    /// `(x, y, width, height, rotation)`, `crop` is `(x, y, width, height)`,
    /// `counter_rotation` is degrees or `None`, and `photo` is (H', W', C) u8
    #[pyfunction]
    #[pyo3(signature = (
        image, seed_x, seed_y,
        downsample_factor=config::DEFAULT_DOWNSAMPLE_FACTOR,
        brightness_threshold=config::DEFAULT_BRIGHTNESS_THRESHOLD,
        bright_seed_threshold=config::DEFAULT_BRIGHT_SEED_THRESHOLD,
        min_area=config::DEFAULT_MIN_AREA,
        padding=config::DEFAULT_PADDING,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn segment_crop<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        seed_x: f64,
        seed_y: f64,
        downsample_factor: f64,
        brightness_threshold: f32,
        bright_seed_threshold: f32,
        min_area: f64,
        padding: f64,
    ) -> PyResult<(FrameTuple, CropTuple, Option<f64>, Bound<'py, PyArray3<u8>>)> {
        let input = image.as_array();
        let config = build_config(downsample_factor, brightness_threshold, bright_seed_threshold, min_area, padding);
        let (segmentation, photo) =
            py.allow_threads(|| pipeline::segment_and_crop(input, Point2D::new(seed_x, seed_y), &config))?;
        let extraction = segmentation.extraction;
        let crop = extraction.crop;
        Ok((
            frame_tuple(extraction.frame),
            (crop.x, crop.y, crop.width, crop.height),
            extraction.counter_rotation,
            photo.into_pyarray(py),
        ))
    }

    /// Detect frames for several seeds in parallel.
    ///
    /// # Returns
    /// One `(frame, error)` pair per seed, in seed order. Exactly one side is
    /// set: `frame` is `(x, y, width, height, rotation)`, `error` is
    /// `(kind, message)` with `kind` such as `"out_of_bounds"` or
    /// `"region_too_small"`
    #[pyfunction]
    #[pyo3(signature = (
        image, seeds,
        downsample_factor=config::DEFAULT_DOWNSAMPLE_FACTOR,
        brightness_threshold=config::DEFAULT_BRIGHTNESS_THRESHOLD,
        bright_seed_threshold=config::DEFAULT_BRIGHT_SEED_THRESHOLD,
        min_area=config::DEFAULT_MIN_AREA,
        padding=config::DEFAULT_PADDING,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn generate_frames<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        seeds: Vec<(f64, f64)>,
        downsample_factor: f64,
        brightness_threshold: f32,
        bright_seed_threshold: f32,
        min_area: f64,
        padding: f64,
    ) -> Vec<SeedOutcome> {
        let input = image.as_array();
        let config = build_config(downsample_factor, brightness_threshold, bright_seed_threshold, min_area, padding);
        let seeds: Vec<Point2D> = seeds.into_iter().map(|(x, y)| Point2D::new(x, y)).collect();
        py.allow_threads(|| pipeline::generate_frames(input, &seeds, &config))
            .into_iter()
            .map(|r| match r {
                Ok(frame) => (Some(frame_tuple(frame)), None),
                Err(e) => (None, Some((e.kind(), e.to_string()))),
            })
            .collect()
    }

    /// ScanSplit Rust extension module
    #[pymodule]
    pub fn scansplit_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(generate_frame, m)?)?;
        m.add_function(wrap_pyfunction!(segment_crop, m)?)?;
        m.add_function(wrap_pyfunction!(generate_frames, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::scansplit_rust;

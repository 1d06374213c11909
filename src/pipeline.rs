//! Seed-point segmentation entry points.
//!
//! One request takes a sheet, a seed point in original-image coordinates and
//! a [`ProcessingConfig`]. The sheet is downsampled, a region is grown from
//! the seed, and the region's minimum-area rectangle becomes the frame.
//!
//! Requests are pure over a read-only sheet. [`generate_frames`] runs several
//! seeds on one sheet in parallel, sharing a single downsampled copy.

use log::{debug, trace};
use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::config::ProcessingConfig;
use crate::error::{Result, SegmentError};
use crate::frame::{extract_frame_with_config, render_crop, FrameExtraction};
use crate::geometry::{minimal_bounding_rectangle, BoundingFrame, Point2D};
use crate::raster::{downsample, RasterAccess};
use crate::selection::flood_fill::seed_pixel;
use crate::selection::{flood_fill, ColorMatch, ColorPredicate, FillOptions};

/// A frame in the downsampled working space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledDetection {
    pub frame: BoundingFrame,
    /// Factor the working raster was scaled by (1.0 when not downsampled).
    pub factor: f64,
    pub region_size: usize,
}

impl ScaledDetection {
    /// The frame in original-image coordinates.
    pub fn full_resolution(&self) -> BoundingFrame {
        self.frame.scaled(1.0 / self.factor)
    }
}

/// Result of a full segmentation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmentation {
    pub detection: ScaledDetection,
    pub extraction: FrameExtraction,
}

impl Segmentation {
    pub fn frame(&self) -> BoundingFrame {
        self.extraction.frame
    }
}

/// Detect a frame on `raster` as is, using the config's predicate or, when it
/// has none, a brightness rule chosen from the seed color.
pub fn detect_frame_in<R: RasterAccess + ?Sized>(
    raster: &R,
    seed: Point2D,
    config: &ProcessingConfig,
) -> Result<(BoundingFrame, usize)> {
    let predicate = match config.predicate {
        Some(predicate) => predicate,
        None => {
            let (sx, sy) = seed_pixel(raster, seed)?;
            ColorPredicate::for_seed(raster.rgb(sx, sy), config)
        }
    };
    detect_frame_with(raster, seed, &predicate, config)
}

/// Detect a frame on `raster` as is, using a caller-supplied predicate.
///
/// Returns the frame and the number of region pixels it was fitted to.
pub fn detect_frame_with<R, P>(
    raster: &R,
    seed: Point2D,
    predicate: &P,
    config: &ProcessingConfig,
) -> Result<(BoundingFrame, usize)>
where
    R: RasterAccess + ?Sized,
    P: ColorMatch + ?Sized,
{
    let region = flood_fill(raster, seed, predicate, FillOptions::from(config))?;
    debug!(
        "region of {} pixels from seed {:?}{}",
        region.len(),
        region.seed(),
        if region.is_truncated() { " (capped)" } else { "" }
    );

    let frame = minimal_bounding_rectangle(&region.points(), config.min_area)?;
    Ok((frame, region.len()))
}

/// Downsampled copy of `image`, or `None` when the factor keeps full size.
fn working_copy(image: ArrayView3<u8>, factor: f64) -> Option<Array3<u8>> {
    (factor < 1.0).then(|| {
        let scaled = downsample(image, factor);
        trace!("downsampled {:?} -> {:?}", image.dim(), scaled.dim());
        scaled
    })
}

fn check_request(image: &ArrayView3<u8>, config: &ProcessingConfig) -> Result<()> {
    config.validate()?;
    if RasterAccess::is_empty(image) {
        return Err(SegmentError::EmptyRaster);
    }
    Ok(())
}

/// Map an original-image seed into working space, checking it against the sheet.
fn scale_seed(image: &ArrayView3<u8>, seed: Point2D, factor: f64) -> Result<Point2D> {
    let (sx, sy) = seed_pixel(image, seed)?;
    if factor >= 1.0 {
        return Ok(Point2D::new(sx as f64, sy as f64));
    }
    Ok(Point2D::new((sx as f64 * factor).floor(), (sy as f64 * factor).floor()))
}

fn detect_on_working(
    image: &ArrayView3<u8>,
    working: &ArrayView3<u8>,
    seed: Point2D,
    factor: f64,
    config: &ProcessingConfig,
) -> Result<ScaledDetection> {
    let scaled_seed = scale_seed(image, seed, factor)?;
    let (frame, region_size) = detect_frame_in(working, scaled_seed, config)?;
    debug!("frame {frame:?} at factor {factor}");
    Ok(ScaledDetection {
        frame,
        factor,
        region_size,
    })
}

/// Detect the frame around `seed`, returned in downsampled working space.
///
/// # Errors
/// Any [`SegmentError`]; kinds are never collapsed.
pub fn detect_scaled_frame(
    image: ArrayView3<u8>,
    seed: Point2D,
    config: &ProcessingConfig,
) -> Result<ScaledDetection> {
    check_request(&image, config)?;
    let factor = config.effective_downsample();
    let owned = working_copy(image, factor);
    let working = owned.as_ref().map_or_else(|| image.view(), |a| a.view());
    detect_on_working(&image, &working, seed, factor, config)
}

/// Detect the frame around `seed`, in original-image coordinates.
///
/// This is the core entry point for callers that only need the frame.
pub fn generate_frame(image: ArrayView3<u8>, seed: Point2D, config: &ProcessingConfig) -> Result<BoundingFrame> {
    detect_scaled_frame(image, seed, config).map(|d| d.full_resolution())
}

/// Detect the frame and derive its crop rectangle and counter-rotation.
pub fn segment(image: ArrayView3<u8>, seed: Point2D, config: &ProcessingConfig) -> Result<Segmentation> {
    let detection = detect_scaled_frame(image, seed, config)?;
    let extraction = extract_frame_with_config(&image, &detection.frame, config)?;
    Ok(Segmentation { detection, extraction })
}

/// [`segment`], then render the upright sub-image.
pub fn segment_and_crop(
    image: ArrayView3<u8>,
    seed: Point2D,
    config: &ProcessingConfig,
) -> Result<(Segmentation, Array3<u8>)> {
    let segmentation = segment(image, seed, config)?;
    let photo = render_crop(image, &segmentation.extraction)?;
    Ok((segmentation, photo))
}

/// Frames for several seeds on one sheet, computed in parallel.
///
/// Results are in seed order; one failing seed does not affect the others.
pub fn generate_frames(
    image: ArrayView3<u8>,
    seeds: &[Point2D],
    config: &ProcessingConfig,
) -> Vec<Result<BoundingFrame>> {
    if let Err(e) = check_request(&image, config) {
        return seeds.iter().map(|_| Err(e.clone())).collect();
    }
    let factor = config.effective_downsample();
    let owned = working_copy(image, factor);
    let working = owned.as_ref().map_or_else(|| image.view(), |a| a.view());

    seeds
        .par_iter()
        .map(|&seed| {
            detect_on_working(&image, &working, seed, factor, config).map(|d| d.full_resolution())
        })
        .collect()
}

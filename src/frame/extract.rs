//! Mapping detected frames back to full-resolution crop parameters.
//!
//! Detection runs on a downsampled sheet; the frame it returns is scaled back
//! up here, padded, clamped to the raster, and paired with the rotation the
//! renderer must undo.

use serde::{Deserialize, Serialize};

use crate::config::{ProcessingConfig, DEFAULT_ROTATION_DEAD_ZONE};
use crate::error::{Result, SegmentError};
use crate::geometry::{BoundingFrame, Bounds};
use crate::raster::RasterAccess;

/// Axis-aligned pixel rectangle inside the original raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }
}

/// Everything needed to cut one photo out of the original sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameExtraction {
    /// Detected frame in original-image coordinates.
    pub frame: BoundingFrame,
    pub crop: CropRect,
    /// Degrees to rotate the crop by to present the photo upright, if any.
    pub counter_rotation: Option<f64>,
    pub padding: f64,
}

/// Rotation that undoes `rotation`, or `None` inside the dead zone.
pub fn counter_rotation(rotation: f64, dead_zone: f64) -> Option<f64> {
    (rotation.abs() > dead_zone).then_some(-rotation)
}

/// Scale a frame detected at `downsample_factor` back to the original raster
/// and derive its padded crop rectangle.
///
/// # Errors
/// `InvalidConfig` for a non-positive factor or negative padding,
/// `EmptyCrop` when the padded frame lies entirely outside the raster.
pub fn extract_frame<R: RasterAccess + ?Sized>(
    original: &R,
    scaled_frame: &BoundingFrame,
    downsample_factor: f64,
    padding: f64,
) -> Result<FrameExtraction> {
    extract(
        original.width(),
        original.height(),
        scaled_frame,
        downsample_factor,
        padding,
        DEFAULT_ROTATION_DEAD_ZONE,
    )
}

/// [`extract_frame`] driven by a processing config.
pub fn extract_frame_with_config<R: RasterAccess + ?Sized>(
    original: &R,
    scaled_frame: &BoundingFrame,
    config: &ProcessingConfig,
) -> Result<FrameExtraction> {
    extract(
        original.width(),
        original.height(),
        scaled_frame,
        config.effective_downsample(),
        config.padding,
        config.rotation_dead_zone,
    )
}

fn extract(
    width: usize,
    height: usize,
    scaled_frame: &BoundingFrame,
    downsample_factor: f64,
    padding: f64,
    dead_zone: f64,
) -> Result<FrameExtraction> {
    if !downsample_factor.is_finite() || downsample_factor <= 0.0 {
        return Err(SegmentError::InvalidConfig(format!(
            "downsample_factor must be positive, got {downsample_factor}"
        )));
    }
    if !padding.is_finite() || padding < 0.0 {
        return Err(SegmentError::InvalidConfig(format!(
            "padding must be non-negative, got {padding}"
        )));
    }

    let frame = scaled_frame.scaled(1.0 / downsample_factor);
    let bounds = Bounds::of(frame.corners()).ok_or(SegmentError::EmptyCrop)?;

    let clamp = |v: f64, limit: usize| v.clamp(0.0, limit as f64) as usize;
    let x0 = clamp((bounds.min_x - padding).floor(), width);
    let y0 = clamp((bounds.min_y - padding).floor(), height);
    let x1 = clamp((bounds.max_x + padding).ceil(), width);
    let y1 = clamp((bounds.max_y + padding).ceil(), height);

    if x1 <= x0 || y1 <= y0 {
        return Err(SegmentError::EmptyCrop);
    }

    Ok(FrameExtraction {
        frame,
        crop: CropRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        },
        counter_rotation: counter_rotation(frame.rotation, dead_zone),
        padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn sheet(width: usize, height: usize) -> Array3<u8> {
        Array3::<u8>::from_elem((height, width, 3), 255)
    }

    #[test]
    fn test_scales_and_pads() {
        let img = sheet(400, 300);
        let scaled = BoundingFrame { x: 20.0, y: 30.0, width: 50.0, height: 25.0, rotation: 0.0 };

        let out = extract_frame(&img, &scaled, 0.5, 10.0).unwrap();

        assert_eq!(out.frame, BoundingFrame { x: 40.0, y: 60.0, width: 100.0, height: 50.0, rotation: 0.0 });
        assert_eq!(out.crop, CropRect { x: 30, y: 50, width: 120, height: 70 });
        assert_eq!(out.counter_rotation, None);
    }

    #[test]
    fn test_clamps_to_raster() {
        let img = sheet(100, 80);
        let scaled = BoundingFrame { x: 2.0, y: 1.0, width: 45.0, height: 38.0, rotation: 0.0 };

        let out = extract_frame(&img, &scaled, 0.5, 10.0).unwrap();

        assert_eq!(out.crop, CropRect { x: 0, y: 0, width: 100, height: 80 });
        assert!(out.crop.right() <= 100 && out.crop.bottom() <= 80);
    }

    #[test]
    fn test_rotated_crop_covers_corners() {
        let img = sheet(1000, 1000);
        let scaled = BoundingFrame { x: 200.0, y: 150.0, width: 100.0, height: 50.0, rotation: 30.0 };

        let out = extract_frame(&img, &scaled, 0.5, 0.0).unwrap();

        for corner in out.frame.corners() {
            assert!(corner.x >= out.crop.x as f64 && corner.x <= out.crop.right() as f64);
            assert!(corner.y >= out.crop.y as f64 && corner.y <= out.crop.bottom() as f64);
        }
        assert_eq!(out.counter_rotation, Some(-30.0));
    }

    #[test]
    fn test_dead_zone() {
        assert_eq!(counter_rotation(5.0, 5.0), None);
        assert_eq!(counter_rotation(-4.9, 5.0), None);
        assert_eq!(counter_rotation(5.1, 5.0), Some(-5.1));
        assert_eq!(counter_rotation(-20.0, 5.0), Some(20.0));
    }

    #[test]
    fn test_frame_outside_raster() {
        let img = sheet(50, 50);
        let scaled = BoundingFrame { x: 500.0, y: 500.0, width: 10.0, height: 10.0, rotation: 0.0 };
        assert_eq!(extract_frame(&img, &scaled, 0.5, 5.0).unwrap_err(), SegmentError::EmptyCrop);
    }

    #[test]
    fn test_rejects_bad_factor() {
        let img = sheet(50, 50);
        let frame = BoundingFrame { x: 1.0, y: 1.0, width: 10.0, height: 10.0, rotation: 0.0 };
        assert!(matches!(
            extract_frame(&img, &frame, 0.0, 5.0),
            Err(SegmentError::InvalidConfig(_))
        ));
    }
}

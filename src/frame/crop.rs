//! Rendering the final sub-image for one frame.
//!
//! Frames inside the rotation dead zone are cut out as the plain crop
//! rectangle. Rotated frames are resampled upright from the crop with
//! bilinear interpolation; the output covers the frame plus its padding and
//! anything falling outside the crop is filled with white scan background.

use ndarray::parallel::prelude::*;
use ndarray::{s, Array3, ArrayView3, Axis};

use super::extract::FrameExtraction;
use crate::error::{Result, SegmentError};
use crate::geometry::Point2D;

const BACKGROUND: u8 = 255;

/// Cut out and de-rotate the photo described by `extraction`.
///
/// # Arguments
/// * `image` - Original sheet (H, W, C) where C is 1, 3, or 4
/// * `extraction` - Crop rectangle and counter-rotation from the frame extractor
///
/// # Returns
/// The photo as a new (H', W', C) image
pub fn render_crop(image: ArrayView3<u8>, extraction: &FrameExtraction) -> Result<Array3<u8>> {
    let (height, width, _) = image.dim();
    let crop = extraction.crop;
    if crop.width == 0 || crop.height == 0 || crop.right() > width || crop.bottom() > height {
        return Err(SegmentError::EmptyCrop);
    }

    let region = image.slice(s![crop.y..crop.bottom(), crop.x..crop.right(), ..]);

    match extraction.counter_rotation {
        None => Ok(region.to_owned()),
        Some(_) => Ok(render_upright(region, extraction)),
    }
}

/// Resample the frame upright: output pixel (u, v) is the frame-local point
/// (u - padding, v - padding).
fn render_upright(region: ArrayView3<u8>, extraction: &FrameExtraction) -> Array3<u8> {
    let frame = extraction.frame;
    let pad = extraction.padding;
    let out_w = (frame.width + 2.0 * pad).round().max(0.0) as usize + 1;
    let out_h = (frame.height + 2.0 * pad).round().max(0.0) as usize + 1;
    let channels = region.dim().2;
    let offset = Point2D::new(extraction.crop.x as f64, extraction.crop.y as f64);

    let mut output = Array3::<u8>::from_elem((out_h, out_w, channels), BACKGROUND);

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(v, mut row)| {
            for u in 0..out_w {
                let local = Point2D::new(u as f64 - pad, v as f64 - pad);
                let src = frame.to_world(local) - offset;
                for c in 0..channels {
                    row[[u, c]] = sample_bilinear(&region, src.x, src.y, c);
                }
            }
        });

    output
}

/// Bilinear sample at a real-valued pixel position, white outside the image.
#[inline]
fn sample_bilinear(image: &ArrayView3<u8>, x: f64, y: f64, c: usize) -> u8 {
    let (height, width, _) = image.dim();
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let fetch = |xi: f64, yi: f64| -> f64 {
        if xi < 0.0 || yi < 0.0 || xi >= width as f64 || yi >= height as f64 {
            BACKGROUND as f64
        } else {
            image[[yi as usize, xi as usize, c]] as f64
        }
    };

    let top = fetch(x0, y0) * (1.0 - fx) + fetch(x0 + 1.0, y0) * fx;
    let bottom = fetch(x0, y0 + 1.0) * (1.0 - fx) + fetch(x0 + 1.0, y0 + 1.0) * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::extract::CropRect;
    use crate::geometry::BoundingFrame;

    fn extraction(frame: BoundingFrame, crop: CropRect, rotation: Option<f64>, padding: f64) -> FrameExtraction {
        FrameExtraction {
            frame,
            crop,
            counter_rotation: rotation,
            padding,
        }
    }

    #[test]
    fn test_plain_crop() {
        let mut img = Array3::<u8>::zeros((20, 30, 3));
        img[[5, 7, 1]] = 200;
        let ex = extraction(
            BoundingFrame { x: 7.0, y: 5.0, width: 4.0, height: 3.0, rotation: 0.0 },
            CropRect { x: 7, y: 5, width: 10, height: 6 },
            None,
            0.0,
        );

        let out = render_crop(img.view(), &ex).unwrap();

        assert_eq!(out.dim(), (6, 10, 3));
        assert_eq!(out[[0, 0, 1]], 200);
    }

    #[test]
    fn test_upright_identity_when_rotation_zero() {
        // A counter-rotation of zero still resamples; the output equals the crop
        let mut img = Array3::<u8>::zeros((10, 10, 1));
        for y in 0..10 {
            for x in 0..10 {
                img[[y, x, 0]] = (x * 10 + y) as u8;
            }
        }
        let ex = extraction(
            BoundingFrame { x: 2.0, y: 3.0, width: 4.0, height: 2.0, rotation: 0.0 },
            CropRect { x: 0, y: 0, width: 10, height: 10 },
            Some(0.0),
            1.0,
        );

        let out = render_crop(img.view(), &ex).unwrap();

        assert_eq!(out.dim(), (5, 7, 1));
        assert_eq!(out[[1, 1, 0]], img[[3, 2, 0]]);
        assert_eq!(out[[3, 5, 0]], img[[5, 6, 0]]);
    }

    #[test]
    fn test_rotated_frame_comes_out_upright() {
        // Dark 40x20 block rotated by 30 degrees about (50, 50)
        let frame = BoundingFrame::from_center(Point2D::new(50.0, 50.0), 40.0, 20.0, 30.0);
        let theta = frame.rotation.to_radians();
        let mut img = Array3::<u8>::from_elem((100, 100, 3), 255);
        for y in 0..100 {
            for x in 0..100 {
                let local = (Point2D::new(x as f64, y as f64) - frame.origin()).rotate(-theta);
                if local.x >= 0.0 && local.y >= 0.0 && local.x <= 40.0 && local.y <= 20.0 {
                    for c in 0..3 {
                        img[[y, x, c]] = 0;
                    }
                }
            }
        }
        let ex = extraction(
            frame,
            CropRect { x: 0, y: 0, width: 100, height: 100 },
            Some(-30.0),
            5.0,
        );

        let out = render_crop(img.view(), &ex).unwrap();

        assert_eq!(out.dim(), (31, 51, 3));
        // Interior of the photo is dark, the padding margin is background
        assert!(out[[15, 25, 0]] < 30);
        assert!(out[[8, 8, 0]] < 60);
        assert!(out[[1, 1, 0]] > 200);
        assert!(out[[29, 49, 0]] > 200);
    }

    #[test]
    fn test_crop_outside_image_rejected() {
        let img = Array3::<u8>::zeros((10, 10, 3));
        let ex = extraction(
            BoundingFrame::default(),
            CropRect { x: 5, y: 5, width: 10, height: 2 },
            None,
            0.0,
        );
        assert_eq!(render_crop(img.view(), &ex).unwrap_err(), SegmentError::EmptyCrop);
    }
}

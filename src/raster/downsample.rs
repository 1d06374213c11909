//! Area-average downsampling.
//!
//! Used to shrink a scanned sheet before flood fill. Output dimensions are
//! rounded up, so every in-bounds source coordinate `x` maps to the in-bounds
//! output coordinate `floor(x * factor)`.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, Axis};

/// Output dimensions `(width, height)` for a given factor.
///
/// Factors of 1.0 or more keep the original size.
pub fn downsampled_dims(width: usize, height: usize, factor: f64) -> (usize, usize) {
    if factor >= 1.0 {
        return (width, height);
    }
    let scale = |d: usize| ((d as f64 * factor).ceil() as usize).clamp(1, d.max(1));
    (scale(width), scale(height))
}

/// Downsample an image by `factor` in (0, 1] using box averaging.
///
/// # Arguments
/// * `image` - Input image (H, W, C) where C is 1, 3, or 4
/// * `factor` - Scale factor; 0.5 halves each dimension
///
/// # Returns
/// New image (ceil(H * factor), ceil(W * factor), C)
pub fn downsample(image: ArrayView3<u8>, factor: f64) -> Array3<u8> {
    let (height, width, channels) = image.dim();
    if factor >= 1.0 || width == 0 || height == 0 {
        return image.to_owned();
    }

    let (out_w, out_h) = downsampled_dims(width, height, factor);
    let inv = 1.0 / factor;
    let span = |o: usize, limit: usize| {
        let start = ((o as f64 * inv).floor() as usize).min(limit - 1);
        let end = (((o + 1) as f64 * inv).ceil() as usize).clamp(start + 1, limit);
        (start, end)
    };

    let mut output = Array3::<u8>::zeros((out_h, out_w, channels));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(oy, mut row)| {
            let (y0, y1) = span(oy, height);
            let mut sums = vec![0u32; channels];
            for ox in 0..out_w {
                let (x0, x1) = span(ox, width);
                sums.iter_mut().for_each(|s| *s = 0);
                for y in y0..y1 {
                    for x in x0..x1 {
                        for (c, sum) in sums.iter_mut().enumerate() {
                            *sum += image[[y, x, c]] as u32;
                        }
                    }
                }
                let count = ((y1 - y0) * (x1 - x0)) as u32;
                for (c, sum) in sums.iter().enumerate() {
                    row[[ox, c]] = ((sum + count / 2) / count) as u8;
                }
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_round_up() {
        assert_eq!(downsampled_dims(101, 50, 0.5), (51, 25));
        assert_eq!(downsampled_dims(100, 100, 1.0), (100, 100));
        assert_eq!(downsampled_dims(1, 1, 0.1), (1, 1));
    }

    #[test]
    fn test_uniform_image_keeps_color() {
        let img = Array3::<u8>::from_elem((10, 10, 3), 123);
        let result = downsample(img.view(), 0.5);
        assert_eq!(result.dim(), (5, 5, 3));
        assert!(result.iter().all(|&v| v == 123));
    }

    #[test]
    fn test_box_average() {
        // 2x2 block of 0, 100, 200, 100 averages to 100
        let mut img = Array3::<u8>::zeros((2, 2, 1));
        img[[0, 1, 0]] = 100;
        img[[1, 0, 0]] = 200;
        img[[1, 1, 0]] = 100;
        let result = downsample(img.view(), 0.5);
        assert_eq!(result.dim(), (1, 1, 1));
        assert_eq!(result[[0, 0, 0]], 100);
    }

    #[test]
    fn test_odd_edge_is_covered() {
        let mut img = Array3::<u8>::zeros((3, 3, 1));
        img[[2, 2, 0]] = 255;
        let result = downsample(img.view(), 0.5);
        assert_eq!(result.dim(), (2, 2, 1));
        assert_eq!(result[[1, 1, 0]], 255);
    }

    #[test]
    fn test_factor_one_copies() {
        let img = Array3::<u8>::from_elem((4, 6, 4), 9);
        assert_eq!(downsample(img.view(), 1.0), img);
    }
}

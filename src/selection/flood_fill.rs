//! Region growing from a seed point using flood fill.
//!
//! Grows the set of pixels 8-connected to the seed whose color passes a
//! [`ColorMatch`] predicate against the seed color.

use std::collections::VecDeque;

use crate::config::{ProcessingConfig, DEFAULT_FILL_STEP, DEFAULT_MAX_PIXELS};
use crate::error::{Result, SegmentError};
use crate::geometry::Point2D;
use crate::raster::{RasterAccess, Rgb};
use crate::selection::predicate::ColorMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Neighbor stride in pixels. 1 visits every pixel.
    pub step: usize,
    /// Growth stops once the region holds this many pixels.
    pub max_pixels: usize,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_FILL_STEP,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl From<&ProcessingConfig> for FillOptions {
    fn from(config: &ProcessingConfig) -> Self {
        Self {
            step: config.fill_step,
            max_pixels: config.max_pixels,
        }
    }
}

/// Pixels grown from one seed, in visiting order.
#[derive(Debug, Clone)]
pub struct Region {
    pixels: Vec<(usize, usize)>,
    seed: (usize, usize),
    seed_color: Rgb,
    bounds: (usize, usize, usize, usize), // (min_x, min_y, max_x, max_y)
    truncated: bool,
}

impl Region {
    pub fn pixels(&self) -> &[(usize, usize)] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a region returned by [`flood_fill`].
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn seed(&self) -> (usize, usize) {
        self.seed
    }

    pub fn seed_color(&self) -> Rgb {
        self.seed_color
    }

    /// Pixel bounds as (x, y, width, height).
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        let (min_x, min_y, max_x, max_y) = self.bounds;
        (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    /// True when growth stopped at `max_pixels` rather than exhausting the queue.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn points(&self) -> Vec<Point2D> {
        self.pixels.iter().map(|&p| Point2D::from(p)).collect()
    }

    /// Selection mask (255 = in region, 0 = outside).
    pub fn to_mask(&self, width: usize, height: usize) -> Vec<u8> {
        let mut mask = vec![0u8; width * height];
        for &(x, y) in &self.pixels {
            if x < width && y < height {
                mask[y * width + x] = 255;
            }
        }
        mask
    }
}

/// Integer pixel under a real-valued seed, checked against the raster.
pub fn seed_pixel<R: RasterAccess + ?Sized>(image: &R, seed: Point2D) -> Result<(usize, usize)> {
    let out_of_bounds = || SegmentError::OutOfBounds {
        x: seed.x,
        y: seed.y,
        width: image.width(),
        height: image.height(),
    };
    if !seed.is_finite() {
        return Err(out_of_bounds());
    }
    let (x, y) = (seed.x.floor(), seed.y.floor());
    if x < 0.0 || y < 0.0 || x >= image.width() as f64 || y >= image.height() as f64 {
        return Err(out_of_bounds());
    }
    Ok((x as usize, y as usize))
}

/// Grow a region from `seed` using breadth-first flood fill.
///
/// # Arguments
/// * `image` - Raster to read from
/// * `seed` - Starting point; its pixel color is the reference color
/// * `predicate` - Membership rule `(candidate, seed_color) -> bool`
/// * `options` - Neighbor stride and pixel cap
///
/// # Errors
/// `OutOfBounds` for a seed outside the raster, `EmptyRegion` when the
/// predicate rejects the seed pixel, `InvalidConfig` for a zero stride,
/// `EmptyRaster` for a raster with a zero dimension.
pub fn flood_fill<R, P>(image: &R, seed: Point2D, predicate: &P, options: FillOptions) -> Result<Region>
where
    R: RasterAccess + ?Sized,
    P: ColorMatch + ?Sized,
{
    if options.step == 0 {
        return Err(SegmentError::InvalidConfig("flood fill step must be at least 1".into()));
    }
    if image.is_empty() {
        return Err(SegmentError::EmptyRaster);
    }
    let (start_x, start_y) = seed_pixel(image, seed)?;
    let width = image.width();
    let height = image.height();
    let seed_color = image.rgb(start_x, start_y);

    let step = options.step as i64;
    let neighbors = [
        (-step, -step),
        (0, -step),
        (step, -step),
        (-step, 0),
        (step, 0),
        (-step, step),
        (0, step),
        (step, step),
    ];

    // Per-call scratch: never shared between requests.
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    let mut pixels = Vec::new();
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (width, height, 0, 0);
    let mut truncated = false;

    let start_idx = start_y * width + start_x;
    visited[start_idx] = true;
    queue.push_back(start_idx);

    while let Some(idx) = queue.pop_front() {
        let x = idx % width;
        let y = idx / width;

        if !predicate.matches(image.rgb(x, y), seed_color) {
            continue;
        }

        pixels.push((x, y));
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);

        if pixels.len() >= options.max_pixels {
            truncated = !queue.is_empty();
            break;
        }

        for &(dx, dy) in &neighbors {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if !image.contains(nx, ny) {
                continue;
            }
            let nidx = ny as usize * width + nx as usize;
            if !visited[nidx] {
                visited[nidx] = true;
                queue.push_back(nidx);
            }
        }
    }

    if pixels.is_empty() {
        return Err(SegmentError::EmptyRegion);
    }

    Ok(Region {
        pixels,
        seed: (start_x, start_y),
        seed_color,
        bounds: (min_x, min_y, max_x, max_y),
        truncated,
    })
}

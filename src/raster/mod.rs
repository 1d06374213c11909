//! Read-only raster access.
//!
//! The engine works on `(height, width, channels)` u8 arrays, the same layout
//! used across the crate's bindings:
//! - **Grayscale**: (H, W, 1)
//! - **RGB**: (H, W, 3)
//! - **RGBA**: (H, W, 4), alpha is ignored
//!
//! Anything implementing [`RasterAccess`] can be segmented. The trait is
//! `Sync` so one sheet can be shared by parallel seed requests.

pub mod downsample;

use ndarray::{Array3, ArrayView3};

pub use downsample::{downsample, downsampled_dims};

/// An RGB triple read from a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Arithmetic mean of the three channels.
    #[inline]
    pub fn brightness(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }
}

/// Pixel access plus bounds checks over a fixed-size image.
pub trait RasterAccess: Sync {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Color at `(x, y)`. Callers guarantee the coordinate is in bounds.
    fn rgb(&self, x: usize, y: usize) -> Rgb;

    #[inline]
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width() as u64 && (y as u64) < self.height() as u64
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[inline]
fn rgb_from_view(image: &ArrayView3<u8>, x: usize, y: usize) -> Rgb {
    if image.shape()[2] >= 3 {
        Rgb::new(image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]])
    } else {
        Rgb::gray(image[[y, x, 0]])
    }
}

impl RasterAccess for ArrayView3<'_, u8> {
    #[inline]
    fn width(&self) -> usize {
        self.shape()[1]
    }

    #[inline]
    fn height(&self) -> usize {
        self.shape()[0]
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> Rgb {
        rgb_from_view(self, x, y)
    }

    fn is_empty(&self) -> bool {
        self.shape().iter().any(|&d| d == 0)
    }
}

impl RasterAccess for Array3<u8> {
    #[inline]
    fn width(&self) -> usize {
        self.shape()[1]
    }

    #[inline]
    fn height(&self) -> usize {
        self.shape()[0]
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> Rgb {
        rgb_from_view(&self.view(), x, y)
    }

    fn is_empty(&self) -> bool {
        self.shape().iter().any(|&d| d == 0)
    }
}

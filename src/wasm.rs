//! WebAssembly exports for ScanSplit.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Sheets are
//! passed as flat RGBA bytes (canvas `ImageData` layout).

use ndarray::{Array3, ArrayView3};
use wasm_bindgen::prelude::*;

use crate::config::ProcessingConfig;
use crate::geometry::{BoundingFrame, Point2D};
use crate::pipeline;

fn rgba_view(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<'_, u8>, JsError> {
    ArrayView3::from_shape((height, width, 4), data)
        .map_err(|e| JsError::new(&format!("invalid RGBA buffer for {width}x{height}: {e}")))
}

fn wasm_config(downsample_factor: f64, padding: f64) -> ProcessingConfig {
    ProcessingConfig::default()
        .with_downsample_factor(downsample_factor)
        .with_padding(padding)
}

fn frame_array(frame: BoundingFrame) -> Vec<f64> {
    vec![frame.x, frame.y, frame.width, frame.height, frame.rotation]
}

// ============================================================================
// Frame Detection
// ============================================================================

/// Detect the photo frame around a clicked point.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Sheet width in pixels
/// * `height` - Sheet height in pixels
/// * `seed_x`, `seed_y` - Click position in sheet pixels
/// * `downsample_factor` - Working scale, e.g. 0.5
///
/// # Returns
/// `[x, y, width, height, rotation]` in sheet pixels and degrees
#[wasm_bindgen]
pub fn generate_frame_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    seed_x: f64,
    seed_y: f64,
    downsample_factor: f64,
) -> Result<Vec<f64>, JsError> {
    let input = rgba_view(data, width, height)?;
    let config = wasm_config(downsample_factor, crate::config::DEFAULT_PADDING);
    let frame = pipeline::generate_frame(input, Point2D::new(seed_x, seed_y), &config)?;
    Ok(frame_array(frame))
}

// ============================================================================
// Upright Crop
// ============================================================================

/// Photo cut out of a sheet, as returned to JavaScript.
#[wasm_bindgen]
pub struct CroppedPhoto {
    width: usize,
    height: usize,
    frame: BoundingFrame,
    data: Vec<u8>,
}

#[wasm_bindgen]
impl CroppedPhoto {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `[x, y, width, height, rotation]` of the detected frame.
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> Vec<f64> {
        frame_array(self.frame)
    }

    /// Flat RGBA bytes of the upright photo.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Detect the frame around a clicked point and cut the photo out upright.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Sheet width in pixels
/// * `height` - Sheet height in pixels
/// * `seed_x`, `seed_y` - Click position in sheet pixels
/// * `downsample_factor` - Working scale, e.g. 0.5
/// * `padding` - Margin in sheet pixels kept around the frame
#[wasm_bindgen]
pub fn segment_crop_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    seed_x: f64,
    seed_y: f64,
    downsample_factor: f64,
    padding: f64,
) -> Result<CroppedPhoto, JsError> {
    let input = rgba_view(data, width, height)?;
    let config = wasm_config(downsample_factor, padding);
    let (segmentation, photo): (_, Array3<u8>) =
        pipeline::segment_and_crop(input, Point2D::new(seed_x, seed_y), &config)?;
    let (out_h, out_w, _) = photo.dim();
    Ok(CroppedPhoto {
        width: out_w,
        height: out_h,
        frame: segmentation.frame(),
        data: photo.into_raw_vec_and_offset().0,
    })
}

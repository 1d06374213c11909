//! From detected frames to final sub-images.
//!
//! - **Extract**: scale a frame back to the original sheet, pad and clamp the
//!   crop, decide the counter-rotation
//! - **Crop**: cut out the photo and present it upright

pub mod crop;
pub mod extract;

pub use crop::render_crop;
pub use extract::{counter_rotation, extract_frame, extract_frame_with_config, CropRect, FrameExtraction};

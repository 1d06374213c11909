//! Computational geometry for frame detection.
//!
//! - **Hull**: Andrew's monotone chain over region pixels
//! - **Minimum rectangle**: rotating calipers over the hull
//! - **Rotation**: canonical (-45°, 45°] angles with width/height swaps
//! - **Bounding frame**: corner-anchored rotated rectangle handed to callers

pub mod bounding_frame;
pub mod hull;
pub mod min_rect;
pub mod point;
pub mod rotation;

pub use bounding_frame::BoundingFrame;
pub use hull::convex_hull;
pub use min_rect::{min_area_rect, minimal_bounding_rectangle, OrientedRect};
pub use point::{Bounds, Point2D};
pub use rotation::{normalize_rotation, NormalizedRotation};

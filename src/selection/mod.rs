//! Region selection for seed-point segmentation.
//!
//! - **Predicate**: color similarity rules deciding region membership
//! - **Flood fill**: 8-connected breadth-first growth from a seed
//!
//! The flood fill is the first stage of frame detection; its region feeds the
//! hull and rectangle solvers in `geometry`.

pub mod flood_fill;
pub mod predicate;

pub use flood_fill::{flood_fill, FillOptions, Region};
pub use predicate::{ColorMatch, ColorPredicate};

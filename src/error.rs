//! Error kinds for a single segmentation request.
//!
//! Every kind is fatal to the request that produced it. Callers decide
//! whether to surface the error or fall back to a manually drawn frame.

/// Failure of one seed-point segmentation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("seed ({x}, {y}) lies outside the {width}x{height} raster")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("flood fill produced an empty region")]
    EmptyRegion,

    #[error("at least 3 points are required, got {count}")]
    InsufficientPoints { count: usize },

    #[error("bounding rectangle area {area:.1} is below the minimum of {min_area:.1}")]
    RegionTooSmall { area: f64, min_area: f64 },

    #[error("raster has zero width or height")]
    EmptyRaster,

    #[error("crop rectangle is empty after clamping to the raster")]
    EmptyCrop,

    #[error("invalid processing config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SegmentError>;

impl SegmentError {
    /// Stable snake_case name of the error kind, for bindings that report
    /// errors as data.
    pub fn kind(&self) -> &'static str {
        match self {
            SegmentError::OutOfBounds { .. } => "out_of_bounds",
            SegmentError::EmptyRegion => "empty_region",
            SegmentError::InsufficientPoints { .. } => "insufficient_points",
            SegmentError::RegionTooSmall { .. } => "region_too_small",
            SegmentError::EmptyRaster => "empty_raster",
            SegmentError::EmptyCrop => "empty_crop",
            SegmentError::InvalidConfig(_) => "invalid_config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            SegmentError::OutOfBounds { x: -1.0, y: 0.0, width: 4, height: 4 },
            SegmentError::EmptyRegion,
            SegmentError::InsufficientPoints { count: 2 },
            SegmentError::RegionTooSmall { area: 50.0, min_area: 100.0 },
            SegmentError::EmptyRaster,
            SegmentError::EmptyCrop,
            SegmentError::InvalidConfig("fill_step".into()),
        ];
        let mut kinds: Vec<&str> = errors.iter().map(SegmentError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_display_carries_details() {
        let err = SegmentError::RegionTooSmall { area: 50.0, min_area: 100.0 };
        assert_eq!(err.to_string(), "bounding rectangle area 50.0 is below the minimum of 100.0");
        assert_eq!(err.kind(), "region_too_small");
    }
}

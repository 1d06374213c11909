//! Minimum-area enclosing rectangle via rotating calipers.
//!
//! Every edge of the convex hull is tried as the rectangle's base. The hull
//! is rotated so the edge lies on the x-axis, its axis-aligned bounds give a
//! candidate rectangle, and the smallest candidate wins. The first edge to
//! reach the minimum is kept, so ties resolve by hull edge order.

use super::bounding_frame::BoundingFrame;
use super::hull::convex_hull;
use super::point::{Bounds, Point2D};
use crate::error::{Result, SegmentError};

/// Center-based rectangle as produced by the calipers, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Point2D,
    pub width: f64,
    pub height: f64,
    /// Degrees, the angle of the winning hull edge.
    pub angle: f64,
}

impl OrientedRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn to_frame(&self) -> BoundingFrame {
        BoundingFrame::from_center(self.center, self.width, self.height, self.angle)
    }
}

/// Smallest enclosing rectangle of `points`, before area filtering.
///
/// Falls back to the axis-aligned bounding box with angle 0 when the hull is
/// degenerate (all points collinear or coincident).
pub fn min_area_rect(points: &[Point2D]) -> Result<OrientedRect> {
    if points.len() < 3 {
        return Err(SegmentError::InsufficientPoints { count: points.len() });
    }

    let hull = convex_hull(points);
    if hull.len() < 3 {
        return Ok(axis_aligned(points));
    }

    let n = hull.len();
    let best = smallest_first((0..n).map(|i| edge_candidate(&hull, hull[i], hull[(i + 1) % n])));

    Ok(best.unwrap_or_else(|| axis_aligned(points)))
}

/// Smallest-area candidate; a later candidate replaces the current best only
/// when strictly smaller.
fn smallest_first<I>(candidates: I) -> Option<OrientedRect>
where
    I: IntoIterator<Item = OrientedRect>,
{
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(b) if candidate.area() < b.area() => Some(candidate),
        Some(b) => Some(b),
        None => Some(candidate),
    })
}

/// Minimum-area rectangle as a normalized, corner-anchored frame.
///
/// # Errors
/// `InsufficientPoints` for fewer than 3 points, `RegionTooSmall` when the
/// rectangle's area is below `min_area`.
pub fn minimal_bounding_rectangle(points: &[Point2D], min_area: f64) -> Result<BoundingFrame> {
    let rect = min_area_rect(points)?;
    let area = rect.area();
    if area < min_area {
        return Err(SegmentError::RegionTooSmall { area, min_area });
    }
    Ok(rect.to_frame())
}

fn edge_candidate(hull: &[Point2D], a: Point2D, b: Point2D) -> OrientedRect {
    let theta = (b.y - a.y).atan2(b.x - a.x);
    let aligned = Bounds::of(hull.iter().map(|p| p.rotate(-theta)));
    // The hull is non-empty here
    let bounds = aligned.unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 });
    OrientedRect {
        center: bounds.center().rotate(theta),
        width: bounds.width(),
        height: bounds.height(),
        angle: theta.to_degrees(),
    }
}

fn axis_aligned(points: &[Point2D]) -> OrientedRect {
    let bounds = Bounds::of(points.iter().copied())
        .unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 });
    OrientedRect {
        center: bounds.center(),
        width: bounds.width(),
        height: bounds.height(),
        angle: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Integer lattice points inside a `w x h` rectangle rotated by `deg` about `center`.
    fn rotated_grid(w: f64, h: f64, deg: f64, center: Point2D) -> Vec<Point2D> {
        let r = (w.hypot(h) / 2.0).ceil() as i64 + 1;
        let theta = deg.to_radians();
        let mut pts = Vec::new();
        for y in -r..=r {
            for x in -r..=r {
                let p = Point2D::new(x as f64, y as f64);
                let local = p.rotate(-theta);
                if local.x.abs() <= w / 2.0 && local.y.abs() <= h / 2.0 {
                    pts.push(p + center);
                }
            }
        }
        pts
    }

    /// Smallest axis-aligned area over sampled rotations.
    fn brute_force_area(points: &[Point2D], step_deg: f64) -> f64 {
        let mut best = f64::INFINITY;
        let mut deg = 0.0;
        while deg < 90.0 {
            let theta = f64::to_radians(deg);
            if let Some(b) = Bounds::of(points.iter().map(|p| p.rotate(-theta))) {
                best = best.min(b.area());
            }
            deg += step_deg;
        }
        best
    }

    fn encloses(frame: &BoundingFrame, points: &[Point2D], eps: f64) -> bool {
        let theta = frame.rotation.to_radians();
        points.iter().all(|&p| {
            let local = (p - frame.origin()).rotate(-theta);
            local.x >= -eps
                && local.y >= -eps
                && local.x <= frame.width + eps
                && local.y <= frame.height + eps
        })
    }

    #[test]
    fn test_axis_aligned_rectangle() {
        let pts: Vec<Point2D> = (0..100)
            .flat_map(|x| (0..50).map(move |y| Point2D::new(x as f64, y as f64)))
            .collect();
        let frame = minimal_bounding_rectangle(&pts, 100.0).unwrap();
        assert!(frame.rotation.abs() < 1e-9);
        assert!((frame.width - 99.0).abs() < 1e-9);
        assert!((frame.height - 49.0).abs() < 1e-9);
        assert!(frame.x.abs() < 1e-9 && frame.y.abs() < 1e-9);
    }

    #[test]
    fn test_rotated_30() {
        let pts = rotated_grid(100.0, 50.0, 30.0, Point2D::new(200.0, 200.0));
        let frame = minimal_bounding_rectangle(&pts, 100.0).unwrap();
        assert!((frame.rotation - 30.0).abs() < 2.0, "rotation {}", frame.rotation);
        assert!((frame.width - 100.0).abs() < 3.0, "width {}", frame.width);
        assert!((frame.height - 50.0).abs() < 3.0, "height {}", frame.height);
        assert!(encloses(&frame, &pts, 1e-6));
    }

    #[test]
    fn test_rotated_80_swaps() {
        let pts = rotated_grid(100.0, 50.0, 80.0, Point2D::new(200.0, 200.0));
        let frame = minimal_bounding_rectangle(&pts, 100.0).unwrap();
        assert!((frame.rotation + 10.0).abs() < 2.0, "rotation {}", frame.rotation);
        assert!((frame.width - 50.0).abs() < 3.0, "width {}", frame.width);
        assert!((frame.height - 100.0).abs() < 3.0, "height {}", frame.height);
    }

    #[test]
    fn test_matches_brute_force() {
        for deg in [0.0, 17.0, 33.0, 61.0] {
            let pts = rotated_grid(60.0, 25.0, deg, Point2D::new(0.0, 0.0));
            let rect = min_area_rect(&pts).unwrap();
            let brute = brute_force_area(&pts, 0.05);
            assert!(rect.area() <= brute + 1e-6, "deg {deg}: {} > {brute}", rect.area());
            assert!(rect.area() >= brute * 0.98, "deg {deg}: {} << {brute}", rect.area());
        }
    }

    #[test]
    fn test_too_few_points() {
        let pts = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)];
        assert_eq!(
            min_area_rect(&pts).unwrap_err(),
            SegmentError::InsufficientPoints { count: 2 }
        );
    }

    #[test]
    fn test_collinear_falls_back_to_axis_box() {
        let pts = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(0.0, 0.0),
        ];
        let frame = minimal_bounding_rectangle(&pts, 0.0).unwrap();
        assert_eq!(frame.rotation, 0.0);
        assert_eq!((frame.x, frame.y), (0.0, 0.0));
        assert_eq!((frame.width, frame.height), (10.0, 5.0));
    }

    #[test]
    fn test_small_region_rejected() {
        // 10 x 5 pixel block spans 9 x 4 = 36 < 100
        let pts: Vec<Point2D> = (0..10)
            .flat_map(|x| (0..5).map(move |y| Point2D::new(x as f64, y as f64)))
            .collect();
        match minimal_bounding_rectangle(&pts, 100.0) {
            Err(SegmentError::RegionTooSmall { area, min_area }) => {
                assert!((area - 36.0).abs() < 1e-9);
                assert_eq!(min_area, 100.0);
            }
            other => panic!("expected RegionTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_first_minimum_wins() {
        let rect = |area: f64, angle: f64| OrientedRect {
            center: Point2D::new(0.0, 0.0),
            width: area,
            height: 1.0,
            angle,
        };
        let best = smallest_first([rect(9.0, 1.0), rect(4.0, 2.0), rect(4.0, 3.0), rect(5.0, 4.0)]);
        assert_eq!(best.map(|r| r.angle), Some(2.0));
        assert!(smallest_first(Vec::new()).is_none());
    }

    #[test]
    fn test_square_stays_upright() {
        let pts = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
            Point2D::new(2.0, 1.0),
        ];
        let frame = minimal_bounding_rectangle(&pts, 0.0).unwrap();
        assert!(frame.rotation.abs() < 1e-9);
        assert!((frame.width - 4.0).abs() < 1e-9 && (frame.height - 4.0).abs() < 1e-9);
        assert!((frame.center().x - 2.0).abs() < 1e-9 && (frame.center().y - 2.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_no_larger_than_axis_box_and_encloses(
            raw in prop::collection::vec((-200i32..200, -200i32..200), 3..60)
        ) {
            let pts: Vec<Point2D> = raw.iter().map(|&(x, y)| Point2D::new(x as f64, y as f64)).collect();
            let rect = min_area_rect(&pts).unwrap();
            let aabb = Bounds::of(pts.iter().copied()).unwrap();
            prop_assert!(rect.area() <= aabb.area() + 1e-6);
            prop_assert!(encloses(&rect.to_frame(), &pts, 1e-6));
            // The axis-aligned fallback for collinear input is not a minimum
            if convex_hull(&pts).len() >= 3 {
                prop_assert!(rect.area() <= brute_force_area(&pts, 0.5) + 1e-6);
            }
        }
    }
}

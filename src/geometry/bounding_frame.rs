//! Corner-anchored rotated rectangle describing one detected photo.

use serde::{Deserialize, Serialize};

use super::point::Point2D;
use super::rotation::normalize_rotation;

/// A rotated rectangle anchored at its pre-rotation corner.
///
/// The rectangle spans `(0, 0)..(width, height)` in its own frame; that frame
/// is rotated by `rotation` degrees about the origin and then translated to
/// `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, normalized to (-45, 45] by the solver.
    pub rotation: f64,
}

impl BoundingFrame {
    /// Build a frame from a center-based rectangle, normalizing its rotation.
    pub fn from_center(center: Point2D, width: f64, height: f64, rotation_deg: f64) -> Self {
        let n = normalize_rotation(rotation_deg, width, height);
        let half = Point2D::new(n.width / 2.0, n.height / 2.0).rotate(n.rotation.to_radians());
        let origin = center - half;
        Self {
            x: origin.x,
            y: origin.y,
            width: n.width,
            height: n.height,
            rotation: n.rotation,
        }
    }

    pub fn origin(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point2D {
        self.to_world(Point2D::new(self.width / 2.0, self.height / 2.0))
    }

    /// Map a point from the rectangle's own frame into image space.
    pub fn to_world(&self, local: Point2D) -> Point2D {
        self.origin() + local.rotate(self.rotation.to_radians())
    }

    /// Corners in order origin, +width, +width+height, +height.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(self.width, 0.0),
            Point2D::new(self.width, self.height),
            Point2D::new(0.0, self.height),
        ]
        .map(|p| self.to_world(p))
    }

    /// Scale position and size by `factor`; rotation is unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
            rotation: self.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Point2D, b: Point2D) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_axis_aligned_from_center() {
        let f = BoundingFrame::from_center(Point2D::new(50.0, 25.0), 100.0, 50.0, 0.0);
        assert!(near(f.origin(), Point2D::new(0.0, 0.0)));
        assert!(near(f.corners()[2], Point2D::new(100.0, 50.0)));
        assert_eq!(f.area(), 5000.0);
    }

    #[test]
    fn test_center_round_trips_through_rotation() {
        let c = Point2D::new(40.0, 70.0);
        for angle in [-30.0, 12.5, 80.0, 170.0, -100.0] {
            let f = BoundingFrame::from_center(c, 60.0, 20.0, angle);
            assert!(near(f.center(), c), "angle {angle}");
            assert!(f.rotation > -45.0 && f.rotation <= 45.0);
        }
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let f = BoundingFrame::from_center(Point2D::new(0.0, 0.0), 100.0, 50.0, 90.0);
        assert_eq!(f.rotation, 0.0);
        assert_eq!((f.width, f.height), (50.0, 100.0));
        assert!(near(f.origin(), Point2D::new(-25.0, -50.0)));
    }

    #[test]
    fn test_scaled() {
        let f = BoundingFrame { x: 10.0, y: 20.0, width: 30.0, height: 40.0, rotation: 12.0 };
        let s = f.scaled(2.0);
        assert_eq!(s, BoundingFrame { x: 20.0, y: 40.0, width: 60.0, height: 80.0, rotation: 12.0 });
        assert!(near(s.center(), f.center() * 2.0));
    }
}

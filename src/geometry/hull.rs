//! Convex hull via Andrew's monotone chain.

use super::point::{cross, Point2D};

/// Compute the convex hull of `points` in counter-clockwise order.
///
/// Collinear and duplicate points are dropped from the hull. Input of one
/// point or less is returned unchanged; collinear input yields fewer than
/// three vertices and callers must handle that.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));

    let lower = half_hull(pts.iter());
    let upper = half_hull(pts.iter().rev());

    // The last point of each chain is the first point of the other
    let mut hull = Vec::with_capacity(lower.len() + upper.len());
    hull.extend_from_slice(&lower[..lower.len() - 1]);
    hull.extend_from_slice(&upper[..upper.len() - 1]);
    hull
}

fn half_hull<'a, I>(points: I) -> Vec<Point2D>
where
    I: Iterator<Item = &'a Point2D>,
{
    let mut chain: Vec<Point2D> = Vec::new();
    for &p in points {
        while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Signed area of a closed polygon (positive for counter-clockwise).
pub fn signed_area(polygon: &[Point2D]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

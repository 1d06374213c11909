//! Canonical rotation for rectangles.
//!
//! A rectangle rotated by θ is the same shape as one rotated by θ ± 180°, or
//! by θ ± 90° with width and height swapped. Normalization picks the single
//! description whose angle lies in (-45°, 45°].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRotation {
    /// Degrees in (-45, 45].
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
}

/// Fold an angle in degrees into (-180, 180].
pub fn fold_degrees(degrees: f64) -> f64 {
    if degrees > -180.0 && degrees <= 180.0 {
        return degrees;
    }
    let r = degrees.rem_euclid(360.0);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Reduce `rotation` to (-45°, 45°], swapping `width`/`height` when a
/// quarter turn is removed.
pub fn normalize_rotation(rotation: f64, width: f64, height: f64) -> NormalizedRotation {
    let mut rotation = fold_degrees(rotation);
    let (mut width, mut height) = (width, height);

    // Near-180° is the same rectangle as near-0°
    if rotation > 135.0 || rotation <= -135.0 {
        rotation = fold_degrees(rotation + 180.0);
    }

    if rotation > 45.0 {
        rotation -= 90.0;
        std::mem::swap(&mut width, &mut height);
    } else if rotation <= -45.0 {
        // -45° itself maps to +45° to keep the interval half-open
        rotation += 90.0;
        std::mem::swap(&mut width, &mut height);
    }

    NormalizedRotation { rotation, width, height }
}

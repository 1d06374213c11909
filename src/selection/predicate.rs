//! Color similarity rules for region growing.
//!
//! A predicate decides whether a candidate pixel belongs to the same photo as
//! the seed. Predicates are pure and `Sync`, so one instance can serve every
//! seed on a sheet in parallel.

use serde::{Deserialize, Serialize};

use crate::config::ProcessingConfig;
use crate::error::{Result, SegmentError};
use crate::raster::Rgb;

/// Decides whether `candidate` belongs to the region grown from `seed`.
pub trait ColorMatch: Sync {
    fn matches(&self, candidate: Rgb, seed: Rgb) -> bool;
}

impl<F> ColorMatch for F
where
    F: Fn(Rgb, Rgb) -> bool + Sync,
{
    #[inline]
    fn matches(&self, candidate: Rgb, seed: Rgb) -> bool {
        self(candidate, seed)
    }
}

/// Built-in similarity strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorPredicate {
    /// Brightness differs from the seed's by less than `threshold`.
    BrightnessDistance { threshold: f32 },
    /// Brightness is below `white_level`, i.e. the pixel is not scanner background.
    NotBackground { white_level: f32 },
    /// Every RGB channel is within `tolerance` of the seed.
    ChannelTolerance { tolerance: u8 },
}

impl ColorPredicate {
    /// Brightness predicate tuned for the seed's own brightness.
    ///
    /// Bright seeds sit close to the white scan background, so they get the
    /// stricter `bright_seed_threshold` to keep the fill from leaking out.
    pub fn for_seed(seed: Rgb, config: &ProcessingConfig) -> Self {
        let threshold = if seed.brightness() > config.bright_seed_level {
            config.bright_seed_threshold
        } else {
            config.brightness_threshold
        };
        ColorPredicate::BrightnessDistance { threshold }
    }

    /// Reject thresholds that are NaN, infinite or negative.
    pub fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            ColorPredicate::BrightnessDistance { threshold } => ("threshold", threshold),
            ColorPredicate::NotBackground { white_level } => ("white_level", white_level),
            ColorPredicate::ChannelTolerance { .. } => return Ok(()),
        };
        if !value.is_finite() || value < 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "predicate {name} must be a non-negative number, got {value}"
            )));
        }
        Ok(())
    }
}

impl ColorMatch for ColorPredicate {
    #[inline]
    fn matches(&self, candidate: Rgb, seed: Rgb) -> bool {
        match *self {
            ColorPredicate::BrightnessDistance { threshold } => {
                (candidate.brightness() - seed.brightness()).abs() < threshold
            }
            ColorPredicate::NotBackground { white_level } => candidate.brightness() < white_level,
            ColorPredicate::ChannelTolerance { tolerance } => {
                let tol = tolerance as i16;
                (candidate.r as i16 - seed.r as i16).abs() <= tol
                    && (candidate.g as i16 - seed.g as i16).abs() <= tol
                    && (candidate.b as i16 - seed.b as i16).abs() <= tol
            }
        }
    }
}

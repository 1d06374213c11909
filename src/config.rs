//! Per-request processing configuration.
//!
//! A `ProcessingConfig` is passed by reference into every entry point and is
//! never mutated by the engine. It derives serde so the surrounding
//! application can ship it across process boundaries as plain data.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};
use crate::selection::ColorPredicate;

/// Scale applied to the sheet before flood fill.
pub const DEFAULT_DOWNSAMPLE_FACTOR: f64 = 0.5;
/// Maximum brightness distance from the seed for ordinary seeds.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 40.0;
/// Stricter distance used when the seed itself is bright.
pub const DEFAULT_BRIGHT_SEED_THRESHOLD: f32 = 20.0;
/// Seed brightness above which the stricter threshold applies.
pub const DEFAULT_BRIGHT_SEED_LEVEL: f32 = 180.0;
pub const DEFAULT_MIN_AREA: f64 = 100.0;
pub const DEFAULT_PADDING: f64 = 10.0;
pub const DEFAULT_FILL_STEP: usize = 1;
pub const DEFAULT_MAX_PIXELS: usize = 500_000;
/// Rotations with a magnitude at or below this (degrees) are left as is.
pub const DEFAULT_ROTATION_DEAD_ZONE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Downsample factor in (0, 1]. Values of 1 or more disable downsampling.
    pub downsample_factor: f64,
    pub brightness_threshold: f32,
    pub bright_seed_threshold: f32,
    pub bright_seed_level: f32,
    /// Minimum rectangle area, measured in downsampled pixels.
    pub min_area: f64,
    /// Crop margin in original-image pixels.
    pub padding: f64,
    pub fill_step: usize,
    pub max_pixels: usize,
    pub rotation_dead_zone: f64,
    /// Fixed membership rule. `None` picks a brightness rule from the seed color.
    pub predicate: Option<ColorPredicate>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            downsample_factor: DEFAULT_DOWNSAMPLE_FACTOR,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            bright_seed_threshold: DEFAULT_BRIGHT_SEED_THRESHOLD,
            bright_seed_level: DEFAULT_BRIGHT_SEED_LEVEL,
            min_area: DEFAULT_MIN_AREA,
            padding: DEFAULT_PADDING,
            fill_step: DEFAULT_FILL_STEP,
            max_pixels: DEFAULT_MAX_PIXELS,
            rotation_dead_zone: DEFAULT_ROTATION_DEAD_ZONE,
            predicate: None,
        }
    }
}

impl ProcessingConfig {
    pub fn with_downsample_factor(mut self, factor: f64) -> Self {
        self.downsample_factor = factor;
        self
    }

    pub fn with_brightness_threshold(mut self, threshold: f32) -> Self {
        self.brightness_threshold = threshold;
        self
    }

    pub fn with_bright_seed_threshold(mut self, threshold: f32) -> Self {
        self.bright_seed_threshold = threshold;
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_fill_step(mut self, step: usize) -> Self {
        self.fill_step = step;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: usize) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn with_rotation_dead_zone(mut self, degrees: f64) -> Self {
        self.rotation_dead_zone = degrees;
        self
    }

    pub fn with_predicate(mut self, predicate: ColorPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Effective factor used for resampling, capped at 1.0.
    pub fn effective_downsample(&self) -> f64 {
        self.downsample_factor.min(1.0)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.downsample_factor.is_finite() || self.downsample_factor <= 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "downsample_factor must be positive, got {}",
                self.downsample_factor
            )));
        }
        if self.fill_step == 0 {
            return Err(SegmentError::InvalidConfig("fill_step must be at least 1".into()));
        }
        if self.max_pixels == 0 {
            return Err(SegmentError::InvalidConfig("max_pixels must be at least 1".into()));
        }
        let thresholds = [
            ("brightness_threshold", self.brightness_threshold),
            ("bright_seed_threshold", self.bright_seed_threshold),
            ("bright_seed_level", self.bright_seed_level),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(SegmentError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "min_area must be non-negative, got {}",
                self.min_area
            )));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if !self.rotation_dead_zone.is_finite() || self.rotation_dead_zone < 0.0 {
            return Err(SegmentError::InvalidConfig(format!(
                "rotation_dead_zone must be non-negative, got {}",
                self.rotation_dead_zone
            )));
        }
        if let Some(predicate) = &self.predicate {
            predicate.validate()?;
        }
        Ok(())
    }
}

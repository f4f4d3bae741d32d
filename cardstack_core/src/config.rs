// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack layout configuration and gesture tuning constants.
//!
//! [`StackConfig`] holds the host-facing properties (how many cards are
//! visible, how far each one is offset, how wide cards are relative to the
//! container, and which directions commit). [`GestureTuning`] holds the
//! thresholds and animation timings used by
//! [`CardGestureController`](crate::gesture::CardGestureController).

use core::fmt;

use crate::direction::DirectionSet;

/// Errors reported by [`StackConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `visible_count` was zero.
    ZeroVisibleCards,
    /// `width_ratio` was not in `(0, 1]`.
    WidthRatioOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVisibleCards => write!(f, "visible card count must be at least 1"),
            Self::WidthRatioOutOfRange(ratio) => {
                write!(f, "card width ratio {ratio} is outside (0, 1]")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Layout and interaction properties of a card stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    /// Maximum number of cards materialized at once (at least 1).
    pub visible_count: usize,
    /// Vertical distance between consecutive cards, in points.
    pub y_offset: u32,
    /// Card width as a fraction of the container width, in `(0, 1]`.
    pub width_ratio: f64,
    /// Directions in which a release may commit.
    pub allowed_directions: DirectionSet,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StackConfig {
    /// Three cards, 10 points apart, half the container wide, any direction.
    pub const DEFAULT: Self = Self {
        visible_count: 3,
        y_offset: 10,
        width_ratio: 0.5,
        allowed_directions: DirectionSet::ALL,
    };

    /// Checks that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroVisibleCards`] if `visible_count` is zero,
    /// or [`ConfigError::WidthRatioOutOfRange`] if `width_ratio` is not a
    /// finite value in `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_count == 0 {
            return Err(ConfigError::ZeroVisibleCards);
        }
        if !(self.width_ratio > 0.0 && self.width_ratio <= 1.0) {
            return Err(ConfigError::WidthRatioOutOfRange(self.width_ratio));
        }
        Ok(())
    }

    /// Returns a copy with every field forced into range.
    ///
    /// A zero `visible_count` becomes 1. A non-finite or non-positive
    /// `width_ratio` falls back to the default; ratios above 1 become 1.
    #[must_use]
    pub fn clamped(self) -> Self {
        let width_ratio = if self.width_ratio.is_finite() && self.width_ratio > 0.0 {
            self.width_ratio.min(1.0)
        } else {
            Self::DEFAULT.width_ratio
        };
        Self {
            visible_count: self.visible_count.max(1),
            width_ratio,
            ..self
        }
    }
}

/// Thresholds and timings for a single card's drag lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureTuning {
    /// Fraction of the drag origin's coordinate a release must exceed to
    /// commit.
    pub removal_ratio: f64,
    /// Lowest opacity reached while dragging.
    pub min_alpha: f64,
    /// Rotation (radians) reached when the horizontal translation equals the
    /// full horizontal distance.
    pub max_rotation: f64,
    /// Multiple of the origin coordinate that exit animations travel to.
    pub exit_scale: f64,
    /// Rotation magnitude (radians) at the end of a horizontal exit.
    pub exit_rotation: f64,
    /// Duration of exit and snap-back animations, in seconds.
    pub animation_duration: f64,
    /// Damping ratio of the snap-back spring.
    pub spring_damping: f64,
    /// Duration of layout animations, in seconds.
    pub layout_duration: f64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GestureTuning {
    /// The stock tuning: commit past 70 %, fade to half, rotate up to π/8.
    pub const DEFAULT: Self = Self {
        removal_ratio: 0.7,
        min_alpha: 0.5,
        max_rotation: core::f64::consts::FRAC_PI_8,
        exit_scale: 4.0,
        exit_rotation: 1.0,
        animation_duration: 0.3,
        spring_damping: 0.5,
        layout_duration: 0.3,
    };
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation records handed to the host's animation facility.
//!
//! The core never interpolates. When it wants a card to move, it writes the
//! target [`CardPose`] into the [`CardStore`](crate::card::CardStore)
//! immediately (so the model always holds final values) and queues a
//! [`CardAnimation`] describing how the presenter should get there. The host
//! drains the queue through
//! [`CardChanges::animations`](crate::card::CardChanges::animations), runs
//! the animations on its display thread, and reports each completion back
//! with
//! [`CardStackController::animation_finished`](crate::stack::CardStackController::animation_finished).
//!
//! Completions are later, discrete events. Reporting one that the core does
//! not track (or reporting it twice) is harmless.

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::card::CardId;

/// Identifies one queued animation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub u64);

impl fmt::Debug for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationId({})", self.0)
    }
}

/// Interpolation curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Platform default ease.
    Ease,
    /// Damped spring.
    Spring {
        /// Damping ratio; 1.0 is critically damped.
        damping_ratio: f64,
        /// Initial velocity, in units of the total distance per second.
        initial_velocity: f64,
    },
}

/// How an animation runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Duration in seconds.
    pub duration: f64,
    /// Interpolation curve.
    pub curve: Curve,
    /// Whether the card keeps receiving input while animating.
    pub allows_interaction: bool,
}

impl Timing {
    /// An eased animation that allows interaction.
    #[must_use]
    pub const fn ease(duration: f64) -> Self {
        Self {
            duration,
            curve: Curve::Ease,
            allows_interaction: true,
        }
    }

    /// A spring animation with zero initial velocity that allows interaction.
    #[must_use]
    pub const fn spring(duration: f64, damping_ratio: f64) -> Self {
        Self {
            duration,
            curve: Curve::Spring {
                damping_ratio,
                initial_velocity: 0.0,
            },
            allows_interaction: true,
        }
    }
}

/// A partial set of card properties. `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardPose {
    /// Center of the card in container coordinates.
    pub center: Option<Point>,
    /// Card size.
    pub size: Option<Size>,
    /// Rotation around the center, in radians.
    pub rotation: Option<f64>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
}

impl CardPose {
    /// A pose that places the card exactly in `frame`.
    #[must_use]
    pub fn frame(frame: Rect) -> Self {
        Self {
            center: Some(frame.center()),
            size: Some(frame.size()),
            ..Self::default()
        }
    }

    /// Sets the center.
    #[must_use]
    pub fn with_center(self, center: Point) -> Self {
        Self {
            center: Some(center),
            ..self
        }
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..self
        }
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: Some(opacity),
            ..self
        }
    }
}

/// What happens when the host reports an animation finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Completion {
    /// Nothing.
    None,
    /// The card's gesture returns to idle (end of a snap-back).
    Settle,
    /// The card is removed from display and its handle destroyed (end of an
    /// exit).
    Detach,
}

/// One queued animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardAnimation {
    /// Identity used to report completion.
    pub id: AnimationId,
    /// The animated card.
    pub card: CardId,
    /// Target values; already written to the store.
    pub pose: CardPose,
    /// Duration and curve.
    pub timing: Timing,
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-card drag lifecycle.
//!
//! A [`CardGestureController`] turns the begin/change/end phases of a drag
//! on one card into live feedback (position, fade, rotation) and, on
//! release, into a terminal [`DragOutcome`]:
//!
//! ```text
//!   Idle ──begin──► Dragging ──end──┬──► Committing ──(exit done)──► removed
//!    ▲                  ▲           │
//!    │                  └──begin────┤
//!    └────(spring done)─────────────┴──► Cancelling
//! ```
//!
//! The controller never touches the stack window. It writes poses into the
//! [`CardStore`] and returns outcomes to its owner, the
//! [`CardStackController`](crate::stack::CardStackController), which decides
//! what a commit means.

use kurbo::{Point, Size, Vec2};

use crate::animation::{AnimationId, CardPose, Completion, Timing};
use crate::card::{CardId, CardStore};
use crate::config::GestureTuning;
use crate::direction::{Direction, DirectionSet};

/// One phase of a continuous drag, as delivered by the host's recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    /// The drag started.
    Began,
    /// The drag moved; carries the translation since the drag began.
    Changed(Vec2),
    /// The drag ended; carries the final translation.
    Ended(Vec2),
}

/// What a drag phase did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The phase did not apply (wrong state, stale or non-interactive card).
    Ignored,
    /// A drag session started.
    Began,
    /// Live feedback was updated.
    Moved,
    /// The release committed in a direction; the card is leaving.
    Committed(Direction),
    /// The release fell short; the card is springing back.
    Cancelled,
}

/// Transient state of an active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Card center when the drag began.
    pub origin: Point,
    /// Distances used to normalize translation: the origin plus half the
    /// card size on each axis.
    pub full_distance: Size,
    /// Latest translation since the drag began.
    pub translation: Vec2,
}

/// Where a card's gesture is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureState {
    /// Resting; accepts a new drag.
    Idle,
    /// A drag is in progress.
    Dragging(DragSession),
    /// Springing back to the origin; accepts a new drag.
    Cancelling(AnimationId),
    /// Playing the exit animation; accepts nothing.
    Committing {
        /// Direction of the commit.
        direction: Direction,
        /// The exit animation.
        animation: AnimationId,
    },
}

/// Drives one card's drag lifecycle.
#[derive(Clone, Debug)]
pub struct CardGestureController {
    card: CardId,
    state: GestureState,
}

impl CardGestureController {
    /// Creates an idle controller for `card`.
    #[must_use]
    pub const fn new(card: CardId) -> Self {
        Self {
            card,
            state: GestureState::Idle,
        }
    }

    /// Returns the card this controller drives.
    #[must_use]
    pub const fn card(&self) -> CardId {
        self.card
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Returns whether a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Starts a drag session at the card's current center.
    ///
    /// Returns `false` (and changes nothing) while already dragging or
    /// committing.
    pub fn begin_drag(&mut self, store: &CardStore) -> bool {
        match self.state {
            GestureState::Idle | GestureState::Cancelling(_) => {}
            GestureState::Dragging(_) | GestureState::Committing { .. } => return false,
        }
        let origin = store.center(self.card);
        let size = store.size(self.card);
        self.state = GestureState::Dragging(DragSession {
            origin,
            full_distance: Size::new(origin.x + size.width / 2.0, origin.y + size.height / 2.0),
            translation: Vec2::ZERO,
        });
        true
    }

    /// Moves the card to `origin + translation` and updates fade and
    /// rotation.
    ///
    /// Returns `false` when no drag session is active.
    pub fn update_drag(
        &mut self,
        store: &mut CardStore,
        translation: Vec2,
        tuning: &GestureTuning,
    ) -> bool {
        let GestureState::Dragging(session) = &mut self.state else {
            return false;
        };
        session.translation = translation;
        let session = *session;

        store.set_center(self.card, session.origin + translation);
        store.set_opacity(
            self.card,
            fade_for(translation, session.full_distance, tuning.min_alpha),
        );
        store.set_rotation(
            self.card,
            rotation_for(translation, session.full_distance, tuning.max_rotation),
        );
        true
    }

    /// Classifies the release and starts the matching animation.
    ///
    /// A commit plays the exit animation with a [`Completion::Detach`]; the
    /// owner must remove the card from its window when it sees
    /// [`DragOutcome::Committed`]. A cancel springs back to the origin with
    /// rotation 0 and full opacity.
    pub fn end_drag(
        &mut self,
        store: &mut CardStore,
        translation: Vec2,
        allowed: DirectionSet,
        tuning: &GestureTuning,
    ) -> DragOutcome {
        let GestureState::Dragging(session) = self.state else {
            return DragOutcome::Ignored;
        };

        match classify_release(translation, session.origin, allowed, tuning.removal_ratio) {
            Some(direction) => {
                self.commit(store, direction, tuning);
                DragOutcome::Committed(direction)
            }
            None => {
                let pose = CardPose::default()
                    .with_center(session.origin)
                    .with_rotation(0.0)
                    .with_opacity(1.0);
                let animation = store.animate(
                    self.card,
                    pose,
                    Timing::spring(tuning.animation_duration, tuning.spring_damping),
                    Completion::Settle,
                );
                self.state = GestureState::Cancelling(animation);
                DragOutcome::Cancelled
            }
        }
    }

    /// Plays the exit animation toward `direction` without a release.
    ///
    /// The exit is measured from the drag origin while dragging and from the
    /// card's current center otherwise. A card that is already committing
    /// keeps its running exit and returns that animation's id.
    pub fn commit(
        &mut self,
        store: &mut CardStore,
        direction: Direction,
        tuning: &GestureTuning,
    ) -> AnimationId {
        let current = store.center(self.card);
        let origin = match self.state {
            GestureState::Committing { animation, .. } => return animation,
            GestureState::Dragging(session) => session.origin,
            GestureState::Idle | GestureState::Cancelling(_) => current,
        };
        let animation = store.animate(
            self.card,
            exit_pose(current, origin, direction, tuning),
            Timing::ease(tuning.animation_duration),
            Completion::Detach,
        );
        self.state = GestureState::Committing {
            direction,
            animation,
        };
        animation
    }

    /// Notifies the controller that `animation` completed.
    ///
    /// Returns `true` if it was this card's snap-back, which returns the
    /// controller to [`GestureState::Idle`].
    pub fn animation_finished(&mut self, animation: AnimationId) -> bool {
        match self.state {
            GestureState::Cancelling(current) if current == animation => {
                self.state = GestureState::Idle;
                true
            }
            _ => false,
        }
    }
}

/// Opacity for a drag translation, never below `min_alpha`.
///
/// `1 - max(|tx| / (2 * w), |ty| / (2 * h))`, where `w` and `h` are the
/// full distances. Non-positive distances contribute nothing.
#[must_use]
pub fn fade_for(translation: Vec2, full_distance: Size, min_alpha: f64) -> f64 {
    let fx = normalized(translation.x, full_distance.width) / 2.0;
    let fy = normalized(translation.y, full_distance.height) / 2.0;
    (1.0 - fx.max(fy)).max(min_alpha)
}

/// Rotation for a drag translation: `max_rotation * tx / w`.
#[must_use]
pub fn rotation_for(translation: Vec2, full_distance: Size, max_rotation: f64) -> f64 {
    if full_distance.width > 0.0 {
        max_rotation * (translation.x / full_distance.width)
    } else {
        0.0
    }
}

/// Returns the commit direction for a release, or `None` to cancel.
///
/// Directions are tested in [`Direction::PRIORITY`] order; a direction
/// commits when it is allowed and the displacement in its sense exceeds
/// `removal_ratio` times the origin's coordinate on its axis.
#[must_use]
pub fn classify_release(
    translation: Vec2,
    origin: Point,
    allowed: DirectionSet,
    removal_ratio: f64,
) -> Option<Direction> {
    allowed.iter().find(|&direction| {
        let (displacement, reference) = if direction.is_horizontal() {
            (translation.x, origin.x)
        } else {
            (translation.y, origin.y)
        };
        direction.sign() * displacement > reference * removal_ratio
    })
}

fn exit_pose(
    current: Point,
    origin: Point,
    direction: Direction,
    tuning: &GestureTuning,
) -> CardPose {
    let reach = tuning.exit_scale * direction.sign();
    if direction.is_horizontal() {
        CardPose::default()
            .with_center(Point::new(origin.x * reach, current.y))
            .with_rotation(tuning.exit_rotation * direction.sign())
    } else {
        CardPose::default().with_center(Point::new(current.x, origin.y * reach))
    }
}

fn normalized(value: f64, distance: f64) -> f64 {
    if distance > 0.0 {
        value.abs() / distance
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use crate::card::ContentId;

    use super::*;

    const ORIGIN: Point = Point::new(100.0, 100.0);
    const EPS: f64 = 1e-9;

    /// A 100x100 card centered at (100, 100).
    fn card() -> (CardStore, CardGestureController) {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        store.apply_pose(id, CardPose::frame(Rect::new(50.0, 50.0, 150.0, 150.0)));
        (store, CardGestureController::new(id))
    }

    #[test]
    fn classify_examples() {
        let all = DirectionSet::ALL;
        assert_eq!(
            classify_release(Vec2::new(80.0, 0.0), ORIGIN, all, 0.7),
            Some(Direction::Right)
        );
        assert_eq!(
            classify_release(Vec2::new(0.0, -80.0), ORIGIN, all, 0.7),
            Some(Direction::Up)
        );
        assert_eq!(classify_release(Vec2::new(50.0, 0.0), ORIGIN, all, 0.7), None);
        assert_eq!(
            classify_release(Vec2::new(-71.0, 0.0), ORIGIN, all, 0.7),
            Some(Direction::Left)
        );
        assert_eq!(
            classify_release(Vec2::new(0.0, 71.0), ORIGIN, all, 0.7),
            Some(Direction::Down)
        );
    }

    #[test]
    fn classify_threshold_is_strict() {
        assert_eq!(
            classify_release(Vec2::new(70.0, 0.0), ORIGIN, DirectionSet::ALL, 0.7),
            None
        );
    }

    #[test]
    fn classify_prefers_horizontal() {
        // Both right and down qualify; right wins.
        assert_eq!(
            classify_release(Vec2::new(90.0, 90.0), ORIGIN, DirectionSet::ALL, 0.7),
            Some(Direction::Right)
        );
        // Without right, down is next in line.
        let no_right = DirectionSet::ALL.without(Direction::Right);
        assert_eq!(
            classify_release(Vec2::new(90.0, 90.0), ORIGIN, no_right, 0.7),
            Some(Direction::Down)
        );
    }

    #[test]
    fn classify_respects_allowed() {
        assert_eq!(
            classify_release(Vec2::new(80.0, 0.0), ORIGIN, DirectionSet::VERTICAL, 0.7),
            None
        );
        assert_eq!(
            classify_release(Vec2::new(500.0, 500.0), ORIGIN, DirectionSet::NONE, 0.7),
            None
        );
    }

    #[test]
    fn fade_never_below_min() {
        let full = Size::new(150.0, 150.0);
        for magnitude in [0.0, 10.0, 300.0, 1.0e6, 1.0e12] {
            let alpha = fade_for(Vec2::new(magnitude, -magnitude), full, 0.5);
            assert!(alpha >= 0.5, "alpha {alpha} below floor at {magnitude}");
            assert!(alpha <= 1.0, "alpha {alpha} above 1 at {magnitude}");
        }
        assert!((fade_for(Vec2::new(75.0, 0.0), full, 0.5) - 0.75).abs() < EPS);
    }

    #[test]
    fn fade_with_degenerate_distance() {
        let alpha = fade_for(Vec2::new(10.0, 10.0), Size::ZERO, 0.5);
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn rotation_is_proportional() {
        let full = Size::new(150.0, 150.0);
        let r = rotation_for(Vec2::new(150.0, 0.0), full, core::f64::consts::FRAC_PI_8);
        assert!((r - core::f64::consts::FRAC_PI_8).abs() < EPS);
        let l = rotation_for(Vec2::new(-75.0, 40.0), full, core::f64::consts::FRAC_PI_8);
        assert!((l + core::f64::consts::FRAC_PI_8 / 2.0).abs() < EPS);
    }

    #[test]
    fn begin_captures_origin_and_distance() {
        let (store, mut gesture) = card();
        assert!(gesture.begin_drag(&store));
        let GestureState::Dragging(session) = gesture.state() else {
            panic!("expected dragging, got {:?}", gesture.state());
        };
        assert_eq!(session.origin, ORIGIN);
        assert_eq!(session.full_distance, Size::new(150.0, 150.0));
        assert!(!gesture.begin_drag(&store), "re-entry must be refused");
    }

    #[test]
    fn update_moves_fades_and_rotates() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        gesture.begin_drag(&store);
        assert!(gesture.update_drag(&mut store, Vec2::new(30.0, -15.0), &tuning));

        let id = gesture.card();
        assert_eq!(store.center(id), Point::new(130.0, 85.0));
        assert!((store.opacity(id) - 0.9).abs() < EPS);
        assert!((store.rotation(id) - tuning.max_rotation * 0.2).abs() < EPS);
    }

    #[test]
    fn update_without_session_is_ignored() {
        let (mut store, mut gesture) = card();
        assert!(!gesture.update_drag(&mut store, Vec2::new(5.0, 5.0), &GestureTuning::default()));
        assert_eq!(store.center(gesture.card()), ORIGIN);
    }

    #[test]
    fn cancel_springs_back_and_settles() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        gesture.begin_drag(&store);
        gesture.update_drag(&mut store, Vec2::new(50.0, 0.0), &tuning);
        let outcome = gesture.end_drag(&mut store, Vec2::new(50.0, 0.0), DirectionSet::ALL, &tuning);
        assert_eq!(outcome, DragOutcome::Cancelled);

        let id = gesture.card();
        assert_eq!(store.center(id), ORIGIN);
        assert_eq!(store.rotation(id), 0.0);
        assert_eq!(store.opacity(id), 1.0);

        let GestureState::Cancelling(animation) = gesture.state() else {
            panic!("expected cancelling, got {:?}", gesture.state());
        };
        let queued = store.evaluate().animations;
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].timing, Timing::spring(0.3, 0.5));

        assert_eq!(store.finish_animation(animation), Some((id, Completion::Settle)));
        assert!(gesture.animation_finished(animation));
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn drag_can_restart_while_springing_back() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        gesture.begin_drag(&store);
        gesture.end_drag(&mut store, Vec2::new(10.0, 0.0), DirectionSet::ALL, &tuning);
        assert!(gesture.begin_drag(&store));
        assert!(gesture.is_dragging());
    }

    #[test]
    fn commit_right_exits_with_rotation() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        gesture.begin_drag(&store);
        gesture.update_drag(&mut store, Vec2::new(80.0, 12.0), &tuning);
        let outcome = gesture.end_drag(&mut store, Vec2::new(80.0, 12.0), DirectionSet::ALL, &tuning);
        assert_eq!(outcome, DragOutcome::Committed(Direction::Right));

        let id = gesture.card();
        assert_eq!(store.center(id), Point::new(400.0, 112.0));
        assert_eq!(store.rotation(id), 1.0);
        assert!(matches!(
            gesture.state(),
            GestureState::Committing {
                direction: Direction::Right,
                ..
            }
        ));
        assert!(!gesture.begin_drag(&store), "committing cards take no drags");
        assert_eq!(
            gesture.end_drag(&mut store, Vec2::ZERO, DirectionSet::ALL, &tuning),
            DragOutcome::Ignored,
            "commit is reported exactly once"
        );
    }

    #[test]
    fn commit_up_exits_vertically() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        gesture.begin_drag(&store);
        gesture.update_drag(&mut store, Vec2::new(5.0, -80.0), &tuning);
        let before_rotation = store.rotation(gesture.card());
        let outcome = gesture.end_drag(&mut store, Vec2::new(5.0, -80.0), DirectionSet::ALL, &tuning);
        assert_eq!(outcome, DragOutcome::Committed(Direction::Up));

        let id = gesture.card();
        assert_eq!(store.center(id), Point::new(105.0, -400.0));
        assert_eq!(store.rotation(id), before_rotation, "vertical exits keep rotation");
    }

    #[test]
    fn commit_without_release_exits_from_center() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        let exit = gesture.commit(&mut store, Direction::Left, &tuning);

        let id = gesture.card();
        assert_eq!(store.center(id), Point::new(-400.0, 100.0));
        assert_eq!(store.rotation(id), -1.0);
        assert_eq!(store.finish_animation(exit), Some((id, Completion::Detach)));
    }

    #[test]
    fn commit_is_idempotent_while_committing() {
        let (mut store, mut gesture) = card();
        let tuning = GestureTuning::default();
        let first = gesture.commit(&mut store, Direction::Down, &tuning);
        let second = gesture.commit(&mut store, Direction::Up, &tuning);
        assert_eq!(first, second, "running exit is kept");
        assert_eq!(store.in_flight_count(), 1);
        assert_eq!(store.center(gesture.card()), Point::new(100.0, 400.0));
    }
}

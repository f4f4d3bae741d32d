// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardstack_core::backend::Presenter;
use cardstack_core::card::CardId;
use cardstack_core::direction::Direction;
use cardstack_core::gesture::{DragOutcome, DragPhase};
use cardstack_core::stack::CardStackController;
use kurbo::Vec2;

use crate::presenter::HeadlessPresenter;

/// Presents pending changes and finishes every animation until the stack is
/// quiet. Returns the number of animations finished.
pub fn settle(stack: &mut CardStackController, presenter: &mut HeadlessPresenter) -> usize {
    let mut finished = 0;
    loop {
        let changes = stack.take_changes();
        presenter.apply(stack.store(), &changes);
        let pending = presenter.take_pending();
        if pending.is_empty() && changes.is_empty() {
            return finished;
        }
        for animation in pending {
            stack.animation_finished(animation.id);
            finished += 1;
        }
    }
}

/// Drags `card` to `translation` in `steps` equal moves, then releases.
///
/// Returns the release outcome, or [`DragOutcome::Ignored`] if the drag
/// could not begin.
pub fn drag(
    stack: &mut CardStackController,
    card: CardId,
    translation: Vec2,
    steps: u32,
) -> DragOutcome {
    if stack.handle_drag(card, DragPhase::Began) != DragOutcome::Began {
        return DragOutcome::Ignored;
    }
    let steps = steps.max(1);
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        stack.handle_drag(card, DragPhase::Changed(translation * t));
    }
    stack.handle_drag(card, DragPhase::Ended(translation))
}

/// A translation that clears the commit threshold of a card centered at
/// `origin` by a comfortable margin.
#[must_use]
pub fn release_translation(origin: kurbo::Point, direction: Direction) -> Vec2 {
    let d = direction.sign();
    if direction.is_horizontal() {
        Vec2::new(d * origin.x, 0.0)
    } else {
        Vec2::new(0.0, d * origin.y)
    }
}

/// Swipes the front card out in `direction`.
///
/// Returns [`DragOutcome::Ignored`] when the window is empty.
pub fn swipe(stack: &mut CardStackController, direction: Direction) -> DragOutcome {
    let Some(card) = stack.front().map(|e| e.card()) else {
        return DragOutcome::Ignored;
    };
    let origin = stack.store().center(card);
    drag(stack, card, release_translation(origin, direction), 4)
}

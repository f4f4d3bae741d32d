// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter contract for platform integrations.
//!
//! The core owns the card window, gesture state, and the model values of
//! every card. A platform integration owns the native views and the
//! animation facility. Each turn of the host's event loop it:
//!
//! 1. Feeds gesture phases, resizes, and commands into the
//!    [`CardStackController`](crate::stack::CardStackController).
//! 2. Calls [`take_changes`](crate::stack::CardStackController::take_changes)
//!    and hands the result to its [`Presenter`].
//! 3. Starts the queued animations and, when each one completes, reports it
//!    through
//!    [`animation_finished`](crate::stack::CardStackController::animation_finished).

use crate::card::{CardChanges, CardStore};

/// Applies card changes to a platform-native view tree.
///
/// ```rust,ignore
/// fn on_event(stack: &mut CardStackController, presenter: &mut impl Presenter) {
///     let changes = stack.take_changes();
///     presenter.apply(stack.store(), &changes);
///     for animation in &changes.animations {
///         start_native_animation(animation, move || stack.animation_finished(animation.id));
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies `changes` to the backing views, reading current values from
    /// `store` as needed.
    fn apply(&mut self, store: &CardStore, changes: &CardChanges);
}

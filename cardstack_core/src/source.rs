// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-supplied data source and delegate.

use crate::card::{CardIndex, ContentId};
use crate::direction::Direction;

/// Supplies cards to a [`CardStackController`](crate::stack::CardStackController).
///
/// `content_for_index` must return content that stays valid for as long as
/// the index is visible. The count is re-read on every layout and revert, so
/// a source may grow or shrink between calls; indices at or beyond the
/// current count are never requested.
pub trait CardSource {
    /// Total number of logical cards.
    fn card_count(&self) -> usize;

    /// Returns the content for the card at `index`.
    fn content_for_index(&mut self, index: CardIndex) -> ContentId;
}

/// Receives swipe notifications.
pub trait SwipeDelegate {
    /// Called synchronously when the card at `index` is swiped away, before
    /// the stack refills.
    fn card_swiped(&mut self, direction: Direction, index: CardIndex);
}

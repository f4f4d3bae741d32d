// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the card stack.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`CardStackController`](crate::stack::CardStackController) calls as the
//! window changes. All method bodies default to no-ops, so implementing only
//! the events you care about is fine. Every event is delivered with a
//! sequence number that increases by one per event.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing and installed sinks are
//! dropped. When **on**, each method performs a single `Option` branch before
//! dispatching.

use alloc::boxed::Box;

use kurbo::Vec2;

use crate::card::{CardId, CardIndex, ContentId};
use crate::direction::Direction;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a card was materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterializeReason {
    /// Appended behind the back card during layout.
    Refill,
    /// Inserted in front during a revert.
    Revert,
}

/// Why a card handle was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// Its exit animation finished after a commit.
    Swiped,
    /// It was the back card popped by a revert.
    Reverted,
    /// The data source was replaced or detached.
    Reset,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// A card was created for a logical index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardMaterializedEvent {
    /// Logical index.
    pub index: CardIndex,
    /// New handle.
    pub card: CardId,
    /// Content returned by the source.
    pub content: ContentId,
    /// Why it was created.
    pub reason: MaterializeReason,
}

/// The front card was swiped away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardCommittedEvent {
    /// Logical index of the swiped card.
    pub index: CardIndex,
    /// Its handle (still alive until the exit animation finishes).
    pub card: CardId,
    /// Commit direction.
    pub direction: Direction,
    /// Whether this was the last logical card.
    pub finished: bool,
}

/// A card handle was destroyed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardDiscardedEvent {
    /// The destroyed handle.
    pub card: CardId,
    /// Why it was destroyed.
    pub reason: DiscardReason,
}

/// A drag was released and classified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragReleasedEvent {
    /// The dragged card.
    pub card: CardId,
    /// Final translation.
    pub translation: Vec2,
    /// Commit direction, or `None` for a cancel.
    pub committed: Option<Direction>,
}

/// A layout pass ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutPassEvent {
    /// Window size after the pass.
    pub window_len: usize,
    /// Cards materialized by this pass.
    pub added: usize,
    /// Next logical index to materialize.
    pub cursor: CardIndex,
    /// Whether replenishment is suppressed.
    pub finished: bool,
}

/// The window slid back by one index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevertedEvent {
    /// Logical index of the new front card.
    pub front_index: CardIndex,
}

/// A data source was attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceAttachedEvent {
    /// Card count reported at attach time.
    pub card_count: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the card stack.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a card is materialized.
    fn on_card_materialized(&mut self, seq: u64, e: &CardMaterializedEvent) {
        _ = (seq, e);
    }

    /// Called when the front card commits.
    fn on_card_committed(&mut self, seq: u64, e: &CardCommittedEvent) {
        _ = (seq, e);
    }

    /// Called when a card handle is destroyed.
    fn on_card_discarded(&mut self, seq: u64, e: &CardDiscardedEvent) {
        _ = (seq, e);
    }

    /// Called when a drag is released.
    fn on_drag_released(&mut self, seq: u64, e: &DragReleasedEvent) {
        _ = (seq, e);
    }

    /// Called after each layout pass.
    fn on_layout_pass(&mut self, seq: u64, e: &LayoutPassEvent) {
        _ = (seq, e);
    }

    /// Called when a revert slides the window back.
    fn on_reverted(&mut self, seq: u64, e: &RevertedEvent) {
        _ = (seq, e);
    }

    /// Called when a data source is attached.
    fn on_source_attached(&mut self, seq: u64, e: &SourceAttachedEvent) {
        _ = (seq, e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional boxed [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch), stamps
/// the next sequence number, and dispatches.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
    #[cfg(feature = "trace")]
    seq: u64,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                sink: Some(sink),
                seq: 0,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    #[cfg(feature = "trace")]
    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    /// Emits a [`CardMaterializedEvent`].
    #[inline]
    pub fn card_materialized(&mut self, e: &CardMaterializedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_card_materialized(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CardCommittedEvent`].
    #[inline]
    pub fn card_committed(&mut self, e: &CardCommittedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_card_committed(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CardDiscardedEvent`].
    #[inline]
    pub fn card_discarded(&mut self, e: &CardDiscardedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_card_discarded(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DragReleasedEvent`].
    #[inline]
    pub fn drag_released(&mut self, e: &DragReleasedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_drag_released(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutPassEvent`].
    #[inline]
    pub fn layout_pass(&mut self, e: &LayoutPassEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_layout_pass(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevertedEvent`].
    #[inline]
    pub fn reverted(&mut self, e: &RevertedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_reverted(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SourceAttachedEvent`].
    #[inline]
    pub fn source_attached(&mut self, e: &SourceAttachedEvent) {
        #[cfg(feature = "trace")]
        if self.sink.is_some() {
            let seq = self.next_seq();
            if let Some(s) = &mut self.sink {
                s.on_source_attached(seq, e);
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_commit() -> CardCommittedEvent {
        CardCommittedEvent {
            index: 4,
            card: CardId::from_raw(1, 0),
            direction: Direction::Left,
            finished: false,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_card_committed(0, &sample_commit());
        sink.on_layout_pass(
            1,
            &LayoutPassEvent {
                window_len: 3,
                added: 1,
                cursor: 5,
                finished: false,
            },
        );
        sink.on_reverted(2, &RevertedEvent { front_index: 3 });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_enabled());
        tracer.card_committed(&sample_commit());
        tracer.source_attached(&SourceAttachedEvent { card_count: 0 });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_with_sequence_numbers() {
        use alloc::rc::Rc;
        use alloc::vec::Vec;
        use core::cell::RefCell;

        struct RecordingSink {
            seen: Rc<RefCell<Vec<(u64, CardIndex)>>>,
        }
        impl TraceSink for RecordingSink {
            fn on_card_committed(&mut self, seq: u64, e: &CardCommittedEvent) {
                self.seen.borrow_mut().push((seq, e.index));
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut tracer = Tracer::new(Box::new(RecordingSink { seen: seen.clone() }));
        assert!(tracer.is_enabled());
        tracer.card_committed(&sample_commit());
        tracer.reverted(&RevertedEvent { front_index: 3 });
        tracer.card_committed(&sample_commit());
        assert_eq!(*seen.borrow(), [(0, 4), (2, 4)]);
    }
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events as
//! little-endian records: a one-byte tag, the `u64` sequence number, then a
//! fixed payload per event kind. [`decode`] reads them back as an iterator of
//! [`Recorded`] events.
//!
//! The controller owns its sink, so recording into a sink that has been
//! boxed and handed over needs a way back to the bytes:
//! [`RecorderSink::handle`] returns a [`RecordingHandle`] that shares the
//! buffer.

use std::cell::RefCell;
use std::rc::Rc;

use cardstack_core::card::{CardId, ContentId};
use cardstack_core::direction::Direction;
use cardstack_core::trace::{
    CardCommittedEvent, CardDiscardedEvent, CardMaterializedEvent, DiscardReason,
    DragReleasedEvent, LayoutPassEvent, MaterializeReason, RevertedEvent, SourceAttachedEvent,
    TraceSink,
};
use kurbo::Vec2;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_CARD_MATERIALIZED: u8 = 1;
const TAG_CARD_COMMITTED: u8 = 2;
const TAG_CARD_DISCARDED: u8 = 3;
const TAG_DRAG_RELEASED: u8 = 4;
const TAG_LAYOUT_PASS: u8 = 5;
const TAG_REVERTED: u8 = 6;
const TAG_SOURCE_ATTACHED: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Rc<RefCell<Vec<u8>>>,
}

/// Read access to the buffer of a [`RecorderSink`] after the sink itself
/// has been handed to a controller.
#[derive(Clone, Debug)]
pub struct RecordingHandle {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl RecordingHandle {
    /// Returns a copy of the bytes recorded so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }

    /// Returns the number of bytes recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle sharing this recorder's buffer.
    #[must_use]
    pub fn handle(&self) -> RecordingHandle {
        RecordingHandle {
            buf: Rc::clone(&self.buf),
        }
    }

    /// Returns a copy of the recorded bytes.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.borrow_mut().push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_card(&mut self, card: CardId) {
        self.write_u32(card.index());
        self.write_u32(card.generation());
    }

    fn write_direction(&mut self, d: Direction) {
        self.write_u8(direction_code(d));
    }

    fn write_option_direction(&mut self, d: Option<Direction>) {
        self.write_u8(d.map_or(0, direction_code));
    }

    fn header(&mut self, tag: u8, seq: u64) {
        self.write_u8(tag);
        self.write_u64(seq);
    }
}

fn direction_code(d: Direction) -> u8 {
    match d {
        Direction::Left => 1,
        Direction::Right => 2,
        Direction::Up => 3,
        Direction::Down => 4,
    }
}

fn direction_from_code(code: u8) -> Option<Direction> {
    Some(match code {
        1 => Direction::Left,
        2 => Direction::Right,
        3 => Direction::Up,
        4 => Direction::Down,
        _ => return None,
    })
}

impl TraceSink for RecorderSink {
    fn on_card_materialized(&mut self, seq: u64, e: &CardMaterializedEvent) {
        self.header(TAG_CARD_MATERIALIZED, seq);
        self.write_usize(e.index);
        self.write_card(e.card);
        self.write_u64(e.content.0);
        self.write_u8(match e.reason {
            MaterializeReason::Refill => 0,
            MaterializeReason::Revert => 1,
        });
    }

    fn on_card_committed(&mut self, seq: u64, e: &CardCommittedEvent) {
        self.header(TAG_CARD_COMMITTED, seq);
        self.write_usize(e.index);
        self.write_card(e.card);
        self.write_direction(e.direction);
        self.write_bool(e.finished);
    }

    fn on_card_discarded(&mut self, seq: u64, e: &CardDiscardedEvent) {
        self.header(TAG_CARD_DISCARDED, seq);
        self.write_card(e.card);
        self.write_u8(match e.reason {
            DiscardReason::Swiped => 0,
            DiscardReason::Reverted => 1,
            DiscardReason::Reset => 2,
        });
    }

    fn on_drag_released(&mut self, seq: u64, e: &DragReleasedEvent) {
        self.header(TAG_DRAG_RELEASED, seq);
        self.write_card(e.card);
        self.write_f64(e.translation.x);
        self.write_f64(e.translation.y);
        self.write_option_direction(e.committed);
    }

    fn on_layout_pass(&mut self, seq: u64, e: &LayoutPassEvent) {
        self.header(TAG_LAYOUT_PASS, seq);
        self.write_usize(e.window_len);
        self.write_usize(e.added);
        self.write_usize(e.cursor);
        self.write_bool(e.finished);
    }

    fn on_reverted(&mut self, seq: u64, e: &RevertedEvent) {
        self.header(TAG_REVERTED, seq);
        self.write_usize(e.front_index);
    }

    fn on_source_attached(&mut self, seq: u64, e: &SourceAttachedEvent) {
        self.header(TAG_SOURCE_ATTACHED, seq);
        self.write_usize(e.card_count);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`CardMaterializedEvent`].
    CardMaterialized(CardMaterializedEvent),
    /// A [`CardCommittedEvent`].
    CardCommitted(CardCommittedEvent),
    /// A [`CardDiscardedEvent`].
    CardDiscarded(CardDiscardedEvent),
    /// A [`DragReleasedEvent`].
    DragReleased(DragReleasedEvent),
    /// A [`LayoutPassEvent`].
    LayoutPass(LayoutPassEvent),
    /// A [`RevertedEvent`].
    Reverted(RevertedEvent),
    /// A [`SourceAttachedEvent`].
    SourceAttached(SourceAttachedEvent),
}

/// One decoded record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recorded {
    /// Sequence number assigned by the tracer.
    pub seq: u64,
    /// The event payload.
    pub event: RecordedEvent,
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`Recorded`] events.
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_usize(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_card(&mut self) -> Option<CardId> {
        let idx = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(CardId::from_raw(idx, generation))
    }

    fn decode_materialized(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CardMaterialized(CardMaterializedEvent {
            index: self.read_usize()?,
            card: self.read_card()?,
            content: ContentId(self.read_u64()?),
            reason: match self.read_u8()? {
                0 => MaterializeReason::Refill,
                1 => MaterializeReason::Revert,
                _ => return None,
            },
        }))
    }

    fn decode_committed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CardCommitted(CardCommittedEvent {
            index: self.read_usize()?,
            card: self.read_card()?,
            direction: direction_from_code(self.read_u8()?)?,
            finished: self.read_bool()?,
        }))
    }

    fn decode_discarded(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CardDiscarded(CardDiscardedEvent {
            card: self.read_card()?,
            reason: match self.read_u8()? {
                0 => DiscardReason::Swiped,
                1 => DiscardReason::Reverted,
                2 => DiscardReason::Reset,
                _ => return None,
            },
        }))
    }

    fn decode_released(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DragReleased(DragReleasedEvent {
            card: self.read_card()?,
            translation: Vec2::new(self.read_f64()?, self.read_f64()?),
            committed: direction_from_code(self.read_u8()?),
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutPass(LayoutPassEvent {
            window_len: self.read_usize()?,
            added: self.read_usize()?,
            cursor: self.read_usize()?,
            finished: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = Recorded;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let seq = self.read_u64()?;
        let event = match tag {
            TAG_CARD_MATERIALIZED => self.decode_materialized(),
            TAG_CARD_COMMITTED => self.decode_committed(),
            TAG_CARD_DISCARDED => self.decode_discarded(),
            TAG_DRAG_RELEASED => self.decode_released(),
            TAG_LAYOUT_PASS => self.decode_layout(),
            TAG_REVERTED => Some(RecordedEvent::Reverted(RevertedEvent {
                front_index: self.read_usize()?,
            })),
            TAG_SOURCE_ATTACHED => Some(RecordedEvent::SourceAttached(SourceAttachedEvent {
                card_count: self.read_usize()?,
            })),
            _ => None, // unknown tag → stop iteration
        }?;
        Some(Recorded { seq, event })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

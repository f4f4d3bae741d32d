// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Each line
//! starts with the event's sequence number.

use std::io::Write;

use cardstack_core::direction::Direction;
use cardstack_core::trace::{
    CardCommittedEvent, CardDiscardedEvent, CardMaterializedEvent, DiscardReason,
    DragReleasedEvent, LayoutPassEvent, MaterializeReason, RevertedEvent, SourceAttachedEvent,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Up => "up",
        Direction::Down => "down",
    }
}

fn materialize_name(reason: MaterializeReason) -> &'static str {
    match reason {
        MaterializeReason::Refill => "refill",
        MaterializeReason::Revert => "revert",
    }
}

fn discard_name(reason: DiscardReason) -> &'static str {
    match reason {
        DiscardReason::Swiped => "swiped",
        DiscardReason::Reverted => "reverted",
        DiscardReason::Reset => "reset",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_card_materialized(&mut self, seq: u64, e: &CardMaterializedEvent) {
        let _ = writeln!(
            self.writer,
            "#{seq} [materialize] index={} card={:?} content={} ({})",
            e.index,
            e.card,
            e.content.0,
            materialize_name(e.reason),
        );
    }

    fn on_card_committed(&mut self, seq: u64, e: &CardCommittedEvent) {
        let _ = writeln!(
            self.writer,
            "#{seq} [commit] index={} card={:?} {}{}",
            e.index,
            e.card,
            direction_name(e.direction),
            if e.finished { " FINISHED" } else { "" },
        );
    }

    fn on_card_discarded(&mut self, seq: u64, e: &CardDiscardedEvent) {
        let _ = writeln!(
            self.writer,
            "#{seq} [discard] card={:?} ({})",
            e.card,
            discard_name(e.reason),
        );
    }

    fn on_drag_released(&mut self, seq: u64, e: &DragReleasedEvent) {
        let outcome = e.committed.map_or("cancel", direction_name);
        let _ = writeln!(
            self.writer,
            "#{seq} [release] card={:?} dx={:.1} dy={:.1} -> {outcome}",
            e.card, e.translation.x, e.translation.y,
        );
    }

    fn on_layout_pass(&mut self, seq: u64, e: &LayoutPassEvent) {
        let _ = writeln!(
            self.writer,
            "#{seq} [layout] window={} added={} cursor={}{}",
            e.window_len,
            e.added,
            e.cursor,
            if e.finished { " finished" } else { "" },
        );
    }

    fn on_reverted(&mut self, seq: u64, e: &RevertedEvent) {
        let _ = writeln!(self.writer, "#{seq} [revert] front={}", e.front_index);
    }

    fn on_source_attached(&mut self, seq: u64, e: &SourceAttachedEvent) {
        let _ = writeln!(self.writer, "#{seq} [source] count={}", e.card_count);
    }
}

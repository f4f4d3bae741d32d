// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out to two sinks.

use cardstack_core::trace::{
    CardCommittedEvent, CardDiscardedEvent, CardMaterializedEvent, DragReleasedEvent,
    LayoutPassEvent, RevertedEvent, SourceAttachedEvent, TraceSink,
};

/// Forwards every event to `A`, then to `B`, with the same sequence number.
///
/// Nest tees to reach more than two sinks.
#[derive(Debug, Default)]
pub struct TeeSink<A, B> {
    /// First receiver.
    pub first: A,
    /// Second receiver.
    pub second: B,
}

impl<A: TraceSink, B: TraceSink> TeeSink<A, B> {
    /// Pairs two sinks.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for TeeSink<A, B> {
    fn on_card_materialized(&mut self, seq: u64, e: &CardMaterializedEvent) {
        self.first.on_card_materialized(seq, e);
        self.second.on_card_materialized(seq, e);
    }

    fn on_card_committed(&mut self, seq: u64, e: &CardCommittedEvent) {
        self.first.on_card_committed(seq, e);
        self.second.on_card_committed(seq, e);
    }

    fn on_card_discarded(&mut self, seq: u64, e: &CardDiscardedEvent) {
        self.first.on_card_discarded(seq, e);
        self.second.on_card_discarded(seq, e);
    }

    fn on_drag_released(&mut self, seq: u64, e: &DragReleasedEvent) {
        self.first.on_drag_released(seq, e);
        self.second.on_drag_released(seq, e);
    }

    fn on_layout_pass(&mut self, seq: u64, e: &LayoutPassEvent) {
        self.first.on_layout_pass(seq, e);
        self.second.on_layout_pass(seq, e);
    }

    fn on_reverted(&mut self, seq: u64, e: &RevertedEvent) {
        self.first.on_reverted(seq, e);
        self.second.on_reverted(seq, e);
    }

    fn on_source_attached(&mut self, seq: u64, e: &SourceAttachedEvent) {
        self.first.on_source_attached(seq, e);
        self.second.on_source_attached(seq, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretty::PrettyPrintSink;
    use crate::recorder::{RecorderSink, decode};

    #[test]
    fn both_sinks_receive_each_event() {
        let recorder = RecorderSink::new();
        let handle = recorder.handle();
        let mut tee = TeeSink::new(PrettyPrintSink::with_writer(Vec::new()), recorder);

        tee.on_reverted(3, &RevertedEvent { front_index: 1 });
        tee.on_source_attached(4, &SourceAttachedEvent { card_count: 2 });

        let text = String::from_utf8(tee.first.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        let seqs: Vec<u64> = decode(&handle.bytes()).map(|r| r.seq).collect();
        assert_eq!(seqs, [3, 4]);
    }
}

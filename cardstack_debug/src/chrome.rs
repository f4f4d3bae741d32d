// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! The card stack has no clock of its own, so each event's sequence number
//! stands in for its timestamp: one event per microsecond. Card events land
//! on a track per card slot so a card's life reads left to right.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Track for window-level events.
const STACK_TID: u32 = 0;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of instant events, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = recorded.seq;
        let event = match recorded.event {
            RecordedEvent::CardMaterialized(e) => json!({
                "ph": "i",
                "name": "Materialize",
                "cat": "Card",
                "ts": ts,
                "pid": 0,
                "tid": card_tid(e.card.index()),
                "s": "t",
                "args": {
                    "index": e.index,
                    "generation": e.card.generation(),
                    "content": e.content.0,
                    "reason": format!("{:?}", e.reason),
                }
            }),
            RecordedEvent::CardCommitted(e) => json!({
                "ph": "i",
                "name": "Commit",
                "cat": "Card",
                "ts": ts,
                "pid": 0,
                "tid": card_tid(e.card.index()),
                "s": "t",
                "args": {
                    "index": e.index,
                    "direction": format!("{:?}", e.direction),
                    "finished": e.finished,
                }
            }),
            RecordedEvent::CardDiscarded(e) => json!({
                "ph": "i",
                "name": "Discard",
                "cat": "Card",
                "ts": ts,
                "pid": 0,
                "tid": card_tid(e.card.index()),
                "s": "t",
                "args": {
                    "generation": e.card.generation(),
                    "reason": format!("{:?}", e.reason),
                }
            }),
            RecordedEvent::DragReleased(e) => json!({
                "ph": "i",
                "name": "Release",
                "cat": "Gesture",
                "ts": ts,
                "pid": 0,
                "tid": card_tid(e.card.index()),
                "s": "t",
                "args": {
                    "dx": e.translation.x,
                    "dy": e.translation.y,
                    "committed": e.committed.map(|d| format!("{d:?}")),
                }
            }),
            RecordedEvent::LayoutPass(e) => json!({
                "ph": "i",
                "name": "Layout",
                "cat": "Stack",
                "ts": ts,
                "pid": 0,
                "tid": STACK_TID,
                "s": "p",
                "args": {
                    "window": e.window_len,
                    "added": e.added,
                    "cursor": e.cursor,
                    "finished": e.finished,
                }
            }),
            RecordedEvent::Reverted(e) => json!({
                "ph": "i",
                "name": "Revert",
                "cat": "Stack",
                "ts": ts,
                "pid": 0,
                "tid": STACK_TID,
                "s": "p",
                "args": {
                    "front": e.front_index,
                }
            }),
            RecordedEvent::SourceAttached(e) => json!({
                "ph": "i",
                "name": "SourceAttached",
                "cat": "Stack",
                "ts": ts,
                "pid": 0,
                "tid": STACK_TID,
                "s": "g",
                "args": {
                    "count": e.card_count,
                }
            }),
        };
        events.push(event);
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn card_tid(slot: u32) -> u64 {
    u64::from(slot) + 1
}

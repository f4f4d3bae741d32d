// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated swipe session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a headless card stack through swipes, a cancelled drag, reverts,
//! and running off the end of the deck. Events go to both a
//! [`PrettyPrintSink`] on stdout and a [`RecorderSink`]; the recording is
//! exported as Chrome trace JSON (default path `cardstack_trace.json`, or the
//! first argument).

use std::fs::File;
use std::io::{self, BufWriter};

use cardstack_core::config::StackConfig;
use cardstack_core::direction::Direction;
use cardstack_core::stack::CardStackController;
use cardstack_debug::pretty::PrettyPrintSink;
use cardstack_debug::recorder::{RecorderSink, decode};
use cardstack_debug::tee::TeeSink;
use cardstack_harness::{HeadlessPresenter, SwipeLog, VecSource, drag, settle, swipe};
use kurbo::{Size, Vec2};

const CARD_COUNT: usize = 6;

fn main() -> io::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cardstack_trace.json".to_owned());

    // -- sinks -------------------------------------------------------------
    let recorder = RecorderSink::new();
    let recording = recorder.handle();
    let pretty = PrettyPrintSink::new(Box::new(io::stdout()));

    // -- host --------------------------------------------------------------
    let source = VecSource::new(CARD_COUNT);
    let log = SwipeLog::new();
    let mut presenter = HeadlessPresenter::new();

    let mut stack = CardStackController::new(StackConfig {
        visible_count: 3,
        y_offset: 12,
        ..StackConfig::default()
    });
    stack.set_trace_sink(Box::new(TeeSink::new(pretty, recorder)));
    stack.attach_data_source(Box::new(source.clone()));
    stack.set_delegate(Box::new(log.clone()));
    stack.set_bounds(Size::new(375.0, 667.0));
    settle(&mut stack, &mut presenter);

    // -- session -----------------------------------------------------------
    swipe(&mut stack, Direction::Right);
    settle(&mut stack, &mut presenter);
    swipe(&mut stack, Direction::Left);
    settle(&mut stack, &mut presenter);

    // A short drag that springs back.
    if let Some(front) = stack.front().map(|e| e.card()) {
        drag(&mut stack, front, Vec2::new(40.0, -25.0), 5);
        settle(&mut stack, &mut presenter);
    }

    stack.revert_if_possible();
    settle(&mut stack, &mut presenter);

    // Rotate to landscape mid-session.
    stack.set_bounds(Size::new(667.0, 375.0));
    settle(&mut stack, &mut presenter);

    for direction in Direction::PRIORITY.iter().cycle() {
        if stack.is_finished() || stack.window_len() == 0 {
            break;
        }
        swipe(&mut stack, *direction);
        settle(&mut stack, &mut presenter);
    }

    // Bring the last card back.
    stack.revert_if_possible();
    settle(&mut stack, &mut presenter);

    // -- report ------------------------------------------------------------
    println!();
    println!("swipes: {:?}", log.swipes());
    println!("requested: {:?}", source.requested());
    println!(
        "window after revert: {:?}",
        stack.window().map(|e| e.index()).collect::<Vec<_>>()
    );

    let bytes = recording.bytes();
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    cardstack_debug::chrome::export(&bytes, &mut writer)?;

    println!("Wrote {path} ({} events)", decode(&bytes).count());
    Ok(())
}

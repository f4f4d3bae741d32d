// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for cardstack
//! diagnostics.
//!
//! This crate provides [`TraceSink`](cardstack_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] writes one human-readable line per event.
//! - [`recorder::RecorderSink`] keeps a compact binary recording, read back
//!   with [`recorder::decode`].
//! - [`chrome::export`] turns recorded bytes into Chrome Trace Event Format
//!   JSON.
//! - [`tee::TeeSink`] forwards every event to two sinks.

pub mod chrome;
pub mod pretty;
pub mod recorder;
pub mod tee;

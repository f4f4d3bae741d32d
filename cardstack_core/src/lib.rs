// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipeable card-stack state machine and drag-to-animation pipeline.
//!
//! `cardstack_core` keeps a bounded window of overlapping cards, turns drags
//! on the top card into either a directional swipe-out or a spring back, and
//! keeps the window replenished from a host-supplied [`CardSource`]. It is
//! `no_std` compatible (with `alloc`) and never touches a real view tree:
//! card visuals live in an arena addressed by generational handles, and the
//! host applies incremental changes through a [`Presenter`].
//!
//! # Architecture
//!
//! ```text
//!   Host gesture recognizer
//!       │  DragPhase (Began / Changed / Ended)
//!       ▼
//!   CardStackController::handle_drag()
//!       │                  │
//!       ▼                  ▼
//!   CardGestureController   on_card_committed() ──► SwipeDelegate
//!       │                  │
//!       │                  ▼
//!       │              layout() ◄── CardSource::content_for_index()
//!       ▼                  │
//!   CardStore (poses, animations, dirty channels)
//!       │
//!       ▼
//!   CardStore::evaluate() ──► CardChanges ──► Presenter::apply()
//!                                  │
//!                                  ▼
//!   host animation facility ──► CardStackController::animation_finished()
//! ```
//!
//! **[`stack`]**: [`CardStackController`] owns the visible window, talks to
//! the source and delegate, decides which directions commit, re-lays-out.
//!
//! **[`gesture`]**: One card's drag lifecycle: live fade and rotation
//! feedback, then commit or cancel classification on release.
//!
//! **[`card`]**: Struct-of-arrays card store with generational
//! [`CardId`](card::CardId) handles.
//!
//! **[`animation`]**: Fire-and-forget animation records drained by the
//! host.
//!
//! **[`dirty`]**: Dirty channels used by the card store.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and zero-overhead
//! [`Tracer`](trace::Tracer) wrapper for stack instrumentation.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`CardSource`]: source::CardSource
//! [`Presenter`]: backend::Presenter
//! [`CardStackController`]: stack::CardStackController

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod backend;
pub mod card;
pub mod config;
pub mod direction;
pub mod dirty;
pub mod gesture;
pub mod source;
pub mod stack;
pub mod trace;

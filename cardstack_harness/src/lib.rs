// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host doubles and scenario drivers for cardstack.
//!
//! A real host wires a [`CardStackController`] to native views, a gesture
//! recognizer, and an animation engine. This crate replaces all three:
//!
//! - [`VecSource`] and [`SwipeLog`] stand in for the host's data source and
//!   delegate, and keep shared handles so a test can inspect them after
//!   they have been boxed into the controller.
//! - [`HeadlessPresenter`] mirrors what a view tree would show.
//! - [`settle`], [`drag`], and [`swipe`] drive gestures and finish every
//!   queued animation the way an instantaneous animation engine would.
//!
//! [`CardStackController`]: cardstack_core::stack::CardStackController

#![no_std]

extern crate alloc;

mod drive;
mod host;
mod presenter;

#[cfg(test)]
mod scenarios;

pub use drive::{drag, release_translation, settle, swipe};
pub use host::{SwipeLog, VecSource};
pub use presenter::{HeadlessPresenter, ShownCard};

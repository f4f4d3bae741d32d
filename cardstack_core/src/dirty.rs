// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The card store uses multi-channel dirty tracking (via [`understory_dirty`])
//! so that presenters only touch native views whose properties actually
//! changed. Cards are a flat list, so every channel is local-only: marking a
//! card never marks another one.
//!
//! Callers never query dirty state directly. Each
//! [`CardStore::evaluate`](crate::card::CardStore::evaluate) call drains all
//! channels and surfaces the results as
//! [`CardChanges`](crate::card::CardChanges).

use understory_dirty::Channel;

/// Center or size changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Rotation changed.
pub const TRANSFORM: Channel = Channel::new(1);

/// Opacity changed.
pub const OPACITY: Channel = Channel::new(2);

/// Interactive flag changed.
pub const INTERACTION: Channel = Channel::new(3);

/// Card created, destroyed, or restacked.
pub const TOPOLOGY: Channel = Channel::new(4);

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card visual storage.
//!
//! A *card* here is the visual representation of one logical card: the thing
//! the stack owns while it is visible and discards once it is swiped away or
//! popped. Each card has:
//!
//! - An identity ([`CardId`]), a generational handle that becomes stale when
//!   the card is destroyed.
//! - Host content ([`ContentId`]) supplied by the
//!   [`CardSource`](crate::source::CardSource).
//! - A pose (center, size, rotation, opacity) and an interactive flag.
//!
//! Cards are stored in struct-of-arrays layout with index-based handles.
//! Mutations mark [`dirty`](crate::dirty) channels, and
//! [`evaluate`](CardStore::evaluate) drains them into [`CardChanges`].

mod evaluate;
mod id;
mod store;

pub use evaluate::CardChanges;
pub use id::{CardId, CardIndex, ContentId};
pub use store::CardStore;

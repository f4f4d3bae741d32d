// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card and content identity types.

use core::fmt;

/// Position of a logical card in the host's total ordering.
pub type CardIndex = usize;

/// A handle to a card in a [`CardStore`](super::CardStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a card is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl CardId {
    /// Returns the raw slot index (for diagnostics and presenters).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Reassembles a handle from its parts, e.g. when decoding a recording.
    ///
    /// The result is only meaningful against the store that issued it.
    #[inline]
    #[must_use]
    pub const fn from_raw(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to host-rendered card content.
///
/// Content views are created and owned by the host; the core only carries
/// the reference from the source to the presenter.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change collection.
//!
//! Evaluation drains every dirty channel of the [`CardStore`] and the queued
//! animations into a [`CardChanges`] value:
//!
//! 1. **GEOMETRY** / **TRANSFORM** / **OPACITY** / **INTERACTION**: Drain
//!    dirty indices; presenters read the current values from the store.
//! 2. **TOPOLOGY**: Drain and discard; creation and destruction are
//!    reported through `added` / `removed`, restacking through
//!    `stacking_changed`.
//!
//! Indices of cards destroyed before evaluation are dropped from the
//! property lists. A slot that was destroyed and reused within one
//! evaluation appears in both `removed` and `added`; presenters should
//! process removals first.
//!
//! [`CardChanges`] uses raw slot indices (`u32`) rather than
//! [`CardId`](super::CardId) handles so that presenters can index directly
//! into the store via the `*_at()` accessors.

use alloc::vec::Vec;

use super::store::CardStore;
use crate::animation::CardAnimation;
use crate::dirty;

/// The set of changes produced by a single [`CardStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct CardChanges {
    /// Cards whose center or size changed.
    pub geometry: Vec<u32>,
    /// Cards whose rotation changed.
    pub transforms: Vec<u32>,
    /// Cards whose opacity changed.
    pub opacities: Vec<u32>,
    /// Cards whose interactive flag flipped.
    pub interaction: Vec<u32>,
    /// Cards created since the last evaluate.
    pub added: Vec<u32>,
    /// Cards destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Animations queued since the last evaluate, in queue order.
    pub animations: Vec<CardAnimation>,
    /// Whether the stacking order changed.
    pub stacking_changed: bool,
}

impl CardChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.transforms.clear();
        self.opacities.clear();
        self.interaction.clear();
        self.added.clear();
        self.removed.clear();
        self.animations.clear();
        self.stacking_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.transforms.is_empty()
            && self.opacities.is_empty()
            && self.interaction.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.animations.is_empty()
            && !self.stacking_changed
    }
}

impl CardStore {
    /// Drains all dirty channels and queued animations, returning the set of
    /// changes.
    pub fn evaluate(&mut self) -> CardChanges {
        let mut changes = CardChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut CardChanges) {
        changes.clear();

        changes.geometry = self.drain_live(dirty::GEOMETRY);
        changes.transforms = self.drain_live(dirty::TRANSFORM);
        changes.opacities = self.drain_live(dirty::OPACITY);
        changes.interaction = self.drain_live(dirty::INTERACTION);

        // Structural changes are reported through the lifecycle lists.
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        changes.stacking_changed = core::mem::take(&mut self.stacking_dirty);
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        core::mem::swap(&mut self.queued, &mut changes.animations);
    }

    fn drain_live(&mut self, channel: understory_dirty::Channel) -> Vec<u32> {
        let drained: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
        drained
            .into_iter()
            .filter(|&idx| self.is_live_slot(idx))
            .collect()
    }
}

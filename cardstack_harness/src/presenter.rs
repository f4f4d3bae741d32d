// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use cardstack_core::animation::CardAnimation;
use cardstack_core::backend::Presenter;
use cardstack_core::card::{CardChanges, CardStore, ContentId};
use kurbo::Rect;

/// What the headless "view" for one card currently shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShownCard {
    /// Unrotated frame.
    pub frame: Rect,
    /// Rotation in radians.
    pub rotation: f64,
    /// Opacity.
    pub opacity: f64,
    /// Whether the view accepts drags.
    pub interactive: bool,
    /// Content the view displays.
    pub content: ContentId,
}

/// A [`Presenter`] that mirrors the store into plain values.
///
/// Animations are collected rather than played; the harness drivers finish
/// them immediately.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    slots: Vec<Option<ShownCard>>,
    order: Vec<u32>,
    pending: Vec<CardAnimation>,
}

impl HeadlessPresenter {
    /// Creates a presenter showing nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The view for raw slot `idx`, if one is shown.
    #[must_use]
    pub fn shown(&self, idx: u32) -> Option<&ShownCard> {
        self.slots.get(idx as usize)?.as_ref()
    }

    /// Number of views currently shown.
    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Raw slot indices, back to front.
    #[must_use]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Animations received but not yet finished.
    #[must_use]
    pub fn pending(&self) -> &[CardAnimation] {
        &self.pending
    }

    /// Takes every pending animation.
    pub fn take_pending(&mut self) -> Vec<CardAnimation> {
        core::mem::take(&mut self.pending)
    }

    fn read(store: &CardStore, idx: u32) -> ShownCard {
        ShownCard {
            frame: store.frame_at(idx),
            rotation: store.rotation_at(idx),
            opacity: store.opacity_at(idx),
            interactive: store.interactive_at(idx),
            content: store.content_at(idx),
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn apply(&mut self, store: &CardStore, changes: &CardChanges) {
        for &idx in &changes.removed {
            if let Some(slot) = self.slots.get_mut(idx as usize) {
                *slot = None;
            }
            self.pending.retain(|a| a.card.index() != idx);
        }
        for &idx in &changes.added {
            let i = idx as usize;
            if self.slots.len() <= i {
                self.slots.resize(i + 1, None);
            }
            self.slots[i] = Some(Self::read(store, idx));
        }

        let touched = changes
            .geometry
            .iter()
            .chain(&changes.transforms)
            .chain(&changes.opacities)
            .chain(&changes.interaction);
        for &idx in touched {
            if let Some(Some(shown)) = self.slots.get_mut(idx as usize) {
                *shown = Self::read(store, idx);
            }
        }

        if changes.stacking_changed {
            self.order.clear();
            self.order.extend_from_slice(store.stacking_order());
        }
        self.pending.extend_from_slice(&changes.animations);
    }
}

#[cfg(test)]
mod tests {
    use cardstack_core::animation::{CardPose, Completion, Timing};

    use super::*;

    #[test]
    fn mirrors_store_and_collects_animations() {
        let mut store = CardStore::new();
        let mut presenter = HeadlessPresenter::new();
        let a = store.create_card(ContentId(1));
        let b = store.create_card(ContentId(2));
        store.set_stacking_order(&[a, b]);
        store.animate(
            b,
            CardPose::frame(Rect::new(0.0, 0.0, 10.0, 20.0)),
            Timing::ease(0.3),
            Completion::None,
        );
        let changes = store.evaluate();
        presenter.apply(&store, &changes);

        assert_eq!(presenter.shown_count(), 2);
        assert_eq!(presenter.order(), [a.index(), b.index()]);
        assert_eq!(
            presenter.shown(b.index()).map(|s| s.frame),
            Some(Rect::new(0.0, 0.0, 10.0, 20.0))
        );
        assert_eq!(presenter.pending().len(), 1);

        store.destroy_card(b);
        let changes = store.evaluate();
        presenter.apply(&store, &changes);
        assert_eq!(presenter.shown_count(), 1);
        assert!(presenter.shown(b.index()).is_none());
        assert!(presenter.pending().is_empty(), "removal drops its animations");
    }
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card stack: visible window, replenishment, commit, and revert.
//!
//! [`CardStackController`] owns an ordered window of [`VisibleCardEntry`]
//! values. The front entry is the topmost, interactive card; indices strictly
//! increase toward the back, and the window never holds more than
//! [`StackConfig::visible_count`] entries after a layout pass.
//!
//! The window changes along four paths only:
//!
//! - [`layout`](CardStackController::layout) appends cards behind the back
//!   entry until the window is full or the source runs out.
//! - A committed drag removes the front entry
//!   ([`on_card_committed`](CardStackController::on_card_committed)).
//! - [`revert_if_possible`](CardStackController::revert_if_possible) pops the
//!   back entry and inserts the previous index in front.
//! - Attaching or detaching a source discards everything.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::animation::{AnimationId, CardPose, Completion, Timing};
use crate::card::{CardChanges, CardId, CardIndex, CardStore};
use crate::config::{GestureTuning, StackConfig};
use crate::direction::{Direction, DirectionSet};
use crate::gesture::{CardGestureController, DragOutcome, DragPhase};
use crate::source::{CardSource, SwipeDelegate};
use crate::trace::{
    CardCommittedEvent, CardDiscardedEvent, CardMaterializedEvent, DiscardReason,
    DragReleasedEvent, LayoutPassEvent, MaterializeReason, RevertedEvent, SourceAttachedEvent,
    TraceSink, Tracer,
};

/// One materialized card in the window.
#[derive(Clone, Debug)]
pub struct VisibleCardEntry {
    index: CardIndex,
    gesture: CardGestureController,
}

impl VisibleCardEntry {
    /// Logical index in the source.
    #[must_use]
    pub const fn index(&self) -> CardIndex {
        self.index
    }

    /// Handle of the card visual.
    #[must_use]
    pub const fn card(&self) -> CardId {
        self.gesture.card()
    }

    /// The card's drag lifecycle.
    #[must_use]
    pub const fn gesture(&self) -> &CardGestureController {
        &self.gesture
    }
}

/// Owns the visible window of cards and mediates between the host's source
/// and delegate and the per-card gesture controllers.
pub struct CardStackController {
    store: CardStore,
    window: VecDeque<VisibleCardEntry>,
    /// Committed cards still playing their exit animation.
    departing: Vec<CardId>,
    config: StackConfig,
    tuning: GestureTuning,
    bounds: Size,
    source: Option<Box<dyn CardSource>>,
    delegate: Option<Box<dyn SwipeDelegate>>,
    finished: bool,
    /// Most recently swiped index; the cursor falls back to it when the
    /// window is empty.
    consumed: Option<CardIndex>,
    tracer: Tracer,
}

impl core::fmt::Debug for CardStackController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CardStackController")
            .field("window", &self.window)
            .field("departing", &self.departing)
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("has_source", &self.source.is_some())
            .field("has_delegate", &self.delegate.is_some())
            .field("finished", &self.finished)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

impl Default for CardStackController {
    fn default() -> Self {
        Self::new(StackConfig::default())
    }
}

impl CardStackController {
    /// Creates an empty stack with zero bounds and no source.
    ///
    /// Out-of-range fields of `config` are clamped.
    #[must_use]
    pub fn new(config: StackConfig) -> Self {
        Self {
            store: CardStore::new(),
            window: VecDeque::new(),
            departing: Vec::new(),
            config: config.clamped(),
            tuning: GestureTuning::default(),
            bounds: Size::ZERO,
            source: None,
            delegate: None,
            finished: false,
            consumed: None,
            tracer: Tracer::none(),
        }
    }

    // -- Accessors --

    /// The visible window, front (topmost) first.
    pub fn window(&self) -> impl ExactSizeIterator<Item = &VisibleCardEntry> {
        self.window.iter()
    }

    /// Number of visible entries.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// The front (topmost, interactive) entry.
    #[must_use]
    pub fn front(&self) -> Option<&VisibleCardEntry> {
        self.window.front()
    }

    /// The next logical index to materialize.
    #[must_use]
    pub fn cursor(&self) -> CardIndex {
        match self.window.back() {
            Some(back) => back.index + 1,
            None => self.consumed.map_or(0, |i| i + 1),
        }
    }

    /// Whether the last logical card has been swiped away.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Current gesture tuning.
    #[must_use]
    pub const fn gesture_tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    /// Container size.
    #[must_use]
    pub const fn bounds(&self) -> Size {
        self.bounds
    }

    /// Card visuals, including departing cards.
    #[must_use]
    pub const fn store(&self) -> &CardStore {
        &self.store
    }

    /// Whether a data source is attached.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Drains all pending card changes for the presenter.
    pub fn take_changes(&mut self) -> CardChanges {
        self.store.evaluate()
    }

    // -- Configuration --

    /// Sets the layout parameters at once and re-lays-out.
    pub fn configure(&mut self, visible_count: usize, y_offset: u32, width_ratio: f64) {
        self.set_config(StackConfig {
            visible_count,
            y_offset,
            width_ratio,
            ..self.config
        });
    }

    /// Replaces the whole configuration and re-lays-out.
    ///
    /// Lowering `visible_count` below the window size does not trim the
    /// window; only commits and reverts change membership.
    pub fn set_config(&mut self, config: StackConfig) {
        self.config = config.clamped();
        self.layout();
    }

    /// Sets the maximum number of visible cards and re-lays-out.
    pub fn set_visible_count(&mut self, visible_count: usize) {
        self.set_config(StackConfig {
            visible_count,
            ..self.config
        });
    }

    /// Sets the vertical offset between cards and re-lays-out.
    pub fn set_y_offset(&mut self, y_offset: u32) {
        self.set_config(StackConfig {
            y_offset,
            ..self.config
        });
    }

    /// Sets the card-to-container width ratio and re-lays-out.
    pub fn set_width_ratio(&mut self, width_ratio: f64) {
        self.set_config(StackConfig {
            width_ratio,
            ..self.config
        });
    }

    /// Sets the directions in which a release may commit.
    pub fn set_allowed_directions(&mut self, allowed: DirectionSet) {
        self.config.allowed_directions = allowed;
    }

    /// Replaces the gesture thresholds and timings.
    pub fn set_gesture_tuning(&mut self, tuning: GestureTuning) {
        self.tuning = tuning;
    }

    /// Installs a trace sink.
    ///
    /// Without the `trace` feature the sink is dropped.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    // -- Container lifecycle --

    /// Records a new container size and re-lays-out.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.layout();
    }

    /// Re-lays-out after an appearance change (scale, size class, theme).
    pub fn appearance_changed(&mut self) {
        self.layout();
    }

    // -- Source and delegate --

    /// Replaces the data source and discards every card.
    ///
    /// The next layout pass repopulates from index 0.
    pub fn attach_data_source(&mut self, source: Box<dyn CardSource>) {
        self.reset();
        self.tracer.source_attached(&SourceAttachedEvent {
            card_count: source.card_count(),
        });
        self.source = Some(source);
    }

    /// Removes the data source, discarding every card, and returns it.
    pub fn detach_data_source(&mut self) -> Option<Box<dyn CardSource>> {
        self.reset();
        self.source.take()
    }

    /// Installs the swipe delegate.
    pub fn set_delegate(&mut self, delegate: Box<dyn SwipeDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Removes the swipe delegate and returns it.
    pub fn clear_delegate(&mut self) -> Option<Box<dyn SwipeDelegate>> {
        self.delegate.take()
    }

    // -- Layout --

    /// Replenishes the window, recomputes every frame, and animates cards
    /// that are out of place.
    ///
    /// Safe to call at any time and any number of times; with no intervening
    /// events a second call adds nothing and produces the same frames.
    pub fn layout(&mut self) {
        let added = self.replenish();

        for (position, entry) in self.window.iter().enumerate() {
            let card = entry.card();
            let frame = card_frame(&self.config, self.bounds, position);
            self.store.set_interactive(card, position == 0);
            if self.store.center(card) == frame.center() && self.store.size(card) == frame.size() {
                continue;
            }
            self.store.animate(
                card,
                CardPose::frame(frame),
                Timing::ease(self.tuning.layout_duration),
                Completion::None,
            );
        }
        self.restack();

        self.tracer.layout_pass(&LayoutPassEvent {
            window_len: self.window.len(),
            added,
            cursor: self.cursor(),
            finished: self.finished,
        });
    }

    /// Appends cards behind the back entry; returns how many were added.
    fn replenish(&mut self) -> usize {
        if self.finished {
            return 0;
        }
        let cursor = self.cursor();
        let Some(source) = self.source.as_mut() else {
            return 0;
        };

        let needed = source
            .card_count()
            .saturating_sub(cursor)
            .min(self.config.visible_count.saturating_sub(self.window.len()));

        for index in cursor..cursor + needed {
            let content = source.content_for_index(index);
            let card = self.store.create_card(content);
            self.window.push_back(VisibleCardEntry {
                index,
                gesture: CardGestureController::new(card),
            });
            self.tracer.card_materialized(&CardMaterializedEvent {
                index,
                card,
                content,
                reason: MaterializeReason::Refill,
            });
        }
        needed
    }

    /// Back-to-front: the window from its back entry, then departing cards
    /// on top.
    fn restack(&mut self) {
        let order: Vec<CardId> = self
            .window
            .iter()
            .rev()
            .map(VisibleCardEntry::card)
            .chain(self.departing.iter().copied())
            .collect();
        self.store.set_stacking_order(&order);
    }

    // -- Gestures --

    /// Routes one drag phase to the gesture controller of `card`.
    ///
    /// A drag can only begin on the interactive front card. A release that
    /// would commit on a card that is no longer the front entry springs back
    /// instead. Phases for stale or departing cards are ignored.
    pub fn handle_drag(&mut self, card: CardId, phase: DragPhase) -> DragOutcome {
        let Some(position) = self.window.iter().position(|e| e.card() == card) else {
            return DragOutcome::Ignored;
        };
        let entry = &mut self.window[position];

        match phase {
            DragPhase::Began => {
                if self.store.is_interactive(card) && entry.gesture.begin_drag(&self.store) {
                    DragOutcome::Began
                } else {
                    DragOutcome::Ignored
                }
            }
            DragPhase::Changed(translation) => {
                if entry
                    .gesture
                    .update_drag(&mut self.store, translation, &self.tuning)
                {
                    DragOutcome::Moved
                } else {
                    DragOutcome::Ignored
                }
            }
            DragPhase::Ended(translation) => {
                let allowed = if position == 0 {
                    self.config.allowed_directions
                } else {
                    DirectionSet::NONE
                };
                let outcome =
                    entry
                        .gesture
                        .end_drag(&mut self.store, translation, allowed, &self.tuning);
                if outcome == DragOutcome::Ignored {
                    return outcome;
                }

                let committed = match outcome {
                    DragOutcome::Committed(direction) => Some(direction),
                    _ => None,
                };
                self.tracer.drag_released(&DragReleasedEvent {
                    card,
                    translation,
                    committed,
                });
                if let Some(direction) = committed {
                    self.on_card_committed(card, direction);
                }
                outcome
            }
        }
    }

    /// Removes the committed front card, notifies the delegate, and refills.
    ///
    /// `card` must be the front entry; otherwise nothing happens and `false`
    /// is returned. Called directly (a programmatic swipe), this also starts
    /// the exit animation toward `direction`. The card stays alive (and on
    /// top of the stack) until its exit animation is reported finished.
    pub fn on_card_committed(&mut self, card: CardId, direction: Direction) -> bool {
        let Some(front) = self.window.front_mut() else {
            return false;
        };
        if front.card() != card {
            return false;
        }

        let index = front.index;
        front.gesture.commit(&mut self.store, direction, &self.tuning);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.card_swiped(direction, index);
        }
        self.window.pop_front();

        let total = self.source.as_ref().map_or(0, |s| s.card_count());
        self.finished = index + 1 >= total;
        self.consumed = Some(index);
        self.departing.push(card);
        self.store.set_interactive(card, false);

        self.tracer.card_committed(&CardCommittedEvent {
            index,
            card,
            direction,
            finished: self.finished,
        });
        self.layout();
        true
    }

    /// Handles completion of an animation started by the core.
    ///
    /// Finishing an exit destroys the departed card; finishing a snap-back
    /// returns the card's gesture to idle. Unknown ids are ignored.
    pub fn animation_finished(&mut self, animation: AnimationId) {
        let Some((card, completion)) = self.store.finish_animation(animation) else {
            return;
        };
        match completion {
            Completion::Detach => {
                self.departing.retain(|&c| c != card);
                self.store.destroy_card(card);
                self.tracer.card_discarded(&CardDiscardedEvent {
                    card,
                    reason: DiscardReason::Swiped,
                });
            }
            Completion::Settle => {
                if let Some(entry) = self.window.iter_mut().find(|e| e.card() == card) {
                    entry.gesture.animation_finished(animation);
                }
            }
            Completion::None => {}
        }
    }

    // -- Revert --

    /// Slides the window back by one logical index.
    ///
    /// Pops the back entry, materializes `front - 1` in front, clears the
    /// finished flag, and re-lays-out. When every card has been swiped and
    /// the window is empty, the most recently swiped card comes back.
    ///
    /// Returns `false` (doing nothing) without a source, at index 0, or when
    /// the target index is no longer within the source's count.
    pub fn revert_if_possible(&mut self) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        let target = match self.window.front() {
            Some(front) => front.index.checked_sub(1),
            None => self.consumed,
        };
        let Some(target) = target else {
            return false;
        };
        if target >= source.card_count() {
            return false;
        }

        self.finished = false;
        if let Some(back) = self.window.pop_back() {
            let card = back.card();
            self.store.destroy_card(card);
            self.tracer.card_discarded(&CardDiscardedEvent {
                card,
                reason: DiscardReason::Reverted,
            });
        }

        let content = source.content_for_index(target);
        let card = self.store.create_card(content);
        self.window.push_front(VisibleCardEntry {
            index: target,
            gesture: CardGestureController::new(card),
        });
        self.consumed = target.checked_sub(1);

        self.tracer.card_materialized(&CardMaterializedEvent {
            index: target,
            card,
            content,
            reason: MaterializeReason::Revert,
        });
        self.tracer.reverted(&RevertedEvent {
            front_index: target,
        });
        self.layout();
        true
    }

    // -- Internal helpers --

    /// Discards every visible and departing card and clears progress.
    fn reset(&mut self) {
        for entry in self.window.drain(..) {
            let card = entry.card();
            self.store.destroy_card(card);
            self.tracer.card_discarded(&CardDiscardedEvent {
                card,
                reason: DiscardReason::Reset,
            });
        }
        for card in self.departing.drain(..) {
            self.store.destroy_card(card);
            self.tracer.card_discarded(&CardDiscardedEvent {
                card,
                reason: DiscardReason::Reset,
            });
        }
        self.finished = false;
        self.consumed = None;
    }
}

/// Frame of the card at `position` (0 = front).
///
/// Width is `bounds.width * width_ratio`, horizontally centered; height
/// leaves room for every visible card's offset; each card sits
/// `position * y_offset` below the top.
fn card_frame(config: &StackConfig, bounds: Size, position: usize) -> Rect {
    let width = bounds.width * config.width_ratio;
    let offset = f64::from(config.y_offset);
    let spread = (config.visible_count.saturating_sub(1)) as f64 * offset;
    let height = (bounds.height - spread).max(0.0);
    let x = (bounds.width - width) / 2.0;
    let y = position as f64 * offset;
    Rect::new(x, y, x + width, y + height)
}

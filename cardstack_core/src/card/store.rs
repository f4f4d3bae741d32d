// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays card storage with allocation, pose, and animation
//! management.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{CardId, ContentId};
use crate::animation::{AnimationId, CardAnimation, CardPose, Completion, Timing};
use crate::dirty;

/// Struct-of-arrays storage for all live cards.
///
/// Cards are addressed by [`CardId`] handles. Internally, each card occupies
/// a slot in parallel arrays. Destroyed cards are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct CardStore {
    // -- Pose --
    pub(crate) center: Vec<Point>,
    pub(crate) size: Vec<Size>,
    pub(crate) rotation: Vec<f64>,
    pub(crate) opacity: Vec<f64>,
    pub(crate) interactive: Vec<bool>,
    pub(crate) content: Vec<ContentId>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Stacking (back to front) --
    pub(crate) stacking_order: Vec<u32>,
    pub(crate) stacking_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,

    // -- Animations --
    pub(crate) queued: Vec<CardAnimation>,
    in_flight: Vec<(AnimationId, CardId, Completion)>,
    next_animation: u64,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    /// Creates an empty card store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            center: Vec::new(),
            size: Vec::new(),
            rotation: Vec::new(),
            opacity: Vec::new(),
            interactive: Vec::new(),
            content: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            stacking_order: Vec::new(),
            stacking_dirty: false,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            queued: Vec::new(),
            in_flight: Vec::new(),
            next_animation: 0,
        }
    }

    // -- Allocation API --

    /// Creates a card presenting `content` and returns its handle.
    ///
    /// The card starts with a zero frame, no rotation, full opacity, and
    /// input disabled. It is not part of the stacking order until
    /// [`set_stacking_order`](Self::set_stacking_order) includes it.
    pub fn create_card(&mut self, content: ContentId) -> CardId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.center[idx as usize] = Point::ZERO;
            self.size[idx as usize] = Size::ZERO;
            self.rotation[idx as usize] = 0.0;
            self.opacity[idx as usize] = 1.0;
            self.interactive[idx as usize] = false;
            self.content[idx as usize] = content;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.center.push(Point::ZERO);
            self.size.push(Size::ZERO);
            self.rotation.push(0.0);
            self.opacity.push(1.0);
            self.interactive.push(false);
            self.content.push(content);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        CardId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a card, freeing its slot for reuse.
    ///
    /// The card leaves the stacking order, and any queued or in-flight
    /// animations for it are forgotten.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_card(&mut self, id: CardId) {
        self.validate(id);
        let idx = id.idx;

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        if let Some(pos) = self.stacking_order.iter().position(|&i| i == idx) {
            self.stacking_order.remove(pos);
            self.stacking_dirty = true;
        }
        self.queued.retain(|a| a.card != id);
        self.in_flight.retain(|&(_, card, _)| card != id);

        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live card.
    #[must_use]
    pub fn is_alive(&self, id: CardId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live cards.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Stacking API --

    /// Replaces the stacking order. `back_to_front` lists cards from the
    /// bottommost to the topmost.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn set_stacking_order(&mut self, back_to_front: &[CardId]) {
        for &id in back_to_front {
            self.validate(id);
        }
        let same = self.stacking_order.len() == back_to_front.len()
            && self
                .stacking_order
                .iter()
                .zip(back_to_front)
                .all(|(&idx, id)| idx == id.idx);
        if !same {
            self.stacking_order.clear();
            self.stacking_order
                .extend(back_to_front.iter().map(|id| id.idx));
            self.stacking_dirty = true;
        }
    }

    /// Returns the raw slot indices of stacked cards, back to front.
    #[must_use]
    pub fn stacking_order(&self) -> &[u32] {
        &self.stacking_order
    }

    // -- Property getters --

    /// Returns the center of a card.
    #[must_use]
    pub fn center(&self, id: CardId) -> Point {
        self.validate(id);
        self.center[id.idx as usize]
    }

    /// Returns the size of a card.
    #[must_use]
    pub fn size(&self, id: CardId) -> Size {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns the unrotated frame of a card.
    #[must_use]
    pub fn frame(&self, id: CardId) -> Rect {
        self.validate(id);
        Rect::from_center_size(self.center[id.idx as usize], self.size[id.idx as usize])
    }

    /// Returns the rotation of a card, in radians.
    #[must_use]
    pub fn rotation(&self, id: CardId) -> f64 {
        self.validate(id);
        self.rotation[id.idx as usize]
    }

    /// Returns the opacity of a card.
    #[must_use]
    pub fn opacity(&self, id: CardId) -> f64 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Returns whether a card accepts drags.
    #[must_use]
    pub fn is_interactive(&self, id: CardId) -> bool {
        self.validate(id);
        self.interactive[id.idx as usize]
    }

    /// Returns the host content of a card.
    #[must_use]
    pub fn content(&self, id: CardId) -> ContentId {
        self.validate(id);
        self.content[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the center of a card.
    pub fn set_center(&mut self, id: CardId, center: Point) {
        self.validate(id);
        self.center[id.idx as usize] = center;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    /// Sets the size of a card.
    pub fn set_size(&mut self, id: CardId, size: Size) {
        self.validate(id);
        self.size[id.idx as usize] = size;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    /// Sets the rotation of a card, in radians.
    pub fn set_rotation(&mut self, id: CardId, rotation: f64) {
        self.validate(id);
        self.rotation[id.idx as usize] = rotation;
        self.dirty.mark(id.idx, dirty::TRANSFORM);
    }

    /// Sets the opacity of a card.
    pub fn set_opacity(&mut self, id: CardId, opacity: f64) {
        self.validate(id);
        self.opacity[id.idx as usize] = opacity;
        self.dirty.mark(id.idx, dirty::OPACITY);
    }

    /// Enables or disables drags on a card.
    ///
    /// Only marks the INTERACTION channel when the flag actually flips.
    pub fn set_interactive(&mut self, id: CardId, interactive: bool) {
        self.validate(id);
        let slot = &mut self.interactive[id.idx as usize];
        if *slot != interactive {
            *slot = interactive;
            self.dirty.mark(id.idx, dirty::INTERACTION);
        }
    }

    /// Writes every `Some` field of `pose` without animating.
    pub fn apply_pose(&mut self, id: CardId, pose: CardPose) {
        if let Some(center) = pose.center {
            self.set_center(id, center);
        }
        if let Some(size) = pose.size {
            self.set_size(id, size);
        }
        if let Some(rotation) = pose.rotation {
            self.set_rotation(id, rotation);
        }
        if let Some(opacity) = pose.opacity {
            self.set_opacity(id, opacity);
        }
    }

    // -- Animation API --

    /// Writes `pose` and queues an animation toward it.
    ///
    /// If `completion` is not [`Completion::None`], the animation is tracked
    /// until [`finish_animation`](Self::finish_animation) is called with the
    /// returned id.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn animate(
        &mut self,
        id: CardId,
        pose: CardPose,
        timing: Timing,
        completion: Completion,
    ) -> AnimationId {
        self.validate(id);
        self.apply_pose(id, pose);

        let animation = AnimationId(self.next_animation);
        self.next_animation += 1;
        self.queued.push(CardAnimation {
            id: animation,
            card: id,
            pose,
            timing,
        });
        if completion != Completion::None {
            self.in_flight.push((animation, id, completion));
        }
        animation
    }

    /// Stops tracking an animation and returns its card and completion.
    ///
    /// Returns `None` for untracked, already finished, or forgotten
    /// animations.
    pub fn finish_animation(&mut self, animation: AnimationId) -> Option<(CardId, Completion)> {
        let pos = self.in_flight.iter().position(|&(a, _, _)| a == animation)?;
        let (_, card, completion) = self.in_flight.swap_remove(pos);
        Some((card, completion))
    }

    /// Returns the number of animations awaiting completion.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `CardChanges` or
    // `stacking_order()`) rather than `CardId` handles, skipping generation
    // validation.

    /// Returns the unrotated frame at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn frame_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        Rect::from_center_size(self.center[idx as usize], self.size[idx as usize])
    }

    /// Returns the rotation at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn rotation_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.rotation[idx as usize]
    }

    /// Returns the opacity at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn opacity_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.opacity[idx as usize]
    }

    /// Returns whether the card at raw slot `idx` accepts drags.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn interactive_at(&self, idx: u32) -> bool {
        self.check_slot(idx);
        self.interactive[idx as usize]
    }

    /// Returns the content at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> ContentId {
        self.check_slot(idx);
        self.content[idx as usize]
    }

    /// Returns the live handle for raw slot `idx`, if the slot is occupied.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> Option<CardId> {
        if idx < self.len && !self.free_list.contains(&idx) {
            Some(CardId {
                idx,
                generation: self.generation[idx as usize],
            })
        } else {
            None
        }
    }

    // -- Internal helpers --

    pub(crate) fn is_live_slot(&self, idx: u32) -> bool {
        idx < self.len && !self.free_list.contains(&idx)
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: CardId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale CardId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(7));
        assert!(store.is_alive(id));
        assert_eq!(store.content(id), ContentId(7));
        assert_eq!(store.live_count(), 1);
        store.destroy_card(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = CardStore::new();
        let id1 = store.create_card(ContentId(1));
        store.destroy_card(id1);
        let id2 = store.create_card(ContentId(2));
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn reused_slot_is_reset() {
        let mut store = CardStore::new();
        let id1 = store.create_card(ContentId(1));
        store.set_rotation(id1, 0.4);
        store.set_opacity(id1, 0.5);
        store.set_interactive(id1, true);
        store.destroy_card(id1);

        let id2 = store.create_card(ContentId(2));
        assert_eq!(store.rotation(id2), 0.0);
        assert_eq!(store.opacity(id2), 1.0);
        assert!(!store.is_interactive(id2));
        assert_eq!(store.frame(id2), Rect::ZERO);
    }

    #[test]
    fn frame_is_center_and_size() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        store.apply_pose(id, CardPose::frame(Rect::new(50.0, 0.0, 150.0, 80.0)));
        assert_eq!(store.center(id), Point::new(100.0, 40.0));
        assert_eq!(store.frame(id), Rect::new(50.0, 0.0, 150.0, 80.0));
    }

    #[test]
    fn animate_writes_model_and_queues() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        let pose = CardPose::default().with_center(Point::new(5.0, 6.0));
        let a = store.animate(id, pose, Timing::ease(0.3), Completion::None);
        assert_eq!(store.center(id), Point::new(5.0, 6.0));
        assert_eq!(store.queued.len(), 1);
        assert_eq!(store.queued[0].id, a);
        assert_eq!(store.in_flight_count(), 0, "plain animations are untracked");
        assert_eq!(store.finish_animation(a), None);
    }

    #[test]
    fn tracked_animation_finishes_once() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        let a = store.animate(id, CardPose::default(), Timing::ease(0.3), Completion::Detach);
        assert_eq!(store.in_flight_count(), 1);
        assert_eq!(store.finish_animation(a), Some((id, Completion::Detach)));
        assert_eq!(store.finish_animation(a), None);
    }

    #[test]
    fn destroy_forgets_animations_and_stacking() {
        let mut store = CardStore::new();
        let a = store.create_card(ContentId(0));
        let b = store.create_card(ContentId(1));
        store.set_stacking_order(&[a, b]);
        let anim = store.animate(b, CardPose::default(), Timing::ease(0.3), Completion::Settle);

        store.destroy_card(b);
        assert_eq!(store.stacking_order(), &[a.idx]);
        assert_eq!(store.finish_animation(anim), None);
        assert!(store.queued.is_empty(), "queued animation for dead card");
    }

    #[test]
    fn id_at_tracks_liveness() {
        let mut store = CardStore::new();
        let a = store.create_card(ContentId(0));
        assert_eq!(store.id_at(a.idx), Some(a));
        store.destroy_card(a);
        assert_eq!(store.id_at(a.idx), None);
        assert_eq!(store.id_at(99), None);
    }

    #[test]
    #[should_panic(expected = "stale CardId")]
    fn destroyed_handle_panics_on_get_center() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        store.destroy_card(id);
        let _ = store.center(id);
    }

    #[test]
    #[should_panic(expected = "stale CardId")]
    fn destroyed_handle_panics_on_set_opacity() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        store.destroy_card(id);
        store.set_opacity(id, 0.5);
    }

    #[test]
    #[should_panic(expected = "stale CardId")]
    fn destroyed_handle_panics_on_stacking() {
        let mut store = CardStore::new();
        let id = store.create_card(ContentId(0));
        store.destroy_card(id);
        store.set_stacking_order(&[id]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn raw_accessor_checks_range() {
        let store = CardStore::new();
        let _ = store.frame_at(0);
    }
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use cardstack_core::card::{CardIndex, ContentId};
use cardstack_core::direction::Direction;
use cardstack_core::source::{CardSource, SwipeDelegate};

/// A data source with an adjustable count.
///
/// Content for index `i` is `ContentId(i)`. Clones share the count and the
/// request log.
#[derive(Clone, Debug, Default)]
pub struct VecSource {
    count: Rc<Cell<usize>>,
    requested: Rc<RefCell<Vec<CardIndex>>>,
}

impl VecSource {
    /// Creates a source with `count` cards.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count: Rc::new(Cell::new(count)),
            requested: Rc::default(),
        }
    }

    /// Changes the reported count. Takes effect on the next layout or
    /// revert.
    pub fn set_count(&self, count: usize) {
        self.count.set(count);
    }

    /// Every index requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<CardIndex> {
        self.requested.borrow().clone()
    }
}

impl CardSource for VecSource {
    fn card_count(&self) -> usize {
        self.count.get()
    }

    fn content_for_index(&mut self, index: CardIndex) -> ContentId {
        assert!(
            index < self.count.get(),
            "index {index} requested beyond count {}",
            self.count.get()
        );
        self.requested.borrow_mut().push(index);
        ContentId(index as u64)
    }
}

/// A delegate that records every swipe. Clones share the log.
#[derive(Clone, Debug, Default)]
pub struct SwipeLog {
    swipes: Rc<RefCell<Vec<(Direction, CardIndex)>>>,
}

impl SwipeLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded swipes, oldest first.
    #[must_use]
    pub fn swipes(&self) -> Vec<(Direction, CardIndex)> {
        self.swipes.borrow().clone()
    }
}

impl SwipeDelegate for SwipeLog {
    fn card_swiped(&mut self, direction: Direction, index: CardIndex) {
        self.swipes.borrow_mut().push((direction, index));
    }
}

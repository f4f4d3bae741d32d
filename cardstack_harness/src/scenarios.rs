// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios through the headless host.

use alloc::boxed::Box;
use alloc::vec::Vec;

use cardstack_core::backend::Presenter;
use cardstack_core::card::CardIndex;
use cardstack_core::config::StackConfig;
use cardstack_core::direction::{Direction, DirectionSet};
use cardstack_core::gesture::{DragOutcome, DragPhase};
use cardstack_core::stack::{CardStackController, VisibleCardEntry};
use kurbo::{Point, Rect, Size, Vec2};

use crate::{HeadlessPresenter, SwipeLog, VecSource, drag, settle, swipe};

struct Host {
    stack: CardStackController,
    presenter: HeadlessPresenter,
    source: VecSource,
    log: SwipeLog,
}

impl Host {
    fn new(count: usize, config: StackConfig, bounds: Size) -> Self {
        let source = VecSource::new(count);
        let log = SwipeLog::new();
        let mut stack = CardStackController::new(config);
        stack.attach_data_source(Box::new(source.clone()));
        stack.set_delegate(Box::new(log.clone()));
        stack.set_bounds(bounds);
        let mut host = Self {
            stack,
            presenter: HeadlessPresenter::new(),
            source,
            log,
        };
        host.settle();
        host
    }

    fn settle(&mut self) -> usize {
        settle(&mut self.stack, &mut self.presenter)
    }

    fn swipe(&mut self, direction: Direction) -> DragOutcome {
        let outcome = swipe(&mut self.stack, direction);
        self.settle();
        outcome
    }

    fn indices(&self) -> Vec<CardIndex> {
        self.stack.window().map(VisibleCardEntry::index).collect()
    }

    fn front_center(&self) -> Point {
        let card = self.stack.front().map(VisibleCardEntry::card).unwrap();
        self.stack.store().center(card)
    }

    fn check_window(&self) {
        let indices = self.indices();
        assert!(
            indices.windows(2).all(|w| w[0] < w[1]),
            "indices must increase front to back: {indices:?}"
        );
        let interactive: Vec<bool> = self
            .stack
            .window()
            .map(|e| self.stack.store().is_interactive(e.card()))
            .collect();
        if let Some((first, rest)) = interactive.split_first() {
            assert!(*first, "front card must be interactive");
            assert!(rest.iter().all(|i| !i), "back cards must not be interactive");
        }
    }
}

/// 200×200 container, no vertical offset: the front card is centered at
/// (100, 100).
fn square_config() -> (StackConfig, Size) {
    let config = StackConfig {
        y_offset: 0,
        ..StackConfig::default()
    };
    (config, Size::new(200.0, 200.0))
}

#[test]
fn horizontal_commit_past_threshold() {
    let (config, bounds) = square_config();
    let mut host = Host::new(10, config, bounds);
    assert_eq!(host.front_center(), Point::new(100.0, 100.0));

    let card = host.stack.front().unwrap().card();
    let outcome = drag(&mut host.stack, card, Vec2::new(80.0, 0.0), 3);
    assert_eq!(outcome, DragOutcome::Committed(Direction::Right));
    host.settle();
    assert_eq!(host.log.swipes(), [(Direction::Right, 0)]);
    assert_eq!(host.indices(), [1, 2, 3]);
}

#[test]
fn vertical_commit_past_threshold() {
    let (config, bounds) = square_config();
    let mut host = Host::new(10, config, bounds);
    let card = host.stack.front().unwrap().card();
    let outcome = drag(&mut host.stack, card, Vec2::new(0.0, -80.0), 3);
    assert_eq!(outcome, DragOutcome::Committed(Direction::Up));
}

#[test]
fn short_release_snaps_back() {
    let (config, bounds) = square_config();
    let mut host = Host::new(10, config, bounds);
    let card = host.stack.front().unwrap().card();
    let outcome = drag(&mut host.stack, card, Vec2::new(50.0, 0.0), 3);
    assert_eq!(outcome, DragOutcome::Cancelled);
    host.settle();

    assert_eq!(host.front_center(), Point::new(100.0, 100.0));
    let shown = host.presenter.shown(card.index()).unwrap();
    assert_eq!(shown.rotation, 0.0);
    assert_eq!(shown.opacity, 1.0);
    assert!(host.log.swipes().is_empty());
    assert_eq!(host.indices(), [0, 1, 2]);
}

#[test]
fn fade_never_drops_below_floor() {
    let (config, bounds) = square_config();
    let mut host = Host::new(10, config, bounds);
    let card = host.stack.front().unwrap().card();
    host.stack.set_allowed_directions(DirectionSet::NONE);

    for far in [150.0, 1.0e3, 1.0e6, 1.0e12] {
        host.stack.handle_drag(card, DragPhase::Began);
        host.stack
            .handle_drag(card, DragPhase::Changed(Vec2::new(-far, far)));
        host.settle();
        assert_eq!(host.presenter.shown(card.index()).unwrap().opacity, 0.5);

        let outcome = host
            .stack
            .handle_drag(card, DragPhase::Ended(Vec2::new(-far, far)));
        assert_eq!(outcome, DragOutcome::Cancelled, "no direction is allowed");
        host.settle();
        assert_eq!(host.presenter.shown(card.index()).unwrap().opacity, 1.0);
    }
}

#[test]
fn revert_steps_window_back() {
    let mut host = Host::new(10, StackConfig::default(), Size::new(320.0, 480.0));
    for _ in 0..3 {
        assert!(matches!(host.swipe(Direction::Left), DragOutcome::Committed(_)));
    }
    assert_eq!(host.indices(), [3, 4, 5]);

    assert!(host.stack.revert_if_possible());
    host.settle();
    assert_eq!(host.indices(), [2, 3, 4]);
    host.check_window();

    // Back to the beginning, then no further.
    assert!(host.stack.revert_if_possible());
    assert!(host.stack.revert_if_possible());
    assert_eq!(host.indices(), [0, 1, 2]);
    assert!(!host.stack.revert_if_possible());
    assert_eq!(host.indices(), [0, 1, 2]);
}

#[test]
fn last_card_finishes_until_revert() {
    let mut host = Host::new(4, StackConfig::default(), Size::new(320.0, 480.0));
    for expected in 0..4 {
        assert_eq!(host.indices().first(), Some(&expected));
        host.swipe(Direction::Down);
    }
    assert!(host.stack.is_finished());
    assert!(host.indices().is_empty());

    host.source.set_count(8);
    host.stack.layout();
    host.settle();
    assert!(host.indices().is_empty(), "finished suppresses refill");

    assert!(host.stack.revert_if_possible());
    host.settle();
    assert!(!host.stack.is_finished());
    assert_eq!(host.indices(), [3, 4, 5]);
    assert_eq!(
        host.log.swipes(),
        [
            (Direction::Down, 0),
            (Direction::Down, 1),
            (Direction::Down, 2),
            (Direction::Down, 3),
        ]
    );
}

#[test]
fn layout_twice_is_stable() {
    let mut host = Host::new(10, StackConfig::default(), Size::new(320.0, 480.0));
    let frames = |host: &Host| -> Vec<Rect> {
        host.stack
            .window()
            .map(|e| host.presenter.shown(e.card().index()).unwrap().frame)
            .collect()
    };
    let before = frames(&host);
    let shown = host.presenter.shown_count();

    host.stack.layout();
    host.stack.layout();
    let changes = host.stack.take_changes();
    assert!(changes.added.is_empty());
    assert!(changes.geometry.is_empty(), "same frames, nothing dirty");
    host.settle();

    assert_eq!(frames(&host), before);
    assert_eq!(host.presenter.shown_count(), shown);
    assert_eq!(host.source.requested(), [0, 1, 2]);
}

#[test]
fn exiting_card_stays_on_top_until_done() {
    let mut host = Host::new(10, StackConfig::default(), Size::new(320.0, 480.0));
    let first = host.stack.front().unwrap().card();
    let origin = host.front_center();
    let translation = crate::release_translation(origin, Direction::Right);
    drag(&mut host.stack, first, translation, 2);

    let changes = host.stack.take_changes();
    host.presenter.apply(host.stack.store(), &changes);
    assert_eq!(host.presenter.order().last(), Some(&first.index()));
    assert_eq!(host.presenter.shown_count(), 4);
    let exit = host
        .presenter
        .pending()
        .iter()
        .find(|a| a.card == first && a.pose.size.is_none())
        .copied()
        .unwrap();
    assert_eq!(exit.pose.center, Some(Point::new(origin.x * 4.0, origin.y)));
    assert_eq!(exit.pose.rotation, Some(1.0));

    host.settle();
    assert!(!host.stack.store().is_alive(first));
    assert_eq!(host.presenter.shown_count(), 3);
}

#[test]
fn empty_and_missing_sources_are_quiet() {
    let mut host = Host::new(0, StackConfig::default(), Size::new(320.0, 480.0));
    assert!(host.indices().is_empty());
    assert_eq!(host.swipe(Direction::Left), DragOutcome::Ignored);
    assert!(!host.stack.revert_if_possible());

    host.stack.detach_data_source();
    host.stack.set_bounds(Size::new(100.0, 100.0));
    host.stack.appearance_changed();
    assert_eq!(host.settle(), 0);
    assert!(host.source.requested().is_empty());
}

#[test]
fn shrinking_source_never_overreaches() {
    let mut host = Host::new(10, StackConfig::default(), Size::new(320.0, 480.0));
    host.source.set_count(3);
    for _ in 0..3 {
        host.swipe(Direction::Right);
    }
    assert!(host.stack.is_finished());
    assert!(host.source.requested().iter().all(|&i| i < 3));
}

/// Small deterministic generator for the invariant walk.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

#[test]
fn random_walk_keeps_window_invariants() {
    for seed in 0..16 {
        let mut rng = Lcg(seed);
        let mut host = Host::new(12, StackConfig::default(), Size::new(300.0, 500.0));

        for _ in 0..200 {
            match rng.below(7) {
                0 | 1 => {
                    let dir = Direction::PRIORITY[rng.below(4) as usize];
                    host.swipe(dir);
                }
                2 => {
                    host.stack.revert_if_possible();
                }
                3 => {
                    if let Some(front) = host.stack.front().map(VisibleCardEntry::card) {
                        drag(&mut host.stack, front, Vec2::new(5.0, -5.0), 2);
                    }
                }
                4 => {
                    host.source.set_count(rng.below(20) as usize);
                    host.stack.layout();
                }
                5 => {
                    let floor = host.stack.window_len().max(1) as u64;
                    let visible = floor + rng.below(3);
                    host.stack.set_visible_count(visible as usize);
                }
                _ => host.stack.set_bounds(Size::new(
                    100.0 + rng.below(400) as f64,
                    100.0 + rng.below(400) as f64,
                )),
            }
            host.settle();
            host.check_window();
            assert!(host.stack.window_len() <= host.stack.config().visible_count);
            assert_eq!(
                host.presenter.shown_count(),
                host.stack.window_len(),
                "settled stacks show exactly the window"
            );
        }
    }
}

// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe directions and direction sets.

use core::fmt;

/// A direction in which a card can leave the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
    /// Toward negative y.
    Up,
    /// Toward positive y.
    Down,
}

impl Direction {
    /// The order in which release tests are evaluated. The first satisfied
    /// direction wins.
    pub const PRIORITY: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Returns `true` for [`Left`](Self::Left) and [`Right`](Self::Right).
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns `+1.0` for directions along a positive axis, `-1.0` otherwise.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Right | Self::Down => 1.0,
            Self::Left | Self::Up => -1.0,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Left => 1 << 0,
            Self::Right => 1 << 1,
            Self::Up => 1 << 2,
            Self::Down => 1 << 3,
        }
    }
}

/// A set of [`Direction`]s, stored as a 4-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// No direction allowed.
    pub const NONE: Self = Self(0);

    /// All four directions.
    pub const ALL: Self = Self(0b1111);

    /// Left and right only.
    pub const HORIZONTAL: Self = Self(Direction::Left.bit() | Direction::Right.bit());

    /// Up and down only.
    pub const VERTICAL: Self = Self(Direction::Up.bit() | Direction::Down.bit());

    /// Returns a copy of `self` with `direction` added.
    #[inline]
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Returns a copy of `self` with `direction` removed.
    #[inline]
    #[must_use]
    pub const fn without(self, direction: Direction) -> Self {
        Self(self.0 & !direction.bit())
    }

    /// Adds a direction to the set.
    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        *self = self.with(direction);
    }

    /// Removes a direction from the set.
    #[inline]
    pub fn remove(&mut self, direction: Direction) {
        *self = self.without(direction);
    }

    /// Returns whether `direction` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Returns whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of directions in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the members in [`Direction::PRIORITY`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::PRIORITY
            .into_iter()
            .filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> Self {
        Self::NONE.with(direction)
    }
}

impl fmt::Debug for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

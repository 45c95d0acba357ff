//! Seat identification and per-seat storage.
//!
//! ## Seat
//!
//! A race always pairs exactly two drivers. `Seat` names the slot a driver
//! occupies; `Seat::other` gives the opponent.
//!
//! ## SeatMap
//!
//! Fixed two-entry storage indexed by `Seat`, with `pair_mut` for handing out
//! the attacker and defender at the same time.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two participants in a race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The driver listed first; attacks first by default.
    First,
    /// The driver listed second.
    Second,
}

impl Seat {
    /// Both seats in order.
    pub const ALL: [Seat; 2] = [Seat::First, Seat::Second];

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Raw index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::First => write!(f, "Seat 1"),
            Seat::Second => write!(f, "Seat 2"),
        }
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use grid_duel::core::{Seat, SeatMap};
///
/// let mut laps = SeatMap::new(0u32, 0u32);
/// laps[Seat::Second] += 3;
///
/// let (attacker, defender) = laps.pair_mut(Seat::Second);
/// *attacker += 1;
/// *defender += 10;
///
/// assert_eq!(laps[Seat::First], 10);
/// assert_eq!(laps[Seat::Second], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a map from the first and second seat's values.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a map with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(Seat) -> T) -> Self {
        Self::new(factory(Seat::First), factory(Seat::Second))
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Borrow `seat` and its opponent mutably at once.
    ///
    /// Returns `(seat's value, opponent's value)`.
    pub fn pair_mut(&mut self, seat: Seat) -> (&mut T, &mut T) {
        let [first, second] = &mut self.data;
        match seat {
            Seat::First => (first, second),
            Seat::Second => (second, first),
        }
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ALL.into_iter().zip(self.data.iter())
    }

    /// Map each seat's value.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> SeatMap<U> {
        SeatMap::new(f(&self.data[0]), f(&self.data[1]))
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

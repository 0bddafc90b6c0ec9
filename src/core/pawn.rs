//! Pawn palette and pawn multisets.
//!
//! Students are never individual objects: every place that holds students
//! (sack, clouds, entrances, halls, islands, character cards) stores a
//! `Pawns` multiset counting how many of each color it holds.
//!
//! ```
//! use eriantys_core::core::{PawnColor, Pawns};
//!
//! let mut pawns = Pawns::new();
//! pawns.add(PawnColor::Green, 4);
//! pawns.add(PawnColor::Blue, 1);
//!
//! assert_eq!(pawns[PawnColor::Green], 4);
//! assert_eq!(pawns.total(), 5);
//! ```

use std::ops::Index;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// The five student/professor colors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter, EnumCount, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PawnColor {
    Green,
    Red,
    Yellow,
    Pink,
    Blue,
}

impl PawnColor {
    /// Position of this color in the palette (0..5).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Iterate over the palette in fixed order.
    pub fn all() -> impl Iterator<Item = PawnColor> {
        Self::iter()
    }
}

/// A multiset of colored pawns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pawns {
    counts: [u8; PawnColor::COUNT],
}

impl Pawns {
    /// Create an empty multiset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; PawnColor::COUNT],
        }
    }

    /// Create a multiset holding `amount` pawns of every color.
    #[must_use]
    pub const fn uniform(amount: u8) -> Self {
        Self {
            counts: [amount; PawnColor::COUNT],
        }
    }

    /// Create a multiset from `(color, amount)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(PawnColor, u8)]) -> Self {
        let mut pawns = Self::new();
        for &(color, amount) in pairs {
            pawns.add(color, amount);
        }
        pawns
    }

    /// Number of pawns of a color.
    #[must_use]
    pub const fn get(&self, color: PawnColor) -> u8 {
        self.counts[color.index()]
    }

    /// Total number of pawns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Add `amount` pawns of a color.
    pub fn add(&mut self, color: PawnColor, amount: u8) {
        self.counts[color.index()] += amount;
    }

    /// Remove `amount` pawns of a color.
    ///
    /// Returns false (and removes nothing) if fewer are present.
    pub fn remove(&mut self, color: PawnColor, amount: u8) -> bool {
        let slot = &mut self.counts[color.index()];
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    /// Add every pawn of `other`.
    pub fn add_all(&mut self, other: &Pawns) {
        for color in PawnColor::all() {
            self.add(color, other.get(color));
        }
    }

    /// Check whether `other` is a sub-multiset of this one.
    #[must_use]
    pub fn contains(&self, other: &Pawns) -> bool {
        PawnColor::all().all(|color| self.get(color) >= other.get(color))
    }

    /// Remove every pawn of `other`.
    ///
    /// All-or-nothing: returns false without mutation if `other` is not
    /// contained in this multiset.
    pub fn remove_all(&mut self, other: &Pawns) -> bool {
        if !self.contains(other) {
            return false;
        }
        for color in PawnColor::all() {
            self.counts[color.index()] -= other.get(color);
        }
        true
    }

    /// Take every pawn out, leaving this multiset empty.
    pub fn take(&mut self) -> Pawns {
        std::mem::take(self)
    }

    /// Iterate over `(color, count)` pairs, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (PawnColor, u8)> + '_ {
        PawnColor::all().map(move |color| (color, self.get(color)))
    }

    /// The color holding the `n`-th pawn (0-based) in palette order.
    ///
    /// Used for uniform random extraction: draw `n` in `0..total()`.
    #[must_use]
    pub fn nth_color(&self, mut n: usize) -> Option<PawnColor> {
        for (color, count) in self.iter() {
            let count = count as usize;
            if n < count {
                return Some(color);
            }
            n -= count;
        }
        None
    }
}

impl Index<PawnColor> for Pawns {
    type Output = u8;

    fn index(&self, color: PawnColor) -> &Self::Output {
        &self.counts[color.index()]
    }
}

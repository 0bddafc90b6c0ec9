//! Tower colors and the towers each color still has to place.
//!
//! In 2- and 3-player matches every player owns a tower color. In 4-player
//! matches two players share BLACK and two share WHITE; a tower color is
//! therefore the unit of influence, conquest and victory ("team").

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Tower colors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    EnumIter, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TowerColor {
    Black,
    White,
    Grey,
}

impl TowerColor {
    pub fn all() -> impl Iterator<Item = TowerColor> {
        Self::iter()
    }
}

/// Towers not yet placed on the board, per tower color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerSupply {
    remaining: FxHashMap<TowerColor, u8>,
}

impl TowerSupply {
    /// Give each listed color its full set of towers.
    #[must_use]
    pub fn new(colors: impl IntoIterator<Item = TowerColor>, per_color: u8) -> Self {
        Self {
            remaining: colors.into_iter().map(|c| (c, per_color)).collect(),
        }
    }

    /// Towers a color still has to place.
    #[must_use]
    pub fn remaining(&self, color: TowerColor) -> u8 {
        self.remaining.get(&color).copied().unwrap_or(0)
    }

    /// Take up to `count` towers of a color; returns how many were taken.
    pub fn take(&mut self, color: TowerColor, count: u8) -> u8 {
        match self.remaining.get_mut(&color) {
            Some(left) => {
                let taken = count.min(*left);
                *left -= taken;
                taken
            }
            None => 0,
        }
    }

    /// Return towers knocked off an island to their color.
    pub fn give_back(&mut self, color: TowerColor, count: u8) {
        if let Some(left) = self.remaining.get_mut(&color) {
            *left += count;
        }
    }

    /// Colors participating in the match.
    pub fn colors(&self) -> impl Iterator<Item = TowerColor> + '_ {
        TowerColor::all().filter(move |c| self.remaining.contains_key(c))
    }

    /// A color that has placed its last tower, if any.
    #[must_use]
    pub fn exhausted(&self) -> Option<TowerColor> {
        self.colors().find(|&c| self.remaining(c) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that towers taken from the supply can be given back.
    #[test]
    fn test_take_and_give_back() {
        let mut supply = TowerSupply::new([TowerColor::Black, TowerColor::White], 8);

        assert_eq!(supply.take(TowerColor::Black, 3), 3);
        assert_eq!(supply.remaining(TowerColor::Black), 5);

        supply.give_back(TowerColor::Black, 2);
        assert_eq!(supply.remaining(TowerColor::Black), 7);
    }

    /// Test that taking towers stops at the supply left.
    #[test]
    fn test_take_clamps() {
        let mut supply = TowerSupply::new([TowerColor::Grey], 2);
        assert_eq!(supply.take(TowerColor::Grey, 5), 2);
        assert_eq!(supply.exhausted(), Some(TowerColor::Grey));
    }

    /// Test that a color not in play has no towers.
    #[test]
    fn test_absent_color() {
        let mut supply = TowerSupply::new([TowerColor::Black, TowerColor::White], 8);
        assert_eq!(supply.take(TowerColor::Grey, 1), 0);
        assert_eq!(supply.colors().count(), 2);
        assert_eq!(supply.exhausted(), None);
    }
}

//! Islands of the ring.

use serde::{Deserialize, Serialize};

use super::tower::TowerColor;
use crate::core::{PawnColor, Pawns};

/// One entry of the island ring.
///
/// A merged group of islands is a single entry whose `dimension` counts the
/// islands (and towers) it is made of.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    students: Pawns,
    tower: Option<TowerColor>,
    ban_tiles: u8,
    dimension: u8,
}

impl Default for Island {
    fn default() -> Self {
        Self::new()
    }
}

impl Island {
    /// An empty, unconquered single island.
    #[must_use]
    pub fn new() -> Self {
        Self {
            students: Pawns::new(),
            tower: None,
            ban_tiles: 0,
            dimension: 1,
        }
    }

    #[must_use]
    pub fn students(&self) -> &Pawns {
        &self.students
    }

    #[must_use]
    pub fn tower(&self) -> Option<TowerColor> {
        self.tower
    }

    #[must_use]
    pub fn ban_tiles(&self) -> u8 {
        self.ban_tiles
    }

    #[must_use]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn add_student(&mut self, color: PawnColor) {
        self.students.add(color, 1);
    }

    pub fn add_students(&mut self, pawns: &Pawns) {
        self.students.add_all(pawns);
    }

    pub(crate) fn set_tower(&mut self, tower: TowerColor) {
        self.tower = Some(tower);
    }

    pub fn add_ban_tile(&mut self) {
        self.ban_tiles += 1;
    }

    /// Remove one ban tile; false if there was none.
    pub fn take_ban_tile(&mut self) -> bool {
        if self.ban_tiles == 0 {
            return false;
        }
        self.ban_tiles -= 1;
        true
    }

    /// Absorb a neighbouring island into this one.
    pub(crate) fn absorb(&mut self, other: Island) {
        self.students.add_all(&other.students);
        self.ban_tiles += other.ban_tiles;
        self.dimension += other.dimension;
    }
}

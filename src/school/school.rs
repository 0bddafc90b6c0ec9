//! A player's school board: entrance and hall.

use serde::{Deserialize, Serialize};

use crate::core::config::MAX_HALL_PER_COLOR;
use crate::core::{GameError, GameResult, PawnColor, Pawns};

/// Entrance and hall of one player.
///
/// The entrance holds at most `max_entrance` students; the hall has ten seats
/// per color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    entrance: Pawns,
    hall: Pawns,
    max_entrance: u8,
}

impl School {
    /// Create an empty school with the given entrance capacity.
    #[must_use]
    pub fn new(max_entrance: u8) -> Self {
        Self {
            entrance: Pawns::new(),
            hall: Pawns::new(),
            max_entrance,
        }
    }

    #[must_use]
    pub fn entrance(&self) -> &Pawns {
        &self.entrance
    }

    #[must_use]
    pub fn hall(&self) -> &Pawns {
        &self.hall
    }

    #[must_use]
    pub fn max_entrance(&self) -> u8 {
        self.max_entrance
    }

    /// Free places in the entrance.
    #[must_use]
    pub fn entrance_room(&self) -> usize {
        (self.max_entrance as usize).saturating_sub(self.entrance.total())
    }

    /// Put students in the entrance; all-or-nothing on overflow.
    pub fn add_to_entrance(&mut self, pawns: &Pawns) -> GameResult<()> {
        if pawns.total() > self.entrance_room() {
            return Err(GameError::CapacityExceeded("entrance is full"));
        }
        self.entrance.add_all(pawns);
        Ok(())
    }

    /// Take one student of a color out of the entrance.
    pub fn remove_from_entrance(&mut self, color: PawnColor) -> GameResult<()> {
        if !self.entrance.remove(color, 1) {
            return Err(GameError::OutOfBounds("color not in entrance"));
        }
        Ok(())
    }

    /// Take a multiset of students out of the entrance; all-or-nothing.
    pub fn remove_all_from_entrance(&mut self, pawns: &Pawns) -> GameResult<()> {
        if !self.entrance.remove_all(pawns) {
            return Err(GameError::OutOfBounds("students not in entrance"));
        }
        Ok(())
    }

    /// True if the hall has a free seat for this color.
    #[must_use]
    pub fn hall_has_room(&self, color: PawnColor) -> bool {
        self.hall.get(color) < MAX_HALL_PER_COLOR
    }

    /// Seat a student in the hall, returning the new count for its color.
    pub fn add_to_hall(&mut self, color: PawnColor) -> GameResult<u8> {
        if !self.hall_has_room(color) {
            return Err(GameError::CapacityExceeded("hall row is full"));
        }
        self.hall.add(color, 1);
        Ok(self.hall.get(color))
    }

    /// Exchange students between the entrance and the hall in one step.
    ///
    /// `from_entrance` moves to the hall and `from_hall` to the entrance.
    /// All-or-nothing: both sides must be present and no hall row may end
    /// above ten.
    pub fn swap_with_hall(&mut self, from_entrance: &Pawns, from_hall: &Pawns) -> GameResult<()> {
        if !self.entrance.contains(from_entrance) {
            return Err(GameError::OutOfBounds("students not in entrance"));
        }
        if !self.hall.contains(from_hall) {
            return Err(GameError::OutOfBounds("students not in hall"));
        }
        let overflow = PawnColor::all().any(|c| {
            self.hall.get(c) - from_hall.get(c) + from_entrance.get(c) > MAX_HALL_PER_COLOR
        });
        if overflow {
            return Err(GameError::CapacityExceeded("hall row is full"));
        }
        if from_hall.total() > self.entrance_room() + from_entrance.total() {
            return Err(GameError::CapacityExceeded("entrance is full"));
        }

        self.entrance.remove_all(from_entrance);
        self.hall.remove_all(from_hall);
        self.hall.add_all(from_entrance);
        self.entrance.add_all(from_hall);
        Ok(())
    }

    /// Remove up to `amount` students of a color from the hall.
    ///
    /// Returns how many were actually removed.
    pub fn remove_from_hall(&mut self, color: PawnColor, amount: u8) -> u8 {
        let removed = amount.min(self.hall.get(color));
        self.hall.remove(color, removed);
        removed
    }
}

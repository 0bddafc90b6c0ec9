//! Professor control.
//!
//! One professor per color. After any hall mutation the professor goes to
//! the player with the strictly greatest hall count for that color. Ties keep
//! the current holder, including keeping the professor unassigned.

use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::core::{PawnColor, PlayerId};

/// Tie-break rule used when recounting a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfessorRule {
    /// Ties keep the current holder.
    #[default]
    Standard,

    /// The acting player takes the professor when tied with the holder.
    TieTakes,
}

/// A professor changing hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorChange {
    pub color: PawnColor,
    pub from: Option<PlayerId>,
    pub to: Option<PlayerId>,
}

/// Maps each color to the player controlling its professor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorAssignor {
    holders: [Option<PlayerId>; PawnColor::COUNT],
}

impl ProfessorAssignor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current holder of a color's professor.
    #[must_use]
    pub fn holder(&self, color: PawnColor) -> Option<PlayerId> {
        self.holders[color.index()]
    }

    /// Colors whose professor a player controls.
    pub fn controlled_by(&self, player: PlayerId) -> impl Iterator<Item = PawnColor> + '_ {
        PawnColor::all().filter(move |&c| self.holder(c) == Some(player))
    }

    /// Drop every professor a player holds (player left before the start).
    pub fn release(&mut self, player: PlayerId) {
        for slot in self.holders.iter_mut().filter(|h| **h == Some(player)) {
            *slot = None;
        }
    }

    /// Re-evaluate a color given every player's hall count for it.
    ///
    /// `acting` is the player whose move triggered the recount; it only
    /// matters under [`ProfessorRule::TieTakes`].
    pub fn reassign(
        &mut self,
        color: PawnColor,
        counts: &[(PlayerId, u8)],
        acting: PlayerId,
        rule: ProfessorRule,
    ) -> Option<ProfessorChange> {
        let current = self.holder(color);
        let count_of = |player: PlayerId| {
            counts
                .iter()
                .find(|(p, _)| *p == player)
                .map_or(0, |&(_, c)| c)
        };
        let max = counts.iter().map(|&(_, c)| c).max().unwrap_or(0);

        let next = if max == 0 {
            None
        } else {
            let leaders: Vec<PlayerId> = counts
                .iter()
                .filter(|&&(_, c)| c == max)
                .map(|&(p, _)| p)
                .collect();
            let holder_count = current.map_or(0, count_of);

            if leaders.len() == 1 && max > holder_count {
                Some(leaders[0])
            } else if rule == ProfessorRule::TieTakes
                && count_of(acting) == max
                && (current.is_none() || holder_count == max)
            {
                Some(acting)
            } else {
                current
            }
        };

        if next == current {
            return None;
        }
        self.holders[color.index()] = next;
        Some(ProfessorChange {
            color,
            from: current,
            to: next,
        })
    }
}

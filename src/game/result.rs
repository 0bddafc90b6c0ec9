//! Match outcome.
//!
//! The winner is the tower color with the fewest towers left to place. A tie
//! is broken by the number of professors the color's players control; a
//! further tie is a draw. In 4-player matches the winning color is a team,
//! so both of its players win.

use serde::{Deserialize, Serialize};

use crate::board::TowerColor;
use crate::core::PlayerId;

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(PlayerId),
    /// A winning team.
    Winners(Vec<PlayerId>),
    /// Draw (no winner).
    Draw,
}

impl MatchResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            MatchResult::Winner(p) => *p == player,
            MatchResult::Winners(ps) => ps.contains(&player),
            MatchResult::Draw => false,
        }
    }
}

/// End-of-match score of one tower color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub team: TowerColor,
    pub members: Vec<PlayerId>,
    pub towers_left: u8,
    pub professors: usize,
}

/// Decide the result from every team's standing.
#[must_use]
pub fn decide(standings: &[Standing]) -> MatchResult {
    let Some(best) = standings
        .iter()
        .map(|s| (std::cmp::Reverse(s.towers_left), s.professors))
        .max()
    else {
        return MatchResult::Draw;
    };

    let mut leaders = standings
        .iter()
        .filter(|s| (std::cmp::Reverse(s.towers_left), s.professors) == best);
    let Some(winner) = leaders.next() else {
        return MatchResult::Draw;
    };
    if leaders.next().is_some() {
        return MatchResult::Draw;
    }

    match winner.members.as_slice() {
        [single] => MatchResult::Winner(*single),
        members => MatchResult::Winners(members.to_vec()),
    }
}

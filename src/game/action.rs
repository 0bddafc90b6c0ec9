//! Inbound player actions and the action history.
//!
//! `Action` is what the session layer sends for a seated player; the
//! orchestrator dispatches it with [`Game::apply`](super::Game::apply) and
//! records every accepted action as an [`ActionRecord`].

use serde::{Deserialize, Serialize};

use crate::cards::{Assistant, CharacterEffect};
use crate::core::{PawnColor, PlayerId};

/// A player request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    PlayAssistant(Assistant),
    MoveStudentToHall(PawnColor),
    MoveStudentToIsland { color: PawnColor, island: usize },
    MoveMotherNature { steps: u8 },
    PickFromCloud(usize),
    /// Pay for a character by its table index.
    UseCharacter(usize),
    ResolveCharacter(CharacterEffect),
}

impl Action {
    /// Whether the action belongs to the planning phase.
    #[must_use]
    pub fn is_planning(&self) -> bool {
        matches!(self, Action::PlayAssistant(_))
    }
}

/// An accepted action with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Round in which the action was taken (1-based).
    pub round: u32,
    /// Position in the whole match history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}

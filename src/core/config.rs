//! Match configuration and per-player-count limits.
//!
//! The session layer describes a match with a [`MatchConfig`]; the engine
//! derives an immutable [`GameLimit`] from its player count when the match is
//! created. Rule constants shared by every match live here as well.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Total students of each color in the game box.
pub const STUDENTS_PER_COLOR: u8 = 24;

/// Students of each color placed in the sack for island seeding.
pub const INITIAL_SACK_PER_COLOR: u8 = 2;

/// Islands on the board at setup.
pub const MAX_ISLANDS: usize = 12;

/// The match ends as soon as the ring shrinks to this many islands.
pub const MIN_ISLANDS: usize = 3;

/// Coins in the game box (bank pool plus every player balance).
pub const MAX_COINS: u8 = 20;

/// Coins each player receives when joining.
pub const INITIAL_COINS_PER_PLAYER: u8 = 1;

/// Seats per color in a school hall.
pub const MAX_HALL_PER_COLOR: u8 = 10;

/// Character cards drawn for an expert match.
pub const CHARACTERS_IN_USE: usize = 3;

/// Assistant cards in each player's hand at setup.
pub const ASSISTANTS_PER_HAND: usize = 10;

/// Player counts a match can be created for.
pub const PLAYER_COUNTS: [usize; 3] = [2, 3, 4];

/// Description of a match, provided by the session layer.
///
/// ## Example
///
/// ```
/// use eriantys_core::core::MatchConfig;
///
/// let config = MatchConfig::default()
///     .with_players(3)
///     .with_expert_mode(true)
///     .with_seed(7);
///
/// assert_eq!(config.player_count, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of players the match waits for before it can start (2-4).
    pub player_count: usize,

    /// Enables character cards and the coin economy.
    pub expert_mode: bool,

    /// Seed for sack extraction and character selection.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            expert_mode: false,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Enable or disable expert mode.
    #[must_use]
    pub fn with_expert_mode(mut self, expert: bool) -> Self {
        self.expert_mode = expert;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration describes a playable match.
    pub fn validate(&self) -> GameResult<()> {
        if !PLAYER_COUNTS.contains(&self.player_count) {
            return Err(GameError::OutOfBounds("player count must be 2, 3 or 4"));
        }
        Ok(())
    }
}

/// Limits that depend on the number of players.
///
/// | players | entrance | cloud | moves/turn | towers | clouds |
/// |---------|----------|-------|------------|--------|--------|
/// | 2       | 7        | 3     | 3          | 8      | 2      |
/// | 3       | 9        | 4     | 4          | 6      | 3      |
/// | 4       | 7        | 3     | 3          | 8      | 4      |
///
/// In a 4-player match the 8 towers belong to a team of two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLimit {
    /// Students a school entrance can hold.
    pub max_entrance: u8,

    /// Students placed on each cloud per round.
    pub students_on_cloud: u8,

    /// Students a player moves out of the entrance each turn.
    pub students_per_turn: u8,

    /// Towers available to each tower color.
    pub towers_per_team: u8,

    /// Number of clouds on the table.
    pub cloud_count: usize,
}

impl GameLimit {
    /// Derive the limits for a player count.
    ///
    /// Returns `OutOfBounds` for unsupported player counts.
    pub fn for_players(player_count: usize) -> GameResult<Self> {
        let (max_entrance, students_on_cloud, towers_per_team) = match player_count {
            2 => (7, 3, 8),
            3 => (9, 4, 6),
            4 => (7, 3, 8),
            _ => return Err(GameError::OutOfBounds("player count must be 2, 3 or 4")),
        };

        Ok(Self {
            max_entrance,
            students_on_cloud,
            students_per_turn: students_on_cloud,
            towers_per_team,
            cloud_count: player_count,
        })
    }
}

//! Error taxonomy for rule-engine operations.
//!
//! Every gameplay rejection is an expected, recoverable outcome: a remote
//! client may legitimately attempt an illegal move, and the session layer
//! turns the rejection into a retry prompt. Rejected operations never leave
//! partial mutations behind.
//!
//! The single exception is [`GameError::UnknownPlayer`], which signals that
//! the caller broke the API contract (it referenced a player that was never
//! registered). It is classified [`ErrorSeverity::Fatal`] so callers can tell
//! it apart from ordinary rejections.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// How an error should be handled by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// The action was illegal in the current state; ask the player again.
    Rejected,

    /// The caller violated the engine's contract. Abort the operation.
    Fatal,
}

/// Errors returned by rule-engine operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Action attempted outside the required game state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Name, wizard, tower color or assistant already taken.
    #[error("already selected: {0}")]
    DuplicateSelection(&'static str),

    /// Steps, indices, colors or amounts outside the legal range.
    #[error("out of bounds: {0}")]
    OutOfBounds(&'static str),

    /// A coin debit exceeds the available balance.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u8, available: u8 },

    /// A hall, entrance, roster or coin balance would overflow.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(&'static str),

    /// A shared supply (sack, bank pool, ban tiles) cannot provide what was asked.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(&'static str),

    /// The referenced player was never registered in this match.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

impl GameError {
    /// Returns the severity of this error.
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPlayer(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Rejected,
        }
    }

    /// True for ordinary gameplay rejections.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Rejected)
    }

    /// Stable identifier for this error variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState(_) => "INVALID_STATE",
            Self::DuplicateSelection(_) => "DUPLICATE_SELECTION",
            Self::OutOfBounds(_) => "OUT_OF_BOUNDS",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            Self::ResourceExhausted(_) => "RESOURCE_EXHAUSTED",
            Self::UnknownPlayer(_) => "UNKNOWN_PLAYER",
        }
    }
}

/// Result alias used throughout the engine.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that errors are split into rejections and fatal errors.
    #[test]
    fn test_severity() {
        assert!(GameError::OutOfBounds("steps").is_rejection());
        assert!(GameError::InsufficientFunds { needed: 3, available: 1 }.is_rejection());
        assert_eq!(
            GameError::UnknownPlayer(PlayerId::new(9)).severity(),
            ErrorSeverity::Fatal
        );
    }

    /// Test that errors render a readable message.
    #[test]
    fn test_display() {
        let err = GameError::InsufficientFunds { needed: 3, available: 1 };
        assert_eq!(err.to_string(), "insufficient funds: need 3, have 1");
        assert_eq!(
            GameError::UnknownPlayer(PlayerId::new(2)).to_string(),
            "unknown player Player 2"
        );
    }

    /// Test that errors map to stable codes.
    #[test]
    fn test_error_codes() {
        assert_eq!(GameError::InvalidState("x").error_code(), "INVALID_STATE");
        assert_eq!(GameError::ResourceExhausted("x").error_code(), "RESOURCE_EXHAUSTED");
    }
}

//! Cards: assistants and characters.
//!
//! ## Key Types
//!
//! - `Assistant`: one of the ten cards every player holds
//! - `CharacterCard`: an expert-mode character in play
//! - `CharacterEffect`: a character effect with its chosen parameters

pub mod assistant;
pub mod character;

pub use assistant::Assistant;
pub use character::{
    CharacterCard, CharacterEffect, CharacterKind, CharactersDeck, HERBALIST_BAN_TILES,
};

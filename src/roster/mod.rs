//! Players seated in a match.

pub mod player;

pub use player::{Hand, Player, Wizard};

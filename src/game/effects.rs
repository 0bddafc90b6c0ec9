//! Character effect resolution.
//!
//! Every effect validates all of its parameters before touching the match,
//! so a rejected effect leaves the activation pending and the player can
//! resolve it again with different parameters.

use tracing::debug;

use super::engine::Game;
use super::event::GameEvent;
use crate::board::{InfluenceContext, InfluenceRule, Resolution};
use crate::cards::CharacterEffect;
use crate::core::{GameError, GameResult, PawnColor, Pawns, PlayerId};
use crate::school::ProfessorRule;

/// Extra mother-nature steps granted by the Mailman.
pub const MAILMAN_EXTRA_STEPS: u8 = 2;

/// Extra influence granted by the Knight.
pub const KNIGHT_BONUS: u8 = 2;

/// Most students the Jester swaps.
pub const JESTER_SWAP: usize = 3;

/// Most students the Minstrel swaps.
pub const MINSTREL_SWAP: usize = 2;

/// Students of the chosen color each player loses to the Thief.
pub const THIEF_TAKES: u8 = 3;

fn single(color: PawnColor) -> Pawns {
    Pawns::from_pairs(&[(color, 1)])
}

fn check_swap(a: &Pawns, b: &Pawns, max: usize) -> GameResult<()> {
    let n = a.total();
    if n == 0 || n > max || n != b.total() {
        return Err(GameError::OutOfBounds("swap size"));
    }
    Ok(())
}

impl Game {
    /// Apply the effect of the character paid for this turn.
    pub fn resolve_character(&mut self, player: PlayerId, effect: CharacterEffect) -> GameResult<()> {
        self.ensure_in_progress()?;
        let Some((owner, index)) = self.turn.pending else {
            return Err(GameError::InvalidState("no character waiting to be resolved"));
        };
        if owner != player {
            return Err(GameError::InvalidState("character was activated by another player"));
        }
        let kind = self.characters[index].kind();
        if effect.kind() != kind {
            return Err(GameError::InvalidState("effect does not match the character"));
        }

        let resolution = self.apply_effect(player, index, &effect)?;

        self.turn.pending = None;
        debug!(%player, %kind, "character resolved");
        self.events.push(GameEvent::CharacterResolved { player, kind });
        if let Some(resolution) = resolution {
            self.after_resolution(resolution);
        }
        Ok(())
    }

    /// Apply an effect, returning the island resolution it caused, if any.
    ///
    /// The caller emits the resolution's events after `CharacterResolved`.
    fn apply_effect(
        &mut self,
        player: PlayerId,
        card: usize,
        effect: &CharacterEffect,
    ) -> GameResult<Option<Resolution>> {
        let seat = self.player_index(player)?;

        match *effect {
            CharacterEffect::Monk { color, island } => {
                if island >= self.board.len() {
                    return Err(GameError::OutOfBounds("island index"));
                }
                self.characters[card].take_students(&single(color))?;
                self.board.add_student(island, color)?;
                self.characters[card].stock(&mut self.sack);
            }

            CharacterEffect::Farmer => {
                self.hall.set_rule(ProfessorRule::TieTakes);
                for change in self.hall.recount_all(&self.players, player) {
                    self.events.push(GameEvent::ProfessorChanged(change));
                }
            }

            CharacterEffect::Herald { island } => {
                let seats = self.seats();
                let ctx = InfluenceContext {
                    professors: self.hall.professors(),
                    seats: &seats,
                };
                let resolution = self.board.resolve_island(island, &ctx, &mut self.towers)?;
                return Ok(Some(resolution));
            }

            CharacterEffect::Mailman => {
                self.turn.extra_steps += MAILMAN_EXTRA_STEPS;
            }

            CharacterEffect::Herbalist { island } => {
                if island >= self.board.len() {
                    return Err(GameError::OutOfBounds("island index"));
                }
                self.characters[card].take_ban_tile()?;
                self.board.place_ban_tile(island)?;
            }

            CharacterEffect::Centaur => {
                self.board.set_influence_rule(InfluenceRule::IgnoreTowers);
            }

            CharacterEffect::Jester {
                from_card,
                from_entrance,
            } => {
                check_swap(&from_card, &from_entrance, JESTER_SWAP)?;
                self.characters[card].check_students(&from_card)?;
                let school = self.players[seat].school_mut();
                school.remove_all_from_entrance(&from_entrance)?;
                school.add_to_entrance(&from_card)?;
                self.characters[card].take_students(&from_card)?;
                self.characters[card].add_students(&from_entrance);
            }

            CharacterEffect::Knight => {
                let team = self.players[seat].tower();
                self.board.set_influence_rule(InfluenceRule::ExtraInfluence {
                    team,
                    bonus: KNIGHT_BONUS,
                });
            }

            CharacterEffect::Mushroom { color } => {
                self.board.set_influence_rule(InfluenceRule::IgnoreColor(color));
            }

            CharacterEffect::Minstrel {
                from_entrance,
                from_hall,
            } => {
                check_swap(&from_entrance, &from_hall, MINSTREL_SWAP)?;
                let (changes, coin) = self.hall.swap_with_entrance(
                    &mut self.players,
                    player,
                    &from_entrance,
                    &from_hall,
                    &mut self.bank,
                )?;
                for change in changes {
                    self.events.push(GameEvent::ProfessorChanged(change));
                }
                if coin.is_some() {
                    self.push_coin_event(player);
                }
            }

            CharacterEffect::Princess { color } => {
                self.characters[card].check_students(&single(color))?;
                self.hall.check_room(&self.players, player, color)?;
                self.characters[card].take_students(&single(color))?;
                let outcome =
                    self.hall
                        .add_to_hall(&mut self.players, player, color, &mut self.bank)?;
                self.record_hall_outcome(player, outcome);
                self.characters[card].stock(&mut self.sack);
            }

            CharacterEffect::Thief { color } => {
                let (removed, change) =
                    self.hall
                        .remove_from_every_hall(&mut self.players, color, THIEF_TAKES, player);
                self.sack.put_back(&Pawns::from_pairs(&[(color, removed)]));
                if let Some(change) = change {
                    self.events.push(GameEvent::ProfessorChanged(change));
                }
            }
        }
        Ok(None)
    }
}

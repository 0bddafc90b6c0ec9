//! Hall placement and the professor recount it triggers.
//!
//! `HallManager` is the only path by which students enter or leave a hall,
//! so every change is followed by a professor recount for that color. The
//! expert variant also pays out the coin printed on the 3rd, 6th and 9th
//! seat of each hall row. Each seat pays once per player and color for the
//! whole match, and the payout goes through the [`Bank`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::professor::{ProfessorAssignor, ProfessorChange, ProfessorRule};
use crate::core::{GameError, GameResult, PawnColor, Pawns, PlayerId};
use crate::roster::Player;
use crate::supply::Bank;

/// Hall seats that carry a coin.
pub const COIN_SEATS: [u8; 3] = [3, 6, 9];

/// What happened after a student was seated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallOutcome {
    /// New hall count for the color.
    pub count: u8,
    pub professor: Option<ProfessorChange>,
    /// New coin balance if the seat paid a coin.
    pub coin: Option<u8>,
}

/// Manages hall placement and professor control for all players.
#[derive(Clone, Debug, Default)]
pub struct HallManager {
    assignor: ProfessorAssignor,
    rule: ProfessorRule,
    registered: Vec<PlayerId>,
    /// `Some` in expert mode: seats that already paid their coin.
    paid_seats: Option<FxHashSet<(PlayerId, PawnColor, u8)>>,
}

impl HallManager {
    /// Standard-rules hall manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expert-mode hall manager that pays coin seats.
    #[must_use]
    pub fn with_coin_rewards() -> Self {
        Self {
            paid_seats: Some(FxHashSet::default()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pays_coins(&self) -> bool {
        self.paid_seats.is_some()
    }

    #[must_use]
    pub fn professors(&self) -> &ProfessorAssignor {
        &self.assignor
    }

    #[must_use]
    pub fn rule(&self) -> ProfessorRule {
        self.rule
    }

    pub fn set_rule(&mut self, rule: ProfessorRule) {
        self.rule = rule;
    }

    /// Restore standard tie-breaking.
    pub fn reset_strategy(&mut self) {
        self.rule = ProfessorRule::Standard;
    }

    /// Start tracking a player's hall.
    pub fn register(&mut self, player: PlayerId) {
        if !self.registered.contains(&player) {
            self.registered.push(player);
        }
    }

    /// Stop tracking a player and drop any professor they held.
    pub fn unregister(&mut self, player: PlayerId) {
        self.registered.retain(|&p| p != player);
        self.assignor.release(player);
    }

    fn seat<'a>(&self, players: &'a mut [Player], who: PlayerId) -> GameResult<&'a mut Player> {
        if !self.registered.contains(&who) {
            return Err(GameError::UnknownPlayer(who));
        }
        players
            .iter_mut()
            .find(|p| p.id() == who)
            .ok_or(GameError::UnknownPlayer(who))
    }

    /// Check that a student of `color` could be seated for `who`.
    pub fn check_room(&self, players: &[Player], who: PlayerId, color: PawnColor) -> GameResult<()> {
        let player = players
            .iter()
            .find(|p| p.id() == who && self.registered.contains(&who))
            .ok_or(GameError::UnknownPlayer(who))?;
        if !player.school().hall_has_room(color) {
            return Err(GameError::CapacityExceeded("hall row is full"));
        }
        Ok(())
    }

    /// Move one student from `who`'s entrance to their hall.
    pub fn move_from_entrance(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        color: PawnColor,
        bank: &mut Bank,
    ) -> GameResult<HallOutcome> {
        let school = self.seat(players, who)?.school();
        if school.entrance().get(color) == 0 {
            return Err(GameError::OutOfBounds("color not in entrance"));
        }
        self.check_room(players, who, color)?;

        self.seat(players, who)?.school_mut().remove_from_entrance(color)?;
        self.add_to_hall(players, who, color, bank)
    }

    /// Seat a student (from any source) in `who`'s hall.
    pub fn add_to_hall(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        color: PawnColor,
        bank: &mut Bank,
    ) -> GameResult<HallOutcome> {
        let count = self.seat(players, who)?.school_mut().add_to_hall(color)?;
        let coin = self.pay_seat(who, color, count, bank);
        let professor = self.recount(players, color, who);
        Ok(HallOutcome {
            count,
            professor,
            coin,
        })
    }

    /// Swap students between `who`'s entrance and hall in one step.
    ///
    /// Professors are recounted once per touched color after both sides have
    /// moved. Returns the professor changes and the new coin balance if any
    /// seat paid.
    pub fn swap_with_entrance(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        from_entrance: &Pawns,
        from_hall: &Pawns,
        bank: &mut Bank,
    ) -> GameResult<(Vec<ProfessorChange>, Option<u8>)> {
        let school = self.seat(players, who)?.school_mut();
        let before = *school.hall();
        school.swap_with_hall(from_entrance, from_hall)?;

        let mut coin = None;
        for (color, added) in from_entrance.iter() {
            let low = before.get(color) - from_hall.get(color);
            for count in low + 1..=low + added {
                coin = self.pay_seat(who, color, count, bank).or(coin);
            }
        }

        let changes = PawnColor::all()
            .filter(|&c| from_entrance.get(c) > 0 || from_hall.get(c) > 0)
            .filter_map(|color| self.recount(players, color, who))
            .collect();
        Ok((changes, coin))
    }

    /// Remove up to `amount` students of a color from `who`'s hall.
    ///
    /// Returns how many were removed and any resulting professor change.
    pub fn remove_from_hall(
        &mut self,
        players: &mut [Player],
        who: PlayerId,
        color: PawnColor,
        amount: u8,
    ) -> GameResult<(u8, Option<ProfessorChange>)> {
        let removed = self.seat(players, who)?.school_mut().remove_from_hall(color, amount);
        let change = self.recount(players, color, who);
        Ok((removed, change))
    }

    /// Remove up to `amount` students of a color from every tracked hall.
    ///
    /// The professor is recounted once, after every hall has been stripped.
    /// Returns the total removed and any resulting professor change.
    pub fn remove_from_every_hall(
        &mut self,
        players: &mut [Player],
        color: PawnColor,
        amount: u8,
        acting: PlayerId,
    ) -> (u8, Option<ProfessorChange>) {
        let removed: u8 = players
            .iter_mut()
            .filter(|p| self.registered.contains(&p.id()))
            .map(|p| p.school_mut().remove_from_hall(color, amount))
            .sum();
        let change = self.recount(players, color, acting);
        (removed, change)
    }

    /// Pay the coin on `seat` of `who`'s `color` row if it has not paid yet.
    fn pay_seat(&mut self, who: PlayerId, color: PawnColor, seat: u8, bank: &mut Bank) -> Option<u8> {
        let pays = COIN_SEATS.contains(&seat)
            && self
                .paid_seats
                .as_mut()
                .is_some_and(|paid| paid.insert((who, color, seat)));
        if pays {
            bank.add_coin(who, 1).ok()
        } else {
            None
        }
    }

    /// Recompute the professor of a color after a hall change.
    pub fn recount(
        &mut self,
        players: &[Player],
        color: PawnColor,
        acting: PlayerId,
    ) -> Option<ProfessorChange> {
        let counts: Vec<(PlayerId, u8)> = players
            .iter()
            .filter(|p| self.registered.contains(&p.id()))
            .map(|p| (p.id(), p.school().hall().get(color)))
            .collect();
        self.assignor.reassign(color, &counts, acting, self.rule)
    }

    /// Recount every color (used when the tie-break rule changes mid-turn).
    pub fn recount_all(&mut self, players: &[Player], acting: PlayerId) -> Vec<ProfessorChange> {
        PawnColor::all()
            .filter_map(|color| self.recount(players, color, acting))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TowerColor;
    use crate::roster::Wizard;

    fn seated(expert: bool) -> (HallManager, Vec<Player>, Bank) {
        let mut hall = if expert {
            HallManager::with_coin_rewards()
        } else {
            HallManager::new()
        };
        let mut bank = Bank::new();
        let mut players = vec![
            Player::new(PlayerId::new(0), "Luca", Wizard::Druid, TowerColor::Black, 9),
            Player::new(PlayerId::new(1), "Marco", Wizard::Sage, TowerColor::White, 9),
        ];
        for player in &mut players {
            hall.register(player.id());
            bank.register(player.id()).unwrap();
            player
                .initial_entrance_fill(&Pawns::from_pairs(&[(PawnColor::Red, 9)]))
                .unwrap();
        }
        (hall, players, bank)
    }

    /// Test that the first student of a color takes its professor.
    #[test]
    fn test_move_assigns_professor() {
        let (mut hall, mut players, mut bank) = seated(false);
        let p0 = PlayerId::new(0);

        let outcome = hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();

        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.professor.unwrap().to, Some(p0));
        assert_eq!(outcome.coin, None);
        assert_eq!(players[0].school().entrance().get(PawnColor::Red), 8);
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));
    }

    /// Test that moving an absent color is rejected without mutation.
    #[test]
    fn test_move_missing_color_rejected() {
        let (mut hall, mut players, mut bank) = seated(false);

        let err = hall
            .move_from_entrance(&mut players, PlayerId::new(0), PawnColor::Blue, &mut bank)
            .unwrap_err();

        assert_eq!(err, GameError::OutOfBounds("color not in entrance"));
        assert!(players[0].school().hall().is_empty());
    }

    /// Test that an untracked player is a fatal error.
    #[test]
    fn test_unregistered_player_is_fatal() {
        let (mut hall, mut players, mut bank) = seated(false);
        let err = hall
            .move_from_entrance(&mut players, PlayerId::new(7), PawnColor::Red, &mut bank)
            .unwrap_err();
        assert!(!err.is_rejection());
    }

    /// Test that a tie keeps the professor with its holder.
    #[test]
    fn test_tie_does_not_move_professor() {
        let (mut hall, mut players, mut bank) = seated(false);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

        hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
        let outcome = hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();

        assert_eq!(outcome.professor, None);
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));
    }

    /// Test that the tie-takes rule hands over on a tie until reset.
    #[test]
    fn test_tie_takes_rule_then_reset() {
        let (mut hall, mut players, mut bank) = seated(false);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

        hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
        hall.set_rule(ProfessorRule::TieTakes);
        let outcome = hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();
        assert_eq!(outcome.professor.unwrap().to, Some(p1));

        hall.reset_strategy();
        assert_eq!(hall.rule(), ProfessorRule::Standard);
    }

    /// Test that each coin seat pays only once per player and color.
    #[test]
    fn test_coin_seats_pay_once() {
        let (mut hall, mut players, mut bank) = seated(true);
        let p0 = PlayerId::new(0);

        let coins: Vec<_> = (0..3)
            .map(|_| hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap().coin)
            .collect();
        assert_eq!(coins, vec![None, None, Some(2)]);
        assert_eq!(bank.pool(), 17);

        // Leaving and re-entering the third seat does not pay again.
        hall.remove_from_hall(&mut players, p0, PawnColor::Red, 1).unwrap();
        let again = hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
        assert_eq!(again.coin, None);
        assert_eq!(bank.total(), 20);
    }

    /// Test that standard mode never pays coin seats.
    #[test]
    fn test_standard_mode_pays_nothing() {
        let (mut hall, mut players, mut bank) = seated(false);
        for _ in 0..3 {
            hall.move_from_entrance(&mut players, PlayerId::new(0), PawnColor::Red, &mut bank)
                .unwrap();
        }
        assert_eq!(bank.pool(), 18);
    }

    /// Test that removing students recounts the professor.
    #[test]
    fn test_remove_from_hall_recounts() {
        let (mut hall, mut players, mut bank) = seated(false);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
        hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
        hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();

        let (removed, change) = hall.remove_from_hall(&mut players, p0, PawnColor::Red, 3).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(change.unwrap().to, Some(p1));
    }

    /// Test that a same-color swap leaves a tied professor with its holder.
    #[test]
    fn test_swap_same_color_keeps_tied_professor() {
        let (mut hall, mut players, mut bank) = seated(false);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        for _ in 0..3 {
            hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
            hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();
        }
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));

        let red = Pawns::from_pairs(&[(PawnColor::Red, 1)]);
        let (changes, coin) = hall.swap_with_entrance(&mut players, p0, &red, &red, &mut bank).unwrap();

        assert!(changes.is_empty());
        assert_eq!(coin, None);
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));
        assert_eq!(players[0].school().hall().get(PawnColor::Red), 3);
    }

    /// Test that a swap moves professors and pays newly reached coin seats.
    #[test]
    fn test_swap_recounts_and_pays() {
        let (mut hall, mut players, mut bank) = seated(true);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();
        players[0]
            .school_mut()
            .remove_all_from_entrance(&Pawns::from_pairs(&[(PawnColor::Red, 3)]))
            .unwrap();
        players[0]
            .school_mut()
            .add_to_entrance(&Pawns::from_pairs(&[(PawnColor::Blue, 3)]))
            .unwrap();
        hall.move_from_entrance(&mut players, p0, PawnColor::Blue, &mut bank).unwrap();

        let from_entrance = Pawns::from_pairs(&[(PawnColor::Red, 2)]);
        let from_hall = Pawns::from_pairs(&[(PawnColor::Blue, 1)]);
        let (changes, _) = hall
            .swap_with_entrance(&mut players, p0, &from_entrance, &from_hall, &mut bank)
            .unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));
        assert_eq!(hall.professors().holder(PawnColor::Blue), None);

        // The third red seat is reached through a second swap.
        let one_red = Pawns::from_pairs(&[(PawnColor::Red, 1)]);
        let (_, coin) = hall
            .swap_with_entrance(&mut players, p0, &one_red, &Pawns::new(), &mut bank)
            .unwrap();
        assert_eq!(coin, Some(2));
    }

    /// Test that stripping every hall recounts once against the final counts.
    #[test]
    fn test_remove_from_every_hall_keeps_tied_holder() {
        let (mut hall, mut players, mut bank) = seated(false);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        for _ in 0..4 {
            hall.move_from_entrance(&mut players, p0, PawnColor::Red, &mut bank).unwrap();
            hall.move_from_entrance(&mut players, p1, PawnColor::Red, &mut bank).unwrap();
        }

        let (removed, change) = hall.remove_from_every_hall(&mut players, PawnColor::Red, 3, p1);

        assert_eq!(removed, 6);
        assert_eq!(change, None);
        assert_eq!(hall.professors().holder(PawnColor::Red), Some(p0));
        assert_eq!(players[1].school().hall().get(PawnColor::Red), 1);
    }
}

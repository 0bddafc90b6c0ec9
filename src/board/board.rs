//! The island ring, mother nature, conquest and merging.
//!
//! ## Conquest
//!
//! When mother nature stops on an island, every tower color computes its
//! influence there: one point per student of each color whose professor is
//! held by a player of that tower color, plus one point per tower the color
//! already has on the island. A color that strictly beats every other color
//! takes the island; ties change nothing. A ban tile on the island cancels
//! the whole resolution and is removed instead.
//!
//! ## Merging
//!
//! After a conquest, ring neighbours carrying the same tower color are merged
//! into the conquered island. The check repeats until neither neighbour
//! matches, so runs of three collapse into one entry.

use serde::{Deserialize, Serialize};

use super::island::Island;
use super::tower::{TowerColor, TowerSupply};
use crate::core::config::MAX_ISLANDS;
use crate::core::{GameError, GameResult, PawnColor, PlayerId};
use crate::school::ProfessorAssignor;
use crate::supply::Sack;

/// Islands seeded with one student at setup.
///
/// Mother nature starts on island 0; island 0 and the island opposite it
/// (6) start empty.
pub const SEEDED_ISLANDS: [usize; 10] = [1, 2, 3, 4, 5, 7, 8, 9, 10, 11];

/// Temporary modification of the influence computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfluenceRule {
    #[default]
    Standard,

    /// Towers add no influence.
    IgnoreTowers,

    /// A tower color gets bonus influence.
    ExtraInfluence { team: TowerColor, bonus: u8 },

    /// Students of a color add no influence.
    IgnoreColor(PawnColor),
}

/// Who controls which professors, per tower color.
pub struct InfluenceContext<'a> {
    pub professors: &'a ProfessorAssignor,
    /// Tower color of every seated player.
    pub seats: &'a [(PlayerId, TowerColor)],
}

impl InfluenceContext<'_> {
    fn team_of(&self, player: PlayerId) -> Option<TowerColor> {
        self.seats
            .iter()
            .find(|(p, _)| *p == player)
            .map(|&(_, t)| t)
    }
}

/// A tower color replacing another on an island.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerChange {
    pub island: usize,
    pub from: Option<TowerColor>,
    pub to: TowerColor,
    /// Towers actually placed (less than the island dimension when the
    /// color ran out).
    pub placed: u8,
}

/// Islands collapsed into one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Index of the merged island after the ring shrank.
    pub island: usize,
    pub dimension: u8,
    pub absorbed: usize,
}

/// Outcome of resolving influence on one island.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Index of the resolved island (after any merge).
    pub island: usize,
    /// A ban tile cancelled the resolution.
    pub banned: bool,
    pub tower_change: Option<TowerChange>,
    pub merge: Option<Merge>,
}

/// Island ring with mother nature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    islands: Vec<Island>,
    mother_nature: usize,
    influence_rule: InfluenceRule,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Twelve empty islands with mother nature on island 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            islands: vec![Island::new(); MAX_ISLANDS],
            mother_nature: 0,
            influence_rule: InfluenceRule::Standard,
        }
    }

    /// Seed the islands for a new match.
    pub fn init_islands(&mut self, sack: &mut Sack) {
        self.mother_nature = 0;
        for index in SEEDED_ISLANDS {
            if let Some(color) = sack.extract_one() {
                self.islands[index].add_student(color);
            }
        }
    }

    #[must_use]
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    #[must_use]
    pub fn island(&self, index: usize) -> Option<&Island> {
        self.islands.get(index)
    }

    /// Active islands in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Index of the island mother nature stands on.
    #[must_use]
    pub fn mother_nature(&self) -> usize {
        self.mother_nature
    }

    #[must_use]
    pub fn influence_rule(&self) -> InfluenceRule {
        self.influence_rule
    }

    pub fn set_influence_rule(&mut self, rule: InfluenceRule) {
        self.influence_rule = rule;
    }

    /// Restore the standard influence computation.
    pub fn reset_strategy(&mut self) {
        self.influence_rule = InfluenceRule::Standard;
    }

    pub(crate) fn island_mut(&mut self, index: usize) -> GameResult<&mut Island> {
        self.islands
            .get_mut(index)
            .ok_or(GameError::OutOfBounds("island index"))
    }

    /// Put a student on an island.
    pub fn add_student(&mut self, index: usize, color: PawnColor) -> GameResult<()> {
        self.island_mut(index)?.add_student(color);
        Ok(())
    }

    /// Put a ban tile on an island.
    pub fn place_ban_tile(&mut self, index: usize) -> GameResult<()> {
        self.island_mut(index)?.add_ban_tile();
        Ok(())
    }

    /// Number of islands carrying a tower color, counting merged dimension.
    #[must_use]
    pub fn towers_of(&self, color: TowerColor) -> usize {
        self.islands
            .iter()
            .filter(|i| i.tower() == Some(color))
            .map(|i| i.dimension() as usize)
            .sum()
    }

    /// Move mother nature clockwise and resolve the island she lands on.
    ///
    /// `steps` must already be validated by the caller; it wraps around the
    /// current ring size.
    pub fn move_mother_nature(
        &mut self,
        steps: usize,
        ctx: &InfluenceContext<'_>,
        towers: &mut TowerSupply,
    ) -> Resolution {
        self.mother_nature = (self.mother_nature + steps) % self.islands.len();
        self.resolve(self.mother_nature, ctx, towers)
    }

    /// Resolve influence on an island without moving mother nature.
    pub fn resolve_island(
        &mut self,
        index: usize,
        ctx: &InfluenceContext<'_>,
        towers: &mut TowerSupply,
    ) -> GameResult<Resolution> {
        if index >= self.islands.len() {
            return Err(GameError::OutOfBounds("island index"));
        }
        Ok(self.resolve(index, ctx, towers))
    }

    fn resolve(
        &mut self,
        index: usize,
        ctx: &InfluenceContext<'_>,
        towers: &mut TowerSupply,
    ) -> Resolution {
        if self.islands[index].take_ban_tile() {
            return Resolution {
                island: index,
                banned: true,
                tower_change: None,
                merge: None,
            };
        }

        let tower_change = self.conquer(index, ctx, towers);
        let merge = if tower_change.is_some() {
            self.merge_islands(index)
        } else {
            None
        };

        Resolution {
            island: merge.map_or(index, |m| m.island),
            banned: false,
            tower_change,
            merge,
        }
    }

    /// Influence of a tower color on an island under the current rule.
    #[must_use]
    pub fn influence(&self, index: usize, team: TowerColor, ctx: &InfluenceContext<'_>) -> u32 {
        let Some(island) = self.islands.get(index) else {
            return 0;
        };

        let mut score: u32 = PawnColor::all()
            .filter(|&color| self.influence_rule != InfluenceRule::IgnoreColor(color))
            .filter(|&color| {
                ctx.professors
                    .holder(color)
                    .and_then(|holder| ctx.team_of(holder))
                    == Some(team)
            })
            .map(|color| island.students().get(color) as u32)
            .sum();

        if island.tower() == Some(team) && self.influence_rule != InfluenceRule::IgnoreTowers {
            score += island.dimension() as u32;
        }
        if let InfluenceRule::ExtraInfluence { team: favoured, bonus } = self.influence_rule {
            if favoured == team {
                score += bonus as u32;
            }
        }
        score
    }

    fn conquer(
        &mut self,
        index: usize,
        ctx: &InfluenceContext<'_>,
        towers: &mut TowerSupply,
    ) -> Option<TowerChange> {
        let scores: Vec<(TowerColor, u32)> = towers
            .colors()
            .map(|team| (team, self.influence(index, team, ctx)))
            .collect();
        let best = scores.iter().map(|&(_, s)| s).max()?;
        let mut leaders = scores.iter().filter(|&&(_, s)| s == best);
        let (winner, _) = *leaders.next()?;
        if leaders.next().is_some() || best == 0 {
            return None;
        }

        let island = &mut self.islands[index];
        let previous = island.tower();
        if previous == Some(winner) {
            return None;
        }

        let dimension = island.dimension();
        if let Some(old) = previous {
            towers.give_back(old, dimension);
        }
        let placed = towers.take(winner, dimension);
        island.set_tower(winner);

        Some(TowerChange {
            island: index,
            from: previous,
            to: winner,
            placed,
        })
    }

    /// Merge an island with equal-tower neighbours.
    ///
    /// Idempotent: calling it again on the result changes nothing.
    pub fn merge_islands(&mut self, index: usize) -> Option<Merge> {
        let tower = self.islands.get(index)?.tower()?;
        let mut current = index;
        let mut absorbed = 0;

        while self.islands.len() > 1 {
            let len = self.islands.len();
            let next = (current + 1) % len;
            let prev = (current + len - 1) % len;

            let neighbour = if self.islands[next].tower() == Some(tower) {
                next
            } else if self.islands[prev].tower() == Some(tower) {
                prev
            } else {
                break;
            };

            let other = self.islands.remove(neighbour);
            if neighbour < current {
                current -= 1;
            }
            self.islands[current].absorb(other);
            absorbed += 1;

            if self.mother_nature == neighbour {
                self.mother_nature = current;
            } else if self.mother_nature > neighbour {
                self.mother_nature -= 1;
            }
        }

        (absorbed > 0).then(|| Merge {
            island: current,
            dimension: self.islands[current].dimension(),
            absorbed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::school::ProfessorRule;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const SEATS: [(PlayerId, TowerColor); 2] = [(P0, TowerColor::Black), (P1, TowerColor::White)];

    fn supply() -> TowerSupply {
        TowerSupply::new([TowerColor::Black, TowerColor::White], 8)
    }

    fn professors_for_p0(colors: &[PawnColor]) -> ProfessorAssignor {
        let mut professors = ProfessorAssignor::new();
        for &color in colors {
            professors.reassign(color, &[(P0, 1), (P1, 0)], P0, ProfessorRule::Standard);
        }
        professors
    }

    /// Test that the ring starts with twelve islands and one student on each seeded island.
    #[test]
    fn test_init_islands() {
        let mut sack = Sack::new(GameRng::new(42));
        sack.initial_fill();
        let mut board = Board::new();

        board.init_islands(&mut sack);

        assert_eq!(board.len(), 12);
        assert_eq!(board.mother_nature(), 0);
        assert!(board.island(0).unwrap().students().is_empty());
        assert!(board.island(6).unwrap().students().is_empty());
        for index in SEEDED_ISLANDS {
            assert_eq!(board.island(index).unwrap().students().total(), 1);
        }
        assert!(sack.is_empty());
    }

    /// Test that mother nature wraps past the end of the ring.
    #[test]
    fn test_move_wraps_around() {
        let professors = ProfessorAssignor::new();
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut towers = supply();
        let mut board = Board::new();

        board.move_mother_nature(5, &ctx, &mut towers);
        assert_eq!(board.mother_nature(), 5);
        board.move_mother_nature(9, &ctx, &mut towers);
        assert_eq!(board.mother_nature(), 2);
    }

    /// Test that a tied influence leaves an island unconquered.
    #[test]
    fn test_conquest_requires_strict_majority() {
        let mut professors = professors_for_p0(&[PawnColor::Red]);
        professors.reassign(PawnColor::Blue, &[(P0, 0), (P1, 1)], P1, ProfessorRule::Standard);
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut towers = supply();
        let mut board = Board::new();
        board.add_student(1, PawnColor::Red).unwrap();
        board.add_student(1, PawnColor::Blue).unwrap();

        let resolution = board.move_mother_nature(1, &ctx, &mut towers);
        assert_eq!(resolution.tower_change, None);

        board.add_student(1, PawnColor::Red).unwrap();
        let resolution = board.resolve_island(1, &ctx, &mut towers).unwrap();
        assert_eq!(
            resolution.tower_change,
            Some(TowerChange { island: 1, from: None, to: TowerColor::Black, placed: 1 })
        );
        assert_eq!(towers.remaining(TowerColor::Black), 7);
    }

    /// Test that towers on an island add to their team's influence.
    #[test]
    fn test_towers_count_as_influence() {
        let professors = professors_for_p0(&[PawnColor::Green]);
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut board = Board::new();
        board.add_student(3, PawnColor::Green).unwrap();
        board.islands[3].set_tower(TowerColor::Black);

        assert_eq!(board.influence(3, TowerColor::Black, &ctx), 2);
        board.set_influence_rule(InfluenceRule::IgnoreTowers);
        assert_eq!(board.influence(3, TowerColor::Black, &ctx), 1);
        board.set_influence_rule(InfluenceRule::IgnoreColor(PawnColor::Green));
        assert_eq!(board.influence(3, TowerColor::Black, &ctx), 1);
        board.set_influence_rule(InfluenceRule::ExtraInfluence { team: TowerColor::White, bonus: 2 });
        assert_eq!(board.influence(3, TowerColor::White, &ctx), 2);
        board.reset_strategy();
        assert_eq!(board.influence_rule(), InfluenceRule::Standard);
    }

    /// Test that a conquest swaps towers and returns the old ones.
    #[test]
    fn test_conquest_replaces_and_returns_towers() {
        let professors = professors_for_p0(&[PawnColor::Pink]);
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut towers = supply();
        towers.take(TowerColor::White, 1);
        let mut board = Board::new();
        board.islands[4].set_tower(TowerColor::White);
        board.add_student(4, PawnColor::Pink).unwrap();
        board.add_student(4, PawnColor::Pink).unwrap();

        let resolution = board.resolve_island(4, &ctx, &mut towers).unwrap();

        assert_eq!(resolution.tower_change.unwrap().from, Some(TowerColor::White));
        assert_eq!(towers.remaining(TowerColor::White), 8);
        assert_eq!(towers.remaining(TowerColor::Black), 7);
    }

    /// Test that a ban tile cancels one island resolution.
    #[test]
    fn test_ban_tile_cancels_resolution() {
        let professors = professors_for_p0(&[PawnColor::Red]);
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut towers = supply();
        let mut board = Board::new();
        board.add_student(2, PawnColor::Red).unwrap();
        board.place_ban_tile(2).unwrap();

        let resolution = board.move_mother_nature(2, &ctx, &mut towers);

        assert!(resolution.banned);
        assert_eq!(board.island(2).unwrap().tower(), None);
        assert_eq!(board.island(2).unwrap().ban_tiles(), 0);
    }

    /// Test that an island merges with same-tower neighbors on both sides.
    #[test]
    fn test_three_way_merge() {
        let professors = professors_for_p0(&[PawnColor::Yellow]);
        let ctx = InfluenceContext { professors: &professors, seats: &SEATS };
        let mut towers = supply();
        let mut board = Board::new();
        board.islands[4].set_tower(TowerColor::Black);
        board.islands[6].set_tower(TowerColor::Black);
        board.add_student(5, PawnColor::Yellow).unwrap();

        let resolution = board.move_mother_nature(5, &ctx, &mut towers);

        let merge = resolution.merge.unwrap();
        assert_eq!(merge.dimension, 3);
        assert_eq!(merge.absorbed, 2);
        assert_eq!(board.len(), 10);
        assert_eq!(board.mother_nature(), merge.island);
        assert_eq!(board.island(merge.island).unwrap().tower(), Some(TowerColor::Black));
        assert_eq!(board.towers_of(TowerColor::Black), 3);
    }

    /// Test that islands merge across the end of the ring.
    #[test]
    fn test_merge_across_ring_boundary() {
        let mut board = Board::new();
        board.islands[0].set_tower(TowerColor::White);
        board.islands[11].set_tower(TowerColor::White);
        board.mother_nature = 11;

        let merge = board.merge_islands(11).unwrap();

        assert_eq!(board.len(), 11);
        assert_eq!(merge.island, 10);
        assert_eq!(board.mother_nature(), 10);
        assert_eq!(board.island(10).unwrap().dimension(), 2);
    }

    /// Test that resolving a merged island again merges nothing.
    #[test]
    fn test_merge_is_idempotent() {
        let mut board = Board::new();
        board.islands[7].set_tower(TowerColor::Black);
        board.islands[8].set_tower(TowerColor::Black);

        let first = board.merge_islands(7).unwrap();
        let snapshot = board.clone();

        assert_eq!(board.merge_islands(first.island), None);
        assert_eq!(board, snapshot);
    }

    /// Test that mother nature keeps her island when indices shift after a merge.
    #[test]
    fn test_mother_nature_follows_merged_island() {
        let mut board = Board::new();
        board.islands[2].set_tower(TowerColor::Black);
        board.islands[3].set_tower(TowerColor::Black);
        board.mother_nature = 9;

        board.merge_islands(3);

        assert_eq!(board.mother_nature(), 8);
        assert!(board.mother_nature() < board.len());
    }
}

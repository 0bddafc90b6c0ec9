//! The match orchestrator.
//!
//! `Game` owns every component of a match and is the only type that decides
//! whether a player request succeeds. Each operation validates against the
//! current state first and commits only when every check passed, so a
//! rejected request leaves the match untouched and emits no event.
//!
//! ## Lifecycle
//!
//! ```text
//! Setup ──start_game──▶ InProgress ──(end condition)──▶ Ended
//! ```
//!
//! Players join during `Setup`. Once `InProgress`, the session layer drives
//! rounds: each player plays an assistant, then in [`Game::turn_order`]
//! moves students, moves mother nature and picks a cloud. `new_round` closes
//! the round. Every mutation is rejected once the match has `Ended`.
//!
//! ```
//! use eriantys_core::board::TowerColor;
//! use eriantys_core::core::MatchConfig;
//! use eriantys_core::game::{Game, GameState};
//! use eriantys_core::roster::Wizard;
//!
//! let mut game = Game::new(MatchConfig::default()).unwrap();
//! game.add_player("Ada", Wizard::Druid, TowerColor::Black).unwrap();
//! game.add_player("Bo", Wizard::Sage, TowerColor::White).unwrap();
//! game.start_game().unwrap();
//!
//! assert_eq!(game.state(), GameState::InProgress);
//! assert_eq!(game.board_view().islands.len(), 12);
//! ```

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::action::{Action, ActionRecord};
use super::event::{GameEvent, StudentDestination};
use super::result::{self, MatchResult, Standing};
use super::view::{BoardView, CharacterView, CloudView, SchoolView};
use crate::board::{Board, InfluenceContext, Resolution, TowerColor, TowerSupply};
use crate::cards::{Assistant, CharacterCard, CharacterKind, CharactersDeck};
use crate::core::config::{CHARACTERS_IN_USE, MIN_ISLANDS};
use crate::core::{
    GameError, GameLimit, GameResult, GameRng, MatchConfig, PawnColor, Pawns, PlayerId,
};
use crate::roster::{Player, Wizard};
use crate::school::{HallManager, HallOutcome};
use crate::supply::{Bank, CloudFill, CloudManager, Sack, SackView};

/// Lifecycle state of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Setup,
    InProgress,
    Ended,
}

/// Per-turn bookkeeping, cleared whenever the turn changes.
#[derive(Clone, Debug, Default)]
pub(super) struct TurnState {
    /// Students moved by each player this turn.
    pub(super) moves: FxHashMap<PlayerId, u8>,
    pub(super) character_used: bool,
    /// Character paid for but not yet resolved: (player, card index).
    pub(super) pending: Option<(PlayerId, usize)>,
    pub(super) extra_steps: u8,
    pub(super) mother_nature_moved: bool,
}

/// A single match.
#[derive(Clone, Debug)]
pub struct Game {
    pub(super) config: MatchConfig,
    pub(super) limit: GameLimit,
    pub(super) state: GameState,
    pub(super) players: Vec<Player>,
    pub(super) board: Board,
    pub(super) sack: Sack,
    pub(super) clouds: CloudManager,
    pub(super) bank: Bank,
    pub(super) hall: HallManager,
    pub(super) towers: TowerSupply,
    pub(super) characters: Vec<CharacterCard>,
    pub(super) current: Option<PlayerId>,
    pub(super) turn: TurnState,
    pub(super) round: u32,
    /// Assistants played this round, in play order.
    pub(super) played: Vec<(PlayerId, Assistant)>,
    pub(super) last_round: bool,
    pub(super) result: Option<MatchResult>,
    pub(super) events: Vec<GameEvent>,
    pub(super) history: Vector<ActionRecord>,
    next_seat: u8,
}

impl Game {
    /// Create an empty match in `Setup`.
    ///
    /// In expert mode the characters are drawn here, from the `"characters"`
    /// stream of the match RNG.
    pub fn new(config: MatchConfig) -> GameResult<Self> {
        config.validate()?;
        let limit = GameLimit::for_players(config.player_count)?;
        let rng = GameRng::new(config.seed);

        let (hall, characters) = if config.expert_mode {
            let mut stream = rng.for_context("characters");
            (
                HallManager::with_coin_rewards(),
                CharactersDeck::draw(&mut stream, CHARACTERS_IN_USE),
            )
        } else {
            (HallManager::new(), Vec::new())
        };

        debug!(
            players = config.player_count,
            expert = config.expert_mode,
            seed = config.seed,
            "match created"
        );

        Ok(Self {
            limit,
            state: GameState::Setup,
            players: Vec::with_capacity(config.player_count),
            board: Board::new(),
            sack: Sack::new(rng.for_context("sack")),
            clouds: CloudManager::new(limit.cloud_count, limit.students_on_cloud),
            bank: Bank::new(),
            hall,
            towers: TowerSupply::default(),
            characters,
            current: None,
            turn: TurnState::default(),
            round: 0,
            played: Vec::new(),
            last_round: false,
            result: None,
            events: Vec::new(),
            history: Vector::new(),
            next_seat: 0,
            config,
        })
    }

    /// Create an expert match with a fixed character table instead of a
    /// random draw.
    ///
    /// Fails with `DuplicateSelection` if a kind is listed twice; a table
    /// of the wrong size is only rejected by [`Game::start_game`].
    pub fn with_characters(config: MatchConfig, kinds: &[CharacterKind]) -> GameResult<Self> {
        if !config.expert_mode {
            return Err(GameError::InvalidState("characters are only used in expert mode"));
        }
        for (i, kind) in kinds.iter().enumerate() {
            if kinds[..i].contains(kind) {
                return Err(GameError::DuplicateSelection("character listed twice"));
            }
        }
        let mut game = Self::new(config)?;
        game.characters = kinds.iter().copied().map(CharacterCard::new).collect();
        Ok(game)
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Seat a new player and endow them with their starting coin.
    pub fn add_player(
        &mut self,
        name: &str,
        wizard: Wizard,
        tower: TowerColor,
    ) -> GameResult<PlayerId> {
        if self.state != GameState::Setup {
            return Err(GameError::InvalidState("players can only join before the start"));
        }
        if self.players.len() >= self.config.player_count {
            return Err(GameError::CapacityExceeded("match is full"));
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(GameError::DuplicateSelection("name already taken"));
        }
        if self.players.iter().any(|p| p.wizard() == wizard) {
            return Err(GameError::DuplicateSelection("wizard already chosen"));
        }
        self.check_tower_choice(tower)?;

        let id = PlayerId::new(self.next_seat);
        self.bank.register(id)?;
        self.next_seat += 1;
        self.hall.register(id);
        self.players
            .push(Player::new(id, name, wizard, tower, self.limit.max_entrance));

        info!(player = %id, name, %wizard, %tower, "player joined");
        self.events.push(GameEvent::PlayerAdded {
            player: id,
            name: name.to_owned(),
            wizard,
            tower,
        });
        self.push_coin_event(id);
        Ok(id)
    }

    /// Tower colors in play and how many players may share each.
    fn check_tower_choice(&self, tower: TowerColor) -> GameResult<()> {
        let palette: &[TowerColor] = if self.config.player_count == 3 {
            &[TowerColor::Black, TowerColor::White, TowerColor::Grey]
        } else {
            &[TowerColor::Black, TowerColor::White]
        };
        let per_color = if self.config.player_count == 4 { 2 } else { 1 };
        if !palette.contains(&tower) {
            return Err(GameError::OutOfBounds("tower color not in play"));
        }
        if self.players.iter().filter(|p| p.tower() == tower).count() >= per_color {
            return Err(GameError::DuplicateSelection("tower color already chosen"));
        }
        Ok(())
    }

    /// Remove a player before the match starts, returning their coins.
    pub fn remove_player(&mut self, player: PlayerId) -> GameResult<()> {
        if self.state != GameState::Setup {
            return Err(GameError::InvalidState("players can only leave before the start"));
        }
        let index = self.player_index(player)?;
        self.players.remove(index);
        let returned = self.bank.unregister(player);
        self.hall.unregister(player);

        info!(%player, returned, "player left");
        self.events.push(GameEvent::PlayerRemoved { player });
        Ok(())
    }

    /// Set up the table and enter `InProgress`.
    pub fn start_game(&mut self) -> GameResult<()> {
        if self.state != GameState::Setup {
            return Err(GameError::InvalidState("match already started"));
        }
        if self.players.len() != self.config.player_count {
            return Err(GameError::InvalidState("waiting for players"));
        }
        if self.config.expert_mode && self.characters.len() != CHARACTERS_IN_USE {
            return Err(GameError::InvalidState("characters were not drawn"));
        }

        self.sack.initial_fill();
        self.board.init_islands(&mut self.sack);
        self.sack.fill();

        let entrance = self.limit.max_entrance as usize;
        for player in &mut self.players {
            let students = self.sack.extract(entrance);
            player.initial_entrance_fill(&students)?;
        }

        let teams: Vec<TowerColor> = TowerColor::all()
            .filter(|&t| self.players.iter().any(|p| p.tower() == t))
            .collect();
        self.towers = TowerSupply::new(teams, self.limit.towers_per_team);

        for card in &mut self.characters {
            card.stock(&mut self.sack);
        }

        let first = self.players[0].id();
        self.state = GameState::InProgress;
        self.round = 1;
        self.current = Some(first);

        info!(%first, sack = self.sack.remaining(), "match started");
        self.events.push(GameEvent::GameStarted { first });
        self.events.push(GameEvent::RoundStarted { round: 1 });
        Ok(())
    }

    // ========================================================================
    // Turn order
    // ========================================================================

    /// Advance to the next registered player, wrapping around.
    pub fn next_player(&mut self) -> GameResult<PlayerId> {
        self.ensure_in_progress()?;
        let seat = self
            .current
            .and_then(|c| self.players.iter().position(|p| p.id() == c))
            .map_or(0, |i| (i + 1) % self.players.len());
        let next = self.players[seat].id();
        self.begin_turn(next);
        Ok(next)
    }

    /// Hand the turn to a specific player.
    pub fn set_current_player(&mut self, player: PlayerId) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.player_index(player)?;
        self.begin_turn(player);
        Ok(())
    }

    fn begin_turn(&mut self, player: PlayerId) {
        if let Some((owner, index)) = self.turn.pending {
            warn!(%owner, index, "unresolved character dropped at end of turn");
        }
        self.current = Some(player);
        self.turn = TurnState::default();
        self.reset_strategies();
        debug!(%player, "turn changed");
        self.events.push(GameEvent::TurnChanged { player });
    }

    /// Players sorted by the priority of the assistant they played this
    /// round. Players who have not played yet come last; ties keep seat order.
    #[must_use]
    pub fn turn_order(&self) -> Vec<PlayerId> {
        let mut order: Vec<(u8, usize, PlayerId)> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| {
                let priority = self
                    .played
                    .iter()
                    .find(|(who, _)| *who == p.id())
                    .map_or(u8::MAX, |(_, a)| a.priority());
                (priority, seat, p.id())
            })
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, _, id)| id).collect()
    }

    // ========================================================================
    // Planning phase
    // ========================================================================

    /// Play an assistant for this round.
    ///
    /// An assistant already played by someone else this round is only
    /// allowed when every card left in the hand was played this round.
    pub fn play_assistant(&mut self, player: PlayerId, assistant: Assistant) -> GameResult<()> {
        self.ensure_in_progress()?;
        let index = self.player_index(player)?;
        if self.played.iter().any(|(who, _)| *who == player) {
            return Err(GameError::InvalidState("assistant already played this round"));
        }

        let hand = self.players[index].hand();
        if !hand.contains(&assistant) {
            return Err(GameError::OutOfBounds("assistant not in hand"));
        }
        let taken = |card: Assistant| self.played.iter().any(|&(_, a)| a == card);
        if taken(assistant) && !hand.iter().all(|&card| taken(card)) {
            return Err(GameError::DuplicateSelection("assistant already played this round"));
        }

        self.players[index].play_assistant(assistant)?;
        self.played.push((player, assistant));
        debug!(%player, %assistant, "assistant played");
        self.events.push(GameEvent::AssistantPlayed { player, assistant });

        if self.players[index].hand().is_empty() {
            self.schedule_last_round("hand emptied");
        }
        Ok(())
    }

    // ========================================================================
    // Action phase
    // ========================================================================

    fn check_student_moves(&self, player: PlayerId) -> GameResult<()> {
        let moved = self.turn.moves.get(&player).copied().unwrap_or(0);
        if moved >= self.limit.students_per_turn {
            return Err(GameError::CapacityExceeded("no student moves left this turn"));
        }
        Ok(())
    }

    /// Move a student from the entrance to the hall.
    pub fn move_student_to_hall(&mut self, player: PlayerId, color: PawnColor) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.player_index(player)?;
        self.check_student_moves(player)?;

        let outcome =
            self.hall
                .move_from_entrance(&mut self.players, player, color, &mut self.bank)?;

        *self.turn.moves.entry(player).or_default() += 1;
        self.events.push(GameEvent::StudentMoved {
            player,
            color,
            to: StudentDestination::Hall,
        });
        self.record_hall_outcome(player, outcome);
        Ok(())
    }

    /// Move a student from the entrance onto an island.
    pub fn move_student_to_island(
        &mut self,
        player: PlayerId,
        color: PawnColor,
        island: usize,
    ) -> GameResult<()> {
        self.ensure_in_progress()?;
        let index = self.player_index(player)?;
        self.check_student_moves(player)?;

        let target = self.board.island_mut(island)?;
        let students = Pawns::from_pairs(&[(color, 1)]);
        self.players[index].move_from_entrance_to_island(&students, target)?;

        *self.turn.moves.entry(player).or_default() += 1;
        self.events.push(GameEvent::StudentMoved {
            player,
            color,
            to: StudentDestination::Island(island),
        });
        Ok(())
    }

    /// Move mother nature and resolve the island she lands on.
    ///
    /// `steps` must be between 1 and the movement of the assistant the player
    /// played this round (plus any extra steps granted this turn). Mother
    /// nature moves once per turn.
    pub fn move_mother_nature(&mut self, player: PlayerId, steps: u8) -> GameResult<Resolution> {
        self.ensure_in_progress()?;
        self.player_index(player)?;
        if self.turn.mother_nature_moved {
            return Err(GameError::InvalidState("mother nature already moved this turn"));
        }
        let assistant = self
            .played
            .iter()
            .find(|(who, _)| *who == player)
            .map(|&(_, assistant)| assistant)
            .ok_or(GameError::InvalidState("no assistant played"))?;
        let max = assistant.movement() + self.turn.extra_steps;
        if steps == 0 || steps > max {
            return Err(GameError::OutOfBounds("mother nature steps"));
        }

        let seats = self.seats();
        let ctx = InfluenceContext {
            professors: self.hall.professors(),
            seats: &seats,
        };
        let resolution = self
            .board
            .move_mother_nature(steps as usize, &ctx, &mut self.towers);

        self.turn.mother_nature_moved = true;
        let island = self.board.mother_nature();
        debug!(%player, steps, island, "mother nature moved");
        self.events.push(GameEvent::MotherNatureMoved { island, steps });
        self.after_resolution(resolution);
        Ok(resolution)
    }

    /// Move the students of a cloud into the player's entrance.
    pub fn pick_from_cloud(&mut self, player: PlayerId, cloud: usize) -> GameResult<()> {
        self.ensure_in_progress()?;
        let index = self.player_index(player)?;
        let offered = *self
            .clouds
            .get(cloud)
            .ok_or(GameError::OutOfBounds("cloud index"))?
            .students();
        if offered.is_empty() {
            return Err(GameError::InvalidState("cloud already taken this round"));
        }
        if self.players[index].school().entrance_room() < offered.total() {
            return Err(GameError::CapacityExceeded("entrance is full"));
        }

        let students = self.clouds.take(cloud)?;
        self.players[index].add_pawns_from_cloud(&students)?;

        debug!(%player, cloud, "cloud picked");
        self.events.push(GameEvent::CloudPicked {
            player,
            cloud,
            students,
        });
        Ok(())
    }

    /// Refill every empty cloud from the sack.
    ///
    /// A short sack is not an error: the shortfall is reported and the
    /// current round becomes the last one.
    pub fn fill_clouds(&mut self) -> GameResult<CloudFill> {
        self.ensure_in_progress()?;
        let fill = self.clouds.fill_clouds(&mut self.sack);
        self.events.push(GameEvent::CloudsFilled(fill));

        if !fill.is_complete() || self.sack.is_empty() {
            warn!(shortfall = fill.shortfall, "sack exhausted while filling clouds");
            self.schedule_last_round("sack exhausted");
        }
        Ok(fill)
    }

    /// Close the current round.
    ///
    /// Ends the match if this was the last round; otherwise clears the
    /// round's assistants, resets temporary rules and refills the clouds.
    pub fn new_round(&mut self) -> GameResult<()> {
        self.ensure_in_progress()?;
        if self.last_round {
            self.end_match("last round played");
            return Ok(());
        }

        self.round += 1;
        self.played.clear();
        self.turn = TurnState::default();
        self.reset_strategies();
        debug!(round = self.round, "round started");
        self.events.push(GameEvent::RoundStarted { round: self.round });
        self.fill_clouds()?;
        Ok(())
    }

    // ========================================================================
    // Characters
    // ========================================================================

    /// Pay for a character and leave it waiting to be resolved.
    ///
    /// Cost is the base cost plus one if a coin is on the card. The bank
    /// debit is all-or-nothing: a rejection leaves balance, pool and coin
    /// marker unchanged.
    pub fn use_character(&mut self, player: PlayerId, index: usize) -> GameResult<CharacterKind> {
        self.ensure_in_progress()?;
        if !self.config.expert_mode {
            return Err(GameError::InvalidState("characters are only used in expert mode"));
        }
        self.player_index(player)?;
        if self.turn.character_used {
            return Err(GameError::InvalidState("a character was already used this turn"));
        }
        let card = self
            .characters
            .get(index)
            .ok_or(GameError::OutOfBounds("character index"))?;
        let (kind, cost) = (card.kind(), card.cost());

        self.bank.pay(player, cost)?;
        self.characters[index].set_coin();
        self.turn.character_used = true;
        self.turn.pending = Some((player, index));

        info!(%player, %kind, cost, "character used");
        self.events.push(GameEvent::CharacterUsed { player, kind, cost });
        self.push_coin_event(player);
        Ok(kind)
    }

    /// Restore the standard influence and professor rules and drop extra
    /// mother-nature steps.
    pub fn reset_strategies(&mut self) {
        self.board.reset_strategy();
        self.hall.reset_strategy();
        self.turn.extra_steps = 0;
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Dispatch a player request and record it in the history on success.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> GameResult<()> {
        let outcome = match &action {
            Action::PlayAssistant(assistant) => self.play_assistant(player, *assistant),
            Action::MoveStudentToHall(color) => self.move_student_to_hall(player, *color),
            Action::MoveStudentToIsland { color, island } => {
                self.move_student_to_island(player, *color, *island)
            }
            Action::MoveMotherNature { steps } => {
                self.move_mother_nature(player, *steps).map(|_| ())
            }
            Action::PickFromCloud(cloud) => self.pick_from_cloud(player, *cloud),
            Action::UseCharacter(index) => self.use_character(player, *index).map(|_| ()),
            Action::ResolveCharacter(effect) => self.resolve_character(player, effect.clone()),
        };

        if let Err(err) = &outcome {
            debug!(%player, code = err.error_code(), %err, "action rejected");
            return outcome;
        }
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.round, sequence));
        Ok(())
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn limit(&self) -> &GameLimit {
        &self.limit
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Current round (0 before the start).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.last_round
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// First player (in seat order) using a tower color.
    #[must_use]
    pub fn player_by_tower_color(&self, tower: TowerColor) -> Option<&Player> {
        self.players.iter().find(|p| p.tower() == tower)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    #[must_use]
    pub fn towers(&self) -> &TowerSupply {
        &self.towers
    }

    #[must_use]
    pub fn characters(&self) -> &[CharacterCard] {
        &self.characters
    }

    /// Students left in the sack.
    #[must_use]
    pub fn sack_remaining(&self) -> usize {
        self.sack.remaining()
    }

    #[must_use]
    pub fn professor_holder(&self, color: PawnColor) -> Option<PlayerId> {
        self.hall.professors().holder(color)
    }

    /// The outcome, once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Every accepted action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn board_view(&self) -> BoardView {
        BoardView::new(&self.board, SackView::from(&self.sack))
    }

    #[must_use]
    pub fn school_views(&self) -> Vec<SchoolView> {
        self.players
            .iter()
            .map(|p| {
                SchoolView::new(
                    p,
                    self.hall.professors().controlled_by(p.id()).collect(),
                    self.towers.remaining(p.tower()),
                    self.bank.balance(p.id()),
                )
            })
            .collect()
    }

    #[must_use]
    pub fn cloud_views(&self) -> Vec<CloudView> {
        self.clouds
            .clouds()
            .iter()
            .enumerate()
            .map(|(index, cloud)| CloudView::new(index, cloud))
            .collect()
    }

    #[must_use]
    pub fn character_views(&self) -> Vec<CharacterView> {
        self.characters
            .iter()
            .enumerate()
            .map(|(index, card)| CharacterView::new(index, card))
            .collect()
    }

    // ========================================================================
    // Internals shared with character resolution
    // ========================================================================

    pub(super) fn ensure_in_progress(&self) -> GameResult<()> {
        match self.state {
            GameState::InProgress => Ok(()),
            GameState::Setup => Err(GameError::InvalidState("match has not started")),
            GameState::Ended => Err(GameError::InvalidState("match has ended")),
        }
    }

    pub(super) fn player_index(&self, player: PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|p| p.id() == player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    pub(super) fn seats(&self) -> Vec<(PlayerId, TowerColor)> {
        self.players.iter().map(|p| (p.id(), p.tower())).collect()
    }

    pub(super) fn push_coin_event(&mut self, player: PlayerId) {
        self.events.push(GameEvent::CoinChanged {
            player,
            balance: self.bank.balance(player),
            pool: self.bank.pool(),
        });
    }

    pub(super) fn record_hall_outcome(&mut self, player: PlayerId, outcome: HallOutcome) {
        if let Some(change) = outcome.professor {
            debug!(color = %change.color, to = ?change.to, "professor changed");
            self.events.push(GameEvent::ProfessorChanged(change));
        }
        if outcome.coin.is_some() {
            debug!(%player, "coin seat reached");
            self.push_coin_event(player);
        }
    }

    /// Emit the events of an island resolution and check for the end.
    pub(super) fn after_resolution(&mut self, resolution: Resolution) {
        if resolution.banned {
            if let Some(herbalist) = self
                .characters
                .iter_mut()
                .find(|c| c.kind() == CharacterKind::Herbalist)
            {
                herbalist.return_ban_tile();
            }
            debug!(island = resolution.island, "ban tile cancelled resolution");
            self.events.push(GameEvent::IslandBanned {
                island: resolution.island,
            });
            return;
        }
        if let Some(change) = resolution.tower_change {
            info!(island = change.island, to = %change.to, placed = change.placed, "island conquered");
            self.events.push(GameEvent::TowerChanged(change));
        }
        if let Some(merge) = resolution.merge {
            debug!(island = merge.island, dimension = merge.dimension, "islands merged");
            self.events.push(GameEvent::IslandsMerged(merge));
        }
        self.check_end_conditions();
    }

    fn check_end_conditions(&mut self) {
        if let Some(team) = self.towers.exhausted() {
            info!(%team, "last tower placed");
            self.end_match("last tower placed");
        } else if self.board.len() <= MIN_ISLANDS {
            self.end_match("island ring shrank");
        }
    }

    fn schedule_last_round(&mut self, reason: &'static str) {
        if self.last_round {
            return;
        }
        self.last_round = true;
        info!(reason, round = self.round, "last round scheduled");
        self.events.push(GameEvent::LastRound);
    }

    fn standings(&self) -> Vec<Standing> {
        self.towers
            .colors()
            .map(|team| {
                let members: Vec<PlayerId> = self
                    .players
                    .iter()
                    .filter(|p| p.tower() == team)
                    .map(Player::id)
                    .collect();
                let professors = members
                    .iter()
                    .map(|&m| self.hall.professors().controlled_by(m).count())
                    .sum();
                Standing {
                    team,
                    members,
                    towers_left: self.towers.remaining(team),
                    professors,
                }
            })
            .collect()
    }

    fn end_match(&mut self, reason: &'static str) {
        let outcome = result::decide(&self.standings());
        info!(reason, result = ?outcome, "match ended");
        self.state = GameState::Ended;
        self.result = Some(outcome.clone());
        self.events.push(GameEvent::GameEnded(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_players(expert: bool) -> (Game, PlayerId, PlayerId) {
        let config = MatchConfig::default().with_expert_mode(expert).with_seed(7);
        let mut game = Game::new(config).unwrap();
        let p0 = game.add_player("Ada", Wizard::Druid, TowerColor::Black).unwrap();
        let p1 = game.add_player("Bo", Wizard::Sage, TowerColor::White).unwrap();
        (game, p0, p1)
    }

    /// Test that a match rejects an unsupported player count.
    #[test]
    fn test_new_rejects_bad_player_count() {
        let config = MatchConfig::default().with_players(5);
        assert!(Game::new(config).is_err());
    }

    /// Test that grey towers are not in play for two players.
    #[test]
    fn test_grey_not_in_play_for_two() {
        let mut game = Game::new(MatchConfig::default()).unwrap();
        assert_eq!(
            game.add_player("Ada", Wizard::Druid, TowerColor::Grey),
            Err(GameError::OutOfBounds("tower color not in play"))
        );
    }

    /// Test that a match cannot start before the table is full.
    #[test]
    fn test_start_requires_full_table() {
        let mut game = Game::new(MatchConfig::default()).unwrap();
        game.add_player("Ada", Wizard::Druid, TowerColor::Black).unwrap();
        assert_eq!(
            game.start_game(),
            Err(GameError::InvalidState("waiting for players"))
        );
        assert_eq!(game.state(), GameState::Setup);
    }

    /// Test that turn order follows assistant priority.
    #[test]
    fn test_turn_order_by_priority() {
        let (mut game, p0, p1) = two_players(false);
        game.start_game().unwrap();
        game.play_assistant(p0, Assistant::Turtle).unwrap();
        game.play_assistant(p1, Assistant::Cat).unwrap();
        assert_eq!(game.turn_order(), vec![p1, p0]);
    }

    /// Test that a turn change resets the student move counter.
    #[test]
    fn test_turn_change_resets_moves() {
        let (mut game, p0, _) = two_players(false);
        game.start_game().unwrap();
        game.turn.moves.insert(p0, 3);
        assert!(game.check_student_moves(p0).is_err());

        game.set_current_player(p0).unwrap();
        assert!(game.check_student_moves(p0).is_ok());
    }

    /// Test that a short cloud fill schedules the last round.
    #[test]
    fn test_short_sack_schedules_last_round() {
        let (mut game, _, _) = two_players(false);
        game.start_game().unwrap();
        let left = game.sack.remaining();
        game.sack.extract(left - 4);

        let fill = game.fill_clouds().unwrap();

        assert_eq!(fill.placed, 4);
        assert_eq!(fill.shortfall, 2);
        assert!(game.is_last_round());
        game.new_round().unwrap();
        assert_eq!(game.state(), GameState::Ended);
        assert!(game.result().is_some());
    }

    /// Test that placing the last tower ends the match.
    #[test]
    fn test_last_tower_ends_match() {
        let (mut game, p0, _) = two_players(false);
        game.start_game().unwrap();
        game.towers.take(TowerColor::Black, 7);
        game.hall
            .add_to_hall(&mut game.players, p0, PawnColor::Red, &mut game.bank)
            .unwrap();
        game.board.add_student(1, PawnColor::Red).unwrap();
        game.play_assistant(p0, Assistant::Elephant).unwrap();

        game.move_mother_nature(p0, 1).unwrap();

        assert_eq!(game.state(), GameState::Ended);
        assert_eq!(game.result(), Some(&MatchResult::Winner(p0)));
        assert!(game.drain_events().iter().any(GameEvent::is_terminal));
        assert_eq!(
            game.play_assistant(p0, Assistant::Cat),
            Err(GameError::InvalidState("match has ended"))
        );
    }

    /// Test that shrinking to three islands ends the match.
    #[test]
    fn test_three_islands_end_match() {
        let (mut game, p0, _) = two_players(false);
        game.start_game().unwrap();
        for index in 2..=10 {
            game.board.island_mut(index).unwrap().set_tower(TowerColor::Black);
        }
        game.hall
            .add_to_hall(&mut game.players, p0, PawnColor::Blue, &mut game.bank)
            .unwrap();
        game.board.add_student(1, PawnColor::Blue).unwrap();
        game.board.add_student(1, PawnColor::Blue).unwrap();
        game.play_assistant(p0, Assistant::Elephant).unwrap();

        let resolution = game.move_mother_nature(p0, 1).unwrap();

        assert_eq!(resolution.merge.unwrap().dimension, 10);
        assert_eq!(game.board().len(), 3);
        assert_eq!(game.state(), GameState::Ended);
        assert_eq!(game.result(), Some(&MatchResult::Winner(p0)));
    }

    /// Test that a rejected action leaves no history or events.
    #[test]
    fn test_rejection_not_recorded() {
        let (mut game, p0, _) = two_players(false);
        game.start_game().unwrap();
        game.drain_events();

        assert!(game.apply(p0, Action::PickFromCloud(9)).is_err());
        assert!(game.history().is_empty());
        assert!(game.drain_events().is_empty());

        game.apply(p0, Action::PlayAssistant(Assistant::Fox)).unwrap();
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].round, 1);
    }

    /// Test that every use after the first costs exactly one coin over base.
    #[test]
    fn test_third_use_costs_base_plus_one() {
        let config = MatchConfig::default().with_expert_mode(true).with_seed(7);
        let table = [CharacterKind::Monk, CharacterKind::Knight, CharacterKind::Thief];
        let mut game = Game::with_characters(config, &table).unwrap();
        let p0 = game.add_player("Ada", Wizard::Druid, TowerColor::Black).unwrap();
        let p1 = game.add_player("Bo", Wizard::Sage, TowerColor::White).unwrap();
        game.start_game().unwrap();
        game.bank.add_coin(p0, 2).unwrap();
        game.bank.add_coin(p1, 2).unwrap();

        let mut costs = Vec::new();
        for player in [p0, p1, p0] {
            game.set_current_player(player).unwrap();
            game.drain_events();
            game.use_character(player, 0).unwrap();
            costs.extend(game.drain_events().into_iter().filter_map(|e| match e {
                GameEvent::CharacterUsed { cost, .. } => Some(cost),
                _ => None,
            }));
        }

        assert_eq!(costs, vec![1, 2, 2]);
        assert_eq!(game.characters()[0].cost(), 2);
        assert_eq!(game.bank().balance(p0), 0);
        assert_eq!(game.bank().balance(p1), 1);
    }
}

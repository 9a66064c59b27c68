// FILE: src/round.rs | version: 2026-10-18.rc3
// CHANGELOG:
// - RC3: A finished round is scored at most once (`recorded`); duplicate names rejected.
// - RC2: Rejections never advance the turn or touch the table/hands.
// - RC2: Win requires an empty hand AND exactly seven plays (kept as the house rule;
//        a short hand that empties early does not end the round).
// - RC1: Non-principal plays are checked against the deduced candidate set.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::deduction;
use crate::error::{MoveError, SetupError};
use crate::player::{Player, PlayerSetup, HAND_SIZE};
use crate::table::{Placed, Side, Table};
use crate::tile::{Tile, TILE_COUNT};
use crate::tileset::TileSet;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const WINNING_PLAYS: u32 = 7;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    AwaitingMove { player: usize },
    RoundOver { winner: usize },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Move {
    Play { tile: Tile, side: Option<Side> },
    Pass,
}

impl Move {
    pub fn play(tile: Tile) -> Move {
        Move::Play { tile, side: None }
    }

    pub fn play_on(tile: Tile, side: Side) -> Move {
        Move::Play { tile, side: Some(side) }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum MoveOutcome {
    Accepted,
    Rejected(MoveError),
    RoundOver { winner: usize },
}

#[derive(Clone, Debug)]
pub struct Round {
    players: Vec<Player>,
    principal: usize,
    table: Table,
    phase: Phase,
    consecutive_passes: usize,
    // round id under which a session scored this round
    recorded: Option<u32>,
}

impl Round {
    /// Validates the deal and opens the round with `starting` to move.
    pub fn start(setups: Vec<PlayerSetup>, principal: usize, starting: usize) -> Result<Self, SetupError> {
        let n = setups.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(SetupError::PlayerCount { got: n, min: MIN_PLAYERS, max: MAX_PLAYERS });
        }
        for index in [principal, starting] {
            if index >= n {
                return Err(SetupError::IndexOutOfRange { index, players: n });
            }
        }

        // session tallies are keyed by name
        for (i, s) in setups.iter().enumerate() {
            if setups[..i].iter().any(|o| o.name == s.name) {
                return Err(SetupError::DuplicateName { name: s.name.clone() });
            }
        }

        let principal_setup = &setups[principal];
        match &principal_setup.hand {
            None => {
                return Err(SetupError::PrincipalHandHidden { name: principal_setup.name.clone() });
            }
            Some(h) if h.len() != HAND_SIZE => {
                return Err(SetupError::HandSize {
                    name: principal_setup.name.clone(),
                    expected: HAND_SIZE,
                    got: h.len(),
                });
            }
            Some(_) => {}
        }

        let mut dealt = TileSet::empty();
        for s in setups.iter() {
            let Some(hand) = &s.hand else { continue };
            if hand.len() > HAND_SIZE {
                return Err(SetupError::HandTooLarge { name: s.name.clone(), max: HAND_SIZE, got: hand.len() });
            }
            for &t in hand.iter() {
                if !dealt.insert(t) {
                    return Err(SetupError::DuplicateTile { tile: t });
                }
            }
        }

        let players: Vec<Player> = setups.into_iter().map(Player::new).collect();
        info!(
            players = n,
            principal = players[principal].name(),
            starting = players[starting].name(),
            "round started"
        );

        Ok(Self {
            players,
            principal,
            table: Table::new(),
            phase: Phase::AwaitingMove { player: starting },
            consecutive_passes: 0,
            recorded: None,
        })
    }

    // -------------------------
    // Queries
    // -------------------------
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::RoundOver { .. })
    }

    #[inline]
    pub fn recorded_as(&self) -> Option<u32> {
        self.recorded
    }

    pub(crate) fn mark_recorded(&mut self, round_id: u32) {
        self.recorded = Some(round_id);
    }

    pub fn winner(&self) -> Option<usize> {
        match self.phase {
            Phase::RoundOver { winner } => Some(winner),
            Phase::AwaitingMove { .. } => None,
        }
    }

    pub fn current_player(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitingMove { player } => Some(player),
            Phase::RoundOver { .. } => None,
        }
    }

    #[inline]
    pub fn principal(&self) -> usize {
        self.principal
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    #[inline]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[inline]
    pub fn current_ends(&self) -> Option<(u8, u8)> {
        self.table.ends()
    }

    #[inline]
    pub fn placed_sequence(&self) -> &[Placed] {
        self.table.placed()
    }

    /// Passes since the last accepted play. The round never ends on this alone.
    #[inline]
    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    pub fn candidate_tiles(&self, idx: usize) -> TileSet {
        deduction::candidate_tiles(&self.players, idx, self.table.played())
    }

    /// Tiles neither on the table nor in any known hand.
    pub fn unseen_pool(&self) -> TileSet {
        TileSet::full()
            .difference(self.table.played())
            .difference(self.known_tiles())
    }

    fn known_tiles(&self) -> TileSet {
        self.players
            .iter()
            .filter_map(|p| p.known_tiles())
            .flatten()
            .collect()
    }

    /// Tile conservation: nothing both placed and held, no tile held twice,
    /// and never more than 28 tiles accounted for.
    pub fn conservation_holds(&self) -> bool {
        let placed = self.table.played();
        if placed.len() != self.table.len() {
            return false;
        }
        let mut held = TileSet::empty();
        let mut known_count = 0usize;
        let mut hidden_left = 0usize;
        for p in self.players.iter() {
            match p.known_tiles() {
                Some(tiles) => {
                    for &t in tiles {
                        if !held.insert(t) || placed.contains(t) {
                            return false;
                        }
                        known_count += 1;
                    }
                }
                None => hidden_left += p.tiles_left(),
            }
        }
        placed.len() + known_count + hidden_left <= TILE_COUNT
    }

    // -------------------------
    // Moves
    // -------------------------
    /// Applies a move for `idx`. Rejections leave the round exactly as it was.
    pub fn attempt_move(&mut self, idx: usize, mv: Move) -> MoveOutcome {
        match self.try_move(idx, mv) {
            Ok(outcome) => {
                debug_assert!(self.conservation_holds(), "tile conservation violated");
                outcome
            }
            Err(e) => {
                trace!(player = idx, error = %e, "move rejected");
                MoveOutcome::Rejected(e)
            }
        }
    }

    fn try_move(&mut self, idx: usize, mv: Move) -> Result<MoveOutcome, MoveError> {
        let expected = match self.phase {
            Phase::RoundOver { .. } => return Err(MoveError::RoundAlreadyOver),
            Phase::AwaitingMove { player } => player,
        };
        if idx != expected {
            return Err(MoveError::NotYourTurn { expected, got: idx });
        }

        match mv {
            Move::Pass => {
                self.pass(idx);
                Ok(MoveOutcome::Accepted)
            }
            Move::Play { tile, side } => self.play(idx, tile, side),
        }
    }

    fn play(&mut self, idx: usize, tile: Tile, side: Option<Side>) -> Result<MoveOutcome, MoveError> {
        let player = &self.players[idx];
        if !player.holds(tile) {
            return Err(MoveError::TileNotOwned { player: player.name().to_string(), tile });
        }
        if idx != self.principal && !self.candidate_tiles(idx).contains(tile) {
            return Err(MoveError::TileNotCandidate { player: player.name().to_string(), tile });
        }

        let (left, right) = self.table.place(tile, side)?;

        self.players[idx].record_play(tile);
        deduction::apply_play(&mut self.players, idx, tile);
        self.consecutive_passes = 0;

        let player = &self.players[idx];
        debug!(
            player = player.name(),
            tile = %tile,
            left,
            right,
            plays = player.play_count(),
            "tile played"
        );

        if player.hand_is_empty() && player.play_count() == WINNING_PLAYS {
            info!(winner = player.name(), "round over");
            self.phase = Phase::RoundOver { winner: idx };
            return Ok(MoveOutcome::RoundOver { winner: idx });
        }

        self.advance(idx);
        Ok(MoveOutcome::Accepted)
    }

    fn pass(&mut self, idx: usize) {
        let ends = self.table.ends();
        let player = &mut self.players[idx];
        player.record_pass(ends);
        let ruled_out = deduction::apply_pass(player, ends);
        self.consecutive_passes += 1;
        debug!(player = player.name(), ?ends, ruled_out, "player passed");
        self.advance(idx);
    }

    fn advance(&mut self, idx: usize) {
        self.phase = Phase::AwaitingMove { player: (idx + 1) % self.players.len() };
    }
}

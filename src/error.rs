// FILE: src/error.rs | version: 2026-10-18.rc1
//
// Every rule error is recoverable: the caller re-prompts the same player and
// nothing in the round has changed.

use thiserror::Error;

use crate::tile::Tile;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("invalid tile spec: {0:?} (expected x/y with pips 0..=6)")]
    InvalidTileSpec(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{tile} matches neither open end ({left}, {right})")]
    NoMatchingEnd { tile: Tile, left: u8, right: u8 },
    #[error("{tile} matches both open ends; choose left or right")]
    AmbiguousSide { tile: Tile },
    #[error("{tile} is already on the table")]
    AlreadyPlaced { tile: Tile },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{player} does not hold {tile}")]
    TileNotOwned { player: String, tile: Tile },
    #[error("{tile} is not among the possible tiles for {player}")]
    TileNotCandidate { player: String, tile: Tile },
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("not player {got}'s turn (waiting on player {expected})")]
    NotYourTurn { expected: usize, got: usize },
    #[error("round is already over")]
    RoundAlreadyOver,
}

impl MoveError {
    /// True when re-submitting the same tile with an explicit side would help.
    pub fn needs_side(&self) -> bool {
        matches!(self, MoveError::Placement(PlacementError::AmbiguousSide { .. }))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("player count must be between {min} and {max} (got {got})")]
    PlayerCount { got: usize, min: usize, max: usize },
    #[error("player index {index} out of range for {players} players")]
    IndexOutOfRange { index: usize, players: usize },
    #[error("principal player {name} must have a known hand")]
    PrincipalHandHidden { name: String },
    #[error("{name} must start with exactly {expected} tiles (got {got})")]
    HandSize { name: String, expected: usize, got: usize },
    #[error("{name} can hold at most {max} tiles (got {got})")]
    HandTooLarge { name: String, max: usize, got: usize },
    #[error("more than one player is named {name:?}")]
    DuplicateName { name: String },
    #[error("{tile} dealt more than once")]
    DuplicateTile { tile: Tile },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("round has not finished yet")]
    RoundNotOver,
    #[error("round #{round_id} was already recorded")]
    AlreadyRecorded { round_id: u32 },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger io ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// FILE: src/lib.rs | version: 2026-10-18.rc2
//
// Dominoes table tracker for up to four players.
//
// Key points:
// - Pure engine: tiles, table ends, turn rotation, pass deduction, rabbit/cat scoring.
// - No console or file access in the engine; `ledger` is the only writer and the
//   binary decides when to call it.
// - One Session object per process, owned by the caller.

pub mod config;
pub mod deduction;
pub mod error;
pub mod ledger;
pub mod player;
pub mod round;
pub mod session;
pub mod simulate;
pub mod table;
pub mod tile;
pub mod tileset;

pub use error::{ConfigError, LedgerError, MoveError, PlacementError, SessionError, SetupError, TileError};
pub use player::{HistoryEntry, Player, PlayerSetup, PlayerSnapshot, HAND_SIZE};
pub use round::{Move, MoveOutcome, Phase, Round};
pub use session::{GameRecord, RoundSummary, Session};
pub use table::{Placed, Side, Table};
pub use tile::Tile;
pub use tileset::TileSet;

pub fn version() -> &'static str {
    concat!("domino_tracker/", env!("CARGO_PKG_VERSION"))
}

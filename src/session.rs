// FILE: src/session.rs | version: 2026-10-18.rc1
//
// Cross-round scoring. All mutation happens in `record_result`, once per
// finished round:
// - winner +1 win; reaching RABBIT_WINS scores a rabbit and resets that tally;
// - a round where nobody played scores a cat;
// - a frozen GameRecord is appended.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SessionError, SetupError};
use crate::player::{PlayerSetup, PlayerSnapshot};
use crate::round::Round;

pub const RABBIT_WINS: u32 = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub round_id: u32,
    pub winner: String,
    pub participants: Vec<PlayerSnapshot>,
}

/// What a finished round did to the score state; also the ledger payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_id: u32,
    pub winner: String,
    pub rabbit: bool,
    pub cat: bool,
    pub scores: BTreeMap<String, u32>,
    pub rabbits: u32,
    pub cats: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    wins: BTreeMap<String, u32>,
    rabbits: u32,
    cats: u32,
    history: Vec<GameRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds unseen names with zero wins. Existing tallies are kept.
    pub fn register<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for n in names {
            self.wins.entry(n.to_string()).or_insert(0);
        }
    }

    /// Registers the players and opens a round for them.
    pub fn start_round(
        &mut self,
        setups: Vec<PlayerSetup>,
        principal: usize,
        starting: usize,
    ) -> Result<Round, SetupError> {
        let round = Round::start(setups, principal, starting)?;
        self.register(round.players().iter().map(|p| p.name()));
        Ok(round)
    }

    /// Scores a finished round. A round can be scored only once.
    pub fn finish_round(&mut self, round: &mut Round) -> Result<RoundSummary, SessionError> {
        let winner = round.winner().ok_or(SessionError::RoundNotOver)?;
        if let Some(round_id) = round.recorded_as() {
            return Err(SessionError::AlreadyRecorded { round_id });
        }
        let name = round.players()[winner].name().to_string();
        let participants = round.players().iter().map(|p| p.snapshot()).collect();
        let summary = self.record_result(name, participants);
        round.mark_recorded(summary.round_id);
        Ok(summary)
    }

    pub fn record_result(&mut self, winner: String, participants: Vec<PlayerSnapshot>) -> RoundSummary {
        let round_id = self.next_round_id();

        let tally = self.wins.entry(winner.clone()).or_insert(0);
        *tally += 1;
        let rabbit = *tally >= RABBIT_WINS;
        if rabbit {
            *tally = 0;
            self.rabbits += 1;
            info!(player = %winner, rabbits = self.rabbits, "rabbit");
        }

        let cat = participants.iter().all(|p| p.play_count == 0);
        if cat {
            self.cats += 1;
            info!(cats = self.cats, "cat: nobody played this round");
        }

        self.history.push(GameRecord { round_id, winner: winner.clone(), participants });
        info!(round_id, winner = %winner, "round recorded");

        RoundSummary {
            round_id,
            winner,
            rabbit,
            cat,
            scores: self.wins.clone(),
            rabbits: self.rabbits,
            cats: self.cats,
        }
    }

    /// Clears tallies, counters and history.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    #[inline]
    pub fn next_round_id(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    pub fn wins(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    #[inline]
    pub fn scores(&self) -> &BTreeMap<String, u32> {
        &self.wins
    }

    #[inline]
    pub fn rabbits(&self) -> u32 {
        self.rabbits
    }

    #[inline]
    pub fn cats(&self) -> u32 {
        self.cats
    }

    #[inline]
    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }
}

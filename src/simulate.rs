// FILE: src/simulate.rs | version: 2026-10-18.rc1
//
// Scripted self-play for demos and regression tests. Every hand is known and
// each player puts down the first tile (hand order) that fits, preferring the
// left end when both fit; otherwise passes.
// The driver stops on a win, or when a full rotation passes in a row (the
// engine itself has no blocked state).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::player::{PlayerSetup, HAND_SIZE};
use crate::round::{Move, MoveOutcome, Round, MAX_PLAYERS};
use crate::table::Side;
use crate::tile::{self, Tile};

/// The fixed four-hand deal: doubles, then three interleaved runs covering the rest.
pub const PREDEFINED_HANDS: [[(u8, u8); HAND_SIZE]; 4] = [
    [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6)],
    [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (0, 6)],
    [(0, 2), (1, 3), (2, 4), (3, 5), (4, 6), (0, 5), (1, 6)],
    [(0, 3), (1, 4), (2, 5), (3, 6), (0, 4), (1, 5), (2, 6)],
];

pub fn predefined_deal(names: &[String]) -> Vec<PlayerSetup> {
    PREDEFINED_HANDS
        .iter()
        .enumerate()
        .map(|(i, hand)| {
            let tiles = hand.iter().map(|&(a, b)| Tile::new(a, b)).collect();
            PlayerSetup::known(seat_name(names, i), tiles)
        })
        .collect()
}

/// Shuffles the full set with `seed` and deals seven to each of `players` seats.
pub fn random_deal(names: &[String], players: usize, seed: u64) -> Vec<PlayerSetup> {
    let players = players.clamp(1, MAX_PLAYERS);
    let mut tiles: Vec<Tile> = tile::full_set().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    tiles.shuffle(&mut rng);

    tiles
        .chunks(HAND_SIZE)
        .take(players)
        .enumerate()
        .map(|(i, hand)| PlayerSetup::known(seat_name(names, i), hand.to_vec()))
        .collect()
}

fn seat_name(names: &[String], i: usize) -> String {
    names
        .get(i)
        .cloned()
        .unwrap_or_else(|| crate::config::default_name(i))
}

/// First fitting tile in the player's known hand, or a pass.
pub fn first_legal_move(round: &Round, idx: usize) -> Move {
    let Some(hand) = round.player(idx).and_then(|p| p.known_tiles()) else {
        return Move::Pass;
    };
    let table = round.table();
    for &t in hand.iter() {
        if !table.can_place(t) {
            continue;
        }
        let side = if table.legal_sides(t).contains(&Side::Left) { Side::Left } else { Side::Right };
        return Move::play_on(t, side);
    }
    Move::Pass
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    pub winner: Option<usize>,
    pub turns: usize,
    pub blocked: bool,
}

pub fn run(round: &mut Round, max_turns: usize) -> SimulationReport {
    let seats = round.players().len();
    let mut turns = 0usize;

    while let Some(idx) = round.current_player() {
        if turns >= max_turns {
            break;
        }
        if round.consecutive_passes() >= seats {
            info!(turns, table = %round.table(), "simulation blocked");
            return SimulationReport { winner: None, turns, blocked: true };
        }

        let mv = first_legal_move(round, idx);
        turns += 1;
        match round.attempt_move(idx, mv) {
            MoveOutcome::Accepted => {}
            MoveOutcome::RoundOver { winner } => {
                info!(turns, winner = round.players()[winner].name(), "simulation finished");
                return SimulationReport { winner: Some(winner), turns, blocked: false };
            }
            MoveOutcome::Rejected(e) => {
                // the driver only offers legal tiles; fall back to passing
                debug!(player = idx, error = %e, "scripted move rejected, passing");
                if !pass_turn(round, idx) {
                    return SimulationReport { winner: round.winner(), turns, blocked: true };
                }
            }
        }
    }

    SimulationReport { winner: round.winner(), turns, blocked: false }
}

/// Passes for `idx`; false when the engine refused the pass.
fn pass_turn(round: &mut Round, idx: usize) -> bool {
    let outcome = round.attempt_move(idx, Move::Pass);
    debug_assert_eq!(outcome, MoveOutcome::Accepted, "fallback pass for player {idx}");
    if outcome != MoveOutcome::Accepted {
        warn!(player = idx, ?outcome, "fallback pass not accepted");
        return false;
    }
    true
}

// FILE: src/player.rs | version: 2026-10-18.rc1

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::Tile;
use crate::tileset::TileSet;

pub const HAND_SIZE: usize = 7;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
    Played { tile: Tile },
    /// Open ends at the moment of the pass (None on an empty table).
    Pass { left: Option<u8>, right: Option<u8> },
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEntry::Played { tile } => write!(f, "{tile}"),
            HistoryEntry::Pass { left: Some(l), right: Some(r) } => write!(f, "pass[{l}|{r}]"),
            HistoryEntry::Pass { .. } => f.write_str("pass"),
        }
    }
}

/// Hands are either supplied by the operator or only inferred.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Hand {
    Known(Vec<Tile>),
    Hidden,
}

#[derive(Clone, Debug)]
pub struct PlayerSetup {
    pub name: String,
    pub hand: Option<Vec<Tile>>,
}

impl PlayerSetup {
    pub fn known(name: impl Into<String>, hand: Vec<Tile>) -> Self {
        Self { name: name.into(), hand: Some(hand) }
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self { name: name.into(), hand: None }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    hand: Hand,
    history: Vec<HistoryEntry>,
    play_count: u32,
    impossible: TileSet,
}

impl Player {
    pub fn new(setup: PlayerSetup) -> Self {
        Self {
            name: setup.name,
            hand: match setup.hand {
                Some(tiles) => Hand::Known(tiles),
                None => Hand::Hidden,
            },
            history: Vec::new(),
            play_count: 0,
            impossible: TileSet::empty(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn known_tiles(&self) -> Option<&[Tile]> {
        match &self.hand {
            Hand::Known(v) => Some(v),
            Hand::Hidden => None,
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self.hand, Hand::Hidden)
    }

    /// A hidden hand is assumed to have been dealt the standard seven.
    pub fn tiles_left(&self) -> usize {
        match &self.hand {
            Hand::Known(v) => v.len(),
            Hand::Hidden => HAND_SIZE.saturating_sub(self.play_count as usize),
        }
    }

    #[inline]
    pub fn hand_is_empty(&self) -> bool {
        self.tiles_left() == 0
    }

    /// Hidden hands can only be checked through deduction, so they "hold" anything.
    pub fn holds(&self, t: Tile) -> bool {
        match &self.hand {
            Hand::Known(v) => v.contains(&t),
            Hand::Hidden => true,
        }
    }

    #[inline]
    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[inline]
    pub fn impossible(&self) -> TileSet {
        self.impossible
    }

    pub(crate) fn rule_out(&mut self, tiles: TileSet) {
        self.impossible = self.impossible.union(tiles);
    }

    pub(crate) fn record_play(&mut self, t: Tile) {
        if let Hand::Known(v) = &mut self.hand {
            if let Some(i) = v.iter().position(|x| *x == t) {
                v.remove(i);
            }
        }
        self.history.push(HistoryEntry::Played { tile: t });
        self.play_count += 1;
    }

    pub(crate) fn record_pass(&mut self, ends: Option<(u8, u8)>) {
        self.history.push(HistoryEntry::Pass {
            left: ends.map(|e| e.0),
            right: ends.map(|e| e.1),
        });
    }

    pub fn formatted_history(&self) -> String {
        if self.history.is_empty() {
            return "no plays yet".to_string();
        }
        self.history
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            play_count: self.play_count,
            tiles_left: self.tiles_left(),
            hand: self.known_tiles().map(|v| v.to_vec()),
            history: self.history.clone(),
        }
    }
}

/// Frozen view of a player kept in round records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub play_count: u32,
    pub tiles_left: usize,
    pub hand: Option<Vec<Tile>>,
    pub history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hand_shrinks_on_play() {
        let mut p = Player::new(PlayerSetup::known("Ana", vec![Tile::new(1, 2), Tile::new(3, 3)]));
        assert!(p.holds(Tile::new(2, 1)));
        p.record_play(Tile::new(1, 2));
        assert!(!p.holds(Tile::new(1, 2)));
        assert_eq!(p.tiles_left(), 1);
        assert_eq!(p.play_count(), 1);
    }

    #[test]
    fn hidden_hand_counts_down_from_seven() {
        let mut p = Player::new(PlayerSetup::hidden("Bo"));
        assert!(p.is_hidden());
        assert_eq!(p.tiles_left(), HAND_SIZE);
        for t in [Tile::new(0, 0), Tile::new(0, 1), Tile::new(0, 2)] {
            p.record_play(t);
        }
        assert_eq!(p.tiles_left(), 4);
        assert!(!p.hand_is_empty());
    }

    #[test]
    fn history_formatting() {
        let mut p = Player::new(PlayerSetup::hidden("Cy"));
        assert_eq!(p.formatted_history(), "no plays yet");
        p.record_pass(None);
        p.record_play(Tile::new(6, 2));
        p.record_pass(Some((6, 2)));
        assert_eq!(p.formatted_history(), "pass 2/6 pass[6|2]");
        // passes are not plays
        assert_eq!(p.play_count(), 1);
    }

    #[test]
    fn snapshot_serializes_history_variants() {
        let mut p = Player::new(PlayerSetup::known("Di", vec![Tile::new(4, 5)]));
        p.record_pass(Some((1, 2)));
        let j = serde_json::to_value(p.snapshot()).unwrap();
        assert_eq!(j["history"][0]["type"], "pass");
        assert_eq!(j["history"][0]["left"], 1);
        assert_eq!(j["hand"][0], "4/5");
    }
}

// FILE: src/tile.rs | version: 2026-10-18.rc2
// CHANGELOG:
// - RC2: Canonical ids are row-major by low pip then high pip (0/0, 0/1 .. 6/6).
// - RC2: Text form is "low/high"; parse stays boundary-only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TileError;

pub const MAX_PIP: u8 = 6;
pub const TILE_COUNT: usize = 28;

/// A domino tile. Stored as its canonical id (0..28), so (a,b) and (b,a) are
/// the same value and ordering follows `full_set()`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Tile(u8);

impl Tile {
    /// Canonicalizing constructor. Pips must already be in 0..=6.
    #[inline]
    pub fn new(a: u8, b: u8) -> Tile {
        debug_assert!(a <= MAX_PIP && b <= MAX_PIP, "pip out of range: {a}/{b}");
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Tile(pips_to_id(lo, hi))
    }

    pub fn from_pips(a: u8, b: u8) -> Result<Tile, TileError> {
        if a > MAX_PIP || b > MAX_PIP {
            return Err(TileError::InvalidTileSpec(format!("{a}/{b}")));
        }
        Ok(Tile::new(a, b))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn low(self) -> u8 {
        TILE_LO[self.0 as usize]
    }

    #[inline]
    pub fn high(self) -> u8 {
        TILE_HI[self.0 as usize]
    }

    #[inline]
    pub fn pips(self) -> (u8, u8) {
        (self.low(), self.high())
    }

    #[inline]
    pub fn has(self, pip: u8) -> bool {
        self.low() == pip || self.high() == pip
    }

    /// The pip left open when `pip` is the one touching the table.
    #[inline]
    pub fn other_pip(self, pip: u8) -> Option<u8> {
        let (lo, hi) = self.pips();
        if lo == pip {
            Some(hi)
        } else if hi == pip {
            Some(lo)
        } else {
            None
        }
    }

    /// Boundary-only parser (NOT for the engine).
    /// Accepts: "3/5", "5/3", "3-5", "35", "[3|5]" and normalizes low<=high.
    pub fn parse(s: &str) -> Result<Tile, TileError> {
        let bad = || TileError::InvalidTileSpec(s.trim().to_string());
        let t: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '[' | ']' | ' '))
            .map(|c| if matches!(c, '-' | '|' | ',') { '/' } else { c })
            .collect();

        if let Some((a, b)) = t.split_once('/') {
            let (a, b) = parse_pip(a).zip(parse_pip(b)).ok_or_else(bad)?;
            return Tile::from_pips(a, b).map_err(|_| bad());
        }

        let bytes = t.as_bytes();
        if bytes.len() == 2 && bytes.iter().all(|c| c.is_ascii_digit()) {
            return Tile::from_pips(bytes[0] - b'0', bytes[1] - b'0').map_err(|_| bad());
        }

        Err(bad())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.low(), self.high())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}/{})", self.low(), self.high())
    }
}

impl From<Tile> for String {
    fn from(t: Tile) -> String {
        t.to_string()
    }
}

impl TryFrom<String> for Tile {
    type Error = TileError;

    fn try_from(s: String) -> Result<Tile, TileError> {
        Tile::parse(&s)
    }
}

// digits only: `u8::from_str` would also take a leading '+'
fn parse_pip(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// All 28 tiles, row-major by low then high.
pub fn full_set() -> impl Iterator<Item = Tile> + Clone {
    (0..TILE_COUNT as u8).map(Tile)
}

#[inline]
fn pips_to_id(lo: u8, hi: u8) -> u8 {
    // rows shrink by one per low pip: 7, 6, 5, ...
    let lo = lo as u16;
    let start = lo * 7 - (lo * lo.saturating_sub(1)) / 2;
    (start + (hi as u16 - lo)) as u8
}

const TILE_LO: [u8; TILE_COUNT] = [
    0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2,
    3, 3, 3, 3,
    4, 4, 4,
    5, 5,
    6,
];

const TILE_HI: [u8; TILE_COUNT] = [
    0, 1, 2, 3, 4, 5, 6,
    1, 2, 3, 4, 5, 6,
    2, 3, 4, 5, 6,
    3, 4, 5, 6,
    4, 5, 6,
    5, 6,
    6,
];

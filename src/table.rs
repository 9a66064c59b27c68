// FILE: src/table.rs | version: 2026-10-18.rc2
// CHANGELOG:
// - RC2: A tile matching both ends requires an explicit side (AmbiguousSide); no left default.
// - RC2: Placed chain keeps orientation so Display reads left-to-right.

use std::fmt;

use crate::error::PlacementError;
use crate::tile::Tile;
use crate::tileset::TileSet;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Accepts "left"/"right" and their one-letter forms (also E/D).
    pub fn from_str(s: &str) -> Option<Side> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "e" => Some(Side::Left),
            "right" | "r" | "d" => Some(Side::Right),
            _ => None,
        }
    }
}

/// A tile as it lies on the table: `left` faces the chain's left end.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Placed {
    pub left: u8,
    pub right: u8,
}

impl fmt::Display for Placed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.left, self.right)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    chain: Vec<Placed>,
    played: TileSet,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------
    // Read-only accessors
    // -------------------------
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn played(&self) -> TileSet {
        self.played
    }

    #[inline]
    pub fn placed(&self) -> &[Placed] {
        &self.chain
    }

    #[inline]
    pub fn left_end(&self) -> Option<u8> {
        self.chain.first().map(|p| p.left)
    }

    #[inline]
    pub fn right_end(&self) -> Option<u8> {
        self.chain.last().map(|p| p.right)
    }

    /// Both open ends, or None on an empty table.
    #[inline]
    pub fn ends(&self) -> Option<(u8, u8)> {
        Some((self.left_end()?, self.right_end()?))
    }

    /// Sides where `t` could attach. Empty table accepts anything (reported as both).
    pub fn legal_sides(&self, t: Tile) -> Vec<Side> {
        let Some((l, r)) = self.ends() else {
            return vec![Side::Left, Side::Right];
        };
        let mut out = Vec::with_capacity(2);
        if t.has(l) {
            out.push(Side::Left);
        }
        if t.has(r) {
            out.push(Side::Right);
        }
        out
    }

    pub fn can_place(&self, t: Tile) -> bool {
        !self.played.contains(t) && !self.legal_sides(t).is_empty()
    }

    // -------------------------
    // Core placement
    // -------------------------
    /// Places `t`, returning the new (left, right) ends. On error the table is untouched.
    pub fn place(&mut self, t: Tile, side: Option<Side>) -> Result<(u8, u8), PlacementError> {
        if self.played.contains(t) {
            return Err(PlacementError::AlreadyPlaced { tile: t });
        }

        let Some((left, right)) = self.ends() else {
            let (lo, hi) = t.pips();
            self.push(Side::Right, Placed { left: lo, right: hi }, t);
            return Ok((lo, hi));
        };

        let fits_left = t.has(left);
        let fits_right = t.has(right);
        let chosen = match (fits_left, fits_right) {
            (false, false) => return Err(PlacementError::NoMatchingEnd { tile: t, left, right }),
            (true, false) => Side::Left,
            (false, true) => Side::Right,
            (true, true) => side.ok_or(PlacementError::AmbiguousSide { tile: t })?,
        };

        let placed = match chosen {
            Side::Left => {
                let outer = t
                    .other_pip(left)
                    .ok_or(PlacementError::NoMatchingEnd { tile: t, left, right })?;
                Placed { left: outer, right: left }
            }
            Side::Right => {
                let outer = t
                    .other_pip(right)
                    .ok_or(PlacementError::NoMatchingEnd { tile: t, left, right })?;
                Placed { left: right, right: outer }
            }
        };
        self.push(chosen, placed, t);

        Ok(match chosen {
            Side::Left => (placed.left, right),
            Side::Right => (left, placed.right),
        })
    }

    fn push(&mut self, side: Side, placed: Placed, t: Tile) {
        match side {
            Side::Left => self.chain.insert(0, placed),
            Side::Right => self.chain.push(placed),
        }
        self.played.insert(t);
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.chain.iter().enumerate() {
            if i > 0 {
                f.write_str(" - ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(a: u8, b: u8) -> Tile {
        Tile::new(a, b)
    }

    #[test]
    fn first_tile_sets_both_ends() {
        let mut tb = Table::new();
        assert_eq!(tb.ends(), None);
        assert_eq!(tb.place(t(5, 2), None), Ok((2, 5)));
        assert_eq!(tb.ends(), Some((2, 5)));

        let mut tb = Table::new();
        assert_eq!(tb.place(t(3, 3), Some(Side::Right)), Ok((3, 3)));
    }

    #[test]
    fn single_match_moves_that_end() {
        let mut tb = Table::new();
        tb.place(t(2, 5), None).unwrap();
        // 2 matches left only
        assert_eq!(tb.place(t(2, 4), None), Ok((4, 5)));
        // 5 matches right only; side hint is ignored when only one side fits
        assert_eq!(tb.place(t(5, 6), Some(Side::Left)), Ok((4, 6)));
        assert_eq!(tb.to_string(), "4/2 - 2/5 - 5/6");
        assert_eq!(tb.len(), 3);
    }

    #[test]
    fn both_ends_match_requires_side() {
        let mut tb = Table::new();
        tb.place(t(3, 3), None).unwrap();
        let before = tb.placed().to_vec();

        assert_eq!(tb.place(t(3, 5), None), Err(PlacementError::AmbiguousSide { tile: t(3, 5) }));
        assert_eq!(tb.placed(), &before[..]);

        assert_eq!(tb.place(t(3, 5), Some(Side::Left)), Ok((5, 3)));
        assert_eq!(tb.to_string(), "5/3 - 3/3");
    }

    #[test]
    fn right_choice_on_ambiguous() {
        let mut tb = Table::new();
        tb.place(t(3, 3), None).unwrap();
        assert_eq!(tb.place(t(3, 5), Some(Side::Right)), Ok((3, 5)));
        assert_eq!(tb.to_string(), "3/3 - 3/5");
    }

    #[test]
    fn no_match_is_rejected_without_change() {
        let mut tb = Table::new();
        tb.place(t(1, 2), None).unwrap();
        let err = tb.place(t(4, 5), Some(Side::Left)).unwrap_err();
        assert_eq!(err, PlacementError::NoMatchingEnd { tile: t(4, 5), left: 1, right: 2 });
        // idempotent rejection
        assert_eq!(tb.place(t(4, 5), None).unwrap_err(), err);
        assert_eq!(tb.ends(), Some((1, 2)));
        assert_eq!(tb.len(), 1);
        assert!(!tb.played().contains(t(4, 5)));
    }

    #[test]
    fn same_tile_cannot_be_placed_twice() {
        let mut tb = Table::new();
        tb.place(t(1, 1), None).unwrap();
        assert_eq!(tb.place(t(1, 1), None), Err(PlacementError::AlreadyPlaced { tile: t(1, 1) }));
    }

    #[test]
    fn legal_sides_reports_each_end() {
        let mut tb = Table::new();
        assert_eq!(tb.legal_sides(t(0, 0)).len(), 2);
        tb.place(t(1, 4), None).unwrap();
        assert_eq!(tb.legal_sides(t(1, 6)), vec![Side::Left]);
        assert_eq!(tb.legal_sides(t(4, 6)), vec![Side::Right]);
        assert_eq!(tb.legal_sides(t(1, 4)), vec![Side::Left, Side::Right]);
        assert!(tb.legal_sides(t(0, 6)).is_empty());
        assert!(!tb.can_place(t(1, 4)));
    }

    #[test]
    fn side_parsing() {
        assert_eq!(Side::from_str("L"), Some(Side::Left));
        assert_eq!(Side::from_str(" right "), Some(Side::Right));
        assert_eq!(Side::from_str("e"), Some(Side::Left));
        assert_eq!(Side::from_str("d"), Some(Side::Right));
        assert_eq!(Side::from_str("x"), None);
    }
}

// FILE: src/tileset.rs | version: 2026-10-18.rc1
//
// 28-bit tile masks. Iteration is always in canonical id order, so every
// candidate/pool listing is deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::{self, Tile, TILE_COUNT};

const FULL_MASK: u32 = (1u32 << TILE_COUNT) - 1;

#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Tile>", from = "Vec<Tile>")]
pub struct TileSet(u32);

impl TileSet {
    #[inline]
    pub const fn empty() -> Self {
        TileSet(0)
    }

    #[inline]
    pub const fn full() -> Self {
        TileSet(FULL_MASK)
    }

    #[inline]
    pub fn contains(self, t: Tile) -> bool {
        (self.0 & bit(t)) != 0
    }

    /// Returns true when the tile was not present before.
    #[inline]
    pub fn insert(&mut self, t: Tile) -> bool {
        let fresh = !self.contains(t);
        self.0 |= bit(t);
        fresh
    }

    #[inline]
    pub fn remove(&mut self, t: Tile) -> bool {
        let had = self.contains(t);
        self.0 &= !bit(t);
        had
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: TileSet) -> TileSet {
        TileSet(self.0 | other.0)
    }

    #[inline]
    pub fn difference(self, other: TileSet) -> TileSet {
        TileSet(self.0 & !other.0)
    }

    #[inline]
    pub fn is_subset(self, other: TileSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Every tile carrying `pip` on either half.
    pub fn with_pip(pip: u8) -> TileSet {
        tile::full_set().filter(|t| t.has(pip)).collect()
    }

    pub fn iter(self) -> impl Iterator<Item = Tile> {
        tile::full_set().filter(move |t| self.contains(*t))
    }

    pub fn to_vec(self) -> Vec<Tile> {
        self.iter().collect()
    }
}

#[inline]
fn bit(t: Tile) -> u32 {
    1u32 << (t.id() as u32)
}

impl FromIterator<Tile> for TileSet {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut s = TileSet::empty();
        for t in iter {
            s.insert(t);
        }
        s
    }
}

impl<'a> FromIterator<&'a Tile> for TileSet {
    fn from_iter<I: IntoIterator<Item = &'a Tile>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl From<TileSet> for Vec<Tile> {
    fn from(s: TileSet) -> Vec<Tile> {
        s.to_vec()
    }
}

impl From<Vec<Tile>> for TileSet {
    fn from(v: Vec<Tile>) -> TileSet {
        v.into_iter().collect()
    }
}

impl fmt::Debug for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for t in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{t}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_empty() {
        assert_eq!(TileSet::full().len(), 28);
        assert!(TileSet::empty().is_empty());
        assert!(TileSet::empty().is_subset(TileSet::full()));
    }

    #[test]
    fn with_pip_has_seven_tiles() {
        for pip in 0..=6 {
            let s = TileSet::with_pip(pip);
            assert_eq!(s.len(), 7, "pip {pip}");
            assert!(s.iter().all(|t| t.has(pip)));
        }
    }

    #[test]
    fn insert_remove_report_changes() {
        let mut s = TileSet::empty();
        assert!(s.insert(Tile::new(2, 3)));
        assert!(!s.insert(Tile::new(3, 2)));
        assert!(s.remove(Tile::new(2, 3)));
        assert!(!s.remove(Tile::new(2, 3)));
    }

    #[test]
    fn iteration_is_canonical() {
        let s: TileSet = [Tile::new(6, 6), Tile::new(0, 1), Tile::new(2, 4)].iter().collect();
        assert_eq!(s.to_vec(), vec![Tile::new(0, 1), Tile::new(2, 4), Tile::new(6, 6)]);
        assert_eq!(s.to_string(), "0/1 2/4 6/6");
    }
}

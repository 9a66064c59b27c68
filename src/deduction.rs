// FILE: src/deduction.rs | version: 2026-10-18.rc1
//
// Public-information inference about hidden hands.
// Two hard rules only (no probabilities):
//   1. a played tile is out of circulation for everyone else;
//   2. a pass means the passer holds nothing carrying either open pip.
// Candidate sets are always recomputed from these inputs, never cached.

use crate::player::Player;
use crate::tile::Tile;
use crate::tileset::TileSet;

/// Tiles a pass on `ends` rules out, skipping those already known impossible.
/// On an empty table a pass reveals nothing.
pub fn ruled_out_by_pass(ends: Option<(u8, u8)>, already: TileSet) -> TileSet {
    let Some((left, right)) = ends else {
        return TileSet::empty();
    };
    TileSet::with_pip(left)
        .union(TileSet::with_pip(right))
        .difference(already)
}

/// Rule 1: everyone but the player who played `t` can no longer hold it.
pub fn apply_play(players: &mut [Player], by: usize, t: Tile) {
    let single: TileSet = std::iter::once(t).collect();
    for (i, p) in players.iter_mut().enumerate() {
        if i != by {
            p.rule_out(single);
        }
    }
}

/// Rule 2. Returns how many tiles were newly ruled out.
pub fn apply_pass(player: &mut Player, ends: Option<(u8, u8)>) -> usize {
    let fresh = ruled_out_by_pass(ends, player.impossible());
    player.rule_out(fresh);
    fresh.len()
}

/// full set − placed − other players' known hands − the player's own impossible set.
pub fn candidate_tiles(players: &[Player], idx: usize, placed: TileSet) -> TileSet {
    let Some(me) = players.get(idx) else {
        return TileSet::empty();
    };
    let others_known: TileSet = players
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .filter_map(|(_, p)| p.known_tiles())
        .flatten()
        .collect();

    TileSet::full()
        .difference(placed)
        .difference(others_known)
        .difference(me.impossible())
}

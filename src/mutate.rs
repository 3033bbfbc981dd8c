use crate::grid::{TileMap, TileType};
use tracing::debug;

/// Turn the wall flag on or off for every tile currently showing `tile_type`.
///
/// Returns the number of tiles visited.
pub fn set_wall_for_type<M: TileMap + ?Sized>(map: &mut M, tile_type: TileType, make_wall: bool) -> usize {
    let tiles = map.cells_of_type(tile_type);
    for &tile in &tiles {
        map.set_wall(tile, make_wall);
    }
    debug!(?tile_type, make_wall, count = tiles.len(), "set walls on tiles of type");
    tiles.len()
}

/// Repaint every tile showing `from` with `to`.
///
/// The matching tiles are collected before any of them is repainted, so a tile
/// changed earlier in the pass is never matched again. Returns the number of
/// tiles repainted.
pub fn swap_type<M: TileMap + ?Sized>(map: &mut M, from: TileType, to: TileType) -> usize {
    let tiles = map.cells_of_type(from);
    for &tile in &tiles {
        map.set_type(tile, to);
    }
    debug!(?from, ?to, count = tiles.len(), "swapped tile type");
    tiles.len()
}

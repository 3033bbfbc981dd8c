use crate::config::CompatConfig;
use crate::grid::TileMap;
use crate::location::TileCoordinate;

/// Tile queries with the compatibility switches applied.
///
/// The free functions in this module use [`CompatConfig::default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TileQuery {
    pub compat: CompatConfig,
}

impl TileQuery {
    pub fn new(compat: CompatConfig) -> Self {
        TileQuery { compat }
    }

    /// Plus-shaped probe around `origin`.
    ///
    /// Returns the origin followed by `distance` tiles toward decreasing column,
    /// increasing column, decreasing row and increasing row, in that order.
    /// Always `1 + 4 * distance` entries long; a negative distance gives just the
    /// origin. Off-map tiles are included.
    pub fn neighbors(&self, origin: TileCoordinate, distance: i32) -> Vec<TileCoordinate> {
        let distance = distance.max(0);
        let first = if self.compat.neighbor_arms_from_origin { 0 } else { 1 };
        let offsets = first..first + distance;

        let mut tiles = Vec::with_capacity(1 + 4 * distance as usize);
        tiles.push(origin);
        tiles.extend(offsets.clone().map(|i| origin.offset(-i, 0)));
        tiles.extend(offsets.clone().map(|i| origin.offset(i, 0)));
        tiles.extend(offsets.clone().map(|i| origin.offset(0, -i)));
        tiles.extend(offsets.map(|i| origin.offset(0, i)));
        tiles
    }

    /// Every wall tile on the map, column by column
    pub fn all_wall_tiles<M: TileMap + ?Sized>(&self, map: &M) -> Vec<TileCoordinate> {
        let (width, height) = if self.compat.wall_scan_skips_last_line {
            (map.width() - 1, map.height() - 1)
        } else {
            (map.width(), map.height())
        };

        let mut walls = Vec::new();
        for col in 0..width {
            for row in 0..height {
                let tile = TileCoordinate::new(col, row);
                if map.is_wall(tile) {
                    walls.push(tile);
                }
            }
        }
        walls
    }
}

pub fn neighbors(origin: TileCoordinate, distance: i32) -> Vec<TileCoordinate> {
    TileQuery::default().neighbors(origin, distance)
}

pub fn is_same_tile(a: TileCoordinate, b: TileCoordinate) -> bool {
    a.col == b.col && a.row == b.row
}

pub fn is_tile_in_set(tile: TileCoordinate, set: &[TileCoordinate]) -> bool {
    set.iter().any(|&other| is_same_tile(tile, other))
}

/// Wall tiles in `[0, width - 1) x [0, height - 1)`.
///
/// The last column and row are not scanned; use a [`TileQuery`] with
/// `wall_scan_skips_last_line = false` for the full map.
pub fn all_wall_tiles<M: TileMap + ?Sized>(map: &M) -> Vec<TileCoordinate> {
    TileQuery::default().all_wall_tiles(map)
}

pub fn map_width<M: TileMap + ?Sized>(map: &M) -> i32 {
    map.width()
}

pub fn map_height<M: TileMap + ?Sized>(map: &M) -> i32 {
    map.height()
}

use serde::{Deserialize, Serialize};

/// Side length of a tile in world pixels
pub const DEFAULT_TILE_SIZE: f32 = 16.0;

/// A tile on the grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoordinate {
    pub col: i32,
    pub row: i32,
}

impl TileCoordinate {
    pub fn new(col: i32, row: i32) -> Self {
        TileCoordinate { col, row }
    }

    /// Offset this tile by (dc, dr)
    pub fn offset(&self, dc: i32, dr: i32) -> Self {
        TileCoordinate::new(self.col + dc, self.row + dr)
    }

    /// World-space centre of this tile
    pub fn center(&self, tile_size: f32) -> WorldPoint {
        WorldPoint::new(
            self.col as f32 * tile_size + tile_size / 2.0,
            self.row as f32 * tile_size + tile_size / 2.0,
        )
    }
}

/// A point in continuous world (pixel) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        WorldPoint { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` of the way from `self` to `other`
    pub fn lerp(&self, other: &WorldPoint, t: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Convert a world point to the tile containing it.
///
/// Flooring (not truncation) keeps negative coordinates in the tile to their
/// left/above, so `-0.5` lands in column -1.
pub fn to_tile(point: WorldPoint, tile_size: f32) -> TileCoordinate {
    TileCoordinate::new(
        (point.x / tile_size).floor() as i32,
        (point.y / tile_size).floor() as i32,
    )
}

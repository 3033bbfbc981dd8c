use crate::error::{Result, TilesError};
use crate::location::TileCoordinate;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a tile design (the image a tile shows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileType(pub u32);

impl TileType {
    /// Design of a cell nothing has been painted on
    pub const EMPTY: TileType = TileType(0);
    pub const FLOOR: TileType = TileType(1);
    pub const WALL: TileType = TileType(2);
}

/// Tile map service the spatial queries run against.
///
/// Behaviour for coordinates outside `[0, width) x [0, height)` is up to the
/// implementation; callers do not defend against it.
pub trait TileMap {
    /// Design currently shown at `tile`
    fn tile_type_at(&self, tile: TileCoordinate) -> TileType;
    /// Every tile currently showing `tile_type`
    fn cells_of_type(&self, tile_type: TileType) -> Vec<TileCoordinate>;
    fn is_wall(&self, tile: TileCoordinate) -> bool;
    fn set_wall(&mut self, tile: TileCoordinate, wall: bool);
    fn set_type(&mut self, tile: TileCoordinate, tile_type: TileType);
    /// Width in tiles
    fn width(&self) -> i32;
    /// Height in tiles
    fn height(&self) -> i32;
}

/// In-memory tile map storing a design and a wall flag per cell
#[derive(Clone, Debug)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    types: Vec<TileType>,
    walls: Vec<bool>,
    /// Revision number - incremented whenever a cell changes
    pub revision: u64,
}

impl Grid {
    /// Create a grid with every cell empty and walkable
    pub fn new(cols: i32, rows: i32) -> Self {
        let len = cols.max(0) as usize * rows.max(0) as usize;
        Grid {
            cols,
            rows,
            types: vec![TileType::EMPTY; len],
            walls: vec![false; len],
            revision: 0,
        }
    }

    /// Build a grid from rows of characters.
    ///
    /// `#` is a wall showing [`TileType::WALL`], `.` is walkable [`TileType::FLOOR`].
    /// Any other character must appear in `legend` as `(char, design, is_wall)`.
    /// Blank lines are skipped; every remaining line must have the same width.
    pub fn from_layout(layout: &str, legend: &[(char, TileType, bool)]) -> Result<Self> {
        let lines: Vec<(usize, &str)> = layout
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let Some(&(first_line, first)) = lines.first() else {
            return Err(TilesError::Layout {
                line: 0,
                reason: "no non-empty lines found".to_string(),
            });
        };

        let cols = first.chars().count() as i32;
        let rows = lines.len() as i32;
        let mut grid = Grid::new(cols, rows);

        for (row, &(line_no, line)) in lines.iter().enumerate() {
            let width = line.chars().count() as i32;
            if width != cols {
                return Err(TilesError::Layout {
                    line: line_no,
                    reason: format!(
                        "expected {} columns (from line {}), found {}",
                        cols, first_line, width
                    ),
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let (tile_type, wall) = match ch {
                    '#' => (TileType::WALL, true),
                    '.' => (TileType::FLOOR, false),
                    other => match legend.iter().find(|(c, _, _)| *c == other) {
                        Some(&(_, tile_type, wall)) => (tile_type, wall),
                        None => {
                            return Err(TilesError::Layout {
                                line: line_no,
                                reason: format!("unknown tile character '{}'", other),
                            });
                        }
                    },
                };
                let tile = TileCoordinate::new(col as i32, row as i32);
                grid.set_type(tile, tile_type);
                grid.set_wall(tile, wall);
            }
        }

        grid.revision = 0;
        Ok(grid)
    }

    /// Convert a tile to its index in the cell vectors, if it is on the map
    pub fn get_id(&self, tile: TileCoordinate) -> Option<usize> {
        if tile.col < 0 || tile.col >= self.cols || tile.row < 0 || tile.row >= self.rows {
            return None;
        }
        Some(tile.col as usize + tile.row as usize * self.cols as usize)
    }

    /// Convert a cell index back to its tile
    pub fn get_coords(&self, id: usize) -> TileCoordinate {
        let cols = self.cols.max(1) as usize;
        TileCoordinate::new((id % cols) as i32, (id / cols) as i32)
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }
}

impl TileMap for Grid {
    /// Off-map tiles show [`TileType::EMPTY`]
    fn tile_type_at(&self, tile: TileCoordinate) -> TileType {
        self.get_id(tile)
            .map(|id| self.types[id])
            .unwrap_or(TileType::EMPTY)
    }

    /// Row-major order
    fn cells_of_type(&self, tile_type: TileType) -> Vec<TileCoordinate> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tile_type)
            .map(|(id, _)| self.get_coords(id))
            .collect()
    }

    /// Off-map tiles are walls
    fn is_wall(&self, tile: TileCoordinate) -> bool {
        self.get_id(tile).map(|id| self.walls[id]).unwrap_or(true)
    }

    fn set_wall(&mut self, tile: TileCoordinate, wall: bool) {
        if let Some(id) = self.get_id(tile) {
            if self.walls[id] != wall {
                self.walls[id] = wall;
                self.revision += 1;
            }
        }
    }

    fn set_type(&mut self, tile: TileCoordinate, tile_type: TileType) {
        if let Some(id) = self.get_id(tile) {
            if self.types[id] != tile_type {
                self.types[id] = tile_type;
                self.revision += 1;
            }
        }
    }

    fn width(&self) -> i32 {
        self.cols
    }

    fn height(&self) -> i32 {
        self.rows
    }
}

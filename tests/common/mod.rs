#![allow(dead_code)]

use std::collections::HashMap;
use tiles_advanced::{
    to_tile, ActorAccess, ActorId, Grid, PathService, TileCoordinate, TileMap, TileType, WorldPoint,
    DEFAULT_TILE_SIZE,
};

pub const WATER: TileType = TileType(10);
pub const DOOR: TileType = TileType(20);
pub const SPIKES: TileType = TileType(30);

/// Legend for the layouts used across the integration tests
pub const LEGEND: &[(char, TileType, bool)] = &[('~', WATER, false), ('D', DOOR, true), ('^', SPIKES, false)];

pub fn layout(text: &str) -> Grid {
    Grid::from_layout(text, LEGEND).expect("test layout should parse")
}

pub fn t(col: i32, row: i32) -> TileCoordinate {
    TileCoordinate::new(col, row)
}

pub fn center(col: i32, row: i32) -> WorldPoint {
    t(col, row).center(DEFAULT_TILE_SIZE)
}

/// A grid plus actors placed by hand, recording every path request it sees
pub struct TestScene {
    pub grid: Grid,
    pub positions: HashMap<ActorId, WorldPoint>,
    pub path_requests: Vec<(TileCoordinate, TileCoordinate)>,
    pub walked: Vec<(ActorId, Vec<TileCoordinate>, f32)>,
    pub speech: Vec<(ActorId, String)>,
}

impl TestScene {
    pub fn new(grid: Grid) -> Self {
        TestScene {
            grid,
            positions: HashMap::new(),
            path_requests: Vec::new(),
            walked: Vec::new(),
            speech: Vec::new(),
        }
    }

    pub fn place(&mut self, actor: ActorId, point: WorldPoint) {
        self.positions.insert(actor, point);
    }
}

impl TileMap for TestScene {
    fn tile_type_at(&self, tile: TileCoordinate) -> TileType {
        self.grid.tile_type_at(tile)
    }

    fn cells_of_type(&self, tile_type: TileType) -> Vec<TileCoordinate> {
        self.grid.cells_of_type(tile_type)
    }

    fn is_wall(&self, tile: TileCoordinate) -> bool {
        self.grid.is_wall(tile)
    }

    fn set_wall(&mut self, tile: TileCoordinate, wall: bool) {
        self.grid.set_wall(tile, wall)
    }

    fn set_type(&mut self, tile: TileCoordinate, tile_type: TileType) {
        self.grid.set_type(tile, tile_type)
    }

    fn width(&self) -> i32 {
        self.grid.width()
    }

    fn height(&self) -> i32 {
        self.grid.height()
    }
}

impl ActorAccess for TestScene {
    fn world_position(&self, actor: ActorId) -> WorldPoint {
        self.positions[&actor]
    }

    fn current_tile(&self, actor: ActorId) -> TileCoordinate {
        to_tile(self.positions[&actor], DEFAULT_TILE_SIZE)
    }

    fn say(&mut self, actor: ActorId, message: &str) {
        self.speech.push((actor, message.to_string()));
    }
}

impl PathService for TestScene {
    type Path = Vec<TileCoordinate>;

    fn find_path(&mut self, from: TileCoordinate, to: TileCoordinate) -> Self::Path {
        self.path_requests.push((from, to));
        vec![from, to]
    }

    fn follow_path(&mut self, actor: ActorId, path: &Self::Path, speed: f32) {
        self.walked.push((actor, path.clone(), speed));
    }
}

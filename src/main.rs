use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tiles_advanced::action_log::{Action, ActionLog};
use tiles_advanced::config::LoggingConfig;
use tiles_advanced::error::Result;
use tiles_advanced::{
    animate, can_see, is_tile_in_set, neighbors, set_wall_for_type, swap_type, to_tile, ActorAccess, ActorId,
    Config, FollowController, FrameScheduler, Grid, PathService, TileCoordinate, TileMap, TileQuery, TileType,
    TilesError, WorldPoint,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const WATER: TileType = TileType(10);
const WATER_RIPPLE: TileType = TileType(11);
const WATER_FOAM: TileType = TileType(12);
const DOOR: TileType = TileType(20);
const LAVA: TileType = TileType(30);

const LEGEND: &[(char, TileType, bool)] = &[('~', WATER, false), ('D', DOOR, true), ('L', LAVA, false)];

const DEMO_LAYOUT: &str = "
####################
#..................#
#..~~~.....#.......#
#..~~~.....#.......#
#..........D.......#
#..........#.......#
#######D####.......#
#..................#
#.....LLL..........#
#..................#
####################
";

/// A sprite walking towards a queue of world-space waypoints
struct Sprite {
    pos: WorldPoint,
    speed: f32,
    waypoints: VecDeque<WorldPoint>,
    status: String,
}

impl Sprite {
    /// Move towards the next waypoint (call once per frame)
    fn update(&mut self, delta_time: f32) {
        let Some(&dest) = self.waypoints.front() else {
            return;
        };
        let distance = self.pos.distance(&dest);
        let movement_this_frame = self.speed * delta_time;
        if distance <= movement_this_frame {
            self.pos = dest;
            self.waypoints.pop_front();
            return;
        }
        self.pos = self.pos.lerp(&dest, movement_this_frame / distance);
    }
}

/// Headless scene: a tile grid, some sprites, and direct-line path execution
struct DemoScene {
    grid: Grid,
    tile_size: f32,
    sprites: Vec<Sprite>,
    log: ActionLog,
}

impl DemoScene {
    fn new(grid: Grid, tile_size: f32) -> Self {
        DemoScene {
            grid,
            tile_size,
            sprites: Vec::new(),
            log: ActionLog::new(),
        }
    }

    fn spawn(&mut self, tile: TileCoordinate, speed: f32) -> ActorId {
        self.sprites.push(Sprite {
            pos: tile.center(self.tile_size),
            speed,
            waypoints: VecDeque::new(),
            status: String::new(),
        });
        ActorId(self.sprites.len() as u32 - 1)
    }

    fn sprite(&self, actor: ActorId) -> &Sprite {
        &self.sprites[actor.0 as usize]
    }

    fn sprite_mut(&mut self, actor: ActorId) -> &mut Sprite {
        &mut self.sprites[actor.0 as usize]
    }

    fn update(&mut self, delta_time: f32) {
        for sprite in &mut self.sprites {
            sprite.update(delta_time);
        }
    }
}

impl TileMap for DemoScene {
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

impl ActorAccess for DemoScene {
    fn world_position(&self, actor: ActorId) -> WorldPoint {
        self.sprite(actor).pos
    }

    fn current_tile(&self, actor: ActorId) -> TileCoordinate {
        to_tile(self.sprite(actor).pos, self.tile_size)
    }

    fn say(&mut self, actor: ActorId, message: &str) {
        let sprite = self.sprite_mut(actor);
        if sprite.status != message {
            sprite.status = message.to_string();
        }
    }
}

impl PathService for DemoScene {
    type Path = Vec<TileCoordinate>;

    // the demo has no search; a path is just the two end tiles
    fn find_path(&mut self, from: TileCoordinate, to: TileCoordinate) -> Self::Path {
        self.log.log(Action::PathRequest { from, to });
        vec![from, to]
    }

    fn follow_path(&mut self, actor: ActorId, path: &Self::Path, speed: f32) {
        let tile_size = self.tile_size;
        let sprite = self.sprite_mut(actor);
        sprite.speed = speed;
        sprite.waypoints = path.iter().skip(1).map(|t| t.center(tile_size)).collect();
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_layout(config: &Config) -> Result<String> {
    if config.demo.layout_path.is_empty() {
        return Ok(DEMO_LAYOUT.to_string());
    }
    let path = Path::new(&config.demo.layout_path);
    fs::read_to_string(path).map_err(|source| TilesError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run(config: &Config) -> Result<()> {
    let grid = Grid::from_layout(&load_layout(config)?, LEGEND)?;
    info!(cols = grid.width(), rows = grid.height(), "loaded layout");

    let mut scene = DemoScene::new(grid, config.grid.tile_size);
    let hunter = scene.spawn(TileCoordinate::new(2, 8), config.follow.speed);
    let prey = scene.spawn(TileCoordinate::new(16, 2), 40.0);
    let patrol = [TileCoordinate::new(16, 8), TileCoordinate::new(16, 2)];
    let mut next_patrol = 0;

    let query = TileQuery::new(config.compat);
    info!(walls = query.all_wall_tiles(&scene).len(), "scene ready");

    let opened = set_wall_for_type(&mut scene, DOOR, false);
    scene.log.log(Action::SetWallForType { tile_type: DOOR, make_wall: false, count: opened });

    let mut scheduler: FrameScheduler<DemoScene> = FrameScheduler::new();
    let interval = Duration::from_millis(250);
    let frames = vec![WATER, WATER_RIPPLE, WATER_FOAM, WATER];
    let frame_count = frames.len();
    let mut water = animate(&mut scheduler, &scene, WATER, frames, interval, config.compat);
    scene.log.log(Action::StartAnimation {
        tile_type: WATER,
        frames: frame_count,
        tiles: water.tile_count(),
        interval_ms: interval.as_millis() as u64,
    });

    let mut chase = FollowController::new(&config.follow);
    chase.start(&mut scheduler, &mut scene, hunter, prey, None);
    scene.log.log(Action::StartFollow { follower: hunter, target: prey, speed: chase.default_speed() });

    let sight = config.sight();
    let dt = Duration::from_millis(config.demo.tick_ms);
    for frame in 0..config.demo.ticks {
        if scene.sprite(prey).waypoints.is_empty() {
            let goal = patrol[next_patrol];
            next_patrol = (next_patrol + 1) % patrol.len();
            let from = scene.current_tile(prey);
            scene.follow_path(prey, &vec![from, goal], 40.0);
        }

        scene.update(dt.as_secs_f32());
        scheduler.tick(dt, &mut scene);

        if frame == config.demo.ticks / 2 {
            let cooled = swap_type(&mut scene, LAVA, TileType::FLOOR);
            scene.log.log(Action::SwapType { from: LAVA, to: TileType::FLOOR, count: cooled });
        }

        if frame % 30 == 0 {
            let visible = can_see(&scene, &scene, hunter, prey, &sight);
            scene.log.log(Action::LineOfSight { looker: hunter, target: prey, visible });
        }

        let reach = neighbors(scene.current_tile(prey), 1);
        if is_tile_in_set(scene.current_tile(hunter), &reach) {
            info!(frame, "hunter caught up with its target");
            break;
        }
    }

    if chase.stop(&mut scheduler) {
        scene.log.log(Action::StopFollow { follower: hunter });
    }
    if water.stop(&mut scheduler) {
        scene.log.log(Action::StopAnimation { tile_type: WATER });
    }

    info!(status = %scene.sprite(hunter).status, events = scene.log.len(), "hunter finished");
    println!("{}", scene.log.summary());
    if config.logging.enable_action_log {
        let path = Path::new(&config.logging.action_log_path);
        scene.log.save_to_file(path)?;
        info!("Action log saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    let (config, source) = Config::load();
    init_tracing(&config.logging);
    source.log();

    if let Err(e) = run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

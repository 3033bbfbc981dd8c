pub mod action_log;
pub mod actor;
pub mod animate;
pub mod config;
pub mod error;
pub mod follow;
pub mod grid;
pub mod location;
pub mod mutate;
pub mod query;
pub mod scheduler;
pub mod sight;

pub use actor::{ActorAccess, ActorId, PathService};
pub use animate::{animate, TileAnimation, TileAnimator};
pub use config::{CompatConfig, Config};
pub use error::TilesError;
pub use follow::{FollowController, FollowState, PathFollower};
pub use grid::{Grid, TileMap, TileType};
pub use location::{to_tile, TileCoordinate, WorldPoint, DEFAULT_TILE_SIZE};
pub use mutate::{set_wall_for_type, swap_type};
pub use query::{all_wall_tiles, is_same_tile, is_tile_in_set, map_height, map_width, neighbors, TileQuery};
pub use scheduler::{FrameScheduler, Scheduler, TaskHandle};
pub use sight::{can_see, has_line_of_sight, SampleMode, SightConfig};

use crate::actor::{ActorAccess, ActorId};
use crate::grid::TileMap;
use crate::location::{to_tile, WorldPoint, DEFAULT_TILE_SIZE};
use serde::Deserialize;
use tracing::trace;

/// Number of points sampled along a sight line
pub const DEFAULT_SAMPLES: usize = 25;

/// Upper bound on per-tile samples for very long lines
pub const DEFAULT_MAX_SAMPLES: usize = 1024;

/// How many points a sight line is sampled at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Always `samples` points, however long the line
    #[default]
    Fixed,
    /// One point per tile of travel, plus the start
    PerTile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightConfig {
    pub samples: usize,
    pub sampling: SampleMode,
    /// Cap for [`SampleMode::PerTile`]
    pub max_samples: usize,
    pub tile_size: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        SightConfig {
            samples: DEFAULT_SAMPLES,
            sampling: SampleMode::Fixed,
            max_samples: DEFAULT_MAX_SAMPLES,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl SightConfig {
    /// Sample count for a line of the given length; never zero.
    ///
    /// Per-tile counts are capped at `max_samples`.
    pub fn sample_count(&self, distance: f32) -> usize {
        let count = match self.sampling {
            SampleMode::Fixed => self.samples,
            SampleMode::PerTile => ((distance / self.tile_size).ceil() as usize)
                .saturating_add(1)
                .min(self.max_samples),
        };
        count.max(1)
    }
}

/// March from `from` toward `to` and report whether no sampled tile is a wall.
///
/// With `n` samples, sample `i` sits at `i / n` of the way, so the start is
/// checked and `to` itself is not. Stops at the first wall.
pub fn has_line_of_sight<M: TileMap + ?Sized>(
    map: &M,
    from: WorldPoint,
    to: WorldPoint,
    config: &SightConfig,
) -> bool {
    let samples = config.sample_count(from.distance(&to));
    let step_x = (to.x - from.x) / samples as f32;
    let step_y = (to.y - from.y) / samples as f32;

    for i in 0..samples {
        let point = WorldPoint::new(from.x + i as f32 * step_x, from.y + i as f32 * step_y);
        let tile = to_tile(point, config.tile_size);
        if map.is_wall(tile) {
            trace!(?from, ?to, sample = i, ?tile, "sight blocked");
            return false;
        }
    }
    true
}

/// Whether `looker` can see `target` without a wall in between
pub fn can_see<A, M>(actors: &A, map: &M, looker: ActorId, target: ActorId, config: &SightConfig) -> bool
where
    A: ActorAccess + ?Sized,
    M: TileMap + ?Sized,
{
    has_line_of_sight(
        map,
        actors.world_position(looker),
        actors.world_position(target),
        config,
    )
}

use crate::config::CompatConfig;
use crate::grid::{TileMap, TileType};
use crate::location::TileCoordinate;
use crate::scheduler::{Scheduler, TaskHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Frame cycling over a fixed set of tiles.
///
/// The tile set is captured once when the animation is built; tiles painted
/// with the animated design later are not picked up.
#[derive(Debug, Clone)]
pub struct TileAnimation {
    tiles: Vec<TileCoordinate>,
    frames: Vec<TileType>,
    cursor: usize,
    /// Wrap one frame early (the last frame is never shown)
    skip_last_frame: bool,
}

impl TileAnimation {
    pub fn new<M: TileMap + ?Sized>(
        map: &M,
        tile_type: TileType,
        frames: Vec<TileType>,
        compat: CompatConfig,
    ) -> Self {
        TileAnimation {
            tiles: map.cells_of_type(tile_type),
            frames,
            cursor: 0,
            skip_last_frame: compat.animation_skips_last_frame,
        }
    }

    /// Paint the current frame on every captured tile, then advance the cursor
    pub fn step<M: TileMap + ?Sized>(&mut self, map: &mut M) {
        let Some(&frame) = self.frames.get(self.cursor) else {
            return;
        };
        for &tile in &self.tiles {
            map.set_type(tile, frame);
        }
        debug!(cursor = self.cursor, ?frame, tiles = self.tiles.len(), "animation step");

        let len = self.frames.len();
        let wrap_at = if self.skip_last_frame && len > 1 { len - 1 } else { len };
        self.cursor += 1;
        if self.cursor >= wrap_at {
            self.cursor = 0;
        }
    }

    /// Index of the frame the next step will paint
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tiles(&self) -> &[TileCoordinate] {
        &self.tiles
    }

    pub fn frames(&self) -> &[TileType] {
        &self.frames
    }
}

/// A running tile animation registered with a scheduler
#[derive(Debug)]
pub struct TileAnimator {
    task: Option<TaskHandle>,
    tile_type: TileType,
    tile_count: usize,
}

/// Animate every tile currently showing `tile_type` with `frames`, one frame per `interval`
pub fn animate<C, S>(
    scheduler: &mut S,
    map: &C,
    tile_type: TileType,
    frames: Vec<TileType>,
    interval: Duration,
    compat: CompatConfig,
) -> TileAnimator
where
    C: TileMap + 'static,
    S: Scheduler<C> + ?Sized,
{
    let mut animation = TileAnimation::new(map, tile_type, frames, compat);
    let tile_count = animation.tiles().len();
    info!(?tile_type, tiles = tile_count, frames = animation.frames().len(), ?interval, "starting tile animation");

    let task = scheduler.on_interval(interval, Box::new(move |ctx: &mut C| animation.step(ctx)));
    TileAnimator {
        task: Some(task),
        tile_type,
        tile_count,
    }
}

impl TileAnimator {
    /// Cancel the animation. The tiles keep whichever frame they last showed.
    pub fn stop<C, S: Scheduler<C> + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.task.take() {
            Some(task) => {
                info!(tile_type = ?self.tile_type, "stopping tile animation");
                scheduler.cancel(task)
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Number of tiles captured when the animation started
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::scheduler::FrameScheduler;

    const WATER: TileType = TileType(30);
    const A: TileType = TileType(31);
    const B: TileType = TileType(32);
    const C: TileType = TileType(33);

    fn water_grid() -> Grid {
        Grid::from_layout("~.~\n...\n", &[('~', WATER, false)]).unwrap()
    }

    fn shown(grid: &Grid) -> TileType {
        grid.tile_type_at(TileCoordinate::new(0, 0))
    }

    #[test]
    fn test_legacy_wrap_never_shows_last_frame() {
        let mut grid = water_grid();
        let mut animation = TileAnimation::new(&grid, WATER, vec![A, B, C], CompatConfig::default());

        let mut seen = Vec::new();
        for _ in 0..5 {
            animation.step(&mut grid);
            seen.push(shown(&grid));
            assert!(animation.cursor() < animation.frames().len());
        }
        assert_eq!(seen, vec![A, B, A, B, A]);
        assert_eq!(grid.tile_type_at(TileCoordinate::new(2, 0)), A);
    }

    #[test]
    fn test_full_cycle_when_compat_disabled() {
        let mut grid = water_grid();
        let compat = CompatConfig {
            animation_skips_last_frame: false,
            ..CompatConfig::default()
        };
        let mut animation = TileAnimation::new(&grid, WATER, vec![A, B, C], compat);

        let mut seen = Vec::new();
        for _ in 0..4 {
            animation.step(&mut grid);
            seen.push(shown(&grid));
        }
        assert_eq!(seen, vec![A, B, C, A]);
    }

    #[test]
    fn test_single_and_empty_frames() {
        let mut grid = water_grid();
        let mut single = TileAnimation::new(&grid, WATER, vec![A], CompatConfig::default());
        single.step(&mut grid);
        single.step(&mut grid);
        assert_eq!(shown(&grid), A);
        assert_eq!(single.cursor(), 0);

        let mut grid = water_grid();
        let mut empty = TileAnimation::new(&grid, WATER, Vec::new(), CompatConfig::default());
        empty.step(&mut grid);
        assert_eq!(shown(&grid), WATER);
        assert_eq!(grid.get_revision(), 0);
    }

    #[test]
    fn test_tile_set_captured_at_setup() {
        let mut grid = water_grid();
        let mut animation = TileAnimation::new(&grid, WATER, vec![A, B, C], CompatConfig::default());

        // painted after setup, so never animated
        grid.set_type(TileCoordinate::new(1, 1), WATER);
        animation.step(&mut grid);

        assert_eq!(animation.tiles().len(), 2);
        assert_eq!(grid.tile_type_at(TileCoordinate::new(1, 1)), WATER);
    }

    #[test]
    fn test_scheduled_animation_and_stop() {
        let mut grid = water_grid();
        let mut scheduler: FrameScheduler<Grid> = FrameScheduler::new();
        let mut animator = animate(
            &mut scheduler,
            &grid,
            WATER,
            vec![A, B, C],
            Duration::from_millis(100),
            CompatConfig::default(),
        );
        assert_eq!(animator.tile_count(), 2);
        assert!(animator.is_running());

        scheduler.tick(Duration::from_millis(50), &mut grid);
        assert_eq!(shown(&grid), WATER);
        scheduler.tick(Duration::from_millis(50), &mut grid);
        assert_eq!(shown(&grid), A);
        scheduler.tick(Duration::from_millis(100), &mut grid);
        assert_eq!(shown(&grid), B);

        assert!(animator.stop(&mut scheduler));
        assert!(!animator.is_running());
        assert!(!animator.stop(&mut scheduler));

        scheduler.tick(Duration::from_millis(100), &mut grid);
        assert_eq!(shown(&grid), B);
        assert!(scheduler.is_empty());
    }
}

use crate::actor::ActorId;
use crate::error::{Result, TilesError};
use crate::grid::TileType;
use crate::location::TileCoordinate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Operations worth replaying when debugging a scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Wall flag set on every tile of a type
    SetWallForType { tile_type: TileType, make_wall: bool, count: usize },
    /// Every tile of `from` repainted as `to`
    SwapType { from: TileType, to: TileType, count: usize },
    StartAnimation { tile_type: TileType, frames: usize, tiles: usize, interval_ms: u64 },
    StopAnimation { tile_type: TileType },
    StartFollow { follower: ActorId, target: ActorId, speed: f32 },
    /// A path from `from` toward `to` was requested
    PathRequest { from: TileCoordinate, to: TileCoordinate },
    StopFollow { follower: ActorId },
    LineOfSight { looker: ActorId, target: ActorId, visible: bool },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    /// Get all logged actions
    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json).map_err(|source| TilesError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut wall_tiles = 0;
        let mut swapped_tiles = 0;
        let mut animations = 0;
        let mut follows = 0;
        let mut path_requests = 0;
        let mut sight_checks = 0;
        let mut sightings = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SetWallForType { count, .. } => wall_tiles += count,
                Action::SwapType { count, .. } => swapped_tiles += count,
                Action::StartAnimation { .. } => animations += 1,
                Action::StartFollow { .. } => follows += 1,
                Action::PathRequest { .. } => path_requests += 1,
                Action::LineOfSight { visible, .. } => {
                    sight_checks += 1;
                    if *visible {
                        sightings += 1;
                    }
                }
                Action::StopAnimation { .. } | Action::StopFollow { .. } => {}
            }
        }

        let duration = self.actions.last().map(|l| l.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Tile Mutations: {} wall flags set, {} tiles swapped\n\
             Animations Started: {}\n\
             Following: {} chases, {} path requests\n\
             Line of Sight: {} checks, {} visible",
            duration,
            self.actions.len(),
            wall_tiles,
            swapped_tiles,
            animations,
            follows,
            path_requests,
            sight_checks,
            sightings
        )
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut log = ActionLog::new();
        assert!(log.is_empty());
        log.log(Action::SetWallForType { tile_type: TileType(5), make_wall: true, count: 3 });
        log.log(Action::SwapType { from: TileType(5), to: TileType(6), count: 3 });
        log.log(Action::StartFollow { follower: ActorId(1), target: ActorId(2), speed: 100.0 });
        log.log(Action::PathRequest {
            from: TileCoordinate::new(1, 1),
            to: TileCoordinate::new(4, 4),
        });
        log.log(Action::LineOfSight { looker: ActorId(1), target: ActorId(2), visible: false });
        log.log(Action::LineOfSight { looker: ActorId(1), target: ActorId(2), visible: true });

        assert_eq!(log.len(), 6);
        assert!(!log.is_empty());
        let actions = log.get_actions();
        assert_eq!(
            actions[0].action,
            Action::SetWallForType { tile_type: TileType(5), make_wall: true, count: 3 }
        );
        assert!(actions.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));

        let summary = log.summary();
        assert!(summary.contains("Total Events: 6"));
        assert!(summary.contains("3 wall flags set, 3 tiles swapped"));
        assert!(summary.contains("1 chases, 1 path requests"));
        assert!(summary.contains("2 checks, 1 visible"));
    }

    #[test]
    fn test_save_to_file_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.json");

        let mut log = ActionLog::new();
        log.log(Action::StopFollow { follower: ActorId(9) });
        log.save_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let actions: Vec<LoggedAction> = serde_json::from_str(&written).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::StopFollow { follower: ActorId(9) });
    }

    #[test]
    fn test_save_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ActionLog::new()
            .save_to_file(&dir.path().join("nope").join("log.json"))
            .unwrap_err();
        assert!(matches!(err, TilesError::Io { .. }));
    }
}

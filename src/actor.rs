use crate::location::{TileCoordinate, WorldPoint};
use serde::{Deserialize, Serialize};

/// Handle to a sprite owned by the host scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Read access to the host's sprites, plus their status bubble
pub trait ActorAccess {
    fn world_position(&self, actor: ActorId) -> WorldPoint;
    /// Tile the actor currently occupies
    fn current_tile(&self, actor: ActorId) -> TileCoordinate;
    /// Show a status message above the actor
    fn say(&mut self, actor: ActorId, message: &str);
}

/// Path search and path execution.
///
/// How paths are found is the host's business; the follow controller only
/// asks for one and hands it back to be walked.
pub trait PathService {
    type Path;

    fn find_path(&mut self, from: TileCoordinate, to: TileCoordinate) -> Self::Path;
    /// Start moving `actor` along `path`, replacing whatever path it was on
    fn follow_path(&mut self, actor: ActorId, path: &Self::Path, speed: f32);
}

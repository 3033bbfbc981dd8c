use crate::actor::{ActorAccess, ActorId, PathService};
use crate::config::FollowConfig;
use crate::location::TileCoordinate;
use crate::query::is_same_tile;
use crate::scheduler::{Scheduler, TaskHandle};
use tracing::{debug, info};

pub const DEFAULT_FOLLOW_SPEED: f32 = 100.0;
pub const DEFAULT_STATUS_MESSAGE: &str = "following";

/// Per-follower planning state: walks `path` and re-plans whenever the
/// follower enters a new tile
#[derive(Debug, Clone)]
pub struct PathFollower<P> {
    follower: ActorId,
    target: ActorId,
    /// Tile the follower was on when the current path was planned
    last_known: TileCoordinate,
    path: P,
    speed: f32,
    status: String,
}

impl<P> PathFollower<P> {
    /// Plan the first path from the follower's tile to the target's and start walking it
    pub fn start<C>(ctx: &mut C, follower: ActorId, target: ActorId, speed: f32, status: String) -> Self
    where
        C: ActorAccess + PathService<Path = P> + ?Sized,
    {
        let last_known = ctx.current_tile(follower);
        let goal = ctx.current_tile(target);
        let path = ctx.find_path(last_known, goal);
        ctx.follow_path(follower, &path, speed);
        debug!(?follower, ?target, from = ?last_known, to = ?goal, "planned initial path");

        PathFollower {
            follower,
            target,
            last_known,
            path,
            speed,
            status,
        }
    }

    /// One frame of following. Returns true if a new path was planned.
    ///
    /// The status message is shown every frame, whether or not the path changed.
    pub fn tick<C>(&mut self, ctx: &mut C) -> bool
    where
        C: ActorAccess + PathService<Path = P> + ?Sized,
    {
        let current = ctx.current_tile(self.follower);
        let replanned = !is_same_tile(current, self.last_known);
        if replanned {
            self.last_known = current;
            let goal = ctx.current_tile(self.target);
            self.path = ctx.find_path(current, goal);
            ctx.follow_path(self.follower, &self.path, self.speed);
            debug!(follower = ?self.follower, from = ?current, to = ?goal, "re-planned path");
        }
        ctx.say(self.follower, &self.status);
        replanned
    }

    pub fn follower(&self) -> ActorId {
        self.follower
    }

    pub fn target(&self) -> ActorId {
        self.target
    }

    pub fn last_known(&self) -> TileCoordinate {
        self.last_known
    }

    pub fn path(&self) -> &P {
        &self.path
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    Idle,
    Following { follower: ActorId, target: ActorId },
}

/// Makes one sprite chase another, re-planning from a per-tick task
#[derive(Debug)]
pub struct FollowController {
    state: FollowState,
    task: Option<TaskHandle>,
    default_speed: f32,
    status_message: String,
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new(&FollowConfig::default())
    }
}

impl FollowController {
    pub fn new(config: &FollowConfig) -> Self {
        FollowController {
            state: FollowState::Idle,
            task: None,
            default_speed: config.speed,
            status_message: config.status_message.clone(),
        }
    }

    /// Start `follower` chasing `target`; `None` uses the configured speed.
    ///
    /// An existing chase is cancelled first.
    pub fn start<C, S>(
        &mut self,
        scheduler: &mut S,
        ctx: &mut C,
        follower: ActorId,
        target: ActorId,
        speed: Option<f32>,
    ) where
        C: ActorAccess + PathService + 'static,
        C::Path: 'static,
        S: Scheduler<C> + ?Sized,
    {
        self.stop::<C, S>(scheduler);

        let speed = speed.unwrap_or(self.default_speed);
        info!(?follower, ?target, speed, "start following");
        let mut planner = PathFollower::start(ctx, follower, target, speed, self.status_message.clone());
        let task = scheduler.on_every_tick(Box::new(move |ctx: &mut C| {
            planner.tick(ctx);
        }));

        self.task = Some(task);
        self.state = FollowState::Following { follower, target };
    }

    /// Cancel the chase task and go idle. Returns false if already idle.
    ///
    /// The follower keeps walking whatever path it was last given.
    pub fn stop<C, S: Scheduler<C> + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        if let FollowState::Following { follower, target } = self.state {
            info!(?follower, ?target, "stop following");
        }
        self.state = FollowState::Idle;
        scheduler.cancel(task)
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_following(&self) -> bool {
        matches!(self.state, FollowState::Following { .. })
    }

    pub fn default_speed(&self) -> f32 {
        self.default_speed
    }
}

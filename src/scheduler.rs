use std::time::Duration;
use tracing::debug;

/// Cancellation token for a registered task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// A recurring callback over the caller's scene context
pub type Task<C> = Box<dyn FnMut(&mut C)>;

/// Recurring-callback service.
///
/// Tasks persist until cancelled through the handle they were registered with.
pub trait Scheduler<C> {
    /// Run `task` every time `interval` has elapsed
    fn on_interval(&mut self, interval: Duration, task: Task<C>) -> TaskHandle;
    /// Run `task` once per tick
    fn on_every_tick(&mut self, task: Task<C>) -> TaskHandle;
    /// Remove a task. Returns false if it was already gone.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

enum Cadence {
    EveryTick,
    Interval { every: Duration, elapsed: Duration },
}

struct Entry<C> {
    handle: TaskHandle,
    cadence: Cadence,
    task: Task<C>,
}

/// Cooperative single-threaded scheduler driven by [`FrameScheduler::tick`].
///
/// Each tick runs due tasks in registration order, each to completion. An
/// interval task fires at most once per tick; leftover time carries into the
/// next interval, minus any whole intervals a long frame skipped.
pub struct FrameScheduler<C> {
    entries: Vec<Entry<C>>,
    next_id: u64,
    frame: u64,
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        FrameScheduler {
            entries: Vec::new(),
            next_id: 0,
            frame: 0,
        }
    }

    /// Advance time by `dt` and run every task that is due
    pub fn tick(&mut self, dt: Duration, ctx: &mut C) {
        self.frame += 1;
        for entry in &mut self.entries {
            let due = match &mut entry.cadence {
                Cadence::EveryTick => true,
                Cadence::Interval { every, elapsed } => {
                    *elapsed = elapsed.saturating_add(dt);
                    if *elapsed < *every {
                        false
                    } else {
                        *elapsed = remainder(*elapsed, *every);
                        true
                    }
                }
            };
            if due {
                (entry.task)(ctx);
            }
        }
    }

    /// Number of ticks run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_registered(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, cadence: Cadence, task: Task<C>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { handle, cadence, task });
        handle
    }
}

/// `elapsed` modulo `every`; zero for a zero interval
fn remainder(elapsed: Duration, every: Duration) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    if every.is_zero() {
        return Duration::ZERO;
    }
    // below `every`, so the seconds part always fits in a u64
    let rem = elapsed.as_nanos() % every.as_nanos();
    let secs = u64::try_from(rem / NANOS_PER_SEC).unwrap_or(u64::MAX);
    let nanos = u32::try_from(rem % NANOS_PER_SEC).unwrap_or(0);
    Duration::new(secs, nanos)
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> for FrameScheduler<C> {
    fn on_interval(&mut self, interval: Duration, task: Task<C>) -> TaskHandle {
        let handle = self.register(
            Cadence::Interval {
                every: interval,
                elapsed: Duration::ZERO,
            },
            task,
        );
        debug!(?handle, ?interval, "registered interval task");
        handle
    }

    fn on_every_tick(&mut self, task: Task<C>) -> TaskHandle {
        let handle = self.register(Cadence::EveryTick, task);
        debug!(?handle, "registered per-tick task");
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        let removed = self.entries.len() != before;
        if removed {
            debug!(?handle, "cancelled task");
        }
        removed
    }
}

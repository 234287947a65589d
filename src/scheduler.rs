//! # Periodic task scheduler
//!
//! Cooperative scheduler owned by the main loop. Tasks are registered with
//! an initial offset and a period and are polled with the current time of
//! a free-running millisecond counter. The counter may wrap.

use fugit::{MillisDurationU32, TimerInstantU32};
use heapless::Vec;
use thiserror_no_std::Error;

/// Millisecond timestamp.
pub type Instant = TimerInstantU32<1000>;

/// Handle of a registered task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("scheduler is full ({capacity} tasks)")]
pub struct SchedulerFull {
    pub capacity: usize,
}

struct PeriodicTask {
    period: MillisDurationU32,
    next_delay: MillisDurationU32,
    last: Instant,
}

/// Scheduler for up to `N` periodic tasks.
pub struct Scheduler<const N: usize> {
    tasks: Vec<PeriodicTask, N>,
}

impl<const N: usize> Default for Scheduler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Scheduler<N> {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a task.
    ///
    /// # Args
    /// * `offset` - Delay of the first run after [Scheduler::start].
    /// * `period` - Delay between subsequent runs.
    pub fn register(
        &mut self,
        offset: MillisDurationU32,
        period: MillisDurationU32,
    ) -> Result<TaskId, SchedulerFull> {
        let id = TaskId(self.tasks.len());
        self.tasks
            .push(PeriodicTask {
                period,
                next_delay: offset,
                last: Instant::from_ticks(0),
            })
            .map_err(|_| SchedulerFull { capacity: N })?;
        Ok(id)
    }

    /// Start counting all offsets from `now`.
    pub fn start(&mut self, now: Instant) {
        for task in self.tasks.iter_mut() {
            task.last = now;
        }
    }

    /// Run every task that is due at `now`.
    ///
    /// A task runs at most once per poll. If polling falls behind, the
    /// missed runs are caught up on subsequent polls and the schedule keeps
    /// its phase.
    pub fn poll(&mut self, now: Instant, mut run: impl FnMut(TaskId)) {
        for (index, task) in self.tasks.iter_mut().enumerate() {
            let elapsed = now.ticks().wrapping_sub(task.last.ticks());
            if elapsed < task.next_delay.ticks() {
                continue;
            }
            task.last = Instant::from_ticks(
                task.last.ticks().wrapping_add(task.next_delay.ticks()),
            );
            task.next_delay = task.period;
            run(TaskId(index));
        }
    }
}

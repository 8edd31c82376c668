//! Timer and clock capabilities for the press-and-hold loop.
//!
//! Progress ticks are one-shot tasks: each tick schedules the next one, so a
//! slow frame delays every following tick rather than bunching them up. The
//! `TimerQueue` keeps its own virtual time which the owner moves forward,
//! either from wall-clock elapsed time (interactive screen) or by hand (tests).

use chrono::{DateTime, Local};
use std::time::Duration;

/// Identifies one scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to schedule and cancel delayed callbacks.
pub trait Scheduler {
    /// Schedule a task to fire once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TaskHandle;

    /// Cancel a pending task. Cancelling an unknown or fired task does nothing.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Deterministic virtual-time task queue.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(TaskHandle, Duration)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from queue creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Remove and return the earliest task due at or before `until`.
    ///
    /// Virtual time moves to that task's deadline, so tasks scheduled while
    /// handling it are timed from the moment it fired. Returns `None` once no
    /// task is due; call [`TimerQueue::advance_to`] afterwards to settle the
    /// clock at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<TaskHandle> {
        let (index, &(handle, deadline)) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline))| *deadline <= until)
            .min_by_key(|(_, (handle, deadline))| (*deadline, handle.0))?;
        self.pending.remove(index);
        self.now = self.now.max(deadline);
        Some(handle)
    }

    /// Move virtual time forward without firing anything. Time never goes back.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

/// Wall-clock source used for the fortune cooldown.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system's local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

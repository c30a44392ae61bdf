//! Periodic task scheduler.
//!
//! Holds the `(interval, action)` table for the dispatcher.  The scheduler
//! never runs actions itself: when a task comes due it notifies a
//! [`SchedulerDelegate`], and the dispatcher's delegate appends a tick to
//! the same FIFO the event sources feed.  Ticks therefore interleave with
//! input events in arrival order.
//!
//! ```text
//!   Clock ──▶ Scheduler.poll(now) ──▶ SchedulerDelegate ──▶ FIFO ──▶ action(ctx)
//! ```
//!
//! Cadence is not phase-locked.  Each deadline is measured from the moment
//! the previous tick was issued, so a tick that falls due during an alert
//! hold fires on the first poll after the hold (late, never dropped, never
//! doubled up to "catch up").

use heapless::Vec;
use log::info;

use crate::error::DispatchError;
use crate::events::TaskId;

/// Maximum number of periodic tasks (stack-allocated).
pub const MAX_TASKS: usize = 4;

/// Signature of a periodic action.
pub type TaskFn<C> = fn(&mut C);

/// Receives a notification for every task that comes due.
pub trait SchedulerDelegate {
    fn on_task_due(&mut self, id: TaskId, label: &'static str);
}

/// A single periodic task.
struct PeriodicTask<C> {
    label: &'static str,
    interval_ms: u32,
    action: TaskFn<C>,
    /// `None` until the first poll arms the task.
    next_due_ms: Option<u64>,
}

/// Fixed-capacity periodic task table.
pub struct Scheduler<C> {
    tasks: Vec<PeriodicTask<C>, MAX_TASKS>,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task.  It arms on the next [`poll`](Self::poll) and first
    /// fires one interval after that.
    pub fn add(
        &mut self,
        label: &'static str,
        interval_ms: u32,
        action: TaskFn<C>,
    ) -> Result<TaskId, DispatchError> {
        if interval_ms == 0 {
            return Err(DispatchError::ZeroInterval);
        }
        let id = TaskId(self.tasks.len() as u8);
        self.tasks
            .push(PeriodicTask {
                label,
                interval_ms,
                action,
                next_due_ms: None,
            })
            .map_err(|_| DispatchError::TaskTableFull)?;
        info!("Scheduler: added '{}' every {}ms at slot {}", label, interval_ms, id.index());
        Ok(id)
    }

    /// Notify `delegate` of every task due at `now_ms`, in slot order.
    /// Each task fires at most once per poll.
    pub fn poll(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            match task.next_due_ms {
                None => task.next_due_ms = Some(now_ms + task.interval_ms as u64),
                Some(due) if now_ms >= due => {
                    task.next_due_ms = Some(now_ms + task.interval_ms as u64);
                    delegate.on_task_due(TaskId(i as u8), task.label);
                }
                Some(_) => {}
            }
        }
    }

    /// Action registered for `id`.
    pub fn action(&self, id: TaskId) -> Option<TaskFn<C>> {
        self.tasks.get(id.index()).map(|t| t.action)
    }

    /// Number of registered tasks.
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

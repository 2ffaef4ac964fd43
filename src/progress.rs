//! Task completion state machine.
//!
//! A task moves between three states as its subtask checklist changes:
//! `Empty` (no subtasks), `Partial` (some but not all done) and `Full`
//! (at least one subtask and all of them done). Only transitions across
//! the `Full` boundary affect the owning project's `completed_tasks`
//! counter; everything else is counter-neutral at the project level.
//!
//! A task with no subtasks is never `Full`. The vacuous "all zero
//! subtasks are done" reading is deliberately excluded so that an empty
//! task can never contribute to project completion.

/// Snapshot of a task's subtask counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub total: i32,
    pub completed: i32,
}

/// Completion state of a task derived from its counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressState {
    Empty,
    Partial,
    Full,
}

impl Progress {
    /// Build a snapshot, clamping `completed` into `[0, total]` to
    /// tolerate counter drift in stored data.
    pub fn new(total: i32, completed: i32) -> Self {
        let total = total.max(0);
        Self {
            total,
            completed: completed.clamp(0, total),
        }
    }

    pub fn state(&self) -> ProgressState {
        if self.total == 0 {
            ProgressState::Empty
        } else if self.completed == self.total {
            ProgressState::Full
        } else {
            ProgressState::Partial
        }
    }

    /// Whether the task counts toward its project's `completed_tasks`.
    pub fn is_full(&self) -> bool {
        self.state() == ProgressState::Full
    }
}

/// Project-level counter delta caused by a task moving from `before` to
/// `after`: `+1` when it becomes full, `-1` when it stops being full,
/// `0` otherwise.
pub fn completion_delta(before: Progress, after: Progress) -> i32 {
    match (before.is_full(), after.is_full()) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

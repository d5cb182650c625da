//! Pure queries over task snapshots.
//!
//! Everything in this module is deterministic, side-effect free and keeps
//! the input order of tasks. Aggregates are recomputed from the snapshot on
//! every call; nothing is cached.

use crate::task::{Priority, Status, Task};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};
use time::Date;

/// Agenda filter selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every task due on the selected day.
    #[default]
    All,
    /// Only tasks still to do.
    Active,
    /// Only finished tasks.
    Completed,
    /// Only tasks with the given priority.
    Priority(Priority),
}

impl FilterMode {
    /// The user-facing token for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Priority(priority) => priority.as_str(),
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => task.status == Status::Todo,
            Self::Completed => task.status == Status::Done,
            Self::Priority(wanted) => task.priority == wanted,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a filter token is not one of the six known modes.
#[derive(Debug, thiserror::Error)]
#[error("unknown filter: {0} (expected all, active, completed, low, medium or high)")]
pub struct ParseFilterError(String);

impl FromStr for FilterMode {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => other
                .parse()
                .map(Self::Priority)
                .map_err(|_| ParseFilterError(other.to_owned())),
        }
    }
}

/// Tasks due on `day` that pass `mode`, in input order.
#[must_use]
pub fn day_agenda<'a>(tasks: &'a [Task], day: Date, mode: FilterMode) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.due_on(day) && mode.matches(task))
        .collect()
}

/// Open tasks across every day, in input order.
#[must_use]
pub fn pending_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.status == Status::Todo).collect()
}

/// Number of open tasks across every day.
#[must_use]
pub fn unfinished_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.status == Status::Todo).count()
}

/// Fraction of all tasks that are done, `0.0` for an empty collection.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_ratio(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let done = tasks.iter().filter(|task| task.is_done()).count();
    done as f64 / tasks.len() as f64
}

/// Calendar days having at least one task, deduplicated and ordered.
#[must_use]
pub fn days_with_tasks(tasks: &[Task]) -> BTreeSet<Date> {
    tasks.iter().map(|task| task.due_date.date()).collect()
}

/// Per-day counters shown in the day summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStats {
    /// Tasks due on the day.
    pub total: usize,
    /// Tasks due on the day that are done.
    pub completed: usize,
}

impl DayStats {
    /// Count the tasks due on `day`.
    #[must_use]
    pub fn for_day(tasks: &[Task], day: Date) -> Self {
        let mut stats = Self::default();
        for task in tasks.iter().filter(|task| task.due_on(day)) {
            stats.total += 1;
            if task.is_done() {
                stats.completed += 1;
            }
        }
        stats
    }
}

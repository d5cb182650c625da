//! Domain types and pure agenda queries for dayplan.

/// Pure filtering and aggregate queries over task snapshots.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task entity and its value enums.
pub mod task;

pub use filter::{DayStats, FilterMode};
pub use id::{ReminderId, TaskId};
pub use task::{Priority, Status, Task};

use crate::id::{ReminderId, TaskId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use time::{Date, OffsetDateTime};

/// Urgency bucket assigned to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Default urgency for new tasks.
    #[default]
    Low,
    /// Medium urgency.
    Medium,
    /// High urgency.
    High,
}

impl Priority {
    /// String representation used on the wire and in the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a priority token is not `low`, `medium` or `high`.
#[derive(Debug, thiserror::Error)]
#[error("unknown priority: {0} (expected low, medium or high)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParsePriorityError(other.to_owned())),
        }
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Task still needs doing.
    #[serde(rename = "to-do")]
    Todo,
    /// Task has been finished.
    #[serde(rename = "done")]
    Done,
}

impl Status {
    /// String representation used on the wire and in the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "to-do",
            Self::Done => "done",
        }
    }

    /// The other of the two states.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tracked task.
///
/// The whole collection of tasks is serialized as one JSON array; field
/// names below are the wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier of the task.
    pub id: TaskId,
    /// What needs doing.
    pub text: String,
    /// Combined date and time the task is due, in the offset it was entered.
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    /// Urgency bucket; `low` when absent in stored data.
    #[serde(default)]
    pub priority: Priority,
    /// Completion state.
    pub status: Status,
    /// Handle of the scheduled reminder; `None` when scheduling failed or
    /// was never attempted. Never consulted to decide task operations.
    #[serde(default)]
    pub notification_id: Option<ReminderId>,
}

impl Task {
    /// Create a task in the `to-do` state with a fresh identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, due_date: OffsetDateTime, priority: Priority) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            due_date,
            priority,
            status: Status::Todo,
            notification_id: None,
        }
    }

    /// Flip the completion state between `to-do` and `done`.
    pub const fn toggle(&mut self) {
        self.status = self.status.toggled();
    }

    /// Whether the task is due on the given calendar day.
    ///
    /// The comparison uses the wall-clock date the task was entered with,
    /// so a task due at 23:59 belongs to that day and not the next.
    #[must_use]
    pub fn due_on(&self, day: Date) -> bool {
        self.due_date.date() == day
    }

    /// True when the task is finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, Status::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use time::macros::{date, datetime};

    fn sample() -> Task {
        Task::new("Buy milk", datetime!(2026-03-14 09:00 UTC), Priority::Medium)
    }

    #[test]
    fn new_task_starts_todo_with_fresh_id() {
        let first = sample();
        let second = sample();
        assert_eq!(first.status, Status::Todo);
        assert!(first.notification_id.is_none());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn toggle_twice_restores_status() {
        let mut task = sample();
        task.toggle();
        assert_eq!(task.status, Status::Done);
        task.toggle();
        assert_eq!(task.status, Status::Todo);
    }

    #[test]
    fn due_on_uses_the_entered_wall_clock_day() {
        let late = Task::new("late", datetime!(2026-03-14 23:59 UTC), Priority::Low);
        let midnight = Task::new("midnight", datetime!(2026-03-15 00:00 UTC), Priority::Low);
        assert!(late.due_on(date!(2026 - 03 - 14)));
        assert!(!late.due_on(date!(2026 - 03 - 15)));
        assert!(midnight.due_on(date!(2026 - 03 - 15)));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut task = sample();
        task.notification_id = Some(ReminderId::new("r-1"));
        let value = serde_json::to_value(&task).expect("must serialize task");

        let Value::Object(map) = &value else {
            panic!("task must serialize to an object");
        };
        for key in ["id", "text", "dueDate", "priority", "status", "notificationId"] {
            assert!(map.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(value["status"], json!("to-do"));
        assert_eq!(value["priority"], json!("medium"));
        assert_eq!(value["dueDate"], json!("2026-03-14T09:00:00Z"));
        assert_eq!(value["notificationId"], json!("r-1"));
    }

    #[test]
    fn missing_priority_and_reminder_default_on_deserialize() {
        let json = r#"{
            "id": "019a9440-2270-72f1-8306-0bf4ea84d34e",
            "text": "Water plants",
            "dueDate": "2026-03-14T18:30:00Z",
            "status": "done"
        }"#;
        let task: Task = serde_json::from_str(json).expect("must parse task");
        assert_eq!(task.priority, Priority::Low);
        assert!(task.notification_id.is_none());
        assert_eq!(task.status, Status::Done);
    }

    #[test]
    fn unscheduled_reminder_serializes_as_null() {
        let value = serde_json::to_value(sample()).expect("must serialize task");
        assert_eq!(value["notificationId"], Value::Null);
    }

    #[test]
    fn parse_priority_tokens() {
        assert_eq!("low".parse::<Priority>().ok(), Some(Priority::Low));
        assert_eq!("medium".parse::<Priority>().ok(), Some(Priority::Medium));
        assert_eq!("high".parse::<Priority>().ok(), Some(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }
}

//! Reminder wire types
//!
//! The payload is what the delivery command reads on stdin when scheduling;
//! the response is what comes back, one JSON object per interaction, when
//! the user acts on a fired reminder.

use dayplan_core::Task;
use dayplan_core::id::TaskId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Title shared by every reminder notification.
pub const REMINDER_TITLE: &str = "Task Reminder";

/// Action buttons offered on a reminder notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderAction {
    /// Open the app focused on the task.
    Show,
    /// Delete the task without opening the app.
    Delete,
}

/// Payload handed to the delivery command when scheduling a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPayload {
    /// Notification title.
    pub title: String,
    /// Notification body, the task text.
    pub body: String,
    /// Correlation data carried back in responses.
    pub data: ReminderData,
    /// Action buttons offered on the notification.
    pub actions: Vec<ReminderAction>,
    /// Instant the reminder should fire, the task's due time.
    #[serde(with = "time::serde::rfc3339")]
    pub trigger: OffsetDateTime,
}

/// Correlation data embedded in a reminder payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderData {
    /// Task the reminder belongs to.
    pub task_id: TaskId,
}

impl ReminderPayload {
    /// Build the payload for a task's due-time reminder.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: REMINDER_TITLE.to_owned(),
            body: task.text.clone(),
            data: ReminderData { task_id: task.id },
            actions: vec![ReminderAction::Show, ReminderAction::Delete],
            trigger: task.due_date,
        }
    }
}

/// Response emitted when the user interacts with a fired reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderResponse {
    /// Which action the user chose; `Default` for a plain tap.
    #[serde(rename = "actionIdentifier")]
    pub action: ResponseAction,
    /// Task the reminder belonged to.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
}

/// Interpretation of the identifier in a reminder response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseAction {
    /// Open the app focused on the task.
    Show,
    /// Delete the task.
    Delete,
    /// Any other identifier, including a plain tap on the notification.
    #[serde(other)]
    Default,
}

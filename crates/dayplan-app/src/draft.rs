//! Validated input for creating a task.

use dayplan_core::Priority;
use time::{Date, OffsetDateTime, Time, UtcOffset};

/// Errors surfaced while validating task input.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    /// The task text was empty or whitespace only.
    #[error("task text must not be empty")]
    EmptyText,
}

/// Checked description of a task to create.
///
/// A draft can only hold non-empty text, so adding it to the store never
/// has to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    text: String,
    due: OffsetDateTime,
    priority: Priority,
}

impl TaskDraft {
    /// Validate `text` and build a draft due at `due`.
    ///
    /// Leading and trailing whitespace is trimmed off the text.
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyText`] when the trimmed text is empty.
    pub fn new(text: &str, due: OffsetDateTime, priority: Priority) -> Result<Self, DraftError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DraftError::EmptyText);
        }
        Ok(Self {
            text: text.to_owned(),
            due,
            priority,
        })
    }

    /// Build a draft from a calendar day and a wall-clock time in `offset`.
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyText`] when the trimmed text is empty.
    pub fn from_parts(
        text: &str,
        day: Date,
        at: Time,
        offset: UtcOffset,
        priority: Priority,
    ) -> Result<Self, DraftError> {
        Self::new(text, day.with_time(at).assume_offset(offset), priority)
    }

    /// The task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the task is due.
    #[must_use]
    pub const fn due(&self) -> OffsetDateTime {
        self.due
    }

    /// Urgency of the task.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

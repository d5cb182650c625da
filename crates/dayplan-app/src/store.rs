//! Task collection with persistence and reminder side effects.

use dayplan_core::{Status, Task, TaskId};
use dayplan_notify::{ReminderDelivery, ReminderResponse, ReminderScheduler, ResponseAction};
use time::Date;
use tracing::{debug, info};

use crate::draft::TaskDraft;
use crate::persist::SaveHandle;

/// What handling a notification response amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The response deleted the task.
    Deleted(Task),
    /// The response surfaced the task without changing it.
    Shown(Task),
    /// The response referenced a task that no longer exists.
    UnknownTask,
}

/// In-memory task collection, the single source of truth while running.
///
/// Every mutation enqueues a full snapshot on the save queue and keeps the
/// reminder of each touched task in line with its state.
#[derive(Debug)]
pub struct TaskStore<D> {
    tasks: Vec<Task>,
    scheduler: ReminderScheduler<D>,
    saves: SaveHandle,
}

impl<D> TaskStore<D> {
    /// Build a store around the loaded tasks.
    pub const fn new(tasks: Vec<Task>, scheduler: ReminderScheduler<D>, saves: SaveHandle) -> Self {
        Self {
            tasks,
            scheduler,
            saves,
        }
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    fn persist(&self) {
        self.saves.enqueue(self.tasks.clone());
    }
}

impl<D: ReminderDelivery> TaskStore<D> {
    /// Add a task from a validated draft and schedule its reminder.
    ///
    /// The task is kept even when scheduling fails; it then simply carries
    /// no reminder handle.
    pub fn add_task(&mut self, draft: TaskDraft) -> Task {
        let mut task = Task::new(draft.text(), draft.due(), draft.priority());
        task.notification_id = self.scheduler.schedule(&task);
        info!(task = %task.id, due = %task.due_date, "Added task");
        self.tasks.push(task.clone());
        self.persist();
        task
    }

    /// Flip a task between to-do and done.
    ///
    /// Returns the new status, or `None` when the id is unknown.
    pub fn toggle_task(&mut self, id: TaskId) -> Option<Status> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!(task = %id, "Toggle for unknown task");
            self.persist();
            return None;
        };
        task.toggle();
        let status = task.status;
        debug!(task = %id, status = %status, "Toggled task");
        self.persist();
        Some(status)
    }

    /// Remove a task, cancelling its reminder first.
    ///
    /// Returns the removed task, or `None` when the id is unknown.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!(task = %id, "Remove for unknown task");
            self.persist();
            return None;
        };
        self.scheduler.cancel(&self.tasks[index]);
        let task = self.tasks.remove(index);
        info!(task = %task.id, "Removed task");
        self.persist();
        Some(task)
    }

    /// Drop every done task due on `day`, writing one snapshot for the
    /// whole batch.
    ///
    /// Returns how many tasks were removed.
    pub fn clear_done_on(&mut self, day: Date) -> usize {
        for task in self
            .tasks
            .iter()
            .filter(|task| task.due_on(day) && task.is_done())
        {
            self.scheduler.cancel(task);
        }

        let before = self.tasks.len();
        self.tasks.retain(|task| !(task.due_on(day) && task.is_done()));
        let removed = before - self.tasks.len();
        if removed > 0 {
            info!(%day, removed, "Cleared done tasks");
        }
        self.persist();
        removed
    }

    /// Apply a notification response to the collection.
    ///
    /// A delete action removes the task like any other removal; show and
    /// plain taps only look it up.
    pub fn apply_response(&mut self, response: ReminderResponse) -> ResponseOutcome {
        match response.action {
            ResponseAction::Delete => self
                .remove_task(response.task_id)
                .map_or(ResponseOutcome::UnknownTask, ResponseOutcome::Deleted),
            ResponseAction::Show | ResponseAction::Default => self
                .tasks
                .iter()
                .find(|task| task.id == response.task_id)
                .cloned()
                .map_or(ResponseOutcome::UnknownTask, ResponseOutcome::Shown),
        }
    }
}

//! Best-effort scheduling tied to task mutations.

use crate::{ReminderDelivery, ReminderPayload};
use dayplan_core::{ReminderId, Task};
use tracing::{debug, warn};

/// Keeps at most one pending reminder per task and never fails its caller.
///
/// Scheduling and cancellation failures are logged and swallowed; the task
/// operation that triggered them always proceeds.
#[derive(Debug)]
pub struct ReminderScheduler<D> {
    delivery: D,
}

impl<D> ReminderScheduler<D> {
    /// Wrap a delivery mechanism.
    pub const fn new(delivery: D) -> Self {
        Self { delivery }
    }
}

impl<D: ReminderDelivery> ReminderScheduler<D> {
    /// Try to schedule the task's due-time reminder.
    ///
    /// Returns `None` when delivery is unavailable or the attempt fails.
    pub fn schedule(&self, task: &Task) -> Option<ReminderId> {
        match self.delivery.schedule(&ReminderPayload::for_task(task)) {
            Ok(id) => {
                debug!(task = %task.id, reminder = %id, "scheduled reminder");
                Some(id)
            }
            Err(err) => {
                warn!(task = %task.id, error = %err, "could not schedule reminder");
                None
            }
        }
    }

    /// Try to cancel the task's reminder.
    ///
    /// A task without a handle is skipped. Failures are expected for fired
    /// or already-cancelled reminders and never block the caller.
    pub fn cancel(&self, task: &Task) {
        let Some(id) = &task.notification_id else {
            return;
        };
        if let Err(err) = self.delivery.cancel(id) {
            debug!(task = %task.id, reminder = %id, error = %err, "reminder cancel failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeliveryError, Result};
    use dayplan_core::Priority;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use time::macros::datetime;

    #[derive(Clone, Default)]
    struct MockDelivery {
        inner: Arc<MockDeliveryInner>,
    }

    #[derive(Default)]
    struct MockDeliveryInner {
        scheduled: Mutex<Vec<ReminderPayload>>,
        cancelled: Mutex<Vec<ReminderId>>,
        fail_schedule: Mutex<bool>,
        fail_cancel: Mutex<bool>,
    }

    impl ReminderDelivery for MockDelivery {
        fn schedule(&self, payload: &ReminderPayload) -> Result<ReminderId> {
            if *guard(&self.inner.fail_schedule) {
                return Err(DeliveryError::Unavailable);
            }
            let mut scheduled = guard(&self.inner.scheduled);
            scheduled.push(payload.clone());
            Ok(ReminderId::new(format!("reminder-{}", scheduled.len())))
        }

        fn cancel(&self, id: &ReminderId) -> Result<()> {
            guard(&self.inner.cancelled).push(id.clone());
            if *guard(&self.inner.fail_cancel) {
                return Err(DeliveryError::NoHandle);
            }
            Ok(())
        }
    }

    impl MockDelivery {
        fn scheduled(&self) -> Vec<ReminderPayload> {
            guard(&self.inner.scheduled).clone()
        }

        fn cancelled(&self) -> Vec<ReminderId> {
            guard(&self.inner.cancelled).clone()
        }

        fn fail_schedule(&self) {
            *guard(&self.inner.fail_schedule) = true;
        }

        fn fail_cancel(&self) {
            *guard(&self.inner.fail_cancel) = true;
        }
    }

    fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sample_task() -> Task {
        Task::new("Buy milk", datetime!(2026-03-14 09:00 UTC), Priority::Low)
    }

    #[test]
    fn schedule_returns_the_delivery_handle() {
        let delivery = MockDelivery::default();
        let scheduler = ReminderScheduler::new(delivery.clone());
        let task = sample_task();

        let id = scheduler.schedule(&task);
        assert_eq!(id, Some(ReminderId::new("reminder-1")));

        let scheduled = delivery.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].body, "Buy milk");
        assert_eq!(scheduled[0].data.task_id, task.id);
    }

    #[test]
    fn schedule_failure_yields_none() {
        let delivery = MockDelivery::default();
        delivery.fail_schedule();
        let scheduler = ReminderScheduler::new(delivery.clone());

        assert_eq!(scheduler.schedule(&sample_task()), None);
        assert!(delivery.scheduled().is_empty());
    }

    #[test]
    fn cancel_without_a_handle_skips_the_delivery() {
        let delivery = MockDelivery::default();
        let scheduler = ReminderScheduler::new(delivery.clone());

        scheduler.cancel(&sample_task());
        assert!(delivery.cancelled().is_empty());
    }

    #[test]
    fn cancel_failure_is_swallowed() {
        let delivery = MockDelivery::default();
        delivery.fail_cancel();
        let scheduler = ReminderScheduler::new(delivery.clone());

        let mut task = sample_task();
        task.notification_id = Some(ReminderId::new("reminder-9"));
        scheduler.cancel(&task);

        assert_eq!(delivery.cancelled(), vec![ReminderId::new("reminder-9")]);
    }
}

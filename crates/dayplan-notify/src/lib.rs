//! Reminder scheduling for dayplan
//!
//! This crate bridges task mutations to an external notification delivery
//! command, similar to Git hooks: the reminder payload travels as JSON on
//! the command's stdin and the opaque reminder handle comes back on stdout.
//! Scheduling is best-effort throughout; a missing or failing delivery
//! command never blocks the task operation that triggered it.

mod config;
mod delivery;
mod error;
mod scheduler;
mod types;

pub use config::NotifyConfig;
pub use delivery::{CommandDelivery, ReminderDelivery};
pub use error::{DeliveryError, Result};
pub use scheduler::ReminderScheduler;
pub use types::{ReminderAction, ReminderData, ReminderPayload, ReminderResponse, ResponseAction};

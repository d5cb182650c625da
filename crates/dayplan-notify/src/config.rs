//! Delivery configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the external reminder delivery command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Whether reminders are delivered at all.
    pub enabled: bool,

    /// Program invoked to schedule and cancel reminders.
    pub command: Option<PathBuf>,

    /// Extra arguments placed before the subcommand.
    pub args: Vec<String>,

    /// Timeout in seconds for one delivery invocation.
    pub timeout: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            args: Vec::new(),
            timeout: 10,
        }
    }
}

impl NotifyConfig {
    /// True when a delivery command is configured and not switched off.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.enabled && self.command.is_some()
    }
}

//! Application layer logic for dayplan.
//!
//! This crate owns the in-memory task collection, the background save queue
//! and the coupling between task mutations and reminder scheduling, shared
//! by every user-facing surface.

pub mod draft;
pub mod persist;
pub mod store;

// Re-exports for convenience
pub use draft::{DraftError, TaskDraft};
pub use persist::{SaveHandle, SnapshotStore, load_or_empty, spawn_writer};
pub use store::{ResponseOutcome, TaskStore};

//! Shared building blocks for the TUI.

pub mod render_utils;
pub mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};

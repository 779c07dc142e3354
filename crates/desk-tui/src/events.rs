//! UI event types.
//!
//! Every input to the reducer is a `UiEvent`: terminal input, timer ticks,
//! async task results from the runtime inbox and token broadcasts from the
//! auth context.
//!
//! Async work uses a uniform lifecycle. The runtime emits `TaskStarted` when
//! it spawns a task and `TaskCompleted` wrapping the result event when the
//! task ends; the reducer drops completions that are no longer active.

use crossterm::event::Event as CrosstermEvent;
use desk_core::register::{RegisterError, RegistrationReceipt};
use desk_core::token::Token;

use crate::common::{TaskCompleted, TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, render cadence).
    Tick,

    /// Terminal input.
    Terminal(CrosstermEvent),

    /// Task lifecycle: runtime spawned a task.
    TaskStarted { kind: TaskKind, id: TaskId },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// The registration request returned.
    RegistrationFinished(Result<RegistrationReceipt, RegisterError>),

    /// The auth context broadcast a new token value.
    TokenChanged(Option<Token>),

    /// The token was cleared; rebuild all presentation state.
    Reset,

    /// Clearing the token failed.
    LogoutFailed { error: String },
}

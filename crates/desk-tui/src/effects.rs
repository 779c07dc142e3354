//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O and task spawning only; the reducer never does either.

use desk_core::register::RegistrationRequest;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// POST the registration request on a background task.
    SubmitRegistration {
        task: TaskId,
        request: RegistrationRequest,
    },

    /// Clear the token through the auth context.
    Logout,
}

//! Full-screen TUI for Smart Desk.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use desk_core::auth::AuthContext;
use desk_core::config::Config;
use desk_core::register::HttpRegistrationClient;
pub use runtime::TuiRuntime;

/// Runs the interactive shell until the user quits.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the HTTP client cannot be
/// built or the terminal fails.
pub fn run_interactive(config: &Config, auth: AuthContext) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive shell requires a terminal.\n\
             Use `desk register --username ... --password ...` for non-interactive registration."
        );
    }

    let client = HttpRegistrationClient::from_config(config)?;
    let mut runtime = TuiRuntime::new(auth, client)?;
    runtime.run()
}

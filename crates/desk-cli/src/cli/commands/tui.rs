//! Interactive shell command handler.

use anyhow::Result;
use desk_core::config::Config;
use desk_core::storage::SessionId;

#[cfg(feature = "tui")]
pub fn run(config: &Config, session: Option<SessionId>) -> Result<()> {
    use desk_core::auth::AuthContext;
    use desk_core::storage::{FileSessionStorage, MemoryStorage};

    let auth = match session {
        Some(id) => {
            tracing::info!(session = %id, "mounting named session");
            AuthContext::mount(FileSessionStorage::open(id))
        }
        None => AuthContext::mount(MemoryStorage::new()),
    };
    desk_tui::run_interactive(config, auth)?;
    eprintln!("Goodbye!");
    Ok(())
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: &Config, _session: Option<SessionId>) -> Result<()> {
    anyhow::bail!("This build has no interactive shell. Rebuild with the `tui` feature.")
}

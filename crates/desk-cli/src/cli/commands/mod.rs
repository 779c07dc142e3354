//! CLI command handlers.

pub mod config;
pub mod register;
pub mod session;
pub mod token;
pub mod tui;

use anyhow::Result;
use desk_core::storage::{FileSessionStorage, SessionId};

/// Opens the named session or explains how to get one.
pub fn require_session(session: Option<SessionId>) -> Result<FileSessionStorage> {
    match session {
        Some(id) => Ok(FileSessionStorage::open(id)),
        None => anyhow::bail!(
            "This command needs a named session.\n\
             Pass --session <ID> or set DESK_SESSION (create one with `desk session new`)."
        ),
    }
}

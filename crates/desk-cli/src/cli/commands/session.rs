//! Session command handlers.

use anyhow::{Context, Result};
use desk_core::storage::{FileSessionStorage, SessionId};

/// Prints a fresh id. Its file is created on the first write.
pub fn new() {
    println!("{}", SessionId::generate());
}

pub fn end(storage: FileSessionStorage) -> Result<()> {
    let existed = storage.exists();
    storage
        .discard()
        .with_context(|| format!("end session {}", storage.id()))?;
    tracing::info!(session = %storage.id(), existed, "session ended");
    if existed {
        println!("Ended session {}", storage.id());
    } else {
        println!("Session {} had no stored state", storage.id());
    }
    Ok(())
}

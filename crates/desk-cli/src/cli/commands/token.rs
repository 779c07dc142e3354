//! Token command handlers (named sessions only).

use anyhow::{Context, Result};
use desk_core::auth::AuthContext;
use desk_core::storage::FileSessionStorage;
use desk_core::token::Token;

pub fn show(storage: FileSessionStorage) -> Result<()> {
    let id = storage.id().clone();
    let auth = AuthContext::mount(storage);
    if let Some(reason) = auth.discarded_on_load() {
        eprintln!("Warning: {reason}");
    }
    match auth.current() {
        Some(token) => {
            let json = serde_json::to_string_pretty(token.as_value())
                .context("serialize token")?;
            println!("{json}");
        }
        None => println!("No token in session {id}"),
    }
    Ok(())
}

pub fn set(storage: FileSessionStorage, json: &str) -> Result<()> {
    let token = Token::parse(json)
        .context("token must be valid JSON")?
        .context("token must not be null (use `desk token clear` to remove it)")?;
    let id = storage.id().clone();
    AuthContext::mount(storage)
        .set(Some(token))
        .with_context(|| format!("save token in session {id}"))?;
    println!("Token saved in session {id}");
    Ok(())
}

pub fn clear(storage: FileSessionStorage) -> Result<()> {
    let id = storage.id().clone();
    let _ = AuthContext::mount(storage)
        .set(None)
        .with_context(|| format!("clear token in session {id}"))?;
    println!("Token cleared from session {id}");
    Ok(())
}

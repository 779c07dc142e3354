//! Token storage.
//!
//! The token is an opaque JSON value persisted under a single session key.
//! `TokenStore` is the only owner of the persisted value; every change is
//! broadcast synchronously over a `watch` channel so all subscribers see the
//! new value before the next frame renders.
//!
//! Tokens are never logged.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::storage::{SessionStorage, StorageError};

/// Session storage key holding the serialized token.
pub const TOKEN_KEY: &str = "token";

/// Opaque credential payload.
///
/// Any JSON value except `null` (a stored `null` reads back as "no token").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Value);

impl Token {
    /// Wraps a JSON value. Returns `None` for `null`.
    pub fn from_value(value: Value) -> Option<Self> {
        (!value.is_null()).then_some(Self(value))
    }

    /// Parses a token from JSON text.
    ///
    /// # Errors
    /// Returns an error if `json` is not valid JSON.
    pub fn parse(json: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str::<Value>(json).map(Self::from_value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Display name carried by object tokens (`username`, `user` or `name`).
    pub fn display_name(&self) -> Option<&str> {
        ["username", "user", "name"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(Value::as_str))
    }

    /// Role carried by object tokens.
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }
}

/// Result of reading the persisted token.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedToken {
    Missing,
    Present(Token),
    /// A value exists but is not valid JSON.
    Corrupt { error: String },
}

/// Returned by `TokenStore::clear`.
///
/// The hosting shell must rebuild every piece of presentation state when it
/// receives one, so no stale token stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the application must reset its presentation state"]
pub struct ResetRequest;

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize token: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct TokenStore {
    storage: Mutex<Box<dyn SessionStorage>>,
    tx: watch::Sender<Option<Token>>,
    /// Why the start-up read found no usable token, if a value was discarded.
    discarded_on_load: Option<String>,
}

impl TokenStore {
    /// Creates a store and reads the initial value from `storage`.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        let mut store = Self {
            storage: Mutex::new(Box::new(storage)),
            tx: watch::Sender::new(None),
            discarded_on_load: None,
        };
        let (initial, discarded) = store.load_reporting();
        store.discarded_on_load = discarded;
        store.tx.send_replace(initial);
        store
    }

    /// Reads the persisted token without any recovery.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be read.
    pub fn load_checked(&self) -> Result<LoadedToken, StorageError> {
        let Some(raw) = self.storage().get(TOKEN_KEY)? else {
            return Ok(LoadedToken::Missing);
        };
        Ok(match Token::parse(&raw) {
            Ok(Some(token)) => LoadedToken::Present(token),
            Ok(None) => LoadedToken::Missing,
            Err(err) => LoadedToken::Corrupt {
                error: err.to_string(),
            },
        })
    }

    /// Reads the persisted token, treating anything unusable as absent.
    ///
    /// A corrupt value is removed so it cannot shadow a later login.
    pub fn load(&self) -> Option<Token> {
        self.load_reporting().0
    }

    fn load_reporting(&self) -> (Option<Token>, Option<String>) {
        match self.load_checked() {
            Ok(LoadedToken::Present(token)) => (Some(token), None),
            Ok(LoadedToken::Missing) => (None, None),
            Ok(LoadedToken::Corrupt { error }) => {
                tracing::warn!(%error, "stored token is not valid JSON; discarding it");
                if let Err(err) = self.storage().remove(TOKEN_KEY) {
                    tracing::warn!(error = %err, "failed to remove corrupt token");
                }
                (None, Some(format!("stored token was unreadable ({error})")))
            }
            Err(err) => {
                tracing::warn!(error = %err, "session storage unreadable; treating as logged out");
                if matches!(err, StorageError::Parse { .. })
                    && let Err(remove_err) = self.storage().remove(TOKEN_KEY)
                {
                    tracing::warn!(error = %remove_err, "failed to reset unreadable session");
                }
                (None, Some(err.to_string()))
            }
        }
    }

    /// Persists `token` and notifies subscribers.
    ///
    /// # Errors
    /// Returns an error if the token cannot be serialized or stored.
    pub fn save(&self, token: Token) -> Result<(), TokenStoreError> {
        let json = serde_json::to_string(&token)?;
        self.storage().set(TOKEN_KEY, &json)?;
        tracing::info!("token saved");
        self.tx.send_replace(Some(token));
        Ok(())
    }

    /// Removes the persisted token and notifies subscribers.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be written. Subscribers
    /// are not notified in that case.
    pub fn clear(&self) -> Result<ResetRequest, TokenStoreError> {
        self.storage().remove(TOKEN_KEY)?;
        tracing::info!("token cleared");
        self.tx.send_replace(None);
        Ok(ResetRequest)
    }

    /// Latest broadcast value.
    pub fn current(&self) -> Option<Token> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Token>> {
        self.tx.subscribe()
    }

    /// Reason the start-up read discarded a stored value, if it did.
    pub fn discarded_on_load(&self) -> Option<&str> {
        self.discarded_on_load.as_deref()
    }

    fn storage(&self) -> MutexGuard<'_, Box<dyn SessionStorage>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.tx.borrow().is_some())
            .field("discarded_on_load", &self.discarded_on_load)
            .finish_non_exhaustive()
    }
}

//! Auth context: the per-application handle to the current token.
//!
//! Created once when the application mounts and passed explicitly to every
//! component that needs the token. Clones share the same `TokenStore`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::storage::SessionStorage;
use crate::token::{ResetRequest, Token, TokenStore, TokenStoreError};

/// What a `set` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    /// A token was saved and broadcast.
    Updated,
    /// The token was cleared; the shell must reset its presentation state.
    Reset(ResetRequest),
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    store: Arc<TokenStore>,
}

impl AuthContext {
    /// Mounts a context over `storage`. The initial token is whatever the
    /// store loads.
    pub fn mount(storage: impl SessionStorage + 'static) -> Self {
        Self::from_store(TokenStore::new(storage))
    }

    pub fn from_store(store: TokenStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn current(&self) -> Option<Token> {
        self.store.current()
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.current().is_some()
    }

    /// Saves `Some(token)`, clears on `None`.
    ///
    /// # Errors
    /// Returns an error if the token store cannot persist the change.
    pub fn set(&self, token: Option<Token>) -> Result<AuthChange, TokenStoreError> {
        match token {
            Some(token) => {
                self.store.save(token)?;
                Ok(AuthChange::Updated)
            }
            None => Ok(AuthChange::Reset(self.store.clear()?)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Token>> {
        self.store.subscribe()
    }

    /// Reason a stored value was discarded at mount, if any.
    pub fn discarded_on_load(&self) -> Option<&str> {
        self.store.discarded_on_load()
    }
}

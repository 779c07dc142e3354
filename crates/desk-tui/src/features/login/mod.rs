//! Sign-in screen.
//!
//! Signing in belongs to an external service; this screen only confirms a
//! registration and points there.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
pub use render::render_login;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    /// Username from the registration that led here, if any.
    pub registered: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginAction {
    None,
    BackToRegister,
}

pub fn handle_key(key: KeyEvent) -> LoginAction {
    match key.code {
        KeyCode::Esc => LoginAction::BackToRegister,
        _ => LoginAction::None,
    }
}

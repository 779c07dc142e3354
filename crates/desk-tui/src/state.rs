//! Application state.
//!
//! `AppState` is owned by the runtime and mutated only by the reducer. The
//! auth context is injected once at mount; everything else is presentation
//! state that `reset` throws away.

use desk_core::auth::AuthContext;
use desk_core::token::Token;

use crate::common::{TaskSeq, Tasks};
use crate::features::login::LoginState;
use crate::features::register::RegisterState;

#[derive(Debug, Clone)]
pub enum Screen {
    Register(RegisterState),
    Login(LoginState),
    Dashboard,
}

impl Screen {
    /// Dashboard when a token is present, otherwise the registration form.
    pub fn initial(token: Option<&Token>) -> Self {
        if token.is_some() {
            Screen::Dashboard
        } else {
            Screen::Register(RegisterState::new())
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Register(_) => "register",
            Screen::Login(_) => "login",
            Screen::Dashboard => "dashboard",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub auth: AuthContext,
    pub screen: Screen,
    /// One-line message shown under the current screen.
    pub notice: Option<String>,
    pub should_quit: bool,
    pub spinner_frame: usize,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
}

impl AppState {
    pub fn new(auth: AuthContext) -> Self {
        let screen = Screen::initial(auth.current().as_ref());
        let notice = auth
            .discarded_on_load()
            .map(|reason| format!("Signed out: {reason}"));
        Self {
            auth,
            screen,
            notice,
            should_quit: false,
            spinner_frame: 0,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
        }
    }

    /// Rebuilds all presentation state from the current token.
    ///
    /// Outstanding tasks are forgotten so their results are dropped. The task
    /// sequence keeps counting so old ids are never reused.
    pub fn reset(&mut self) {
        self.screen = Screen::initial(self.auth.current().as_ref());
        self.notice = None;
        self.tasks.clear_all();
        tracing::info!(screen = self.screen.name(), "application state reset");
    }
}

#[cfg(test)]
mod tests {
    use desk_core::storage::{MemoryStorage, SessionStorage};
    use desk_core::token::TOKEN_KEY;

    use super::*;

    #[test]
    fn starts_on_register_without_token() {
        let app = AppState::new(AuthContext::mount(MemoryStorage::new()));
        assert!(matches!(app.screen, Screen::Register(_)));
        assert_eq!(app.notice, None);
    }

    #[test]
    fn starts_on_dashboard_with_token() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, r#"{"username":"abcd"}"#).unwrap();
        let app = AppState::new(AuthContext::mount(storage));
        assert!(matches!(app.screen, Screen::Dashboard));
    }

    #[test]
    fn corrupt_token_becomes_a_notice() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "{oops").unwrap();
        let app = AppState::new(AuthContext::mount(storage));
        assert!(matches!(app.screen, Screen::Register(_)));
        assert!(app.notice.as_deref().is_some_and(|n| n.starts_with("Signed out")));
    }
}

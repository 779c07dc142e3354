//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::dashboard::{self, DashboardAction};
use crate::features::login::{self, LoginAction, LoginState};
use crate::features::register::{self, RegisterAction, RegisterState};
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, id } => {
            app.tasks.state_mut(kind).on_started(id);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::RegistrationFinished(result) => {
            handle_registration_finished(app, result);
            vec![]
        }
        UiEvent::TokenChanged(token) => {
            let on_dashboard = matches!(app.screen, Screen::Dashboard);
            match (token.is_some(), on_dashboard) {
                (true, false) => {
                    app.tasks.clear_all();
                    app.screen = Screen::Dashboard;
                }
                (false, true) => app.reset(),
                (true, true) | (false, false) => {}
            }
            vec![]
        }
        UiEvent::Reset => {
            app.reset();
            vec![]
        }
        UiEvent::LogoutFailed { error } => {
            app.notice = Some(format!("Log out failed: {error}"));
            vec![]
        }
    }
}

fn handle_registration_finished(
    app: &mut AppState,
    result: Result<desk_core::register::RegistrationReceipt, desk_core::register::RegisterError>,
) {
    let Screen::Register(state) = &mut app.screen else {
        return;
    };
    if let Some(username) = register::handle_result(state, result) {
        app.screen = Screen::Login(LoginState {
            registered: Some(username),
        });
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if let Screen::Register(state) = &mut app.screen {
                register::handle_paste(state, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }
    // Any key dismisses a notice.
    app.notice = None;

    match &mut app.screen {
        Screen::Register(state) => match register::handle_key(state, key) {
            RegisterAction::None => vec![],
            RegisterAction::Quit => vec![UiEffect::Quit],
            RegisterAction::OpenLogin => {
                app.tasks.state_mut(TaskKind::Registration).clear();
                app.screen = Screen::Login(LoginState::default());
                vec![]
            }
            RegisterAction::Submit(request) => {
                let task = app.task_seq.next_id();
                vec![UiEffect::SubmitRegistration { task, request }]
            }
        },
        Screen::Login(_) => match login::handle_key(key) {
            LoginAction::None => vec![],
            LoginAction::BackToRegister => {
                app.screen = Screen::Register(RegisterState::new());
                vec![]
            }
        },
        Screen::Dashboard => match dashboard::handle_key(key) {
            DashboardAction::None => vec![],
            DashboardAction::Quit => vec![UiEffect::Quit],
            DashboardAction::Logout => vec![UiEffect::Logout],
        },
    }
}

#[cfg(test)]
mod tests {
    use desk_core::auth::AuthContext;
    use desk_core::register::{ErrorReason, Field, Outcome, RegisterError, RegistrationReceipt};
    use desk_core::storage::{MemoryStorage, SessionStorage};
    use desk_core::token::{TOKEN_KEY, Token};
    use serde_json::json;

    use super::*;
    use crate::common::{TaskCompleted, TaskId};

    fn app() -> AppState {
        AppState::new(AuthContext::mount(MemoryStorage::new()))
    }

    fn signed_in_app() -> AppState {
        let mut storage = MemoryStorage::new();
        storage
            .set(TOKEN_KEY, r#"{"username":"desk_user","role":"user"}"#)
            .unwrap();
        AppState::new(AuthContext::mount(storage))
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn press_ctrl(app: &mut AppState, c: char) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL,
            ))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_valid_form(app: &mut AppState) {
        type_text(app, "desk_user");
        press(app, KeyCode::Tab);
        type_text(app, "Aa1!aaaa");
        press(app, KeyCode::Tab);
        type_text(app, "Aa1!aaaa");
    }

    /// Submits a valid form and marks the task started, as the runtime would.
    fn submit(app: &mut AppState) -> TaskId {
        let effects = press(app, KeyCode::Enter);
        let [UiEffect::SubmitRegistration { task, .. }] = effects.as_slice() else {
            panic!("expected one submit effect, got {effects:?}");
        };
        let task = *task;
        update(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::Registration,
                id: task,
            },
        );
        task
    }

    fn complete(
        app: &mut AppState,
        id: TaskId,
        result: Result<RegistrationReceipt, RegisterError>,
    ) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Registration,
                completed: TaskCompleted {
                    id,
                    result: Box::new(UiEvent::RegistrationFinished(result)),
                },
            },
        )
    }

    fn form(app: &AppState) -> &desk_core::register::RegistrationForm {
        match &app.screen {
            Screen::Register(state) => &state.form,
            other => panic!("expected register screen, got {}", other.name()),
        }
    }

    #[test]
    fn successful_registration_opens_login() {
        let mut app = app();
        fill_valid_form(&mut app);
        let task = submit(&mut app);

        complete(&mut app, task, Ok(RegistrationReceipt(json!({"id": 1}))));

        match &app.screen {
            Screen::Login(login) => assert_eq!(login.registered.as_deref(), Some("desk_user")),
            other => panic!("expected login, got {}", other.name()),
        }
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn login_names_the_submitted_account() {
        let mut app = app();
        fill_valid_form(&mut app);
        let task = submit(&mut app);

        // Edits made while the request runs do not change what was sent.
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        type_text(&mut app, "_typo");
        assert_eq!(form(&app).value(Field::Username), "desk_user");

        complete(&mut app, task, Ok(RegistrationReceipt(json!({"id": 1}))));

        match &app.screen {
            Screen::Login(login) => assert_eq!(login.registered.as_deref(), Some("desk_user")),
            other => panic!("expected login, got {}", other.name()),
        }
    }

    #[test]
    fn failed_registration_stays_on_form() {
        let mut app = app();
        fill_valid_form(&mut app);
        let task = submit(&mut app);

        complete(&mut app, task, Err(RegisterError::UsernameTaken));

        let form = form(&app);
        assert_eq!(form.outcome(), Outcome::Error(ErrorReason::UsernameTaken));
        assert_eq!(form.value(Field::Username), "desk_user");
        assert!(form.can_submit());
    }

    #[test]
    fn double_enter_emits_one_request() {
        let mut app = app();
        fill_valid_form(&mut app);
        let _ = submit(&mut app);

        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert!(form(&app).is_in_flight());
    }

    #[test]
    fn invalid_form_emits_no_request() {
        let mut app = app();
        type_text(&mut app, "ab");
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(
            form(&app).outcome(),
            Outcome::Error(ErrorReason::InvalidEntry)
        );
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut app = app();
        fill_valid_form(&mut app);
        let task = submit(&mut app);

        // Leaving the form discards interest in the request.
        press_ctrl(&mut app, 'l');
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Register(_)));

        complete(&mut app, task, Ok(RegistrationReceipt(json!(null))));
        assert!(matches!(app.screen, Screen::Register(_)));
        assert_eq!(form(&app).outcome(), Outcome::Idle);
    }

    #[test]
    fn login_and_register_navigation() {
        let mut app = app();
        press_ctrl(&mut app, 'l');
        assert!(matches!(app.screen, Screen::Login(_)));
        // Plain keys do nothing on the sign-in screen.
        assert!(press(&mut app, KeyCode::Char('q')).is_empty());
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Register(_)));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(matches!(
            press(&mut app, KeyCode::Esc).as_slice(),
            [UiEffect::Quit]
        ));
        assert!(matches!(press_ctrl(&mut app, 'c').as_slice(), [UiEffect::Quit]));

        let mut app = signed_in_app();
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')).as_slice(),
            [UiEffect::Quit]
        ));
    }

    #[test]
    fn logout_emits_effect_and_reset_returns_to_register() {
        let mut app = signed_in_app();
        assert!(matches!(app.screen, Screen::Dashboard));

        let effects = press(&mut app, KeyCode::Char('l'));
        assert!(matches!(effects.as_slice(), [UiEffect::Logout]));

        // The runtime performs the clear, then honors the reset request.
        let _ = app.auth.set(None).unwrap();
        update(&mut app, UiEvent::Reset);
        assert!(matches!(app.screen, Screen::Register(_)));
        assert_eq!(form(&app).value(Field::Username), "");
    }

    #[test]
    fn token_broadcasts_route_between_screens() {
        let mut app = app();
        let token = Token::from_value(json!({"username": "x"})).unwrap();

        update(&mut app, UiEvent::TokenChanged(Some(token)));
        assert!(matches!(app.screen, Screen::Dashboard));

        update(&mut app, UiEvent::TokenChanged(None));
        assert!(matches!(app.screen, Screen::Register(_)));
    }

    #[test]
    fn logout_failure_is_shown_and_dismissed() {
        let mut app = signed_in_app();
        update(
            &mut app,
            UiEvent::LogoutFailed {
                error: "disk full".into(),
            },
        );
        assert!(app.notice.as_deref().is_some_and(|n| n.contains("disk full")));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.notice, None);
    }
}

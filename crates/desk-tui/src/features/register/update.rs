//! Registration screen reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use desk_core::register::{Field, Outcome, RegisterError, RegistrationReceipt, RegistrationRequest};

use super::state::{Control, RegisterState};

/// What the shell should do after a key on the registration screen.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterAction {
    None,
    Submit(RegistrationRequest),
    OpenLogin,
    Quit,
}

pub fn handle_key(state: &mut RegisterState, key: KeyEvent) -> RegisterAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => RegisterAction::Quit,
        KeyCode::Char('l') if ctrl => RegisterAction::OpenLogin,
        KeyCode::Enter => submit(state),
        KeyCode::Tab | KeyCode::Down => {
            state.focus_control(state.control.next());
            RegisterAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_control(state.control.prev());
            RegisterAction::None
        }
        KeyCode::Left | KeyCode::Right if state.control == Control::Role => {
            toggle_role(state);
            RegisterAction::None
        }
        KeyCode::Char(' ') if state.control == Control::Role => {
            toggle_role(state);
            RegisterAction::None
        }
        KeyCode::Char(' ') if state.control == Control::Submit => submit(state),
        KeyCode::Backspace => {
            if let Some(field) = state.control.field() {
                edit(state, field, |value| {
                    value.pop();
                });
            }
            RegisterAction::None
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            if let Some(field) = state.control.field() {
                edit(state, field, |value| value.push(c));
            }
            RegisterAction::None
        }
        _ => RegisterAction::None,
    }
}

/// Appends pasted text (first line only) to the focused field.
pub fn handle_paste(state: &mut RegisterState, text: &str) {
    let Some(field) = state.control.field() else {
        return;
    };
    let line = text.lines().next().unwrap_or_default();
    if !line.is_empty() {
        edit(state, field, |value| value.push_str(line));
    }
}

/// Applies a registration result. Returns the registered username on success.
pub fn handle_result(
    state: &mut RegisterState,
    result: Result<RegistrationReceipt, RegisterError>,
) -> Option<String> {
    let username = state.form.value(Field::Username).to_string();
    state.form.finish_submit(result);
    match state.form.outcome() {
        Outcome::Success => Some(username),
        Outcome::Idle | Outcome::Error(_) => None,
    }
}

fn submit(state: &mut RegisterState) -> RegisterAction {
    match state.form.begin_submit() {
        Ok(request) => RegisterAction::Submit(request),
        Err(rejected) => {
            tracing::debug!(%rejected, "submission not started");
            RegisterAction::None
        }
    }
}

fn toggle_role(state: &mut RegisterState) {
    let role = state.form.role().toggled();
    state.form.set_role(role);
}

fn edit(state: &mut RegisterState, field: Field, f: impl FnOnce(&mut String)) {
    if state.form.is_in_flight() {
        return;
    }
    // Typing after a failed submit brings focus back to the field.
    if state.form.focused() != Some(field) {
        state.form.focus(field);
    }
    let mut value = state.form.value(field).to_string();
    f(&mut value);
    state.form.update_field(field, value);
}

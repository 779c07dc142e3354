use desk_core::register::{Field, RegistrationForm};

/// Focusable controls on the registration screen, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Username,
    Password,
    ConfirmPassword,
    Role,
    Submit,
}

impl Control {
    const ORDER: [Control; 5] = [
        Control::Username,
        Control::Password,
        Control::ConfirmPassword,
        Control::Role,
        Control::Submit,
    ];

    /// The text field behind this control, if it is one.
    pub fn field(self) -> Option<Field> {
        match self {
            Control::Username => Some(Field::Username),
            Control::Password => Some(Field::Password),
            Control::ConfirmPassword => Some(Field::ConfirmPassword),
            Control::Role | Control::Submit => None,
        }
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|c| *c == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Registration screen: the form controller plus which control has focus.
#[derive(Debug, Clone)]
pub struct RegisterState {
    pub form: RegistrationForm,
    pub control: Control,
}

impl RegisterState {
    /// Fresh form with the username field focused.
    pub fn new() -> Self {
        let mut state = Self {
            form: RegistrationForm::new(),
            control: Control::Username,
        };
        state.focus_control(Control::Username);
        state
    }

    /// Moves focus and keeps the form's field focus in sync.
    pub fn focus_control(&mut self, control: Control) {
        self.control = control;
        match control.field() {
            Some(field) => self.form.focus(field),
            None => self.form.blur(),
        }
    }
}

impl Default for RegisterState {
    fn default() -> Self {
        Self::new()
    }
}

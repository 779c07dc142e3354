//! Registration: draft types, the form controller and the backend client.

mod client;
mod form;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use client::HttpRegistrationClient;
pub use form::{FieldMark, Outcome, RegistrationForm, SubmitRejected};

/// Account role sent with a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// The other role; used by the role toggle.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}' (expected 'user' or 'admin')")),
        }
    }
}

/// Text fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Username, Field::Password, Field::ConfirmPassword];

    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    /// Password fields are rendered masked.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `POST <registration_url>`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Body returned by the backend on success. Not interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt(pub Value);

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    InvalidEntry,
    UsernameTaken,
    RegistrationFailed,
    NoServerResponse,
}

impl ErrorReason {
    pub fn message(self) -> &'static str {
        match self {
            ErrorReason::InvalidEntry => "Invalid Entry",
            ErrorReason::UsernameTaken => "Username Taken",
            ErrorReason::RegistrationFailed => "Registration Failed",
            ErrorReason::NoServerResponse => "No Server Response",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("invalid entry")]
    InvalidEntry,
    #[error("username taken")]
    UsernameTaken,
    #[error("registration failed with HTTP {status}")]
    RegistrationFailed { status: u16 },
    #[error("no server response: {message}")]
    NoServerResponse { message: String },
}

impl RegisterError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            RegisterError::InvalidEntry => ErrorReason::InvalidEntry,
            RegisterError::UsernameTaken => ErrorReason::UsernameTaken,
            RegisterError::RegistrationFailed { .. } => ErrorReason::RegistrationFailed,
            RegisterError::NoServerResponse { .. } => ErrorReason::NoServerResponse,
        }
    }
}

/// Backend accepting new accounts.
pub trait RegistrationApi: Send + Sync {
    /// Performs exactly one registration attempt. No retries.
    fn register(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<RegistrationReceipt, RegisterError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_lowercase_role() {
        let request = RegistrationRequest {
            username: "abcd".to_string(),
            password: "Aa1!aaaa".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "abcd", "password": "Aa1!aaaa", "role": "admin"})
        );
    }

    #[test]
    fn debug_output_hides_passwords() {
        let request = RegistrationRequest {
            username: "abcd".to_string(),
            password: "Aa1!secret".to_string(),
            role: Role::User,
        };
        assert!(!format!("{request:?}").contains("secret"));

        let draft = RegistrationDraft {
            password: "Aa1!secret".to_string(),
            confirm_password: "Aa1!secret".to_string(),
            ..RegistrationDraft::default()
        };
        assert!(!format!("{draft:?}").contains("secret"));
    }

    #[test]
    fn role_parse_and_toggle() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::User.toggled(), Role::Admin);
    }

    #[test]
    fn error_reasons_carry_user_messages() {
        assert_eq!(RegisterError::UsernameTaken.reason().message(), "Username Taken");
        assert_eq!(
            RegisterError::RegistrationFailed { status: 500 }.reason().message(),
            "Registration Failed"
        );
        assert_eq!(
            RegisterError::NoServerResponse {
                message: "refused".into()
            }
            .reason()
            .to_string(),
            "No Server Response"
        );
        assert_eq!(RegisterError::InvalidEntry.reason().message(), "Invalid Entry");
    }
}

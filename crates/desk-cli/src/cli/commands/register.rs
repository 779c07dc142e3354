//! Non-interactive registration.
//!
//! Drives the same `RegistrationForm` controller as the interactive shell,
//! so validation and outcome messages are identical.

use anyhow::Result;
use desk_core::config::Config;
use desk_core::register::{Field, HttpRegistrationClient, Outcome, RegistrationForm, Role};
use desk_core::validate::{CONFIRM_HINT, PASSWORD_HINT, USERNAME_HINT};

pub struct RegisterArgs {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub role: Role,
}

pub async fn run(config: &Config, args: RegisterArgs) -> Result<()> {
    let client = HttpRegistrationClient::from_config(config)?;

    let mut form = RegistrationForm::new();
    form.update_field(Field::Username, args.username);
    form.update_field(Field::Password, args.password);
    form.update_field(Field::ConfirmPassword, args.confirm);
    form.set_role(args.role);
    let username = form.value(Field::Username).to_string();
    let problems = invalid_field_hints(&form);

    match form.submit(&client).await {
        Outcome::Success => {
            println!("Success! Registered '{username}' as {}.", args.role);
            Ok(())
        }
        Outcome::Error(reason) if problems.is_empty() => anyhow::bail!("{reason}"),
        Outcome::Error(reason) => anyhow::bail!("{reason}\n{}", problems.join("\n")),
        Outcome::Idle => anyhow::bail!("registration did not run"),
    }
}

fn invalid_field_hints(form: &RegistrationForm) -> Vec<String> {
    let flags = form.flags();
    let mut problems = Vec::new();
    if !flags.username_valid {
        problems.push(format!("  username: {USERNAME_HINT}"));
    }
    if !flags.password_valid {
        problems.push(format!("  password: {PASSWORD_HINT}"));
    }
    if !flags.passwords_match {
        problems.push(format!("  confirm: {CONFIRM_HINT}"));
    }
    problems
}

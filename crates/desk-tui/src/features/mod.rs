//! Feature slices for the TUI (state/update/render per screen).

pub mod dashboard;
pub mod login;
pub mod register;

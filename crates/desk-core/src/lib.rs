//! Core library for Smart Desk.
//!
//! Everything that does not touch the terminal lives here: configuration,
//! logging, session storage, the token store and auth context, field
//! validators and the registration form controller.

pub mod auth;
pub mod config;
pub mod logging;
pub mod register;
pub mod storage;
pub mod token;
pub mod validate;

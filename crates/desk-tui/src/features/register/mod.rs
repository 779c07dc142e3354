//! Registration screen: state, reducer and view over `RegistrationForm`.

mod render;
mod state;
mod update;

pub use render::render_register;
pub use state::{Control, RegisterState};
pub use update::{RegisterAction, handle_key, handle_paste, handle_result};

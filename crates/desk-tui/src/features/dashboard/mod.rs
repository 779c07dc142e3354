//! Dashboard shell: navigation bar and footer around the signed-in view.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
pub use render::{BRAND, FOOTER, render_dashboard};

#[derive(Debug, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Logout,
    Quit,
}

pub fn handle_key(key: KeyEvent) -> DashboardAction {
    match key.code {
        KeyCode::Char('l') => DashboardAction::Logout,
        KeyCode::Char('q') | KeyCode::Esc => DashboardAction::Quit,
        _ => DashboardAction::None,
    }
}

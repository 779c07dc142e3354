//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame` and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::truncate_with_ellipsis;
use crate::features::dashboard::render_dashboard;
use crate::features::login::render_login;
use crate::features::register::render_register;
use crate::state::{AppState, Screen};

/// Height of the notice line when a notice is present.
const NOTICE_HEIGHT: u16 = 1;

/// Renders the whole TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let notice_height = if app.notice.is_some() { NOTICE_HEIGHT } else { 0 };
    let main = Rect::new(
        area.x,
        area.y,
        area.width,
        area.height.saturating_sub(notice_height),
    );

    match &app.screen {
        Screen::Register(state) => render_register(frame, state, main, app.spinner_frame),
        Screen::Login(state) => render_login(frame, state, main),
        Screen::Dashboard => render_dashboard(frame, app.auth.current().as_ref(), main),
    }

    if let Some(notice) = &app.notice {
        let notice_area = Rect::new(area.x, main.y + main.height, area.width, notice_height);
        let text = truncate_with_ellipsis(notice, usize::from(area.width));
        let para = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(para, notice_area);
    }
}

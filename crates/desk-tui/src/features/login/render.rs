use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::LoginState;
use crate::common::render_utils::{InputHint, centered_area, render_container, render_hints};
use crate::common::text::truncate_with_ellipsis;

pub fn render_login(frame: &mut Frame, state: &LoginState, area: Rect) {
    let popup = centered_area(area, 56, 9);
    let inner = render_container(frame, popup, "Sign In", Color::Green);
    let width = usize::from(inner.width.saturating_sub(2));

    let mut lines = Vec::new();
    if let Some(username) = &state.registered {
        lines.push(Line::from(Span::styled(
            "Success!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&format!("Account '{username}' is registered."), width),
            Style::default().fg(Color::White),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Already registered?",
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Sign In with your Smart Desk account to continue.",
        Style::default().fg(Color::Gray),
    )));

    let body = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(2),
    );
    frame.render_widget(Paragraph::new(lines), body);

    let hints = [
        InputHint::new("Esc", "back to sign up"),
        InputHint::new("Ctrl+C", "quit"),
    ];
    render_hints(frame, inner, &hints, Color::Green);
}

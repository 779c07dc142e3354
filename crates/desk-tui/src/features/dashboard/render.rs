use desk_core::token::Token;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::render_utils::{InputHint, render_hints};
use crate::common::text::truncate_with_ellipsis;

pub const BRAND: &str = "Smart Desk";
pub const FOOTER: &str = "powered by Smart Desk";

const NAV_ITEM: &str = "Dashboard";

/// Renders the nav bar, an empty body and the footer. `token` is read only.
pub fn render_dashboard(frame: &mut Frame, token: Option<&Token>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_nav_bar(frame, token, chunks[0]);

    let body = Paragraph::new(Line::from(Span::styled(
        "Welcome to your desk.",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    let body_area = chunks[1];
    if body_area.height > 0 {
        let middle = Rect::new(body_area.x, body_area.y + body_area.height / 2, body_area.width, 1);
        frame.render_widget(body, middle);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        FOOTER,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);

    let hints = [InputHint::new("l", "log out"), InputHint::new("q", "quit")];
    render_hints(frame, chunks[3], &hints, Color::Cyan);
}

fn render_nav_bar(frame: &mut Frame, token: Option<&Token>, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let left = vec![
        Span::styled(
            format!(" {BRAND} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            NAV_ITEM,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ];
    let left_width: usize = left.iter().map(|span| span.content.width()).sum();

    let mut spans = left;
    if let Some(identity) = token.and_then(identity_label) {
        let room = usize::from(inner.width).saturating_sub(left_width + 2);
        let identity = truncate_with_ellipsis(&identity, room);
        let pad = usize::from(inner.width).saturating_sub(left_width + identity.width() + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(identity, Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// "name (role)", "name" or "role" depending on what the token carries.
fn identity_label(token: &Token) -> Option<String> {
    match (token.display_name(), token.role()) {
        (Some(name), Some(role)) => Some(format!("{name} ({role})")),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(role)) => Some(format!("signed in ({role})")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;

    fn screen_text(token: Option<&Token>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render_dashboard(frame, token, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_brand_nav_and_footer_without_token() {
        let text = screen_text(None);
        assert!(text.contains(BRAND));
        assert!(text.contains(NAV_ITEM));
        assert!(text.contains(FOOTER));
    }

    #[test]
    fn shows_identity_from_token() {
        let token = Token::from_value(json!({"username": "desk_admin", "role": "admin"})).unwrap();
        let text = screen_text(Some(&token));
        assert!(text.contains("desk_admin (admin)"));
    }

    #[test]
    fn identity_label_variants() {
        let opaque = Token::from_value(json!("opaque")).unwrap();
        assert_eq!(identity_label(&opaque), None);
        let role_only = Token::from_value(json!({"role": "user"})).unwrap();
        assert_eq!(identity_label(&role_only).as_deref(), Some("signed in (user)"));
    }
}

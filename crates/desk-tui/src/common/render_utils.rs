//! Shared rendering helpers used by the screens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::text::truncate_start_with_ellipsis;

/// Centers a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears `area` and draws a titled border. Returns the inner area.
pub fn render_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Keyboard hint shown in a hint bar.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// A single-line text input: "<prompt><text>█".
pub struct InputLine<'a> {
    /// Already masked for secret fields.
    pub value: &'a str,
    pub prompt: &'a str,
    pub focused: bool,
    pub border_color: Color,
}

pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let prompt_width = input.prompt.chars().count() as u16;
    let max_text_width = area.width.saturating_sub(prompt_width + 1) as usize;
    let prompt_style = if input.focused {
        Style::default()
            .fg(input.border_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![Span::styled(input.prompt.to_string(), prompt_style)];
    if !input.value.is_empty() {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(input.value, max_text_width),
            Style::default().fg(Color::White),
        ));
    }
    if input.focused {
        spans.push(Span::styled("█", Style::default().fg(input.border_color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a centered line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

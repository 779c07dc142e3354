//! Registration screen view.

use desk_core::register::{Field, FieldMark, Outcome, RegistrationForm, Role};
use desk_core::validate::{CONFIRM_HINT, PASSWORD_HINT, USERNAME_HINT};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{Control, RegisterState};
use crate::common::render_utils::{
    InputHint, InputLine, centered_area, render_container, render_hints, render_input_line,
};
use crate::common::text::{mask, wrap_words};

const FORM_WIDTH: u16 = 64;
const ACCENT: Color = Color::Cyan;
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// One row of the form layout. Notes may wrap over several lines.
enum Row<'a> {
    Outcome,
    Label(Field),
    Input(Field),
    Note(&'static str),
    Role,
    Submit,
    Text(Line<'a>),
    Blank,
}

impl Row<'_> {
    fn height(&self, width: u16) -> u16 {
        match self {
            Row::Note(text) => wrap_words(text, note_width(width)).len().max(1) as u16,
            _ => 1,
        }
    }
}

pub fn render_register(frame: &mut Frame, state: &RegisterState, area: Rect, spinner_frame: usize) {
    let form = &state.form;
    let rows = build_rows(form);

    let inner_width = FORM_WIDTH.saturating_sub(4);
    let content_height: u16 = rows.iter().map(|row| row.height(inner_width)).sum();
    // Border (2) + hint bar (1) + spacer (1).
    let popup = centered_area(area, FORM_WIDTH, content_height + 4);
    let inner = render_container(frame, popup, "Register", ACCENT);
    let body = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(1),
    );

    let mut y = body.y;
    for row in &rows {
        let height = row.height(body.width);
        if y + height > body.y + body.height {
            break;
        }
        let row_area = Rect::new(body.x, y, body.width, height);
        render_row(frame, row, row_area, state, spinner_frame);
        y += height;
    }

    let hints = [
        InputHint::new("Tab", "next"),
        InputHint::new("Enter", "sign up"),
        InputHint::new("Ctrl+L", "sign in"),
        InputHint::new("Esc", "quit"),
    ];
    render_hints(frame, inner, &hints, ACCENT);
}

fn build_rows(form: &RegistrationForm) -> Vec<Row<'static>> {
    let mut rows = vec![Row::Outcome, Row::Blank];
    for field in Field::ALL {
        rows.push(Row::Label(field));
        rows.push(Row::Input(field));
        if form.note_visible(field) {
            rows.push(Row::Note(hint_for(field)));
        }
        rows.push(Row::Blank);
    }
    rows.push(Row::Role);
    rows.push(Row::Blank);
    rows.push(Row::Submit);
    rows.push(Row::Blank);
    rows.push(Row::Text(Line::from(vec![
        Span::styled("Already registered? ", Style::default().fg(Color::Gray)),
        Span::styled(
            "Sign In",
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
        ),
    ])));
    rows
}

fn render_row(
    frame: &mut Frame,
    row: &Row<'_>,
    area: Rect,
    state: &RegisterState,
    spinner_frame: usize,
) {
    let form = &state.form;
    match row {
        Row::Outcome => frame.render_widget(Paragraph::new(outcome_line(form)), area),
        Row::Label(field) => frame.render_widget(Paragraph::new(label_line(form, *field)), area),
        Row::Input(field) => {
            let raw = form.value(*field);
            let value = if field.is_secret() {
                mask(raw)
            } else {
                raw.to_string()
            };
            let input = InputLine {
                value: &value,
                prompt: "> ",
                focused: state.control.field() == Some(*field),
                border_color: ACCENT,
            };
            render_input_line(frame, area, &input);
        }
        Row::Note(text) => {
            let style = Style::default().fg(Color::Yellow);
            let lines: Vec<Line<'static>> = wrap_words(text, note_width(area.width))
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    let prefix = if i == 0 { "ⓘ " } else { "  " };
                    Line::from(vec![Span::styled(prefix, style), Span::styled(line, style)])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), area);
        }
        Row::Role => frame.render_widget(Paragraph::new(role_line(state)), area),
        Row::Submit => {
            frame.render_widget(Paragraph::new(submit_line(state, spinner_frame)), area);
        }
        Row::Text(line) => frame.render_widget(Paragraph::new(line.clone()), area),
        Row::Blank => {}
    }
}

/// Width left for note text after the "ⓘ " prefix.
fn note_width(width: u16) -> usize {
    usize::from(width.saturating_sub(2).max(1))
}

fn hint_for(field: Field) -> &'static str {
    match field {
        Field::Username => USERNAME_HINT,
        Field::Password => PASSWORD_HINT,
        Field::ConfirmPassword => CONFIRM_HINT,
    }
}

fn outcome_line(form: &RegistrationForm) -> Line<'static> {
    match form.outcome() {
        Outcome::Idle => Line::from(""),
        Outcome::Success => Line::from(Span::styled(
            "Success!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Outcome::Error(reason) => {
            let mut style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
            if form.error_focused() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(format!(" {} ", reason.message()), style))
        }
    }
}

fn label_line(form: &RegistrationForm, field: Field) -> Line<'static> {
    let mark = match form.mark(field) {
        FieldMark::Valid => Span::styled(" ✓", Style::default().fg(Color::Green)),
        FieldMark::Invalid => Span::styled(" ✗", Style::default().fg(Color::Red)),
        FieldMark::Blank => Span::raw(""),
    };
    Line::from(vec![
        Span::styled(
            format!("{}:", field.label()),
            Style::default().fg(Color::White),
        ),
        mark,
    ])
}

fn role_line(state: &RegisterState) -> Line<'static> {
    let focused = state.control == Control::Role;
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let option = |role: Role| {
        let selected = state.form.role() == role;
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("{marker} {role}  "), style)
    };
    Line::from(vec![
        Span::styled("Role: ", label_style),
        option(Role::User),
        option(Role::Admin),
    ])
}

fn submit_line(state: &RegisterState, spinner_frame: usize) -> Line<'static> {
    let form = &state.form;
    if form.is_in_flight() {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{spinner} Signing up..."),
            Style::default().fg(Color::Yellow),
        ));
    }
    let mut style = if form.can_submit() {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if state.control == Control::Submit {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    Line::from(Span::styled("[ Sign Up ]", style))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn screen_text(state: &RegisterState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        terminal
            .draw(|frame| render_register(frame, state, frame.area(), 0))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn passwords_render_masked() {
        let mut state = RegisterState::new();
        state.form.update_field(Field::Username, "visible_name");
        state.form.update_field(Field::Password, "Secret1!");

        let text = screen_text(&state);
        assert!(text.contains("visible_name"));
        assert!(!text.contains("Secret1!"));
        assert!(text.contains("••••••••"));
    }

    #[test]
    fn focused_invalid_password_shows_hint() {
        let mut state = RegisterState::new();
        state.focus_control(Control::Password);
        let text = screen_text(&state);
        assert!(text.contains("8 to 24 characters"));
        assert!(text.contains("Sign Up"));
    }
}

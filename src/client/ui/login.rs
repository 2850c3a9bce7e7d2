//! Login screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::client::state::{ClientApp, LoginField, Screen};

use super::render::title;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Login {
        email,
        password,
        focus,
        error,
    } = &app.screen
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(13),
        Constraint::Percentage(30),
    ])
    .split(area);

    let field_style = |field: LoginField| {
        if *focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let cursor = |field: LoginField| if *focus == field { "_" } else { " " };
    let masked = "*".repeat(password.chars().count());

    let mut content = vec![
        Line::from(""),
        title(),
        Line::from(""),
        Line::from(Span::styled(
            "Log in to continue",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email:    ", Style::default().fg(Color::White)),
            Span::styled(email.clone(), field_style(LoginField::Email)),
            Span::styled(cursor(LoginField::Email), field_style(LoginField::Email)),
        ]),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::White)),
            Span::styled(masked, field_style(LoginField::Password)),
            Span::styled(cursor(LoginField::Password), field_style(LoginField::Password)),
        ]),
        Line::from(""),
    ];

    match error {
        Some(err) => content.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from("")),
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Tab] switch field  ·  [Enter] log in  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));
    content.push(Line::from(Span::styled(
        "No account? Run `quiz-client signup`",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::client::state::{ClientApp, Screen};

use super::{leaderboard, login, menu, quiz, results};

/// Render the client UI based on the current screen.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Login { .. } => login::render(frame, area, app),
        Screen::Menu { .. } => menu::render(frame, area, app),
        Screen::Loading { message } => render_loading(frame, area, message),
        Screen::QuizSelect { .. } => menu::render_quiz_select(frame, area, app),
        Screen::Quiz { .. } => quiz::render(frame, area, app),
        Screen::Results { .. } => results::render(frame, area, app),
        Screen::Leaderboards { .. } => leaderboard::render(frame, area, app),
        Screen::Failed { message, retry } => render_failed(frame, area, message, retry.is_some()),
    }
}

pub(super) fn title() -> Line<'static> {
    Line::from(Span::styled(
        "QUIZ CHALLENGE",
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        title(),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] back to menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_failed(frame: &mut Frame, area: Rect, message: &str, can_retry: bool) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(9),
        Constraint::Percentage(35),
    ])
    .split(area);

    let controls = if can_retry {
        "[R] retry  ·  [Esc] back to menu"
    } else {
        "[Enter] back to menu"
    };

    let content = vec![
        Line::from(""),
        title(),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(controls, Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}

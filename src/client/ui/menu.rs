//! Theme and mode selection, plus the bank quiz picker.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::client::state::{ClientApp, Screen};
use crate::models::QuizMode;

use super::render::title;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Menu { cursor, mode } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(2),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let greeting = vec![
        title(),
        Line::from(""),
        Line::from(vec![
            Span::styled("Welcome, ", Style::default().fg(Color::White)),
            Span::styled(
                app.username.clone().unwrap_or_default(),
                Style::default().fg(Color::Green).bold(),
            ),
            Span::styled("!", Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(greeting).alignment(Alignment::Center),
        chunks[0],
    );

    render_mode(frame, chunks[1], *mode);
    render_themes(frame, chunks[2], &app.themes, *cursor);

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(notice.as_str())
                .alignment(Alignment::Center)
                .fg(Color::Yellow),
            chunks[3],
        );
    }

    let controls = Paragraph::new(
        "j/k select theme  ·  [M] mode  ·  [Enter] play  ·  [L] leaderboards  ·  [O] log out  ·  [Q] quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[4]);
}

fn render_mode(frame: &mut Frame, area: Rect, mode: QuizMode) {
    let style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let line = Line::from(vec![
        Span::styled(" Theme Challenge ", style(mode == QuizMode::ThemeChallenge)),
        Span::raw("   "),
        Span::styled(" Beat the AI ", style(mode == QuizMode::HeadToHead)),
    ]);

    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_themes(frame: &mut Frame, area: Rect, themes: &[String], selected: usize) {
    let lines: Vec<Line> = themes
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{}{}", prefix, theme), style))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Themes ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

pub fn render_quiz_select(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::QuizSelect { quizzes, cursor } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    frame.render_widget(
        Paragraph::new("Several quizzes exist for this theme")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).bold()),
        chunks[0],
    );

    let lines: Vec<Line> = quizzes
        .iter()
        .enumerate()
        .map(|(i, quiz)| {
            let style = if i == *cursor {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == *cursor { "> " } else { "  " };
            Line::from(Span::styled(
                format!(
                    "{}Quiz #{}  ({} questions)",
                    prefix,
                    quiz.quiz_id,
                    quiz.questions.len()
                ),
                style,
            ))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Quizzes ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        ),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("j/k select  ·  [Enter] start  ·  [Esc] back")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray),
        chunks[2],
    );
}

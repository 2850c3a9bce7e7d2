//! Quiz screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, Screen};
use crate::models::{OptionLetter, QuizMode};
use crate::session::{HEAD_TO_HEAD_ROUNDS, QUESTION_TIME_BUDGET};

/// Render the quiz screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Quiz {
        cursor,
        confirm_submit,
    } = &app.screen
    else {
        return;
    };
    let Some(session) = app.session() else {
        return;
    };
    let Some(question) = session.current_question() else {
        let waiting = Paragraph::new("Waiting for question...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2), // Progress
        Constraint::Length(1), // Countdown
        Constraint::Length(7), // Question text
        Constraint::Min(6),    // Options
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let total = match session.mode() {
        QuizMode::ThemeChallenge => session.questions().len(),
        QuizMode::HeadToHead => HEAD_TO_HEAD_ROUNDS,
    };
    let mut progress = format!(
        "Question {} of {}  ·  {}  ·  {}",
        session.current_index() + 1,
        total,
        question.theme,
        question.difficulty
    );
    if session.mode() == QuizMode::HeadToHead {
        progress.push_str(&format!("  ·  Score {}", session.score()));
    }
    frame.render_widget(
        Paragraph::new(progress)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).bold()),
        chunks[0],
    );

    render_countdown(frame, chunks[1], app.time_remaining());
    render_question_text(frame, chunks[2], &question.text);
    render_options(
        frame,
        chunks[3],
        &question.options,
        *cursor,
        session.current_response(),
    );
    render_controls(frame, chunks[4], session.is_last_question());

    if *confirm_submit {
        let answered = session.responses().iter().filter(|r| r.is_some()).count();
        render_confirm(frame, area, answered, session.responses().len());
    }
}

fn render_countdown(frame: &mut Frame, area: Rect, remaining: Option<u32>) {
    let Some(remaining) = remaining else {
        frame.render_widget(
            Paragraph::new("Time's up")
                .alignment(Alignment::Center)
                .fg(Color::Red),
            area,
        );
        return;
    };

    let color = match remaining {
        0..=5 => Color::Red,
        6..=10 => Color::Yellow,
        _ => Color::Green,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(remaining) / f64::from(QUESTION_TIME_BUDGET))
        .label(format!("{}s", remaining));
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    cursor: usize,
    answered: Option<OptionLetter>,
) {
    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_chosen = answered.is_some() && OptionLetter::from_option(option) == answered;
            let prefix = if i == cursor { "> " } else { "  " };
            let marker = if is_chosen { "  ✓" } else { "" };

            let style = if is_chosen {
                Style::default().fg(Color::Green).bold()
            } else if i == cursor {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(option.clone(), style),
                Span::styled(marker, style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, last: bool) {
    let next = if last { "[N] submit" } else { "[N] next" };
    let widget = Paragraph::new(format!(
        "j/k move  ·  Enter or A-D answer  ·  {}  ·  Esc abandon",
        next
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn render_confirm(frame: &mut Frame, area: Rect, answered: usize, total: usize) {
    let popup = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(7),
        Constraint::Percentage(35),
    ])
    .split(area)[1];
    let popup = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .split(popup)[1];

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Submit quiz? {} of {} answered.", answered, total),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Y] submit  ·  [N] keep reviewing",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Confirm ")
                .title_style(Style::default().fg(Color::Yellow)),
        ),
        popup,
    );
}

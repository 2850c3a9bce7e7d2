//! Results screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use serde_json::Value;

use crate::client::state::{ClientApp, Screen};
use crate::models::{AttemptedQuiz, QuizScore, Question, performance_message};

const QUESTION_PREVIEW_LENGTH: usize = 50;

/// Render the results screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Results {
        score,
        attempted,
        local,
        scroll,
    } = &app.screen
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(8), // Score summary
        Constraint::Min(8),    // Answers breakdown
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let questions = app.session().map(|session| session.questions()).unwrap_or(&[]);

    render_score_summary(frame, chunks[0], score, *local);
    render_answers(frame, chunks[1], score, questions, attempted.as_ref(), *scroll);
    render_controls(frame, chunks[2]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: &QuizScore, local: bool) {
    let percentage = score.percentage();
    let grade_color = match percentage {
        80.. => Color::Green,
        60..=79 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    };

    let mut content = vec![
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  ({}%)", score.score, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            performance_message(percentage),
            Style::default().fg(grade_color),
        )),
        Line::from(Span::styled(
            format!(
                "Theme {}  ·  Accuracy {}  ·  Time {}",
                score.theme, score.accuracy, score.time_taken
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    if local {
        content.push(Line::from(Span::styled(
            "Detailed score unavailable, showing the submitted answers",
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_answers(
    frame: &mut Frame,
    area: Rect,
    score: &QuizScore,
    questions: &[Question],
    attempted: Option<&AttemptedQuiz>,
    scroll: usize,
) {
    let lines: Vec<Line> = score
        .user_response
        .iter()
        .enumerate()
        .map(|(index, response)| {
            let text = attempted
                .and_then(|details| details.questions.get(index))
                .and_then(detail_text)
                .or_else(|| questions.get(index).map(|question| question.text.clone()))
                .unwrap_or_default();
            let correct = attempted
                .and_then(|details| details.questions.get(index))
                .and_then(|detail| detail.get("correct_option").or_else(|| detail.get("correct_answer")))
                .and_then(Value::as_str)
                .map(str::to_string);

            let answer = if response.is_empty() { "-" } else { response.as_str() };
            let answer_color = match &correct {
                Some(correct) if correct.starts_with(answer) => Color::Green,
                Some(_) => Color::Red,
                None => Color::White,
            };

            let mut spans = vec![
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(&text), Style::default().fg(Color::Gray)),
                Span::styled("  you: ", Style::default().fg(Color::DarkGray)),
                Span::styled(answer.to_string(), Style::default().fg(answer_color).bold()),
            ];
            if let Some(correct) = correct {
                spans.push(Span::styled(
                    format!("  correct: {}", correct),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Your Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));

    frame.render_widget(widget, area);
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) => Some(text.clone()),
        other => other
            .get("question")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  [L] leaderboards  ·  [Enter] menu")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

//! Leaderboards screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Tabs};

use crate::client::state::{ClientApp, Screen};
use crate::models::LeaderboardEntry;

const SHOWN_ENTRIES: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Screen::Leaderboards { boards, tab } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let mut titles = vec!["All Time".to_string(), "Today".to_string()];
    if let Some((theme, _)) = &boards.theme {
        titles.push(format!("Theme: {}", theme));
    }
    let tabs = Tabs::new(titles)
        .select(*tab)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold());
    frame.render_widget(tabs, chunks[0]);

    let entries: &[LeaderboardEntry] = match (*tab, &boards.theme) {
        (0, _) => &boards.overall,
        (1, _) => &boards.daily,
        (_, Some((_, entries))) => entries,
        (_, None) => &[],
    };
    render_entries(frame, chunks[1], entries, app.username.as_deref());

    frame.render_widget(
        Paragraph::new("h/l switch board  ·  [Esc] back")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray),
        chunks[2],
    );
}

fn render_entries(frame: &mut Frame, area: Rect, entries: &[LeaderboardEntry], you: Option<&str>) {
    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled(
            "No scores yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        entries
            .iter()
            .take(SHOWN_ENTRIES)
            .map(|entry| {
                let rank_style = match entry.rank {
                    1 => Style::default().fg(Color::Yellow).bold(),
                    2 => Style::default().fg(Color::White),
                    3 => Style::default().fg(Color::LightRed),
                    _ => Style::default().fg(Color::DarkGray),
                };
                let is_you = you == Some(entry.username.as_str());
                let you_marker = if is_you { " <- You" } else { "" };

                Line::from(vec![
                    Span::styled(format!("  {:>2}. ", entry.rank), rank_style),
                    Span::styled(
                        format!("{:<16}", entry.username),
                        if is_you {
                            Style::default().fg(Color::Green).bold()
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                    Span::styled(
                        format!("{:>6}", entry.score),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(you_marker, Style::default().fg(Color::Green)),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

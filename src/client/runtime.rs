//! TUI event loop.
//!
//! Input, rendering and every state change happen on this loop. Gateway
//! calls run as spawned tasks and report back over the same channel the
//! question timers use.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::{ApiError, AppError};
use crate::gateway::Gateway;
use crate::models::QuizMode;
use crate::protocol::DEFAULT_QUESTION_COUNT;
use crate::terminal::Tui;

use super::state::{AppEvent, ClientApp, Command, Leaderboards, Response};
use super::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);
const TICK: Duration = Duration::from_secs(1);

/// How `play` was invoked.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub theme: Option<String>,
    pub mode: QuizMode,
    pub question_count: usize,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            theme: None,
            mode: QuizMode::ThemeChallenge,
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

/// Run the quiz TUI until the user quits.
pub async fn run(gateway: Gateway, options: PlayOptions) -> Result<(), AppError> {
    let (tx, rx) = mpsc::unbounded_channel::<AppEvent>();
    let username = gateway.auth().username().await;
    let mut app = ClientApp::new(username, tx.clone(), TICK).with_quiz(
        options.theme,
        options.mode,
        options.question_count,
    );

    let commands = app.start();
    dispatch(&gateway, &tx, app.generation(), commands);

    let mut tui = Tui::enter()?;
    let result = event_loop(&mut tui, &mut app, &gateway, &tx, rx).await;
    tui.exit()?;
    result
}

async fn event_loop(
    tui: &mut Tui,
    app: &mut ClientApp,
    gateway: &Gateway,
    tx: &UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<(), AppError> {
    while !app.should_quit {
        let view: &ClientApp = app;
        tui.terminal().draw(|frame| ui::render(frame, view))?;

        while let Ok(event) = rx.try_recv() {
            let commands = app.apply(event);
            dispatch(gateway, tx, app.generation(), commands);
        }

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let commands = app.handle_key(key.code);
                dispatch(gateway, tx, app.generation(), commands);
            }
        }

        // Let spawned requests and timers make progress between polls.
        tokio::task::yield_now().await;
    }
    Ok(())
}

fn dispatch(
    gateway: &Gateway,
    tx: &UnboundedSender<AppEvent>,
    generation: u64,
    commands: Vec<Command>,
) {
    for command in commands {
        let gateway = gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = execute(&gateway, command).await;
            if tx.send(AppEvent::Response { generation, response }).is_err() {
                tracing::debug!("UI loop gone, dropping response");
            }
        });
    }
}

async fn execute(gateway: &Gateway, command: Command) -> Response {
    match command {
        Command::Login { email, password } => {
            Response::LoggedIn(gateway.login(&email, &password).await)
        }
        Command::Logout => {
            gateway.logout().await;
            Response::LoggedOut
        }
        Command::LoadThemes => Response::Themes(gateway.fetch_all_themes().await),
        Command::LoadThemeQuiz { theme, count } => {
            Response::ThemeQuiz(gateway.load_theme_quiz(&theme, count).await)
        }
        Command::FetchAiQuestion { theme, score } => {
            Response::AiQuestion(gateway.fetch_next_ai_question(Some(&theme), score).await)
        }
        Command::Submit(submission) => Response::Submitted(gateway.submit_quiz(&submission).await),
        Command::LoadScore { quiz_id, theme } => {
            let (score, attempted) = tokio::join!(
                gateway.view_quiz_score(&quiz_id, &theme),
                gateway.view_attempted_quiz(&quiz_id, &theme),
            );
            let attempted = match attempted {
                Ok(details) => details,
                Err(err) => {
                    tracing::warn!("Attempt details unavailable: {}", err);
                    None
                }
            };
            Response::Score { score, attempted }
        }
        Command::LoadLeaderboards { theme } => {
            Response::Leaderboards(load_leaderboards(gateway, theme).await)
        }
    }
}

async fn load_leaderboards(
    gateway: &Gateway,
    theme: Option<String>,
) -> Result<Leaderboards, ApiError> {
    let (overall, daily) = tokio::join!(
        gateway.fetch_overall_leaderboard(),
        gateway.fetch_daily_leaderboard()
    );
    let theme = match theme {
        Some(theme) => {
            let entries = gateway.fetch_theme_leaderboard(&theme).await?;
            Some((theme, entries))
        }
        None => None,
    };
    Ok(Leaderboards {
        overall: overall?,
        daily: daily?,
        theme,
    })
}

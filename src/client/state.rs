//! Client state management.
//!
//! `ClientApp` is driven from the UI loop only. Keys go through
//! [`ClientApp::handle_key`], finished network calls and timer events
//! through [`ClientApp::apply`]. Both return the [`Command`]s the runtime
//! must run next.

use std::time::Duration;

use chrono::{Local, Utc};
use crossterm::event::KeyCode;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::ApiError;
use crate::models::{
    AttemptedQuiz, AuthSession, BankQuiz, LeaderboardEntry, OptionLetter, Question, QuizChoice,
    QuizId, QuizMode, QuizScore, SubmitOutcome,
};
use crate::protocol::{DEFAULT_QUESTION_COUNT, DEFAULT_THEMES};
use crate::session::{
    Advance, AdvancePhase, QUESTION_TIME_BUDGET, QuestionTimer, QuizSession, Submission,
    TimerEvent,
};

const MAX_INPUT_LENGTH: usize = 64;

/// Side effects requested by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    LoadThemes,
    LoadThemeQuiz { theme: String, count: usize },
    FetchAiQuestion { theme: String, score: u32 },
    Submit(Submission),
    LoadScore { quiz_id: String, theme: String },
    LoadLeaderboards { theme: Option<String> },
}

/// Leaderboards shown together on one screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboards {
    pub overall: Vec<LeaderboardEntry>,
    pub daily: Vec<LeaderboardEntry>,
    pub theme: Option<(String, Vec<LeaderboardEntry>)>,
}

/// Result of a finished command.
#[derive(Debug, Clone)]
pub enum Response {
    LoggedIn(Result<AuthSession, ApiError>),
    LoggedOut,
    Themes(Result<Vec<String>, ApiError>),
    ThemeQuiz(Result<QuizChoice, ApiError>),
    AiQuestion(Result<Question, ApiError>),
    Submitted(Result<SubmitOutcome, ApiError>),
    Score {
        score: Result<QuizScore, ApiError>,
        attempted: Option<AttemptedQuiz>,
    },
    Leaderboards(Result<Leaderboards, ApiError>),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Timer(TimerEvent),
    /// A command finished. `generation` is the navigation generation it
    /// was issued under.
    Response { generation: u64, response: Response },
}

impl From<TimerEvent> for AppEvent {
    fn from(event: TimerEvent) -> Self {
        Self::Timer(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Current screen and its view-local state.
#[derive(Debug, Clone)]
pub enum Screen {
    Login {
        email: String,
        password: String,
        focus: LoginField,
        error: Option<String>,
    },
    Menu {
        cursor: usize,
        mode: QuizMode,
    },
    Loading {
        message: String,
    },
    QuizSelect {
        quizzes: Vec<BankQuiz>,
        cursor: usize,
    },
    Quiz {
        cursor: usize,
        confirm_submit: bool,
    },
    Results {
        score: QuizScore,
        attempted: Option<AttemptedQuiz>,
        /// Score data was computed locally because the backend had none.
        local: bool,
        scroll: usize,
    },
    Leaderboards {
        boards: Leaderboards,
        tab: usize,
    },
    Failed {
        message: String,
        retry: Option<Command>,
    },
}

impl Screen {
    pub fn login(error: Option<String>) -> Self {
        Self::Login {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            error,
        }
    }

    fn menu(mode: QuizMode) -> Self {
        Self::Menu { cursor: 0, mode }
    }

    fn loading(message: &str) -> Self {
        Self::Loading {
            message: message.to_string(),
        }
    }

    fn quiz() -> Self {
        Self::Quiz {
            cursor: 0,
            confirm_submit: false,
        }
    }
}

/// Client application state.
pub struct ClientApp {
    pub screen: Screen,
    pub username: Option<String>,
    pub themes: Vec<String>,
    /// Non-blocking message shown on the menu.
    pub notice: Option<String>,
    pub should_quit: bool,
    session: Option<QuizSession>,
    theme: String,
    mode: QuizMode,
    question_count: usize,
    /// Theme to start playing as soon as the user is logged in.
    autostart: Option<String>,
    submitted: Option<SubmitOutcome>,
    timer: Option<QuestionTimer>,
    timer_events: UnboundedSender<AppEvent>,
    tick: Duration,
    generation: u64,
}

impl ClientApp {
    /// `tick` is the length of one countdown step.
    pub fn new(username: Option<String>, timer_events: UnboundedSender<AppEvent>, tick: Duration) -> Self {
        Self {
            screen: Screen::login(None),
            username,
            themes: default_themes(),
            notice: None,
            should_quit: false,
            session: None,
            theme: String::new(),
            mode: QuizMode::ThemeChallenge,
            question_count: DEFAULT_QUESTION_COUNT,
            autostart: None,
            submitted: None,
            timer: None,
            timer_events,
            tick,
            generation: 0,
        }
    }

    /// Preselect how quizzes are played. With a theme, the quiz starts
    /// right after login instead of waiting on the menu.
    pub fn with_quiz(mut self, theme: Option<String>, mode: QuizMode, question_count: usize) -> Self {
        self.autostart = theme;
        self.mode = mode;
        self.question_count = question_count.max(1);
        self
    }

    /// Commands to run at startup. A restored session skips the login
    /// screen.
    pub fn start(&mut self) -> Vec<Command> {
        if self.username.is_some() {
            self.enter_home()
        } else {
            self.navigate(Screen::login(None));
            Vec::new()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Seconds left on the current question, if a countdown is running.
    pub fn time_remaining(&self) -> Option<u32> {
        self.timer.as_ref().map(QuestionTimer::remaining)
    }

    /// Replace the screen. Responses to commands issued before this point
    /// are dropped when they arrive.
    fn navigate(&mut self, screen: Screen) {
        self.generation += 1;
        self.screen = screen;
    }

    fn enter_home(&mut self) -> Vec<Command> {
        let mut commands = self.enter_menu();
        if let Some(theme) = self.autostart.take() {
            let mode = self.mode;
            commands.extend(self.begin_quiz(theme, mode));
        }
        commands
    }

    fn enter_menu(&mut self) -> Vec<Command> {
        self.stop_timer();
        self.session = None;
        self.submitted = None;
        self.navigate(Screen::menu(self.mode));
        vec![Command::LoadThemes]
    }

    fn fail(&mut self, err: &ApiError, retry: Option<Command>) {
        tracing::warn!("Request failed: {}", err);
        let retry = retry.filter(|_| err.is_retryable());
        self.navigate(Screen::Failed {
            message: err.to_string(),
            retry,
        });
    }

    fn expire_session(&mut self) {
        tracing::info!("Session expired, returning to login");
        self.stop_timer();
        self.session = None;
        self.submitted = None;
        self.username = None;
        self.navigate(Screen::login(Some(
            ApiError::Unauthorized(String::new()).to_string(),
        )));
    }

    fn start_timer(&mut self, question: usize) {
        self.stop_timer();
        self.timer = Some(QuestionTimer::start(
            question,
            QUESTION_TIME_BUDGET,
            self.tick,
            self.timer_events.clone(),
        ));
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Vec<Command> {
        match self.screen {
            Screen::Login { .. } => self.login_key(key),
            Screen::Menu { .. } => self.menu_key(key),
            Screen::Loading { .. } => {
                if key == KeyCode::Esc {
                    return self.enter_menu();
                }
                Vec::new()
            }
            Screen::QuizSelect { .. } => self.quiz_select_key(key),
            Screen::Quiz { .. } => self.quiz_key(key),
            Screen::Results { .. } => self.results_key(key),
            Screen::Leaderboards { .. } => self.leaderboards_key(key),
            Screen::Failed { .. } => self.failed_key(key),
        }
    }

    fn login_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Login {
            email,
            password,
            focus,
            error,
        } = &mut self.screen
        else {
            return Vec::new();
        };
        let field = match focus {
            LoginField::Email => &mut *email,
            LoginField::Password => &mut *password,
        };

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                *focus = match focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            KeyCode::Backspace => {
                *error = None;
                field.pop();
            }
            KeyCode::Char(c) => {
                *error = None;
                if field.len() < MAX_INPUT_LENGTH {
                    field.push(c);
                }
            }
            KeyCode::Enter => {
                if email.trim().is_empty() || password.is_empty() {
                    *error = Some("Email and password are required".to_string());
                    return Vec::new();
                }
                let command = Command::Login {
                    email: email.trim().to_string(),
                    password: password.clone(),
                };
                self.navigate(Screen::loading("Logging in..."));
                return vec![command];
            }
            _ => {}
        }
        Vec::new()
    }

    fn menu_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Menu { cursor, mode } = &mut self.screen else {
            return Vec::new();
        };
        let count = self.themes.len().max(1);

        match key {
            KeyCode::Up | KeyCode::Char('k') => *cursor = (*cursor + count - 1) % count,
            KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1) % count,
            KeyCode::Tab | KeyCode::Char('m') => {
                *mode = match mode {
                    QuizMode::ThemeChallenge => QuizMode::HeadToHead,
                    QuizMode::HeadToHead => QuizMode::ThemeChallenge,
                };
                self.mode = *mode;
            }
            KeyCode::Enter => {
                let theme = self
                    .themes
                    .get(*cursor)
                    .cloned()
                    .unwrap_or_else(|| "random".to_string());
                let mode = *mode;
                return self.begin_quiz(theme, mode);
            }
            KeyCode::Char('l') => {
                let theme = self.themes.get(*cursor).cloned();
                self.navigate(Screen::loading("Loading leaderboards..."));
                return vec![Command::LoadLeaderboards { theme }];
            }
            KeyCode::Char('o') => {
                self.navigate(Screen::loading("Logging out..."));
                return vec![Command::Logout];
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        Vec::new()
    }

    fn begin_quiz(&mut self, theme: String, mode: QuizMode) -> Vec<Command> {
        tracing::info!("Starting {} quiz on {}", mode, theme);
        self.theme = theme.clone();
        self.mode = mode;
        self.submitted = None;
        match mode {
            QuizMode::ThemeChallenge => {
                self.session = None;
                self.navigate(Screen::loading("Loading quiz..."));
                vec![Command::LoadThemeQuiz {
                    theme,
                    count: self.question_count,
                }]
            }
            QuizMode::HeadToHead => {
                let mut session = QuizSession::initialize(mode, theme.clone(), 0, now());
                session.load_questions(QuizId::ephemeral(Utc::now().timestamp_millis()), Vec::new());
                self.session = Some(session);
                self.navigate(Screen::loading("The AI is picking a question..."));
                vec![Command::FetchAiQuestion { theme, score: 0 }]
            }
        }
    }

    fn start_bank_quiz(&mut self, quiz: BankQuiz) -> Vec<Command> {
        if quiz.questions.is_empty() {
            self.navigate(Screen::Failed {
                message: "This quiz has no questions".to_string(),
                retry: None,
            });
            return Vec::new();
        }
        let mut session = QuizSession::initialize(
            QuizMode::ThemeChallenge,
            self.theme.clone(),
            quiz.questions.len(),
            now(),
        );
        session.load_questions(QuizId::Bank(quiz.quiz_id), quiz.questions);
        self.session = Some(session);
        self.navigate(Screen::quiz());
        self.start_timer(0);
        Vec::new()
    }

    fn quiz_select_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::QuizSelect { quizzes, cursor } = &mut self.screen else {
            return Vec::new();
        };
        let count = quizzes.len().max(1);

        match key {
            KeyCode::Up | KeyCode::Char('k') => *cursor = (*cursor + count - 1) % count,
            KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1) % count,
            KeyCode::Enter => {
                if *cursor < quizzes.len() {
                    let quiz = quizzes.remove(*cursor);
                    return self.start_bank_quiz(quiz);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return self.enter_menu(),
            _ => {}
        }
        Vec::new()
    }

    fn quiz_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Quiz {
            cursor,
            confirm_submit,
        } = &mut self.screen
        else {
            return Vec::new();
        };
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        if *confirm_submit {
            return match key {
                KeyCode::Enter | KeyCode::Char('y') => self.submit(),
                KeyCode::Esc | KeyCode::Char('n') => {
                    *confirm_submit = false;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        let options = session
            .current_question()
            .map(|question| question.options.clone())
            .unwrap_or_default();
        let count = options.len().max(1);
        let index = session.current_index();

        match key {
            KeyCode::Up | KeyCode::Char('k') => *cursor = (*cursor + count - 1) % count,
            KeyCode::Down | KeyCode::Char('j') => *cursor = (*cursor + 1) % count,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(letter) = options.get(*cursor).and_then(|o| OptionLetter::from_option(o)) {
                    session.record_answer(index, letter);
                }
            }
            KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
                let letter = OptionLetter::from_option(&c.to_ascii_uppercase().to_string());
                if let Some(letter) = letter {
                    if let Some(position) = session
                        .current_question()
                        .and_then(|question| question.option_index(letter))
                    {
                        *cursor = position;
                    }
                    session.record_answer(index, letter);
                }
            }
            KeyCode::Right | KeyCode::Char('n') => {
                // The countdown may already have claimed this question.
                let claimed = self.timer.as_ref().is_none_or(QuestionTimer::claim_manual);
                if claimed {
                    return self.advance_question();
                }
            }
            KeyCode::Esc => {
                tracing::info!("Quiz abandoned");
                return self.enter_menu();
            }
            _ => {}
        }
        Vec::new()
    }

    /// Move past the current question after the advance gate was won.
    fn advance_question(&mut self) -> Vec<Command> {
        if let Some(timer) = &self.timer {
            timer.complete();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        match session.advance() {
            Advance::Moved(index) => {
                self.screen = Screen::quiz();
                self.start_timer(index);
                Vec::new()
            }
            Advance::NeedsQuestion => {
                let command = Command::FetchAiQuestion {
                    theme: session.theme().to_string(),
                    score: session.score(),
                };
                self.stop_timer();
                self.navigate(Screen::loading("The AI is picking a question..."));
                vec![command]
            }
            Advance::AtEnd => {
                self.stop_timer();
                if let Screen::Quiz { confirm_submit, .. } = &mut self.screen {
                    *confirm_submit = true;
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        self.stop_timer();
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let submission = session.finalize(now());
        self.navigate(Screen::loading("Submitting answers..."));
        vec![Command::Submit(submission)]
    }

    fn results_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Results { scroll, score, .. } = &mut self.screen else {
            return Vec::new();
        };
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = score.user_response.len().saturating_sub(1);
                *scroll = (*scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Char('l') => {
                let theme = Some(score.theme.clone()).filter(|theme| !theme.is_empty());
                self.navigate(Screen::loading("Loading leaderboards..."));
                return vec![Command::LoadLeaderboards { theme }];
            }
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => return self.enter_menu(),
            _ => {}
        }
        Vec::new()
    }

    fn leaderboards_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Leaderboards { tab, boards } = &mut self.screen else {
            return Vec::new();
        };
        let tabs = if boards.theme.is_some() { 3 } else { 2 };
        match key {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => *tab = (*tab + 1) % tabs,
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => *tab = (*tab + tabs - 1) % tabs,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return self.enter_menu(),
            _ => {}
        }
        Vec::new()
    }

    fn failed_key(&mut self, key: KeyCode) -> Vec<Command> {
        let Screen::Failed { retry, .. } = &mut self.screen else {
            return Vec::new();
        };
        match key {
            KeyCode::Char('r') | KeyCode::Enter => {
                if let Some(command) = retry.take() {
                    tracing::info!("Retrying {}", command_name(&command));
                    self.navigate(Screen::loading("Retrying..."));
                    return vec![command];
                }
                self.enter_menu()
            }
            KeyCode::Esc | KeyCode::Char('q') => self.enter_menu(),
            _ => Vec::new(),
        }
    }

    pub fn apply(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Timer(TimerEvent::Tick { .. }) => Vec::new(),
            AppEvent::Timer(TimerEvent::Expired { question }) => self.expire_question(question),
            AppEvent::Response {
                generation,
                response,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping stale response from generation {} (now {})",
                        generation,
                        self.generation
                    );
                    return Vec::new();
                }
                self.apply_response(response)
            }
        }
    }

    /// The countdown won the gate. Only honoured for the timer currently
    /// running on the question on screen.
    fn expire_question(&mut self, question: usize) -> Vec<Command> {
        let current = self
            .timer
            .as_ref()
            .filter(|timer| timer.question() == question && timer.phase() == AdvancePhase::Advancing);
        let on_question = self.session.as_ref().map(QuizSession::current_index) == Some(question);
        if current.is_none() || !on_question || !matches!(self.screen, Screen::Quiz { .. }) {
            tracing::debug!("Ignoring expiry for question {}", question);
            return Vec::new();
        }
        tracing::info!("Time ran out on question {}", question + 1);
        self.advance_question()
    }

    fn apply_response(&mut self, response: Response) -> Vec<Command> {
        if let Some(err) = response_error(&response) {
            if err.is_unauthorized() && !matches!(response, Response::LoggedIn(_)) {
                self.expire_session();
                return Vec::new();
            }
        }

        match response {
            Response::LoggedIn(Ok(session)) => {
                self.username = Some(session.username);
                self.enter_home()
            }
            Response::LoggedIn(Err(err)) => {
                self.navigate(Screen::login(Some(err.to_string())));
                Vec::new()
            }
            Response::LoggedOut => {
                self.username = None;
                self.navigate(Screen::login(None));
                Vec::new()
            }
            Response::Themes(Ok(themes)) => {
                self.themes = themes;
                self.notice = None;
                Vec::new()
            }
            Response::Themes(Err(err)) => {
                tracing::warn!("Using built-in themes: {}", err);
                self.themes = default_themes();
                self.notice = Some(format!("Could not load themes ({}); showing defaults", err));
                Vec::new()
            }
            Response::ThemeQuiz(Ok(QuizChoice::Ready(quiz))) => self.start_bank_quiz(quiz),
            Response::ThemeQuiz(Ok(QuizChoice::Choose(quizzes))) => {
                self.navigate(Screen::QuizSelect { quizzes, cursor: 0 });
                Vec::new()
            }
            Response::ThemeQuiz(Err(err)) => {
                let retry = Command::LoadThemeQuiz {
                    theme: self.theme.clone(),
                    count: self.question_count,
                };
                self.fail(&err, Some(retry));
                Vec::new()
            }
            Response::AiQuestion(Ok(question)) => self.show_ai_question(question),
            Response::AiQuestion(Err(err)) => {
                let retry = self.session.as_ref().map(|session| Command::FetchAiQuestion {
                    theme: session.theme().to_string(),
                    score: session.score(),
                });
                self.fail(&err, retry);
                Vec::new()
            }
            Response::Submitted(Ok(outcome)) => {
                let Some(submission) = self.session.as_ref().and_then(QuizSession::submission)
                else {
                    return self.enter_menu();
                };
                let command = Command::LoadScore {
                    quiz_id: submission.quiz_id.to_string(),
                    theme: submission.theme.clone(),
                };
                self.submitted = Some(outcome);
                self.navigate(Screen::loading("Fetching your score..."));
                vec![command]
            }
            Response::Submitted(Err(err)) => {
                // Answers stay frozen in the session so the retry sends the
                // same submission.
                let retry = self
                    .session
                    .as_ref()
                    .and_then(QuizSession::submission)
                    .cloned()
                    .map(Command::Submit);
                self.fail(&err, retry);
                Vec::new()
            }
            Response::Score { score, attempted } => {
                self.show_results(score, attempted);
                Vec::new()
            }
            Response::Leaderboards(Ok(boards)) => {
                self.navigate(Screen::Leaderboards { boards, tab: 0 });
                Vec::new()
            }
            Response::Leaderboards(Err(err)) => {
                let retry = Command::LoadLeaderboards {
                    theme: Some(self.theme.clone()).filter(|theme| !theme.is_empty()),
                };
                self.fail(&err, Some(retry));
                Vec::new()
            }
        }
    }

    fn show_ai_question(&mut self, question: Question) -> Vec<Command> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.push_question(question);
        let index = if session.questions().len() == 1 {
            0
        } else {
            match session.advance() {
                Advance::Moved(index) => index,
                other => {
                    tracing::warn!("Unexpected advance after new question: {:?}", other);
                    session.current_index()
                }
            }
        };
        self.navigate(Screen::quiz());
        self.start_timer(index);
        Vec::new()
    }

    fn show_results(&mut self, score: Result<QuizScore, ApiError>, attempted: Option<AttemptedQuiz>) {
        let (score, local) = match score {
            Ok(score) => (score, false),
            Err(err) => {
                tracing::warn!("Score unavailable, using submit response: {}", err);
                let Some(submission) = self.session.as_ref().and_then(QuizSession::submission)
                else {
                    self.fail(&err, None);
                    return;
                };
                let outcome = self.submitted.clone().unwrap_or(SubmitOutcome {
                    score: None,
                    time_taken: None,
                    raw: serde_json::Value::Null,
                });
                let card = QuizScore::local_fallback(
                    &outcome,
                    submission.responses.clone(),
                    &submission.quiz_id.to_string(),
                    &submission.theme,
                );
                (card, true)
            }
        };
        self.navigate(Screen::Results {
            score,
            attempted,
            local,
            scroll: 0,
        });
    }
}

fn response_error(response: &Response) -> Option<&ApiError> {
    match response {
        Response::LoggedIn(Err(err))
        | Response::Themes(Err(err))
        | Response::ThemeQuiz(Err(err))
        | Response::AiQuestion(Err(err))
        | Response::Submitted(Err(err))
        | Response::Score { score: Err(err), .. }
        | Response::Leaderboards(Err(err)) => Some(err),
        _ => None,
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::LoadThemes => "themes",
        Command::LoadThemeQuiz { .. } => "theme quiz",
        Command::FetchAiQuestion { .. } => "AI question",
        Command::Submit(_) => "submit",
        Command::LoadScore { .. } => "score",
        Command::LoadLeaderboards { .. } => "leaderboards",
    }
}

fn default_themes() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect()
}

fn now() -> chrono::NaiveTime {
    Local::now().time()
}

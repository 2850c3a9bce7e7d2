use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quiz_client::auth::{AuthContext, SessionStore};
use quiz_client::client::{self, PlayOptions};
use quiz_client::config::Config;
use quiz_client::error::{ApiError, AppError};
use quiz_client::gateway::Gateway;
use quiz_client::logging::{self, LogTarget};
use quiz_client::models::{
    Feedback, LeaderboardEntry, PerformanceSummary, ProfileUpdate, QuizMode, SignupForm,
};
use quiz_client::protocol::DEFAULT_QUESTION_COUNT;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal client for the quiz backend", long_about = None)]
struct Args {
    /// Backend base URL, overrides QUIZ_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// File holding the login session, overrides QUIZ_SESSION_FILE
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive quiz (default)
    Play {
        /// Start a quiz on this theme right away
        #[arg(long)]
        theme: Option<String>,
        #[arg(long, value_enum, default_value_t = Mode::Theme)]
        mode: Mode,
        /// Questions in a freshly created theme quiz
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        questions: usize,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Preferred themes, up to four
        #[arg(long = "preference")]
        preferences: Vec<String>,
    },
    Logout,
    /// Show your profile
    Profile,
    /// Update profile fields; omitted fields keep their current value
    EditProfile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        organisation: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Recently attempted quizzes
    History,
    Themes,
    Leaderboard {
        /// Show the leaderboard for one theme instead of overall and daily
        #[arg(long)]
        theme: Option<String>,
    },
    Feedback {
        /// 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comments: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Theme challenge from the question bank
    Theme,
    /// Head-to-head against the AI
    Ai,
}

impl From<Mode> for QuizMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Theme => QuizMode::ThemeChallenge,
            Mode::Ai => QuizMode::HeadToHead,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(session_file) = args.session_file {
        config.session_file = session_file;
    }

    let command = args.command.unwrap_or(Command::Play {
        theme: None,
        mode: Mode::Theme,
        questions: DEFAULT_QUESTION_COUNT,
    });
    let target = match command {
        Command::Play { .. } => LogTarget::FileOnly,
        _ => LogTarget::FileAndStderr,
    };
    let _guard = logging::init(&config, target);
    tracing::info!("Using backend {}", config.base_url);

    let auth = AuthContext::init(SessionStore::at(&config.session_file));
    let gateway = Gateway::from_config(&config, auth)?;

    match command {
        Command::Play {
            theme,
            mode,
            questions,
        } => {
            let options = PlayOptions {
                theme,
                mode: mode.into(),
                question_count: questions,
            };
            client::run(gateway, options).await?;
        }
        Command::Login { email, password } => {
            let session = gateway.login(&email, &password).await?;
            println!("Logged in as {}", session.username);
        }
        Command::Signup {
            username,
            email,
            password,
            confirm_password,
            preferences,
        } => {
            let mut form = SignupForm::new(&username, &email, &password, &confirm_password);
            for (slot, preference) in form.preferences.iter_mut().zip(preferences) {
                *slot = preference;
            }
            println!("{}", gateway.signup(&form).await?);
        }
        Command::Logout => {
            gateway.logout().await;
            println!("Logged out");
        }
        Command::Profile => {
            require_login(&gateway).await?;
            let profile = gateway.fetch_profile().await?;
            println!("{} {} ({})", profile.first_name, profile.last_name, profile.username);
            println!("Gender:       {}", profile.gender);
            println!("Role:         {}", profile.role);
            println!("Organisation: {}", profile.organisation);
            println!("Industry:     {}", profile.industry);
            println!("Bio:          {}", profile.bio);
            if let Some(picture) = profile.profile_pic {
                println!("Picture:      {}", picture);
            }
        }
        Command::EditProfile {
            first_name,
            last_name,
            organisation,
            industry,
            bio,
        } => {
            require_login(&gateway).await?;
            let current = gateway.fetch_profile().await?;
            let update = ProfileUpdate {
                first_name: first_name.unwrap_or(current.first_name),
                last_name: last_name.unwrap_or(current.last_name),
                organisation: organisation.unwrap_or(current.organisation),
                industry: industry.unwrap_or(current.industry),
                bio: bio.unwrap_or(current.bio),
            };
            gateway.update_profile(&update).await?;
            println!("Profile updated");
        }
        Command::History => {
            require_login(&gateway).await?;
            let quizzes = gateway.fetch_recent_quizzes().await?;
            if quizzes.is_empty() {
                println!("No quizzes attempted yet");
                return Ok(());
            }
            for quiz in &quizzes {
                println!(
                    "#{:<6} {:<14} score {:<6} time {}",
                    quiz.quiz_id,
                    quiz.theme,
                    quiz.score,
                    quiz.time_taken.as_deref().unwrap_or("N/A")
                );
            }
            let summary = PerformanceSummary::from_recent(&quizzes);
            println!(
                "\n{} correct answers over {} questions",
                summary.correct_answers, summary.total_questions
            );
            if let Some(average) = summary.average_time {
                println!("Average time {:.1}s", average);
            }
        }
        Command::Themes => {
            for theme in gateway.fetch_all_themes().await? {
                println!("{}", theme);
            }
        }
        Command::Leaderboard { theme } => {
            require_login(&gateway).await?;
            match theme {
                Some(theme) => {
                    let entries = gateway.fetch_theme_leaderboard(&theme).await?;
                    print_leaderboard(&format!("Theme: {}", theme), &entries);
                }
                None => {
                    print_leaderboard("All Time", &gateway.fetch_overall_leaderboard().await?);
                    print_leaderboard("Today", &gateway.fetch_daily_leaderboard().await?);
                }
            }
        }
        Command::Feedback { rating, comments } => {
            require_login(&gateway).await?;
            let feedback = Feedback::new(rating, comments)?;
            println!("{}", gateway.submit_feedback(&feedback).await?);
        }
    }

    Ok(())
}

async fn require_login(gateway: &Gateway) -> Result<(), AppError> {
    if gateway.auth().is_authenticated().await {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("not logged in".into()).into())
    }
}

fn print_leaderboard(title: &str, entries: &[LeaderboardEntry]) {
    println!("{}", title);
    if entries.is_empty() {
        println!("  No scores yet");
    }
    for entry in entries {
        println!("  {:>2}. {:<16} {:>6}", entry.rank, entry.username, entry.score);
    }
    println!();
}

//! Domain types exchanged between the backend, the session and the views.

mod question;
mod quiz;
mod results;
mod user;

pub use question::{OptionLetter, Question};
pub use quiz::{BankQuiz, QuizChoice, QuizId, QuizMode};
pub use results::{
    AttemptedQuiz, Feedback, LeaderboardEntry, PerformanceSummary, QuizScore, RecentQuiz,
    SubmitOutcome, performance_message, percentage,
};
pub(crate) use results::value_to_string;
pub use user::{AuthSession, Profile, ProfileUpdate, SignupForm};

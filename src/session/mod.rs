//! Quiz session state and the question timer.

mod state;
mod timer;

pub use state::{Advance, HEAD_TO_HEAD_ROUNDS, QuizSession, Submission, format_clock};
pub use timer::{AdvanceGate, AdvancePhase, QUESTION_TIME_BUDGET, QuestionTimer, TimerEvent};

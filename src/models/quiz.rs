use std::fmt;

use serde::{Deserialize, Serialize};

use super::question::Question;

/// Which flavour of quiz is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
    /// A fixed set of questions drawn from the question bank.
    ThemeChallenge,
    /// One AI-generated question at a time, difficulty following the score.
    HeadToHead,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::ThemeChallenge => write!(f, "theme-challenge"),
            QuizMode::HeadToHead => write!(f, "head-to-head"),
        }
    }
}

/// Identifier sent back to the backend on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizId {
    Bank(i64),
    /// Head-to-head games have no backend quiz; the client makes one up.
    Ephemeral(String),
}

impl QuizId {
    pub fn ephemeral(now_millis: i64) -> Self {
        Self::Ephemeral(format!("beat_ai_{}", now_millis))
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizId::Bank(id) => write!(f, "{}", id),
            QuizId::Ephemeral(id) => write!(f, "{}", id),
        }
    }
}

/// A pre-built quiz from the question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankQuiz {
    pub quiz_id: i64,
    pub questions: Vec<Question>,
}

/// Result of looking up quizzes for a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizChoice {
    Ready(BankQuiz),
    /// Several bank quizzes exist; newest first.
    Choose(Vec<BankQuiz>),
}

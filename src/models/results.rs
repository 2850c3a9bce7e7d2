use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Entry in a leaderboard. Rank is the 1-based position in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub score: i64,
}

/// A quiz the user attempted recently.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentQuiz {
    pub quiz_id: String,
    pub theme: String,
    pub score: String,
    pub time_taken: Option<String>,
    pub questions: Vec<Value>,
    pub correct_answers: Vec<Value>,
    pub user_responses: Vec<Value>,
}

/// Aggregate shown on the challenge screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    pub correct_answers: i64,
    pub total_questions: usize,
    pub average_time: Option<f64>,
}

impl PerformanceSummary {
    pub fn from_recent(quizzes: &[RecentQuiz]) -> Self {
        let correct_answers = quizzes
            .iter()
            .filter_map(|quiz| leading_integer(&quiz.score))
            .sum();
        let total_questions = quizzes.iter().map(|quiz| quiz.questions.len()).sum();
        let times: Vec<f64> = quizzes
            .iter()
            .filter_map(|quiz| quiz.time_taken.as_deref()?.trim().parse::<f64>().ok())
            .collect();
        let average_time =
            (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64);

        Self {
            correct_answers,
            total_questions,
            average_time,
        }
    }
}

fn leading_integer(score: &str) -> Option<i64> {
    let digits: String = score
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits.parse().ok()
}

/// What `/submit_quiz` reported back.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub score: Option<Value>,
    pub time_taken: Option<String>,
    pub raw: Value,
}

/// Score card for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizScore {
    pub quiz_id: String,
    pub theme: String,
    pub user_response: Vec<String>,
    /// Either `"correct/total"` or a bare number.
    pub score: String,
    pub accuracy: String,
    pub time_taken: String,
}

impl QuizScore {
    /// Score card assembled from the submit response when the score
    /// endpoint cannot be reached.
    pub fn local_fallback(
        outcome: &SubmitOutcome,
        user_response: Vec<String>,
        quiz_id: &str,
        theme: &str,
    ) -> Self {
        let total = user_response.len();
        let score = match &outcome.score {
            Some(Value::Number(n)) => format!("{}/{}", n, total),
            Some(Value::String(s)) => s.clone(),
            _ => format!("0/{}", total),
        };
        let accuracy = format!("{}%", percentage(&score, total));
        let quiz_id = outcome
            .raw
            .get("quiz_id")
            .map(value_to_string)
            .unwrap_or_else(|| quiz_id.to_string());

        Self {
            quiz_id,
            theme: theme.to_string(),
            user_response,
            score,
            accuracy,
            time_taken: outcome.time_taken.clone().unwrap_or_else(|| "N/A".into()),
        }
    }

    pub fn percentage(&self) -> u32 {
        percentage(&self.score, self.user_response.len())
    }
}

/// Percentage for a `"c/t"` score, or a bare count out of `total`.
pub fn percentage(score: &str, total: usize) -> u32 {
    if let Some((correct, out_of)) = score.split_once('/') {
        let correct: f64 = correct.trim().parse().unwrap_or(0.0);
        let out_of: f64 = out_of.trim().parse().unwrap_or(0.0);
        if out_of <= 0.0 {
            return 0;
        }
        return (correct / out_of * 100.0).round() as u32;
    }
    match score.trim().parse::<f64>() {
        Ok(correct) if total > 0 => (correct / total as f64 * 100.0).round() as u32,
        _ => 0,
    }
}

pub fn performance_message(percentage: u32) -> &'static str {
    match percentage {
        80.. => "Excellent Performance!",
        60..=79 => "Good Performance!",
        40..=59 => "Fair Performance!",
        _ => "Keep Practicing!",
    }
}

pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Per-question breakdown from `/view_attempted_quiz`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptedQuiz {
    pub questions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub rating: u8,
    pub comments: String,
}

impl Feedback {
    pub fn new(rating: u8, comments: impl Into<String>) -> Result<Self, ApiError> {
        let comments = comments.into();
        if !(1..=5).contains(&rating) {
            return Err(ApiError::Validation(
                "Please select a rating between 1 and 5".into(),
            ));
        }
        if comments.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please provide some feedback before submitting".into(),
            ));
        }
        Ok(Self { rating, comments })
    }
}

//! Turn the backend's many response shapes into one typed form each.
//!
//! Lists arrive as bare arrays, `{data: [...]}`, or under an endpoint
//! specific key; questions arrive as objects or as JSON-encoded strings.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::{
    BankQuiz, LeaderboardEntry, Profile, Question, QuizScore, RecentQuiz, SubmitOutcome,
    value_to_string,
};

pub const NO_QUIZZES_MESSAGE: &str = "No quizzes found for the user.";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

/// Pull the `error` or `message` string out of a response body.
pub fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Find the list payload in a body that is either an array or an object
/// carrying the array under one of `keys`.
pub fn extract_list<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = body {
        return Some(items);
    }
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
}

pub fn themes(body: &Value) -> Result<Vec<String>, ApiError> {
    let items = extract_list(body, &["themes", "data"]).ok_or(ApiError::MalformedResponse {
        endpoint: "/get_all_themes",
    })?;

    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(name) => name.to_lowercase(),
            Value::Object(fields) => fields
                .get("name")
                .or_else(|| fields.get("theme"))
                .map(value_to_string)
                .unwrap_or_else(|| item.to_string())
                .to_lowercase(),
            other => value_to_string(other).to_lowercase(),
        })
        .collect())
}

pub fn leaderboard(body: &Value, endpoint: &'static str) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let items =
        extract_list(body, &["leaderboard", "data"]).ok_or(ApiError::MalformedResponse { endpoint })?;

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| LeaderboardEntry {
            rank: index + 1,
            username: item
                .get("username")
                .map(value_to_string)
                .unwrap_or_else(|| "Unknown".to_string()),
            score: item
                .get("total_score")
                .or_else(|| item.get("score"))
                .and_then(as_integer)
                .unwrap_or(0),
        })
        .collect())
}

/// Parse one bank question. Unparseable strings keep their text and get no
/// options.
pub fn question(value: &Value, theme: &str) -> Question {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => question_from_fields(&fields, theme),
            _ => Question::new(raw.clone(), Vec::new()).with_theme(theme),
        },
        Value::Object(fields) => question_from_fields(fields, theme),
        other => Question::new(value_to_string(other), Vec::new()).with_theme(theme),
    }
}

fn question_from_fields(fields: &Map<String, Value>, theme: &str) -> Question {
    let text = fields
        .get("question")
        .or_else(|| fields.get("text"))
        .map(value_to_string)
        .unwrap_or_default();
    let options = fields.get("options").map(labelled_options).unwrap_or_default();
    let theme = fields
        .get("theme")
        .and_then(Value::as_str)
        .unwrap_or(theme);
    let difficulty = fields
        .get("difficulty")
        .and_then(Value::as_str)
        .unwrap_or("Medium");

    Question::new(text, options)
        .with_theme(theme)
        .with_difficulty(difficulty)
}

/// Option lists come as arrays of labelled strings, or as an object keyed by
/// letter which is labelled here.
fn labelled_options(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_to_string).collect(),
        Value::Object(fields) => fields
            .iter()
            .map(|(key, text)| format!("{}) {}", key, value_to_string(text)))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn ai_question(body: &Value) -> Result<Question, ApiError> {
    let malformed = || ApiError::MalformedResponse {
        endpoint: "/beat_the_ai",
    };
    let fields = body.as_object().ok_or_else(malformed)?;
    match fields.get("question") {
        Some(Value::String(text)) if !text.is_empty() => {}
        _ => return Err(malformed()),
    }
    Ok(question_from_fields(fields, "random"))
}

pub fn bank_quiz(value: &Value, theme: &str) -> Option<BankQuiz> {
    let quiz_id = value.get("quiz_id").and_then(as_integer)?;
    let questions = value
        .get("questions")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|item| question(item, theme)).collect())
        .unwrap_or_default();
    Some(BankQuiz { quiz_id, questions })
}

/// Quizzes for a theme, empty ones dropped, newest first.
pub fn theme_quizzes(body: &Value, theme: &str) -> Vec<BankQuiz> {
    let mut quizzes: Vec<BankQuiz> = body
        .get("quizzes")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| bank_quiz(item, theme)).collect())
        .unwrap_or_default();
    quizzes.retain(|quiz| !quiz.questions.is_empty());
    quizzes.sort_by(|a, b| b.quiz_id.cmp(&a.quiz_id));
    quizzes
}

pub fn created_quiz(body: &Value, theme: &str) -> Result<BankQuiz, ApiError> {
    bank_quiz(body, theme).ok_or(ApiError::MalformedResponse {
        endpoint: "/create_quiz_from_bank",
    })
}

/// A submission counts as accepted if the body carries a score or a
/// success status.
pub fn submit_outcome(body: &Value) -> Result<SubmitOutcome, ApiError> {
    let score = body.get("score").filter(|score| !score.is_null()).cloned();
    let succeeded = body.get("status").and_then(Value::as_str) == Some("success");
    if score.is_none() && !succeeded {
        return Err(ApiError::MalformedResponse {
            endpoint: "/submit_quiz",
        });
    }

    Ok(SubmitOutcome {
        score,
        time_taken: body.get("time_taken").map(value_to_string),
        raw: body.clone(),
    })
}

pub fn quiz_score(body: &Value, quiz_id: &str, theme: &str) -> Result<QuizScore, ApiError> {
    if !body.is_object() || body.get("score").is_none() {
        return Err(ApiError::MalformedResponse {
            endpoint: "/view_quiz_score",
        });
    }
    let field = |key: &str| body.get(key).map(value_to_string);
    let user_response = body
        .get("user_response")
        .map(decode_list)
        .unwrap_or_default()
        .iter()
        .map(value_to_string)
        .collect();

    Ok(QuizScore {
        quiz_id: field("quiz_id").unwrap_or_else(|| quiz_id.to_string()),
        theme: field("theme").unwrap_or_else(|| theme.to_string()),
        user_response,
        score: field("score").unwrap_or_default(),
        accuracy: field("accuracy").unwrap_or_else(|| "0%".to_string()),
        time_taken: field("time_taken").unwrap_or_else(|| "N/A".to_string()),
    })
}

pub fn recent_quizzes(body: &Value) -> Result<Vec<RecentQuiz>, ApiError> {
    if error_message(body).as_deref() == Some(NO_QUIZZES_MESSAGE) {
        return Ok(Vec::new());
    }
    let items = extract_list(body, &["quizzes", "data"]).ok_or(ApiError::MalformedResponse {
        endpoint: "/recent_quizzes",
    })?;

    Ok(items
        .iter()
        .map(|item| {
            let list = |key: &str| item.get(key).map(decode_list).unwrap_or_default();
            RecentQuiz {
                quiz_id: item.get("quiz_id").map(value_to_string).unwrap_or_default(),
                theme: item.get("theme").map(value_to_string).unwrap_or_default(),
                score: item.get("score").map(value_to_string).unwrap_or_default(),
                time_taken: item
                    .get("time_taken")
                    .filter(|value| !value.is_null())
                    .map(value_to_string),
                questions: list("questions"),
                correct_answers: list("correct_answers"),
                user_responses: list("user_responses"),
            }
        })
        .collect())
}

pub fn profile(body: &Value, username: &str) -> Result<Profile, ApiError> {
    if !body.is_object() {
        return Err(ApiError::MalformedResponse {
            endpoint: "/view_profile",
        });
    }
    let field = |key: &str| {
        body.get(key)
            .filter(|value| !value.is_null())
            .map(value_to_string)
            .unwrap_or_default()
    };
    let gender = Some(field("gender"))
        .filter(|gender| !gender.is_empty())
        .unwrap_or_else(|| "Not specified".to_string());
    let profile_pic = Some(field("profile_pic")).filter(|pic| !pic.is_empty());

    Ok(Profile {
        first_name: field("first_name"),
        last_name: field("last_name"),
        username: username.to_string(),
        gender,
        role: field("role"),
        organisation: field("organisation"),
        industry: field("industry"),
        bio: field("bio"),
        profile_pic,
    })
}

/// Lists stored by the backend as JSON text are decoded; anything that
/// does not decode to an array becomes empty.
fn decode_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_themes_all_shapes() {
        let expected = vec!["general".to_string(), "sports".to_string()];
        assert_eq!(themes(&json!({"themes": ["General", "Sports"]})).unwrap(), expected);
        assert_eq!(themes(&json!(["General", "Sports"])).unwrap(), expected);
        assert_eq!(
            themes(&json!({"data": [{"name": "General"}, {"theme": "SPORTS"}]})).unwrap(),
            expected
        );
        assert!(themes(&json!({"status": "ok"})).is_err());
    }

    #[test]
    fn test_leaderboard_ranks_follow_position() {
        let body = json!({
            "status": "success",
            "leaderboard": [
                {"username": "ana", "total_score": 40},
                {"username": "ben", "score": "31"},
                {"total_score": 12}
            ]
        });
        let entries = leaderboard(&body, "/leaderboard_overall").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].score, 31);
        assert_eq!(entries[2].username, "Unknown");
    }

    #[test]
    fn test_question_from_encoded_string() {
        let value = json!("{\"question\": \"2+2?\", \"options\": [\"A) 3\", \"B) 4\"]}");
        let parsed = question(&value, "math");
        assert_eq!(parsed.text, "2+2?");
        assert_eq!(parsed.options, vec!["A) 3", "B) 4"]);
        assert_eq!(parsed.theme, "math");

        let broken = question(&json!("not json at all"), "math");
        assert_eq!(broken.text, "not json at all");
        assert!(broken.options.is_empty());
    }

    #[test]
    fn test_ai_question_labels_keyed_options() {
        let body = json!({
            "question": "Largest planet?",
            "options": {"A": "Mars", "B": "Jupiter", "C": "Venus", "D": "Earth"},
            "difficulty": "Hard",
            "theme": "science"
        });
        let parsed = ai_question(&body).unwrap();
        assert_eq!(parsed.options[1], "B) Jupiter");
        assert_eq!(parsed.difficulty, "Hard");
        assert_eq!(parsed.theme, "science");
        assert!(ai_question(&json!({"options": {}})).is_err());
    }

    #[test]
    fn test_theme_quizzes_filtered_and_sorted() {
        let body = json!({"quizzes": [
            {"quiz_id": 3, "questions": ["{\"question\": \"q\", \"options\": []}"]},
            {"quiz_id": 9, "questions": [{"question": "q", "options": []}]},
            {"quiz_id": 12, "questions": []}
        ]});
        let quizzes = theme_quizzes(&body, "history");
        let ids: Vec<i64> = quizzes.iter().map(|quiz| quiz.quiz_id).collect();
        assert_eq!(ids, vec![9, 3]);
        assert!(theme_quizzes(&json!({}), "history").is_empty());
    }

    #[test]
    fn test_bank_quiz_ignores_answer_key() {
        let body = json!({
            "quiz_id": 7,
            "questions": [{"question": "q", "options": ["A) x", "B) y"]}],
            "correct_options": ["B"]
        });
        let quiz = bank_quiz(&body, "science").unwrap();
        assert_eq!(quiz.quiz_id, 7);
        assert_eq!(quiz.questions[0].options, vec!["A) x", "B) y"]);
    }

    #[test]
    fn test_submit_outcome_acceptance() {
        assert!(submit_outcome(&json!({"score": 4})).is_ok());
        assert!(submit_outcome(&json!({"status": "success"})).is_ok());
        assert!(submit_outcome(&json!({"status": "error"})).is_err());
    }

    #[test]
    fn test_recent_quizzes_decodes_string_lists() {
        let body = json!([{
            "quiz_id": 7,
            "theme": "history",
            "score": 3,
            "questions": "[\"q1\", \"q2\"]",
            "user_responses": "not json",
            "correct_answers": ["A", "B"]
        }]);
        let quizzes = recent_quizzes(&body).unwrap();
        assert_eq!(quizzes[0].quiz_id, "7");
        assert_eq!(quizzes[0].questions.len(), 2);
        assert!(quizzes[0].user_responses.is_empty());
        assert_eq!(quizzes[0].correct_answers.len(), 2);

        let none = recent_quizzes(&json!({"message": NO_QUIZZES_MESSAGE})).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_profile_defaults() {
        let parsed = profile(&json!({"first_name": "Ada", "gender": null}), "ada").unwrap();
        assert_eq!(parsed.first_name, "Ada");
        assert_eq!(parsed.gender, "Not specified");
        assert_eq!(parsed.username, "ada");
        assert_eq!(parsed.profile_pic, None);
    }
}

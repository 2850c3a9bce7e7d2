//! Quiz lifecycle: fetching questions, submitting, and reading scores back.

use serde_json::{Value, json};

use super::Gateway;
use super::transport::ApiRequest;
use crate::error::ApiError;
use crate::models::{AttemptedQuiz, BankQuiz, Question, QuizChoice, QuizScore, SubmitOutcome};
use crate::protocol::{endpoints, normalize};
use crate::session::Submission;

fn quiz_fields(quiz_id: &str, theme: &str) -> Vec<(String, String)> {
    vec![
        ("quiz_id".to_string(), quiz_id.to_string()),
        ("theme".to_string(), theme.to_string()),
    ]
}

impl Gateway {
    /// Next head-to-head question. The backend picks difficulty from `score`.
    pub async fn fetch_next_ai_question(
        &self,
        theme: Option<&str>,
        score: u32,
    ) -> Result<Question, ApiError> {
        let theme = theme.filter(|theme| !theme.is_empty()).unwrap_or("random");
        let request = ApiRequest::post(endpoints::BEAT_THE_AI).multipart(vec![
            ("theme".to_string(), theme.to_string()),
            ("score".to_string(), score.to_string()),
        ]);
        let body = self.execute(request).await?;
        normalize::ai_question(&body)
    }

    pub async fn fetch_theme_quizzes(&self, theme: &str) -> Result<Vec<BankQuiz>, ApiError> {
        let request = ApiRequest::post(endpoints::FETCH_QUIZ_FOR_THEME)
            .multipart(vec![("theme".to_string(), theme.to_string())]);
        let body = self.execute(request).await?;
        Ok(normalize::theme_quizzes(&body, theme))
    }

    pub async fn create_quiz(&self, theme: &str, count: usize) -> Result<BankQuiz, ApiError> {
        let request = ApiRequest::post(endpoints::CREATE_QUIZ_FROM_BANK).multipart(vec![
            ("theme".to_string(), theme.to_string()),
            ("num_questions".to_string(), count.to_string()),
        ]);
        let body = self.execute(request).await?;
        let quiz = normalize::created_quiz(&body, theme)?;
        tracing::info!("Created quiz {} with {} questions", quiz.quiz_id, quiz.questions.len());
        Ok(quiz)
    }

    /// Use an existing quiz for the theme if there is one, otherwise create
    /// a fresh quiz from the question bank.
    pub async fn load_theme_quiz(&self, theme: &str, count: usize) -> Result<QuizChoice, ApiError> {
        match self.fetch_theme_quizzes(theme).await {
            Ok(mut quizzes) if quizzes.len() == 1 => {
                return Ok(QuizChoice::Ready(quizzes.remove(0)));
            }
            Ok(quizzes) if !quizzes.is_empty() => return Ok(QuizChoice::Choose(quizzes)),
            Ok(_) => tracing::info!("No stored quizzes for {}, creating one", theme),
            Err(err) if err.is_unauthorized() => return Err(err),
            Err(err) => tracing::warn!("Fetching quizzes for {} failed, creating one: {}", theme, err),
        }
        self.create_quiz(theme, count).await.map(QuizChoice::Ready)
    }

    pub async fn submit_quiz(&self, submission: &Submission) -> Result<SubmitOutcome, ApiError> {
        tracing::info!(
            "Submitting quiz {} ({} responses)",
            submission.quiz_id,
            submission.responses.len()
        );
        let request = ApiRequest::post(endpoints::SUBMIT_QUIZ).multipart(submission.form_fields());
        let body = self.execute(request).await?;
        normalize::submit_outcome(&body)
    }

    pub async fn view_quiz_score(&self, quiz_id: &str, theme: &str) -> Result<QuizScore, ApiError> {
        let fields = quiz_fields(quiz_id, theme);
        let body = self
            .probe(vec![
                ApiRequest::post(endpoints::VIEW_QUIZ_SCORE).multipart(fields.clone()),
                ApiRequest::post(endpoints::VIEW_QUIZ_SCORE)
                    .json(json!({"quiz_id": quiz_id, "theme": theme})),
                ApiRequest::put(endpoints::VIEW_QUIZ_SCORE).multipart(fields.clone()),
                ApiRequest::get(endpoints::VIEW_QUIZ_SCORE).query(fields),
            ])
            .await?;
        normalize::quiz_score(&body, quiz_id, theme)
    }

    /// Per-question breakdown. Missing details are not an error: any failure
    /// other than 401 yields `None`.
    pub async fn view_attempted_quiz(
        &self,
        quiz_id: &str,
        theme: &str,
    ) -> Result<Option<AttemptedQuiz>, ApiError> {
        let request =
            ApiRequest::post(endpoints::VIEW_ATTEMPTED_QUIZ).multipart(quiz_fields(quiz_id, theme));
        match self.execute(request).await {
            Ok(body) => Ok(body
                .get("questions")
                .and_then(Value::as_array)
                .map(|questions| AttemptedQuiz {
                    questions: questions.clone(),
                })),
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                tracing::warn!("No attempt details for quiz {}: {}", quiz_id, err);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::authenticated_gateway;
    use super::*;
    use crate::gateway::{Body, Method};
    use crate::models::QuizId;

    fn history_submission() -> Submission {
        Submission {
            quiz_id: QuizId::Bank(42),
            theme: "history".into(),
            responses: ["A", "C", "B", "A", "D"].iter().map(|r| r.to_string()).collect(),
            start_time: "10:00:00".into(),
            end_time: "10:03:12".into(),
        }
    }

    #[tokio::test]
    async fn test_ai_question_defaults_to_random_theme() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(
            200,
            json!({"question": "Capital of France?", "options": ["A) Paris", "B) Rome"]}),
        );

        let question = gateway.fetch_next_ai_question(None, 3).await.unwrap();

        assert_eq!(question.text, "Capital of France?");
        assert_eq!(
            transport.seen()[0].request.body,
            Body::Multipart(vec![
                ("theme".into(), "random".into()),
                ("score".into(), "3".into()),
            ])
        );
    }

    #[tokio::test]
    async fn test_single_stored_quiz_is_ready() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(
            200,
            json!({"quizzes": [{"quiz_id": 5, "questions": [{"question": "q", "options": []}]}]}),
        );

        let choice = gateway.load_theme_quiz("history", 5).await.unwrap();

        assert!(matches!(choice, QuizChoice::Ready(quiz) if quiz.quiz_id == 5));
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_several_stored_quizzes_offer_a_choice() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(
            200,
            json!({"quizzes": [
                {"quiz_id": 5, "questions": [{"question": "q", "options": []}]},
                {"quiz_id": 8, "questions": [{"question": "q", "options": []}]}
            ]}),
        );

        match gateway.load_theme_quiz("history", 5).await.unwrap() {
            QuizChoice::Choose(quizzes) => assert_eq!(quizzes[0].quiz_id, 8),
            other => panic!("expected a choice, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_create() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(500, json!({"error": "boom"}));
        transport.reply(
            200,
            json!({"quiz_id": 77, "questions": ["{\"question\": \"q1\", \"options\": [\"A) x\"]}"]}),
        );

        let choice = gateway.load_theme_quiz("history", 5).await.unwrap();

        assert!(matches!(choice, QuizChoice::Ready(quiz) if quiz.quiz_id == 77));
        let seen = transport.seen();
        assert_eq!(seen[1].request.path, endpoints::CREATE_QUIZ_FROM_BANK);
        assert_eq!(
            seen[1].request.body,
            Body::Multipart(vec![
                ("theme".into(), "history".into()),
                ("num_questions".into(), "5".into()),
            ])
        );
    }

    #[tokio::test]
    async fn test_unauthorized_does_not_fall_back() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(401, json!({"error": "expired"}));

        let err = gateway.load_theme_quiz("history", 5).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_server_error_is_retryable() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(500, json!({"error": "Internal Server Error"}));
        let submission = history_submission();

        let err = gateway.submit_quiz(&submission).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(submission.responses, vec!["A", "C", "B", "A", "D"]);
        let seen = transport.seen();
        assert_eq!(seen[0].request.method, Method::Post);
        assert_eq!(seen[0].request.body, Body::Multipart(submission.form_fields()));
    }

    #[tokio::test]
    async fn test_view_quiz_score_tries_variants_in_order() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(405, json!({}));
        transport.reply(405, json!({}));
        transport.reply(405, json!({}));
        transport.reply(
            200,
            json!({"score": "4/5", "accuracy": "80%", "user_response": "[\"A\", \"B\"]"}),
        );

        let score = gateway.view_quiz_score("42", "history").await.unwrap();

        assert_eq!(score.score, "4/5");
        assert_eq!(score.user_response, vec!["A", "B"]);
        assert_eq!(score.quiz_id, "42");
        let methods: Vec<Method> = transport.seen().iter().map(|s| s.request.method).collect();
        assert_eq!(methods, vec![Method::Post, Method::Post, Method::Put, Method::Get]);
        assert!(matches!(transport.seen()[1].request.body, Body::Json(_)));
    }

    #[tokio::test]
    async fn test_attempted_quiz_missing_is_none() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(500, json!({}));
        transport.reply(200, json!({"questions": [{"question": "q1"}]}));

        assert_eq!(gateway.view_attempted_quiz("42", "history").await.unwrap(), None);
        let details = gateway.view_attempted_quiz("42", "history").await.unwrap();
        assert_eq!(details.map(|d| d.questions.len()), Some(1));
    }
}

//! Login, signup, profile and feedback.

use serde_json::Value;

use super::transport::ApiRequest;
use super::{Gateway, or_default_on_not_found};
use crate::error::ApiError;
use crate::models::{AuthSession, Feedback, Profile, ProfileUpdate, RecentQuiz, SignupForm};
use crate::protocol::endpoints;
use crate::protocol::normalize::{self, PROFILE_UPDATED_MESSAGE};

impl Gateway {
    /// Log in and install the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let request = ApiRequest::post(endpoints::LOGIN).anonymous().multipart(vec![
            ("email".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ]);

        let body = match self.execute(request).await {
            Err(ApiError::Unauthorized(_)) => {
                return Err(ApiError::Unauthorized("Invalid email or password".into()));
            }
            other => other?,
        };

        let succeeded = body.get("status").and_then(Value::as_str) == Some("success");
        let token = body.get("token").and_then(Value::as_str);
        let (true, Some(token)) = (succeeded, token) else {
            return Err(ApiError::MalformedResponse {
                endpoint: endpoints::LOGIN,
            });
        };
        let username = body
            .get("message")
            .and_then(Value::as_str)
            .map(AuthSession::username_from_greeting)
            .unwrap_or_default();

        let session = AuthSession {
            token: token.to_string(),
            username,
        };
        if let Err(err) = self.auth.establish(session.clone()).await {
            tracing::warn!("Logged in but could not persist the session: {}", err);
        }
        Ok(session)
    }

    /// Register a new account. Returns the backend's confirmation message.
    pub async fn signup(&self, form: &SignupForm) -> Result<String, ApiError> {
        form.validate()?;
        let request = ApiRequest::post(endpoints::SIGNUP)
            .anonymous()
            .multipart(form.fields());
        let body = self.execute(request).await?;

        let message = normalize::error_message(&body);
        if body.get("status").and_then(Value::as_str) == Some("success") {
            Ok(message.unwrap_or_else(|| "Signup successful".to_string()))
        } else {
            Err(ApiError::Validation(
                message.unwrap_or_else(|| "Signup failed".to_string()),
            ))
        }
    }

    pub async fn logout(&self) {
        self.auth.teardown().await;
        tracing::info!("Logged out");
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        let body = self
            .probe(vec![
                ApiRequest::get(endpoints::VIEW_PROFILE),
                ApiRequest::post(endpoints::VIEW_PROFILE),
            ])
            .await?;
        let username = self.auth.username().await.unwrap_or_default();
        normalize::profile(&body, &username)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let request = ApiRequest::post(endpoints::EDIT_PROFILE).multipart(update.fields());
        let body = self.execute(request).await?;

        if normalize::error_message(&body).as_deref() == Some(PROFILE_UPDATED_MESSAGE) {
            Ok(())
        } else {
            Err(ApiError::MalformedResponse {
                endpoint: endpoints::EDIT_PROFILE,
            })
        }
    }

    /// Recently attempted quizzes; empty when the user has none.
    pub async fn fetch_recent_quizzes(&self) -> Result<Vec<RecentQuiz>, ApiError> {
        let body = or_default_on_not_found(
            self.execute(ApiRequest::get(endpoints::RECENT_QUIZZES)).await,
            || Value::Array(Vec::new()),
        )?;
        normalize::recent_quizzes(&body)
    }

    pub async fn submit_feedback(&self, feedback: &Feedback) -> Result<String, ApiError> {
        let request = ApiRequest::post(endpoints::SUBMIT_FEEDBACK).multipart(vec![
            ("rating".to_string(), feedback.rating.to_string()),
            ("comments".to_string(), feedback.comments.clone()),
        ]);
        let body = self.execute(request).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Feedback submitted successfully!")
            .to_string())
    }
}

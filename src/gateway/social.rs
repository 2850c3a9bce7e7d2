//! Leaderboards and the theme catalogue. All of these are optional: a 404
//! degrades to an empty list or the built-in themes.

use serde_json::{Value, json};

use super::transport::ApiRequest;
use super::{Gateway, or_default_on_not_found};
use crate::error::ApiError;
use crate::models::LeaderboardEntry;
use crate::protocol::{DEFAULT_THEMES, endpoints, normalize};

fn default_themes() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect()
}

impl Gateway {
    pub async fn fetch_theme_leaderboard(
        &self,
        theme: &str,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let fields = vec![("theme".to_string(), theme.to_string())];
        let body = self
            .probe(vec![
                ApiRequest::post(endpoints::LEADERBOARD_THEME).multipart(fields.clone()),
                ApiRequest::get(endpoints::LEADERBOARD_THEME).query(fields),
            ])
            .await;
        let body = or_default_on_not_found(body, || Value::Array(Vec::new()))?;
        normalize::leaderboard(&body, endpoints::LEADERBOARD_THEME)
    }

    pub async fn fetch_overall_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let body = self
            .probe(vec![
                ApiRequest::get(endpoints::LEADERBOARD_OVERALL),
                ApiRequest::post(endpoints::LEADERBOARD_OVERALL).json(json!({})),
                ApiRequest::post(endpoints::LEADERBOARD_OVERALL).multipart(Vec::new()),
            ])
            .await;
        let body = or_default_on_not_found(body, || Value::Array(Vec::new()))?;
        normalize::leaderboard(&body, endpoints::LEADERBOARD_OVERALL)
    }

    pub async fn fetch_daily_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let body = or_default_on_not_found(
            self.execute(ApiRequest::get(endpoints::LEADERBOARD_DAILY)).await,
            || Value::Array(Vec::new()),
        )?;
        normalize::leaderboard(&body, endpoints::LEADERBOARD_DAILY)
    }

    /// Theme names, lower-cased.
    pub async fn fetch_all_themes(&self) -> Result<Vec<String>, ApiError> {
        let body = self
            .probe(vec![
                ApiRequest::get(endpoints::GET_ALL_THEMES),
                ApiRequest::get(endpoints::GET_ALL_THEMES).anonymous(),
                ApiRequest::post(endpoints::GET_ALL_THEMES).json(json!({})),
            ])
            .await;

        let Some(body) = or_default_on_not_found(body.map(Some), || None)? else {
            return Ok(default_themes());
        };
        let themes = normalize::themes(&body)?;
        if themes.is_empty() {
            tracing::warn!("Backend returned no themes, using the built-in list");
            return Ok(default_themes());
        }
        Ok(themes)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::authenticated_gateway;
    use super::*;
    use crate::gateway::{Body, Method};

    #[tokio::test]
    async fn test_themes_are_lower_cased() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(200, json!({"themes": ["General", "Sports"]}));

        assert_eq!(gateway.fetch_all_themes().await.unwrap(), vec!["general", "sports"]);
    }

    #[tokio::test]
    async fn test_themes_missing_uses_defaults() {
        let (gateway, transport) = authenticated_gateway().await;
        for _ in 0..3 {
            transport.reply(404, json!({"error": "Not Found"}));
        }

        let themes = gateway.fetch_all_themes().await.unwrap();

        assert_eq!(themes, default_themes());
        let seen = transport.seen();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].token, None);
    }

    #[tokio::test]
    async fn test_themes_expired_token_is_not_masked() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(401, json!({"error": "Token has expired"}));
        transport.reply(200, json!({"themes": ["General"]}));

        let err = gateway.fetch_all_themes().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_theme_leaderboard_falls_back_to_query() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(405, json!({}));
        transport.reply(200, json!({"leaderboard": [{"username": "ana", "total_score": 12}]}));

        let entries = gateway.fetch_theme_leaderboard("history").await.unwrap();

        assert_eq!(entries[0].username, "ana");
        let seen = transport.seen();
        assert_eq!(seen[1].request.method, Method::Get);
        assert_eq!(
            seen[1].request.body,
            Body::Query(vec![("theme".into(), "history".into())])
        );
    }

    #[tokio::test]
    async fn test_overall_leaderboard_not_found_is_empty() {
        let (gateway, transport) = authenticated_gateway().await;
        for _ in 0..3 {
            transport.reply(404, json!({}));
        }
        assert!(gateway.fetch_overall_leaderboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_daily_leaderboard_server_error_surfaces() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(503, json!({"error": "maintenance"}));
        let err = gateway.fetch_daily_leaderboard().await.unwrap_err();
        assert!(err.is_retryable());
    }
}

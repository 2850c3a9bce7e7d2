//! Sequential fallback probing.
//!
//! Some endpoints accept different methods or encodings depending on the
//! backend deployment. A probe tries an ordered list of request variants and
//! returns the first success. Only the last failure is reported, except that
//! a 401 on an authenticated variant ends the probe at once.

use serde_json::Value;

use super::Gateway;
use super::transport::ApiRequest;
use crate::error::ApiError;

impl Gateway {
    pub async fn probe(&self, variants: Vec<ApiRequest>) -> Result<Value, ApiError> {
        let total = variants.len();
        let mut last_error = None;

        for (attempt, request) in variants.into_iter().enumerate() {
            let path = request.path;
            let authenticated = request.authenticated;
            match self.execute(request).await {
                Ok(body) => {
                    tracing::debug!("{} variant {}/{} succeeded", path, attempt + 1, total);
                    return Ok(body);
                }
                // The session is already torn down; a later variant must not
                // hide that from the caller.
                Err(err) if authenticated && err.is_unauthorized() => return Err(err),
                Err(err) => {
                    tracing::debug!("{} variant {}/{} failed: {}", path, attempt + 1, total, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApiError::NetworkUnreachable("no request variants to try".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::authenticated_gateway;
    use super::*;
    use crate::gateway::Method;
    use crate::protocol::endpoints;

    fn variants() -> Vec<ApiRequest> {
        vec![
            ApiRequest::get(endpoints::GET_ALL_THEMES),
            ApiRequest::get(endpoints::GET_ALL_THEMES).anonymous(),
            ApiRequest::post(endpoints::GET_ALL_THEMES).json(json!({})),
        ]
    }

    #[tokio::test]
    async fn test_second_variant_wins() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(404, json!({"error": "not here"}));
        transport.reply(200, json!({"themes": ["General"]}));

        let body = gateway.probe(variants()).await.unwrap();

        assert_eq!(body, json!({"themes": ["General"]}));
        assert_eq!(transport.seen().len(), 2);
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(200, json!(["a"]));
        transport.reply(200, json!(["b"]));

        assert_eq!(gateway.probe(variants()).await.unwrap(), json!(["a"]));
        assert_eq!(transport.seen().len(), 1);
    }

    #[tokio::test]
    async fn test_reports_last_failure() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(404, json!({}));
        transport.fail("connection reset");
        transport.reply(500, json!({"error": "boom"}));

        let err = gateway.probe(variants()).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::ServerError {
                status: 500,
                message: "boom".into()
            }
        );
        let methods: Vec<Method> = transport.seen().iter().map(|s| s.request.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Get, Method::Post]);
    }
    #[tokio::test]
    async fn test_unauthorized_variant_stops_fallback() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(401, json!({"error": "Token has expired"}));
        transport.reply(200, json!({"themes": ["General"]}));

        let err = gateway.probe(variants()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(transport.seen().len(), 1);
        assert!(!gateway.auth().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_anonymous_unauthorized_tries_next_variant() {
        let (gateway, transport) = authenticated_gateway().await;
        transport.reply(401, json!({}));
        let body = gateway
            .probe(vec![
                ApiRequest::get(endpoints::GET_ALL_THEMES).anonymous(),
                ApiRequest::post(endpoints::GET_ALL_THEMES).json(json!({})),
            ])
            .await;
        assert!(body.is_err());
        assert_eq!(transport.seen().len(), 2);
        assert!(gateway.auth().is_authenticated().await);
    }
}

//! Network gateway to the quiz backend.
//!
//! Every backend operation goes through [`Gateway::execute`], which attaches
//! the bearer token, classifies failures into [`ApiError`], and tears down
//! the auth session on a 401 from an authenticated call.

mod account;
mod fallback;
mod quiz;
mod social;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

use std::sync::Arc;

use serde_json::Value;

use crate::auth::AuthContext;
use crate::config::Config;
use crate::error::ApiError;
use crate::protocol::normalize::error_message;

pub use transport::{
    ApiRequest, ApiResponse, Body, HttpTransport, Method, Transport, TransportError,
};

#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    auth: AuthContext,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, auth: AuthContext) -> Self {
        Self { transport, auth }
    }

    pub fn from_config(config: &Config, auth: AuthContext) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?), auth))
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Send one request and return the body of a 2xx response.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = if request.authenticated {
            self.auth.token().await
        } else {
            None
        };

        let response = self
            .transport
            .send(&request, token.as_deref())
            .await
            .map_err(|err| {
                tracing::warn!("{} {} unreachable: {}", method_name(request.method), request.path, err);
                ApiError::NetworkUnreachable(err.to_string())
            })?;

        if response.is_success() {
            return Ok(response.body);
        }

        let err = ApiError::from_status(response.status, error_message(&response.body));
        if err.is_unauthorized() && request.authenticated {
            tracing::warn!("{} returned 401, ending auth session", request.path);
            self.auth.teardown().await;
        }
        Err(err)
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Post => "POST",
        Method::Put => "PUT",
    }
}

/// Substitute `fallback` when the optional resource does not exist.
pub(crate) fn or_default_on_not_found<T>(
    result: Result<T, ApiError>,
    fallback: impl FnOnce() -> T,
) -> Result<T, ApiError> {
    match result {
        Err(err) if err.is_not_found() => {
            tracing::info!("Optional resource missing, using default: {}", err);
            Ok(fallback())
        }
        other => other,
    }
}

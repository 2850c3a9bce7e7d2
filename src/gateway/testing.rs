//! Scripted transport for gateway tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use super::Gateway;
use crate::auth::{AuthContext, SessionStore};
use crate::models::AuthSession;

#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub request: ApiRequest,
    pub token: Option<String>,
}

/// Replies in the order they were scripted and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(SeenRequest {
            request: request.clone(),
            token: token.map(str::to_string),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError(format!("no reply scripted for {}", request.path))))
    }
}

pub(crate) async fn gateway_with(
    session: Option<AuthSession>,
) -> (Gateway, Arc<ScriptedTransport>) {
    let auth = AuthContext::init(SessionStore::in_memory());
    if let Some(session) = session {
        auth.establish(session).await.unwrap();
    }
    let transport = Arc::new(ScriptedTransport::default());
    (Gateway::new(transport.clone(), auth), transport)
}

pub(crate) async fn authenticated_gateway() -> (Gateway, Arc<ScriptedTransport>) {
    gateway_with(Some(AuthSession {
        token: "tok-123".into(),
        username: "alice".into(),
    }))
    .await
}

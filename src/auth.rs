//! Auth session context.
//!
//! The token and username live in one JSON file so they survive between
//! runs. The in-memory copy is the source of truth while the process runs;
//! both are created on login and torn down together on logout or on any
//! 401 from an authenticated call.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AuthStoreError;
use crate::models::AuthSession;

/// File-backed persistence for the auth session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> Result<Option<AuthSession>, AuthStoreError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn save(&self, session: &AuthSession) -> Result<(), AuthStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        tokio::fs::write(path, serde_json::to_string_pretty(session)?).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AuthStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        ignore_missing(tokio::fs::remove_file(path).await)
    }

    /// Blocking variant of [`SessionStore::clear`] for use outside async code.
    fn clear_blocking(&self) -> Result<(), AuthStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        ignore_missing(fs::remove_file(path))
    }
}

fn ignore_missing(result: std::io::Result<()>) -> Result<(), AuthStoreError> {
    match result {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}

/// Shared handle to the current auth session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    current: Arc<RwLock<Option<AuthSession>>>,
    store: SessionStore,
}

impl AuthContext {
    /// Restore whatever session the store holds. A corrupt file is treated
    /// as logged out and removed. Reads the file synchronously, so call it
    /// at startup before the UI loop runs.
    pub fn init(store: SessionStore) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("Discarding unreadable auth session: {}", err);
                if let Err(err) = store.clear_blocking() {
                    tracing::warn!("Failed to remove auth session file: {}", err);
                }
                None
            }
        };
        Self {
            current: Arc::new(RwLock::new(restored)),
            store,
        }
    }

    /// Install a fresh session. The in-memory session is set even if
    /// persisting it fails.
    pub async fn establish(&self, session: AuthSession) -> Result<(), AuthStoreError> {
        tracing::info!("Logged in as {}", session.username);
        let saved = self.store.save(&session).await;
        *self.current.write().await = Some(session);
        saved
    }

    /// Drop the session from memory and disk.
    pub async fn teardown(&self) {
        *self.current.write().await = None;
        if let Err(err) = self.store.clear().await {
            tracing::warn!("Failed to remove auth session file: {}", err);
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub async fn username(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.username.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

//! # quiz-client
//!
//! A terminal client for the quiz backend: theme challenges drawn from the
//! question bank, head-to-head rounds against the AI, leaderboards and a
//! user profile.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_client::auth::{AuthContext, SessionStore};
//! use quiz_client::config::Config;
//! use quiz_client::gateway::Gateway;
//!
//! # async fn demo() -> Result<(), quiz_client::error::AppError> {
//! let config = Config::from_env()?;
//! let auth = AuthContext::init(SessionStore::at(&config.session_file));
//! let gateway = Gateway::from_config(&config, auth)?;
//!
//! let themes = gateway.fetch_all_themes().await?;
//! println!("{}", themes.join(", "));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod session;
pub mod terminal;

pub use error::{ApiError, AppError};
pub use gateway::Gateway;

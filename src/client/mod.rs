//! Terminal quiz client.
//!
//! Provides the interactive TUI on top of the network gateway.

mod runtime;
mod state;
mod ui;

pub use runtime::{PlayOptions, run};
pub use state::{AppEvent, ClientApp, Command, Leaderboards, LoginField, Response, Screen};

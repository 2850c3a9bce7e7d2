//! Screen renderers.

mod leaderboard;
mod login;
mod menu;
mod quiz;
mod render;
mod results;

pub use render::render;

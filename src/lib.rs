//! Live scoreboard aggregation for team-based outdoor quiz events
//!
//! This library turns the event platform's two incompatible API dialects
//! into one consistent domain model: team rankings, a reconciled task
//! catalog, and a deduplicated photo gallery, with poll-to-poll live-update
//! notifications.
//!
//! # Examples
//!
//! ```rust,no_run
//! use quizboard::config::Config;
//! use quizboard::data_fetcher::ScoreboardSession;
//! use quizboard::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::default();
//!     let mut session = ScoreboardSession::new("ApiKey-v1 mytoken", &config)?;
//!
//!     let board = session.load_game("g1").await?;
//!     for team in &board.teams {
//!         println!("{}. {} - {}", team.position, team.name, team.score);
//!     }
//!
//!     if let Some(update) = session.poll_results().await? {
//!         println!("{}", update.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{
    Answer, GameSession, LiveUpdate, Photo, Scoreboard, TaskDefinition, TeamResult,
};
pub use data_fetcher::session::ScoreboardSession;
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

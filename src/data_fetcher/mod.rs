pub mod endpoints;
pub mod envelope;
pub mod models;
pub mod photos;
pub mod poll_tracker;
pub mod processors;
pub mod reconcile;
pub mod richtext;
pub mod sequencer;
pub mod session;
pub mod transport;

pub use models::{Answer, GameSession, LiveUpdate, Photo, Scoreboard, TaskDefinition, TeamResult};
pub use session::ScoreboardSession;

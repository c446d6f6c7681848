pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod server;
pub mod tracker;
pub mod workers;

pub use error::{Result, TrackerError};
pub use models::{BatterLine, MatchPhase, MatchStateRecord, ScoreboardView, TeamInnings};
pub use parser::parse_title;
pub use tracker::ScoreTracker;

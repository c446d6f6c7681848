pub mod match_state;
pub mod scoreboard;

pub use match_state::{BatterLine, MatchPhase, MatchStateRecord, TeamInnings};
pub use scoreboard::ScoreboardView;

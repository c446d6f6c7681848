use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS_LINE: &str = "Live";
pub const DEFAULT_RUN_RATE: &str = "CRR: 0.00";
pub const YET_TO_BAT: &str = "Yet to bat";

/// Which parsing branch produced a record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    Upcoming,
    Live,
    Ended,
    #[default]
    Unknown,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Upcoming => "UPCOMING",
            MatchPhase::Live => "LIVE",
            MatchPhase::Ended => "ENDED",
            MatchPhase::Unknown => "UNKNOWN",
        }
    }
}

/// Match state parsed from a scoreboard page title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStateRecord {
    pub phase: MatchPhase,

    /// Unmodified page title
    pub raw_title: String,

    /// First `" | "` segment of the title
    pub score_line: String,

    /// "TeamA vs TeamB", empty if undetected
    pub short_title: String,

    /// Terminal summary, only set for ended matches
    pub result: String,

    /// Expected start, only set for upcoming matches
    pub start_time: Option<DateTime<Utc>>,

    /// "Live" or "Target: N"
    pub status_line: String,

    /// "CRR: x.xx" with an optional " | RRR: y.yy"
    pub run_rate_text: String,

    pub team1: TeamInnings,
    pub team2: TeamInnings,

    /// Striker first, non-striker second
    pub batters: [BatterLine; 2],

    pub fetched_at: DateTime<Utc>,
}

impl MatchStateRecord {
    /// Record with every field at its documented default
    pub fn new(raw_title: &str, fetched_at: DateTime<Utc>) -> Self {
        let score_line = raw_title.split(" | ").next().unwrap_or_default();

        Self {
            phase: MatchPhase::Unknown,
            raw_title: raw_title.to_string(),
            score_line: score_line.to_string(),
            short_title: String::new(),
            result: String::new(),
            start_time: None,
            status_line: DEFAULT_STATUS_LINE.to_string(),
            run_rate_text: DEFAULT_RUN_RATE.to_string(),
            team1: TeamInnings::new("Team 1"),
            team2: TeamInnings::new("Team 2"),
            batters: [BatterLine::new("Batsman 1"), BatterLine::new("Batsman 2")],
            fetched_at,
        }
    }

    /// Batters that were actually parsed from the title
    pub fn active_batters(&self) -> impl Iterator<Item = &BatterLine> {
        self.batters.iter().filter(|b| !b.is_placeholder())
    }
}

/// Score state of one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInnings {
    pub name: String,
    pub runs: u32,
    pub wickets: u32,

    /// Overs as shown, "<completed>.<balls>"
    pub overs: String,

    /// "Yet to bat" or "<runs>-<wickets> (<overs> overs)"
    pub status: String,
}

impl TeamInnings {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            runs: 0,
            wickets: 0,
            overs: "0.0".to_string(),
            status: YET_TO_BAT.to_string(),
        }
    }

    pub fn has_batted(&self) -> bool {
        self.runs != 0
    }
}

/// One batter at the crease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterLine {
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,

    /// Two decimal places, "0.00" when no balls faced
    pub strike_rate: String,
}

impl BatterLine {
    /// Placeholder entry ("Batsman 1" / "Batsman 2")
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            runs: 0,
            balls_faced: 0,
            strike_rate: "0.00".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.starts_with("Batsman ") && self.runs == 0 && self.balls_faced == 0
    }
}

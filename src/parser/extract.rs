//! Independent extraction steps over title segments.
//!
//! Every step returns `None` when its pattern does not match; callers keep
//! the field default in that case.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

use super::overs::strike_rate;
use crate::models::BatterLine;

struct Patterns {
    upcoming_countdown: Regex,
    teams_with_comma: Regex,
    teams: Regex,
    start_offset: Regex,
    leading_name: Regex,
    score: Regex,
    overs: Regex,
    score_and_overs: Regex,
    batter: Regex,
    loose_overs: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    upcoming_countdown: Regex::new(r"in\s+\d+").unwrap(),
    teams_with_comma: Regex::new(r"(.+?)\s+vs\s+(.+?),").unwrap(),
    teams: Regex::new(r"(.+?)\s+vs\s+(.+)").unwrap(),
    start_offset: Regex::new(r"in\s+(?:(\d+)h\s*)?(?:(\d+)m)?").unwrap(),
    leading_name: Regex::new(r"^([^\d]+)").unwrap(),
    score: Regex::new(r"(\d+)-(\d+)").unwrap(),
    overs: Regex::new(r"\((\d+\.\d+)\)").unwrap(),
    score_and_overs: Regex::new(r"\d+-\d+\s+\(\d+\.\d+\)").unwrap(),
    batter: Regex::new(r"^(.+?)\s+(\d+)\((\d+)\)$").unwrap(),
    loose_overs: Regex::new(r"\(\(?(\d+(?:\.\d+)?)\)?\)").unwrap(),
});

/// Result keywords: "won by", "beat", "match drawn"
pub fn is_finished(score_segment: &str) -> bool {
    let lower = score_segment.to_lowercase();
    lower.contains("won by") || lower.contains("beat") || lower.contains("match drawn")
}

/// "starts at ..." or a countdown such as "in 2h"
pub fn is_upcoming(score_segment: &str) -> bool {
    let lower = score_segment.to_lowercase();
    lower.contains("starts at") || PATTERNS.upcoming_countdown.is_match(&lower)
}

/// "<Team1> vs <Team2>," as found in the meta segment of a finished match
pub fn teams_with_comma(segment: &str) -> Option<(String, String)> {
    let caps = PATTERNS.teams_with_comma.captures(segment)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// "<Team1> vs <Team2>" from a single clause
pub fn teams(clause: &str) -> Option<(String, String)> {
    let caps = PATTERNS.teams.captures(clause)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Countdown "in <H>h <M>m" as a duration; either part may be missing.
///
/// Team names ending in "in" also match `in\s+`, so the first candidate
/// carrying hours or minutes wins.
pub fn start_offset(segment: &str) -> Option<TimeDelta> {
    let caps = PATTERNS
        .start_offset
        .captures_iter(segment)
        .find(|caps| caps.get(1).is_some() || caps.get(2).is_some())?;
    let hours = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok());
    let minutes = caps.get(2).and_then(|m| m.as_str().parse::<i64>().ok());

    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let hours = TimeDelta::try_hours(hours.unwrap_or(0))?;
    let minutes = TimeDelta::try_minutes(minutes.unwrap_or(0))?;
    hours.checked_add(&minutes)
}

/// Leading run of non-digit characters, trimmed
pub fn leading_name(clause: &str) -> Option<String> {
    let caps = PATTERNS.leading_name.captures(clause)?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// First "<runs>-<wickets>"
pub fn score(clause: &str) -> Option<(u32, u32)> {
    let caps = PATTERNS.score.captures(clause)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// First parenthesized decimal, "(12.3)"
pub fn overs(clause: &str) -> Option<String> {
    let caps = PATTERNS.overs.captures(clause)?;
    Some(caps[1].to_string())
}

/// Overs tolerating doubled parentheses and whole numbers, "((12.3))" or "(20)"
pub fn loose_overs(clause: &str) -> Option<String> {
    let caps = PATTERNS.loose_overs.captures(clause)?;
    Some(caps[1].to_string())
}

/// Batters listed after "<runs>-<wickets> (<overs>)" as "(<name> <runs>(<balls>), ...)".
///
/// Slots follow list position: a malformed first entry leaves the striker
/// slot empty even when the second entry parses.
pub fn batters(clause: &str) -> [Option<BatterLine>; 2] {
    let mut lines = [None, None];

    let Some(m) = PATTERNS.score_and_overs.find(clause) else {
        return lines;
    };

    let rest = clause[m.end()..].trim();
    let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
        return lines;
    };

    for (slot, entry) in lines.iter_mut().zip(inner.split(',')) {
        *slot = batter(entry.trim());
    }

    lines
}

/// Single "<name> <runs>(<balls>)" entry
pub fn batter(entry: &str) -> Option<BatterLine> {
    let caps = PATTERNS.batter.captures(entry)?;
    let runs: u32 = caps[2].parse().ok()?;
    let balls_faced: u32 = caps[3].parse().ok()?;

    Some(BatterLine {
        name: caps[1].trim().to_string(),
        runs,
        balls_faced,
        strike_rate: strike_rate(runs, balls_faced),
    })
}

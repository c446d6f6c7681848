//! Turns a scoreboard page title into a [`MatchStateRecord`].
//!
//! Titles look like
//! `"RCB 120-3 (12.3) (Kohli 45(30), Maxwell 20(15)) vs CSK 180-5 (20) | ..."`.
//! The first `" | "` segment carries the score, the rest carries team and
//! series metadata. Parsing never fails: every field whose pattern does not
//! match keeps its default.

pub mod extract;
pub mod overs;

use chrono::{DateTime, Utc};

use crate::models::{MatchPhase, MatchStateRecord, TeamInnings};

const SEGMENT_DELIMITER: &str = " | ";

/// Parse a page title, stamping the record with the current time
pub fn parse_title(title: &str) -> MatchStateRecord {
    parse_title_at(title, Utc::now())
}

/// Parse a page title as of `now`
pub fn parse_title_at(title: &str, now: DateTime<Utc>) -> MatchStateRecord {
    let mut record = MatchStateRecord::new(title, now);

    if record.score_line.trim().is_empty() {
        return record;
    }

    if extract::is_finished(&record.score_line) {
        parse_finished(&mut record);
    } else if extract::is_upcoming(&record.score_line) {
        parse_upcoming(&mut record, now);
    } else if record.score_line.contains(" vs ") {
        parse_live(&mut record);
    }
    // No result, countdown or "A vs B" pairing: leave the phase UNKNOWN
    // rather than report a live match with nothing but defaults.

    record
}

fn parse_finished(record: &mut MatchStateRecord) {
    record.phase = MatchPhase::Ended;
    record.result = record.score_line.clone();

    let teams = record
        .raw_title
        .split(SEGMENT_DELIMITER)
        .nth(1)
        .and_then(extract::teams_with_comma);

    if let Some((team1, team2)) = teams {
        set_short_title(record, team1, team2);
    }
}

fn parse_upcoming(record: &mut MatchStateRecord, now: DateTime<Utc>) {
    record.phase = MatchPhase::Upcoming;

    let first_clause = record.score_line.split(',').next().unwrap_or_default();
    if let Some((team1, team2)) = extract::teams(first_clause) {
        set_short_title(record, team1, team2);
    }

    record.start_time = extract::start_offset(&record.score_line)
        .and_then(|offset| now.checked_add_signed(offset));
}

fn parse_live(record: &mut MatchStateRecord) {
    record.phase = MatchPhase::Live;

    let score_line = record.score_line.clone();
    let Some((team1_clause, team2_clause)) = score_line.split_once(" vs ") else {
        return;
    };
    let team1_clause = team1_clause.trim();
    let team2_clause = team2_clause.trim();

    match (
        extract::leading_name(team1_clause),
        extract::leading_name(team2_clause),
    ) {
        (Some(team1), Some(team2)) => set_short_title(record, team1, team2),
        (Some(team1), None) => record.team1.name = team1,
        (None, Some(team2)) => record.team2.name = team2,
        (None, None) => {}
    }

    if let Some((runs, wickets)) = extract::score(team1_clause) {
        record.team1.runs = runs;
        record.team1.wickets = wickets;
    }
    let team1_overs = extract::overs(team1_clause);
    let team1_at_crease = team1_overs.is_some();
    if let Some(overs) = team1_overs {
        record.team1.overs = overs;
    }

    let parsed_batters = extract::batters(team1_clause);
    for (slot, line) in record.batters.iter_mut().zip(parsed_batters) {
        if let Some(line) = line {
            *slot = line;
        }
    }

    if let Some((runs, wickets)) = extract::score(team2_clause) {
        record.team2.runs = runs;
        record.team2.wickets = wickets;
    }
    if let Some(overs) = extract::loose_overs(team2_clause) {
        record.team2.overs = overs;
    }

    // The batting side is in once overs are shown, even on 0 runs
    if team1_at_crease {
        set_innings_status(&mut record.team1);
    }
    if record.team2.has_batted() {
        set_innings_status(&mut record.team2);
    }

    apply_run_rates(record);
}

fn set_short_title(record: &mut MatchStateRecord, team1: String, team2: String) {
    record.short_title = format!("{} vs {}", team1, team2);
    record.team1.name = team1;
    record.team2.name = team2;
}

fn set_innings_status(innings: &mut TeamInnings) {
    innings.status = format!(
        "{}-{} ({} overs)",
        innings.runs, innings.wickets, innings.overs
    );
}

/// CRR for the batting side and, in a chase, RRR against the first innings
fn apply_run_rates(record: &mut MatchStateRecord) {
    let batting_overs = overs::overs_to_decimal(&record.team1.overs);
    let Some(crr) = overs::current_run_rate(record.team1.runs, batting_overs) else {
        return;
    };
    record.run_rate_text = format!("CRR: {:.2}", crr);

    if !record.team2.has_batted() {
        return;
    }

    let target = i64::from(record.team2.runs) + 1;
    let runs_needed = target - i64::from(record.team1.runs);
    let overs_left = overs::overs_to_decimal(&record.team2.overs) - batting_overs;

    if let Some(rrr) = overs::required_run_rate(runs_needed, overs_left) {
        record.run_rate_text.push_str(&format!(" | RRR: {:.2}", rrr));
        record.status_line = format!("Target: {}", target);
    }
}

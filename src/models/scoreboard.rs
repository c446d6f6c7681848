use serde::Serialize;

use super::match_state::MatchStateRecord;

/// Flattened JSON shape consumed by the live scoreboard page
#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardView {
    #[serde(rename = "matchState")]
    pub match_state: String,
    pub title: String,
    #[serde(rename = "shortTitle")]
    pub short_title: String,
    pub result: String,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: Option<String>,
    pub update: String,
    pub livescore: String,
    pub runrate: String,

    pub team1_name: String,
    pub team1_score: String,
    pub team1_wickets: String,
    pub team1_overs: String,
    pub team2_name: String,
    pub team2_score: String,
    pub team2_wickets: String,
    pub team2_overs: String,
    pub team2_status: String,

    pub batterone: String,
    pub batsmanonerun: String,
    pub batsmanoneball: String,
    pub batsmanonesr: String,
    pub battertwo: String,
    pub batsmantworun: String,
    pub batsmantwoball: String,
    pub batsmantwosr: String,

    pub timestamp: String,
}

impl From<&MatchStateRecord> for ScoreboardView {
    fn from(record: &MatchStateRecord) -> Self {
        let [one, two] = &record.batters;

        Self {
            match_state: record.phase.as_str().to_string(),
            title: record.raw_title.clone(),
            short_title: record.short_title.clone(),
            result: record.result.clone(),
            start_time_utc: record
                .start_time
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()),
            update: record.status_line.clone(),
            livescore: record.score_line.clone(),
            runrate: record.run_rate_text.clone(),

            team1_name: record.team1.name.clone(),
            team1_score: record.team1.runs.to_string(),
            team1_wickets: record.team1.wickets.to_string(),
            team1_overs: record.team1.overs.clone(),
            team2_name: record.team2.name.clone(),
            team2_score: record.team2.runs.to_string(),
            team2_wickets: record.team2.wickets.to_string(),
            team2_overs: record.team2.overs.clone(),
            team2_status: record.team2.status.clone(),

            batterone: one.name.clone(),
            batsmanonerun: one.runs.to_string(),
            batsmanoneball: format!("({})", one.balls_faced),
            batsmanonesr: one.strike_rate.clone(),
            battertwo: two.name.clone(),
            batsmantworun: two.runs.to_string(),
            batsmantwoball: format!("({})", two.balls_faced),
            batsmantwosr: two.strike_rate.clone(),

            timestamp: record.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_view_uses_client_field_names() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 5).unwrap();
        let mut record = MatchStateRecord::new("CSK 50-1 (6.0) vs MI", fetched_at);
        record.team1.runs = 50;
        record.team1.wickets = 1;
        record.batters[0].name = "Gaikwad".to_string();
        record.batters[0].balls_faced = 12;

        let json = serde_json::to_value(ScoreboardView::from(&record)).unwrap();

        assert_eq!(json["matchState"], "UNKNOWN");
        assert_eq!(json["livescore"], "CSK 50-1 (6.0) vs MI");
        assert_eq!(json["team1_score"], "50");
        assert_eq!(json["team1_wickets"], "1");
        assert_eq!(json["batterone"], "Gaikwad");
        assert_eq!(json["batsmanoneball"], "(12)");
        assert_eq!(json["battertwo"], "Batsman 2");
        assert_eq!(json["team2_status"], "Yet to bat");
        assert!(json["startTimeUTC"].is_null());
        assert_eq!(json["timestamp"], "2024-03-01 18:30:05");
    }

    #[test]
    fn test_start_time_is_iso_with_zulu() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let mut record = MatchStateRecord::new("A vs B, starts in 1h", fetched_at);
        record.start_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 19, 0, 0).unwrap());

        let view = ScoreboardView::from(&record);

        assert_eq!(
            view.start_time_utc.as_deref(),
            Some("2024-03-01T19:00:00.000000Z")
        );
    }
}

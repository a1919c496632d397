use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::match_stats::TeamStatistics;
use crate::model::{MatchResult, MatchStatus, MatchTeam};

#[derive(Debug, Deserialize)]
struct ApiFootballEnvelope {
    #[serde(default)]
    errors: Value,
    #[serde(default)]
    response: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    fixture: ApiFixtureCore,
    #[serde(default)]
    league: Option<ApiLeague>,
    #[serde(default)]
    teams: Option<ApiTeams>,
    #[serde(default)]
    goals: Option<ApiGoals>,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureCore {
    id: u64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    short: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiLeague {
    #[serde(default)]
    round: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTeams {
    #[serde(default)]
    home: Option<ApiTeam>,
    #[serde(default)]
    away: Option<ApiTeam>,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiGoals {
    #[serde(default)]
    home: Option<u32>,
    #[serde(default)]
    away: Option<u32>,
}

/// Parses a `/fixtures` response into match records.
///
/// A fixture that does not match the expected shape (no id, a score that is
/// not a number) fails the whole payload. Absent teams, rounds and goals are
/// carried through so the standings replay can reject them.
pub fn parse_fixtures_response_json(raw: &str) -> Result<Vec<MatchResult>> {
    let Some(envelope) = parse_envelope(raw)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(envelope.response.len());
    for (index, item) in envelope.response.into_iter().enumerate() {
        let fixture_id = item.pointer("/fixture/id").cloned();
        let fixture: ApiFixture =
            serde_json::from_value(item).with_context(|| match &fixture_id {
                Some(id) => format!("invalid fixture {id} at response[{index}]"),
                None => format!("invalid fixture at response[{index}]"),
            })?;
        out.push(into_match_result(fixture));
    }
    debug!(fixtures = out.len(), "parsed api-football fixtures");
    Ok(out)
}

/// Parses a `/fixtures/statistics` response (one block per team).
pub fn parse_statistics_response_json(raw: &str) -> Result<Vec<TeamStatistics>> {
    let Some(envelope) = parse_envelope(raw)? else {
        return Ok(Vec::new());
    };
    envelope
        .response
        .into_iter()
        .map(|item| serde_json::from_value(item).context("invalid statistics block"))
        .collect()
}

/// Reads a fixtures file: either an API-Football envelope or a plain array of matches.
pub fn load_matches_file(path: &Path) -> Result<Vec<MatchResult>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read fixtures file {}", path.display()))?;
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .with_context(|| format!("invalid match list in {}", path.display()));
    }
    parse_fixtures_response_json(trimmed)
        .with_context(|| format!("invalid api-football payload in {}", path.display()))
}

fn parse_envelope(raw: &str) -> Result<Option<ApiFootballEnvelope>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let envelope: ApiFootballEnvelope =
        serde_json::from_str(trimmed).context("invalid api-football json")?;
    if let Some(errors) = non_empty_errors(&envelope.errors) {
        return Err(anyhow!("api-football error: {errors}"));
    }
    Ok(Some(envelope))
}

// The feed sends `errors: []` when fine and `errors: {"token": "..."}` when not.
fn non_empty_errors(errors: &Value) -> Option<String> {
    match errors {
        Value::Object(map) if !map.is_empty() => Some(
            map.iter()
                .map(|(k, v)| match v.as_str() {
                    Some(text) => format!("{k}: {text}"),
                    None => format!("{k}: {v}"),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

fn into_match_result(f: ApiFixture) -> MatchResult {
    let status = f
        .fixture
        .status
        .and_then(|s| s.short)
        .map(|s| MatchStatus::from_short_code(&s))
        .unwrap_or(MatchStatus::Other(String::new()));
    let kickoff = f.fixture.date.as_deref().and_then(parse_kickoff);
    let (home_team, away_team) = match f.teams {
        Some(teams) => (into_team(teams.home), into_team(teams.away)),
        None => (MatchTeam::new(0, ""), MatchTeam::new(0, "")),
    };
    let (home_goals, away_goals) = f.goals.map(|g| (g.home, g.away)).unwrap_or((None, None));
    MatchResult {
        id: f.fixture.id,
        status,
        round: f.league.and_then(|l| l.round),
        kickoff,
        home_team,
        away_team,
        home_goals,
        away_goals,
    }
}

fn into_team(team: Option<ApiTeam>) -> MatchTeam {
    let team = team.unwrap_or(ApiTeam {
        id: None,
        name: None,
    });
    MatchTeam::new(team.id.unwrap_or(0), team.name.unwrap_or_default())
}

fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_object_fails_the_parse() {
        let raw = r#"{"errors":{"token":"Error/Missing application key"},"response":[]}"#;
        let err = parse_fixtures_response_json(raw).unwrap_err();
        assert!(err.to_string().contains("Missing application key"));
    }

    #[test]
    fn non_string_error_values_are_kept() {
        let raw = r#"{"errors":{"rateLimit":{"limit":10},"requests":30},"response":[]}"#;
        let msg = parse_fixtures_response_json(raw).unwrap_err().to_string();
        assert!(msg.contains(r#"rateLimit: {"limit":10}"#), "{msg}");
        assert!(msg.contains("requests: 30"), "{msg}");
    }

    #[test]
    fn empty_errors_array_is_fine() {
        let raw = r#"{"errors":[],"results":0,"response":[]}"#;
        assert!(parse_fixtures_response_json(raw).unwrap().is_empty());
    }

    #[test]
    fn null_is_empty() {
        assert!(parse_fixtures_response_json("null").unwrap().is_empty());
        assert!(parse_statistics_response_json("").unwrap().is_empty());
    }

    #[test]
    fn kickoff_accepts_offsets() {
        let dt = parse_kickoff("2024-08-17T14:00:00+00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-08-17T14:00:00+00:00");
        assert!(parse_kickoff("17/08/2024").is_none());
    }
}

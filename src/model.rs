use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TeamId = u32;

/// Match state as reported by the fixtures feed (API-Football short codes).
///
/// Codes without a dedicated variant keep their feed spelling, so a status
/// written back out reads the same as it came in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    Scheduled,
    /// In-play code such as `1H`, `HT` or `ET`.
    Live(String),
    Finished,
    FinishedAfterExtraTime,
    FinishedOnPenalties,
    Postponed,
    Cancelled,
    Other(String),
}

impl MatchStatus {
    pub fn from_short_code(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FT" => Self::Finished,
            "AET" => Self::FinishedAfterExtraTime,
            "PEN" => Self::FinishedOnPenalties,
            "NS" => Self::Scheduled,
            code @ ("1H" | "HT" | "2H" | "ET" | "BT" | "P" | "LIVE" | "INT" | "SUSP") => {
                Self::Live(code.to_string())
            }
            "PST" => Self::Postponed,
            "CANC" => Self::Cancelled,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn short_code(&self) -> &str {
        match self {
            Self::Scheduled => "NS",
            Self::Live(code) => code.as_str(),
            Self::Finished => "FT",
            Self::FinishedAfterExtraTime => "AET",
            Self::FinishedOnPenalties => "PEN",
            Self::Postponed => "PST",
            Self::Cancelled => "CANC",
            Self::Other(code) => code.as_str(),
        }
    }

    /// Only full time, after extra time and penalties count as a result.
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            Self::Finished | Self::FinishedAfterExtraTime | Self::FinishedOnPenalties
        )
    }
}

impl From<String> for MatchStatus {
    fn from(raw: String) -> Self {
        Self::from_short_code(&raw)
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        status.short_code().to_string()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTeam {
    #[serde(default)]
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
}

impl MatchTeam {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Feeds report absent teams as id 0 and/or an empty name.
    pub fn is_valid(&self) -> bool {
        self.id != 0 && !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

pub fn classify_outcome(goals_for: u32, goals_against: u32) -> Outcome {
    if goals_for > goals_against {
        Outcome::Win
    } else if goals_for < goals_against {
        Outcome::Loss
    } else {
        Outcome::Draw
    }
}

/// One fixture of a competition season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: u64,
    pub status: MatchStatus,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    pub home_team: MatchTeam,
    pub away_team: MatchTeam,
    #[serde(default)]
    pub home_goals: Option<u32>,
    #[serde(default)]
    pub away_goals: Option<u32>,
}

impl MatchResult {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn venue_of(&self, team_id: TeamId) -> Option<Venue> {
        if self.home_team.id == team_id {
            Some(Venue::Home)
        } else if self.away_team.id == team_id {
            Some(Venue::Away)
        } else {
            None
        }
    }

    /// Goals (for, against) from the point of view of `venue`, missing counts as 0.
    pub fn goals_for_venue(&self, venue: Venue) -> (u32, u32) {
        let home = self.home_goals.unwrap_or(0);
        let away = self.away_goals.unwrap_or(0);
        match venue {
            Venue::Home => (home, away),
            Venue::Away => (away, home),
        }
    }
}

/// Iterator over the matches that count for analytics.
pub fn completed(matches: &[MatchResult]) -> impl Iterator<Item = &MatchResult> {
    matches.iter().filter(|m| m.is_completed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_final_whistle_codes_are_completed() {
        for code in ["FT", "AET", "PEN", "ft"] {
            assert!(MatchStatus::from_short_code(code).is_completed(), "{code}");
        }
        for code in ["NS", "TBD", "1H", "HT", "PST", "CANC", "AWD", "WO"] {
            assert!(!MatchStatus::from_short_code(code).is_completed(), "{code}");
        }
    }

    #[test]
    fn status_serializes_as_short_code() {
        let json = serde_json::to_string(&MatchStatus::FinishedOnPenalties).unwrap();
        assert_eq!(json, "\"PEN\"");
        let back: MatchStatus = serde_json::from_str("\"AWD\"").unwrap();
        assert_eq!(back, MatchStatus::Other("AWD".to_string()));
    }

    #[test]
    fn feed_codes_survive_a_round_trip() {
        for code in ["NS", "TBD", "1H", "HT", "ET", "P", "PST", "CANC", "ABD", "AWD", "FT", "AET"] {
            let status = MatchStatus::from_short_code(code);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{code}\""));
            let back: MatchStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert_eq!(
            MatchStatus::from_short_code("ht"),
            MatchStatus::Live("HT".to_string())
        );
    }

    #[test]
    fn zero_id_or_blank_name_is_invalid_team() {
        assert!(MatchTeam::new(42, "Arsenal").is_valid());
        assert!(!MatchTeam::new(0, "Arsenal").is_valid());
        assert!(!MatchTeam::new(42, "  ").is_valid());
    }
}

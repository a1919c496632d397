use serde::{Deserialize, Serialize};

use crate::model::MatchTeam;

/// A statistic cell as the feed sends it: a number, a string such as "58%", or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl StatValue {
    /// Numeric reading of the cell; null and unparseable text read as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            StatValue::Number(v) => *v,
            StatValue::Text(raw) => parse_stat_cell(raw).unwrap_or(0.0),
            StatValue::Missing => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: StatValue,
}

/// Per-team statistics block of a single fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: MatchTeam,
    #[serde(default)]
    pub statistics: Vec<StatEntry>,
}

impl TeamStatistics {
    pub fn value_of(&self, kind: &str) -> Option<&StatValue> {
        self.statistics
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| &s.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatComparison {
    pub yours: StatValue,
    pub opponent: StatValue,
    pub your_num: f64,
    pub opponent_num: f64,
}

/// Looks up `kind` on both sides and orients the pair towards the followed team.
pub fn compare_match_stat(
    kind: &str,
    is_home_team: bool,
    home: Option<&TeamStatistics>,
    away: Option<&TeamStatistics>,
) -> MatchStatComparison {
    let lookup = |side: Option<&TeamStatistics>| {
        side.and_then(|s| s.value_of(kind))
            .cloned()
            .unwrap_or(StatValue::Number(0.0))
    };
    let home_value = lookup(home);
    let away_value = lookup(away);
    let (yours, opponent) = if is_home_team {
        (home_value, away_value)
    } else {
        (away_value, home_value)
    };
    MatchStatComparison {
        your_num: yours.as_number(),
        opponent_num: opponent.as_number(),
        yours,
        opponent,
    }
}

fn parse_stat_cell(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let s = s.trim_end_matches('%').replace(',', "");
    s.trim().parse::<f64>().ok()
}

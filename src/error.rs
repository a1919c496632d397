use std::fmt;

use crate::model::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    HomeGoals,
    AwayGoals,
    HomeTeam,
    AwayTeam,
    Round,
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HomeGoals => "home goals",
            Self::AwayGoals => "away goals",
            Self::HomeTeam => "home team info",
            Self::AwayTeam => "away team info",
            Self::Round => "round info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("invalid match data: missing {field} for match {match_id}")]
    MissingField { match_id: u64, field: MatchField },

    #[error("invalid match data: no matchweek number in round {round:?} for match {match_id}")]
    UnparseableRound { match_id: u64, round: String },

    #[error("team {team_id} not found in league standings after matchweek {matchweek}")]
    TeamNotInStandings { team_id: TeamId, matchweek: u32 },
}

impl AnalyticsError {
    pub fn match_id(&self) -> Option<u64> {
        match self {
            Self::MissingField { match_id, .. } | Self::UnparseableRound { match_id, .. } => {
                Some(*match_id)
            }
            Self::TeamNotInStandings { .. } => None,
        }
    }
}

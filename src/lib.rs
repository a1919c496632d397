pub mod api_football;
pub mod config;
pub mod error;
pub mod home_away;
pub mod match_stats;
pub mod model;
pub mod report;
pub mod standings;
pub mod summary;
pub mod synthetic;

pub use error::{AnalyticsError, MatchField};
pub use home_away::{
    ComparisonMetric, HomeAwayStats, Metric, VenueStats, compute_home_away_stats,
    normalize_for_comparison,
};
pub use model::{MatchResult, MatchStatus, MatchTeam, TeamId, Venue};
pub use standings::{
    DEFAULT_TIE_BREAK, MatchweekTable, PositionSnapshot, TeamStanding, TieBreak,
    compute_final_standings, compute_position_history, compute_position_history_with,
    replay_standings,
};
pub use summary::{SeasonSummary, compute_season_summary};

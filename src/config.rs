use std::env;
use std::path::PathBuf;

use crate::model::TeamId;

/// Team followed when nothing else is configured (Arsenal on API-Football).
pub const DEFAULT_TEAM_ID: TeamId = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub team_id: TeamId,
    pub fixtures_path: Option<PathBuf>,
    pub season: Option<String>,
    pub report_parallelism: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            team_id: DEFAULT_TEAM_ID,
            fixtures_path: None,
            season: None,
            report_parallelism: 4,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let team_id = lookup("API_FOOTBALL_TEAM_ID")
            .and_then(|val| val.trim().parse::<TeamId>().ok())
            .filter(|id| *id != 0)
            .unwrap_or(defaults.team_id);
        let fixtures_path = lookup("FIXTURES_PATH")
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from);
        let season = lookup("SEASON").filter(|val| !val.trim().is_empty());
        let report_parallelism = lookup("REPORT_PARALLELISM")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(defaults.report_parallelism)
            .clamp(1, 32);
        Self {
            team_id,
            fixtures_path,
            season,
            report_parallelism,
        }
    }

    /// "2024/25 Season" style title, when a season is configured.
    pub fn season_title(&self) -> Option<String> {
        let season = self.season.as_deref()?;
        let start = season.trim().parse::<u32>().ok()?;
        Some(format!("{start}/{:02} Season", (start + 1) % 100))
    }
}

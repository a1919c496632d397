use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AnalyticsError;
use crate::home_away::{ComparisonMetric, HomeAwayStats, compute_home_away_stats, normalize_for_comparison};
use crate::model::{MatchResult, TeamId, completed};
use crate::standings::{PositionSnapshot, compute_position_history};
use crate::summary::{SeasonSummary, compute_season_summary};

/// Everything the season page shows for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub team_id: TeamId,
    pub team_name: Option<String>,
    pub summary: SeasonSummary,
    pub position_history: Vec<PositionSnapshot>,
    pub home_away: HomeAwayStats,
    pub comparison: Vec<ComparisonMetric>,
}

impl SeasonReport {
    pub fn current_position(&self) -> Option<&PositionSnapshot> {
        self.position_history.last()
    }

    /// Best (lowest) league position reached so far.
    pub fn best_position(&self) -> Option<u32> {
        self.position_history.iter().map(|s| s.position).min()
    }
}

pub fn build_season_report(
    matches: &[MatchResult],
    team_id: TeamId,
) -> Result<SeasonReport, AnalyticsError> {
    let position_history = compute_position_history(matches, team_id)?;
    let home_away = compute_home_away_stats(matches, team_id);
    Ok(SeasonReport {
        team_id,
        team_name: team_name(matches, team_id),
        summary: compute_season_summary(matches, team_id),
        position_history,
        comparison: normalize_for_comparison(&home_away),
        home_away,
    })
}

/// One report per team with a completed match, built on a rayon pool.
pub fn build_league_reports(
    matches: &[MatchResult],
    parallelism: usize,
) -> Vec<(TeamId, Result<SeasonReport, AnalyticsError>)> {
    let team_ids = teams_with_results(matches);
    debug!(teams = team_ids.len(), parallelism, "building league reports");
    let build = || {
        team_ids
            .par_iter()
            .map(|&id| (id, build_season_report(matches, id)))
            .collect::<Vec<_>>()
    };
    match rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()
    {
        Ok(pool) => pool.install(build),
        Err(err) => {
            warn!("report pool unavailable, using global pool: {err}");
            build()
        }
    }
}

fn teams_with_results(matches: &[MatchResult]) -> Vec<TeamId> {
    let mut ids: BTreeSet<TeamId> = BTreeSet::new();
    for m in completed(matches) {
        ids.insert(m.home_team.id);
        ids.insert(m.away_team.id);
    }
    ids.into_iter().collect()
}

fn team_name(matches: &[MatchResult], team_id: TeamId) -> Option<String> {
    matches.iter().find_map(|m| {
        [&m.home_team, &m.away_team]
            .into_iter()
            .find(|t| t.id == team_id && !t.name.trim().is_empty())
            .map(|t| t.name.clone())
    })
}

/// 1 -> "1st", 12 -> "12th", 22 -> "22nd".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn render_text(report: &SeasonReport) -> String {
    let mut out = String::new();
    let name = report
        .team_name
        .clone()
        .unwrap_or_else(|| format!("Team {}", report.team_id));
    let s = &report.summary;
    out.push_str(&format!("{name}\n"));
    match report.current_position() {
        Some(snap) => out.push_str(&format!(
            "Position: {} after matchweek {} ({} pts)\n",
            ordinal(snap.position),
            snap.matchweek,
            snap.points
        )),
        None => out.push_str("Position: no finished matches yet\n"),
    }
    out.push_str(&format!(
        "Record: {}W {}D {}L in {} games, {} pts ({:.2} PPG)\n",
        s.wins,
        s.draws,
        s.losses,
        s.played,
        s.points(),
        s.points_per_game()
    ));
    out.push_str(&format!(
        "Goals: {} for, {} against, {:+} GD\n",
        s.goals_for, s.goals_against, s.goal_difference
    ));
    if !report.position_history.is_empty() {
        let trail: Vec<String> = report
            .position_history
            .iter()
            .map(|snap| format!("MW{} {}", snap.matchweek, ordinal(snap.position)))
            .collect();
        out.push_str(&format!("Trajectory: {}\n", trail.join(", ")));
    }
    out.push_str(&format!("{:<14}{:>8}{:>8}\n", "", "Home", "Away"));
    for row in &report.comparison {
        out.push_str(&format!(
            "{:<14}{:>8}{:>8}\n",
            row.label,
            format!("{:.2}", row.home_raw),
            format!("{:.2}", row.away_raw)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::ordinal;

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(112), "112th");
    }
}

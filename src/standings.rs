use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, MatchField};
use crate::model::{MatchResult, MatchTeam, Outcome, TeamId, classify_outcome, completed};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Last-resort ordering once points, goal difference and goals scored are level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    TeamName,
    TeamId,
}

/// Alphabetical, not the competition rulebook (no head-to-head, no fair play).
pub const DEFAULT_TIE_BREAK: TieBreak = TieBreak::TeamName;

impl TieBreak {
    pub fn compare(self, a: &TeamStanding, b: &TeamStanding) -> Ordering {
        match self {
            Self::TeamName => a
                .team_name
                .to_lowercase()
                .cmp(&b.team_name.to_lowercase())
                .then_with(|| a.team_name.cmp(&b.team_name)),
            Self::TeamId => a.team_id.cmp(&b.team_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl TeamStanding {
    fn new(team: &MatchTeam) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
        }
    }

    fn record(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        match classify_outcome(goals_for, goals_against) {
            Outcome::Win => {
                self.wins += 1;
                self.points += POINTS_FOR_WIN;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Outcome::Loss => self.losses += 1,
        }
    }
}

/// Points, goal difference, goals scored (all descending), then `tie_break`.
/// Team id settles anything still level so the order is total.
pub fn compare_standings(a: &TeamStanding, b: &TeamStanding, tie_break: TieBreak) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
        .then_with(|| tie_break.compare(a, b))
        .then(a.team_id.cmp(&b.team_id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub matchweek: u32,
    pub position: u32,
    pub points: u32,
}

/// Ranked table after every result of `matchweek` has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchweekTable {
    pub matchweek: u32,
    pub table: Vec<TeamStanding>,
}

/// First run of ASCII digits in a round label, e.g. "Regular Season - 10" -> 10.
///
/// Labels are expected to follow the league-phase "<phase> - <n>" pattern;
/// knockout rounds ("Quarter-finals") carry no matchweek and yield `None`.
pub fn extract_matchweek(round: &str) -> Option<u32> {
    let digits: String = round
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok()
}

pub fn compute_position_history(
    matches: &[MatchResult],
    team_id: TeamId,
) -> Result<Vec<PositionSnapshot>, AnalyticsError> {
    compute_position_history_with(matches, team_id, DEFAULT_TIE_BREAK)
}

/// League position of `team_id` after each matchweek that has a completed result.
pub fn compute_position_history_with(
    matches: &[MatchResult],
    team_id: TeamId,
    tie_break: TieBreak,
) -> Result<Vec<PositionSnapshot>, AnalyticsError> {
    let mut history = Vec::new();
    replay(matches, tie_break, |matchweek, ranked| {
        let Some(idx) = ranked.iter().position(|row| row.team_id == team_id) else {
            return Err(AnalyticsError::TeamNotInStandings { team_id, matchweek });
        };
        history.push(PositionSnapshot {
            matchweek,
            position: idx as u32 + 1,
            points: ranked[idx].points,
        });
        Ok(())
    })?;
    Ok(history)
}

pub fn replay_standings(matches: &[MatchResult]) -> Result<Vec<MatchweekTable>, AnalyticsError> {
    replay_standings_with(matches, DEFAULT_TIE_BREAK)
}

pub fn replay_standings_with(
    matches: &[MatchResult],
    tie_break: TieBreak,
) -> Result<Vec<MatchweekTable>, AnalyticsError> {
    let mut tables = Vec::new();
    replay(matches, tie_break, |matchweek, ranked| {
        tables.push(MatchweekTable {
            matchweek,
            table: ranked.iter().map(|row| (*row).clone()).collect(),
        });
        Ok(())
    })?;
    Ok(tables)
}

/// Table after the last replayed matchweek; empty when nothing has finished.
pub fn compute_final_standings(matches: &[MatchResult]) -> Result<Vec<TeamStanding>, AnalyticsError> {
    let tables = replay_standings(matches)?;
    Ok(tables.into_iter().last().map(|t| t.table).unwrap_or_default())
}

struct ValidatedMatch<'a> {
    matchweek: u32,
    home: &'a MatchTeam,
    away: &'a MatchTeam,
    home_goals: u32,
    away_goals: u32,
}

fn validate_match(m: &MatchResult) -> Result<ValidatedMatch<'_>, AnalyticsError> {
    let missing = |field| AnalyticsError::MissingField {
        match_id: m.id,
        field,
    };
    let home_goals = m.home_goals.ok_or_else(|| missing(MatchField::HomeGoals))?;
    let away_goals = m.away_goals.ok_or_else(|| missing(MatchField::AwayGoals))?;
    if !m.home_team.is_valid() {
        return Err(missing(MatchField::HomeTeam));
    }
    if !m.away_team.is_valid() {
        return Err(missing(MatchField::AwayTeam));
    }
    let round = m
        .round
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| missing(MatchField::Round))?;
    let matchweek = extract_matchweek(round).ok_or_else(|| AnalyticsError::UnparseableRound {
        match_id: m.id,
        round: round.to_string(),
    })?;
    Ok(ValidatedMatch {
        matchweek,
        home: &m.home_team,
        away: &m.away_team,
        home_goals,
        away_goals,
    })
}

// The accumulator never leaves this function; callers only see ranked borrows.
fn replay(
    matches: &[MatchResult],
    tie_break: TieBreak,
    mut visit: impl FnMut(u32, &[&TeamStanding]) -> Result<(), AnalyticsError>,
) -> Result<(), AnalyticsError> {
    let validated = completed(matches)
        .map(validate_match)
        .collect::<Result<Vec<_>, _>>()?;
    if validated.is_empty() {
        return Ok(());
    }

    let mut standings: HashMap<TeamId, TeamStanding> = HashMap::new();
    for m in &validated {
        standings
            .entry(m.home.id)
            .or_insert_with(|| TeamStanding::new(m.home));
        standings
            .entry(m.away.id)
            .or_insert_with(|| TeamStanding::new(m.away));
    }

    let mut by_matchweek: BTreeMap<u32, Vec<&ValidatedMatch>> = BTreeMap::new();
    for m in &validated {
        by_matchweek.entry(m.matchweek).or_default().push(m);
    }

    for (matchweek, fixtures) in &by_matchweek {
        for m in fixtures {
            if let Some(home) = standings.get_mut(&m.home.id) {
                home.record(m.home_goals, m.away_goals);
            }
            if let Some(away) = standings.get_mut(&m.away.id) {
                away.record(m.away_goals, m.home_goals);
            }
        }
        let mut ranked: Vec<&TeamStanding> = standings.values().collect();
        ranked.sort_by(|a, b| compare_standings(a, b, tie_break));
        visit(*matchweek, &ranked)?;
    }

    debug!(
        matches = validated.len(),
        teams = standings.len(),
        matchweeks = by_matchweek.len(),
        "replayed standings"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchStatus;

    fn row(id: TeamId, name: &str, points: u32, gf: u32, ga: u32) -> TeamStanding {
        TeamStanding {
            team_id: id,
            team_name: name.to_string(),
            played: 1,
            wins: 0,
            draws: 0,
            losses: 0,
            points,
            goals_for: gf,
            goals_against: ga,
            goal_difference: i64::from(gf) - i64::from(ga),
        }
    }

    #[test]
    fn extract_matchweek_takes_first_digit_run() {
        assert_eq!(extract_matchweek("Regular Season - 10"), Some(10));
        assert_eq!(extract_matchweek("Matchday 3 (replay 2)"), Some(3));
        assert_eq!(extract_matchweek("7"), Some(7));
        assert_eq!(extract_matchweek("Quarter-finals"), None);
        assert_eq!(extract_matchweek(""), None);
    }

    #[test]
    fn ranking_order_is_points_then_gd_then_goals_for() {
        let a = row(1, "Alpha", 6, 3, 2);
        let b = row(2, "Bravo", 6, 5, 2);
        let c = row(3, "Charlie", 6, 6, 3);
        let d = row(4, "Delta", 7, 0, 0);
        let mut rows = vec![&a, &b, &c, &d];
        rows.sort_by(|x, y| compare_standings(x, y, DEFAULT_TIE_BREAK));
        let ids: Vec<TeamId> = rows.iter().map(|r| r.team_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn tie_break_policy_is_swappable() {
        let zulu = row(1, "Zulu", 3, 2, 1);
        let alpha = row(9, "alpha", 3, 2, 1);
        assert_eq!(
            compare_standings(&alpha, &zulu, TieBreak::TeamName),
            Ordering::Less
        );
        assert_eq!(
            compare_standings(&alpha, &zulu, TieBreak::TeamId),
            Ordering::Greater
        );
    }

    #[test]
    fn validation_checks_goals_before_teams_and_round() {
        let m = MatchResult {
            id: 77,
            status: MatchStatus::Finished,
            round: None,
            kickoff: None,
            home_team: MatchTeam::new(0, ""),
            away_team: MatchTeam::new(2, "B"),
            home_goals: Some(1),
            away_goals: None,
        };
        let err = validate_match(&m).err().unwrap();
        assert_eq!(
            err,
            AnalyticsError::MissingField {
                match_id: 77,
                field: MatchField::AwayGoals
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid match data: missing away goals for match 77"
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::model::{MatchResult, Outcome, TeamId, classify_outcome, completed};
use crate::standings::{POINTS_FOR_DRAW, POINTS_FOR_WIN};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl SeasonSummary {
    pub fn points(&self) -> u32 {
        self.wins * POINTS_FOR_WIN + self.draws * POINTS_FOR_DRAW
    }

    pub fn points_per_game(&self) -> f64 {
        per_game(self.points(), self.played)
    }

    pub fn goals_per_game(&self) -> f64 {
        per_game(self.goals_for, self.played)
    }

    pub fn conceded_per_game(&self) -> f64 {
        per_game(self.goals_against, self.played)
    }

    /// Percentage of played games won (0–100).
    pub fn win_rate(&self) -> f64 {
        per_game(self.wins, self.played) * 100.0
    }

    /// Share of all goals in the team's games that the team scored (0–100).
    pub fn goals_for_share(&self) -> f64 {
        per_game(self.goals_for, self.goals_for.saturating_add(self.goals_against)) * 100.0
    }
}

fn per_game(total: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / games as f64
    }
}

/// Record and goal totals of `team_id` over its completed matches.
///
/// Unlike the standings replay this never fails: a completed match with a
/// missing score counts its missing side as 0 goals.
pub fn compute_season_summary(matches: &[MatchResult], team_id: TeamId) -> SeasonSummary {
    let mut out = SeasonSummary::default();
    for m in completed(matches) {
        let Some(venue) = m.venue_of(team_id) else {
            continue;
        };
        let (goals_for, goals_against) = m.goals_for_venue(venue);
        out.played += 1;
        out.goals_for = out.goals_for.saturating_add(goals_for);
        out.goals_against = out.goals_against.saturating_add(goals_against);
        match classify_outcome(goals_for, goals_against) {
            Outcome::Win => out.wins += 1,
            Outcome::Draw => out.draws += 1,
            Outcome::Loss => out.losses += 1,
        }
    }
    out.goal_difference = i64::from(out.goals_for) - i64::from(out.goals_against);
    out
}

#[cfg(test)]
mod tests {
    use super::SeasonSummary;

    #[test]
    fn derived_rates_are_zero_without_games() {
        let s = SeasonSummary::default();
        assert_eq!(s.points(), 0);
        assert_eq!(s.points_per_game(), 0.0);
        assert_eq!(s.win_rate(), 0.0);
        assert_eq!(s.goals_for_share(), 0.0);
    }

    #[test]
    fn derived_rates_follow_totals() {
        let s = SeasonSummary {
            played: 4,
            wins: 2,
            draws: 1,
            losses: 1,
            goals_for: 6,
            goals_against: 2,
            goal_difference: 4,
        };
        assert_eq!(s.points(), 7);
        assert!((s.points_per_game() - 1.75).abs() < 1e-12);
        assert!((s.win_rate() - 50.0).abs() < 1e-12);
        assert!((s.goals_for_share() - 75.0).abs() < 1e-12);
        assert!((s.conceded_per_game() - 0.5).abs() < 1e-12);
    }
}

use serde::{Deserialize, Serialize};

use crate::model::{MatchResult, Outcome, TeamId, Venue, classify_outcome, completed};

/// Goals per game that maps to the top of the comparison scale.
/// Fixed rather than derived from the league so charts stay comparable.
pub const GOALS_PER_GAME_CEILING: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueStats {
    pub games: u32,
    pub goals_per_game: f64,
    pub goals_against_per_game: f64,
    pub win_percentage: f64,
    pub draw_percentage: f64,
    pub loss_percentage: f64,
    pub clean_sheet_percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeAwayStats {
    pub home: VenueStats,
    pub away: VenueStats,
}

impl HomeAwayStats {
    pub fn venue(&self, venue: Venue) -> &VenueStats {
        match venue {
            Venue::Home => &self.home,
            Venue::Away => &self.away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    WinPercentage,
    DrawPercentage,
    GoalsFor,
    GoalsAgainst,
    CleanSheets,
    LossPercentage,
}

impl Metric {
    pub const ORDER: [Metric; 6] = [
        Metric::WinPercentage,
        Metric::DrawPercentage,
        Metric::GoalsFor,
        Metric::GoalsAgainst,
        Metric::CleanSheets,
        Metric::LossPercentage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::WinPercentage => "Win %",
            Metric::DrawPercentage => "Draw %",
            Metric::GoalsFor => "Goals For",
            Metric::GoalsAgainst => "Goals Against",
            Metric::CleanSheets => "Clean Sheets",
            Metric::LossPercentage => "Loss %",
        }
    }

    fn raw(self, stats: &VenueStats) -> f64 {
        match self {
            Metric::WinPercentage => stats.win_percentage,
            Metric::DrawPercentage => stats.draw_percentage,
            Metric::GoalsFor => stats.goals_per_game,
            Metric::GoalsAgainst => stats.goals_against_per_game,
            Metric::CleanSheets => stats.clean_sheet_percentage,
            Metric::LossPercentage => stats.loss_percentage,
        }
    }

    /// Maps a raw value onto 0–100 where higher is drawn further out.
    fn scale(self, raw: f64) -> f64 {
        match self {
            Metric::GoalsFor => (raw / GOALS_PER_GAME_CEILING * 100.0).min(100.0),
            Metric::GoalsAgainst => (100.0 - raw / GOALS_PER_GAME_CEILING * 100.0).max(0.0),
            _ => raw,
        }
    }
}

/// One spoke of a home-vs-away radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetric {
    pub metric: Metric,
    pub label: String,
    pub home: f64,
    pub away: f64,
    pub home_raw: f64,
    pub away_raw: f64,
}

pub fn compute_home_away_stats(matches: &[MatchResult], team_id: TeamId) -> HomeAwayStats {
    let mut home = VenueTally::default();
    let mut away = VenueTally::default();
    for m in completed(matches) {
        match m.venue_of(team_id) {
            Some(Venue::Home) => home.add(m.goals_for_venue(Venue::Home)),
            Some(Venue::Away) => away.add(m.goals_for_venue(Venue::Away)),
            None => {}
        }
    }
    HomeAwayStats {
        home: home.finish(),
        away: away.finish(),
    }
}

pub fn normalize_for_comparison(stats: &HomeAwayStats) -> Vec<ComparisonMetric> {
    Metric::ORDER
        .iter()
        .map(|&metric| {
            let home_raw = metric.raw(&stats.home);
            let away_raw = metric.raw(&stats.away);
            ComparisonMetric {
                metric,
                label: metric.label().to_string(),
                home: round_to(metric.scale(home_raw), 1),
                away: round_to(metric.scale(away_raw), 1),
                home_raw,
                away_raw,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct VenueTally {
    games: u32,
    scored: u32,
    conceded: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    clean_sheets: u32,
}

impl VenueTally {
    fn add(&mut self, (goals_for, goals_against): (u32, u32)) {
        self.games += 1;
        self.scored = self.scored.saturating_add(goals_for);
        self.conceded = self.conceded.saturating_add(goals_against);
        // Clean sheet: the opponent did not score against the analyzed team.
        if goals_against == 0 {
            self.clean_sheets += 1;
        }
        match classify_outcome(goals_for, goals_against) {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    fn finish(&self) -> VenueStats {
        if self.games == 0 {
            return VenueStats::default();
        }
        let n = self.games as f64;
        let pct = |count: u32| round_to(count as f64 / n * 100.0, 1);
        VenueStats {
            games: self.games,
            goals_per_game: round_to(self.scored as f64 / n, 2),
            goals_against_per_game: round_to(self.conceded as f64 / n, 2),
            win_percentage: pct(self.wins),
            draw_percentage: pct(self.draws),
            loss_percentage: pct(self.losses),
            clean_sheet_percentage: pct(self.clean_sheets),
        }
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (v * factor).round() / factor
}

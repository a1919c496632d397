use season_analytics::model::{MatchResult, MatchStatus, MatchTeam};
use season_analytics::report::{build_league_reports, build_season_report, render_text};
use season_analytics::synthetic::{DEMO_TEAMS, generate_seeded_season};
use season_analytics::AnalyticsError;

#[test]
fn league_reports_cover_every_team_and_match_serial_builds() {
    let matches = generate_seeded_season(&DEMO_TEAMS, 18, 5);
    let reports = build_league_reports(&matches, 4);
    assert_eq!(reports.len(), DEMO_TEAMS.len());

    let mut positions: Vec<u32> = Vec::new();
    for (team_id, report) in &reports {
        let report = report.as_ref().expect("synthetic season is well formed");
        assert_eq!(report.team_id, *team_id);
        assert_eq!(report.position_history.len(), 18);
        assert_eq!(report, &build_season_report(&matches, *team_id).unwrap());
        positions.push(report.current_position().unwrap().position);
    }
    positions.sort_unstable();
    let expected: Vec<u32> = (1..=DEMO_TEAMS.len() as u32).collect();
    assert_eq!(positions, expected);
}

#[test]
fn a_bad_record_fails_every_report_but_not_the_call() {
    let mut matches = generate_seeded_season(&DEMO_TEAMS[..4], 2, 1);
    matches.push(MatchResult {
        id: 5,
        status: MatchStatus::Finished,
        round: Some("Regular Season - 3".to_string()),
        kickoff: None,
        home_team: MatchTeam::new(42, "Arsenal"),
        away_team: MatchTeam::new(66, "Aston Villa"),
        home_goals: None,
        away_goals: Some(1),
    });
    let reports = build_league_reports(&matches, 1);
    assert_eq!(reports.len(), 4);
    assert!(
        reports
            .iter()
            .all(|(_, r)| matches!(r, Err(AnalyticsError::MissingField { match_id: 5, .. })))
    );
}

#[test]
fn text_report_uses_ordinals() {
    let matches = generate_seeded_season(&DEMO_TEAMS, 10, 8);
    let report = build_season_report(&matches, 42).unwrap();
    let text = render_text(&report);
    assert!(text.starts_with("Arsenal\n"));
    let snap = report.current_position().unwrap();
    assert!(text.contains(&format!("after matchweek {}", snap.matchweek)));
    assert!(text.contains("Trajectory: MW1 "));
    assert!(text.contains("Goals Against"));
}

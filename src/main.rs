use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use season_analytics::api_football::load_matches_file;
use season_analytics::config::AnalyticsConfig;
use season_analytics::model::{MatchResult, TeamId};
use season_analytics::report::{build_league_reports, build_season_report, render_text};
use season_analytics::synthetic::{DEMO_TEAMS, generate_seeded_season};

const USAGE: &str = "usage: season_analytics [FIXTURES.json] [--team ID] [--json] [--all] [--synthetic [SEED]]";
const SYNTHETIC_COMPLETED_MATCHWEEKS: u32 = 24;

#[derive(Debug, Default)]
struct CliArgs {
    path: Option<PathBuf>,
    team_id: Option<TeamId>,
    json: bool,
    all: bool,
    synthetic_seed: Option<u64>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--team" => {
                let raw = args.next().ok_or_else(|| anyhow!("--team needs a team id"))?;
                out.team_id = Some(raw.parse().with_context(|| format!("bad team id {raw:?}"))?);
            }
            "--json" => out.json = true,
            "--all" => out.all = true,
            "--synthetic" => {
                let seed = match args.next_if(|next| !next.starts_with("--")) {
                    Some(raw) => raw.parse().with_context(|| format!("bad seed {raw:?}"))?,
                    None => 2024,
                };
                out.synthetic_seed = Some(seed);
            }
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            other if other.starts_with("--") => return Err(anyhow!("unknown flag {other}\n{USAGE}")),
            other => out.path = Some(PathBuf::from(other)),
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing()?;

    let config = AnalyticsConfig::from_env();
    let args = parse_args(std::env::args().skip(1))?;
    let team_id = args.team_id.unwrap_or(config.team_id);

    let matches = load_matches(&args, &config)?;
    info!(matches = matches.len(), team_id, "fixtures loaded");
    if let Some(title) = config.season_title() {
        println!("{title}\n");
    }

    if args.all {
        let reports = build_league_reports(&matches, config.report_parallelism);
        let mut ok = Vec::new();
        for (id, report) in reports {
            match report {
                Ok(report) => ok.push(report),
                Err(err) => warn!(team_id = id, "report failed: {err}"),
            }
        }
        if args.json {
            println!("{}", serde_json::to_string_pretty(&ok).context("serialize reports")?);
        } else {
            for report in &ok {
                println!("{}", render_text(report));
            }
        }
        return Ok(());
    }

    let report = build_season_report(&matches, team_id)
        .with_context(|| format!("failed to build season report for team {team_id}"))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).context("serialize report")?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn load_matches(args: &CliArgs, config: &AnalyticsConfig) -> Result<Vec<MatchResult>> {
    if let Some(seed) = args.synthetic_seed {
        return Ok(generate_seeded_season(
            &DEMO_TEAMS,
            SYNTHETIC_COMPLETED_MATCHWEEKS,
            seed,
        ));
    }
    let path = args
        .path
        .clone()
        .or_else(|| config.fixtures_path.clone())
        .ok_or_else(|| anyhow!("no fixtures file given (argument or FIXTURES_PATH)\n{USAGE}"))?;
    load_matches_file(&path)
}

fn init_tracing() -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("season_analytics=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

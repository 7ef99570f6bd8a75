//! Touchline CLI
//!
//! Loads club JSON files, runs the pre-match coach for both sides and plays
//! the match out in the terminal.

mod loader;
mod render;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use touchline_core::coach::preparation::{CoachAi, MatchContext, Preparation};
use touchline_core::engine::lineup::validate_squad;
use touchline_core::engine::match_sim::{quick_simulate, MatchEngine, MatchSide};
use touchline_core::models::{Club, SidePair};
use touchline_core::rng::SeededRandom;

#[derive(Parser)]
#[command(name = "touchline")]
#[command(about = "Minute-by-minute football match simulation", long_about = None)]
#[command(version = touchline_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare both sides and stream a full match
    Play {
        /// Home club JSON file
        #[arg(long)]
        home: PathBuf,

        /// Away club JSON file
        #[arg(long)]
        away: PathBuf,

        /// Seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulation config (JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the final result as JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pause between events, in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Match date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Derby fixture
        #[arg(long, default_value = "false")]
        derby: bool,

        /// Only print the final summary
        #[arg(long, default_value = "false")]
        quiet: bool,
    },

    /// Show the coach's preparation for one side
    Prepare {
        /// Club JSON file
        #[arg(long)]
        club: PathBuf,

        /// Opponent JSON file
        #[arg(long)]
        opponent: PathBuf,

        /// Prepare as the away side
        #[arg(long, default_value = "false")]
        away: bool,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Print the full preparation as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Score-only simulation
    Quick {
        #[arg(long)]
        home: PathBuf,

        #[arg(long)]
        away: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check that club files can field a side
    Check {
        /// Club JSON files
        #[arg(required = true)]
        clubs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { home, away, seed, config, out, delay_ms, date, derby, quiet } => {
            let home = loader::load_club(&home)?;
            let away = loader::load_club(&away)?;
            let config = loader::load_config(config.as_deref())?;
            let seed = seed.unwrap_or_else(seed_from_clock);

            println!("🏟️  {} vs {} (seed {})", home.name, away.name, seed);

            let context = MatchContext { is_home: true, derby, ..MatchContext::default() };
            let mut prep_rng = SeededRandom::new(seed);
            let home_prep = prepare(&home, &away, &context, &mut prep_rng)?;
            let away_prep = prepare(&away, &home, &MatchContext { is_home: false, ..context }, &mut prep_rng)?;

            if !quiet {
                print_lines(render::render_preparation(&home.name, &home_prep));
                print_lines(render::render_preparation(&away.name, &away_prep));
                println!();
            }

            let home_side = MatchSide::prepared(&home, &home_prep, &config)?;
            let away_side = MatchSide::prepared(&away, &away_prep, &config)?;
            let mut engine = MatchEngine::seeded(home_side, away_side, config, seed)?;
            if let Some(date) = date {
                engine = engine.with_date(date);
            }

            let clubs = SidePair::new(home.name.clone(), away.name.clone());
            for event in engine.by_ref() {
                if quiet {
                    continue;
                }
                if let Some(line) = render::render_event(&event, &clubs) {
                    println!("{line}");
                    if delay_ms > 0 {
                        thread::sleep(Duration::from_millis(delay_ms));
                    }
                }
            }

            let tactic_changes = render::render_tactic_changes(engine.tactics().history(), &clubs);
            let result = engine.into_result();
            println!();
            print_lines(render::render_summary(&result));
            print_lines(tactic_changes);

            if let Some(path) = out {
                loader::write_json(&path, &result)?;
                println!("\n📄 Result saved to: {}", path.display());
            }
        }

        Commands::Prepare { club, opponent, away, seed, json } => {
            let club = loader::load_club(&club)?;
            let opponent = loader::load_club(&opponent)?;
            let context = MatchContext { is_home: !away, ..MatchContext::default() };
            let prep = prepare(&club, &opponent, &context, &mut SeededRandom::new(seed))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&prep)?);
            } else {
                print_lines(render::render_preparation(&club.name, &prep));
                println!("   Reasoning: {:?}", prep.strategy.reasoning);
            }
        }

        Commands::Quick { home, away, seed } => {
            let home = loader::load_club(&home)?;
            let away = loader::load_club(&away)?;
            let score = quick_simulate(&mut SeededRandom::new(seed.unwrap_or_else(seed_from_clock)));
            println!("{} {} - {} {}", home.name, score.home, score.away, away.name);
        }

        Commands::Check { clubs } => {
            let mut failures = 0;
            for path in &clubs {
                let club = loader::load_club(path)?;
                match check_club(&club) {
                    Ok(()) => println!("✅ {} ({})", club.name, path.display()),
                    Err(e) => {
                        failures += 1;
                        println!("❌ {} ({}): {e}", club.name, path.display());
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} clubs cannot field a side", clubs.len());
            }
        }
    }

    Ok(())
}

fn prepare(club: &Club, opponent: &Club, context: &MatchContext, rng: &mut SeededRandom) -> Result<Preparation> {
    CoachAi::new(club.clone())
        .prepare_for_match(opponent, context, rng)
        .with_context(|| format!("{} could not prepare for {}", club.name, opponent.name))
}

fn check_club(club: &Club) -> Result<()> {
    validate_squad(club)?;
    Ok(())
}

fn seed_from_clock() -> u64 {
    chrono::Utc::now().timestamp_millis().unsigned_abs()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club_json(id: &str, keepers: usize, outfield: usize) -> Club {
        let mut players = Vec::new();
        for i in 0..keepers {
            players.push(serde_json::json!({"id": format!("{id}-gk{i}"), "name": format!("Keeper {i}"), "positions": ["GK"]}));
        }
        for i in 0..outfield {
            players.push(serde_json::json!({"id": format!("{id}-p{i}"), "name": format!("Player {i}"), "positions": ["CM"]}));
        }
        serde_json::from_value(serde_json::json!({
            "club_id": id,
            "name": id,
            "squad": { "current_players": players }
        }))
        .unwrap()
    }

    #[test]
    fn test_check_club() {
        assert!(check_club(&club_json("ok", 1, 10)).is_ok());
        let short = check_club(&club_json("short", 1, 5)).unwrap_err();
        assert!(short.to_string().contains("only 6"));
        let no_keeper = check_club(&club_json("nokeeper", 0, 14)).unwrap_err();
        assert!(no_keeper.to_string().contains("goalkeeper"));
    }

    #[test]
    fn test_prepare_wraps_errors() {
        let broken = club_json("broken", 0, 14);
        let opponent = club_json("fine", 1, 12);
        let err = prepare(&broken, &opponent, &MatchContext::default(), &mut SeededRandom::new(1)).unwrap_err();
        assert!(err.to_string().contains("broken could not prepare for fine"));
    }

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from([
            "touchline", "play", "--home", "h.json", "--away", "a.json", "--seed", "7", "--date", "2024-08-17",
        ])
        .unwrap();
        match cli.command {
            Commands::Play { seed, date, quiet, .. } => {
                assert_eq!(seed, Some(7));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 8, 17));
                assert!(!quiet);
            }
            _ => panic!("expected play"),
        }
    }
}

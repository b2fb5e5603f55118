//! Simulation driver: load a roster from CSV, run a whole event with
//! randomized results, and print the final standings.
//! Run with: cargo run --bin simulate -- roster.csv [format] [--json]
//! Roster rows are `name,archetype` (archetype optional). The format token
//! is a catalog name such as swiss, roundRobin, or hybrid; default swiss.
//! Set RUST_LOG=debug to watch the engine's round-by-round decisions.

use rand::Rng;
use std::error::Error;
use std::process::ExitCode;
use tcg_tournament_engine::{
    advance_to_next_round, create_tournament, record_match_result, standings, start_tournament,
    MatchStatus, PlayerEntry, ReportedResult, Tournament, TournamentConfig, TournamentFormat,
    TournamentStatus,
};

fn print_usage() {
    println!("Tournament simulation driver");
    println!();
    println!("Usage:");
    println!("  simulate <roster.csv> [format] [--json]");
    println!();
    println!("Formats:");
    println!("  swiss, singleElimination, doubleElimination, roundRobin,");
    println!("  hybrid, adaptiveSwiss, parallelBrackets");
    println!();
    println!("Examples:");
    println!("  simulate roster.csv");
    println!("  simulate roster.csv roundRobin --json");
}

/// Load `name,archetype` rows. A missing or empty second column leaves the
/// player unclassified.
fn load_roster(path: &str) -> Result<Vec<PlayerEntry>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = match record.get(0) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => continue,
        };
        let archetype = record
            .get(1)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from);
        entries.push(PlayerEntry {
            name,
            deck_archetype: archetype,
        });
    }
    Ok(entries)
}

/// Report a random result for every pending match of the current round.
fn resolve_current_round(tournament: &mut Tournament) -> Result<(), Box<dyn Error>> {
    let open: Vec<_> = tournament
        .round_matches(tournament.current_round)
        .filter(|m| m.status == MatchStatus::Pending)
        .map(|m| (m.id, m.player1, m.player2))
        .collect();

    let mut rng = rand::thread_rng();
    for (match_id, player1, player2) in open {
        let Some(player2) = player2 else { continue };
        let result = if rng.gen_bool(0.5) {
            ReportedResult {
                winner: Some(player1),
                player1_score: 2,
                player2_score: rng.gen_range(0..2),
            }
        } else {
            ReportedResult {
                winner: Some(player2),
                player1_score: rng.gen_range(0..2),
                player2_score: 2,
            }
        };
        record_match_result(tournament, match_id, result)?;
    }
    Ok(())
}

fn run(roster_path: &str, format: TournamentFormat, dump_json: bool) -> Result<(), Box<dyn Error>> {
    let players = load_roster(roster_path)?;
    log::info!("loaded {} players from {roster_path}", players.len());

    let mut tournament = create_tournament(TournamentConfig {
        name: format!("Simulated {format} event"),
        format,
        players,
        ..TournamentConfig::default()
    })?;

    start_tournament(&mut tournament)?;
    while tournament.status == TournamentStatus::InProgress {
        log::info!(
            "round {}/{}: {} matches",
            tournament.current_round,
            tournament.total_rounds(),
            tournament.round_matches(tournament.current_round).count()
        );
        resolve_current_round(&mut tournament)?;
        advance_to_next_round(&mut tournament)?;
    }

    println!(
        "{} finished after {} rounds",
        tournament.name, tournament.current_round
    );
    println!();
    println!("{:>4}  {:<20} {:>6} {:>7} {:>7}  {}", "#", "Player", "Pts", "OMW%", "GWP%", "Record");
    for player in standings(&tournament) {
        println!(
            "{:>4}  {:<20} {:>6} {:>6.1}% {:>6.1}%  {}-{}-{}{}",
            player.standing,
            player.name,
            player.match_points,
            player.opponent_match_win_percentage * 100.0,
            player.game_win_percentage * 100.0,
            player.wins,
            player.losses,
            player.draws,
            if player.dropped { " (dropped)" } else { "" },
        );
    }

    if dump_json {
        println!();
        println!("{}", serde_json::to_string_pretty(&tournament)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dump_json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let Some(roster_path) = positional.first() else {
        print_usage();
        return ExitCode::FAILURE;
    };
    let format = match positional.get(1) {
        Some(token) => match token.parse::<TournamentFormat>() {
            Ok(format) => format,
            Err(err) => {
                eprintln!("Error: {err}");
                print_usage();
                return ExitCode::FAILURE;
            }
        },
        None => TournamentFormat::Swiss,
    };

    if let Err(err) = run(roster_path.as_str(), format, dump_json) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

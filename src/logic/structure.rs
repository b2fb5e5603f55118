//! Structure adaptation: rewrite format, round counts, and top cut to fit
//! the player pool and the event's time budget.

use crate::models::{Bracket, Rounds, Tournament, TournamentFormat};

/// Adapt the tournament structure to the pool size and time budget.
///
/// Thresholds on player count: up to 8 players play a round robin; up to 16
/// Swiss with no cut; up to 32 Swiss with a top 4; up to 64 Swiss with a top
/// 8; larger fields run hybrid Swiss-into-top-8. A time-limited event then
/// has its round count shrunk to what fits (`available minutes /
/// minutes-per-round`) with the top cut clamped to match, and a large
/// time-limited field is switched to parallel brackets instead.
///
/// Total: always leaves the tournament in a catalog format.
pub fn adapt_structure(tournament: &mut Tournament) {
    let player_count = tournament.players.len();

    match player_count {
        0..=8 => {
            tournament.format = TournamentFormat::RoundRobin;
            tournament.rounds = TournamentFormat::RoundRobin.recommended_rounds(player_count);
        }
        9..=16 => {
            tournament.format = TournamentFormat::Swiss;
            tournament.rounds = TournamentFormat::Swiss.recommended_rounds(player_count);
            tournament.top_cut = 0;
        }
        17..=32 => {
            tournament.format = TournamentFormat::Swiss;
            tournament.rounds = TournamentFormat::Swiss.recommended_rounds(player_count);
            tournament.top_cut = 4;
        }
        33..=64 => {
            tournament.format = TournamentFormat::Swiss;
            tournament.rounds = TournamentFormat::Swiss.recommended_rounds(player_count);
            tournament.top_cut = 8;
        }
        _ => {
            tournament.format = TournamentFormat::Hybrid;
            tournament.rounds = TournamentFormat::Hybrid.recommended_rounds(player_count);
            tournament.top_cut = 8;
        }
    }

    let time_limited = tournament
        .time_constraints
        .as_ref()
        .is_some_and(|tc| tc.is_time_limited);

    if time_limited && tournament.time_per_round > 0 {
        if let Some(tc) = &tournament.time_constraints {
            let available_minutes = (tc.estimated_end_time - tournament.start_time)
                .num_minutes()
                .max(0) as u32;
            let max_rounds = available_minutes / tournament.time_per_round;

            if let Rounds::Main(main) = tournament.rounds {
                if max_rounds < main {
                    tournament.rounds = Rounds::Main(max_rounds);
                    if tournament.top_cut > 0 {
                        tournament.top_cut = tournament
                            .top_cut
                            .min(2usize.pow(max_rounds / 2));
                    }
                }
            }
        }
    }

    // Large pools under a time budget run both halves of the field at once.
    if player_count >= 32 && time_limited {
        tournament.format = TournamentFormat::ParallelBrackets;
        if tournament.brackets.consolation.is_none() {
            tournament.brackets.consolation = Some(Bracket::default());
        }
    }

    log::debug!(
        "adapted structure for {} players: {} with {} rounds, top cut {}",
        player_count,
        tournament.format,
        tournament.rounds.total(),
        tournament.top_cut
    );
}

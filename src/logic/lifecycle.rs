//! Round and tournament lifecycle: start, advance, and completion.

use crate::logic::{pairings, standings};
use crate::models::{Tournament, TournamentError, TournamentStatus};
use chrono::Utc;

/// Start the tournament: moves `created` to `in_progress`, opens round 1,
/// and generates its pairings. Starting twice is a state error.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Created {
        return Err(TournamentError::AlreadyStarted(tournament.status));
    }
    tournament.status = TournamentStatus::InProgress;
    tournament.current_round = 1;
    pairings::create_pairings(tournament)?;
    log::debug!("tournament {} started", tournament.id);
    Ok(())
}

/// Advance past a fully-reported round.
///
/// Rejected while any match of the current round is pending. On the final
/// round this finalizes the event (`completed`, end timestamp, final
/// standings) instead of advancing, so `current_round` never exceeds the
/// round budget.
pub fn advance_to_next_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::NotInProgress(tournament.status));
    }
    let pending = tournament.pending_in_current_round();
    if pending > 0 {
        return Err(TournamentError::RoundIncomplete {
            round: tournament.current_round,
            pending,
        });
    }

    if tournament.current_round >= tournament.total_rounds() {
        standings::update_standings(tournament);
        tournament.status = TournamentStatus::Completed;
        tournament.end_time = Some(Utc::now());
        log::debug!(
            "tournament {} completed after round {}",
            tournament.id,
            tournament.current_round
        );
        return Ok(());
    }

    tournament.current_round += 1;
    pairings::create_pairings(tournament)?;
    Ok(())
}

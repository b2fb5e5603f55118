//! Result recording and player drops.

use crate::logic::standings;
use crate::models::{
    MatchId, MatchOutcome, MatchRecord, MatchResult, MatchStatus, PlayerId, ReportedResult,
    Tournament, TournamentError,
};

/// Record a reported match outcome.
///
/// Rejects an unknown match, a match that already has a result (completed
/// results are immutable), and a winner who is not one of the two seats —
/// all before mutating anything. On success the match is completed, both
/// players' counters and histories are updated, and, when this was the
/// round's last open match, tiebreakers and standings are recomputed.
pub fn record_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    result: ReportedResult,
) -> Result<(), TournamentError> {
    let matched = tournament
        .match_by_id_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if matched.status == MatchStatus::Completed {
        return Err(TournamentError::MatchAlreadyCompleted(match_id));
    }
    if let Some(winner) = result.winner {
        if winner != matched.player1 && Some(winner) != matched.player2 {
            return Err(TournamentError::InvalidResult { winner });
        }
    }

    matched.result = Some(MatchResult {
        winner: result.winner,
        player1_games: result.player1_score,
        player2_games: result.player2_score,
    });
    matched.status = MatchStatus::Completed;
    let (player1, player2, round) = (matched.player1, matched.player2, matched.round);

    // A bye has no second seat and was already credited at pairing time; no
    // pending bye can reach this point.
    if let Some(player2) = player2 {
        apply_result(tournament, player1, player2, round, match_id, result);
    }

    if tournament.current_round_complete() {
        standings::update_standings(tournament);
    }

    Ok(())
}

/// Apply a completed result to both player records, appending one history
/// entry per side so each direction stays independently queryable.
fn apply_result(
    tournament: &mut Tournament,
    player1: PlayerId,
    player2: PlayerId,
    round: u32,
    match_id: MatchId,
    result: ReportedResult,
) {
    let (outcome1, outcome2) = match result.winner {
        Some(winner) if winner == player1 => (MatchOutcome::Win, MatchOutcome::Loss),
        Some(_) => (MatchOutcome::Loss, MatchOutcome::Win),
        None => (MatchOutcome::Draw, MatchOutcome::Draw),
    };

    credit(
        tournament,
        player1,
        outcome1,
        MatchRecord {
            match_id,
            round,
            opponent: Some(player2),
            outcome: outcome1,
            games_won: result.player1_score,
            games_lost: result.player2_score,
        },
    );
    credit(
        tournament,
        player2,
        outcome2,
        MatchRecord {
            match_id,
            round,
            opponent: Some(player1),
            outcome: outcome2,
            games_won: result.player2_score,
            games_lost: result.player1_score,
        },
    );
}

fn credit(tournament: &mut Tournament, id: PlayerId, outcome: MatchOutcome, record: MatchRecord) {
    if let Some(player) = tournament.player_mut(id) {
        match outcome {
            MatchOutcome::Win | MatchOutcome::Bye => player.add_win(),
            MatchOutcome::Loss => player.add_loss(),
            MatchOutcome::Draw => player.add_draw(),
        }
        player.matches.push(record);
    }
}

/// Drop a player from the tournament.
///
/// The player stays in the roster with `dropped` set and is skipped by all
/// future pairings. Every still-pending match involving the player is
/// completed as a forfeit crediting the opponent a 2-0 win; when the
/// opponent has also dropped, the match becomes a double forfeit instead
/// (no winner, a loss for each, no points).
pub fn drop_player(
    tournament: &mut Tournament,
    player_id: PlayerId,
) -> Result<(), TournamentError> {
    let player = tournament
        .player_mut(player_id)
        .ok_or(TournamentError::PlayerNotFound(player_id))?;
    player.dropped = true;

    let pending: Vec<(MatchId, PlayerId, Option<PlayerId>)> = tournament
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Pending && m.involves(player_id))
        .map(|m| (m.id, m.player1, m.player2))
        .collect();

    for (match_id, player1, player2) in pending {
        let Some(player2) = player2 else { continue };
        let opponent = if player1 == player_id { player2 } else { player1 };
        let opponent_dropped = tournament.player(opponent).is_some_and(|p| p.dropped);

        if opponent_dropped {
            double_forfeit(tournament, match_id, player1, player2);
        } else if player1 == player_id {
            record_match_result(
                tournament,
                match_id,
                ReportedResult {
                    winner: Some(player2),
                    player1_score: 0,
                    player2_score: 2,
                },
            )?;
        } else {
            record_match_result(
                tournament,
                match_id,
                ReportedResult {
                    winner: Some(player1),
                    player1_score: 2,
                    player2_score: 0,
                },
            )?;
        }
    }

    log::debug!("player {player_id} dropped from {}", tournament.id);
    Ok(())
}

/// Both seats dropped: complete the match with no winner and no points, a
/// loss on each record.
fn double_forfeit(
    tournament: &mut Tournament,
    match_id: MatchId,
    player1: PlayerId,
    player2: PlayerId,
) {
    let Some(matched) = tournament.match_by_id_mut(match_id) else {
        return;
    };
    matched.result = Some(MatchResult {
        winner: None,
        player1_games: 0,
        player2_games: 0,
    });
    matched.status = MatchStatus::Completed;
    let round = matched.round;

    for (id, opponent) in [(player1, player2), (player2, player1)] {
        if let Some(player) = tournament.player_mut(id) {
            player.add_loss();
            player.matches.push(MatchRecord {
                match_id,
                round,
                opponent: Some(opponent),
                outcome: MatchOutcome::Loss,
                games_won: 0,
                games_lost: 0,
            });
        }
    }

    if tournament.current_round_complete() {
        standings::update_standings(tournament);
    }
}

//! Pairing engine: one algorithm per format family.
//!
//! Every algorithm returns the round's matches; [`create_pairings`] assigns
//! table numbers, credits byes, and files the matches under the tournament
//! and its brackets.

use crate::models::{
    BracketSide, Match, MatchOutcome, MatchRecord, PairingMethod, Player, PlayerId, Tournament,
    TournamentError, TournamentFormat, TournamentStatus,
};
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Generate and file the matches for the tournament's current round.
pub fn create_pairings(tournament: &mut Tournament) -> Result<Vec<Match>, TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::NotInProgress(tournament.status));
    }

    let round = tournament.current_round;
    let mut batch = match tournament.format.info().pairing_method {
        PairingMethod::Record => swiss_pairings(tournament, round, false),
        PairingMethod::AdaptiveSwiss => {
            swiss_pairings(tournament, round, tournament.meta_balancing_enabled)
        }
        PairingMethod::RoundRobin => round_robin_pairings(tournament, round),
        PairingMethod::Bracket => {
            let seeds = seeded_order(tournament.active_players());
            elimination_pairings(tournament, &seeds, BracketSide::Main, round, round == 1)
        }
        PairingMethod::Hybrid => {
            let swiss_rounds = tournament.rounds.swiss();
            if round <= swiss_rounds {
                swiss_pairings(tournament, round, false)
            } else {
                let seeds = top_players(tournament, tournament.top_cut);
                elimination_pairings(
                    tournament,
                    &seeds,
                    BracketSide::Main,
                    round,
                    round == swiss_rounds + 1,
                )
            }
        }
        PairingMethod::Parallel => parallel_bracket_pairings(tournament, round),
    };

    for (index, paired) in batch.iter_mut().enumerate() {
        paired.table = index + 1;
    }

    // Byes are credited at pairing time: an automatic win plus a history
    // record for the unopposed player. Result recording never touches them
    // again.
    for paired in &batch {
        if paired.is_bye() {
            if let Some(player) = tournament.player_mut(paired.player1) {
                player.add_win();
                player.matches.push(MatchRecord {
                    match_id: paired.id,
                    round,
                    opponent: None,
                    outcome: MatchOutcome::Bye,
                    games_won: 2,
                    games_lost: 0,
                });
            }
        }
    }

    for paired in &batch {
        match paired.bracket {
            BracketSide::Main => tournament.brackets.main.matches.push(paired.id),
            BracketSide::Consolation => {
                if let Some(consolation) = tournament.brackets.consolation.as_mut() {
                    consolation.matches.push(paired.id);
                }
            }
        }
    }

    // Bracket round counters track elimination progress independently of
    // the overall round counter (a hybrid bracket starts counting after the
    // Swiss phase).
    let swiss_rounds = tournament.rounds.swiss();
    let bracket_round = if tournament.format == TournamentFormat::Hybrid && round > swiss_rounds {
        round - swiss_rounds
    } else {
        round
    };
    tournament.brackets.main.current_round = bracket_round;
    if tournament.format == TournamentFormat::ParallelBrackets {
        if let Some(consolation) = tournament.brackets.consolation.as_mut() {
            consolation.current_round = round;
        }
    }

    tournament.matches.extend(batch.iter().cloned());

    log::debug!(
        "paired round {round} of {}: {} matches",
        tournament.id,
        batch.len()
    );

    Ok(batch)
}

fn same_archetype(a: &Player, b: &Player) -> bool {
    matches!(
        (&a.deck_archetype, &b.deck_archetype),
        (Some(x), Some(y)) if x == y
    )
}

/// Swiss pairing. Round 1 is random; later rounds sort by match points then
/// OMW% and pair adjacent-in-rank players, preferring an unfaced opponent.
/// With `balance_archetypes`, an unfaced opponent on a different archetype
/// is preferred first (best-effort only).
fn swiss_pairings(tournament: &Tournament, round: u32, balance_archetypes: bool) -> Vec<Match> {
    let mut active: Vec<&Player> = tournament.players.iter().filter(|p| !p.dropped).collect();

    if round == 1 {
        active.shuffle(&mut rand::thread_rng());
        return active
            .chunks(2)
            .map(|pair| {
                if let [a, b] = pair {
                    Match::new(round, a.id, b.id, BracketSide::Main)
                } else {
                    Match::bye(round, pair[0].id, BracketSide::Main)
                }
            })
            .collect();
    }

    active.sort_by(|a, b| {
        b.match_points.cmp(&a.match_points).then_with(|| {
            b.opponent_match_win_percentage
                .partial_cmp(&a.opponent_match_win_percentage)
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut paired: HashSet<PlayerId> = HashSet::new();
    let mut matches = Vec::new();

    for (i, player) in active.iter().enumerate() {
        if paired.contains(&player.id) {
            continue;
        }
        let candidates = &active[i + 1..];
        let open = |c: &&Player| !paired.contains(&c.id);

        let mut opponent = None;
        if balance_archetypes {
            opponent = candidates
                .iter()
                .find(|c| open(c) && !player.has_played(c.id) && !same_archetype(player, c));
        }
        if opponent.is_none() {
            opponent = candidates
                .iter()
                .find(|c| open(c) && !player.has_played(c.id));
        }
        let mut forced = false;
        if opponent.is_none() {
            // No unfaced opponent left: take the next open player anyway.
            opponent = candidates.iter().find(|c| open(c));
            forced = opponent.is_some();
        }

        if let Some(opponent) = opponent {
            paired.insert(player.id);
            paired.insert(opponent.id);
            let mut m = Match::new(round, player.id, opponent.id, BracketSide::Main);
            m.rematch_forced = forced;
            matches.push(m);
        } else {
            paired.insert(player.id);
            matches.push(Match::bye(round, player.id, BracketSide::Main));
        }
    }

    matches
}

/// Circle-method round robin: the first player stays fixed, the rest rotate
/// by `round - 1` positions. An odd pool is padded with a bye slot; whoever
/// lands on the pad sits the round out with a bye.
fn round_robin_pairings(tournament: &Tournament, round: u32) -> Vec<Match> {
    let mut slots: Vec<Option<PlayerId>> = tournament
        .players
        .iter()
        .filter(|p| !p.dropped)
        .map(|p| Some(p.id))
        .collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    if slots.len() < 2 {
        return Vec::new();
    }

    let fixed = slots[0];
    let mut rotating = slots[1..].to_vec();
    let shift = (round as usize - 1) % rotating.len();
    rotating.rotate_right(shift);

    let total = slots.len();
    let mut pairs = vec![(fixed, rotating[0])];
    for i in 1..total / 2 {
        pairs.push((rotating[i], rotating[total - 1 - i]));
    }

    pairs
        .into_iter()
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(Match::new(round, a, b, BracketSide::Main)),
            (Some(a), None) => Some(Match::bye(round, a, BracketSide::Main)),
            (None, Some(b)) => Some(Match::bye(round, b, BracketSide::Main)),
            (None, None) => None,
        })
        .collect()
}

/// Elimination pairing for one bracket side.
///
/// The bracket's first round seeds `seeds` as 1 vs N, 2 vs N-1, and so on;
/// an odd seed count gives the middle seed a bye. Later rounds pair the
/// previous round's winners adjacently, so the winner of slot `i` advances
/// to position `i / 2`.
fn elimination_pairings(
    tournament: &Tournament,
    seeds: &[PlayerId],
    side: BracketSide,
    round: u32,
    first_round: bool,
) -> Vec<Match> {
    if first_round {
        let n = seeds.len();
        let mut matches: Vec<Match> = (0..n / 2)
            .map(|i| Match::new(round, seeds[i], seeds[n - 1 - i], side))
            .collect();
        if n % 2 == 1 {
            matches.push(Match::bye(round, seeds[n / 2], side));
        }
        return matches;
    }

    let winners: Vec<PlayerId> = tournament
        .matches
        .iter()
        .filter(|m| m.bracket == side && m.round == round - 1)
        .filter_map(|m| m.winner())
        .filter(|id| tournament.player(*id).is_some_and(|p| !p.dropped))
        .collect();

    if winners.len() < 2 {
        // Bracket already decided; nothing left to pair.
        return Vec::new();
    }

    winners
        .chunks(2)
        .map(|pair| {
            if let [a, b] = pair {
                Match::new(round, *a, *b, side)
            } else {
                Match::bye(round, pair[0], side)
            }
        })
        .collect()
}

/// Parallel brackets: split the standings-ordered field at the median; the
/// top half plays in the main bracket, the rest in consolation.
fn parallel_bracket_pairings(tournament: &Tournament, round: u32) -> Vec<Match> {
    if round == 1 {
        let ids = seeded_order(tournament.active_players());
        let half = ids.len() / 2;
        let mut matches =
            elimination_pairings(tournament, &ids[..half], BracketSide::Main, round, true);
        matches.extend(elimination_pairings(
            tournament,
            &ids[half..],
            BracketSide::Consolation,
            round,
            true,
        ));
        matches
    } else {
        let mut matches = elimination_pairings(tournament, &[], BracketSide::Main, round, false);
        matches.extend(elimination_pairings(
            tournament,
            &[],
            BracketSide::Consolation,
            round,
            false,
        ));
        matches
    }
}

/// Players in seeded order: by standing where standings exist, otherwise
/// registration order (the sort is stable and unranked players all carry 0).
fn seeded_order(players: Vec<&Player>) -> Vec<PlayerId> {
    let mut seeds = players;
    seeds.sort_by_key(|p| p.standing);
    seeds.into_iter().map(|p| p.id).collect()
}

/// The top `count` active players by standing.
fn top_players(tournament: &Tournament, count: usize) -> Vec<PlayerId> {
    let mut ids = seeded_order(tournament.active_players());
    ids.truncate(count);
    ids
}

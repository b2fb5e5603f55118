//! Standings: tiebreaker computation and ranking.

use crate::logic::meta;
use crate::models::{Player, PlayerId, Tournament};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Recompute every player's tiebreakers and assign 1-based standings.
/// Runs after each completed round and at finalization; dropped players
/// stay ranked.
pub fn update_standings(tournament: &mut Tournament) {
    update_tiebreakers(tournament);

    let players = &tournament.players;
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| ranking_order(&players[a], &players[b]));

    for (rank, &index) in order.iter().enumerate() {
        tournament.players[index].standing = rank + 1;
    }
}

/// Players sorted by standing, best first. Registration order until the
/// first standings computation has run.
pub fn standings(tournament: &Tournament) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = tournament.players.iter().collect();
    ranked.sort_by_key(|p| p.standing);
    ranked
}

/// Ranking comparator: match points, then OMW%, then GWP%, then meta bonus,
/// all descending.
pub fn ranking_order(a: &Player, b: &Player) -> Ordering {
    b.match_points
        .cmp(&a.match_points)
        .then_with(|| desc(a.opponent_match_win_percentage, b.opponent_match_win_percentage))
        .then_with(|| desc(a.game_win_percentage, b.game_win_percentage))
        .then_with(|| desc(a.tiebreakers.meta_bonus, b.tiebreakers.meta_bonus))
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn update_tiebreakers(tournament: &mut Tournament) {
    // Snapshot every player's win rate first; OMW% reads opponents while
    // each record is being rewritten. Bye wins are inside these rates like
    // any other win.
    let win_rates: HashMap<PlayerId, f64> = tournament
        .players
        .iter()
        .map(|p| (p.id, p.match_win_rate()))
        .collect();

    let underrepresented: HashSet<&str> = tournament
        .meta_breakdown
        .as_deref()
        .map(|breakdown| meta::underrepresented(breakdown).into_iter().collect())
        .unwrap_or_default();

    let meta_enabled = tournament.meta_balancing_enabled;
    let bonus = tournament.meta_incentives.underrepresented_bonus;

    for player in &mut tournament.players {
        let opponents = player.opponent_ids();
        player.opponent_match_win_percentage = if opponents.is_empty() {
            0.0
        } else {
            let sum: f64 = opponents
                .iter()
                .map(|id| win_rates.get(id).copied().unwrap_or(0.0))
                .sum();
            sum / opponents.len() as f64
        };

        let (games_won, games_lost) = player
            .matches
            .iter()
            .fold((0u32, 0u32), |(w, l), r| (w + r.games_won, l + r.games_lost));
        let games_played = games_won + games_lost;
        player.game_win_percentage = if games_played > 0 {
            f64::from(games_won) / f64::from(games_played)
        } else {
            0.0
        };

        if meta_enabled {
            if let Some(archetype) = &player.deck_archetype {
                if underrepresented.contains(archetype.as_str()) {
                    player.tiebreakers.meta_bonus = bonus;
                }
            }
        }
    }
}

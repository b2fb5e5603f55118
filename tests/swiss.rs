//! Integration tests for Swiss pairing: round-1 shuffle, record-based
//! rounds, byes, and rematch handling.

use std::collections::HashSet;
use tcg_tournament_engine::{
    advance_to_next_round, create_tournament, record_match_result, start_tournament, MatchOutcome,
    MatchRecord, MatchStatus, PlayerEntry, PlayerId, ReportedResult, Tournament, TournamentConfig,
    TournamentFormat, TournamentStatus,
};

fn swiss_tournament(n: usize) -> Tournament {
    let players: Vec<PlayerEntry> = (0..n).map(|i| PlayerEntry::new(format!("P{i}"))).collect();
    create_tournament(TournamentConfig {
        name: "swiss test".into(),
        format: TournamentFormat::Swiss,
        players,
        ..TournamentConfig::default()
    })
    .unwrap()
}

/// Report player1 as the 2-0 winner of every pending match in the current
/// round.
fn report_round(t: &mut Tournament) {
    let open: Vec<_> = t
        .round_matches(t.current_round)
        .filter(|m| m.status == MatchStatus::Pending)
        .map(|m| (m.id, m.player1))
        .collect();
    for (id, winner) in open {
        record_match_result(
            t,
            id,
            ReportedResult {
                winner: Some(winner),
                player1_score: 2,
                player2_score: 0,
            },
        )
        .unwrap();
    }
}

/// Every active player sits in exactly one match of the round.
fn assert_round_partitions(t: &Tournament, round: u32) {
    let mut seen: HashSet<PlayerId> = HashSet::new();
    for m in t.round_matches(round) {
        assert!(seen.insert(m.player1), "player paired twice in round {round}");
        if let Some(p2) = m.player2 {
            assert!(seen.insert(p2), "player paired twice in round {round}");
        }
    }
    let active: HashSet<PlayerId> = t
        .players
        .iter()
        .filter(|p| !p.dropped)
        .map(|p| p.id)
        .collect();
    assert_eq!(seen, active);
}

#[test]
fn eight_players_scenario() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();

    let round1: Vec<_> = t.round_matches(1).cloned().collect();
    assert_eq!(round1.len(), 4);
    assert!(round1.iter().all(|m| !m.is_bye()));
    assert_round_partitions(&t, 1);

    report_round(&mut t);
    advance_to_next_round(&mut t).unwrap();
    assert_eq!(t.current_round, 2);
    assert_round_partitions(&t, 2);

    // With 8 players every round-2 seat has an unfaced opponent available,
    // so no round-1 pair may repeat.
    let first_round_pairs: HashSet<(PlayerId, PlayerId)> = round1
        .iter()
        .filter_map(|m| m.player2.map(|p2| ordered(m.player1, p2)))
        .collect();
    for m in t.round_matches(2) {
        let p2 = m.player2.expect("even field, no bye expected");
        assert!(!first_round_pairs.contains(&ordered(m.player1, p2)));
        assert!(!m.rematch_forced);
    }
}

fn ordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b { (a, b) } else { (b, a) }
}

#[test]
fn odd_pool_gets_exactly_one_bye() {
    let mut t = swiss_tournament(9);
    start_tournament(&mut t).unwrap();

    let byes: Vec<_> = t.round_matches(1).filter(|m| m.is_bye()).collect();
    assert_eq!(byes.len(), 1);
    assert_round_partitions(&t, 1);

    // The bye was created completed and credited at pairing time.
    let bye = byes[0];
    assert_eq!(bye.status, MatchStatus::Completed);
    assert_eq!(bye.winner(), Some(bye.player1));
    let recipient = t.player(bye.player1).unwrap();
    assert_eq!(recipient.wins, 1);
    assert_eq!(recipient.match_points, 3);
    assert_eq!(recipient.matches.len(), 1);
    assert_eq!(recipient.matches[0].outcome, MatchOutcome::Bye);
    assert_eq!(recipient.matches[0].opponent, None);
}

#[test]
fn match_points_invariant_holds_through_whole_event() {
    let mut t = swiss_tournament(9);
    start_tournament(&mut t).unwrap();

    while t.status == TournamentStatus::InProgress {
        report_round(&mut t);
        for p in &t.players {
            assert_eq!(p.match_points, 3 * p.wins + p.draws, "{}", p.name);
        }
        advance_to_next_round(&mut t).unwrap();
    }

    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(t.current_round, t.total_rounds());
    for p in &t.players {
        assert_eq!(p.match_points, 3 * p.wins + p.draws, "{}", p.name);
    }
}

#[test]
fn forced_rematch_is_flagged() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();
    report_round(&mut t);

    // Mark every pair as already faced; round 2 then has no choice but to
    // rematch everyone.
    let ids: Vec<PlayerId> = t.players.iter().map(|p| p.id).collect();
    let filler = t.matches[0].id;
    for i in 0..ids.len() {
        for j in 0..ids.len() {
            if i != j {
                t.players[i].matches.push(MatchRecord {
                    match_id: filler,
                    round: 1,
                    opponent: Some(ids[j]),
                    outcome: MatchOutcome::Loss,
                    games_won: 0,
                    games_lost: 0,
                });
            }
        }
    }

    advance_to_next_round(&mut t).unwrap();
    let round2: Vec<_> = t.round_matches(2).collect();
    assert_eq!(round2.len(), 4);
    assert!(round2.iter().all(|m| m.rematch_forced));
}

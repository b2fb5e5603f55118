//! Integration tests for the circle-method round robin.

use std::collections::{HashMap, HashSet};
use tcg_tournament_engine::{
    advance_to_next_round, create_tournament, record_match_result, start_tournament, MatchStatus,
    PlayerEntry, PlayerId, ReportedResult, Tournament, TournamentConfig, TournamentError,
    TournamentFormat, TournamentStatus,
};

fn round_robin_tournament(n: usize) -> Tournament {
    let players: Vec<PlayerEntry> = (0..n).map(|i| PlayerEntry::new(format!("P{i}"))).collect();
    create_tournament(TournamentConfig {
        name: "round robin test".into(),
        format: TournamentFormat::RoundRobin,
        players,
        ..TournamentConfig::default()
    })
    .unwrap()
}

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

fn ordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b { (a, b) } else { (b, a) }
}

#[test]
fn five_players_every_pair_meets_once_with_one_bye_each() {
    let mut t = round_robin_tournament(5);
    assert_eq!(t.total_rounds(), 5);
    start_tournament(&mut t).unwrap();

    let mut pairs: HashMap<(PlayerId, PlayerId), u32> = HashMap::new();
    let mut byes: HashMap<PlayerId, u32> = HashMap::new();

    while t.status == TournamentStatus::InProgress {
        let round = t.current_round;
        let round_byes: Vec<_> = t.round_matches(round).filter(|m| m.is_bye()).collect();
        assert_eq!(round_byes.len(), 1, "round {round}");
        for m in t.round_matches(round) {
            match m.player2 {
                Some(p2) => *pairs.entry(ordered(m.player1, p2)).or_insert(0) += 1,
                None => *byes.entry(m.player1).or_insert(0) += 1,
            }
        }
        report_round(&mut t);
        advance_to_next_round(&mut t).unwrap();
    }

    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(pairs.len(), 10, "C(5,2) distinct pairings");
    assert!(pairs.values().all(|&count| count == 1));
    assert_eq!(byes.len(), 5);
    assert!(byes.values().all(|&count| count == 1));
    for p in &t.players {
        assert_eq!(p.total_matches(), 5, "{}: 4 opponents plus 1 bye", p.name);
    }
}

#[test]
fn six_players_play_five_byeless_rounds() {
    let mut t = round_robin_tournament(6);
    assert_eq!(t.total_rounds(), 5);
    start_tournament(&mut t).unwrap();

    let mut pairs: HashSet<(PlayerId, PlayerId)> = HashSet::new();
    while t.status == TournamentStatus::InProgress {
        let round = t.current_round;
        assert!(t.round_matches(round).all(|m| !m.is_bye()), "round {round}");
        assert_eq!(t.round_matches(round).count(), 3);
        for m in t.round_matches(round) {
            assert!(
                pairs.insert(ordered(m.player1, m.player2.unwrap())),
                "pair repeated in round {round}"
            );
        }
        report_round(&mut t);
        advance_to_next_round(&mut t).unwrap();
    }

    assert_eq!(pairs.len(), 15, "C(6,2) pairings, each exactly once");
}

#[test]
fn rejects_too_small_pool() {
    let result = create_tournament(TournamentConfig {
        name: "tiny".into(),
        format: TournamentFormat::RoundRobin,
        players: (0..3).map(|i| PlayerEntry::new(format!("P{i}"))).collect(),
        ..TournamentConfig::default()
    });
    assert!(matches!(
        result,
        Err(TournamentError::PlayerCountOutOfRange { count: 3, .. })
    ));
}

//! Integration tests for player drops: forfeits, exclusion from future
//! pairings, and the double-forfeit policy.

use tcg_tournament_engine::{
    advance_to_next_round, create_tournament, drop_player, record_match_result, start_tournament,
    ErrorKind, MatchStatus, PlayerEntry, ReportedResult, Tournament, TournamentConfig,
    TournamentError, TournamentFormat,
};
use uuid::Uuid;

fn swiss_tournament(n: usize) -> Tournament {
    let players: Vec<PlayerEntry> = (0..n).map(|i| PlayerEntry::new(format!("P{i}"))).collect();
    create_tournament(TournamentConfig {
        name: "drops test".into(),
        format: TournamentFormat::Swiss,
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

#[test]
fn dropping_forfeits_the_pending_match_to_the_opponent() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();

    let m = t.round_matches(1).next().cloned().unwrap();
    let (dropped, opponent) = (m.player1, m.player2.unwrap());

    drop_player(&mut t, dropped).unwrap();

    let m = t.match_by_id(m.id).unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.winner(), Some(opponent));

    let winner = t.player(opponent).unwrap();
    assert_eq!(winner.wins, 1);
    assert_eq!(winner.match_points, 3);

    // The dropped player takes the forfeit loss and is otherwise untouched.
    let loser = t.player(dropped).unwrap();
    assert!(loser.dropped);
    assert_eq!(loser.losses, 1);
    assert_eq!(loser.wins, 0);
    assert_eq!(loser.draws, 0);
    assert_eq!(loser.match_points, 0);

    // Unrelated matches stay pending.
    assert_eq!(t.pending_in_current_round(), 3);
}

#[test]
fn dropped_players_are_not_paired_again() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();

    let dropped = t.round_matches(1).next().unwrap().player1;
    drop_player(&mut t, dropped).unwrap();
    report_round(&mut t);
    advance_to_next_round(&mut t).unwrap();

    assert!(t.round_matches(2).all(|m| !m.involves(dropped)));
    // Seven actives: three pairings and one bye.
    assert_eq!(t.round_matches(2).count(), 4);
    assert_eq!(t.round_matches(2).filter(|m| m.is_bye()).count(), 1);
}

#[test]
fn both_seats_dropped_is_a_double_forfeit() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();

    let m = t.round_matches(1).next().cloned().unwrap();
    let (first, second) = (m.player1, m.player2.unwrap());

    // The second seat's flag was set out of band (e.g. restored state).
    t.player_mut(second).unwrap().dropped = true;
    drop_player(&mut t, first).unwrap();

    let m = t.match_by_id(m.id).unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.winner(), None);
    assert_eq!(m.result.unwrap().player1_games, 0);
    assert_eq!(m.result.unwrap().player2_games, 0);

    for id in [first, second] {
        let p = t.player(id).unwrap();
        assert_eq!(p.losses, 1);
        assert_eq!(p.wins, 0);
        assert_eq!(p.match_points, 0);
    }
}

#[test]
fn dropping_an_unknown_player_is_not_found() {
    let mut t = swiss_tournament(8);
    start_tournament(&mut t).unwrap();

    let missing = Uuid::new_v4();
    let err = drop_player(&mut t, missing).unwrap_err();
    assert_eq!(err, TournamentError::PlayerNotFound(missing));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

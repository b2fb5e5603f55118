//! Match, MatchResult, and bracket bookkeeping.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// Which bracket a match belongs to. Only parallel-bracket events use
/// `Consolation`; everything else runs in `Main`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    #[default]
    Main,
    Consolation,
}

/// Final outcome of a match: the winner (None for a draw or double forfeit)
/// and the per-player game score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<PlayerId>,
    pub player1_games: u32,
    pub player2_games: u32,
}

/// Result as reported by the host for [`record_match_result`].
///
/// [`record_match_result`]: crate::record_match_result
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReportedResult {
    /// None reports a draw.
    pub winner: Option<PlayerId>,
    pub player1_score: u32,
    pub player2_score: u32,
}

/// A single pairing. `player2 = None` is a bye: such matches are created
/// already completed with the win credited to `player1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    pub player1: PlayerId,
    pub player2: Option<PlayerId>,
    /// None until the result is reported; immutable once set.
    pub result: Option<MatchResult>,
    pub status: MatchStatus,
    pub bracket: BracketSide,
    /// 1-based table number within the round's pairing batch.
    pub table: usize,
    /// Set when Swiss pairing had to repeat a previous pairing because no
    /// unfaced opponent remained.
    pub rematch_forced: bool,
}

impl Match {
    /// Create a pending match between two players.
    pub fn new(round: u32, player1: PlayerId, player2: PlayerId, bracket: BracketSide) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            player1,
            player2: Some(player2),
            result: None,
            status: MatchStatus::Pending,
            bracket,
            table: 0,
            rematch_forced: false,
        }
    }

    /// Create a bye match: already completed, scored 2-0 for the player.
    /// The caller credits the win on the player record.
    pub fn bye(round: u32, player: PlayerId, bracket: BracketSide) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            player1: player,
            player2: None,
            result: Some(MatchResult {
                winner: Some(player),
                player1_games: 2,
                player2_games: 0,
            }),
            status: MatchStatus::Completed,
            bracket,
            table: 0,
            rematch_forced: false,
        }
    }

    /// Whether this match is an unopposed bye.
    pub fn is_bye(&self) -> bool {
        self.player2.is_none()
    }

    /// Whether `player` occupies either seat.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == Some(player)
    }

    /// Winner of a completed match, if it has one (byes always do).
    pub fn winner(&self) -> Option<PlayerId> {
        self.result.as_ref().and_then(|r| r.winner)
    }
}

/// One bracket's bookkeeping: ids of its matches (bodies live in
/// `Tournament::matches`) and its own round counter, independent of the
/// overall tournament round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub matches: Vec<MatchId>,
    pub current_round: u32,
}

/// The main bracket plus an optional consolation bracket for
/// parallel-bracket events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Brackets {
    pub main: Bracket,
    pub consolation: Option<Bracket>,
}

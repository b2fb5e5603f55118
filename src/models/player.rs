//! Player record: match history, win/loss counters, and tiebreakers.

use crate::models::matches::MatchId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Outcome of one match from a single player's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
    /// Unopposed round, automatically scored as a win.
    Bye,
}

/// One entry in a player's match history. Each match produces one record per
/// participant, so both directions are independently queryable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub round: u32,
    /// None for a bye.
    pub opponent: Option<PlayerId>,
    pub outcome: MatchOutcome,
    pub games_won: u32,
    pub games_lost: u32,
}

/// Tiebreaker increments outside the core record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tiebreakers {
    /// Bonus for piloting an underrepresented archetype (0 when meta
    /// balancing is off or the archetype is well represented).
    pub meta_bonus: f64,
}

/// A player in the tournament. Created once at registration; never removed
/// (dropping only sets a flag).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque archetype label from the host's deck classifier.
    pub deck_archetype: Option<String>,
    pub matches: Vec<MatchRecord>,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Always `3 * wins + draws`.
    pub match_points: u32,
    pub opponent_match_win_percentage: f64,
    pub game_win_percentage: f64,
    pub dropped: bool,
    /// 1-based rank; 0 until standings have been computed.
    pub standing: usize,
    pub tiebreakers: Tiebreakers,
}

impl Player {
    /// Create a new player with the given name and optional archetype.
    /// Counters start at zero.
    pub fn new(name: impl Into<String>, deck_archetype: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            deck_archetype,
            matches: Vec::new(),
            wins: 0,
            losses: 0,
            draws: 0,
            match_points: 0,
            opponent_match_win_percentage: 0.0,
            game_win_percentage: 0.0,
            dropped: false,
            standing: 0,
            tiebreakers: Tiebreakers::default(),
        }
    }

    /// Record a win (3 match points).
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.match_points += 3;
    }

    /// Record a loss (no match points).
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Record a draw (1 match point).
    pub fn add_draw(&mut self) {
        self.draws += 1;
        self.match_points += 1;
    }

    /// Total completed matches, byes included.
    pub fn total_matches(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Match-win rate as seen by opponents' OMW%: `(wins + draws/2) / total`,
    /// or 0 with no matches played. Bye wins count like any other win.
    pub fn match_win_rate(&self) -> f64 {
        let total = self.total_matches();
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + 0.5 * f64::from(self.draws)) / f64::from(total)
    }

    /// Ids of every opponent faced so far (byes contribute none). May contain
    /// duplicates after a forced rematch.
    pub fn opponent_ids(&self) -> Vec<PlayerId> {
        self.matches.iter().filter_map(|m| m.opponent).collect()
    }

    /// Whether this player has already faced `other` in this tournament.
    pub fn has_played(&self, other: PlayerId) -> bool {
        self.matches.iter().any(|m| m.opponent == Some(other))
    }
}

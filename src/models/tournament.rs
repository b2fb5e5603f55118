//! Tournament state, status, and the operation error type.

use crate::models::format::{EntryRequirements, Rounds, TournamentFormat};
use crate::models::matches::{BracketSide, Bracket, Brackets, Match, MatchId, MatchStatus};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentError {
    /// Format name not present in the catalog.
    UnknownFormat(String),
    /// Player count outside the format's bounds.
    PlayerCountOutOfRange {
        format: TournamentFormat,
        count: usize,
        min: usize,
        max: usize,
    },
    /// Reported winner is neither seat of the match.
    InvalidResult { winner: PlayerId },
    /// Tournament already started or completed.
    AlreadyStarted(TournamentStatus),
    /// Operation requires an in-progress tournament.
    NotInProgress(TournamentStatus),
    /// Result already recorded; completed matches are immutable.
    MatchAlreadyCompleted(MatchId),
    /// Cannot advance while matches of the current round are pending.
    RoundIncomplete { round: u32, pending: usize },
    /// Player not found in this tournament.
    PlayerNotFound(PlayerId),
    /// Match not found in this tournament.
    MatchNotFound(MatchId),
}

/// Coarse error category, for hosts that map errors to transport codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    State,
    NotFound,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::UnknownFormat(_)
            | TournamentError::PlayerCountOutOfRange { .. }
            | TournamentError::InvalidResult { .. } => ErrorKind::Validation,
            TournamentError::AlreadyStarted(_)
            | TournamentError::NotInProgress(_)
            | TournamentError::MatchAlreadyCompleted(_)
            | TournamentError::RoundIncomplete { .. } => ErrorKind::State,
            TournamentError::PlayerNotFound(_) | TournamentError::MatchNotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UnknownFormat(name) => {
                write!(f, "Invalid tournament format: {name}")
            }
            TournamentError::PlayerCountOutOfRange {
                format,
                count,
                min,
                max,
            } => write!(
                f,
                "{format} requires between {min} and {max} players (got {count})"
            ),
            TournamentError::InvalidResult { winner } => {
                write!(f, "Reported winner {winner} is not part of this match")
            }
            TournamentError::AlreadyStarted(status) => {
                write!(f, "Tournament is already {status}")
            }
            TournamentError::NotInProgress(status) => {
                write!(f, "Operation requires an in-progress tournament (currently {status})")
            }
            TournamentError::MatchAlreadyCompleted(id) => {
                write!(f, "Match {id} already has a result")
            }
            TournamentError::RoundIncomplete { round, pending } => {
                write!(f, "Round {round} still has {pending} pending matches")
            }
            TournamentError::PlayerNotFound(id) => write!(f, "Player not found: {id}"),
            TournamentError::MatchNotFound(id) => write!(f, "Match not found: {id}"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Lifecycle phase of the tournament. Only moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Created,
    InProgress,
    Completed,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Created => write!(f, "created"),
            TournamentStatus::InProgress => write!(f, "in_progress"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Meta-balancing constants: bonus sizes and the underrepresentation
/// threshold (fraction of the field).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetaIncentives {
    pub underrepresented_bonus: f64,
    pub diversity_bonus: f64,
    pub innovation_bonus: f64,
    pub underrepresented_threshold: f64,
}

impl Default for MetaIncentives {
    fn default() -> Self {
        Self {
            underrepresented_bonus: 0.2,
            diversity_bonus: 0.1,
            innovation_bonus: 0.15,
            underrepresented_threshold: 0.1,
        }
    }
}

/// Share of one archetype in the field, with its underrepresentation flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeShare {
    pub archetype: String,
    pub count: usize,
    /// Percentage of classified entrants (0-100).
    pub percentage: f64,
    pub underrepresented: bool,
}

/// Wall-clock budget for a time-limited event. Advisory only: structure
/// adaptation shrinks round counts at creation time, nothing monitors
/// elapsed time during play.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeConstraints {
    pub estimated_end_time: DateTime<Utc>,
    /// Seconds remaining in the current round when last updated.
    pub round_time_remaining: u32,
    pub is_time_limited: bool,
}

/// Full tournament state: players, matches, round counters, and brackets.
/// The host owns this value and threads it through every engine operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub players: Vec<Player>,
    pub rounds: Rounds,
    /// 0 before the tournament starts; never exceeds `rounds.total()`.
    pub current_round: u32,
    /// Every match ever paired, across all rounds and brackets.
    pub matches: Vec<Match>,
    /// Number of top-standing players advancing to an elimination phase.
    pub top_cut: usize,
    /// Minutes per round.
    pub time_per_round: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: String,
    pub organizer: String,
    pub description: String,
    pub status: TournamentStatus,
    pub entry_requirements: Option<EntryRequirements>,
    pub meta_balancing_enabled: bool,
    pub adaptive_structure_enabled: bool,
    pub parallel_brackets_enabled: bool,
    pub meta_incentives: MetaIncentives,
    pub brackets: Brackets,
    pub meta_breakdown: Option<Vec<ArchetypeShare>>,
    pub time_constraints: Option<TimeConstraints>,
}

impl Tournament {
    /// Total number of rounds for this event.
    pub fn total_rounds(&self) -> u32 {
        self.rounds.total()
    }

    /// Player lookup by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable player lookup by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Match lookup by id.
    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Mutable match lookup by id.
    pub fn match_by_id_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Players still in the event, in registration order.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.dropped).collect()
    }

    /// Matches belonging to the given round.
    pub fn round_matches(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Pending matches in the current round.
    pub fn pending_in_current_round(&self) -> usize {
        self.round_matches(self.current_round)
            .filter(|m| m.status == MatchStatus::Pending)
            .count()
    }

    /// Whether every match of the current round has a result.
    pub fn current_round_complete(&self) -> bool {
        self.pending_in_current_round() == 0
    }

    /// Bookkeeping for one bracket side. `Consolation` exists only for
    /// parallel-bracket events.
    pub fn bracket(&self, side: BracketSide) -> Option<&Bracket> {
        match side {
            BracketSide::Main => Some(&self.brackets.main),
            BracketSide::Consolation => self.brackets.consolation.as_ref(),
        }
    }

    /// Mutable bracket bookkeeping for one side.
    pub fn bracket_mut(&mut self, side: BracketSide) -> Option<&mut Bracket> {
        match side {
            BracketSide::Main => Some(&mut self.brackets.main),
            BracketSide::Consolation => self.brackets.consolation.as_mut(),
        }
    }
}

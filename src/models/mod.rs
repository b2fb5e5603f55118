//! Data structures for the tournament engine: formats, players, matches,
//! and tournament state.

mod format;
mod matches;
mod player;
mod tournament;

pub use format::{
    available_formats, entry_tiers, tournament_templates, EliminationType, EntryRequirements,
    EntryTier, FormatInfo, PairingMethod, Rounds, RoundsSpec, TournamentFormat,
    TournamentTemplate, ENTRY_TIERS, TEMPLATES,
};
pub use matches::{
    Bracket, BracketSide, Brackets, Match, MatchId, MatchResult, MatchStatus, ReportedResult,
};
pub use player::{MatchOutcome, MatchRecord, Player, PlayerId, Tiebreakers};
pub use tournament::{
    ArchetypeShare, ErrorKind, MetaIncentives, TimeConstraints, Tournament, TournamentError,
    TournamentId, TournamentStatus,
};

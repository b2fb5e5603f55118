//! Tournament pairing and ranking engine: structure selection, round-by-round
//! pairing generation, result recording, tiebreak standings, and lifecycle
//! control.
//!
//! The engine is pure, synchronous, in-memory computation. The host owns
//! each [`Tournament`] value and threads it through every operation;
//! distinct tournaments share no state and may be processed in parallel,
//! while access to one tournament must be serialized by the host.

pub mod logic;
pub mod models;

pub use logic::{
    adapt_structure, advance_to_next_round, create_pairings, create_tournament, drop_player,
    meta_breakdown, record_match_result, standings, start_tournament, PlayerEntry,
    TournamentConfig,
};
pub use models::{
    available_formats, entry_tiers, tournament_templates, ArchetypeShare, Bracket, BracketSide,
    Brackets, EliminationType, EntryRequirements, EntryTier, ErrorKind, FormatInfo, Match,
    MatchId, MatchOutcome, MatchRecord, MatchResult, MatchStatus, MetaIncentives, PairingMethod,
    Player, PlayerId, ReportedResult, Rounds, RoundsSpec, Tiebreakers, TimeConstraints,
    Tournament, TournamentError, TournamentFormat, TournamentId, TournamentStatus,
    TournamentTemplate,
};

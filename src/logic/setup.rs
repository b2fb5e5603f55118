//! Tournament creation: validate the caller's options and assemble the
//! initial state.

use crate::logic::{meta, structure};
use crate::models::{
    Bracket, Brackets, EntryRequirements, MetaIncentives, Player, Rounds, RoundsSpec,
    TimeConstraints, Tournament, TournamentError, TournamentFormat, TournamentStatus,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entrant as supplied by the host (identity and deck classification
/// come from external services).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub deck_archetype: Option<String>,
}

impl PlayerEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deck_archetype: None,
        }
    }

    pub fn with_archetype(name: impl Into<String>, archetype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deck_archetype: Some(archetype.into()),
        }
    }
}

/// Options for [`create_tournament`]. Every field has a usable default;
/// feature toggles are explicit opt-ins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub name: String,
    pub format: TournamentFormat,
    pub players: Vec<PlayerEntry>,
    pub rounds: RoundsSpec,
    pub top_cut: usize,
    /// Minutes per round.
    pub time_per_round: u32,
    /// Defaults to the moment of creation.
    pub start_time: Option<DateTime<Utc>>,
    pub location: String,
    pub organizer: String,
    pub description: String,
    pub entry_requirements: Option<EntryRequirements>,
    pub meta_incentives: MetaIncentives,
    pub meta_balancing: bool,
    pub adaptive_structure: bool,
    pub parallel_brackets: bool,
    pub time_limited: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            format: TournamentFormat::Swiss,
            players: Vec::new(),
            rounds: RoundsSpec::Auto,
            top_cut: 0,
            time_per_round: 50,
            start_time: None,
            location: "Local".to_string(),
            organizer: "Tournament Organizer".to_string(),
            description: String::new(),
            entry_requirements: None,
            meta_incentives: MetaIncentives::default(),
            meta_balancing: false,
            adaptive_structure: false,
            parallel_brackets: false,
            time_limited: false,
        }
    }
}

/// Resolve the caller's round specification against the catalog.
///
/// A hybrid event ignores `Fixed` (a single number cannot say where the cut
/// falls) and uses the recommended split instead.
fn resolve_rounds(format: TournamentFormat, spec: RoundsSpec, player_count: usize) -> Rounds {
    match (format, spec) {
        (_, RoundsSpec::Auto) | (TournamentFormat::Hybrid, RoundsSpec::Fixed(_)) => {
            format.recommended_rounds(player_count)
        }
        (_, RoundsSpec::Fixed(n)) => Rounds::Main(n),
        (_, RoundsSpec::Split { swiss, elimination }) => Rounds::Split { swiss, elimination },
    }
}

/// Create a tournament from the given options.
///
/// Validates the player count against the format's catalog bounds, resolves
/// `RoundsSpec::Auto`, and applies structure adaptation and the meta
/// breakdown when those toggles are set. The returned value is owned by the
/// host and threaded through every other engine operation.
pub fn create_tournament(config: TournamentConfig) -> Result<Tournament, TournamentError> {
    let info = config.format.info();
    let player_count = config.players.len();
    if player_count < info.min_players || player_count > info.max_players {
        return Err(TournamentError::PlayerCountOutOfRange {
            format: config.format,
            count: player_count,
            min: info.min_players,
            max: info.max_players,
        });
    }

    let rounds = resolve_rounds(config.format, config.rounds, player_count);
    let start_time = config.start_time.unwrap_or_else(Utc::now);

    let players: Vec<Player> = config
        .players
        .into_iter()
        .map(|entry| Player::new(entry.name, entry.deck_archetype))
        .collect();

    // The elimination phase of a hybrid event needs a non-empty cut.
    let top_cut = if config.format == TournamentFormat::Hybrid && config.top_cut == 0 {
        8
    } else {
        config.top_cut
    };

    let wants_consolation =
        config.parallel_brackets || config.format == TournamentFormat::ParallelBrackets;

    let mut tournament = Tournament {
        id: Uuid::new_v4(),
        name: config.name,
        format: config.format,
        players,
        rounds,
        current_round: 0,
        matches: Vec::new(),
        top_cut,
        time_per_round: config.time_per_round,
        start_time,
        end_time: None,
        location: config.location,
        organizer: config.organizer,
        description: config.description,
        status: TournamentStatus::Created,
        entry_requirements: config.entry_requirements,
        meta_balancing_enabled: config.meta_balancing,
        adaptive_structure_enabled: config.adaptive_structure,
        parallel_brackets_enabled: config.parallel_brackets,
        meta_incentives: config.meta_incentives,
        brackets: Brackets {
            main: Bracket::default(),
            consolation: wants_consolation.then(Bracket::default),
        },
        meta_breakdown: None,
        time_constraints: Some(TimeConstraints {
            estimated_end_time: start_time
                + Duration::minutes(i64::from(config.time_per_round) * i64::from(rounds.total())),
            round_time_remaining: config.time_per_round * 60,
            is_time_limited: config.time_limited,
        }),
    };

    if tournament.adaptive_structure_enabled {
        structure::adapt_structure(&mut tournament);
    }

    if tournament.meta_balancing_enabled {
        tournament.meta_breakdown = Some(meta::meta_breakdown(
            &tournament.players,
            tournament.meta_incentives.underrepresented_threshold,
        ));
    }

    log::debug!(
        "created tournament {} ({}, {} players, {} rounds)",
        tournament.id,
        tournament.format,
        tournament.players.len(),
        tournament.rounds.total()
    );

    Ok(tournament)
}

//! Format catalog: per-format metadata, tournament templates, and entry tiers.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competition format. Determines pairing method, round counts, and
/// elimination semantics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TournamentFormat {
    #[default]
    Swiss,
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Hybrid,
    AdaptiveSwiss,
    ParallelBrackets,
}

/// How pairings are generated for a format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMethod {
    /// Pair players of similar record (Swiss).
    Record,
    /// Seeded bracket with winner advancement.
    Bracket,
    RoundRobin,
    /// Swiss rounds, then a top-cut bracket.
    Hybrid,
    /// Swiss with best-effort archetype separation.
    AdaptiveSwiss,
    /// Independent main and consolation brackets.
    Parallel,
}

/// Whether and how players are eliminated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationType {
    None,
    Single,
    Double,
    Hybrid,
    Parallel,
}

/// Static catalog metadata for one format.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FormatInfo {
    pub format: TournamentFormat,
    pub name: &'static str,
    pub description: &'static str,
    pub min_players: usize,
    pub max_players: usize,
    pub pairing_method: PairingMethod,
    pub elimination_type: EliminationType,
}

/// Resolved round structure of a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounds {
    /// A single round count (all non-hybrid formats).
    Main(u32),
    /// Swiss rounds followed by elimination rounds (hybrid format).
    Split { swiss: u32, elimination: u32 },
}

impl Rounds {
    /// Total number of rounds to play.
    pub fn total(self) -> u32 {
        match self {
            Rounds::Main(n) => n,
            Rounds::Split { swiss, elimination } => swiss + elimination,
        }
    }

    /// Number of Swiss rounds before the elimination phase (0 for `Main`).
    pub fn swiss(self) -> u32 {
        match self {
            Rounds::Main(_) => 0,
            Rounds::Split { swiss, .. } => swiss,
        }
    }
}

/// Round specification as supplied by the caller: auto-computed from the
/// format, or explicit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundsSpec {
    #[default]
    Auto,
    Fixed(u32),
    Split { swiss: u32, elimination: u32 },
}

fn log2_ceil(n: usize) -> u32 {
    (n.max(2) as f64).log2().ceil() as u32
}

impl TournamentFormat {
    /// All catalog formats, in catalog order.
    pub fn all() -> [TournamentFormat; 7] {
        [
            TournamentFormat::Swiss,
            TournamentFormat::SingleElimination,
            TournamentFormat::DoubleElimination,
            TournamentFormat::RoundRobin,
            TournamentFormat::Hybrid,
            TournamentFormat::AdaptiveSwiss,
            TournamentFormat::ParallelBrackets,
        ]
    }

    /// Catalog metadata for this format.
    pub fn info(self) -> FormatInfo {
        match self {
            TournamentFormat::Swiss => FormatInfo {
                format: self,
                name: "Swiss",
                description: "Players are paired based on their record, with no eliminations",
                min_players: 8,
                max_players: 256,
                pairing_method: PairingMethod::Record,
                elimination_type: EliminationType::None,
            },
            TournamentFormat::SingleElimination => FormatInfo {
                format: self,
                name: "Single Elimination",
                description: "Players are eliminated after a single loss",
                min_players: 4,
                max_players: 128,
                pairing_method: PairingMethod::Bracket,
                elimination_type: EliminationType::Single,
            },
            TournamentFormat::DoubleElimination => FormatInfo {
                format: self,
                name: "Double Elimination",
                description: "Players are eliminated after two losses",
                min_players: 4,
                max_players: 64,
                pairing_method: PairingMethod::Bracket,
                elimination_type: EliminationType::Double,
            },
            TournamentFormat::RoundRobin => FormatInfo {
                format: self,
                name: "Round Robin",
                description: "Every player plays against every other player",
                min_players: 4,
                max_players: 16,
                pairing_method: PairingMethod::RoundRobin,
                elimination_type: EliminationType::None,
            },
            TournamentFormat::Hybrid => FormatInfo {
                format: self,
                name: "Hybrid",
                description: "Swiss rounds followed by single elimination top cut",
                min_players: 8,
                max_players: 128,
                pairing_method: PairingMethod::Hybrid,
                elimination_type: EliminationType::Hybrid,
            },
            TournamentFormat::AdaptiveSwiss => FormatInfo {
                format: self,
                name: "Adaptive Swiss",
                description: "Swiss rounds with dynamic pairings based on meta diversity",
                min_players: 8,
                max_players: 256,
                pairing_method: PairingMethod::AdaptiveSwiss,
                elimination_type: EliminationType::None,
            },
            TournamentFormat::ParallelBrackets => FormatInfo {
                format: self,
                name: "Parallel Brackets",
                description: "Main and consolation brackets run simultaneously",
                min_players: 8,
                max_players: 64,
                pairing_method: PairingMethod::Parallel,
                elimination_type: EliminationType::Parallel,
            },
        }
    }

    /// Recommended round structure for a pool of `player_count` players.
    ///
    /// Round robin needs `n` rounds for odd `n` (the bye slot adds one) and
    /// `n - 1` for even `n`, so that every pair meets exactly once.
    pub fn recommended_rounds(self, player_count: usize) -> Rounds {
        match self {
            TournamentFormat::Swiss | TournamentFormat::AdaptiveSwiss => {
                Rounds::Main(log2_ceil(player_count) + 1)
            }
            TournamentFormat::SingleElimination => Rounds::Main(log2_ceil(player_count)),
            TournamentFormat::DoubleElimination => Rounds::Main(log2_ceil(player_count) * 2 - 1),
            TournamentFormat::RoundRobin => {
                let n = player_count as u32;
                Rounds::Main(if n % 2 == 0 { n.saturating_sub(1) } else { n })
            }
            TournamentFormat::Hybrid => Rounds::Split {
                swiss: log2_ceil(player_count),
                elimination: log2_ceil((player_count / 4).clamp(2, 8)),
            },
            TournamentFormat::ParallelBrackets => {
                Rounds::Main((f64::from(log2_ceil(player_count)) * 1.5).ceil() as u32)
            }
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            TournamentFormat::Swiss => "swiss",
            TournamentFormat::SingleElimination => "singleElimination",
            TournamentFormat::DoubleElimination => "doubleElimination",
            TournamentFormat::RoundRobin => "roundRobin",
            TournamentFormat::Hybrid => "hybrid",
            TournamentFormat::AdaptiveSwiss => "adaptiveSwiss",
            TournamentFormat::ParallelBrackets => "parallelBrackets",
        };
        write!(f, "{token}")
    }
}

impl FromStr for TournamentFormat {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swiss" => Ok(TournamentFormat::Swiss),
            "singleElimination" => Ok(TournamentFormat::SingleElimination),
            "doubleElimination" => Ok(TournamentFormat::DoubleElimination),
            "roundRobin" => Ok(TournamentFormat::RoundRobin),
            "hybrid" => Ok(TournamentFormat::Hybrid),
            "adaptiveSwiss" => Ok(TournamentFormat::AdaptiveSwiss),
            "parallelBrackets" => Ok(TournamentFormat::ParallelBrackets),
            _ => Err(TournamentError::UnknownFormat(s.to_string())),
        }
    }
}

/// A preset tournament configuration offered to organizers.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TournamentTemplate {
    pub name: &'static str,
    pub format: TournamentFormat,
    pub rounds: RoundsSpec,
    pub top_cut: usize,
    /// Minutes per round.
    pub time_per_round: u32,
    pub description: &'static str,
}

/// Preset templates, from casual league to championship series.
pub const TEMPLATES: &[TournamentTemplate] = &[
    TournamentTemplate {
        name: "Local Tournament",
        format: TournamentFormat::Swiss,
        rounds: RoundsSpec::Fixed(4),
        top_cut: 8,
        time_per_round: 50,
        description: "Standard local tournament with Swiss rounds and top cut",
    },
    TournamentTemplate {
        name: "Quick Draft",
        format: TournamentFormat::SingleElimination,
        rounds: RoundsSpec::Fixed(3),
        top_cut: 0,
        time_per_round: 40,
        description: "Quick draft tournament with single elimination",
    },
    TournamentTemplate {
        name: "Championship Series",
        format: TournamentFormat::Hybrid,
        rounds: RoundsSpec::Split {
            swiss: 6,
            elimination: 3,
        },
        top_cut: 8,
        time_per_round: 60,
        description: "Championship series with Swiss rounds and top cut",
    },
    TournamentTemplate {
        name: "Casual League",
        format: TournamentFormat::RoundRobin,
        rounds: RoundsSpec::Auto,
        top_cut: 0,
        time_per_round: 45,
        description: "Casual league with round robin pairings",
    },
    TournamentTemplate {
        name: "Adaptive Tournament",
        format: TournamentFormat::AdaptiveSwiss,
        rounds: RoundsSpec::Auto,
        top_cut: 4,
        time_per_round: 50,
        description: "Tournament that adapts to player count and time constraints",
    },
    TournamentTemplate {
        name: "Parallel Event",
        format: TournamentFormat::ParallelBrackets,
        rounds: RoundsSpec::Auto,
        top_cut: 0,
        time_per_round: 45,
        description: "Event with main and consolation brackets running in parallel",
    },
];

/// Rating / invitation preconditions for an entry tier. Enforcement is the
/// host's responsibility; the engine only serves the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRequirements {
    pub min_rating: Option<u32>,
    pub invitation: bool,
}

/// A tiered entry level (open play up to invitational).
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EntryTier {
    pub name: &'static str,
    pub requirements: Option<EntryRequirements>,
    pub description: &'static str,
}

/// Entry tiers, lowest requirement first.
pub const ENTRY_TIERS: &[EntryTier] = &[
    EntryTier {
        name: "Open Entry",
        requirements: None,
        description: "Open to all players",
    },
    EntryTier {
        name: "Bronze Qualifier",
        requirements: Some(EntryRequirements {
            min_rating: Some(1200),
            invitation: false,
        }),
        description: "For bronze tier players and above",
    },
    EntryTier {
        name: "Silver Qualifier",
        requirements: Some(EntryRequirements {
            min_rating: Some(1600),
            invitation: false,
        }),
        description: "For silver tier players and above",
    },
    EntryTier {
        name: "Gold Qualifier",
        requirements: Some(EntryRequirements {
            min_rating: Some(2000),
            invitation: false,
        }),
        description: "For gold tier players and above",
    },
    EntryTier {
        name: "Invitational",
        requirements: Some(EntryRequirements {
            min_rating: None,
            invitation: true,
        }),
        description: "By invitation only",
    },
];

/// Catalog metadata for every format.
pub fn available_formats() -> Vec<FormatInfo> {
    TournamentFormat::all().iter().map(|f| f.info()).collect()
}

/// Preset tournament templates.
pub fn tournament_templates() -> &'static [TournamentTemplate] {
    TEMPLATES
}

/// Tiered entry levels.
pub fn entry_tiers() -> &'static [EntryTier] {
    ENTRY_TIERS
}

//! Tournament business logic: creation, structure adaptation, pairing,
//! result recording, standings, and lifecycle control.

mod lifecycle;
mod meta;
mod pairings;
mod results;
mod setup;
mod standings;
mod structure;

pub use lifecycle::{advance_to_next_round, start_tournament};
pub use meta::meta_breakdown;
pub use pairings::create_pairings;
pub use results::{drop_player, record_match_result};
pub use setup::{create_tournament, PlayerEntry, TournamentConfig};
pub use standings::standings;
pub use structure::adapt_structure;

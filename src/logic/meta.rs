//! Meta analysis: archetype distribution over entrants.

use crate::models::{ArchetypeShare, Player};
use std::collections::BTreeMap;

/// Count entrants per deck archetype and flag archetypes below `threshold`
/// (a fraction of the classified field) as underrepresented. Players without
/// an archetype are excluded from the denominator. Sorted by share
/// descending.
pub fn meta_breakdown(players: &[Player], threshold: f64) -> Vec<ArchetypeShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for player in players {
        if let Some(archetype) = &player.deck_archetype {
            *counts.entry(archetype.as_str()).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut breakdown: Vec<ArchetypeShare> = counts
        .into_iter()
        .map(|(archetype, count)| {
            let percentage = (count as f64 / total as f64) * 100.0;
            ArchetypeShare {
                archetype: archetype.to_string(),
                count,
                percentage,
                underrepresented: percentage < threshold * 100.0,
            }
        })
        .collect();

    // BTreeMap iteration already ordered by name; this makes share the
    // primary key with name as the stable tiebreak.
    breakdown.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    breakdown
}

/// Archetypes currently flagged underrepresented, from a computed breakdown.
pub fn underrepresented<'a>(breakdown: &'a [ArchetypeShare]) -> Vec<&'a str> {
    breakdown
        .iter()
        .filter(|share| share.underrepresented)
        .map(|share| share.archetype.as_str())
        .collect()
}

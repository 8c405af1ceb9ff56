//! Proximity ranking between positions
//!
//! Distance between two positions is the smallest gap between the fret-span
//! midpoints of any pair of their instances.

use crate::fretboard::Position;

/// Number of ranked ids returned when the caller has no preference
pub const DEFAULT_RANK_COUNT: usize = 7;

fn min_instance_distance(a: &Position, b: &Position) -> f64 {
    a.instances
        .iter()
        .flat_map(|ai| b.instances.iter().map(move |bi| (ai.midpoint() - bi.midpoint()).abs()))
        .min_by(f64::total_cmp)
        // A position without instances is defined to be at distance 0
        .unwrap_or(0.0)
}

/// Order position ids by closeness to `reference`, nearest first, ties by id.
///
/// Without a reference the positions keep their given order. At most `count`
/// ids are returned.
///
/// # Examples
/// ```
/// use fretmodes::progression::rank_positions_by_proximity;
/// use fretmodes::{positions_for, Root, MODE_TEMPLATES, DORIAN, MIXOLYDIAN};
///
/// let d_dorian = positions_for(Root::from_name("D").unwrap(), &MODE_TEMPLATES[DORIAN]);
/// let g_mixolydian = positions_for(Root::from_name("G").unwrap(), &MODE_TEMPLATES[MIXOLYDIAN]);
///
/// let ranked = rank_positions_by_proximity(&g_mixolydian, Some(&d_dorian[1]), 3);
/// assert_eq!(ranked[0], 6);
/// ```
pub fn rank_positions_by_proximity(
    positions: &[Position],
    reference: Option<&Position>,
    count: usize,
) -> Vec<u8> {
    let Some(reference) = reference else {
        return positions.iter().take(count).map(|p| p.id).collect();
    };

    let mut ranked: Vec<(u8, f64)> = positions
        .iter()
        .map(|p| (p.id, min_instance_distance(reference, p)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(id, _)| id).collect()
}

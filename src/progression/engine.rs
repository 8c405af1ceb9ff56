//! Effective selection resolution
//!
//! A chord's effective mode and position are either the stored, confirmed
//! values or fresh suggestions. Position suggestions depend on the previous
//! chord's effective fingering, so the whole progression resolves as a single
//! left-to-right pass.

use super::chord_parser::ParsedChord;
use super::proximity::rank_positions_by_proximity;
use super::suggest::{compatible_modes, suggest_mode};
use super::types::{ChordSlot, EffectiveSelection, SongKey};
use crate::fretboard::Position;
use crate::positions_for;
use crate::theory::MODE_TEMPLATES;
use tracing::{debug, warn};

/// Resolve every chord's mode and position, in order.
///
/// - Confirmed values are kept as stored, except a confirmed position outside
///   1-7, which is logged and ranked as if unconfirmed.
/// - An unconfirmed mode is suggested from the song key.
/// - An unconfirmed position is the one nearest to the previous chord's
///   effective position (position 1 for the first chord).
///
/// Chords with no compatible mode pass their stored values through and are
/// skipped as references; the next chord ranks against the last chord that
/// did resolve.
///
/// # Examples
/// ```
/// use fretmodes::progression::{compute_effective_selections, Progression};
///
/// let mut progression = Progression::new("ii-V-I");
/// for symbol in ["Dm7", "G7", "CM7"] {
///     progression.add_chord(symbol).unwrap();
/// }
/// let resolved = compute_effective_selections(&progression.chords, None);
/// assert_eq!(resolved.len(), 3);
/// assert!(resolved.iter().all(|s| (1..=7).contains(&s.position_id)));
/// ```
pub fn compute_effective_selections(
    slots: &[ChordSlot],
    song_key: Option<&SongKey>,
) -> Vec<EffectiveSelection> {
    let mut previous: Option<Position> = None;
    let mut resolved = Vec::with_capacity(slots.len());

    for (idx, slot) in slots.iter().enumerate() {
        let stored = EffectiveSelection {
            mode_index: slot.mode_index,
            position_id: slot.position_id,
        };
        if compatible_modes(slot.quality).is_empty() {
            debug!(chord = idx, symbol = %slot.symbol, "unsupported chord passes through");
            resolved.push(stored);
            continue;
        }

        let mode_index = if slot.mode_confirmed {
            slot.mode_index
        } else {
            suggest_mode(slot.root, slot.quality, song_key)
        };
        let Some(template) = MODE_TEMPLATES.get(mode_index) else {
            debug!(chord = idx, mode_index, "stored mode index out of range");
            resolved.push(stored);
            continue;
        };

        let positions = positions_for(slot.root, template);
        let confirmed = slot.pos_confirmed.then_some(slot.position_id);
        let position_id = if let Some(id) = confirmed.filter(|id| (1..=7).contains(id)) {
            id
        } else {
            if let Some(id) = confirmed {
                warn!(
                    chord = idx,
                    position_id = id,
                    "confirmed position out of range, re-ranking"
                );
            }
            rank_positions_by_proximity(&positions, previous.as_ref(), 1)
                .first()
                .copied()
                .unwrap_or(1)
        };

        previous = positions.into_iter().find(|p| p.id == position_id);
        resolved.push(EffectiveSelection {
            mode_index,
            position_id,
        });
    }

    resolved
}

/// Build a new, fully unconfirmed slot for a parsed chord.
///
/// The mode is suggested from the song key; the position starts at
/// `previous_position_id`, or 1 when there is no previous chord.
pub fn build_chord_slot(
    symbol: &str,
    parsed: ParsedChord,
    previous_position_id: Option<u8>,
    song_key: Option<&SongKey>,
) -> ChordSlot {
    ChordSlot {
        symbol: symbol.to_string(),
        root: parsed.root,
        quality: parsed.quality,
        mode_index: suggest_mode(parsed.root, parsed.quality, song_key),
        position_id: previous_position_id.unwrap_or(1),
        pos_confirmed: false,
        mode_confirmed: false,
        unsupported_quality: None,
    }
}

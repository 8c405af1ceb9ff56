//! Projection of a scale onto the six strings

use super::types::{FretMap, FretOccurrence, MAX_FRET, OPEN_STRINGS};
use crate::theory::{NoteName, PitchClass};

/// Map every occurrence of the scale's pitch classes on frets 0 through 22.
///
/// `semitones[i]` must be the pitch class of `notes[i]`, as in a resolved
/// [`Mode`](crate::Mode).
///
/// # Examples
/// ```
/// use fretmodes::{build_fret_map, resolve_mode, Root, MODE_TEMPLATES};
///
/// let mode = resolve_mode(Root::from_name("C").unwrap(), &MODE_TEMPLATES[0]);
/// let map = build_fret_map(&mode.semitones, &mode.notes);
///
/// // B string: open B, then C at fret 1
/// let b_string = map.string(1);
/// assert_eq!(b_string[0].fret, 0);
/// assert_eq!(b_string[1].note.to_string(), "C");
/// assert_eq!(b_string[1].fret, 1);
/// ```
pub fn build_fret_map(semitones: &[PitchClass; 7], notes: &[NoteName; 7]) -> FretMap {
    let strings = OPEN_STRINGS.map(|open| {
        (0..=MAX_FRET)
            .filter_map(|fret| {
                let pitch_class = (open + fret) % 12;
                semitones
                    .iter()
                    .position(|&s| s == pitch_class)
                    .map(|degree| FretOccurrence {
                        note: notes[degree],
                        fret,
                        pitch_class,
                    })
            })
            .collect()
    });
    FretMap { strings }
}

//! Position generation
//!
//! Partitions a [`FretMap`] into the seven canonical positions. Each position is
//! anchored by a two-note group on the B string whose degrees are `(1 + i, 2 + i)`
//! (0-indexed, mod 7). Every other string contributes a three-note group starting
//! at a fixed degree offset from that anchor. The offsets come from standard
//! tuning's interval structure and hold for every root and mode, so the seven
//! positions are rotations of one shape.

use super::types::{FretMap, FretOccurrence, Position, PositionInstance, STRING_COUNT};
use crate::theory::NoteName;
use tracing::debug;

/// Lowest accepted overlap between a B-string pair's span and a trio's span.
///
/// A negative value admits trios that sit just beside the pair. Values of -1
/// through 1 produce identical positions for all roots and modes.
pub const TRIO_OVERLAP_TOLERANCE: i32 = -1;

const B_STRING: usize = 1;
const HIGH_E_STRING: usize = 0;
const LOW_E_STRING: usize = 5;

/// Starting-degree offset of each trio string relative to the B-string pair's
/// degree in position 1, as `(string index, offset)`.
///
/// The low E string copies the high E string and has no entry.
const TRIO_DEGREE_OFFSETS: [(usize, usize); 4] = [
    (HIGH_E_STRING, 3),
    (2, 5), // G
    (3, 2), // D
    (4, 6), // A
];

const POSITION_COUNT: usize = 7;

/// Generate the seven positions using [`TRIO_OVERLAP_TOLERANCE`].
///
/// # Examples
/// ```
/// use fretmodes::{build_fret_map, generate_positions, resolve_mode, Root, MODE_TEMPLATES};
///
/// let mode = resolve_mode(Root::from_name("C").unwrap(), &MODE_TEMPLATES[0]);
/// let map = build_fret_map(&mode.semitones, &mode.notes);
/// let positions = generate_positions(&map, &mode.notes);
///
/// assert_eq!(positions.len(), 7);
/// assert_eq!(positions[0].b_pair, "D, E");
/// assert_eq!(positions[0].range, "1\u{2013}5, 13\u{2013}17");
/// ```
pub fn generate_positions(fret_map: &FretMap, scale_notes: &[NoteName; 7]) -> Vec<Position> {
    generate_positions_with_tolerance(fret_map, scale_notes, TRIO_OVERLAP_TOLERANCE)
}

/// Generate the seven positions with an explicit trio overlap tolerance.
///
/// Positions without any complete instance are still returned, with an empty
/// instance list, so the result always has ids 1 through 7.
pub fn generate_positions_with_tolerance(
    fret_map: &FretMap,
    scale_notes: &[NoteName; 7],
    tolerance: i32,
) -> Vec<Position> {
    let degree = |occ: &FretOccurrence| scale_notes.iter().position(|&n| n == occ.note);

    let b_pairs = stepwise_groups(fret_map.string(B_STRING), 2, &degree);
    let trios: Vec<(usize, usize, Vec<&[FretOccurrence]>)> = TRIO_DEGREE_OFFSETS
        .iter()
        .map(|&(string, offset)| {
            (
                string,
                offset,
                stepwise_groups(fret_map.string(string), 3, &degree),
            )
        })
        .collect();

    (0..POSITION_COUNT)
        .map(|i| {
            let pair_degrees = ((1 + i) % 7, (2 + i) % 7);
            let anchors: Vec<&[FretOccurrence]> = b_pairs
                .iter()
                .copied()
                .filter(|pair| {
                    degree(&pair[0]) == Some(pair_degrees.0)
                        && degree(&pair[1]) == Some(pair_degrees.1)
                })
                .collect();

            let instances: Vec<PositionInstance> = anchors
                .iter()
                .filter_map(|pair| assemble_instance(pair, i, &trios, &degree, tolerance))
                .collect();

            if instances.len() < anchors.len() {
                debug!(
                    position = i + 1,
                    anchors = anchors.len(),
                    complete = instances.len(),
                    "discarded incomplete position instances"
                );
            }

            let b_pair = match anchors.first() {
                Some(pair) => format!("{}, {}", pair[0].note, pair[1].note),
                None => format!(
                    "{}, {}",
                    scale_notes[pair_degrees.0], scale_notes[pair_degrees.1]
                ),
            };
            let range = if instances.is_empty() {
                "?".to_string()
            } else {
                instances
                    .iter()
                    .map(PositionInstance::span_label)
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            Position {
                id: (i + 1) as u8,
                b_pair,
                range,
                instances,
            }
        })
        .collect()
}

/// Adjacent groups of `len` occurrences whose degrees ascend one step at a time
fn stepwise_groups<'a, F>(
    occurrences: &'a [FretOccurrence],
    len: usize,
    degree: &F,
) -> Vec<&'a [FretOccurrence]>
where
    F: Fn(&FretOccurrence) -> Option<usize>,
{
    occurrences
        .windows(len)
        .filter(|group| {
            group.windows(2).all(|w| match (degree(&w[0]), degree(&w[1])) {
                (Some(a), Some(b)) => b == (a + 1) % 7,
                _ => false,
            })
        })
        .collect()
}

/// Build one instance around a B-string pair, or `None` if any string has no
/// trio close enough.
fn assemble_instance<F>(
    pair: &[FretOccurrence],
    position_index: usize,
    trios: &[(usize, usize, Vec<&[FretOccurrence]>)],
    degree: &F,
    tolerance: i32,
) -> Option<PositionInstance>
where
    F: Fn(&FretOccurrence) -> Option<usize>,
{
    let pair_min = pair[0].fret as i32;
    let pair_max = pair[pair.len() - 1].fret as i32;

    let mut strings: [Vec<FretOccurrence>; STRING_COUNT] = Default::default();
    strings[B_STRING] = pair.to_vec();

    for (string, offset, candidates) in trios {
        let start_degree = (offset + position_index) % 7;
        let mut best: Option<(&[FretOccurrence], i32)> = None;
        for &trio in candidates.iter().filter(|t| degree(&t[0]) == Some(start_degree)) {
            let trio_min = trio[0].fret as i32;
            let trio_max = trio[trio.len() - 1].fret as i32;
            let overlap = pair_max.min(trio_max) - pair_min.max(trio_min);
            // Strictly greater keeps the first trio found on ties
            if best.map_or(true, |(_, o)| overlap > o) {
                best = Some((trio, overlap));
            }
        }
        match best {
            Some((trio, overlap)) if overlap >= tolerance => strings[*string] = trio.to_vec(),
            _ => return None,
        }
    }
    strings[LOW_E_STRING] = strings[HIGH_E_STRING].clone();

    let frets = strings.iter().flatten().map(|occ| occ.fret);
    let fret_min = frets.clone().min()?;
    let fret_max = frets.max()?;

    Some(PositionInstance {
        strings,
        fret_min,
        fret_max,
    })
}

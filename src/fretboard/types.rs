//! Fretboard data type definitions
//!
//! String indices run from the highest-pitched string (index 0, the 1st string)
//! to the lowest (index 5, the 6th string).

use crate::theory::{NoteName, PitchClass};
use serde::Serialize;

/// Number of strings in standard tuning
pub const STRING_COUNT: usize = 6;

/// Highest fret on the neck
pub const MAX_FRET: u8 = 22;

/// Open-string pitch classes, 1st string first: E B G D A E
pub const OPEN_STRINGS: [PitchClass; STRING_COUNT] = [4, 11, 7, 2, 9, 4];

/// Short string labels for display, 1st string first
pub const STRING_LABELS: [&str; STRING_COUNT] = ["e", "B", "G", "D", "A", "E"];

/// One place a scale tone sounds on a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretOccurrence {
    pub note: NoteName,
    pub fret: u8,
    pub pitch_class: PitchClass,
}

/// Scale tones on every string, fret-ascending within each string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FretMap {
    pub strings: [Vec<FretOccurrence>; STRING_COUNT],
}

impl FretMap {
    pub fn string(&self, index: usize) -> &[FretOccurrence] {
        &self.strings[index]
    }
}

/// One concrete octave placement of a position shape.
///
/// Only fully populated fingerings are kept, so every string has its notes:
/// two on the B string (index 1), three everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInstance {
    pub strings: [Vec<FretOccurrence>; STRING_COUNT],
    pub fret_min: u8,
    pub fret_max: u8,
}

impl PositionInstance {
    /// Center of the instance's fret span
    pub fn midpoint(&self) -> f64 {
        (self.fret_min as f64 + self.fret_max as f64) / 2.0
    }

    pub fn span_label(&self) -> String {
        format!("{}\u{2013}{}", self.fret_min, self.fret_max)
    }
}

/// One of the seven fingering positions of a mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// 1-7
    pub id: u8,
    /// The defining B-string degree pair, e.g. `"D, E"`
    pub b_pair: String,
    /// Fret spans of every instance, e.g. `"1–5, 13–17"`, or `"?"` when empty
    pub range: String,
    pub instances: Vec<PositionInstance>,
}

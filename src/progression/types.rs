//! Progression data type definitions
//!
//! These are the records the presentation layer edits and the store persists.
//! Field names serialize in camelCase to match the stored document format.

use crate::theory::{ChordQuality, PitchClass, Root};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tonal center used to pick diatonic modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongKey {
    pub root: Root,
    #[serde(default)]
    pub minor: bool,
}

impl SongKey {
    pub fn major(root: Root) -> Self {
        Self { root, minor: false }
    }

    pub fn minor(root: Root) -> Self {
        Self { root, minor: true }
    }

    /// Tonic of the major scale sharing this key's notes (A minor -> C)
    pub fn relative_major(&self) -> PitchClass {
        if self.minor {
            (self.root.pitch_class() + 3) % 12
        } else {
            self.root.pitch_class()
        }
    }
}

impl fmt::Display for SongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, if self.minor { "m" } else { "" })
    }
}

/// One chord of a progression with its chosen mode and position
///
/// The two confirmation flags are independent: an unconfirmed mode is
/// re-suggested from the song key, an unconfirmed position is re-ranked against
/// the previous chord's fingering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredChordSlot", into = "StoredChordSlot")]
pub struct ChordSlot {
    pub symbol: String,
    pub root: Root,
    pub quality: ChordQuality,
    pub mode_index: usize,
    pub position_id: u8,
    pub pos_confirmed: bool,
    pub mode_confirmed: bool,
    /// Quality text as stored, kept when no mode produces it (`"dim"`)
    pub unsupported_quality: Option<String>,
}

/// Stored shape of a [`ChordSlot`]; the quality stays free text
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredChordSlot {
    symbol: String,
    root_name: Root,
    quality: String,
    mode_idx: usize,
    pos_id: u8,
    #[serde(default)]
    pos_confirmed: bool,
    #[serde(default)]
    mode_confirmed: bool,
}

impl From<StoredChordSlot> for ChordSlot {
    fn from(stored: StoredChordSlot) -> Self {
        let quality =
            ChordQuality::from_key(&stored.quality).unwrap_or(ChordQuality::Unsupported);
        let unsupported_quality = (quality == ChordQuality::Unsupported).then_some(stored.quality);
        Self {
            symbol: stored.symbol,
            root: stored.root_name,
            quality,
            mode_index: stored.mode_idx,
            position_id: stored.pos_id,
            pos_confirmed: stored.pos_confirmed,
            mode_confirmed: stored.mode_confirmed,
            unsupported_quality,
        }
    }
}

impl From<ChordSlot> for StoredChordSlot {
    fn from(slot: ChordSlot) -> Self {
        let quality = match (slot.quality, slot.unsupported_quality) {
            (ChordQuality::Unsupported, Some(text)) => text,
            (quality, _) => quality.key().to_string(),
        };
        Self {
            symbol: slot.symbol,
            root_name: slot.root,
            quality,
            mode_idx: slot.mode_index,
            pos_id: slot.position_id,
            pos_confirmed: slot.pos_confirmed,
            mode_confirmed: slot.mode_confirmed,
        }
    }
}

/// A named, ordered list of chords with an optional song key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_key: Option<SongKey>,
    #[serde(default)]
    pub chords: Vec<ChordSlot>,
}

/// Resolved mode and position of one chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSelection {
    pub mode_index: usize,
    pub position_id: u8,
}

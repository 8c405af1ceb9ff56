//! # Music Theory Types
//!
//! Static building blocks shared by every other module.
//!
//! ## Type Hierarchy
//! ```text
//! NoteName  = Letter (C..B) + accidental offset (-2..=2)
//! Root      = one canonical NoteName per pitch class (flat spellings)
//! ModeTemplate
//!   ├── key / name            ("dorian", "Dorian")
//!   ├── intervals: [u8; 7]    semitones from the root
//!   ├── quality: ChordQuality seventh chord built on degree 1
//!   └── chord_degree_indices  always [0, 2, 4, 6]
//! ```
//!
//! ## Accidentals
//! Sharps are written `#`, flats `♭`. Parsing additionally accepts `♯` and the
//! ASCII `b`. Spelled scales never need more than a double accidental.
//!
//! The mode and root tables are immutable statics, safe to share freely.

use crate::error::FretError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semitone 0-11 with C = 0
pub type PitchClass = u8;

/// Interval pattern of the major scale, the reference for degree labels
pub const IONIAN_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Natural note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Pitch class of the natural letter
    pub fn semitone(self) -> PitchClass {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The letter `steps` places above this one, wrapping B -> C
    pub fn step(self, steps: usize) -> Letter {
        Letter::ALL[(self.index() + steps) % 7]
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Render an accidental offset as `#`/`♭` marks.
///
/// Only offsets up to a double sharp or double flat exist in the seven modes.
pub fn accidental_str(offset: i8) -> &'static str {
    match offset {
        0 => "",
        1 => "#",
        -1 => "♭",
        2 => "##",
        -2 => "♭♭",
        _ => unreachable!("unsupported accidental offset: {}", offset),
    }
}

/// One spelling of a pitch class: letter plus accidental offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NoteName {
    pub letter: Letter,
    pub accidental: i8,
}

impl NoteName {
    pub fn new(letter: Letter, accidental: i8) -> Self {
        Self { letter, accidental }
    }

    pub fn natural(letter: Letter) -> Self {
        Self::new(letter, 0)
    }

    pub fn pitch_class(self) -> PitchClass {
        (self.letter.semitone() as i16 + self.accidental as i16).rem_euclid(12) as PitchClass
    }

    /// Parse a note name such as `"C"`, `"F#"`, `"B♭"`, `"Bb"` or `"E♭♭"`.
    ///
    /// Accidental marks accumulate, so `"C##"` is a double sharp.
    pub fn parse(s: &str) -> Option<NoteName> {
        let mut chars = s.trim().chars();
        let letter = Letter::from_char(chars.next()?)?;
        let mut accidental: i8 = 0;
        for c in chars {
            match c {
                '#' | '♯' => accidental += 1,
                '♭' | 'b' => accidental -= 1,
                _ => return None,
            }
            if accidental.abs() > 2 {
                return None;
            }
        }
        Some(NoteName::new(letter, accidental))
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), accidental_str(self.accidental))
    }
}

impl From<NoteName> for String {
    fn from(note: NoteName) -> Self {
        note.to_string()
    }
}

impl TryFrom<String> for NoteName {
    type Error = FretError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NoteName::parse(&s).ok_or(FretError::UnknownRoot(s))
    }
}

/// One of the twelve selectable roots.
///
/// Every pitch class has exactly one representative; black keys use their flat
/// spelling (C♯ is stored as D♭).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Root(NoteName);

/// The twelve canonical roots in chromatic order from C
pub const ROOTS: [Root; 12] = [
    Root(NoteName { letter: Letter::C, accidental: 0 }),
    Root(NoteName { letter: Letter::D, accidental: -1 }),
    Root(NoteName { letter: Letter::D, accidental: 0 }),
    Root(NoteName { letter: Letter::E, accidental: -1 }),
    Root(NoteName { letter: Letter::E, accidental: 0 }),
    Root(NoteName { letter: Letter::F, accidental: 0 }),
    Root(NoteName { letter: Letter::G, accidental: -1 }),
    Root(NoteName { letter: Letter::G, accidental: 0 }),
    Root(NoteName { letter: Letter::A, accidental: -1 }),
    Root(NoteName { letter: Letter::A, accidental: 0 }),
    Root(NoteName { letter: Letter::B, accidental: -1 }),
    Root(NoteName { letter: Letter::B, accidental: 0 }),
];

impl Root {
    /// Canonical root for a pitch class
    pub fn from_pitch_class(pc: PitchClass) -> Root {
        ROOTS[(pc % 12) as usize]
    }

    /// Look up a root by name, normalizing sharp spellings to the flat
    /// representative (`"F#"` -> G♭) and accepting ASCII `b` for flats.
    ///
    /// Only a letter with at most one accidental is accepted, and only when it
    /// names one of the twelve canonical roots or the five sharped black keys.
    pub fn from_name(name: &str) -> Result<Root, FretError> {
        let unknown = || FretError::UnknownRoot(name.to_string());
        let note = NoteName::parse(name).ok_or_else(unknown)?;
        if note.accidental.abs() > 1 {
            return Err(unknown());
        }
        let root = Root::from_pitch_class(note.pitch_class());
        let sharp_of_black_key = note.accidental == 1 && root.0.accidental == -1;
        if root.0 == note || sharp_of_black_key {
            Ok(root)
        } else {
            // E#, B#, C♭ and F♭ are valid note names but not selectable roots
            Err(unknown())
        }
    }

    pub fn note(self) -> NoteName {
        self.0
    }

    pub fn pitch_class(self) -> PitchClass {
        self.0.pitch_class()
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Root> for NoteName {
    fn from(root: Root) -> Self {
        root.0
    }
}

impl From<Root> for String {
    fn from(root: Root) -> Self {
        root.to_string()
    }
}

impl TryFrom<String> for Root {
    type Error = FretError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Root::from_name(&s)
    }
}

/// Seventh-chord quality produced by a mode's degrees 1-3-5-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    #[serde(rename = "maj7")]
    MajorSeventh,
    #[serde(rename = "m7")]
    MinorSeventh,
    #[serde(rename = "7")]
    DominantSeventh,
    #[serde(rename = "m7♭5")]
    HalfDiminished,
    /// Quality read from stored data that no mode produces
    #[serde(rename = "unsupported")]
    #[serde(other)]
    Unsupported,
}

impl ChordQuality {
    pub const SUPPORTED: [ChordQuality; 4] = [
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::DominantSeventh,
        ChordQuality::HalfDiminished,
    ];

    /// Identifier used in stored data and parse results
    pub fn key(self) -> &'static str {
        match self {
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::HalfDiminished => "m7♭5",
            ChordQuality::Unsupported => "unsupported",
        }
    }

    /// Supported quality for a stored key. The ASCII spelling `m7b5` is
    /// accepted for the half-diminished key.
    pub fn from_key(key: &str) -> Option<ChordQuality> {
        if key == "m7b5" {
            return Some(ChordQuality::HalfDiminished);
        }
        Self::SUPPORTED.into_iter().find(|q| q.key() == key)
    }

    /// Suffix appended to the root in a chord symbol (`CM7`, `Dm7`)
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::MajorSeventh => "M7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::HalfDiminished => "m7♭5",
            ChordQuality::Unsupported => "",
        }
    }

    /// Minor-third qualities, written with lowercase roman numerals
    pub fn is_minor(self) -> bool {
        matches!(
            self,
            ChordQuality::MinorSeventh | ChordQuality::HalfDiminished
        )
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static definition of a diatonic mode, independent of root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub intervals: [u8; 7],
    pub quality: ChordQuality,
    pub chord_degree_indices: [usize; 4],
}

const SEVENTH_CHORD: [usize; 4] = [0, 2, 4, 6];

pub const IONIAN: usize = 0;
pub const DORIAN: usize = 1;
pub const PHRYGIAN: usize = 2;
pub const LYDIAN: usize = 3;
pub const MIXOLYDIAN: usize = 4;
pub const AEOLIAN: usize = 5;
pub const LOCRIAN: usize = 6;

/// The seven modes of the major scale, in scale-degree order
pub static MODE_TEMPLATES: [ModeTemplate; 7] = [
    ModeTemplate {
        key: "ionian",
        name: "Ionian",
        intervals: [0, 2, 4, 5, 7, 9, 11],
        quality: ChordQuality::MajorSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "dorian",
        name: "Dorian",
        intervals: [0, 2, 3, 5, 7, 9, 10],
        quality: ChordQuality::MinorSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "phrygian",
        name: "Phrygian",
        intervals: [0, 1, 3, 5, 7, 8, 10],
        quality: ChordQuality::MinorSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "lydian",
        name: "Lydian",
        intervals: [0, 2, 4, 6, 7, 9, 11],
        quality: ChordQuality::MajorSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "mixolydian",
        name: "Mixolydian",
        intervals: [0, 2, 4, 5, 7, 9, 10],
        quality: ChordQuality::DominantSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "aeolian",
        name: "Aeolian",
        intervals: [0, 2, 3, 5, 7, 8, 10],
        quality: ChordQuality::MinorSeventh,
        chord_degree_indices: SEVENTH_CHORD,
    },
    ModeTemplate {
        key: "locrian",
        name: "Locrian",
        intervals: [0, 1, 3, 5, 6, 8, 10],
        quality: ChordQuality::HalfDiminished,
        chord_degree_indices: SEVENTH_CHORD,
    },
];

/// Find a mode index by key or display name (case-insensitive), or by its
/// 0-based index written as a number.
pub fn mode_index(name: &str) -> Result<usize, FretError> {
    let trimmed = name.trim();
    if let Ok(idx) = trimmed.parse::<usize>() {
        if idx < MODE_TEMPLATES.len() {
            return Ok(idx);
        }
    }
    MODE_TEMPLATES
        .iter()
        .position(|t| t.key.eq_ignore_ascii_case(trimmed) || t.name.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| FretError::UnknownMode(name.to_string()))
}

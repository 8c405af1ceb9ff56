//! # Progression Module
//!
//! Chord progressions with automatic mode and fingering suggestions.
//!
//! ## Sub-modules
//! - `types` - SongKey, ChordSlot, Progression, EffectiveSelection
//! - `chord_parser` - Chord symbol parsing (Dm7, B♭maj7, F#m7b5)
//! - `suggest` - Diatonic mode suggestion, diatonic test, roman numerals
//! - `proximity` - Ranking positions by distance on the neck
//! - `engine` - Effective-selection chain and slot construction
//! - `editor` - Progression editing operations
//!
//! ## Example
//! ```rust
//! use fretmodes::progression::{Progression, SongKey};
//! use fretmodes::{Root, DORIAN, IONIAN, MIXOLYDIAN};
//!
//! let mut progression = Progression::new("ii-V-I in C");
//! progression.set_song_key(Some(SongKey::major(Root::from_name("C").unwrap())));
//! for symbol in ["Dm7", "G7", "Cmaj7"] {
//!     progression.add_chord(symbol).unwrap();
//! }
//!
//! let modes: Vec<usize> = progression
//!     .effective_selections()
//!     .iter()
//!     .map(|s| s.mode_index)
//!     .collect();
//! assert_eq!(modes, [DORIAN, MIXOLYDIAN, IONIAN]);
//! ```
//!
//! ## Suggestion Chain
//! Each unconfirmed position is ranked against the previous chord's
//! *effective* position, never its stored one. Confirming or re-suggesting an
//! early chord therefore ripples through every later unconfirmed chord.

mod chord_parser;
mod editor;
mod engine;
mod proximity;
mod suggest;
mod types;


pub use chord_parser::{normalize_chord_symbol, parse_chord_symbol, ParsedChord};
pub use editor::{delete_progression, new_progression, MoveDirection};
pub use engine::{build_chord_slot, compute_effective_selections};
pub use proximity::{rank_positions_by_proximity, DEFAULT_RANK_COUNT};
pub use suggest::{chord_roman_numeral, compatible_modes, is_diatonic, suggest_mode};
pub use types::{ChordSlot, EffectiveSelection, Progression, SongKey};

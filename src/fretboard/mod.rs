//! # Fretboard Module
//!
//! Maps a resolved mode onto a standard-tuned six-string neck and carves the
//! result into the seven position fingerings.
//!
//! ## Sub-modules
//! - `types` - FretOccurrence, FretMap, PositionInstance, Position
//! - `map` - Scale-to-fretboard projection
//! - `positions` - Position generation
//!
//! ## Pipeline
//! ```text
//! Mode ──build_fret_map──▶ FretMap ──generate_positions──▶ [Position; 7]
//! ```
//!
//! ## Example
//! ```rust
//! use fretmodes::fretboard::{build_fret_map, generate_positions};
//! use fretmodes::{resolve_mode, Root, MODE_TEMPLATES};
//!
//! let mode = resolve_mode(Root::from_name("A").unwrap(), &MODE_TEMPLATES[5]);
//! let map = build_fret_map(&mode.semitones, &mode.notes);
//! let positions = generate_positions(&map, &mode.notes);
//!
//! for position in &positions {
//!     for instance in &position.instances {
//!         // B string holds two notes, every other string three
//!         assert_eq!(instance.strings[1].len(), 2);
//!         assert_eq!(instance.strings[3].len(), 3);
//!     }
//! }
//! ```
//!
//! ## String Order
//! Index 0 is the 1st (high E) string, index 5 the 6th (low E). In this model
//! the two E strings carry identical content: the low E trio is a copy of the
//! high E trio.

mod map;
mod positions;
mod types;


pub use map::build_fret_map;
pub use positions::{
    generate_positions, generate_positions_with_tolerance, TRIO_OVERLAP_TOLERANCE,
};
pub use types::{
    FretMap, FretOccurrence, Position, PositionInstance, MAX_FRET, OPEN_STRINGS, STRING_COUNT,
    STRING_LABELS,
};

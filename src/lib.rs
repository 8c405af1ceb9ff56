pub mod config;
pub mod error;
pub mod fretboard;
pub mod notation;
pub mod progression;
pub mod spelling;
pub mod store;
pub mod theory;

pub use config::Config;
pub use error::*;
pub use fretboard::{build_fret_map, generate_positions, FretMap, FretOccurrence, Position, PositionInstance};
pub use spelling::{build_degree_map, resolve_mode, spell_scale, DegreeMap, Mode};
pub use theory::*;

/// Resolve a mode and generate its seven positions.
/// This is the main entry point for fretboard display.
pub fn positions_for(root: Root, template: &ModeTemplate) -> Vec<Position> {
    let mode = resolve_mode(root, template);
    positions_for_mode(&mode)
}

/// Generate the seven positions of an already resolved mode
pub fn positions_for_mode(mode: &Mode) -> Vec<Position> {
    let fret_map = build_fret_map(&mode.semitones, &mode.notes);
    generate_positions(&fret_map, &mode.notes)
}

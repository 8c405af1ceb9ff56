//! Progression editing
//!
//! Mutations the progression editor applies before handing the list back to
//! the store.

use super::chord_parser::parse_chord_symbol;
use super::engine::{build_chord_slot, compute_effective_selections};
use super::suggest::suggest_mode;
use super::types::{ChordSlot, EffectiveSelection, Progression, SongKey};
use crate::error::FretError;
use crate::theory::MODE_TEMPLATES;

/// Direction for [`Progression::move_chord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Earlier,
    Later,
}

impl Progression {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            song_key: None,
            chords: Vec::new(),
        }
    }

    /// Parse `symbol` and append it as an unconfirmed chord.
    ///
    /// The new chord starts from the last chord's position id.
    pub fn add_chord(&mut self, symbol: &str) -> Result<&ChordSlot, FretError> {
        let trimmed = symbol.trim();
        let parsed = parse_chord_symbol(trimmed)
            .ok_or_else(|| FretError::UnsupportedChord(trimmed.to_string()))?;
        let previous = self.chords.last().map(|c| c.position_id);
        let slot = build_chord_slot(trimmed, parsed, previous, self.song_key.as_ref());
        self.chords.push(slot);
        Ok(&self.chords[self.chords.len() - 1])
    }

    pub fn remove_chord(&mut self, index: usize) -> Result<ChordSlot, FretError> {
        self.check_index(index)?;
        Ok(self.chords.remove(index))
    }

    /// Swap a chord with its neighbour. Returns `false` at either end.
    pub fn move_chord(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Earlier => index.checked_sub(1),
            MoveDirection::Later => Some(index + 1),
        };
        match target {
            Some(target) if index < self.chords.len() && target < self.chords.len() => {
                self.chords.swap(index, target);
                true
            }
            _ => false,
        }
    }

    /// Change the song key and re-suggest every mode the user has not confirmed.
    pub fn set_song_key(&mut self, song_key: Option<SongKey>) {
        self.song_key = song_key;
        for slot in self.chords.iter_mut().filter(|c| !c.mode_confirmed) {
            slot.mode_index = suggest_mode(slot.root, slot.quality, song_key.as_ref());
        }
    }

    /// Pin a chord's mode.
    pub fn select_mode(&mut self, index: usize, mode_index: usize) -> Result<(), FretError> {
        self.check_index(index)?;
        if mode_index >= MODE_TEMPLATES.len() {
            return Err(FretError::UnknownMode(mode_index.to_string()));
        }
        let slot = &mut self.chords[index];
        slot.mode_index = mode_index;
        slot.mode_confirmed = true;
        Ok(())
    }

    /// Pin a chord's position (1-7).
    pub fn select_position(&mut self, index: usize, position_id: u8) -> Result<(), FretError> {
        self.check_index(index)?;
        if !(1..=7).contains(&position_id) {
            return Err(FretError::OutOfRange {
                index: position_id as usize,
                len: 7,
            });
        }
        let slot = &mut self.chords[index];
        slot.position_id = position_id;
        slot.pos_confirmed = true;
        Ok(())
    }

    pub fn effective_selections(&self) -> Vec<EffectiveSelection> {
        compute_effective_selections(&self.chords, self.song_key.as_ref())
    }

    fn check_index(&self, index: usize) -> Result<(), FretError> {
        if index < self.chords.len() {
            Ok(())
        } else {
            Err(FretError::OutOfRange {
                index,
                len: self.chords.len(),
            })
        }
    }
}

/// Append an empty progression and return its index.
pub fn new_progression(progressions: &mut Vec<Progression>, name: &str) -> usize {
    progressions.push(Progression::new(name));
    progressions.len() - 1
}

/// Remove a progression. The last remaining progression is never deleted.
pub fn delete_progression(
    progressions: &mut Vec<Progression>,
    index: usize,
) -> Option<Progression> {
    if progressions.len() <= 1 || index >= progressions.len() {
        return None;
    }
    Some(progressions.remove(index))
}

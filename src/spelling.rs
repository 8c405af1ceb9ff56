//! Scale spelling and mode resolution
//!
//! Turns a root plus a [`ModeTemplate`] into a fully spelled [`Mode`]: note
//! names with one letter per degree, degree labels relative to the major
//! scale, the seventh-chord symbol and its chord tones, and the absolute pitch
//! classes the fretboard mapper needs.

use crate::theory::{accidental_str, ModeTemplate, NoteName, PitchClass, IONIAN_INTERVALS};
use serde::{Serialize, Serializer};

/// Spell the seven notes of a scale.
///
/// Letters are assigned cyclically from the root's letter, so every letter
/// appears exactly once. Each letter then gets whichever accidental makes it
/// sound the target pitch, wrapping the difference into [-6, 6] so the
/// smallest spelling wins.
///
/// # Examples
/// ```
/// use fretmodes::{spell_scale, NoteName, IONIAN_INTERVALS};
///
/// let root = NoteName::parse("D♭").unwrap();
/// let names: Vec<String> = spell_scale(root, &IONIAN_INTERVALS)
///     .iter()
///     .map(|n| n.to_string())
///     .collect();
/// assert_eq!(names, ["D♭", "E♭", "F", "G♭", "A♭", "B♭", "C"]);
/// ```
pub fn spell_scale(root: NoteName, intervals: &[u8; 7]) -> [NoteName; 7] {
    let root_pc = root.pitch_class() as i16;
    let mut notes = [root; 7];
    for (i, &interval) in intervals.iter().enumerate() {
        let letter = root.letter.step(i);
        let target = (root_pc + interval as i16).rem_euclid(12);
        let mut diff = target - letter.semitone() as i16;
        if diff > 6 {
            diff -= 12;
        }
        if diff < -6 {
            diff += 12;
        }
        assert!(diff.abs() <= 2, "{} needs {} accidentals", letter.as_char(), diff);
        notes[i] = NoteName::new(letter, diff as i8);
    }
    notes
}

/// Scale-degree labels (`"1"`, `"♭3"`, `"#4"`) aligned with the spelled notes
///
/// Serializes as a note-to-label object in scale order, e.g.
/// `{"D":"1","E":"2","F":"♭3",...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeMap {
    entries: Vec<(NoteName, String)>,
}

impl DegreeMap {
    /// Degree label of a scale note, `None` for notes outside the scale
    pub fn label(&self, note: NoteName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == note)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NoteName, &str)> {
        self.entries.iter().map(|(n, label)| (*n, label.as_str()))
    }
}

impl Serialize for DegreeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Label each degree by comparing the mode's intervals with the major scale.
pub fn build_degree_map(intervals: &[u8; 7], notes: &[NoteName; 7]) -> DegreeMap {
    let entries = intervals
        .iter()
        .zip(IONIAN_INTERVALS.iter())
        .zip(notes.iter())
        .enumerate()
        .map(|(i, ((&interval, &reference), &note))| {
            let diff = interval as i8 - reference as i8;
            // Only -2..=2 occurs for the seven modes; anything else keeps the bare number
            let mark = if diff.abs() <= 2 { accidental_str(diff) } else { "" };
            (note, format!("{}{}", mark, i + 1))
        })
        .collect();
    DegreeMap { entries }
}

/// A mode template resolved against a root
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub key: &'static str,
    pub name: &'static str,
    /// Absolute pitch classes of the seven degrees
    pub semitones: [PitchClass; 7],
    pub notes: [NoteName; 7],
    pub degrees: DegreeMap,
    /// Chord symbol, e.g. `"CM7"` or `"Dm7"`
    pub chord: String,
    pub chord_tones: [NoteName; 4],
    /// Degree labels of the chord tones, e.g. `"1 ♭3 5 ♭7"`
    pub chord_degrees: String,
}

/// Resolve a template against a root.
///
/// # Examples
/// ```
/// use fretmodes::{resolve_mode, Root, MODE_TEMPLATES, DORIAN};
///
/// let mode = resolve_mode(Root::from_name("D").unwrap(), &MODE_TEMPLATES[DORIAN]);
/// assert_eq!(mode.chord, "Dm7");
/// assert_eq!(mode.chord_degrees, "1 ♭3 5 ♭7");
/// ```
pub fn resolve_mode(root: impl Into<NoteName>, template: &ModeTemplate) -> Mode {
    let root = root.into();
    let notes = spell_scale(root, &template.intervals);
    let degrees = build_degree_map(&template.intervals, &notes);
    let chord_tones = template.chord_degree_indices.map(|i| notes[i]);
    let chord_degrees = chord_tones
        .iter()
        .filter_map(|&n| degrees.label(n))
        .collect::<Vec<_>>()
        .join(" ");
    let root_pc = root.pitch_class();
    let semitones = template.intervals.map(|s| (root_pc + s) % 12);

    Mode {
        key: template.key,
        name: template.name,
        semitones,
        notes,
        degrees,
        chord: format!("{}{}", notes[0], template.quality.suffix()),
        chord_tones,
        chord_degrees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{Root, DORIAN, IONIAN, LOCRIAN, MIXOLYDIAN, MODE_TEMPLATES, ROOTS};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn names(notes: &[NoteName]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    fn root(name: &str) -> Root {
        Root::from_name(name).unwrap()
    }

    #[test]
    fn test_spell_major_scales() {
        let c = spell_scale(root("C").note(), &IONIAN_INTERVALS);
        assert_eq!(names(&c), ["C", "D", "E", "F", "G", "A", "B"]);

        let g = spell_scale(root("G").note(), &IONIAN_INTERVALS);
        assert_eq!(names(&g), ["G", "A", "B", "C", "D", "E", "F#"]);
    }

    #[test]
    fn test_spell_double_flats() {
        let mode = resolve_mode(root("D♭"), &MODE_TEMPLATES[LOCRIAN]);
        assert_eq!(
            names(&mode.notes),
            ["D♭", "E♭♭", "F♭", "G♭", "A♭♭", "B♭♭", "C♭"]
        );
    }

    #[test]
    fn test_every_scale_uses_all_seven_letters() {
        for r in ROOTS {
            for template in MODE_TEMPLATES.iter() {
                let notes = spell_scale(r.note(), &template.intervals);
                let letters: HashSet<_> = notes.iter().map(|n| n.letter).collect();
                assert_eq!(letters.len(), 7, "{} {}", r, template.name);
                assert_eq!(notes[0].letter, r.note().letter);
            }
        }
    }

    #[test]
    fn test_spelled_notes_sound_the_intervals() {
        for r in ROOTS {
            for template in MODE_TEMPLATES.iter() {
                let mode = resolve_mode(r, template);
                for (note, &pc) in mode.notes.iter().zip(mode.semitones.iter()) {
                    assert_eq!(note.pitch_class(), pc);
                }
            }
        }
    }

    #[test]
    fn test_degree_map() {
        let ionian = resolve_mode(root("C"), &MODE_TEMPLATES[IONIAN]);
        let labels: Vec<&str> = ionian.degrees.iter().map(|(_, l)| l).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7"]);

        let dorian = resolve_mode(root("D"), &MODE_TEMPLATES[DORIAN]);
        assert_eq!(dorian.degrees.label(NoteName::parse("F").unwrap()), Some("♭3"));
        assert_eq!(dorian.degrees.label(NoteName::parse("C").unwrap()), Some("♭7"));
        assert_eq!(dorian.degrees.label(NoteName::parse("F#").unwrap()), None);

        let lydian = resolve_mode(root("C"), &MODE_TEMPLATES[3]);
        assert_eq!(lydian.degrees.label(NoteName::parse("F#").unwrap()), Some("#4"));
    }

    #[test]
    fn test_degree_map_serializes_as_object() {
        let lydian = resolve_mode(root("C"), &MODE_TEMPLATES[3]);
        assert_eq!(
            serde_json::to_string(&lydian.degrees).unwrap(),
            r##"{"C":"1","D":"2","E":"3","F#":"#4","G":"5","A":"6","B":"7"}"##
        );

        let dorian = resolve_mode(root("D"), &MODE_TEMPLATES[DORIAN]);
        let json = serde_json::to_value(&dorian).unwrap();
        assert_eq!(json["degrees"]["F"], "♭3");
        assert_eq!(json["degrees"]["C"], "♭7");
        assert_eq!(json["chordDegrees"], "1 ♭3 5 ♭7");
    }

    #[test]
    fn test_resolve_c_ionian() {
        let mode = resolve_mode(root("C"), &MODE_TEMPLATES[IONIAN]);
        assert_eq!(names(&mode.notes), ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(mode.chord, "CM7");
        assert_eq!(names(&mode.chord_tones), ["C", "E", "G", "B"]);
        assert_eq!(mode.chord_degrees, "1 3 5 7");
        assert_eq!(mode.semitones, [0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn test_resolve_d_dorian() {
        let mode = resolve_mode(root("D"), &MODE_TEMPLATES[DORIAN]);
        assert_eq!(mode.chord, "Dm7");
        assert_eq!(names(&mode.chord_tones), ["D", "F", "A", "C"]);
    }

    #[test]
    fn test_resolve_b_flat_mixolydian() {
        let mode = resolve_mode(root("B♭"), &MODE_TEMPLATES[MIXOLYDIAN]);
        assert_eq!(mode.notes[0].to_string(), "B♭");
        assert_eq!(mode.degrees.label(mode.notes[6]), Some("♭7"));
        assert_eq!(mode.chord, "B♭7");
    }

    #[test]
    fn test_resolve_locrian_chord() {
        let mode = resolve_mode(root("B"), &MODE_TEMPLATES[LOCRIAN]);
        assert_eq!(mode.chord, "Bm7♭5");
        assert_eq!(names(&mode.chord_tones), ["B", "D", "F", "A"]);
        assert_eq!(mode.chord_degrees, "1 ♭3 ♭5 ♭7");
    }
}

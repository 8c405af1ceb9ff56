//! Diatonic mode suggestion and key analysis
//!
//! A chord is diatonic to a key when its root lands on a degree of the key's
//! major scale and the mode built on that degree produces the chord's quality.
//! Minor keys are analyzed through their relative major.

use super::types::SongKey;
use crate::theory::{
    ChordQuality, Root, AEOLIAN, DORIAN, IONIAN, IONIAN_INTERVALS, LOCRIAN, LYDIAN, MIXOLYDIAN,
    MODE_TEMPLATES, PHRYGIAN,
};

/// Roman numeral for each semitone above the key root
const ROMAN_NUMERALS: [&str; 12] = [
    "I", "♭II", "II", "♭III", "III", "IV", "♯IV", "V", "♭VI", "VI", "♭VII", "VII",
];

/// Mark appended to half-diminished numerals
const HALF_DIMINISHED_MARK: char = 'ø';

/// Mode indices whose seventh chord has the given quality, in template order
pub fn compatible_modes(quality: ChordQuality) -> &'static [usize] {
    match quality {
        ChordQuality::MajorSeventh => &[IONIAN, LYDIAN],
        ChordQuality::MinorSeventh => &[DORIAN, PHRYGIAN, AEOLIAN],
        ChordQuality::DominantSeventh => &[MIXOLYDIAN],
        ChordQuality::HalfDiminished => &[LOCRIAN],
        ChordQuality::Unsupported => &[],
    }
}

/// Major-scale degree (0-6) of `root` in `key`, if it has one
fn scale_degree(root: Root, key: &SongKey) -> Option<usize> {
    let interval = (root.pitch_class() + 12 - key.relative_major()) % 12;
    IONIAN_INTERVALS.iter().position(|&s| s == interval)
}

/// The mode diatonic to `key` for this chord, when the chord belongs to the key
fn diatonic_mode(root: Root, quality: ChordQuality, key: &SongKey) -> Option<usize> {
    let degree = scale_degree(root, key)?;
    (MODE_TEMPLATES[degree].quality == quality).then_some(degree)
}

/// Pick the mode for a chord.
///
/// With a song key, the mode built on the chord's degree of the key wins when
/// it produces the chord's quality (Dm7 in C is Dorian, not Phrygian or
/// Aeolian). Otherwise the first compatible mode is used.
///
/// # Examples
/// ```
/// use fretmodes::progression::{suggest_mode, SongKey};
/// use fretmodes::{ChordQuality, Root, AEOLIAN, DORIAN};
///
/// let d = Root::from_name("D").unwrap();
/// let c_major = SongKey::major(Root::from_name("C").unwrap());
/// assert_eq!(suggest_mode(d, ChordQuality::MinorSeventh, Some(&c_major)), DORIAN);
///
/// let f_major = SongKey::major(Root::from_name("F").unwrap());
/// assert_eq!(suggest_mode(d, ChordQuality::MinorSeventh, Some(&f_major)), AEOLIAN);
/// ```
pub fn suggest_mode(root: Root, quality: ChordQuality, song_key: Option<&SongKey>) -> usize {
    let fallback = compatible_modes(quality).first().copied().unwrap_or(IONIAN);
    song_key
        .and_then(|key| diatonic_mode(root, quality, key))
        .unwrap_or(fallback)
}

/// Whether the chord's root and quality both belong to the key.
///
/// Without a song key there is nothing to contradict, so every supported chord
/// counts as diatonic. A quality no mode produces never does.
pub fn is_diatonic(root: Root, quality: ChordQuality, song_key: Option<&SongKey>) -> bool {
    match song_key {
        Some(key) => diatonic_mode(root, quality, key).is_some(),
        None => !compatible_modes(quality).is_empty(),
    }
}

/// Roman-numeral function of a chord relative to the key root.
///
/// Minor-third qualities are lowercased and half-diminished chords carry `ø`.
/// Returns `None` without a song key.
///
/// # Examples
/// ```
/// use fretmodes::progression::{chord_roman_numeral, SongKey};
/// use fretmodes::{ChordQuality, Root};
///
/// let key = SongKey::major(Root::from_name("C").unwrap());
/// let b = Root::from_name("B").unwrap();
/// assert_eq!(
///     chord_roman_numeral(b, ChordQuality::HalfDiminished, Some(&key)).as_deref(),
///     Some("viiø")
/// );
/// ```
pub fn chord_roman_numeral(
    root: Root,
    quality: ChordQuality,
    song_key: Option<&SongKey>,
) -> Option<String> {
    let key = song_key?;
    let interval = (root.pitch_class() + 12 - key.root.pitch_class()) % 12;
    let numeral = ROMAN_NUMERALS[interval as usize];
    let mut label = if quality.is_minor() {
        numeral.to_lowercase()
    } else {
        numeral.to_string()
    };
    if quality == ChordQuality::HalfDiminished {
        label.push(HALF_DIMINISHED_MARK);
    }
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(name: &str) -> Root {
        Root::from_name(name).unwrap()
    }

    fn key(name: &str) -> SongKey {
        SongKey::major(root(name))
    }

    #[test]
    fn test_compatible_modes_match_templates() {
        for quality in ChordQuality::SUPPORTED {
            let modes = compatible_modes(quality);
            assert!(!modes.is_empty());
            for &idx in modes {
                assert_eq!(MODE_TEMPLATES[idx].quality, quality);
            }
        }
        assert!(compatible_modes(ChordQuality::Unsupported).is_empty());
    }

    #[test]
    fn test_suggest_mode_in_c() {
        let c = key("C");
        assert_eq!(suggest_mode(root("D"), ChordQuality::MinorSeventh, Some(&c)), DORIAN);
        assert_eq!(suggest_mode(root("E"), ChordQuality::MinorSeventh, Some(&c)), PHRYGIAN);
        assert_eq!(suggest_mode(root("F"), ChordQuality::MajorSeventh, Some(&c)), LYDIAN);
        assert_eq!(suggest_mode(root("G"), ChordQuality::DominantSeventh, Some(&c)), MIXOLYDIAN);
        assert_eq!(suggest_mode(root("A"), ChordQuality::MinorSeventh, Some(&c)), AEOLIAN);
        assert_eq!(suggest_mode(root("B"), ChordQuality::HalfDiminished, Some(&c)), LOCRIAN);
    }

    #[test]
    fn test_suggest_mode_fallbacks() {
        let c = key("C");
        // Non-diatonic root
        assert_eq!(suggest_mode(root("B♭"), ChordQuality::DominantSeventh, Some(&c)), MIXOLYDIAN);
        // Diatonic root, wrong quality
        assert_eq!(suggest_mode(root("F"), ChordQuality::MinorSeventh, Some(&c)), DORIAN);
        // No key
        assert_eq!(suggest_mode(root("E"), ChordQuality::MinorSeventh, None), DORIAN);
        assert_eq!(suggest_mode(root("F"), ChordQuality::MajorSeventh, None), IONIAN);
        assert_eq!(suggest_mode(root("C"), ChordQuality::Unsupported, None), IONIAN);
    }

    #[test]
    fn test_suggest_mode_minor_key() {
        let a_minor = SongKey::minor(root("A"));
        assert_eq!(suggest_mode(root("A"), ChordQuality::MinorSeventh, Some(&a_minor)), AEOLIAN);
        assert_eq!(suggest_mode(root("B"), ChordQuality::HalfDiminished, Some(&a_minor)), LOCRIAN);
        assert_eq!(suggest_mode(root("E"), ChordQuality::MinorSeventh, Some(&a_minor)), PHRYGIAN);
    }

    #[test]
    fn test_is_diatonic() {
        let c = key("C");
        assert!(is_diatonic(root("D"), ChordQuality::MinorSeventh, Some(&c)));
        assert!(is_diatonic(root("G"), ChordQuality::DominantSeventh, Some(&c)));
        assert!(!is_diatonic(root("B♭"), ChordQuality::DominantSeventh, Some(&c)));
        assert!(!is_diatonic(root("D"), ChordQuality::DominantSeventh, Some(&c)));
        assert!(is_diatonic(root("B♭"), ChordQuality::DominantSeventh, None));
    }

    #[test]
    fn test_unsupported_quality_is_never_diatonic() {
        assert!(!is_diatonic(root("B"), ChordQuality::Unsupported, None));
        assert!(!is_diatonic(root("B"), ChordQuality::Unsupported, Some(&key("C"))));
    }

    #[test]
    fn test_roman_numerals() {
        let c = key("C");
        let numeral = |r: &str, q| chord_roman_numeral(root(r), q, Some(&c));
        assert_eq!(numeral("C", ChordQuality::MajorSeventh).as_deref(), Some("I"));
        assert_eq!(numeral("D", ChordQuality::MinorSeventh).as_deref(), Some("ii"));
        assert_eq!(numeral("G", ChordQuality::DominantSeventh).as_deref(), Some("V"));
        assert_eq!(numeral("B♭", ChordQuality::DominantSeventh).as_deref(), Some("♭VII"));
        assert_eq!(numeral("E♭", ChordQuality::MinorSeventh).as_deref(), Some("♭iii"));
        assert_eq!(numeral("G♭", ChordQuality::HalfDiminished).as_deref(), Some("♯ivø"));
        assert_eq!(
            chord_roman_numeral(root("D"), ChordQuality::MinorSeventh, None),
            None
        );
    }

    #[test]
    fn test_roman_numerals_minor_key_count_from_tonic() {
        let a_minor = SongKey::minor(root("A"));
        assert_eq!(
            chord_roman_numeral(root("D"), ChordQuality::MinorSeventh, Some(&a_minor)).as_deref(),
            Some("iv")
        );
    }
}

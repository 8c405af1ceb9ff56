//! Chord symbol parsing
//!
//! Recognizes the four seventh-chord qualities that a diatonic mode can
//! produce. Anything else (triads, diminished, added tones) is reported as
//! `None` so the caller can reject the symbol without treating it as a failure.

use crate::theory::{ChordQuality, Letter, Root};

/// Root and quality of a recognized chord symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedChord {
    pub root: Root,
    pub quality: ChordQuality,
}

/// Quality suffixes, most specific first. The whole remainder after the root
/// must match one of them.
const QUALITY_PATTERNS: [(&str, ChordQuality); 6] = [
    ("maj7", ChordQuality::MajorSeventh),
    ("M7", ChordQuality::MajorSeventh),
    ("m7♭5", ChordQuality::HalfDiminished),
    ("m7b5", ChordQuality::HalfDiminished),
    ("m7", ChordQuality::MinorSeventh),
    ("7", ChordQuality::DominantSeventh),
];

/// Parse a chord symbol into a canonical root and a quality.
///
/// The root is a letter plus an optional `♭`, `♯`, `#` or ASCII `b`; sharp
/// roots come back as their flat equivalents.
///
/// # Examples
/// ```
/// use fretmodes::progression::parse_chord_symbol;
/// use fretmodes::ChordQuality;
///
/// let chord = parse_chord_symbol("F#m7b5").unwrap();
/// assert_eq!(chord.root.to_string(), "G♭");
/// assert_eq!(chord.quality, ChordQuality::HalfDiminished);
///
/// assert!(parse_chord_symbol("Bdim").is_none());
/// assert!(parse_chord_symbol("C").is_none());
/// ```
pub fn parse_chord_symbol(symbol: &str) -> Option<ParsedChord> {
    let trimmed = symbol.trim();
    let mut chars = trimmed.char_indices();

    let (_, first) = chars.next()?;
    Letter::from_char(first)?;
    let mut root_end = first.len_utf8();
    if let Some((idx, c)) = chars.next() {
        if matches!(c, '♭' | '♯' | '#' | 'b') {
            root_end = idx + c.len_utf8();
        }
    }

    let root = Root::from_name(&trimmed[..root_end]).ok()?;
    let suffix = &trimmed[root_end..];

    QUALITY_PATTERNS
        .iter()
        .find(|(pattern, _)| *pattern == suffix)
        .map(|&(_, quality)| ParsedChord { root, quality })
}

/// Rewrite the legacy `maj7` suffix to the current `M7` spelling.
pub fn normalize_chord_symbol(symbol: &str) -> String {
    match symbol.strip_suffix("maj7") {
        Some(head) => format!("{}M7", head),
        None => symbol.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(root: &str, quality: ChordQuality) -> Option<ParsedChord> {
        Some(ParsedChord {
            root: Root::from_name(root).unwrap(),
            quality,
        })
    }

    #[test]
    fn test_chord_parsing() {
        assert_eq!(parse_chord_symbol("Dm7"), parsed("D", ChordQuality::MinorSeventh));
        assert_eq!(parse_chord_symbol("G7"), parsed("G", ChordQuality::DominantSeventh));
        assert_eq!(parse_chord_symbol("Cmaj7"), parsed("C", ChordQuality::MajorSeventh));
        assert_eq!(parse_chord_symbol("CM7"), parsed("C", ChordQuality::MajorSeventh));
        assert_eq!(parse_chord_symbol("E♭m7"), parsed("E♭", ChordQuality::MinorSeventh));
        assert_eq!(parse_chord_symbol("Bm7♭5"), parsed("B", ChordQuality::HalfDiminished));
    }

    #[test]
    fn test_chord_parsing_accidentals() {
        assert_eq!(parse_chord_symbol("B♭maj7"), parsed("B♭", ChordQuality::MajorSeventh));
        assert_eq!(parse_chord_symbol("Bbmaj7"), parsed("B♭", ChordQuality::MajorSeventh));
        assert_eq!(parse_chord_symbol("F#m7b5"), parsed("G♭", ChordQuality::HalfDiminished));
        assert_eq!(parse_chord_symbol("C♯7"), parsed("D♭", ChordQuality::DominantSeventh));
    }

    #[test]
    fn test_chord_parsing_rejects_unsupported() {
        assert_eq!(parse_chord_symbol("Bdim"), None);
        assert_eq!(parse_chord_symbol(""), None);
        assert_eq!(parse_chord_symbol("   "), None);
        assert_eq!(parse_chord_symbol("C"), None);
        assert_eq!(parse_chord_symbol("Cadd9"), None);
        assert_eq!(parse_chord_symbol("Hm7"), None);
        assert_eq!(parse_chord_symbol("E#m7"), None);
        assert_eq!(parse_chord_symbol("m7"), None);
    }

    #[test]
    fn test_chord_parsing_trims_whitespace() {
        assert_eq!(parse_chord_symbol("  Am7  "), parsed("A", ChordQuality::MinorSeventh));
    }

    #[test]
    fn test_normalize_chord_symbol() {
        assert_eq!(normalize_chord_symbol("Cmaj7"), "CM7");
        assert_eq!(normalize_chord_symbol("B♭maj7"), "B♭M7");
        assert_eq!(normalize_chord_symbol("Dm7"), "Dm7");
        assert_eq!(normalize_chord_symbol("FM7"), "FM7");
    }
}

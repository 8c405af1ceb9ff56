//! Chord symbol display preferences
//!
//! Each quality can be written several ways (`CM7`, `Cmaj7`, `C△7`). The
//! preferences only affect display; parsing and storage use quality keys.

use crate::error::FretError;
use crate::theory::{ChordQuality, Root};
use serde::{Deserialize, Serialize};

const MAJOR_SEVENTH_OPTIONS: &[&str] = &["M7", "maj7", "△7"];
const MINOR_SEVENTH_OPTIONS: &[&str] = &["m7", "mi7", "-7"];
const DOMINANT_SEVENTH_OPTIONS: &[&str] = &["7"];
const HALF_DIMINISHED_OPTIONS: &[&str] = &["m7♭5", "ø7"];

/// Preferred suffix per chord quality, keyed by quality in stored form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordNotation {
    #[serde(rename = "maj7")]
    pub major_seventh: String,
    #[serde(rename = "m7")]
    pub minor_seventh: String,
    #[serde(rename = "7")]
    pub dominant_seventh: String,
    #[serde(rename = "m7♭5")]
    pub half_diminished: String,
}

impl Default for ChordNotation {
    fn default() -> Self {
        Self {
            major_seventh: "M7".to_string(),
            minor_seventh: "m7".to_string(),
            dominant_seventh: "7".to_string(),
            half_diminished: "m7♭5".to_string(),
        }
    }
}

impl ChordNotation {
    /// Every accepted spelling for a quality, default first
    pub fn options(quality: ChordQuality) -> &'static [&'static str] {
        match quality {
            ChordQuality::MajorSeventh => MAJOR_SEVENTH_OPTIONS,
            ChordQuality::MinorSeventh => MINOR_SEVENTH_OPTIONS,
            ChordQuality::DominantSeventh => DOMINANT_SEVENTH_OPTIONS,
            ChordQuality::HalfDiminished => HALF_DIMINISHED_OPTIONS,
            ChordQuality::Unsupported => &[],
        }
    }

    /// Display suffix for a quality
    pub fn suffix(&self, quality: ChordQuality) -> &str {
        match quality {
            ChordQuality::MajorSeventh => &self.major_seventh,
            ChordQuality::MinorSeventh => &self.minor_seventh,
            ChordQuality::DominantSeventh => &self.dominant_seventh,
            ChordQuality::HalfDiminished => &self.half_diminished,
            ChordQuality::Unsupported => quality.suffix(),
        }
    }

    /// Choose a spelling for a quality; it must be one of [`Self::options`].
    pub fn set(&mut self, quality: ChordQuality, variant: &str) -> Result<(), FretError> {
        if !Self::options(quality).contains(&variant) {
            return Err(FretError::Config(format!(
                "{} is not a notation for {}",
                variant, quality
            )));
        }
        let slot = match quality {
            ChordQuality::MajorSeventh => &mut self.major_seventh,
            ChordQuality::MinorSeventh => &mut self.minor_seventh,
            ChordQuality::DominantSeventh => &mut self.dominant_seventh,
            ChordQuality::HalfDiminished => &mut self.half_diminished,
            ChordQuality::Unsupported => unreachable!("no notation options for unsupported chords"),
        };
        *slot = variant.to_string();
        Ok(())
    }

    /// Replace any value that is not an accepted spelling with the default.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let keep = |value: String, quality: ChordQuality, default: String| {
            if Self::options(quality).contains(&value.as_str()) {
                value
            } else {
                default
            }
        };
        Self {
            major_seventh: keep(self.major_seventh, ChordQuality::MajorSeventh, defaults.major_seventh),
            minor_seventh: keep(self.minor_seventh, ChordQuality::MinorSeventh, defaults.minor_seventh),
            dominant_seventh: defaults.dominant_seventh,
            half_diminished: keep(
                self.half_diminished,
                ChordQuality::HalfDiminished,
                defaults.half_diminished,
            ),
        }
    }
}

/// Root plus the preferred quality suffix, e.g. `"B♭maj7"`.
pub fn format_chord_symbol(root: Root, quality: ChordQuality, prefs: &ChordNotation) -> String {
    format!("{}{}", root, prefs.suffix(quality))
}

/// Just the preferred quality suffix
pub fn format_quality(quality: ChordQuality, prefs: &ChordNotation) -> &str {
    prefs.suffix(quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_notation() {
        let prefs = ChordNotation::default();
        let c = Root::from_name("C").unwrap();
        assert_eq!(format_chord_symbol(c, ChordQuality::MajorSeventh, &prefs), "CM7");
        assert_eq!(format_quality(ChordQuality::HalfDiminished, &prefs), "m7♭5");
    }

    #[test]
    fn test_custom_notation() {
        let mut prefs = ChordNotation::default();
        prefs.set(ChordQuality::MajorSeventh, "△7").unwrap();
        prefs.set(ChordQuality::HalfDiminished, "ø7").unwrap();
        let b_flat = Root::from_name("Bb").unwrap();
        assert_eq!(format_chord_symbol(b_flat, ChordQuality::MajorSeventh, &prefs), "B♭△7");
        assert_eq!(format_quality(ChordQuality::HalfDiminished, &prefs), "ø7");
    }

    #[test]
    fn test_set_rejects_unknown_variant() {
        let mut prefs = ChordNotation::default();
        assert!(prefs.set(ChordQuality::MinorSeventh, "min7").is_err());
        assert!(prefs.set(ChordQuality::DominantSeventh, "dom7").is_err());
        assert_eq!(prefs, ChordNotation::default());
    }

    #[test]
    fn test_sanitized_replaces_invalid_values() {
        let prefs: ChordNotation =
            serde_json::from_str(r#"{"maj7":"maj7","m7":"bogus","7":"x"}"#).unwrap();
        let prefs = prefs.sanitized();
        assert_eq!(prefs.major_seventh, "maj7");
        assert_eq!(prefs.minor_seventh, "m7");
        assert_eq!(prefs.dominant_seventh, "7");
        assert_eq!(prefs.half_diminished, "m7♭5");
    }
}

//! # Persisted State
//!
//! Progressions and notation preferences are stored as whole JSON documents in
//! a key-value store. Every save replaces the full document.
//!
//! ## Stores
//! - [`MemoryStore`] - in-process map, used by tests and embedders
//! - [`FileStore`] - one `<key>.json` file per key in a directory
//!
//! ## Loading
//! Loading never fails. Missing data yields the built-in presets; unreadable or
//! malformed data is logged and also replaced by the presets.
//!
//! ## Legacy Format
//! Older documents stored the song key as a bare root name (`"songKey": "C"`)
//! and wrote major-seventh symbols with a `maj7` suffix. Both are normalized as
//! soon as the document is decoded; the upgraded form is written back only on
//! the next save.

use crate::error::FretError;
use crate::notation::ChordNotation;
use crate::progression::{
    build_chord_slot, normalize_chord_symbol, parse_chord_symbol, ChordSlot, Progression, SongKey,
};
use crate::theory::Root;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const PROGRESSIONS_KEY: &str = "jazz-guitar-progressions";
pub const NOTATION_KEY: &str = "jazz-guitar-chord-notation";

/// Whole-document string storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, FretError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FretError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FretError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FretError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store, one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, FretError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FretError::Storage(format!(
                "reading {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FretError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            FretError::Storage(format!("creating {}: {}", self.dir.display(), e))
        })?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|e| FretError::Storage(format!("writing {}: {}", path.display(), e)))
    }
}

/// Song key as found in stored documents, current or legacy shape
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSongKey {
    Current(SongKey),
    Legacy(Root),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProgression {
    name: String,
    #[serde(default)]
    song_key: Option<StoredSongKey>,
    #[serde(default)]
    chords: Vec<ChordSlot>,
}

/// Upgrade a decoded document to the current format.
fn migrate(stored: Vec<StoredProgression>) -> Vec<Progression> {
    stored
        .into_iter()
        .map(|p| {
            let song_key = p.song_key.map(|key| match key {
                StoredSongKey::Current(key) => key,
                StoredSongKey::Legacy(root) => {
                    warn!(progression = %p.name, "migrating legacy song key {}", root);
                    SongKey::major(root)
                }
            });
            let chords = p
                .chords
                .into_iter()
                .map(|mut slot| {
                    slot.symbol = normalize_chord_symbol(&slot.symbol);
                    slot
                })
                .collect();
            Progression {
                name: p.name,
                song_key,
                chords,
            }
        })
        .collect()
}

/// Decode a stored progression document, applying legacy migrations.
pub fn decode_progressions(raw: &str) -> Result<Vec<Progression>, FretError> {
    let stored: Vec<StoredProgression> = serde_json::from_str(raw)?;
    Ok(migrate(stored))
}

pub fn save_progressions<S: KeyValueStore + ?Sized>(
    store: &mut S,
    progressions: &[Progression],
) -> Result<(), FretError> {
    let raw = serde_json::to_string(progressions)?;
    store.set(PROGRESSIONS_KEY, &raw)?;
    info!(count = progressions.len(), "saved progressions");
    Ok(())
}

/// Load stored progressions, falling back to [`preset_progressions`].
pub fn load_progressions<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Progression> {
    let raw = match store.get(PROGRESSIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return preset_progressions(),
        Err(e) => {
            warn!("could not read progressions, using presets: {}", e);
            return preset_progressions();
        }
    };
    match decode_progressions(&raw) {
        Ok(progressions) => progressions,
        Err(e) => {
            warn!("stored progressions are malformed, using presets: {}", e);
            preset_progressions()
        }
    }
}

pub fn save_notation<S: KeyValueStore + ?Sized>(
    store: &mut S,
    prefs: &ChordNotation,
) -> Result<(), FretError> {
    let raw = serde_json::to_string(prefs)?;
    store.set(NOTATION_KEY, &raw)
}

/// Load notation preferences; unknown spellings fall back to the defaults.
pub fn load_notation<S: KeyValueStore + ?Sized>(store: &S) -> ChordNotation {
    let raw = match store.get(NOTATION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ChordNotation::default(),
        Err(e) => {
            warn!("could not read chord notation, using defaults: {}", e);
            return ChordNotation::default();
        }
    };
    match serde_json::from_str::<ChordNotation>(&raw) {
        Ok(prefs) => prefs.sanitized(),
        Err(e) => {
            warn!("stored chord notation is malformed, using defaults: {}", e);
            ChordNotation::default()
        }
    }
}

fn preset(name: &str, key: &str, symbols: &[&str]) -> Progression {
    let song_key = Root::from_name(key).ok().map(SongKey::major);
    let chords = symbols
        .iter()
        .filter_map(|symbol| {
            parse_chord_symbol(symbol)
                .map(|parsed| build_chord_slot(symbol, parsed, None, song_key.as_ref()))
        })
        .collect();
    Progression {
        name: name.to_string(),
        song_key,
        chords,
    }
}

/// Built-in II-V-I progressions in C, F and B♭
pub fn preset_progressions() -> Vec<Progression> {
    vec![
        preset("II-V-I in C", "C", &["Dm7", "G7", "CM7"]),
        preset("II-V-I in F", "F", &["Gm7", "C7", "FM7"]),
        preset("II-V-I in B♭", "B♭", &["Cm7", "F7", "B♭M7"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ChordQuality, DORIAN, IONIAN, MIXOLYDIAN};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_presets_are_diatonic_ii_v_i() {
        let presets = preset_progressions();
        assert_eq!(presets.len(), 3);
        for p in &presets {
            assert!(p.song_key.is_some());
            let modes: Vec<usize> = p.chords.iter().map(|c| c.mode_index).collect();
            assert_eq!(modes, vec![DORIAN, MIXOLYDIAN, IONIAN], "{}", p.name);
            assert!(p.chords.iter().all(|c| c.position_id == 1 && !c.pos_confirmed));
        }
    }

    #[test]
    fn test_load_with_nothing_saved_returns_presets() {
        let store = MemoryStore::new();
        assert_eq!(load_progressions(&store), preset_progressions());
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let mut progressions = preset_progressions();
        progressions[0].chords[1].pos_confirmed = true;
        progressions[0].chords[1].position_id = 4;
        progressions[1].song_key = None;
        save_progressions(&mut store, &progressions).unwrap();
        assert_eq!(load_progressions(&store), progressions);
    }

    #[test]
    fn test_malformed_data_falls_back_to_presets() {
        let mut store = MemoryStore::new();
        store.set(PROGRESSIONS_KEY, "{not json").unwrap();
        assert_eq!(load_progressions(&store), preset_progressions());
    }

    #[test]
    fn test_legacy_format_is_normalized() {
        let raw = r#"[
            {
                "name": "Old",
                "songKey": "B♭",
                "chords": [
                    {"symbol": "Cm7", "rootName": "C", "quality": "m7", "modeIdx": 1, "posId": 2, "posConfirmed": true},
                    {"symbol": "Bbmaj7", "rootName": "B♭", "quality": "maj7", "modeIdx": 0, "posId": 1, "posConfirmed": false}
                ]
            },
            {"name": "Keyless", "chords": []}
        ]"#;
        let mut store = MemoryStore::new();
        store.set(PROGRESSIONS_KEY, raw).unwrap();

        let loaded = load_progressions(&store);
        assert_eq!(loaded.len(), 2);
        let old = &loaded[0];
        assert_eq!(old.song_key, Some(SongKey::major(Root::from_name("B♭").unwrap())));
        assert_eq!(old.chords[0].symbol, "Cm7");
        assert!(old.chords[0].pos_confirmed);
        assert!(!old.chords[0].mode_confirmed);
        assert_eq!(old.chords[1].symbol, "BbM7");
        assert_eq!(old.chords[1].quality, ChordQuality::MajorSeventh);
        assert_eq!(loaded[1].song_key, None);

        // Migration is not written back until the next save
        assert_eq!(store.get(PROGRESSIONS_KEY).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_current_song_key_shape() {
        let raw = r#"[{"name": "Minor", "songKey": {"root": "A", "minor": true}, "chords": []}]"#;
        let loaded = decode_progressions(raw).unwrap();
        assert_eq!(loaded[0].song_key, Some(SongKey::minor(Root::from_name("A").unwrap())));
    }

    #[test]
    fn test_unknown_quality_is_kept_as_unsupported() {
        let raw = r#"[{"name": "Odd", "chords": [
            {"symbol": "Bdim", "rootName": "B", "quality": "dim", "modeIdx": 0, "posId": 3}
        ]}]"#;
        let loaded = decode_progressions(raw).unwrap();
        assert_eq!(loaded[0].chords[0].quality, ChordQuality::Unsupported);
        assert_eq!(loaded[0].chords[0].unsupported_quality.as_deref(), Some("dim"));
        assert_eq!(loaded[0].chords[0].position_id, 3);

        // The original quality text survives a save
        let mut store = MemoryStore::new();
        save_progressions(&mut store, &loaded).unwrap();
        let saved = store.get(PROGRESSIONS_KEY).unwrap().unwrap();
        assert!(saved.contains(r#""quality":"dim""#), "{}", saved);
        assert!(!saved.contains("unsupported"), "{}", saved);
        assert_eq!(load_progressions(&store), loaded);
    }

    #[test]
    fn test_stored_slot_field_names() {
        let progressions = preset_progressions();
        let saved = serde_json::to_string(&progressions[0].chords[0]).unwrap();
        assert_eq!(
            saved,
            r#"{"symbol":"Dm7","rootName":"D","quality":"m7","modeIdx":1,"posId":1,"posConfirmed":false,"modeConfirmed":false}"#
        );
    }

    #[test]
    fn test_notation_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_notation(&store), ChordNotation::default());

        let mut prefs = ChordNotation::default();
        prefs.set(ChordQuality::MinorSeventh, "-7").unwrap();
        save_notation(&mut store, &prefs).unwrap();
        assert_eq!(load_notation(&store), prefs);

        store.set(NOTATION_KEY, r#"{"maj7": "Δ"}"#).unwrap();
        assert_eq!(load_notation(&store), ChordNotation::default());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get(PROGRESSIONS_KEY).unwrap(), None);

        let progressions = vec![Progression::new("Empty")];
        save_progressions(&mut store, &progressions).unwrap();
        assert!(dir.path().join("nested").join("jazz-guitar-progressions.json").exists());
        assert_eq!(load_progressions(&store), progressions);
    }
}

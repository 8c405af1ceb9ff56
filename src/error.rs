//! # Error Types
//!
//! This module defines the error type for the fallible edges of the crate:
//! name lookups, progression editing, persisted state and configuration.
//!
//! The theory engine itself (spelling, fretboard mapping, position generation,
//! proximity ranking) is total and never returns an error. Chord symbol parsing
//! reports an unsupported symbol as `None` rather than an error; only callers
//! that must refuse the input (such as [`Progression::add_chord`]) turn that into
//! [`FretError::UnsupportedChord`].
//!
//! ## Usage
//! ```rust
//! use fretmodes::{FretError, Root};
//!
//! match Root::from_name("H") {
//!     Ok(root) => println!("root {}", root),
//!     Err(FretError::UnknownRoot(name)) => eprintln!("no such root: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`Progression::add_chord`]: crate::progression::Progression::add_chord

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretError {
    /// A root name that is not a letter A-G with at most one accidental.
    ///
    /// # Example
    /// ```
    /// # use fretmodes::FretError;
    /// let err = FretError::UnknownRoot("H#".to_string());
    /// assert_eq!(err.to_string(), "Unknown root: H#");
    /// ```
    #[error("Unknown root: {0}")]
    UnknownRoot(String),

    /// A mode name or index outside the seven diatonic modes.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// A chord symbol whose quality is not one of M7, m7, 7 or m7♭5.
    ///
    /// # Example
    /// ```
    /// # use fretmodes::FretError;
    /// let err = FretError::UnsupportedChord("Bdim".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Unsupported chord: Bdim (only M7, m7, 7 and m7♭5 are supported)"
    /// );
    /// ```
    #[error("Unsupported chord: {0} (only M7, m7, 7 and m7♭5 are supported)")]
    UnsupportedChord(String),

    /// Reading or writing the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration file.
    #[error("Invalid config: {0}")]
    Config(String),

    /// An edit addressed a chord or progression index that does not exist.
    #[error("Index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },
}

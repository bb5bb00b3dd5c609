// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types shared by the library.

use std::path::PathBuf;

/// Library result alias
pub type Result<T> = std::result::Result<T, ScalesError>;

/// Everything that can go wrong while resolving keys, editing the
/// catalog, talking to the store or playing a scale.
#[derive(Debug, thiserror::Error)]
pub enum ScalesError {
    /// Key text matches neither a canonical pitch nor a flat alias
    #[error("Could not understand key: {0}")]
    KeyNotRecognized(String),

    /// No catalog entry matches the name (case-insensitive)
    #[error("Scale name: \"{0}\" does not exist.")]
    ScaleNotFound(String),

    /// A catalog entry already matches the name (case-insensitive)
    #[error("Scale name: \"{0}\" already exists.")]
    ScaleAlreadyExists(String),

    /// Interval text is not a `-` separated list of non-negative integers
    #[error("Invalid scale values: \"{0}\"")]
    InvalidIntervalSyntax(String),

    /// Random pick or similar requested on an empty catalog
    #[error("The scale catalog is empty")]
    EmptyCatalog,

    /// The store has never been written
    #[error("Could not find scale data at: {0:?}")]
    StoreMissing(PathBuf),

    /// The store exists but cannot be parsed
    #[error("Broken scale data file {path:?}")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the store failed
    #[error("Failed to access scale data file {path:?}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tone playback could not be started
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl ScalesError {
    /// Errors after which no safe default exists
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScalesError::StoreCorrupt { .. })
    }
}

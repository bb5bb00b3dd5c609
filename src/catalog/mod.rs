// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The scale catalog.
//!
//! Named interval sequences kept in insertion order. Names are stored
//! exactly as given but looked up and kept unique case-insensitively.

pub mod store;

pub use store::{CatalogSession, CatalogStore, JsonFileStore};

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ScalesError};
use crate::music::{IntervalSequence, Pitch, Scale};

/// Built-in presets beyond Major and Minor, as steps between degrees
const EXTENDED_PRESETS: [(&str, &[u32]); 12] = [
    ("Harmonic Minor", &[2, 1, 2, 2, 1, 3, 1]),
    ("Melodic Minor", &[2, 1, 2, 2, 2, 2, 1]),
    ("Dorian", &[2, 1, 2, 2, 2, 1, 2]),
    ("Phrygian", &[1, 2, 2, 2, 1, 2, 2]),
    ("Lydian", &[2, 2, 2, 1, 2, 2, 1]),
    ("Mixolydian", &[2, 2, 1, 2, 2, 1, 2]),
    ("Locrian", &[1, 2, 2, 1, 2, 2, 2]),
    ("Major Pentatonic", &[2, 2, 3, 2, 3]),
    ("Minor Pentatonic", &[3, 2, 2, 3, 2]),
    ("Blues", &[3, 2, 1, 1, 3, 2]),
    ("Whole Tone", &[2, 2, 2, 2, 2, 2]),
    ("Chromatic", &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
];

/// A named scale shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Name as the user spelled it
    pub name: String,
    /// Steps from the root
    pub intervals: IntervalSequence,
}

impl CatalogEntry {
    /// Realize this entry on a root
    pub fn realize(&self, root: Pitch) -> Scale {
        Scale::new(root, self.intervals.clone())
    }
}

/// Ordered collection of named scales
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleCatalog {
    entries: Vec<CatalogEntry>,
}

impl ScaleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The two scales every fresh catalog starts with
    pub fn factory_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.push("Major", vec![2, 2, 1, 2, 2, 2, 1]);
        catalog.push("Minor", vec![2, 1, 2, 2, 1, 2, 2]);
        catalog
    }

    /// Factory defaults plus the modes, pentatonics and symmetric scales
    pub fn extended_defaults() -> Self {
        let mut catalog = Self::factory_defaults();
        for (name, steps) in EXTENDED_PRESETS {
            catalog.push(name, steps.to_vec());
        }
        catalog
    }

    fn push(&mut self, name: &str, steps: Vec<u32>) {
        self.entries.push(CatalogEntry {
            name: name.to_string(),
            intervals: IntervalSequence::new(steps),
        });
    }

    /// Number of scales
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no scales
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Stored names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.to_uppercase();
        self.entries
            .iter()
            .position(|e| e.name.to_uppercase() == wanted)
    }

    /// Case-insensitive lookup
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Case-insensitive lookup, reporting a miss as [`ScalesError::ScaleNotFound`]
    pub fn get(&self, name: &str) -> Result<&CatalogEntry> {
        self.find(name)
            .ok_or_else(|| ScalesError::ScaleNotFound(name.to_string()))
    }

    /// Append a new scale. Fails if the name is taken under case folding.
    pub fn add(&mut self, name: &str, intervals: IntervalSequence) -> Result<&CatalogEntry> {
        if self.position(name).is_some() {
            return Err(ScalesError::ScaleAlreadyExists(name.to_string()));
        }
        self.entries.push(CatalogEntry {
            name: name.to_string(),
            intervals,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Replace the steps of an existing scale, keeping its stored name
    pub fn edit(&mut self, name: &str, intervals: IntervalSequence) -> Result<&CatalogEntry> {
        let index = self
            .position(name)
            .ok_or_else(|| ScalesError::ScaleNotFound(name.to_string()))?;
        self.entries[index].intervals = intervals;
        Ok(&self.entries[index])
    }

    /// Remove a scale and hand it back
    pub fn remove(&mut self, name: &str) -> Result<CatalogEntry> {
        let index = self
            .position(name)
            .ok_or_else(|| ScalesError::ScaleNotFound(name.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// Pick an entry uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&CatalogEntry> {
        self.entries.choose(rng).ok_or(ScalesError::EmptyCatalog)
    }
}

// Stored as a flat JSON object keyed by name, in catalog order.
impl Serialize for ScaleCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.intervals)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScaleCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = ScaleCatalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of scale names to lists of semitone steps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<ScaleCatalog, A::Error> {
        let mut catalog = ScaleCatalog::new();
        while let Some((name, intervals)) = access.next_entry::<String, IntervalSequence>()? {
            if catalog.add(&name, intervals).is_err() {
                return Err(serde::de::Error::custom(format!(
                    "duplicate scale name: \"{}\"",
                    name
                )));
            }
        }
        Ok(catalog)
    }
}

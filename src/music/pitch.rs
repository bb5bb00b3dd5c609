// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chromatic pitches and key-name resolution.
//!
//! Only sharp spellings are canonical. The five flat spellings are
//! accepted through a fixed alias table and mapped onto their sharp
//! equivalents before anything else sees them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScalesError};

/// Pitch classes in chromatic order, sharp-spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pitch {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

/// Flat spellings (uppercased) and the sharp pitch they stand for
pub const FLAT_ALIASES: [(&str, Pitch); 5] = [
    ("DB", Pitch::Cs),
    ("EB", Pitch::Ds),
    ("GB", Pitch::Fs),
    ("AB", Pitch::Gs),
    ("BB", Pitch::As),
];

impl Pitch {
    /// All pitches in chromatic order
    pub const ALL: [Pitch; 12] = [
        Pitch::C,
        Pitch::Cs,
        Pitch::D,
        Pitch::Ds,
        Pitch::E,
        Pitch::F,
        Pitch::Fs,
        Pitch::G,
        Pitch::Gs,
        Pitch::A,
        Pitch::As,
        Pitch::B,
    ];

    /// Position on the chromatic circle (0-11)
    pub fn pitch_class(self) -> usize {
        self as usize
    }

    /// Pitch at a chromatic position, wrapping modulo 12
    pub fn from_pitch_class(pc: usize) -> Self {
        Pitch::ALL[pc % 12]
    }

    /// Canonical name ("C", "C#", ...)
    pub fn name(self) -> &'static str {
        match self {
            Pitch::C => "C",
            Pitch::Cs => "C#",
            Pitch::D => "D",
            Pitch::Ds => "D#",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::Fs => "F#",
            Pitch::G => "G",
            Pitch::Gs => "G#",
            Pitch::A => "A",
            Pitch::As => "A#",
            Pitch::B => "B",
        }
    }

    /// Resolve user key text to a pitch.
    ///
    /// The text is uppercased and then matched against the canonical
    /// names, then against [`FLAT_ALIASES`]. Nothing else is normalized:
    /// surrounding whitespace or unicode accidentals make the lookup fail.
    pub fn resolve(input: &str) -> Option<Self> {
        let key = input.to_uppercase();
        Pitch::ALL
            .iter()
            .copied()
            .find(|p| p.name() == key)
            .or_else(|| {
                FLAT_ALIASES
                    .iter()
                    .find(|(flat, _)| *flat == key)
                    .map(|&(_, pitch)| pitch)
            })
    }
}

/// Resolve key text, reporting unknown keys as [`ScalesError::KeyNotRecognized`]
pub fn resolve_key(input: &str) -> Result<Pitch> {
    Pitch::resolve(input).ok_or_else(|| ScalesError::KeyNotRecognized(input.to_string()))
}

impl FromStr for Pitch {
    type Err = ScalesError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_key(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval sequences and scale generation.
//!
//! A scale is stored as the semitone steps between consecutive notes
//! and realized by walking those steps around the chromatic circle
//! from a root pitch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Pitch;
use crate::error::{Result, ScalesError};

/// Separator between steps in interval text ("2-2-1-2-2-2-1")
pub const INTERVAL_SEPARATOR: char = '-';

/// Ordered semitone steps walked from the root.
///
/// The sum is unconstrained: it may fall short of or overshoot the
/// octave, and zero steps are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSequence(Vec<u32>);

impl IntervalSequence {
    /// Wrap a list of steps
    pub fn new(steps: Vec<u32>) -> Self {
        Self(steps)
    }

    /// Parse `-` separated non-negative integers.
    ///
    /// Empty segments ("2--1", "", "2-") and anything that is not an
    /// ASCII digit fail with [`ScalesError::InvalidIntervalSyntax`].
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || ScalesError::InvalidIntervalSyntax(text.to_string());
        text.split(INTERVAL_SEPARATOR)
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                segment.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// The steps in walking order
    pub fn steps(&self) -> &[u32] {
        &self.0
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no steps
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for IntervalSequence {
    type Err = ScalesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<u32>> for IntervalSequence {
    fn from(steps: Vec<u32>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for IntervalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", INTERVAL_SEPARATOR)?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Walk `intervals` from `root` and collect every pitch visited.
///
/// The running index keeps the raw sum of steps and is reduced modulo
/// 12 only to look up each pitch. The result always starts with `root`
/// and holds one more pitch than there are steps.
pub fn transpose(root: Pitch, intervals: &[u32]) -> Vec<Pitch> {
    let mut index = root.pitch_class() as u64;
    let mut notes = Vec::with_capacity(intervals.len() + 1);
    notes.push(root);
    for &step in intervals {
        index += u64::from(step);
        notes.push(Pitch::from_pitch_class((index % 12) as usize));
    }
    notes
}

/// A scale realized on a concrete root
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Pitch,
    intervals: IntervalSequence,
    notes: Vec<Pitch>,
}

impl Scale {
    /// Generate the notes of `intervals` starting on `root`
    pub fn new(root: Pitch, intervals: IntervalSequence) -> Self {
        let notes = transpose(root, intervals.steps());
        Self {
            root,
            intervals,
            notes,
        }
    }

    /// Get the root note
    pub fn root(&self) -> Pitch {
        self.root
    }

    /// Get the steps this scale was generated from
    pub fn intervals(&self) -> &IntervalSequence {
        &self.intervals
    }

    /// Get the generated notes, root first
    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    /// Number of generated notes (steps + 1)
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Never true: a scale always contains its root
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a pitch appears anywhere in the scale
    pub fn contains(&self, pitch: Pitch) -> bool {
        self.notes.contains(&pitch)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.notes.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Pitch::*;

    const MAJOR: [u32; 7] = [2, 2, 1, 2, 2, 2, 1];
    const MINOR: [u32; 7] = [2, 1, 2, 2, 1, 2, 2];

    #[test]
    fn test_parse_intervals() {
        let seq = IntervalSequence::parse("2-2-1-2-2-2-1").unwrap();
        assert_eq!(seq.steps(), &MAJOR);
        assert_eq!(IntervalSequence::parse("0").unwrap().steps(), &[0]);
        assert_eq!(IntervalSequence::parse("14-007").unwrap().steps(), &[14, 7]);
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        for text in ["2--1", "2-x-1", "", "-2", "2-", "2 -1", "+2", "-", "2.5", "99999999999"] {
            let err = IntervalSequence::parse(text).unwrap_err();
            assert!(
                matches!(err, ScalesError::InvalidIntervalSyntax(ref t) if t == text),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_display_intervals() {
        assert_eq!(IntervalSequence::new(MINOR.to_vec()).to_string(), "2-1-2-2-1-2-2");
        assert_eq!(IntervalSequence::default().to_string(), "");
    }

    #[test]
    fn test_transpose_major() {
        assert_eq!(transpose(C, &MAJOR), vec![C, D, E, F, G, A, B, C]);
    }

    #[test]
    fn test_transpose_minor() {
        assert_eq!(transpose(A, &MINOR), vec![A, B, C, D, E, F, G, A]);
    }

    #[test]
    fn test_transpose_empty_is_root_only() {
        for root in Pitch::ALL {
            assert_eq!(transpose(root, &[]), vec![root]);
        }
    }

    #[test]
    fn test_transpose_wraps_large_and_zero_steps() {
        assert_eq!(transpose(B, &[0, 13, 24]), vec![B, B, C, C]);
        assert_eq!(transpose(Fs, &[u32::MAX]), vec![Fs, A]);
    }

    #[test]
    fn test_transpose_closes_on_octave_multiples() {
        let shapes: [&[u32]; 4] = [&MAJOR, &[12], &[5, 7, 5, 7], &[3, 3, 3, 3, 4, 4, 4]];
        for root in Pitch::ALL {
            for steps in shapes {
                let notes = transpose(root, steps);
                assert_eq!(notes.len(), steps.len() + 1);
                assert_eq!(*notes.last().unwrap(), root);
            }
        }
    }

    #[test]
    fn test_scale_display_and_contains() {
        let scale = Scale::new(D, IntervalSequence::new(MAJOR.to_vec()));
        assert_eq!(scale.to_string(), "D-E-F#-G-A-B-C#-D");
        assert_eq!(scale.len(), 8);
        assert!(scale.contains(Fs));
        assert!(!scale.contains(F));
        assert_eq!(scale.root(), D);
    }
}

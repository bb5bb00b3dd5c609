// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale similarity scoring.
//!
//! Every catalog entry is regenerated on the query root and compared
//! against a set of target pitches. The score is the number of distinct
//! targets the generated scale contains.

use std::collections::BTreeSet;

use super::{resolve_key, Pitch, Scale};
use crate::catalog::ScaleCatalog;
use crate::error::Result;

/// How well one catalog entry covers the target pitches
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleMatch {
    /// Stored catalog name
    pub name: String,
    /// The entry realized on the query root
    pub scale: Scale,
    /// Targets found in the scale, in chromatic order
    pub matched: Vec<Pitch>,
}

impl ScaleMatch {
    /// Number of distinct targets present
    pub fn count(&self) -> usize {
        self.matched.len()
    }
}

/// Score every catalog entry against `targets`, in catalog order.
pub fn score(root: Pitch, targets: &BTreeSet<Pitch>, catalog: &ScaleCatalog) -> Vec<ScaleMatch> {
    catalog
        .iter()
        .map(|entry| {
            let scale = Scale::new(root, entry.intervals.clone());
            let matched = targets.iter().copied().filter(|&p| scale.contains(p)).collect();
            ScaleMatch {
                name: entry.name.clone(),
                scale,
                matched,
            }
        })
        .collect()
}

/// Score and order by match count, highest first.
///
/// The sort is stable, so equal counts keep catalog insertion order.
pub fn rank(root: Pitch, targets: &BTreeSet<Pitch>, catalog: &ScaleCatalog) -> Vec<ScaleMatch> {
    let mut matches = score(root, targets, catalog);
    matches.sort_by(|a, b| b.count().cmp(&a.count()));
    matches
}

/// Parse `-` separated key names ("E-G", "Eb-g-Bb") into a target set
pub fn parse_targets(text: &str) -> Result<BTreeSet<Pitch>> {
    text.split('-').map(resolve_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScalesError;
    use crate::music::IntervalSequence;
    use Pitch::*;

    fn major_minor() -> ScaleCatalog {
        let mut catalog = ScaleCatalog::new();
        catalog
            .add("Major", IntervalSequence::new(vec![2, 2, 1, 2, 2, 2, 1]))
            .unwrap();
        catalog
            .add("Minor", IntervalSequence::new(vec![2, 1, 2, 2, 1, 2, 2]))
            .unwrap();
        catalog
    }

    #[test]
    fn test_score_major_minor() {
        let targets = BTreeSet::from([E, G]);
        let scores = score(C, &targets, &major_minor());

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].name, "Major");
        assert_eq!(scores[0].count(), 2);
        assert_eq!(scores[1].name, "Minor");
        assert_eq!(scores[1].count(), 1);
        assert_eq!(scores[1].matched, vec![G]);
    }

    #[test]
    fn test_duplicate_notes_count_once() {
        let mut catalog = ScaleCatalog::new();
        // C-C-C-C-C-C
        catalog.add("Octaves", IntervalSequence::new(vec![12; 5])).unwrap();
        let targets = BTreeSet::from([C, D]);

        let scores = score(C, &targets, &catalog);
        assert_eq!(scores[0].count(), 1);
    }

    #[test]
    fn test_rank_orders_by_count_then_catalog_order() {
        let mut catalog = ScaleCatalog::new();
        catalog.add("Fifths", IntervalSequence::new(vec![7])).unwrap();
        catalog.add("Minor", IntervalSequence::new(vec![2, 1, 2, 2, 1, 2, 2])).unwrap();
        catalog.add("Fourth", IntervalSequence::new(vec![5])).unwrap();
        catalog.add("Major", IntervalSequence::new(vec![2, 2, 1, 2, 2, 2, 1])).unwrap();

        let targets = BTreeSet::from([E, G]);
        let ranked = rank(C, &targets, &catalog);
        let names: Vec<&str> = ranked.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["Major", "Fifths", "Minor", "Fourth"]);
        assert_eq!(ranked[3].count(), 0);
    }

    #[test]
    fn test_score_empty_inputs() {
        assert!(score(C, &BTreeSet::from([C]), &ScaleCatalog::new()).is_empty());

        let scores = score(C, &BTreeSet::new(), &major_minor());
        assert!(scores.iter().all(|m| m.count() == 0));
    }

    #[test]
    fn test_score_depends_on_root() {
        let targets = BTreeSet::from([Fs, Cs]);
        let on_c = score(C, &targets, &major_minor());
        let on_d = score(D, &targets, &major_minor());
        assert_eq!(on_c[0].count(), 0);
        assert_eq!(on_d[0].count(), 2);
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!(parse_targets("E-G").unwrap(), BTreeSet::from([E, G]));
        assert_eq!(parse_targets("eb-D#-bb").unwrap(), BTreeSet::from([Ds, As]));
        assert!(matches!(
            parse_targets("E-H"),
            Err(ScalesError::KeyNotRecognized(ref k)) if k == "H"
        ));
        assert!(parse_targets("E--G").is_err());
    }
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Key resolution, scale transposition and scale similarity scoring.
//! Everything here is pure: no I/O, no shared state.

pub mod pitch;
pub mod scale;
pub mod similarity;

pub use pitch::{resolve_key, Pitch, FLAT_ALIASES};
pub use scale::{transpose, IntervalSequence, Scale};
pub use similarity::{parse_targets, rank, score, ScaleMatch};

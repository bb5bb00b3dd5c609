// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Manage a small catalog of named musical scales and realize them on
//! any of the twelve chromatic keys.
//!
//! - [`music`]: key resolution, transposition and similarity ranking
//! - [`catalog`]: the named scale collection and its JSON store
//! - [`playback`]: tone players for generated scales
//! - [`config`]: settings
//! - [`cli`]: the command-line front end

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod music;
pub mod playback;

pub use catalog::{CatalogSession, CatalogStore, JsonFileStore, ScaleCatalog};
pub use error::{Result, ScalesError};
pub use music::{resolve_key, transpose, IntervalSequence, Pitch, Scale};

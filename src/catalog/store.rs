// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Catalog persistence.
//!
//! The store always reads and writes the whole catalog. A
//! [`CatalogSession`] owns one loaded catalog for the length of an
//! invocation and writes it back after every successful change.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{CatalogEntry, ScaleCatalog};
use crate::error::{Result, ScalesError};
use crate::music::IntervalSequence;

/// Somewhere a catalog can be loaded from and saved to
pub trait CatalogStore {
    /// Load the full catalog.
    ///
    /// Must report a store that was never written as
    /// [`ScalesError::StoreMissing`] and unparseable data as
    /// [`ScalesError::StoreCorrupt`].
    fn load(&self) -> Result<ScaleCatalog>;

    /// Overwrite the stored catalog
    fn save(&self, catalog: &ScaleCatalog) -> Result<()>;
}

/// Catalog stored as a pretty-printed JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ScalesError {
        ScalesError::StoreIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Result<ScaleCatalog> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScalesError::StoreMissing(self.path.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let catalog: ScaleCatalog =
            serde_json::from_str(&contents).map_err(|source| ScalesError::StoreCorrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = ?self.path, scales = catalog.len(), "loaded scale catalog");
        Ok(catalog)
    }

    fn save(&self, catalog: &ScaleCatalog) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        catalog
            .serialize(&mut ser)
            .map_err(|e| self.io_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        buf.write_all(b"\n").map_err(|e| self.io_error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, buf).map_err(|e| self.io_error(e))?;
        debug!(path = ?self.path, scales = catalog.len(), "saved scale catalog");
        Ok(())
    }
}

/// One load / mutate / save cycle over a store
pub struct CatalogSession<S: CatalogStore> {
    store: S,
    catalog: ScaleCatalog,
    defaults: ScaleCatalog,
}

impl<S: CatalogStore> CatalogSession<S> {
    /// Load the catalog from `store`.
    ///
    /// A missing store is seeded with `defaults` and loaded again. A
    /// corrupt store is an error: replacing it would discard user data.
    pub fn open(store: S, defaults: ScaleCatalog) -> Result<Self> {
        let catalog = match store.load() {
            Ok(catalog) => catalog,
            Err(ScalesError::StoreMissing(path)) => {
                warn!(?path, "scale data not found, restoring factory settings");
                store.save(&defaults)?;
                store.load()?
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store,
            catalog,
            defaults,
        })
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &ScaleCatalog {
        &self.catalog
    }

    /// Parse `values`, add a new scale and persist
    pub fn add(&mut self, name: &str, values: &str) -> Result<IntervalSequence> {
        let intervals = IntervalSequence::parse(values)?;
        let mut staged = self.catalog.clone();
        staged.add(name, intervals.clone())?;
        self.commit(staged)?;
        info!(scale = name, %intervals, "added scale");
        Ok(intervals)
    }

    /// Parse `values`, replace an existing scale's steps and persist
    pub fn edit(&mut self, name: &str, values: &str) -> Result<IntervalSequence> {
        let intervals = IntervalSequence::parse(values)?;
        let mut staged = self.catalog.clone();
        staged.edit(name, intervals.clone())?;
        self.commit(staged)?;
        info!(scale = name, %intervals, "edited scale");
        Ok(intervals)
    }

    /// Remove a scale and persist
    pub fn remove(&mut self, name: &str) -> Result<CatalogEntry> {
        let mut staged = self.catalog.clone();
        let removed = staged.remove(name)?;
        self.commit(staged)?;
        info!(scale = %removed.name, "removed scale");
        Ok(removed)
    }

    /// Replace the whole catalog with the defaults and persist
    pub fn restore_defaults(&mut self) -> Result<()> {
        self.commit(self.defaults.clone())?;
        info!(scales = self.catalog.len(), "restored factory settings");
        Ok(())
    }

    // The in-memory catalog only changes once the store has accepted it.
    fn commit(&mut self, staged: ScaleCatalog) -> Result<()> {
        self.store.save(&staged)?;
        self.catalog = staged;
        Ok(())
    }
}

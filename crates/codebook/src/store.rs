//! In-memory record store.
//!
//! Holds the record collection and the two reference tables loaded from the
//! seed file. Records are kept in load order, with new records appended at
//! the end. Nothing is written back to disk.
//!
//! Records sit behind a single reader/writer lock so concurrent requests can
//! read in parallel while writes are serialized. The reference tables never
//! change after load and are not locked.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::filter::RecordFilter;
use crate::model::{Data, DataDetail, ModelReference, Seed, TechReference};
use crate::translate::Translator;

/// Record store.
#[derive(Debug, Default)]
pub struct Store {
    records: RwLock<Vec<Data>>,
    models: Vec<ModelReference>,
    techs: Vec<TechReference>,
}

/// Counts reported by [`Store::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of records.
    pub records: usize,
    /// Number of model reference entries.
    pub model_references: usize,
    /// Number of tech reference entries.
    pub tech_references: usize,
}

impl Store {
    /// Load a store from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedRead`] if the file cannot be read and
    /// [`Error::SeedParse`] if it is not a valid seed document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading seed data from {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| Error::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: Seed = serde_json::from_slice(&bytes).map_err(|source| Error::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_seed(seed);
        let stats = store.stats();
        info!(
            records = stats.records,
            model_references = stats.model_references,
            tech_references = stats.tech_references,
            "Loaded seed data from {}",
            path.display()
        );
        Ok(store)
    }

    /// Build a store from an already parsed seed document.
    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            records: RwLock::new(seed.data),
            models: seed.model_references,
            techs: seed.tech_references,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Data>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Data>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records, in store order.
    #[must_use]
    pub fn all(&self) -> Vec<Data> {
        self.read().clone()
    }

    /// The first record with the given code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Data> {
        self.read().iter().find(|d| d.code == code).cloned()
    }

    /// Append a record. Codes are not checked for uniqueness.
    pub fn create(&self, data: Data) -> Data {
        let mut records = self.write();
        records.push(data.clone());
        debug!(code = %data.code, total = records.len(), "Record created");
        data
    }

    /// Replace the first record with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has the code.
    pub fn update(&self, code: &str, data: Data) -> Result<Data> {
        self.update_with(code, move |_| Ok(data))
    }

    /// Replace the first record with the given code using a fallible
    /// producer, run only once the record is known to exist.
    ///
    /// The record is left untouched if the producer fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has the code, or the
    /// producer's error.
    pub fn update_with<F>(&self, code: &str, produce: F) -> Result<Data>
    where
        F: FnOnce(&Data) -> Result<Data>,
    {
        let mut records = self.write();
        let slot = records
            .iter_mut()
            .find(|d| d.code == code)
            .ok_or_else(|| Error::not_found(code))?;
        *slot = produce(slot)?;
        debug!(code, new_code = %slot.code, "Record updated");
        Ok(slot.clone())
    }

    /// Remove the first record with the given code, keeping the order of the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has the code.
    pub fn delete(&self, code: &str) -> Result<Data> {
        let mut records = self.write();
        let index = records
            .iter()
            .position(|d| d.code == code)
            .ok_or_else(|| Error::not_found(code))?;
        let removed = records.remove(index);
        debug!(code, total = records.len(), "Record deleted");
        Ok(removed)
    }

    /// Records matching the filter, in store order.
    #[must_use]
    pub fn filter(&self, filter: &RecordFilter) -> Vec<Data> {
        let records = self.read();
        let matched = filter.apply(records.iter()).cloned().collect();
        matched
    }

    /// Enriched view of the first record with the given code.
    #[must_use]
    pub fn detail(&self, code: &str) -> Option<DataDetail> {
        let records = self.read();
        records
            .iter()
            .find(|d| d.code == code)
            .map(|d| self.translator().detail(d))
    }

    /// Translator over this store's reference tables.
    #[must_use]
    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.models, &self.techs)
    }

    /// Model reference table, in load order.
    #[must_use]
    pub fn models(&self) -> &[ModelReference] {
        &self.models
    }

    /// Tech reference table, in load order.
    #[must_use]
    pub fn techs(&self) -> &[TechReference] {
        &self.techs
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Collection sizes.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            records: self.len(),
            model_references: self.models.len(),
            tech_references: self.techs.len(),
        }
    }
}

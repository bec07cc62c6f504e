//! Per-version cache of fetched definitions.
//!
//! Each version has one entry with its own loading flag and error, so a
//! failure for one version never touches the other. Entries are populated at
//! most once and never invalidated.

use chrono::{DateTime, Utc};
use cvss_builder_schema::{Definition, Version};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    definitions: Option<Arc<Vec<Definition>>>,
    loading: bool,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn definitions(&self) -> Option<&Arc<Vec<Definition>>> {
        self.definitions.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.definitions.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefinitionCache {
    v3_1: CacheEntry,
    v4_0: CacheEntry,
}

impl DefinitionCache {
    pub fn entry(&self, version: Version) -> &CacheEntry {
        match version {
            Version::V3_1 => &self.v3_1,
            Version::V4_0 => &self.v4_0,
        }
    }

    fn entry_mut(&mut self, version: Version) -> &mut CacheEntry {
        match version {
            Version::V3_1 => &mut self.v3_1,
            Version::V4_0 => &mut self.v4_0,
        }
    }

    pub fn is_loading_any(&self) -> bool {
        Version::ALL.iter().any(|v| self.entry(*v).loading)
    }

    /// Mark `version` as loading and clear its previous error.
    ///
    /// Returns `false` (and changes nothing) when the version is already
    /// loaded or a fetch is in flight.
    pub(crate) fn begin_fetch(&mut self, version: Version) -> bool {
        let entry = self.entry_mut(version);
        if entry.is_loaded() || entry.loading {
            return false;
        }
        entry.loading = true;
        entry.error = None;
        true
    }

    pub(crate) fn store(&mut self, version: Version, definitions: Vec<Definition>) {
        let entry = self.entry_mut(version);
        entry.definitions = Some(Arc::new(definitions));
        entry.error = None;
        entry.loaded_at = Some(Utc::now());
    }

    pub(crate) fn fail(&mut self, version: Version, message: String) {
        let entry = self.entry_mut(version);
        entry.definitions = None;
        entry.error = Some(message);
    }

    pub(crate) fn release(&mut self, version: Version) {
        self.entry_mut(version).loading = false;
    }
}

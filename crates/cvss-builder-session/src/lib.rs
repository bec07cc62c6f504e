//! CVSS Vector Session
//!
//! One [`CvssSession`] per user session holds the active version, the current
//! metric selections and a per-version cache of fetched definitions:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          CvssSession                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  set_version ──► SelectionState ◄── set_metric_value             │
//! │       │              │              set_selected_metrics         │
//! │       │              │              reset_current_metrics        │
//! │       │              ▼                                           │
//! │       │         cvss_string()   (derived on demand)              │
//! │       ▼                                                          │
//! │  fetch_definitions ──► DefinitionSource (async)                  │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  DefinitionCache ──► grouped_definitions()                       │
//! │  (per version)       structured_metric_groups()                  │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - **Key-set invariant**: selections always cover exactly the active
//!   version's metric order.
//! - **Single flight**: at most one definitions fetch per version is in
//!   flight; concurrent requests for the same version are no-ops.
//! - **Guaranteed release**: the loading flag is cleared on every exit path
//!   of a fetch, including cancellation.

pub mod cache;
pub mod selection;
pub mod source;


pub use cache::{CacheEntry, DefinitionCache};
pub use selection::{SelectionError, SelectionState};
pub use source::{DefinitionSeed, DefinitionSource, SeedDefinitionSource, SourceError};

use chrono::{DateTime, Utc};
use cvss_builder_schema::{
    grouped_definitions, structured_metric_groups, Definition, DescriptionType, GroupNode,
    MetricSchema, SelectedMetrics, Version,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Shown when a failed fetch carries no message of its own.
pub const FETCH_ERROR_FALLBACK: &str = "Failed to load definitions.";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Version active when the session starts
    pub initial_version: Version,
    /// Which description text views should prefer
    pub description_type: DescriptionType,
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug)]
struct SessionState {
    selection: SelectionState,
    description_type: DescriptionType,
    /// Most recently touched metric, for the interpretation panel.
    interpreted_metric: Option<String>,
    cache: DefinitionCache,
}

pub struct CvssSession<S> {
    id: Uuid,
    source: S,
    state: RwLock<SessionState>,
}

impl<S: DefinitionSource> CvssSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    pub fn with_config(source: S, config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            state: RwLock::new(SessionState {
                selection: SelectionState::new(config.initial_version),
                description_type: config.description_type,
                interpreted_metric: None,
                cache: DefinitionCache::default(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ========================================================================
    // Version switching
    // ========================================================================

    pub fn selected_version(&self) -> Version {
        self.state.read().selection.version()
    }

    /// Make `version` active with fresh defaults.
    ///
    /// A cache miss fetches the version's definitions (which reconciles the
    /// selection on success); a cache hit reconciles immediately.
    pub async fn set_version(&self, version: Version) {
        let needs_fetch = {
            let mut state = self.state.write();
            if state.selection.version() == version {
                return;
            }
            state.selection.switch_to(version);
            state.interpreted_metric = None;
            tracing::debug!(session = %self.id, %version, "switched CVSS version");

            if state.cache.entry(version).is_loaded() {
                state.selection.reconcile();
                false
            } else {
                true
            }
        };

        if needs_fetch {
            self.fetch_definitions(version).await;
        }
    }

    // ========================================================================
    // Selections
    // ========================================================================

    pub fn selected_metrics(&self) -> SelectedMetrics {
        self.state.read().selection.metrics().clone()
    }

    pub fn selection_revision(&self) -> u64 {
        self.state.read().selection.revision()
    }

    pub fn interpreted_metric(&self) -> Option<String> {
        self.state.read().interpreted_metric.clone()
    }

    /// Set one metric of the active version. Keys outside the active metric
    /// order are rejected with a warning and leave the state untouched.
    ///
    /// Returns whether the selection changed.
    pub fn set_metric_value(&self, key: &str, value: &str) -> bool {
        let mut state = self.state.write();
        match state.selection.set_metric_value(key, value) {
            Ok(changed) => {
                state.interpreted_metric = Some(key.to_string());
                if changed {
                    tracing::debug!(
                        session = %self.id,
                        metric = key,
                        value,
                        vector = %state.selection.compose(),
                        "metric updated"
                    );
                }
                changed
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "ignoring metric update");
                false
            }
        }
    }

    pub fn set_selected_metrics(&self, partial: &SelectedMetrics) -> bool {
        let mut state = self.state.write();
        let changed = state.selection.set_selected_metrics(partial);
        if changed {
            tracing::debug!(
                session = %self.id,
                supplied = partial.len(),
                vector = %state.selection.compose(),
                "metrics updated from bulk set"
            );
        }
        changed
    }

    pub fn reset_current_metrics(&self) {
        self.state.write().selection.reset();
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    pub fn cvss_string(&self) -> String {
        self.state.read().selection.compose()
    }

    pub fn default_vector(&self) -> String {
        MetricSchema::for_version(self.selected_version()).compose_default()
    }

    pub fn description_type(&self) -> DescriptionType {
        self.state.read().description_type
    }

    pub fn set_description_type(&self, ty: DescriptionType) {
        self.state.write().description_type = ty;
    }

    pub fn current_definitions(&self) -> Option<Arc<Vec<Definition>>> {
        self.definitions(self.selected_version())
    }

    /// Definitions of the active version grouped by metric, each group in
    /// canonical value order. Empty while definitions are unavailable.
    pub fn grouped_definitions(&self) -> BTreeMap<String, Vec<Definition>> {
        let (version, definitions) = {
            let state = self.state.read();
            let version = state.selection.version();
            (version, state.cache.entry(version).definitions().cloned())
        };
        match definitions {
            Some(defs) => grouped_definitions(&defs, version),
            None => BTreeMap::new(),
        }
    }

    pub fn structured_metric_groups(&self) -> Vec<GroupNode> {
        let schema = MetricSchema::for_version(self.selected_version());
        structured_metric_groups(schema.groups, schema.version)
    }

    // ========================================================================
    // Definition cache
    // ========================================================================

    pub fn definitions(&self, version: Version) -> Option<Arc<Vec<Definition>>> {
        self.state.read().cache.entry(version).definitions().cloned()
    }

    pub fn error_loading_definitions(&self, version: Version) -> Option<String> {
        self.state
            .read()
            .cache
            .entry(version)
            .error()
            .map(str::to_string)
    }

    pub fn is_loading_definitions(&self, version: Version) -> bool {
        self.state.read().cache.entry(version).is_loading()
    }

    pub fn is_loading_any(&self) -> bool {
        self.state.read().cache.is_loading_any()
    }

    pub fn definitions_loaded_at(&self, version: Version) -> Option<DateTime<Utc>> {
        self.state.read().cache.entry(version).loaded_at()
    }

    /// Fetch `version`'s definitions unless they are loaded or already being
    /// fetched.
    ///
    /// On success the definitions are cached and the selection reconciled. On
    /// failure the entry keeps no definitions and records the error message.
    pub async fn fetch_definitions(&self, version: Version) {
        let started = self.state.write().cache.begin_fetch(version);
        if !started {
            tracing::debug!(
                session = %self.id,
                %version,
                "definitions already loaded or in flight"
            );
            return;
        }
        let _loading = LoadingGuard {
            state: &self.state,
            version,
        };

        tracing::info!(session = %self.id, %version, "fetching CVSS definitions");
        let result = self.source.definitions_by_version(version).await;

        let mut state = self.state.write();
        match result {
            Ok(definitions) => {
                tracing::info!(
                    session = %self.id,
                    %version,
                    count = definitions.len(),
                    "fetched CVSS definitions"
                );
                state.cache.store(version, definitions);
                state.selection.reconcile();
            }
            Err(err) => {
                tracing::error!(
                    session = %self.id,
                    %version,
                    error = %err,
                    "failed to fetch CVSS definitions"
                );
                state.cache.fail(version, fetch_error_message(&err));
            }
        }
        drop(state);
    }
}

/// Clears a version's loading flag when dropped.
struct LoadingGuard<'a> {
    state: &'a RwLock<SessionState>,
    version: Version,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.write().cache.release(self.version);
    }
}

fn fetch_error_message(err: &SourceError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FETCH_ERROR_FALLBACK.to_string()
    } else {
        message
    }
}

//! Selection state for the active CVSS version.
//!
//! Invariant: after every mutation the selected key set equals the active
//! version's metric order, with no keys left over from another version.

use cvss_builder_schema::{MetricSchema, SelectedMetrics, Version};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("metric `{key}` is not part of CVSS {version}")]
    UnknownMetric { version: Version, key: String },
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    version: Version,
    metrics: SelectedMetrics,
    /// Advances once per observable change of `metrics`.
    revision: u64,
}

impl SelectionState {
    /// Defaults of `version`.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            metrics: MetricSchema::for_version(version).default_metrics(),
            revision: 0,
        }
    }

    /// Adopt externally supplied selections, reconciled against `version`.
    #[cfg(test)]
    fn from_metrics(version: Version, metrics: SelectedMetrics) -> Self {
        let mut state = Self {
            version,
            metrics,
            revision: 0,
        };
        state.reconcile();
        state
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn metrics(&self) -> &SelectedMetrics {
        &self.metrics
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.metrics.get(key).map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn schema(&self) -> &'static MetricSchema {
        MetricSchema::for_version(self.version)
    }

    /// Make `version` active with a fresh copy of its defaults.
    pub fn switch_to(&mut self, version: Version) {
        self.version = version;
        let defaults = self.schema().default_metrics();
        self.replace(defaults);
    }

    /// Keep existing values for keys of the active order, default the missing
    /// ones and drop everything else. Returns whether anything changed.
    pub fn reconcile(&mut self) -> bool {
        let schema = self.schema();
        let reconciled = schema
            .order
            .iter()
            .map(|key| {
                let value = self
                    .metrics
                    .get(*key)
                    .cloned()
                    .unwrap_or_else(|| schema.default_for(key).to_string());
                (key.to_string(), value)
            })
            .collect();
        self.replace(reconciled)
    }

    pub fn set_metric_value(&mut self, key: &str, value: &str) -> Result<bool, SelectionError> {
        if !self.schema().contains(key) {
            return Err(SelectionError::UnknownMetric {
                version: self.version,
                key: key.to_string(),
            });
        }
        if self.get(key) == Some(value) {
            return Ok(false);
        }
        self.metrics.insert(key.to_string(), value.to_string());
        self.revision += 1;
        Ok(true)
    }

    /// Bulk merge: each key of the active order takes the value from
    /// `partial`, else keeps its current value, else its default. Keys outside
    /// the order are ignored. At most one revision is recorded.
    pub fn set_selected_metrics(&mut self, partial: &SelectedMetrics) -> bool {
        let schema = self.schema();
        let merged = schema
            .order
            .iter()
            .map(|key| {
                let value = partial
                    .get(*key)
                    .or_else(|| self.metrics.get(*key))
                    .cloned()
                    .unwrap_or_else(|| schema.default_for(key).to_string());
                (key.to_string(), value)
            })
            .collect();
        self.replace(merged)
    }

    pub fn reset(&mut self) -> bool {
        let defaults = self.schema().default_metrics();
        self.replace(defaults)
    }

    pub fn compose(&self) -> String {
        self.schema().compose(&self.metrics)
    }

    fn replace(&mut self, metrics: SelectedMetrics) -> bool {
        if self.metrics == metrics {
            return false;
        }
        self.metrics = metrics;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn key_set(metrics: &SelectedMetrics) -> BTreeSet<&str> {
        metrics.keys().map(String::as_str).collect()
    }

    fn order_set(version: Version) -> BTreeSet<&'static str> {
        MetricSchema::for_version(version)
            .order
            .iter()
            .copied()
            .collect()
    }

    fn metrics(pairs: &[(&str, &str)]) -> SelectedMetrics {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_state_holds_version_defaults() {
        for version in Version::ALL {
            let state = SelectionState::new(version);
            let schema = MetricSchema::for_version(version);
            assert_eq!(key_set(state.metrics()), order_set(version));
            for key in schema.order {
                assert_eq!(state.get(key), Some(schema.default_for(key)));
            }
            assert_eq!(state.revision(), 0);
        }
    }

    #[test]
    fn reconcile_keeps_known_values_and_drops_stale_keys() {
        let mut state = SelectionState::new(Version::V3_1);
        state.set_metric_value("AV", "P").unwrap();
        state.metrics.insert("AT".into(), "P".into());
        state.metrics.remove("RC");

        assert!(state.reconcile());
        assert_eq!(key_set(state.metrics()), order_set(Version::V3_1));
        assert_eq!(state.get("AV"), Some("P"));
        assert_eq!(state.get("RC"), Some("X"));
        assert_eq!(state.get("AT"), None);

        let revision = state.revision();
        assert!(!state.reconcile());
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn from_metrics_reconciles_foreign_selection() {
        let v4 = SelectionState::new(Version::V4_0);
        let state = SelectionState::from_metrics(Version::V3_1, v4.metrics().clone());
        assert_eq!(key_set(state.metrics()), order_set(Version::V3_1));
        // Shared keys carry over, v3-only keys take their defaults.
        assert_eq!(state.get("AV"), Some("N"));
        assert_eq!(state.get("C"), Some("N"));
        assert_eq!(state.get("RL"), Some("X"));
        assert_eq!(state.get("VC"), None);
    }

    #[test]
    fn set_metric_value_rejects_foreign_keys() {
        let mut state = SelectionState::new(Version::V3_1);
        let before = state.metrics().clone();
        let err = state.set_metric_value("AT", "P").unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownMetric {
                version: Version::V3_1,
                key: "AT".into()
            }
        );
        assert_eq!(state.metrics(), &before);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn set_metric_value_reports_changes_only() {
        let mut state = SelectionState::new(Version::V4_0);
        assert_eq!(state.set_metric_value("AV", "N"), Ok(false));
        assert_eq!(state.revision(), 0);
        assert_eq!(state.set_metric_value("AV", "L"), Ok(true));
        assert_eq!(state.get("AV"), Some("L"));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn bulk_merge_records_a_single_revision() {
        let mut state = SelectionState::new(Version::V4_0);
        state.set_metric_value("VC", "H").unwrap();
        let revision = state.revision();

        let changed = state.set_selected_metrics(&metrics(&[
            ("AV", "L"),
            ("E", "A"),
            ("RL", "O"),
        ]));
        assert!(changed);
        assert_eq!(state.revision(), revision + 1);
        assert_eq!(state.get("AV"), Some("L"));
        assert_eq!(state.get("E"), Some("A"));
        assert_eq!(state.get("VC"), Some("H"));
        assert_eq!(state.get("RL"), None);
        assert_eq!(key_set(state.metrics()), order_set(Version::V4_0));

        assert!(!state.set_selected_metrics(&metrics(&[("AV", "L")])));
        assert_eq!(state.revision(), revision + 1);
    }

    #[test]
    fn bulk_merge_fills_missing_keys_with_defaults() {
        let mut state = SelectionState::new(Version::V4_0);
        state.metrics.remove("AT");
        assert!(state.set_selected_metrics(&SelectedMetrics::new()));
        assert_eq!(state.get("AT"), Some("N"));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = SelectionState::new(Version::V4_0);
        state.set_metric_value("AV", "P").unwrap();
        state.set_metric_value("U", "Red").unwrap();
        assert!(state.reset());
        assert_eq!(
            state.metrics(),
            &MetricSchema::for_version(Version::V4_0).default_metrics()
        );
        assert!(!state.reset());
    }

    #[test]
    fn switch_to_replaces_selection_with_defaults() {
        let mut state = SelectionState::new(Version::V4_0);
        state.set_metric_value("AV", "L").unwrap();
        state.switch_to(Version::V3_1);
        assert_eq!(state.version(), Version::V3_1);
        assert_eq!(key_set(state.metrics()), order_set(Version::V3_1));
        assert_eq!(state.get("AV"), Some("N"));
    }

    #[test]
    fn compose_reflects_selection() {
        let mut state = SelectionState::new(Version::V4_0);
        state.set_metric_value("AT", "P").unwrap();
        state.set_metric_value("MAV", "L").unwrap();
        assert_eq!(
            state.compose(),
            "CVSS:4.0/AV:N/AC:L/AT:P/PR:N/UI:N/VC:N/VI:N/VA:N/SC:N/SI:N/SA:N/MAV:L"
        );
    }
}

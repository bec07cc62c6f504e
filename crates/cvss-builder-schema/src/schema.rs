//! Per-version metric schema.
//!
//! A [`MetricSchema`] bundles everything the composer and the structurer need
//! to know about one CVSS version:
//!
//! - `order`: serialization order of metric keys,
//! - `defaults`: the neutral value of every metric (`X` = "not specified"),
//! - `groups`: flat presentation groups (name -> member keys),
//! - `value_orders`: canonical display order of each metric's values,
//! - `layout`: how the flat groups nest for display.
//!
//! Schemas are static and selected with an exhaustive match on [`Version`],
//! so there is no "version not found" path at runtime.

use crate::compose;
use crate::tables;
use crate::version::Version;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value meaning "not specified" for optional metrics, and the fallback
/// default for any key a schema has no explicit default for.
pub const NOT_SPECIFIED: &str = "X";

/// Current metric selections: metric key -> value key.
pub type SelectedMetrics = BTreeMap<String, String>;

/// A named presentation group and its member metric keys, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricGroup<'a> {
    pub name: &'a str,
    pub metrics: &'a [&'a str],
}

/// One top-level entry of the display hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLayout {
    pub name: &'static str,
    pub body: LayoutBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBody {
    /// The parent shows the metrics of the named flat group directly.
    Metrics(&'static str),
    /// The parent expands into children, each named after a flat group.
    Children(&'static [&'static str]),
}

#[derive(Debug)]
pub struct MetricSchema {
    pub version: Version,
    pub order: &'static [&'static str],
    pub defaults: &'static [(&'static str, &'static str)],
    pub groups: &'static [MetricGroup<'static>],
    pub value_orders: &'static [(&'static str, &'static [&'static str])],
    pub layout: &'static [ParentLayout],
}

impl MetricSchema {
    pub fn for_version(version: Version) -> &'static MetricSchema {
        match version {
            Version::V3_1 => &tables::CVSS_V3_1,
            Version::V4_0 => &tables::CVSS_V4_0,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.contains(&key)
    }

    /// Default value for `key`, or [`NOT_SPECIFIED`] when the schema has none.
    pub fn default_for(&self, key: &str) -> &'static str {
        default_value(self.defaults, key)
    }

    /// A fresh, owned copy of this version's defaults, one entry per key in
    /// `order`.
    pub fn default_metrics(&self) -> SelectedMetrics {
        self.order
            .iter()
            .map(|key| (key.to_string(), self.default_for(key).to_string()))
            .collect()
    }

    /// Keys that are always serialized, in group order.
    pub fn base_metrics(&self) -> Vec<&'static str> {
        compose::base_metric_keys(self.version, self.groups)
    }

    pub fn is_base_metric(&self, key: &str) -> bool {
        self.base_metrics().contains(&key)
    }

    /// Canonical display order of `metric_key`'s values in this version.
    pub fn value_order(&self, metric_key: &str) -> Option<&'static [&'static str]> {
        self.value_orders
            .iter()
            .find(|(key, _)| *key == metric_key)
            .map(|(_, values)| *values)
    }

    pub fn compose(&self, selections: &SelectedMetrics) -> String {
        compose::compose(
            self.version,
            self.order,
            self.groups,
            self.defaults,
            selections,
        )
    }

    pub fn compose_default(&self) -> String {
        compose::compose_default(self.version, self.order, self.groups, self.defaults)
    }
}

pub(crate) fn default_value<'a>(defaults: &[(&'a str, &'a str)], key: &str) -> &'a str {
    defaults
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(NOT_SPECIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_ordered_key_has_an_explicit_default() {
        for version in Version::ALL {
            let schema = MetricSchema::for_version(version);
            assert_eq!(schema.defaults.len(), schema.order.len(), "{version}");
            for key in schema.order {
                assert!(
                    schema.defaults.iter().any(|(k, _)| k == key),
                    "{version}: {key} has no default"
                );
            }
        }
    }

    #[test]
    fn order_keys_are_unique_and_grouped_exactly_once() {
        for version in Version::ALL {
            let schema = MetricSchema::for_version(version);
            let ordered: BTreeSet<&str> = schema.order.iter().copied().collect();
            assert_eq!(ordered.len(), schema.order.len(), "{version}: duplicate key");

            let grouped: Vec<&str> = schema
                .groups
                .iter()
                .flat_map(|g| g.metrics.iter().copied())
                .collect();
            assert_eq!(grouped.len(), ordered.len(), "{version}");
            assert_eq!(grouped.into_iter().collect::<BTreeSet<_>>(), ordered);
        }
    }

    #[test]
    fn defaults_are_listed_in_value_orders() {
        for version in Version::ALL {
            let schema = MetricSchema::for_version(version);
            for key in schema.order {
                let values = schema
                    .value_order(key)
                    .unwrap_or_else(|| panic!("{version}: {key} has no value order"));
                assert!(values.contains(&schema.default_for(key)), "{version}: {key}");
            }
        }
    }

    #[test]
    fn same_key_resolves_per_version() {
        let v3 = MetricSchema::for_version(Version::V3_1);
        let v4 = MetricSchema::for_version(Version::V4_0);
        assert_eq!(v3.value_order("UI"), Some(&["N", "R"][..]));
        assert_eq!(v4.value_order("UI"), Some(&["N", "P", "A"][..]));
        assert_eq!(v3.value_order("S"), Some(&["U", "C"][..]));
        assert_eq!(v4.value_order("S"), Some(&["X", "N", "P"][..]));
        assert_eq!(v4.value_order("RL"), None);
    }

    #[test]
    fn base_metrics_follow_version_groups() {
        let v3 = MetricSchema::for_version(Version::V3_1);
        assert_eq!(
            v3.base_metrics(),
            vec!["AV", "AC", "PR", "UI", "S", "C", "I", "A"]
        );

        let v4 = MetricSchema::for_version(Version::V4_0);
        assert_eq!(
            v4.base_metrics(),
            vec!["AV", "AC", "AT", "PR", "UI", "VC", "VI", "VA", "SC", "SI", "SA"]
        );
        assert!(v4.is_base_metric("SA"));
        assert!(!v4.is_base_metric("E"));
    }

    #[test]
    fn default_metrics_is_an_independent_copy() {
        let schema = MetricSchema::for_version(Version::V4_0);
        let mut metrics = schema.default_metrics();
        metrics.insert("AV".to_string(), "L".to_string());
        assert_eq!(schema.default_for("AV"), "N");
        assert_eq!(schema.default_metrics()["AV"], "N");
    }

    #[test]
    fn unknown_key_defaults_to_not_specified() {
        let schema = MetricSchema::for_version(Version::V3_1);
        assert_eq!(schema.default_for("AT"), NOT_SPECIFIED);
        assert!(!schema.contains("AT"));
    }
}

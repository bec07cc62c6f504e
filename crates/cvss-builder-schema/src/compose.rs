//! Vector string composition.
//!
//! `CVSS:<version>/<key>:<value>/...`: base metrics are always present, every
//! other metric appears only when its value diverges from the schema default.
//! Metrics are emitted in the schema's serialization order.
//!
//! These functions take the schema pieces explicitly (rather than a
//! [`MetricSchema`](crate::MetricSchema)) so that partial or empty tables
//! degrade instead of failing: with no `order`, every selection is emitted in
//! the map's own iteration order.

use crate::schema::{default_value, MetricGroup, SelectedMetrics, NOT_SPECIFIED};
use crate::version::Version;

/// Union of the members of `version`'s base groups, in group order.
///
/// Missing groups contribute nothing.
pub fn base_metric_keys<'a>(version: Version, groups: &[MetricGroup<'a>]) -> Vec<&'a str> {
    version
        .base_group_names()
        .iter()
        .filter_map(|name| groups.iter().find(|g| g.name == *name))
        .flat_map(|g| g.metrics.iter().copied())
        .collect()
}

pub fn compose(
    version: Version,
    order: &[&str],
    groups: &[MetricGroup<'_>],
    defaults: &[(&str, &str)],
    selections: &SelectedMetrics,
) -> String {
    let prefix = vector_prefix(version);

    if order.is_empty() {
        let parts = selections.iter().map(|(key, value)| format!("{key}:{value}"));
        return join_parts(prefix, parts);
    }

    let base = base_metric_keys(version, groups);
    let parts = order.iter().filter_map(|key| {
        let current = selections.get(*key).map(String::as_str);
        let diverges = current.is_some_and(|value| value != default_value(defaults, key));
        (base.contains(key) || diverges)
            .then(|| format!("{key}:{}", current.unwrap_or(NOT_SPECIFIED)))
    });
    join_parts(prefix, parts)
}

/// The vector of a version's base metrics, all at their defaults.
pub fn compose_default(
    version: Version,
    order: &[&str],
    groups: &[MetricGroup<'_>],
    defaults: &[(&str, &str)],
) -> String {
    let base = base_metric_keys(version, groups);
    let part = |key: &str| format!("{key}:{}", default_value(defaults, key));

    let prefix = vector_prefix(version);
    if order.is_empty() {
        join_parts(prefix, base.iter().map(|key| part(*key)))
    } else {
        let parts = order
            .iter()
            .filter(|key| base.contains(*key))
            .map(|key| part(*key));
        join_parts(prefix, parts)
    }
}

fn vector_prefix(version: Version) -> String {
    format!("CVSS:{version}")
}

fn join_parts(prefix: String, parts: impl Iterator<Item = String>) -> String {
    let parts: Vec<String> = parts.collect();
    if parts.is_empty() {
        prefix
    } else {
        format!("{prefix}/{}", parts.join("/"))
    }
}

//! Presentation grouping: sorted value lists per metric, and the nested
//! display hierarchy of metric groups.

use crate::definition::Definition;
use crate::schema::{LayoutBody, MetricGroup, MetricSchema};
use crate::version::Version;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A node of the display hierarchy. Leaves carry `metrics`; expanded parents
/// carry `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    pub name: String,
    pub metrics: Vec<String>,
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    fn leaf(name: &str, metrics: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            metrics,
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.children.iter().all(GroupNode::is_empty)
    }
}

/// Group `definitions` by metric key, keeping the first occurrence of each
/// (metric_key, value_key) pair, and sort each metric's values into their
/// canonical display order for `version`.
///
/// Values missing from the canonical order sort after all known ones; metrics
/// without a canonical order are sorted by value key. Definitions tagged with
/// another version are ignored.
pub fn grouped_definitions(
    definitions: &[Definition],
    version: Version,
) -> BTreeMap<String, Vec<Definition>> {
    let schema = MetricSchema::for_version(version);
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut groups: BTreeMap<String, Vec<Definition>> = BTreeMap::new();

    for def in definitions.iter().filter(|d| d.version == version) {
        if !seen.insert((def.metric_key.as_str(), def.value_key.as_str())) {
            continue;
        }
        groups
            .entry(def.metric_key.clone())
            .or_default()
            .push(def.clone());
    }

    for (metric_key, values) in groups.iter_mut() {
        match schema.value_order(metric_key) {
            Some(order) => values.sort_by_key(|d| {
                order
                    .iter()
                    .position(|v| *v == d.value_key)
                    .unwrap_or(usize::MAX)
            }),
            None => values.sort_by(|a, b| {
                a.value_key
                    .to_lowercase()
                    .cmp(&b.value_key.to_lowercase())
                    .then_with(|| a.value_key.cmp(&b.value_key))
            }),
        }
    }

    groups
}

/// Project flat `groups` into `version`'s display hierarchy, pruning every
/// branch without metrics.
pub fn structured_metric_groups(groups: &[MetricGroup<'_>], version: Version) -> Vec<GroupNode> {
    let metrics_of = |name: &str| -> Vec<String> {
        groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.metrics.iter().map(|m| m.to_string()).collect())
            .unwrap_or_default()
    };

    MetricSchema::for_version(version)
        .layout
        .iter()
        .filter_map(|parent| {
            let node = match parent.body {
                LayoutBody::Metrics(group) => GroupNode::leaf(parent.name, metrics_of(group)),
                LayoutBody::Children(children) => GroupNode {
                    name: parent.name.to_string(),
                    metrics: Vec::new(),
                    children: children
                        .iter()
                        .map(|child| GroupNode::leaf(child, metrics_of(*child)))
                        .filter(|child| !child.is_empty())
                        .collect(),
                },
            };
            (!node.is_empty()).then_some(node)
        })
        .collect()
}

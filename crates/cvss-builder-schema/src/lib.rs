//! CVSS vector composition (3.1 and 4.0)
//!
//! This crate holds the versioned CVSS metric taxonomy as static tables and
//! the pure functions built on them:
//!
//! - [`compose`]: selections -> canonical `CVSS:<version>/...` vector string,
//! - [`structure`]: definition lists -> sorted per-metric value lists, and flat
//!   metric groups -> nested display hierarchy.
//!
//! Everything here is synchronous and allocation-light; session state and
//! definition fetching live in `cvss-builder-session`.

pub mod compose;
pub mod definition;
pub mod schema;
pub mod structure;
mod tables;
pub mod version;

pub use compose::{base_metric_keys, compose, compose_default};
pub use definition::{Definition, DescriptionType};
pub use schema::{
    LayoutBody, MetricGroup, MetricSchema, ParentLayout, SelectedMetrics, NOT_SPECIFIED,
};
pub use structure::{grouped_definitions, structured_metric_groups, GroupNode};
pub use version::{Version, VersionParseError};

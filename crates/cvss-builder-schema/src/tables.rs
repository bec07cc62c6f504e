//! Static CVSS 3.1 and 4.0 metric tables.

use crate::schema::{LayoutBody, MetricGroup, MetricSchema, ParentLayout};
use crate::version::Version;

// ============================================================================
// CVSS 3.1
// ============================================================================

const V3_1_ORDER: &[&str] = &[
    "AV", "AC", "PR", "UI", "S", "C", "I", "A", // base
    "E", "RL", "RC", // temporal
    "CR", "IR", "AR", "MAV", "MAC", "MPR", "MUI", "MS", "MC", "MI", "MA", // environmental
];

const V3_1_DEFAULTS: &[(&str, &str)] = &[
    ("AV", "N"),
    ("AC", "L"),
    ("PR", "N"),
    ("UI", "N"),
    ("S", "U"),
    ("C", "N"),
    ("I", "N"),
    ("A", "N"),
    ("E", "X"),
    ("RL", "X"),
    ("RC", "X"),
    ("CR", "X"),
    ("IR", "X"),
    ("AR", "X"),
    ("MAV", "X"),
    ("MAC", "X"),
    ("MPR", "X"),
    ("MUI", "X"),
    ("MS", "X"),
    ("MC", "X"),
    ("MI", "X"),
    ("MA", "X"),
];

const V3_1_GROUPS: &[MetricGroup<'static>] = &[
    MetricGroup {
        name: "Base Score",
        metrics: &["AV", "AC", "PR", "UI", "S", "C", "I", "A"],
    },
    MetricGroup {
        name: "Temporal Score",
        metrics: &["E", "RL", "RC"],
    },
    MetricGroup {
        name: "Environmental Score",
        metrics: &[
            "CR", "IR", "AR", "MAV", "MAC", "MPR", "MUI", "MS", "MC", "MI", "MA",
        ],
    },
];

const V3_1_VALUE_ORDERS: &[(&str, &[&str])] = &[
    ("AV", &["N", "A", "L", "P"]),
    ("AC", &["L", "H"]),
    ("PR", &["N", "L", "H"]),
    ("UI", &["N", "R"]),
    ("S", &["U", "C"]),
    ("C", &["N", "L", "H"]),
    ("I", &["N", "L", "H"]),
    ("A", &["N", "L", "H"]),
    ("E", &["X", "U", "P", "F", "H"]),
    ("RL", &["X", "O", "T", "W", "U"]),
    ("RC", &["X", "C", "R", "U"]),
    ("CR", &["X", "L", "M", "H"]),
    ("IR", &["X", "L", "M", "H"]),
    ("AR", &["X", "L", "M", "H"]),
    ("MAV", &["X", "N", "A", "L", "P"]),
    ("MAC", &["X", "L", "H"]),
    ("MPR", &["X", "N", "L", "H"]),
    ("MUI", &["X", "N", "R"]),
    ("MS", &["X", "U", "C"]),
    ("MC", &["X", "N", "L", "H"]),
    ("MI", &["X", "N", "L", "H"]),
    ("MA", &["X", "N", "L", "H"]),
];

const V3_1_LAYOUT: &[ParentLayout] = &[
    ParentLayout {
        name: "Base Score",
        body: LayoutBody::Metrics("Base Score"),
    },
    ParentLayout {
        name: "Temporal Score",
        body: LayoutBody::Metrics("Temporal Score"),
    },
    ParentLayout {
        name: "Environmental Score",
        body: LayoutBody::Metrics("Environmental Score"),
    },
];

pub(crate) static CVSS_V3_1: MetricSchema = MetricSchema {
    version: Version::V3_1,
    order: V3_1_ORDER,
    defaults: V3_1_DEFAULTS,
    groups: V3_1_GROUPS,
    value_orders: V3_1_VALUE_ORDERS,
    layout: V3_1_LAYOUT,
};

// ============================================================================
// CVSS 4.0
// ============================================================================

const V4_0_ORDER: &[&str] = &[
    "AV", "AC", "AT", "PR", "UI", "VC", "VI", "VA", "SC", "SI", "SA", // base
    "E",  // threat
    "CR", "IR", "AR", "MAV", "MAC", "MAT", "MPR", "MUI", "MVC", "MVI", "MVA", "MSC", "MSI",
    "MSA", // environmental
    "S", "AU", "R", "V", "RE", "U", // supplemental
];

const V4_0_DEFAULTS: &[(&str, &str)] = &[
    ("AV", "N"),
    ("AC", "L"),
    ("AT", "N"),
    ("PR", "N"),
    ("UI", "N"),
    ("VC", "N"),
    ("VI", "N"),
    ("VA", "N"),
    ("SC", "N"),
    ("SI", "N"),
    ("SA", "N"),
    ("E", "X"),
    ("CR", "X"),
    ("IR", "X"),
    ("AR", "X"),
    ("MAV", "X"),
    ("MAC", "X"),
    ("MAT", "X"),
    ("MPR", "X"),
    ("MUI", "X"),
    ("MVC", "X"),
    ("MVI", "X"),
    ("MVA", "X"),
    ("MSC", "X"),
    ("MSI", "X"),
    ("MSA", "X"),
    ("S", "X"),
    ("AU", "X"),
    ("R", "X"),
    ("V", "X"),
    ("RE", "X"),
    ("U", "X"),
];

const V4_0_GROUPS: &[MetricGroup<'static>] = &[
    MetricGroup {
        name: "Exploitability Metrics",
        metrics: &["AV", "AC", "AT", "PR", "UI"],
    },
    MetricGroup {
        name: "Vulnerable System Impact Metrics",
        metrics: &["VC", "VI", "VA"],
    },
    MetricGroup {
        name: "Subsequent System Impact Metrics",
        metrics: &["SC", "SI", "SA"],
    },
    MetricGroup {
        name: "Threat Metrics",
        metrics: &["E"],
    },
    MetricGroup {
        name: "Security Requirements",
        metrics: &["CR", "IR", "AR"],
    },
    MetricGroup {
        name: "Modified Exploitability Metrics",
        metrics: &["MAV", "MAC", "MAT", "MPR", "MUI"],
    },
    MetricGroup {
        name: "Modified Vulnerable System Impact Metrics",
        metrics: &["MVC", "MVI", "MVA"],
    },
    MetricGroup {
        name: "Modified Subsequent System Impact Metrics",
        metrics: &["MSC", "MSI", "MSA"],
    },
    MetricGroup {
        name: "Supplemental Metrics",
        metrics: &["S", "AU", "R", "V", "RE", "U"],
    },
];

const V4_0_VALUE_ORDERS: &[(&str, &[&str])] = &[
    ("AV", &["N", "A", "L", "P"]),
    ("AC", &["L", "H"]),
    ("AT", &["N", "P"]),
    ("PR", &["N", "L", "H"]),
    ("UI", &["N", "P", "A"]),
    ("VC", &["N", "L", "H"]),
    ("VI", &["N", "L", "H"]),
    ("VA", &["N", "L", "H"]),
    ("SC", &["N", "L", "H"]),
    ("SI", &["N", "L", "H"]),
    ("SA", &["N", "L", "H"]),
    ("E", &["X", "U", "P", "A"]),
    ("CR", &["X", "L", "M", "H"]),
    ("IR", &["X", "L", "M", "H"]),
    ("AR", &["X", "L", "M", "H"]),
    ("MAV", &["X", "N", "A", "L", "P"]),
    ("MAC", &["X", "L", "H"]),
    ("MAT", &["X", "N", "P"]),
    ("MPR", &["X", "N", "L", "H"]),
    ("MUI", &["X", "N", "P", "A"]),
    ("MVC", &["X", "N", "L", "H"]),
    ("MVI", &["X", "N", "L", "H"]),
    ("MVA", &["X", "N", "L", "H"]),
    ("MSC", &["X", "N", "L", "H"]),
    // MSI/MSA additionally allow S (safety).
    ("MSI", &["X", "N", "L", "H", "S"]),
    ("MSA", &["X", "N", "L", "H", "S"]),
    ("S", &["X", "N", "P"]),
    ("AU", &["X", "N", "Y"]),
    ("R", &["X", "A", "U", "I"]),
    ("V", &["X", "D", "C"]),
    ("RE", &["X", "L", "M", "H"]),
    ("U", &["X", "Clear", "Green", "Amber", "Red"]),
];

const V4_0_LAYOUT: &[ParentLayout] = &[
    ParentLayout {
        name: "Base Metrics",
        body: LayoutBody::Children(&[
            "Exploitability Metrics",
            "Vulnerable System Impact Metrics",
            "Subsequent System Impact Metrics",
        ]),
    },
    ParentLayout {
        name: "Threat Metrics",
        body: LayoutBody::Metrics("Threat Metrics"),
    },
    ParentLayout {
        name: "Environmental Metrics",
        body: LayoutBody::Children(&[
            "Security Requirements",
            "Modified Exploitability Metrics",
            "Modified Vulnerable System Impact Metrics",
            "Modified Subsequent System Impact Metrics",
        ]),
    },
    ParentLayout {
        name: "Supplemental Metrics",
        body: LayoutBody::Metrics("Supplemental Metrics"),
    },
];

pub(crate) static CVSS_V4_0: MetricSchema = MetricSchema {
    version: Version::V4_0,
    order: V4_0_ORDER,
    defaults: V4_0_DEFAULTS,
    groups: V4_0_GROUPS,
    value_orders: V4_0_VALUE_ORDERS,
    layout: V4_0_LAYOUT,
};

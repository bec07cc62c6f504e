//! CVSS specification versions.
//!
//! The two supported versions have incompatible metric taxonomies (`UI` takes
//! different values, `S` means "Scope" in 3.1 and "Safety" in 4.0), so every
//! lookup table in this crate is selected by [`Version`] first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported CVSS version. Exactly one is active per session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Version {
    #[serde(rename = "3.1")]
    V3_1,
    #[default]
    #[serde(rename = "4.0")]
    V4_0,
}

impl Version {
    pub const ALL: [Version; 2] = [Version::V3_1, Version::V4_0];

    pub fn as_str(self) -> &'static str {
        match self {
            Version::V3_1 => "3.1",
            Version::V4_0 => "4.0",
        }
    }

    /// Names of the presentation groups whose metrics are mandatory in every
    /// vector of this version.
    pub fn base_group_names(self) -> &'static [&'static str] {
        match self {
            Version::V3_1 => &["Base Score"],
            Version::V4_0 => &[
                "Exploitability Metrics",
                "Vulnerable System Impact Metrics",
                "Subsequent System Impact Metrics",
            ],
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Version must be '3.1' or '4.0' (got `{input}`)")]
pub struct VersionParseError {
    pub input: String,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "3.1" => Ok(Version::V3_1),
            "4.0" => Ok(Version::V4_0),
            other => Err(VersionParseError {
                input: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_both_versions() {
        for version in Version::ALL {
            let parsed: Version = version.to_string().parse().expect("parse");
            assert_eq!(parsed, version);
        }
    }

    #[test]
    fn rejects_unknown_version() {
        let err = "2.0".parse::<Version>().unwrap_err();
        assert_eq!(err.input, "2.0");
        assert!(err.to_string().contains("'3.1' or '4.0'"));
    }

    #[test]
    fn serializes_as_dotted_string() {
        assert_eq!(serde_json::to_string(&Version::V3_1).unwrap(), "\"3.1\"");
        let v: Version = serde_json::from_str("\"4.0\"").unwrap();
        assert_eq!(v, Version::V4_0);
    }

    #[test]
    fn defaults_to_four_point_zero() {
        assert_eq!(Version::default(), Version::V4_0);
    }
}

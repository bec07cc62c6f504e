//! Human-readable metric/value definitions.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Display metadata for one (version, metric, value) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub version: Version,
    pub metric_key: String,
    pub value_key: String,
    pub metric_name: String,
    pub value_name: String,
    pub official_description: String,
    #[serde(default)]
    pub simplified_description: Option<String>,
}

impl Definition {
    /// Preferred description text, falling back to the official one when no
    /// simplified text exists.
    pub fn description(&self, ty: DescriptionType) -> &str {
        match ty {
            DescriptionType::Official => &self.official_description,
            DescriptionType::Simplified => self
                .simplified_description
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(self.official_description.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionType {
    #[default]
    Simplified,
    Official,
}

impl DescriptionType {
    pub fn field_name(self) -> &'static str {
        match self {
            DescriptionType::Simplified => "simplified_description",
            DescriptionType::Official => "official_description",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_vector(simplified: Option<&str>) -> Definition {
        Definition {
            id: Some(1),
            version: Version::V4_0,
            metric_key: "AV".into(),
            value_key: "N".into(),
            metric_name: "Attack Vector".into(),
            value_name: "Network".into(),
            official_description: "The vulnerable system is bound to the network stack.".into(),
            simplified_description: simplified.map(str::to_string),
        }
    }

    #[test]
    fn simplified_description_preferred_when_present() {
        let def = attack_vector(Some("Attackable over the internet."));
        assert_eq!(
            def.description(DescriptionType::Simplified),
            "Attackable over the internet."
        );
        assert_eq!(
            def.description(DescriptionType::Official),
            def.official_description
        );
    }

    #[test]
    fn simplified_falls_back_to_official() {
        for def in [attack_vector(None), attack_vector(Some(""))] {
            assert_eq!(
                def.description(DescriptionType::Simplified),
                def.official_description
            );
        }
    }

    #[test]
    fn deserializes_storage_row_shape() {
        let json = r#"{
            "id": 7,
            "version": "3.1",
            "metric_key": "AC",
            "value_key": "L",
            "metric_name": "Attack Complexity",
            "value_name": "Low",
            "official_description": "Specialized access conditions do not exist.",
            "simplified_description": null
        }"#;
        let def: Definition = serde_json::from_str(json).expect("parse");
        assert_eq!(def.id, Some(7));
        assert_eq!(def.version, Version::V3_1);
        assert_eq!(def.simplified_description, None);
    }

    #[test]
    fn description_type_field_names() {
        assert_eq!(
            DescriptionType::Simplified.field_name(),
            "simplified_description"
        );
        assert_eq!(DescriptionType::Official.field_name(), "official_description");
        assert_eq!(DescriptionType::default(), DescriptionType::Simplified);
    }
}

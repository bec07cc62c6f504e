//! Definition lookup collaborators.
//!
//! [`DefinitionSource`] is the seam to whatever serves definitions (an RPC
//! backend in a deployed system). [`SeedDefinitionSource`] is the in-process
//! implementation backed by the JSON seed format: an array of
//! `{version, metric_key, value_key, metric_name, value_name,
//! official_description, simplified_description?}` records.

use async_trait::async_trait;
use cvss_builder_schema::{Definition, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const MAX_METRIC_KEY_LEN: usize = 50;
const MAX_VALUE_KEY_LEN: usize = 10;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid definition: {0}")]
    Validation(String),

    #[error("Duplicate definition for CVSS {version} {metric_key}:{value_key}")]
    Duplicate {
        version: Version,
        metric_key: String,
        value_key: String,
    },

    #[error("Seed file is empty or not a valid JSON array.")]
    EmptySeed,

    #[error("{0}")]
    Transport(String),
}

/// Looks up all definitions of one CVSS version. An empty list is a valid
/// result.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn definitions_by_version(&self, version: Version)
        -> Result<Vec<Definition>, SourceError>;
}

#[async_trait]
impl<T: DefinitionSource + ?Sized> DefinitionSource for Arc<T> {
    async fn definitions_by_version(
        &self,
        version: Version,
    ) -> Result<Vec<Definition>, SourceError> {
        (**self).definitions_by_version(version).await
    }
}

/// One record of the seed file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSeed {
    pub version: String,
    pub metric_key: String,
    pub value_key: String,
    pub metric_name: String,
    pub value_name: String,
    pub official_description: String,
    #[serde(default)]
    pub simplified_description: Option<String>,
}

/// Validated, in-memory definitions.
#[derive(Debug, Clone, Default)]
pub struct SeedDefinitionSource {
    definitions: Vec<Definition>,
}

impl SeedDefinitionSource {
    /// Validate `seeds` and assign 1-based ids in seed order.
    ///
    /// A missing or empty `simplified_description` is filled with the
    /// official one.
    pub fn from_seeds(seeds: Vec<DefinitionSeed>) -> Result<Self, SourceError> {
        if seeds.is_empty() {
            return Err(SourceError::EmptySeed);
        }

        let mut seen: HashSet<(Version, String, String)> = HashSet::new();
        let mut definitions = Vec::with_capacity(seeds.len());

        for (index, seed) in seeds.into_iter().enumerate() {
            let definition = validate_seed(index, seed)?;
            let triple = (
                definition.version,
                definition.metric_key.clone(),
                definition.value_key.clone(),
            );
            if !seen.insert(triple) {
                return Err(SourceError::Duplicate {
                    version: definition.version,
                    metric_key: definition.metric_key,
                    value_key: definition.value_key,
                });
            }
            definitions.push(definition);
        }

        Ok(Self { definitions })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let seeds: Vec<DefinitionSeed> = serde_json::from_str(json)?;
        Self::from_seeds(seeds)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let source = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            count = source.definitions.len(),
            "loaded CVSS definition seed"
        );
        Ok(source)
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[async_trait]
impl DefinitionSource for SeedDefinitionSource {
    async fn definitions_by_version(
        &self,
        version: Version,
    ) -> Result<Vec<Definition>, SourceError> {
        Ok(self
            .definitions
            .iter()
            .filter(|d| d.version == version)
            .cloned()
            .collect())
    }
}

fn validate_seed(index: usize, seed: DefinitionSeed) -> Result<Definition, SourceError> {
    let invalid = |reason: String| SourceError::Validation(format!("record {index}: {reason}"));

    let version: Version = seed
        .version
        .parse()
        .map_err(|err: cvss_builder_schema::VersionParseError| invalid(err.to_string()))?;

    for (field, value, max) in [
        ("metric_key", &seed.metric_key, MAX_METRIC_KEY_LEN),
        ("value_key", &seed.value_key, MAX_VALUE_KEY_LEN),
        ("metric_name", &seed.metric_name, MAX_NAME_LEN),
        ("value_name", &seed.value_name, MAX_NAME_LEN),
    ] {
        let len = value.chars().count();
        if len == 0 {
            return Err(invalid(format!("{field} must not be empty")));
        }
        if len > max {
            return Err(invalid(format!(
                "{field} is {len} characters, at most {max} allowed"
            )));
        }
    }

    let simplified_description = seed
        .simplified_description
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| seed.official_description.clone());

    Ok(Definition {
        id: u32::try_from(index + 1).ok(),
        version,
        metric_key: seed.metric_key,
        value_key: seed.value_key,
        metric_name: seed.metric_name,
        value_name: seed.value_name,
        official_description: seed.official_description,
        simplified_description: Some(simplified_description),
    })
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Whether `predictions`/`truth` columns already hold class indices.
///
/// `Raw` (the default) always maps labels through the class columns.
/// `PreEncoded` keeps integer-looking values as indices and only encodes
/// values that are not digit strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelEncoding {
    #[default]
    Raw,
    PreEncoded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrameworkDefinition {
    #[serde(default)]
    pub version: String,
}

/// Framework definitions keyed by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkRegistry {
    frameworks: BTreeMap<String, FrameworkDefinition>,
}

impl FrameworkRegistry {
    pub fn insert(&mut self, name: &str, definition: FrameworkDefinition) {
        self.frameworks.insert(name.to_lowercase(), definition);
    }

    pub fn definition(&self, name: &str) -> Option<&FrameworkDefinition> {
        self.frameworks.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl<'de> Deserialize<'de> for FrameworkRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, FrameworkDefinition>::deserialize(deserializer)?;
        let mut registry = FrameworkRegistry::default();
        for (name, def) in raw {
            registry.insert(&name, def);
        }
        Ok(registry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scores_dir: PathBuf,
    pub predictions_dir: PathBuf,
    pub run_mode: String,
    pub label_encoding: LabelEncoding,
    pub frameworks: FrameworkRegistry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scores_dir: PathBuf::from("scores"),
            predictions_dir: PathBuf::from("predictions"),
            run_mode: "local".to_string(),
            label_encoding: LabelEncoding::Raw,
            frameworks: FrameworkRegistry::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "loaded settings from {} ({} frameworks)",
            path.display(),
            settings.frameworks.len()
        );
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_framework(mut self, name: &str, version: &str) -> Self {
        self.frameworks.insert(
            name,
            FrameworkDefinition {
                version: version.to_string(),
            },
        );
        self
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;

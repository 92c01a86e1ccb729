//! Optional YAML configuration for the `hl7` binary
//!
//! ```yaml
//! default_version: "2.3.1"
//! schema_overlays:
//!   - schemas/zli.yaml
//! envelope_formats: [ORUR01, ZLIL10]
//! ```

use hl7_schema::{SchemaLoader, SchemaRegistry, Version};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration problems; all of them are fatal for the CLI
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid default_version in config: {0}")]
    Version(hl7_schema::Error),

    #[error("Cannot load schema overlay {path}: {source}")]
    Overlay {
        path: PathBuf,
        source: hl7_schema::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Version used when a message declares none
    #[serde(default)]
    pub default_version: Option<String>,

    /// JSON or YAML table files merged over the built-in schema
    #[serde(default)]
    pub schema_overlays: Vec<PathBuf>,

    /// `MessageFormat` values accepted from XML envelopes
    #[serde(default)]
    pub envelope_formats: Option<Vec<String>>,
}

impl CliConfig {
    /// Load the config file if one was given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.default_version()?;

        debug!(
            path = %path.display(),
            overlays = config.schema_overlays.len(),
            "Loaded CLI config"
        );
        Ok(config)
    }

    pub fn default_version(&self) -> Result<Option<Version>, ConfigError> {
        self.default_version
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ConfigError::Version)
    }

    /// Built-in tables with every configured overlay merged in
    pub fn registry(&self) -> Result<SchemaRegistry, ConfigError> {
        let loader = SchemaLoader::new();
        let mut builder = SchemaRegistry::builder().with_builtin();

        for path in &self.schema_overlays {
            let overlay_error = |source| ConfigError::Overlay {
                path: path.clone(),
                source,
            };
            let file = loader.load_from_file(path).map_err(overlay_error)?;
            builder = builder.overlay(file).map_err(overlay_error)?;
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();

        assert!(config.schema_overlays.is_empty());
        assert_eq!(config.default_version().unwrap(), None);
        assert!(config.registry().unwrap().contains(Version::V25));
    }

    #[test]
    fn test_load_config() {
        let file = write_config("default_version: '2.3.1'\nenvelope_formats: [ORUR01]\n");
        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.default_version().unwrap(), Some(Version::V231));
        assert_eq!(config.envelope_formats, Some(vec!["ORUR01".to_string()]));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let file = write_config("color: neon\n");

        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_bad_default_version_is_rejected() {
        let file = write_config("default_version: '3.0'\n");

        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(ConfigError::Version(_))
        ));
    }

    #[test]
    fn test_missing_overlay_fails_registry() {
        let config = CliConfig {
            schema_overlays: vec![PathBuf::from("/nonexistent/overlay.yaml")],
            ..CliConfig::default()
        };

        assert!(matches!(config.registry(), Err(ConfigError::Overlay { .. })));
    }
}

//! Version-keyed schema registry

use crate::loader::SchemaFile;
use crate::model::{FieldTable, Version, VersionSchema};
use crate::tables;
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Immutable mapping from HL7 version to its segment and composite tables.
///
/// Build one at startup and share it by reference; nothing mutates it after
/// [`SchemaRegistryBuilder::build`].
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<Version, VersionSchema>,
}

impl SchemaRegistry {
    /// Registry holding the compiled-in tables for every supported version
    pub fn builtin() -> Self {
        SchemaRegistryBuilder::new().with_builtin().build()
    }

    /// Start building a registry
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// Schema for a version
    pub fn get(&self, version: Version) -> Result<&VersionSchema> {
        self.schemas
            .get(&version)
            .ok_or_else(|| Error::UnknownVersion(version.to_string()))
    }

    /// Schema for a version string such as `"2.4"` or `"2.3.1"`
    pub fn get_str(&self, version: &str) -> Result<&VersionSchema> {
        self.get(version.parse()?)
    }

    /// Registered versions, oldest first
    pub fn versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self.schemas.keys().copied().collect();
        versions.sort_unstable();
        versions
    }

    pub fn contains(&self, version: Version) -> bool {
        self.schemas.contains_key(&version)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collects built-in tables and overlays before freezing them into a registry
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<Version, VersionSchema>,
}

impl SchemaRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the compiled-in tables for every supported version
    #[must_use]
    pub fn with_builtin(mut self) -> Self {
        for version in Version::ALL {
            let static_tables = tables::for_version(version);
            let schema = self.schema_mut(version);
            for (code, fields) in static_tables.segments {
                schema.insert_segment(FieldTable::from_static(code, fields));
            }
            for (code, fields) in static_tables.composites {
                schema.insert_composite(FieldTable::from_static(code, fields));
            }
            trace!(
                %version,
                segments = static_tables.segments.len(),
                composites = static_tables.composites.len(),
                "Loaded built-in tables"
            );
        }
        self
    }

    /// Merge an overlay file over whatever is registered for its version.
    ///
    /// Fields with an existing name are replaced in place; new names and new
    /// tables are added.
    pub fn overlay(mut self, file: SchemaFile) -> Result<Self> {
        let version = file.version()?;
        let (segments, composites) = file.into_tables()?;
        debug!(
            %version,
            segments = segments.len(),
            composites = composites.len(),
            "Applying schema overlay"
        );

        let schema = self.schema_mut(version);
        for table in segments {
            schema.insert_segment(table);
        }
        for table in composites {
            schema.insert_composite(table);
        }
        Ok(self)
    }

    /// Add or merge a single segment table
    #[must_use]
    pub fn segment(mut self, version: Version, table: FieldTable) -> Self {
        self.schema_mut(version).insert_segment(table);
        self
    }

    /// Add or merge a single composite table
    #[must_use]
    pub fn composite(mut self, version: Version, table: FieldTable) -> Self {
        self.schema_mut(version).insert_composite(table);
        self
    }

    /// Freeze the collected tables
    pub fn build(self) -> SchemaRegistry {
        debug!(versions = self.schemas.len(), "Built schema registry");
        SchemaRegistry {
            schemas: self.schemas,
        }
    }

    fn schema_mut(&mut self, version: Version) -> &mut VersionSchema {
        self.schemas
            .entry(version)
            .or_insert_with(|| VersionSchema::new(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decoder, FieldDef};

    #[test]
    fn test_builtin_has_every_version() {
        let registry = SchemaRegistry::builtin();

        assert_eq!(registry.versions(), Version::ALL.to_vec());
        for version in Version::ALL {
            let schema = registry.get(version).unwrap();
            for code in ["MSH", "PID", "ORC", "OBR", "OBX", "NTE"] {
                assert!(schema.has_segment(code), "{code} missing in {version}");
            }
        }
    }

    #[test]
    fn test_get_str_accepts_dotted_form() {
        let registry = SchemaRegistry::builtin();

        assert_eq!(registry.get_str("2.3.1").unwrap().version(), Version::V231);
        assert!(matches!(
            registry.get_str("3.0"),
            Err(Error::UnknownVersion(_))
        ));
    }

    #[test]
    fn test_missing_version_is_a_schema_gap() {
        let registry = SchemaRegistry::builder()
            .segment(Version::V24, FieldTable::new("ZLI"))
            .build();

        assert!(registry.get(Version::V24).is_ok());
        assert!(matches!(
            registry.get(Version::V21),
            Err(Error::UnknownVersion(v)) if v == "2.1"
        ));
    }

    #[test]
    fn test_builder_merges_into_builtin_table() {
        let mut extra = FieldTable::new("OBX");
        extra.insert(FieldDef::new("observation_result_status", 11, None));
        extra.insert(FieldDef::new("units", 6, Some(Decoder::Numeric)));

        let registry = SchemaRegistry::builder()
            .with_builtin()
            .segment(Version::V24, extra)
            .build();
        let obx = registry.get(Version::V24).unwrap().segment("OBX").unwrap();

        assert_eq!(obx.field("units").unwrap().decoder, Some(Decoder::Numeric));
        assert_eq!(obx.field("observation_result_status").unwrap().index, 11);
        assert_eq!(obx.field("set_id_obx").unwrap().index, 1);
    }
}

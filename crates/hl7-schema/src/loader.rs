//! Overlay table loader
//!
//! Overlay files describe segment and composite tables the way the HL7
//! reference does: field numbers, descriptions and datatype codes. They are
//! converted with the same rules that produced the built-in tables.
//!
//! ```yaml
//! version: "2.4"
//! segments:
//!   - code: ZLI
//!     fields:
//!       - { index: 1, description: "Set ID - ZLI", datatype: SI }
//!       - { index: 2, description: "Lab Code", datatype: CE }
//! ```

use crate::model::{Decoder, FieldDef, FieldTable, Version};
use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::trace;

const HEADER_CODE: &str = "MSH";

/// Overlay file contents
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    pub version: String,
    #[serde(default)]
    pub segments: Vec<TableSpec>,
    #[serde(default)]
    pub composites: Vec<TableSpec>,
}

/// One segment or composite table in an overlay file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSpec {
    pub code: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One field entry; `index` is the 1-based field or component number
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub index: usize,
    pub description: String,
    #[serde(default)]
    pub datatype: Option<String>,

    /// Explicit field name; defaults to the normalized description
    #[serde(default)]
    pub name: Option<String>,
}

impl SchemaFile {
    /// Version this overlay applies to
    pub fn version(&self) -> Result<Version> {
        self.version.parse()
    }

    /// Convert into segment and composite tables
    pub fn into_tables(self) -> Result<(Vec<FieldTable>, Vec<FieldTable>)> {
        let segment_code = code_pattern(r"^[A-Z][A-Z0-9]{2}$")?;
        let composite_code = code_pattern(r"^[A-Z][A-Z0-9]{1,3}$")?;

        let segments = self
            .segments
            .into_iter()
            .map(|spec| {
                check_code(&segment_code, &spec.code, "segment")?;
                let offset = usize::from(spec.code == HEADER_CODE);
                convert_table(spec, offset)
            })
            .collect::<Result<Vec<_>>>()?;

        let composites = self
            .composites
            .into_iter()
            .map(|spec| {
                check_code(&composite_code, &spec.code, "composite")?;
                convert_table(spec, 1)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((segments, composites))
    }
}

fn code_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidFormat(format!("bad code pattern: {e}")))
}

fn check_code(pattern: &Regex, code: &str, kind: &str) -> Result<()> {
    if pattern.is_match(code) {
        Ok(())
    } else {
        Err(Error::InvalidFormat(format!("invalid {kind} code: {code:?}")))
    }
}

/// Shift 1-based numbers down by `offset` into tree child indexes.
///
/// MSH-1 is the field separator itself and has no child index.
fn convert_table(spec: TableSpec, offset: usize) -> Result<FieldTable> {
    let mut table = FieldTable::new(spec.code.as_str());

    for field in spec.fields {
        if field.index == 0 {
            return Err(Error::InvalidFormat(format!(
                "{}: field numbers start at 1",
                spec.code
            )));
        }
        if spec.code == HEADER_CODE && field.index == 1 {
            trace!(description = %field.description, "Skipping MSH field separator entry");
            continue;
        }

        let name = match field.name {
            Some(name) => name,
            None => normalize_field_name(&field.description),
        };
        if name.is_empty() {
            return Err(Error::InvalidFormat(format!(
                "{}-{}: description {:?} yields an empty name",
                spec.code, field.index, field.description
            )));
        }

        let decoder = field.datatype.as_deref().and_then(Decoder::from_datatype);
        table.insert(FieldDef::new(name, field.index - offset, decoder));
    }

    Ok(table)
}

/// Turn a field description into an accessor name.
///
/// Lower-cases, keeps alphanumerics, spells `#` as `num`, collapses runs of
/// spaces and hyphens into one underscore and drops other punctuation.
///
/// ```
/// use hl7_schema::normalize_field_name;
///
/// assert_eq!(normalize_field_name("Patient ID (External ID)"), "patient_id_external_id");
/// assert_eq!(normalize_field_name("Filler Order #"), "filler_order_num");
/// assert_eq!(normalize_field_name("Set ID - OBX"), "set_id_obx");
/// ```
pub fn normalize_field_name(description: &str) -> String {
    let mut name = String::with_capacity(description.len());
    let mut after_separator = false;

    for ch in description.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
            after_separator = false;
        } else if ch == '#' {
            name.push_str("num");
            after_separator = false;
        } else if (ch == ' ' || ch == '-') && !after_separator {
            name.push('_');
            after_separator = true;
        }
    }

    name.trim_matches('_').to_string()
}

/// Reads overlay files
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load an overlay; `.yaml` / `.yml` files are YAML, anything else JSON
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<SchemaFile> {
        let path = path.as_ref();
        trace!("Loading schema overlay from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load an overlay from a JSON string
    pub fn load_from_json(&self, json: &str) -> Result<SchemaFile> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))
    }

    /// Load an overlay from a YAML string
    pub fn load_from_yaml(&self, yaml: &str) -> Result<SchemaFile> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))
    }
}

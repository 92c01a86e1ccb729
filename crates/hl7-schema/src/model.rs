//! Schema model definitions
#![allow(clippy::must_use_candidate)]

use crate::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported HL7 v2 versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
    V21,
    V22,
    V23,
    V231,
    V24,
    V25,
}

impl Version {
    /// Every supported version, oldest first
    pub const ALL: [Version; 6] = [
        Version::V21,
        Version::V22,
        Version::V23,
        Version::V231,
        Version::V24,
        Version::V25,
    ];

    /// Registry key for this version (`"2.31"` for 2.3.1)
    pub fn as_str(self) -> &'static str {
        match self {
            Version::V21 => "2.1",
            Version::V22 => "2.2",
            Version::V23 => "2.3",
            Version::V231 => "2.31",
            Version::V24 => "2.4",
            Version::V25 => "2.5",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "2.1" => Ok(Version::V21),
            "2.2" => Ok(Version::V22),
            "2.3" => Ok(Version::V23),
            "2.31" | "2.3.1" => Ok(Version::V231),
            "2.4" => Ok(Version::V24),
            "2.5" => Ok(Version::V25),
            other => Err(Error::UnknownVersion(other.to_string())),
        }
    }
}

/// How a raw field value is turned into a typed value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decoder {
    /// Floating point number
    Numeric,

    /// Partial-precision `YYYYMMDD[HH[MM[SS]]]` timestamp
    Timestamp,

    /// Nested accessor over the named composite datatype table
    Composite(Cow<'static, str>),

    /// Value-type code selecting how a sibling field is decoded
    ValueType,

    /// Observation value decoded according to the segment's value type
    ObservationValue,
}

impl Decoder {
    /// Decoder for a datatype code, following the table generator's mapping.
    ///
    /// Returns `None` for plain text types.
    pub fn from_datatype(datatype: &str) -> Option<Decoder> {
        match datatype.trim() {
            "DT" | "TM" | "TS" => Some(Decoder::Timestamp),
            "NM" => Some(Decoder::Numeric),
            "ID" | "TN" | "TX" | "ST" | "FT" | "IS" | "SI" | "" => None,
            other => Some(Decoder::Composite(Cow::Owned(other.to_string()))),
        }
    }

    /// Composite datatype code, if this decoder nests into a composite table
    pub fn composite_code(&self) -> Option<&str> {
        match self {
            Decoder::Composite(code) => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoder::Numeric => f.write_str("numeric"),
            Decoder::Timestamp => f.write_str("timestamp"),
            Decoder::Composite(code) => write!(f, "composite {code}"),
            Decoder::ValueType => f.write_str("value type"),
            Decoder::ObservationValue => f.write_str("observation value"),
        }
    }
}

/// A field entry in a compiled-in table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticField {
    pub name: &'static str,
    pub index: usize,
    pub decoder: Option<Decoder>,
}

impl StaticField {
    /// Text field without a decoder
    pub const fn plain(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            decoder: None,
        }
    }

    /// Numeric field
    pub const fn numeric(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            decoder: Some(Decoder::Numeric),
        }
    }

    /// Timestamp field
    pub const fn timestamp(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            decoder: Some(Decoder::Timestamp),
        }
    }

    /// Composite field decoded through the `datatype` table
    pub const fn composite(name: &'static str, index: usize, datatype: &'static str) -> Self {
        Self {
            name,
            index,
            decoder: Some(Decoder::Composite(Cow::Borrowed(datatype))),
        }
    }

    /// Field with an arbitrary decoder
    pub const fn with_decoder(name: &'static str, index: usize, decoder: Decoder) -> Self {
        Self {
            name,
            index,
            decoder: Some(decoder),
        }
    }
}

/// A resolved field entry: name, position and optional decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub index: usize,
    pub decoder: Option<Decoder>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, index: usize, decoder: Option<Decoder>) -> Self {
        Self {
            name: name.into(),
            index,
            decoder,
        }
    }
}

impl From<&StaticField> for FieldDef {
    fn from(field: &StaticField) -> Self {
        Self {
            name: field.name.to_string(),
            index: field.index,
            decoder: field.decoder.clone(),
        }
    }
}

/// Field table for one segment code or composite datatype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    code: String,
    fields: Vec<FieldDef>,
    by_name: HashMap<String, usize>,
}

impl FieldTable {
    /// Create an empty table
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            fields: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Build a table from compiled-in entries
    pub fn from_static(code: &str, fields: &[StaticField]) -> Self {
        let mut table = Self::new(code);
        for field in fields {
            table.insert(FieldDef::from(field));
        }
        table
    }

    /// Add a field, replacing any existing entry with the same name in place
    pub fn insert(&mut self, field: FieldDef) {
        if let Some(&slot) = self.by_name.get(&field.name) {
            self.fields[slot] = field;
        } else {
            self.by_name.insert(field.name.clone(), self.fields.len());
            self.fields.push(field);
        }
    }

    /// Merge every field of `other` into this table
    pub fn merge(&mut self, other: FieldTable) {
        for field in other.fields {
            self.insert(field);
        }
    }

    /// Segment code or datatype code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&slot| &self.fields[slot])
    }

    /// First field declared at a position
    pub fn field_at(&self, index: usize) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.index == index)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All segment and composite tables of one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSchema {
    version: Version,
    segments: HashMap<String, FieldTable>,
    composites: HashMap<String, FieldTable>,
}

impl VersionSchema {
    /// Create an empty schema
    pub fn new(version: Version) -> Self {
        Self {
            version,
            segments: HashMap::new(),
            composites: HashMap::new(),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Segment table for a segment code
    pub fn segment(&self, code: &str) -> Result<&FieldTable> {
        self.segments
            .get(code)
            .ok_or_else(|| Error::UnknownSegment {
                version: self.version,
                code: code.to_string(),
            })
    }

    /// Composite table for a datatype code
    pub fn composite(&self, code: &str) -> Result<&FieldTable> {
        self.composites
            .get(code)
            .ok_or_else(|| Error::UnknownComposite {
                version: self.version,
                code: code.to_string(),
            })
    }

    pub fn has_segment(&self, code: &str) -> bool {
        self.segments.contains_key(code)
    }

    /// Segment codes, sorted
    pub fn segment_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.segments.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Composite datatype codes, sorted
    pub fn composite_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.composites.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Add a segment table, merging into an existing one with the same code
    pub fn insert_segment(&mut self, table: FieldTable) {
        merge_into(&mut self.segments, table);
    }

    /// Add a composite table, merging into an existing one with the same code
    pub fn insert_composite(&mut self, table: FieldTable) {
        merge_into(&mut self.composites, table);
    }
}

fn merge_into(tables: &mut HashMap<String, FieldTable>, table: FieldTable) {
    match tables.get_mut(table.code()) {
        Some(existing) => existing.merge(table),
        None => {
            tables.insert(table.code().to_string(), table);
        }
    }
}

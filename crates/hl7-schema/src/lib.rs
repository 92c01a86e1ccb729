#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hl7-schema
//!
//! Version-keyed HL7 v2 field tables.
//!
//! For each supported version the registry maps a segment code to a table of
//! `field name -> (index, decoder)` entries, plus a separate table per
//! composite datatype. Built-in tables ship with the crate; JSON or YAML
//! overlays can add or replace tables before the registry is frozen.

pub mod loader;
pub mod model;
pub mod registry;
pub mod tables;

pub use loader::{SchemaFile, SchemaLoader, normalize_field_name};
pub use model::{Decoder, FieldDef, FieldTable, StaticField, Version, VersionSchema};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown HL7 version: {0}")]
    UnknownVersion(String),

    #[error("No {code} segment table for HL7 v{version}")]
    UnknownSegment { version: Version, code: String },

    #[error("No {code} composite table for HL7 v{version}")]
    UnknownComposite { version: Version, code: String },

    #[error("Invalid schema format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hl7-parser
//!
//! HL7 v2 parser, serializer and XML envelope handling.
//!
//! The parser reads the field and component separators out of the message's
//! own header, builds a delimiter plan from them and recursively splits the
//! text into an [`hl7_ir::Document`]. Rendering the tree reproduces the
//! trimmed input exactly.

pub mod envelopes;
pub mod parser;
pub mod serializer;
pub mod syntax;

pub use envelopes::{EnvelopeConfig, EnvelopeMessage, EnvelopeReader, extract_messages};
pub use parser::{Hl7Parser, ParserConfig, parse, split};
pub use serializer::{Hl7Serializer, SerializerConfig};
pub use syntax::{DelimiterPlan, PlanLevel, SEGMENT_TERMINATOR};

use thiserror::Error;

/// Errors that can occur when parsing or serializing HL7 text
#[derive(Error, Debug)]
pub enum Error {
    #[error("Message too short to contain a header: {length} characters")]
    TooShort { length: usize },

    #[error("Missing MSH header segment, found '{found}'")]
    MissingHeader { found: String },

    #[error("Delimiter plan has {separators} separators for {kinds} container kinds")]
    PlanMismatch { separators: usize, kinds: usize },

    #[error("Envelope error: {0}")]
    Envelope(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

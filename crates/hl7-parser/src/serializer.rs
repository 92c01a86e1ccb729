//! HL7 v2 serializer

use crate::Result;
use crate::syntax::SEGMENT_TERMINATOR;
use hl7_ir::Document;
use std::io::Write;

/// Serializer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Character written between segments
    pub segment_terminator: char,

    /// Also terminate the last segment
    pub trailing_terminator: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            segment_terminator: SEGMENT_TERMINATOR,
            trailing_terminator: false,
        }
    }
}

impl SerializerConfig {
    /// Wire form: every segment terminated by a carriage return
    pub fn wire() -> Self {
        Self {
            segment_terminator: '\r',
            trailing_terminator: true,
        }
    }
}

/// Serializer for parsed HL7 documents
#[derive(Debug, Clone, Default)]
pub struct Hl7Serializer {
    config: SerializerConfig,
}

impl Hl7Serializer {
    /// Create a serializer producing the parser's own text form
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with explicit settings
    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Render a document to text
    pub fn serialize(&self, document: &Document) -> String {
        let mut out = String::new();
        for (i, segment) in document.root.iter().enumerate() {
            if i > 0 {
                out.push(self.config.segment_terminator);
            }
            out.push_str(&segment.render());
        }
        if self.config.trailing_terminator && !document.root.is_empty() {
            out.push(self.config.segment_terminator);
        }
        out
    }

    /// Render a document into a writer
    pub fn write_to<W: Write>(&self, document: &Document, writer: &mut W) -> Result<()> {
        writer.write_all(self.serialize(document).as_bytes())?;
        Ok(())
    }
}

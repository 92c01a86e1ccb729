//! Parsed message document
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use crate::metadata::SourceInfo;
use crate::node::Container;
use serde::{Deserialize, Serialize};

/// A parsed HL7 message: the message container plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Message-level container, children are segments
    pub root: Container,

    /// Message-level metadata
    pub metadata: DocumentMetadata,
}

/// Metadata associated with a parsed message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Where the text came from
    pub source: Option<SourceInfo>,

    /// Version hint (e.g. from an XML envelope), takes precedence over MSH-12
    pub version: Option<String>,

    /// Message identifier (envelope id or MSH-10)
    pub message_id: Option<String>,

    /// When the message was parsed
    pub parsed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Document {
    /// Create a new document around a message container
    pub fn new(root: Container) -> Self {
        Self {
            root,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Create a new document with metadata
    pub fn with_metadata(root: Container, metadata: DocumentMetadata) -> Self {
        Self { root, metadata }
    }

    /// Set the version hint
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.metadata.version = Some(version.into());
        self
    }

    /// Segment containers in message order
    pub fn segments(&self) -> impl Iterator<Item = &Container> {
        self.root.iter().filter_map(|node| node.as_container())
    }

    /// Segment at a zero-based position
    pub fn segment(&self, position: usize) -> Option<&Container> {
        self.root.container(position)
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.root.len()
    }

    /// Render the message back to text
    pub fn render(&self) -> String {
        self.root.render()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root, f)
    }
}

#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # hl7-ir
//!
//! Container tree and traversal APIs for HL7 v2 messages.
//!
//! A parsed message is a tree of containers (message, segment, field) whose
//! leaves are the raw strings between delimiters. Every container remembers
//! the separator it was split on, so rendering a node joins its children back
//! into the exact text that produced it.

/// Document container and message-level metadata.
pub mod document;
/// Source metadata attached to documents.
pub mod metadata;
/// Core tree node model.
pub mod node;
/// Segment lookup, cursor paths and visitor traversal.
pub mod traversal;

/// Primary parsed-message type.
pub use document::{Document, DocumentMetadata};
/// Where a document came from.
pub use metadata::SourceInfo;
/// Node primitives for tree structure.
pub use node::{Container, Node, NodeType};
/// Segment index and traversal entry points.
pub use traversal::{Cursor, SegmentRef, Traversal, segment_of, segments_of, walk};

use thiserror::Error;

/// Errors that can occur when navigating the tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Segment not found: {code}")]
    SegmentNotFound { code: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Index {index} out of range at '{path}'")]
    IndexOutOfRange { path: String, index: usize },
}

impl Error {
    /// Build a segment-not-found error for a segment code.
    pub fn segment_not_found(code: impl Into<String>) -> Self {
        Self::SegmentNotFound { code: code.into() }
    }

    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build an out-of-range error for a positional step.
    pub fn index_out_of_range(path: impl Into<String>, index: usize) -> Self {
        Self::IndexOutOfRange {
            path: path.into(),
            index,
        }
    }
}

/// Crate-local result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Source metadata for parsed messages
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use serde::{Deserialize, Serialize};

/// Information about where a message came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source file path or identifier
    pub source: String,

    /// Additional context (e.g. envelope message id)
    pub context: Option<String>,
}

impl SourceInfo {
    /// Create source info for a file or stream name
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            context: None,
        }
    }

    /// Attach extra context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl std::fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} ({context})", self.source),
            None => f.write_str(&self.source),
        }
    }
}

//! HL7 v2 message parser
//!
//! Parsing is a single recursive split of the whole message text: on the
//! segment terminator, then on the field separator, then on the component
//! separator. Empty pieces between consecutive separators are kept so that
//! positional field indexes stay aligned.

use crate::syntax::{DelimiterPlan, HEADER_CODE, PlanLevel, normalize_line_endings};
use crate::{Error, Result};
use hl7_ir::{Container, Document, DocumentMetadata, Node, SourceInfo};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Index of MSH-10 (message control id) among the header's children
const MESSAGE_CONTROL_ID: usize = 9;

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Reject text that does not start with the `MSH` segment
    pub require_header: bool,

    /// Convert CR / CRLF to the segment terminator before splitting
    pub normalize_line_endings: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_header: true,
            normalize_line_endings: false,
        }
    }
}

/// Split `text` against the remaining plan levels.
///
/// An exhausted plan yields the text itself as a leaf.
pub fn split(text: &str, plan: &[PlanLevel]) -> Node {
    match plan.split_first() {
        None => Node::Leaf(text.to_string()),
        Some((level, rest)) => Node::Container(split_level(text, *level, rest)),
    }
}

fn split_level(text: &str, level: PlanLevel, rest: &[PlanLevel]) -> Container {
    let children = text
        .split(level.separator)
        .map(|piece| split(piece, rest))
        .collect();
    Container::new(level.node_type, level.separator, children)
}

/// Parser for single HL7 v2 messages
#[derive(Debug, Clone, Default)]
pub struct Hl7Parser {
    config: ParserConfig,
}

impl Hl7Parser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit settings
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one message
    pub fn parse(&self, text: &str) -> Result<Document> {
        self.parse_message(text, None)
    }

    /// Parse one message and record where it came from
    pub fn parse_with_source(&self, text: &str, source: SourceInfo) -> Result<Document> {
        self.parse_message(text, Some(source))
    }

    fn parse_message(&self, text: &str, source: Option<SourceInfo>) -> Result<Document> {
        let text = if self.config.normalize_line_endings {
            normalize_line_endings(text)
        } else {
            Cow::Borrowed(text)
        };
        let trimmed = text.trim();

        let plan = DelimiterPlan::from_message(trimmed)?;

        if self.config.require_header && !trimmed.starts_with(HEADER_CODE) {
            return Err(Error::MissingHeader {
                found: trimmed.chars().take(HEADER_CODE.len()).collect(),
            });
        }

        let (level, rest) = plan
            .levels()
            .split_first()
            .ok_or(Error::PlanMismatch {
                separators: 0,
                kinds: 0,
            })?;
        let root = split_level(trimmed, *level, rest);

        for (position, segment) in root.iter().enumerate() {
            trace!(
                position,
                code = segment.first_leaf().unwrap_or_default(),
                "Split segment"
            );
        }

        let metadata = DocumentMetadata {
            source,
            version: None,
            message_id: control_id(&root),
            parsed_at: Some(chrono::Utc::now()),
        };

        debug!(
            segments = root.len(),
            message_id = metadata.message_id.as_deref().unwrap_or_default(),
            "Parsed HL7 message"
        );

        Ok(Document::with_metadata(root, metadata))
    }
}

fn control_id(root: &Container) -> Option<String> {
    let header = root.container(0)?;
    if header.code() != Some(HEADER_CODE) {
        return None;
    }
    header
        .container(MESSAGE_CONTROL_ID)
        .map(Container::render)
        .filter(|id| !id.is_empty())
}

/// Parse one message with default settings
pub fn parse(text: &str) -> Result<Document> {
    Hl7Parser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_ir::NodeType;

    const SAMPLE: &str = "MSH|^~\\&|LAB|FAC|||200202150930||ORU^R01|CNTRL-3456|P|2.4\n\
                          PID|||555-44-4444||EVERYWOMAN^EVE^E^^^^L\n\
                          OBX|1|SN|1554-5^GLUCOSE^POST 12H CFST:MCNC:PT:SER/PLAS:QN||^182|mg/dl|70_105|H|||F";

    #[test]
    fn test_split_exhausted_plan_is_leaf() {
        assert_eq!(split("abc", &[]), Node::leaf("abc"));
    }

    #[test]
    fn test_split_preserves_empty_pieces() {
        let plan = DelimiterPlan::from_message("MSH|^~\\&").unwrap();
        let node = split("A||B^", &plan.levels()[1..]);
        let segment = node.as_container().unwrap();

        assert_eq!(segment.node_type(), NodeType::Segment);
        assert_eq!(segment.len(), 3);
        assert!(segment.container(1).unwrap().is_blank());
        assert_eq!(segment.container(2).unwrap().len(), 2);
        assert_eq!(node.render(), "A||B^");
    }

    #[test]
    fn test_parse_tree_shape() {
        let doc = parse(SAMPLE).unwrap();

        assert_eq!(doc.root.node_type(), NodeType::Message);
        assert_eq!(doc.segment_count(), 3);

        let obx = doc.segment(2).unwrap();
        assert_eq!(obx.code(), Some("OBX"));
        assert_eq!(obx.container(3).unwrap().len(), 3);

        let result = obx.container(5).unwrap();
        assert_eq!(result.leaf(0), Some(""));
        assert_eq!(result.leaf(1), Some("182"));
    }

    #[test]
    fn test_parse_round_trip_after_trim() {
        let padded = format!("  \n{SAMPLE}\n\n");
        let doc = parse(&padded).unwrap();

        assert_eq!(doc.render(), SAMPLE);
    }

    #[test]
    fn test_parse_metadata() {
        let doc = Hl7Parser::new()
            .parse_with_source(SAMPLE, SourceInfo::new("sample.hl7"))
            .unwrap();

        assert_eq!(doc.metadata.message_id.as_deref(), Some("CNTRL-3456"));
        assert_eq!(doc.metadata.version, None);
        assert_eq!(doc.metadata.source.unwrap().source, "sample.hl7");
        assert!(doc.metadata.parsed_at.is_some());
    }

    #[test]
    fn test_parse_missing_header() {
        let err = parse("PID|1||555").unwrap_err();
        assert!(matches!(err, Error::MissingHeader { ref found } if found == "PID"));

        let lenient = Hl7Parser::with_config(ParserConfig {
            require_header: false,
            ..ParserConfig::default()
        });
        let doc = lenient.parse("PID|1||555").unwrap();
        assert_eq!(doc.segment(0).unwrap().code(), Some("PID"));
        assert_eq!(doc.metadata.message_id, None);
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(parse("MSH"), Err(Error::TooShort { length: 3 })));
        assert!(matches!(parse("   "), Err(Error::TooShort { length: 0 })));
    }

    #[test]
    fn test_parse_normalizes_line_endings_when_configured() {
        let text = "MSH|^~\\&|LAB\r\nPID|1\rOBX|1";

        let raw = parse(text).unwrap();
        assert_eq!(raw.segment_count(), 2);

        let parser = Hl7Parser::with_config(ParserConfig {
            normalize_line_endings: true,
            ..ParserConfig::default()
        });
        let doc = parser.parse(text).unwrap();
        assert_eq!(doc.segment_count(), 3);
        assert_eq!(doc.render(), "MSH|^~\\&|LAB\nPID|1\nOBX|1");
    }
}

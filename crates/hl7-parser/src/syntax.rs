//! HL7 delimiter handling
//!
//! An HL7 v2 message declares its own separators: the character right after
//! the `MSH` code is the field separator and the next one is the component
//! separator (first character of MSH-2). The segment terminator is fixed.

use crate::{Error, Result};
use hl7_ir::NodeType;
use std::borrow::Cow;

/// Segment terminator used by the splitter
pub const SEGMENT_TERMINATOR: char = '\n';

/// Code of the mandatory header segment
pub const HEADER_CODE: &str = "MSH";

/// Offset of the field separator in the raw message
const FIELD_SEPARATOR_OFFSET: usize = 3;

/// Offset of the component separator in the raw message
const COMPONENT_SEPARATOR_OFFSET: usize = 4;

/// One level of a delimiter plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLevel {
    /// Separator to split on at this level
    pub separator: char,
    /// Container kind produced at this level
    pub node_type: NodeType,
}

/// Ordered separators, outermost first, paired with the container kinds they produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterPlan {
    levels: Vec<PlanLevel>,
}

impl DelimiterPlan {
    /// Pair separators with container kinds; both lists must have the same length
    pub fn new(separators: &[char], kinds: &[NodeType]) -> Result<Self> {
        if separators.len() != kinds.len() {
            return Err(Error::PlanMismatch {
                separators: separators.len(),
                kinds: kinds.len(),
            });
        }

        Ok(Self {
            levels: separators
                .iter()
                .zip(kinds)
                .map(|(&separator, &node_type)| PlanLevel {
                    separator,
                    node_type,
                })
                .collect(),
        })
    }

    /// Build the message/segment/field plan from the message's own header bytes
    pub fn from_message(text: &str) -> Result<Self> {
        let field = text.chars().nth(FIELD_SEPARATOR_OFFSET);
        let component = text.chars().nth(COMPONENT_SEPARATOR_OFFSET);
        let (Some(field), Some(component)) = (field, component) else {
            return Err(Error::TooShort {
                length: text.chars().count(),
            });
        };

        Self::new(
            &[SEGMENT_TERMINATOR, field, component],
            &[NodeType::Message, NodeType::Segment, NodeType::Field],
        )
    }

    /// Append an inner level (e.g. sub-components under components)
    #[must_use]
    pub fn with_level(mut self, separator: char, node_type: NodeType) -> Self {
        self.levels.push(PlanLevel {
            separator,
            node_type,
        });
        self
    }

    /// Plan levels, outermost first
    pub fn levels(&self) -> &[PlanLevel] {
        &self.levels
    }

    /// Separator for a given container kind
    pub fn separator_for(&self, node_type: NodeType) -> Option<char> {
        self.levels
            .iter()
            .find(|level| level.node_type == node_type)
            .map(|level| level.separator)
    }

    /// Field separator (splits segments)
    pub fn field_separator(&self) -> Option<char> {
        self.separator_for(NodeType::Segment)
    }

    /// Component separator (splits fields)
    pub fn component_separator(&self) -> Option<char> {
        self.separator_for(NodeType::Field)
    }
}

/// Convert CR and CRLF line endings to the segment terminator
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_message() {
        let plan = DelimiterPlan::from_message("MSH|^~\\&|LAB").unwrap();

        assert_eq!(plan.levels().len(), 3);
        assert_eq!(plan.levels()[0].separator, '\n');
        assert_eq!(plan.levels()[0].node_type, NodeType::Message);
        assert_eq!(plan.field_separator(), Some('|'));
        assert_eq!(plan.component_separator(), Some('^'));
    }

    #[test]
    fn test_plan_reads_declared_separators() {
        let plan = DelimiterPlan::from_message("MSH*#~\\&").unwrap();

        assert_eq!(plan.field_separator(), Some('*'));
        assert_eq!(plan.component_separator(), Some('#'));
    }

    #[test]
    fn test_plan_too_short() {
        let err = DelimiterPlan::from_message("MSH|").unwrap_err();
        assert!(matches!(err, Error::TooShort { length: 4 }));

        let err = DelimiterPlan::from_message("").unwrap_err();
        assert!(matches!(err, Error::TooShort { length: 0 }));
    }

    #[test]
    fn test_plan_length_mismatch() {
        let err = DelimiterPlan::new(&['\n', '|'], &[NodeType::Message]).unwrap_err();
        assert!(matches!(
            err,
            Error::PlanMismatch {
                separators: 2,
                kinds: 1
            }
        ));
    }

    #[test]
    fn test_plan_with_component_level() {
        let plan = DelimiterPlan::from_message("MSH|^~\\&")
            .unwrap()
            .with_level('&', NodeType::Component);

        assert_eq!(plan.levels().len(), 4);
        assert_eq!(plan.separator_for(NodeType::Component), Some('&'));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("A\r\nB\rC\nD"), "A\nB\nC\nD");
        assert!(matches!(normalize_line_endings("A\nB"), Cow::Borrowed(_)));
    }
}

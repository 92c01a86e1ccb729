//! Schema-driven field access
//!
//! A [`SegmentAccessor`] is a short-lived view of one segment of a parsed
//! message. Field names resolve through the accessor-local override table
//! first and the version's segment table second; the resulting index picks a
//! field out of the tree and the registered decoder, if any, turns it into a
//! [`FieldValue`].

use crate::decoders::{PartialTimestamp, ValueType, decode_numeric, decode_timestamp};
use crate::overrides::{self, VALUE_TYPE_FIELD};
use crate::{Error, Result};
use hl7_ir::{Container, Document, Node};
use hl7_schema::{Decoder, FieldTable, VersionSchema};
use std::fmt;
use tracing::trace;

/// Separator assumed when a single component is viewed as a composite
const COMPONENT_SEPARATOR: char = '^';

/// A resolved field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Plain text, never empty
    Text(&'a str),

    /// Numeric decoder output
    Number(f64),

    /// Timestamp decoder output
    Timestamp(PartialTimestamp),

    /// OBX value type code
    ValueType(ValueType),

    /// Multi-component field or composite datatype view
    Composite(FieldAccessor<'a>),
}

impl<'a> FieldValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(text) => Some(*text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<PartialTimestamp> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<FieldAccessor<'a>> {
        match self {
            FieldValue::Composite(composite) => Some(*composite),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Timestamp(ts) => fmt::Display::fmt(ts, f),
            FieldValue::ValueType(value_type) => fmt::Display::fmt(value_type, f),
            FieldValue::Composite(composite) => fmt::Display::fmt(composite, f),
        }
    }
}

/// Collapse a raw field: nothing or one empty component is `None`, one
/// component is its text, several stay a positional composite view.
pub fn fieldcheck<'a>(node: &'a Node, schema: &'a VersionSchema) -> Option<FieldValue<'a>> {
    match node {
        Node::Leaf(text) => (!text.is_empty()).then_some(FieldValue::Text(text)),
        Node::Container(field) => match field.children() {
            [] => None,
            [only] => only
                .first_leaf()
                .filter(|text| !text.is_empty())
                .map(FieldValue::Text),
            components => Some(FieldValue::Composite(FieldAccessor {
                components,
                separator: field.separator(),
                table: None,
                schema,
            })),
        },
    }
}

fn is_blank(node: &Node) -> bool {
    match node {
        Node::Leaf(text) => text.is_empty(),
        Node::Container(container) => container.is_blank(),
    }
}

/// Component view of a field, optionally typed by a composite table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldAccessor<'a> {
    components: &'a [Node],
    separator: char,
    table: Option<&'a FieldTable>,
    schema: &'a VersionSchema,
}

impl<'a> FieldAccessor<'a> {
    /// View `node` through a composite table; a lone leaf becomes a single
    /// component
    pub fn over(node: &'a Node, table: Option<&'a FieldTable>, schema: &'a VersionSchema) -> Self {
        match node {
            Node::Container(field) => Self {
                components: field.children(),
                separator: field.separator(),
                table,
                schema,
            },
            Node::Leaf(_) => Self {
                components: std::slice::from_ref(node),
                separator: COMPONENT_SEPARATOR,
                table,
                schema,
            },
        }
    }

    /// Composite datatype code, `None` for an untyped view
    pub fn datatype(&self) -> Option<&'a str> {
        self.table.map(FieldTable::code)
    }

    /// Component text at a zero-based index, `None` if absent or empty
    pub fn component(&self, index: usize) -> Option<&'a str> {
        self.components
            .get(index)
            .and_then(Node::first_leaf)
            .filter(|text| !text.is_empty())
    }

    /// Raw component texts, empty ones included
    pub fn components(self) -> impl Iterator<Item = &'a str> {
        self.components
            .iter()
            .map(|node| node.first_leaf().unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Names of the composite table, empty for an untyped view
    pub fn field_names(&self) -> Vec<&'a str> {
        self.table
            .map(|table| table.names().collect())
            .unwrap_or_default()
    }

    /// Resolve a component by its composite table name
    pub fn get(&self, name: &str) -> Result<Option<FieldValue<'a>>> {
        let table = self.table.ok_or_else(|| Error::UnknownField {
            table: "untyped composite".to_string(),
            name: name.to_string(),
        })?;
        let def = table.field(name).ok_or_else(|| Error::UnknownField {
            table: table.code().to_string(),
            name: name.to_string(),
        })?;

        let Some(node) = self.components.get(def.index) else {
            return Ok(None);
        };
        let text = node.first_leaf().unwrap_or_default();
        if text.is_empty() {
            return Ok(None);
        }

        let value = match &def.decoder {
            Some(Decoder::Numeric) => FieldValue::Number(decode_numeric(text)?),
            Some(Decoder::Timestamp) => FieldValue::Timestamp(decode_timestamp(text)?),
            Some(Decoder::Composite(code)) => FieldValue::Composite(FieldAccessor::over(
                node,
                Some(self.schema.composite(code)?),
                self.schema,
            )),
            Some(Decoder::ValueType | Decoder::ObservationValue) | None => FieldValue::Text(text),
        };
        Ok(Some(value))
    }

    /// Render back to delimited text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldAccessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.separator)?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// Read-only view of one segment bound to a version schema
#[derive(Debug, Clone, Copy)]
pub struct SegmentAccessor<'a> {
    pub(crate) document: &'a Document,
    pub(crate) schema: &'a VersionSchema,
    pub(crate) position: usize,
    pub(crate) segment: &'a Container,
}

impl<'a> SegmentAccessor<'a> {
    /// Accessor for the segment at `position`, if there is one
    pub fn at(document: &'a Document, schema: &'a VersionSchema, position: usize) -> Option<Self> {
        let segment = document.segment(position)?;
        Some(Self {
            document,
            schema,
            position,
            segment,
        })
    }

    /// Segment code
    pub fn code(&self) -> &'a str {
        self.segment.code().unwrap_or_default()
    }

    /// Position among all segments of the message
    pub fn position(&self) -> usize {
        self.position
    }

    /// The underlying segment container
    pub fn segment(&self) -> &'a Container {
        self.segment
    }

    /// Schema this accessor resolves names against
    pub fn schema(&self) -> &'a VersionSchema {
        self.schema
    }

    /// Raw segment text
    pub fn raw(&self) -> String {
        self.segment.render()
    }

    /// Number of fields, the segment code included
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Undecoded field by position, collapsed like a named field without a
    /// decoder
    pub fn field(&self, index: usize) -> Option<FieldValue<'a>> {
        self.segment
            .get(index)
            .and_then(|node| fieldcheck(node, self.schema))
    }

    /// Resolve a field by name
    pub fn get(&self, name: &str) -> Result<Option<FieldValue<'a>>> {
        let (index, decoder) = self.resolve(name)?;
        trace!(segment = self.code(), name, index, "Resolved field");

        let Some(node) = self.segment.get(index) else {
            return Ok(None);
        };
        self.decode(node, decoder.as_ref())
    }

    /// Resolve a field by name and render it, `None` when absent
    pub fn text(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(name)?.map(|value| value.to_string()))
    }

    /// Names this segment answers to: overrides first, then the version table
    pub fn field_names(&self) -> Result<Vec<&'a str>> {
        let mut names: Vec<&'a str> = overrides::overrides_for(self.code())
            .iter()
            .map(|field| field.name)
            .collect();
        for name in self.schema.segment(self.code())?.names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn resolve(&self, name: &str) -> Result<(usize, Option<Decoder>)> {
        if let Some(field) = overrides::lookup(self.code(), name) {
            return Ok((field.index, field.decoder.clone()));
        }

        let table = self.schema.segment(self.code())?;
        let def = table.field(name).ok_or_else(|| Error::UnknownField {
            table: self.code().to_string(),
            name: name.to_string(),
        })?;
        Ok((def.index, def.decoder.clone()))
    }

    fn decode(&self, node: &'a Node, decoder: Option<&Decoder>) -> Result<Option<FieldValue<'a>>> {
        let Some(decoder) = decoder else {
            return Ok(fieldcheck(node, self.schema));
        };
        if is_blank(node) {
            return Ok(None);
        }

        let value = match decoder {
            Decoder::Numeric => FieldValue::Number(decode_numeric(&node.render())?),
            Decoder::Timestamp => {
                FieldValue::Timestamp(decode_timestamp(node.first_leaf().unwrap_or_default())?)
            }
            Decoder::Composite(code) => FieldValue::Composite(FieldAccessor::over(
                node,
                Some(self.schema.composite(code)?),
                self.schema,
            )),
            Decoder::ValueType => FieldValue::ValueType(self.value_type()?),
            Decoder::ObservationValue => {
                let value_type = self.value_type()?;
                trace!(%value_type, position = self.position, "Dispatching observation value");
                return self.decode(node, value_type.decoder().as_ref());
            }
        };
        Ok(Some(value))
    }

    /// Value type declared in OBX-2
    pub fn value_type(&self) -> Result<ValueType> {
        let code = self
            .segment
            .get(VALUE_TYPE_FIELD)
            .and_then(Node::first_leaf)
            .unwrap_or_default()
            .trim();
        ValueType::from_code(code).ok_or_else(|| Error::UnknownValueType {
            code: code.to_string(),
            segment: self.raw(),
        })
    }
}

impl fmt::Display for SegmentAccessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.segment, f)
    }
}

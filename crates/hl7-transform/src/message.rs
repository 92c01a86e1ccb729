//! Message facade
//!
//! Binds a parsed [`Document`] to the schema of its HL7 version and hands
//! out [`SegmentAccessor`]s for the segments callers usually want.

use crate::accessor::SegmentAccessor;
use crate::navigation::{OBR, OBX, ORC, filler_order_id};
use crate::overrides::FILLER_ORDER_FIELD;
use crate::{Error, Result};
use hl7_ir::{Container, Document, segments_of};
use hl7_schema::{SchemaRegistry, Version, VersionSchema};
use tracing::debug;

const HEADER: &str = "MSH";
const PATIENT: &str = "PID";

/// Index of MSH-12 (version id) among the header's children
const VERSION_FIELD: usize = 11;

/// A parsed message bound to one version schema
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    document: &'a Document,
    schema: &'a VersionSchema,
}

impl<'a> Message<'a> {
    /// Bind a document to an explicit schema
    pub fn new(document: &'a Document, schema: &'a VersionSchema) -> Self {
        Self { document, schema }
    }

    /// Bind a document to the schema of its declared version.
    ///
    /// The metadata version (set from an envelope) wins over MSH-12.
    pub fn from_document(document: &'a Document, registry: &'a SchemaRegistry) -> Result<Self> {
        let version = declared_version(document)?;
        debug!(
            %version,
            message_id = document.metadata.message_id.as_deref().unwrap_or_default(),
            "Binding message to schema"
        );
        Ok(Self::new(document, registry.get(version)?))
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn schema(&self) -> &'a VersionSchema {
        self.schema
    }

    pub fn version(&self) -> Version {
        self.schema.version()
    }

    /// Segment at a position
    pub fn segment_at(&self, position: usize) -> Option<SegmentAccessor<'a>> {
        SegmentAccessor::at(self.document, self.schema, position)
    }

    /// All segments with a code, in message order
    pub fn segments_of(&self, code: &str) -> Vec<SegmentAccessor<'a>> {
        segments_of(self.document, code)
            .into_iter()
            .filter_map(|found| self.segment_at(found.position))
            .collect()
    }

    /// First segment with a code
    pub fn segment_of(&self, code: &str) -> Option<SegmentAccessor<'a>> {
        self.segments_of(code).into_iter().next()
    }

    /// Message header (MSH)
    pub fn header(&self) -> Result<SegmentAccessor<'a>> {
        self.segment_of(HEADER).ok_or_else(|| Error::MissingSegment {
            code: HEADER.to_string(),
        })
    }

    /// Patient identification (PID)
    pub fn patient(&self) -> Option<SegmentAccessor<'a>> {
        self.segment_of(PATIENT)
    }

    /// Common orders (ORC)
    pub fn orders(&self) -> Vec<SegmentAccessor<'a>> {
        self.segments_of(ORC)
    }

    /// Observation requests (OBR)
    pub fn requests(&self) -> Vec<SegmentAccessor<'a>> {
        self.segments_of(OBR)
    }

    /// Observation results (OBX)
    pub fn observations(&self) -> Vec<SegmentAccessor<'a>> {
        self.segments_of(OBX)
    }

    /// ORC whose filler order number matches `id` (whole field or first
    /// component)
    pub fn order_by_id(&self, id: &str) -> Option<SegmentAccessor<'a>> {
        self.find_by_filler_id(ORC, id)
    }

    /// OBR whose filler order number matches `id`
    pub fn request_by_id(&self, id: &str) -> Option<SegmentAccessor<'a>> {
        self.find_by_filler_id(OBR, id)
    }

    fn find_by_filler_id(&self, code: &str, id: &str) -> Option<SegmentAccessor<'a>> {
        if id.is_empty() {
            return None;
        }
        self.segments_of(code).into_iter().find(|candidate| {
            let segment = candidate.segment();
            filler_order_id(segment).as_deref() == Some(id)
                || segment
                    .container(FILLER_ORDER_FIELD)
                    .and_then(Container::first_leaf)
                    == Some(id)
        })
    }
}

/// Version declared by the envelope metadata or MSH-12
pub fn declared_version(document: &Document) -> Result<Version> {
    if let Some(version) = &document.metadata.version {
        return Ok(version.parse()?);
    }

    let header = document
        .segment(0)
        .filter(|segment| segment.code() == Some(HEADER))
        .ok_or_else(|| Error::MissingSegment {
            code: HEADER.to_string(),
        })?;
    let declared = header
        .container(VERSION_FIELD)
        .and_then(|field| field.first_leaf())
        .unwrap_or_default();
    Ok(declared.parse()?)
}

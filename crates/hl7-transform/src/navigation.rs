//! Cross-segment navigation
//!
//! HL7 v2 has no pointers between segments. Comments, parent orders and
//! result runs are found by scanning the message in order, working on
//! segment positions rather than on the segments themselves.

use crate::accessor::SegmentAccessor;
use crate::overrides::FILLER_ORDER_FIELD;
use hl7_ir::Container;
use tracing::trace;

pub const NTE: &str = "NTE";
pub const ORC: &str = "ORC";
pub const OBR: &str = "OBR";
pub const OBX: &str = "OBX";

/// Rendered filler order number of an ORC or OBR segment, `None` when blank
pub(crate) fn filler_order_id(segment: &Container) -> Option<String> {
    segment
        .container(FILLER_ORDER_FIELD)
        .filter(|field| !field.is_blank())
        .map(Container::render)
}

impl<'a> SegmentAccessor<'a> {
    fn sibling(&self, position: usize) -> Option<SegmentAccessor<'a>> {
        SegmentAccessor::at(self.document, self.schema, position)
    }

    /// Comment attached to this segment: the next segment, if it is an NTE
    pub fn nte(&self) -> Option<SegmentAccessor<'a>> {
        self.sibling(self.position + 1)
            .filter(|next| next.code() == NTE)
    }

    /// Order request (OBR) this segment belongs to
    pub fn obr(&self) -> Option<SegmentAccessor<'a>> {
        self.parent(OBR, ORC)
    }

    /// Common order (ORC) this segment belongs to
    pub fn orc(&self) -> Option<SegmentAccessor<'a>> {
        self.parent(ORC, OBR)
    }

    /// Results following this segment.
    ///
    /// The run is the contiguous block of OBX and NTE segments right after
    /// the segment; NTEs are skipped in the output. An ORC starts from its
    /// matching OBR.
    pub fn obx(&self) -> Vec<SegmentAccessor<'a>> {
        if self.code() == ORC {
            if let Some(request) = self.obr().filter(|request| request.position > self.position) {
                return request.obx();
            }
        }

        let mut results = Vec::new();
        let mut position = self.position + 1;
        while let Some(next) = self.sibling(position) {
            match next.code() {
                OBX => results.push(next),
                NTE => {}
                _ => break,
            }
            position += 1;
        }
        trace!(
            from = self.position,
            results = results.len(),
            "Collected result run"
        );
        results
    }

    /// Match on filler order number when this is the complementary segment
    /// type, otherwise take the nearest preceding `target`
    fn parent(&self, target: &str, complement: &str) -> Option<SegmentAccessor<'a>> {
        if self.code() == complement {
            if let Some(found) = self.matching_order(target) {
                return Some(found);
            }
        }
        self.preceding(target)
    }

    fn matching_order(&self, target: &str) -> Option<SegmentAccessor<'a>> {
        let id = filler_order_id(self.segment)?;
        let found = (0..self.document.segment_count())
            .filter_map(|position| self.sibling(position))
            .find(|candidate| {
                candidate.code() == target
                    && filler_order_id(candidate.segment).as_deref() == Some(id.as_str())
            });
        trace!(
            from = self.position,
            target,
            id = %id,
            found = ?found.map(|segment| segment.position),
            "Matched filler order number"
        );
        found
    }

    fn preceding(&self, target: &str) -> Option<SegmentAccessor<'a>> {
        (0..=self.position)
            .rev()
            .filter_map(|position| self.sibling(position))
            .find(|candidate| candidate.code() == target)
    }
}

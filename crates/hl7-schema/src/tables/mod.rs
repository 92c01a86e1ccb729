//! Built-in per-version tables
//!
//! Each version carries the segments of an observation result message:
//! `MSH`, `PID`, `ORC`, `OBR`, `OBX` and `NTE`, plus every composite those
//! fields reference. Other segments (`PV1`, `NK1`, `SPM`, site `Z` segments)
//! have no built-in table and report [`crate::Error::UnknownSegment`]; supply
//! them through an overlay file read by [`crate::SchemaLoader`].

pub mod v21;
pub mod v22;
pub mod v23;
pub mod v231;
pub mod v24;
pub mod v25;

use crate::model::{StaticField, Version};

/// Segment and composite tables for one version
pub struct StaticTables {
    pub segments: &'static [(&'static str, &'static [StaticField])],
    pub composites: &'static [(&'static str, &'static [StaticField])],
}

/// Built-in tables for a version
pub fn for_version(version: Version) -> StaticTables {
    let (segments, composites) = match version {
        Version::V21 => (v21::SEGMENTS, v21::COMPOSITES),
        Version::V22 => (v22::SEGMENTS, v22::COMPOSITES),
        Version::V23 => (v23::SEGMENTS, v23::COMPOSITES),
        Version::V231 => (v231::SEGMENTS, v231::COMPOSITES),
        Version::V24 => (v24::SEGMENTS, v24::COMPOSITES),
        Version::V25 => (v25::SEGMENTS, v25::COMPOSITES),
    };
    StaticTables {
        segments,
        composites,
    }
}

#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # hl7-transform
//!
//! Named field access over parsed HL7 v2 messages.
//!
//! A [`Message`] binds a parsed document to the schema of its version.
//! Segment accessors resolve field names to positions, decode values
//! (numbers, partial timestamps, composite datatypes, OBX observation
//! values) and walk the relationships between segments: a result's comment,
//! its parent order, an order's result run.

pub mod accessor;
pub mod decoders;
pub mod message;
pub mod navigation;
pub mod overrides;

pub use accessor::{FieldAccessor, FieldValue, SegmentAccessor, fieldcheck};
pub use decoders::{PartialTimestamp, ValueType, decode_numeric, decode_timestamp};
pub use message::{Message, declared_version};

use thiserror::Error;

/// Errors that can occur when resolving fields
#[derive(Error, Debug)]
pub enum Error {
    #[error("Message has no {code} segment")]
    MissingSegment { code: String },

    #[error(transparent)]
    Schema(#[from] hl7_schema::Error),

    #[error("No field named {name} in {table}")]
    UnknownField { table: String, name: String },

    #[error("Unhandled value type {code:?} in segment: {segment}")]
    UnknownValueType { code: String, segment: String },

    #[error("Cannot decode {value:?} as {expected}")]
    Decode {
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

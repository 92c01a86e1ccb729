//! Field decoders
//!
//! Pure functions from raw field text to typed values, plus the OBX value
//! type codes that select among them.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use hl7_schema::Decoder;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Parse a numeric (`NM`) value
pub fn decode_numeric(text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| Error::Decode {
        value: text.to_string(),
        expected: "numeric",
    })
}

/// A timestamp with whatever precision the message carried.
///
/// Missing trailing parts are zero. No calendar validation is done, so a day
/// of 52 is kept as sent; use [`PartialTimestamp::to_naive`] for a checked
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartialTimestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl PartialTimestamp {
    /// Calendar-checked date and time, `None` if the parts do not form one
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl fmt::Display for PartialTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Decode `YYYY[MM[DD[HH[MM[SS]]]]]`.
///
/// Anything after the leading digit run (fractional seconds, a UTC offset)
/// is ignored.
pub fn decode_timestamp(text: &str) -> Result<PartialTimestamp> {
    let text = text.trim();
    let invalid = || Error::Decode {
        value: text.to_string(),
        expected: "timestamp",
    };

    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let digits = &text[..end];
    if digits.len() < 4 || digits.len() > 14 || digits.len() % 2 != 0 {
        return Err(invalid());
    }

    let part = |start: usize| -> Result<u32> {
        match digits.get(start..start + 2) {
            Some(pair) => pair.parse().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    Ok(PartialTimestamp {
        year: digits[..4].parse().map_err(|_| invalid())?,
        month: part(4)?,
        day: part(6)?,
        hour: part(8)?,
        minute: part(10)?,
        second: part(12)?,
    })
}

/// OBX-2 value type codes understood by the observation value dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Numeric,
    StructuredNumeric,
    Date,
    Time,
    Timestamp,
    Text,
    String,
    FormattedText,
    CodedElement,
    CodedWithExceptions,
}

impl ValueType {
    /// Look up a value type code
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "NM" => ValueType::Numeric,
            "SN" => ValueType::StructuredNumeric,
            "DT" => ValueType::Date,
            "TM" => ValueType::Time,
            "TS" => ValueType::Timestamp,
            "TX" => ValueType::Text,
            "ST" => ValueType::String,
            "FT" => ValueType::FormattedText,
            "CE" => ValueType::CodedElement,
            "CWE" => ValueType::CodedWithExceptions,
            _ => return None,
        })
    }

    /// The HL7 code
    pub fn code(self) -> &'static str {
        match self {
            ValueType::Numeric => "NM",
            ValueType::StructuredNumeric => "SN",
            ValueType::Date => "DT",
            ValueType::Time => "TM",
            ValueType::Timestamp => "TS",
            ValueType::Text => "TX",
            ValueType::String => "ST",
            ValueType::FormattedText => "FT",
            ValueType::CodedElement => "CE",
            ValueType::CodedWithExceptions => "CWE",
        }
    }

    /// Decoder applied to an observation value of this type.
    ///
    /// Times of day stay text: a bare `HHMM` is not a partial timestamp.
    pub fn decoder(self) -> Option<Decoder> {
        match self {
            ValueType::Numeric => Some(Decoder::Numeric),
            ValueType::Date | ValueType::Timestamp => Some(Decoder::Timestamp),
            ValueType::StructuredNumeric => Some(Decoder::Composite(Cow::Borrowed("SN"))),
            ValueType::CodedElement => Some(Decoder::Composite(Cow::Borrowed("CE"))),
            ValueType::CodedWithExceptions => Some(Decoder::Composite(Cow::Borrowed("CWE"))),
            ValueType::Time | ValueType::Text | ValueType::String | ValueType::FormattedText => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

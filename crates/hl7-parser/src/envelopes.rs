//! XML envelope handling
//!
//! Batches of HL7 messages are often shipped inside an XML container:
//!
//! ```xml
//! <HL7Messages MessageFormat="ORUR01" Version="2.4">
//!   <Message MsgID="1">MSH|^~\&amp;|...</Message>
//! </HL7Messages>
//! ```
//!
//! The reader streams through the document and yields the character content
//! of every message element whose container declares a recognised format.

use crate::parser::Hl7Parser;
use crate::syntax::normalize_line_endings;
use crate::{Error, Result};
use hl7_ir::{Document, SourceInfo};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Element and attribute names understood by the envelope reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeConfig {
    /// Container element carrying `MessageFormat` and `Version`
    pub container_element: String,

    /// Element holding one message's text, with an optional `MsgID`
    pub message_element: String,

    /// Accepted `MessageFormat` values
    pub formats: Vec<String>,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            container_element: "HL7Messages".to_string(),
            message_element: "Message".to_string(),
            formats: vec!["ORUR01".to_string(), "ZLIL10".to_string()],
        }
    }
}

/// One message extracted from an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeMessage {
    /// `MsgID` attribute of the message element
    pub id: Option<String>,

    /// `Version` attribute of the container
    pub version: Option<String>,

    /// `MessageFormat` attribute of the container
    pub format: String,

    /// Message text with CR / CRLF normalised to the segment terminator
    pub text: String,
}

impl EnvelopeMessage {
    /// Parse the message text, carrying envelope attributes into the metadata
    pub fn parse(&self, parser: &Hl7Parser, source: &str) -> Result<Document> {
        let mut info = SourceInfo::new(source);
        if let Some(id) = &self.id {
            info = info.with_context(format!("MsgID {id}"));
        }

        let mut document = parser.parse_with_source(&self.text, info)?;
        if let Some(version) = &self.version {
            document.metadata.version = Some(version.clone());
        }
        if self.id.is_some() {
            document.metadata.message_id.clone_from(&self.id);
        }
        Ok(document)
    }
}

/// Streaming reader for XML message envelopes
#[derive(Debug, Clone, Default)]
pub struct EnvelopeReader {
    config: EnvelopeConfig,
}

struct Pending {
    id: Option<String>,
    text: String,
}

impl EnvelopeReader {
    /// Create a reader with the default element names and formats
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit settings
    pub fn with_config(config: EnvelopeConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Read and extract an envelope file
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<EnvelopeMessage>> {
        let xml = fs::read_to_string(path)?;
        self.extract(&xml)
    }

    /// Extract all messages of recognised formats, in document order
    pub fn extract(&self, xml: &str) -> Result<Vec<EnvelopeMessage>> {
        let container = self.config.container_element.as_bytes();
        let message = self.config.message_element.as_bytes();

        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut format: Option<String> = None;
        let mut version: Option<String> = None;
        let mut pending: Option<Pending> = None;
        let mut messages = Vec::new();
        let mut skipped = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == container => {
                    format = attribute(e, "MessageFormat")?;
                    version = attribute(e, "Version")?;
                    trace!(?format, ?version, "Entered envelope container");
                }
                Event::Start(ref e) if e.name().as_ref() == message => {
                    let id = attribute(e, "MsgID")?;
                    if self.is_recognized(format.as_deref()) {
                        pending = Some(Pending {
                            id,
                            text: String::new(),
                        });
                    } else {
                        warn!(
                            ?id,
                            format = format.as_deref().unwrap_or_default(),
                            "Skipping message with unrecognised format"
                        );
                        skipped += 1;
                    }
                }
                Event::Empty(ref e) if e.name().as_ref() == message => {
                    let id = attribute(e, "MsgID")?;
                    if self.is_recognized(format.as_deref()) {
                        warn!(?id, "Empty message element");
                        messages.push(EnvelopeMessage {
                            id,
                            version: version.clone(),
                            format: format.clone().unwrap_or_default(),
                            text: String::new(),
                        });
                    } else {
                        warn!(
                            ?id,
                            format = format.as_deref().unwrap_or_default(),
                            "Skipping message with unrecognised format"
                        );
                        skipped += 1;
                    }
                }
                Event::Text(ref t) => {
                    if let Some(p) = pending.as_mut() {
                        p.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(ref c) => {
                    if let Some(p) = pending.as_mut() {
                        let text = std::str::from_utf8(c)
                            .map_err(|e| Error::Envelope(format!("invalid UTF-8 in CDATA: {e}")))?;
                        p.text.push_str(text);
                    }
                }
                Event::End(ref e) if e.name().as_ref() == message => {
                    if let Some(p) = pending.take() {
                        messages.push(EnvelopeMessage {
                            id: p.id,
                            version: version.clone(),
                            format: format.clone().unwrap_or_default(),
                            text: normalize_line_endings(&p.text).into_owned(),
                        });
                    }
                }
                Event::End(ref e) if e.name().as_ref() == container => {
                    format = None;
                    version = None;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if pending.is_some() {
            return Err(Error::Envelope(format!(
                "unterminated <{}> element",
                self.config.message_element
            )));
        }

        debug!(
            extracted = messages.len(),
            skipped,
            "Extracted messages from envelope"
        );
        Ok(messages)
    }

    fn is_recognized(&self, format: Option<&str>) -> bool {
        format.is_some_and(|f| self.config.formats.iter().any(|known| known == f))
    }
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Extract messages using the default envelope settings
pub fn extract_messages(xml: &str) -> Result<Vec<EnvelopeMessage>> {
    EnvelopeReader::new().extract(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"<?xml version="1.0"?>
<HL7Messages MessageFormat="ORUR01" Version="2.4">
<Message MsgID="7">MSH|^~\&amp;|LAB|||||ORU^R01|7|P|2.4&#13;
PID|1||42</Message>
<Message MsgID="8"><![CDATA[MSH|^~\&|LAB|||||ORU^R01|8|P|2.4
OBX|1|NM|GLU||5.4]]></Message>
</HL7Messages>"#;

    #[test]
    fn test_extract_messages() {
        let messages = extract_messages(ENVELOPE).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id.as_deref(), Some("7"));
        assert_eq!(messages[0].version.as_deref(), Some("2.4"));
        assert_eq!(messages[0].format, "ORUR01");
        assert_eq!(
            messages[0].text,
            "MSH|^~\\&|LAB|||||ORU^R01|7|P|2.4\nPID|1||42"
        );
        assert_eq!(
            messages[1].text,
            "MSH|^~\\&|LAB|||||ORU^R01|8|P|2.4\nOBX|1|NM|GLU||5.4"
        );
    }

    #[test]
    fn test_unrecognised_format_is_skipped() {
        let xml = r#"<HL7Messages MessageFormat="ADTA01" Version="2.3">
<Message MsgID="1">MSH|^~\&amp;|ADT</Message>
</HL7Messages>"#;

        assert!(extract_messages(xml).unwrap().is_empty());

        let reader = EnvelopeReader::with_config(EnvelopeConfig {
            formats: vec!["ADTA01".to_string()],
            ..EnvelopeConfig::default()
        });
        let messages = reader.extract(xml).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "MSH|^~\\&|ADT");
    }

    #[test]
    fn test_self_closing_message_is_kept_empty() {
        let xml = r#"<HL7Messages MessageFormat="ORUR01" Version="2.4">
<Message MsgID="9"/>
<Message MsgID="10">MSH|^~\&amp;|LAB</Message>
</HL7Messages>"#;
        let messages = extract_messages(xml).unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id.as_deref(), Some("9"));
        assert_eq!(messages[0].text, "");
        assert!(matches!(
            messages[0].parse(&Hl7Parser::new(), "batch.xml"),
            Err(Error::TooShort { length: 0 })
        ));
        assert_eq!(messages[1].text, "MSH|^~\\&|LAB");
    }

    #[test]
    fn test_malformed_attribute_is_an_error() {
        let xml = r#"<HL7Messages MessageFormat="ORUR01"><Message MsgID=9>MSH|^~</Message></HL7Messages>"#;

        assert!(matches!(extract_messages(xml), Err(Error::Xml(_))));
    }

    #[test]
    fn test_unterminated_message() {
        let xml = r#"<HL7Messages MessageFormat="ORUR01"><Message MsgID="1">MSH|^~"#;

        assert!(extract_messages(xml).is_err());
    }

    #[test]
    fn test_envelope_message_parse_carries_attributes() {
        let messages = extract_messages(ENVELOPE).unwrap();
        let doc = messages[1].parse(&Hl7Parser::new(), "batch.xml").unwrap();

        assert_eq!(doc.metadata.version.as_deref(), Some("2.4"));
        assert_eq!(doc.metadata.message_id.as_deref(), Some("8"));
        assert_eq!(
            doc.metadata.source.as_ref().and_then(|s| s.context.as_deref()),
            Some("MsgID 8")
        );
        assert_eq!(doc.segment_count(), 2);
    }
}

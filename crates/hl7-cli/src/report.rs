//! Plain-text lab report printed by `hl7 dump`

use hl7_transform::{Message, SegmentAccessor};
use std::io::{self, Write};
use tracing::warn;

const HEADER_FIELDS: &[(&str, &str)] = &[
    ("Control ID", "message_control_id"),
    ("Sent", "datetime_of_message"),
    ("Facility", "sending_facility"),
];

const PATIENT_FIELDS: &[(&str, &str)] = &[
    ("Name", "patients_name"),
    ("Born", "datetime_of_birth"),
    ("External ID", "patient_id_external_id"),
    ("Internal ID", "patient_id_internal_id"),
];

const ORDER_FIELDS: &[(&str, &str)] = &[
    ("Request ID", "request_id"),
    ("Filler order", "filler_order_number"),
    ("Provider", "provider"),
];

const REQUEST_FIELDS: &[(&str, &str)] = &[
    ("Set ID", "set_id"),
    ("Filler order", "filler_order_number"),
    ("Received", "specimen_received_datetime"),
    ("Reported", "results_rptstatus_chng_datetime"),
    ("Copies to", "result_copies_to"),
    ("Status", "result_status"),
    ("Section", "diagnostic_serv_sect_id"),
];

const RESULT_FIELDS: &[(&str, &str)] = &[
    ("Set ID", "set_id"),
    ("Result", "result"),
    ("Units", "units"),
    ("Range", "reference_range"),
    ("Flags", "abnormal_flags"),
    ("Test", "identifier"),
    ("Sub ID", "sub_id"),
    ("Observed", "datetime_of_the_observation"),
];

/// Write the report for one message
pub fn write_report<W: Write>(out: &mut W, message: &Message<'_>) -> io::Result<()> {
    writeln!(out, "== Message (HL7 v{}) ==", message.version())?;
    match message.header() {
        Ok(header) => write_fields(out, "Header", header, HEADER_FIELDS, 0)?,
        Err(err) => writeln!(out, "Header: !{err}")?,
    }
    if let Some(patient) = message.patient() {
        write_fields(out, "Patient", patient, PATIENT_FIELDS, 0)?;
    }

    let requests = message.requests();
    if requests.is_empty() {
        for result in message.observations() {
            write_fields(out, "Result", result, RESULT_FIELDS, 0)?;
            write_comment(out, result, 1)?;
        }
    }

    for request in requests {
        if let Some(order) = request.orc() {
            write_fields(out, "Order", order, ORDER_FIELDS, 0)?;
        }
        write_fields(out, "Request", request, REQUEST_FIELDS, 1)?;
        write_comment(out, request, 2)?;

        for result in request.obx() {
            write_fields(out, "Result", result, RESULT_FIELDS, 2)?;
            write_comment(out, result, 3)?;
        }
    }
    Ok(())
}

fn write_fields<W: Write>(
    out: &mut W,
    title: &str,
    segment: SegmentAccessor<'_>,
    fields: &[(&str, &str)],
    depth: usize,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    writeln!(out, "{indent}{title} [{}]", segment.position())?;
    for (label, name) in fields {
        writeln!(out, "{indent}  {label}: {}", show(segment, name))?;
    }
    Ok(())
}

fn write_comment<W: Write>(out: &mut W, segment: SegmentAccessor<'_>, depth: usize) -> io::Result<()> {
    if let Some(note) = segment.nte() {
        writeln!(out, "{}Comment: {}", "  ".repeat(depth), show(note, "comment"))?;
    }
    Ok(())
}

/// Field text for display; lookup and decode failures are shown inline
fn show(segment: SegmentAccessor<'_>, name: &str) -> String {
    match segment.get(name) {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => String::new(),
        Err(err) => {
            warn!(segment = segment.code(), name, error = %err, "Field lookup failed");
            format!("!{err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_parser::parse;
    use hl7_schema::SchemaRegistry;

    const TEXT: &str = "MSH|^~\\&|LAB|MEDLAB|||200202150930||ORU^R01|C-1|P|2.4\n\
                        PID|1||555||DOE^JANE||19700101\n\
                        ORC|RE||F-1|GRP-1\n\
                        OBR|1||F-1|GLU\n\
                        OBX|1|NM|GLU||5.4|mmol/l|3.9-6.1|H\n\
                        NTE|1||Fasting\n\
                        OBX|2|ZZ|X||odd";

    fn report(text: &str) -> String {
        let doc = parse(text).unwrap();
        let registry = SchemaRegistry::builtin();
        let message = Message::from_document(&doc, &registry).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &message).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let text = report(TEXT);

        assert!(text.starts_with("== Message (HL7 v2.4) ==\n"));
        assert!(text.contains("  Control ID: C-1\n"));
        assert!(text.contains("  Sent: 2002-02-15 09:30:00\n"));
        assert!(text.contains("  Name: DOE^JANE\n"));
        assert!(text.contains("Order [2]\n  Request ID: GRP-1\n"));
        assert!(text.contains("  Request [3]\n"));
        assert!(text.contains("      Result: 5.4\n"));
        assert!(text.contains("      Flags: H\n"));
        assert!(text.contains("      Comment: Fasting\n"));
    }

    #[test]
    fn test_decode_failure_is_inline() {
        let text = report(TEXT);

        assert!(text.contains("    Result [6]\n"));
        assert!(text.contains("      Result: !Unhandled value type \"ZZ\""));
        assert!(text.contains("      Units: \n"));
    }

    #[test]
    fn test_results_without_request_are_listed() {
        let text = report("MSH|^~\\&|LIS||||||ORU^R01|C-2|P|2.3.1\nOBX|1|TX|COMMENT||Hemolysed");

        assert!(text.starts_with("== Message (HL7 v2.31) ==\n"));
        assert!(text.contains("Result [1]\n  Set ID: 1\n  Result: Hemolysed\n"));
    }
}

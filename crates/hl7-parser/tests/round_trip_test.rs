//! Integration test: parse, render and envelope extraction over the sample
//! files in `testdata/`

use hl7_ir::{Cursor, NodeType, segments_of};
use hl7_parser::{
    EnvelopeReader, Hl7Parser, Hl7Serializer, ParserConfig, SerializerConfig, parse,
};
use std::path::PathBuf;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(name)
}

fn normalizing_parser() -> Hl7Parser {
    Hl7Parser::with_config(ParserConfig {
        normalize_line_endings: true,
        ..ParserConfig::default()
    })
}

#[test]
fn test_fixture_round_trip() -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(testdata("oru_r01_v24.hl7"))?;
    let doc = normalizing_parser().parse(&raw)?;

    let expected = raw.replace("\r\n", "\n");
    assert_eq!(doc.render(), expected.trim());
    assert_eq!(doc.segment_count(), 11);
    assert_eq!(doc.metadata.message_id.as_deref(), Some("CNTRL-3456"));

    // Serializing with CR terminators gives back the file bytes
    let wire = Hl7Serializer::with_config(SerializerConfig::wire()).serialize(&doc);
    assert_eq!(wire, raw.replace("\r\n", "\r"));
    Ok(())
}

#[test]
fn test_tree_survives_json() -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(testdata("oru_r01_v24.hl7"))?;
    let doc = normalizing_parser().parse(&raw)?;

    let json = serde_json::to_string(&doc)?;
    let back: hl7_ir::Document = serde_json::from_str(&json)?;
    assert_eq!(back, doc);
    assert_eq!(back.render(), doc.render());
    Ok(())
}

#[test]
fn test_segment_index_and_cursor_on_fixture() -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(testdata("oru_r01_v24.hl7"))?;
    let doc = normalizing_parser().parse(&raw)?;

    let results = segments_of(&doc, "OBX");
    assert_eq!(
        results.iter().map(|r| r.position).collect::<Vec<_>>(),
        vec![4, 5, 7, 10]
    );
    assert!(segments_of(&doc, "ZZZ").is_empty());

    let cursor = Cursor::at_document(&doc);
    let analyte = cursor.navigate("OBX/3")?;
    assert_eq!(analyte.container().map(|c| c.len()), Some(3));
    assert_eq!(analyte.container().map(|c| c.node_type()), Some(NodeType::Field));
    assert_eq!(cursor.navigate("OBX/5/1")?.text(), Some("182"));
    assert_eq!(cursor.navigate("OBX[3]/5/1")?.text(), Some("Above range"));
    Ok(())
}

#[test]
fn test_message_declared_separators() -> anyhow::Result<()> {
    let text = "MSH*#~\\&*LAB\nOBX*1*SN*1554-5#GLUCOSE**#182\n";
    let doc = parse(text)?;

    let header = doc.segment(0).unwrap();
    assert_eq!(header.separator(), '*');
    assert_eq!(header.len(), 3);
    assert_eq!(header.container(1).unwrap().leaf(0), Some(""));
    assert_eq!(header.container(1).unwrap().leaf(1), Some("~\\&"));

    let obx = doc.segment(1).unwrap();
    assert_eq!(obx.code(), Some("OBX"));
    assert_eq!(obx.len(), 6);
    let analyte = obx.container(3).unwrap();
    assert_eq!(analyte.separator(), '#');
    assert_eq!(analyte.leaf(0), Some("1554-5"));
    assert_eq!(analyte.leaf(1), Some("GLUCOSE"));
    assert!(obx.container(4).unwrap().is_blank());
    assert_eq!(obx.container(5).unwrap().leaf(1), Some("182"));

    // Pipes and carets are plain text under these separators
    let other = parse("MSH*#~\\&*A|B^C")?;
    assert_eq!(other.segment(0).unwrap().container(2).unwrap().leaf(0), Some("A|B^C"));

    assert_eq!(doc.render(), text.trim());
    Ok(())
}

#[test]
fn test_empty_fields_keep_positions() {
    let doc = parse("MSH|^~\\&|||||||ORU^R01\nNTE|||comment").unwrap();
    let nte = doc.segment(1).unwrap();

    assert_eq!(nte.len(), 4);
    assert!(nte.container(1).unwrap().is_blank());
    assert!(nte.container(2).unwrap().is_blank());
    assert_eq!(nte.container(3).unwrap().leaf(0), Some("comment"));
}

#[test]
fn test_envelope_fixture() -> anyhow::Result<()> {
    let messages = EnvelopeReader::new().read_file(testdata("results_envelope.xml"))?;

    assert_eq!(
        messages.iter().map(|m| m.id.as_deref()).collect::<Vec<_>>(),
        vec![Some("1001"), Some("1002"), Some("3001")]
    );
    assert_eq!(messages[2].version.as_deref(), Some("2.3.1"));
    assert_eq!(messages[2].format, "ZLIL10");

    let parser = Hl7Parser::new();
    let first = messages[0].parse(&parser, "results_envelope.xml")?;
    assert_eq!(first.segment_count(), 5);
    assert_eq!(first.metadata.version.as_deref(), Some("2.4"));
    assert_eq!(first.metadata.message_id.as_deref(), Some("1001"));
    assert!(first.render().starts_with("MSH|^~\\&|LAB|MEDLAB"));
    assert!(first.render().ends_with("NTE|1|L|Fasting sample"));

    let second = messages[1].parse(&parser, "results_envelope.xml")?;
    let obx = second.segment(3).unwrap();
    assert_eq!(obx.container(5).unwrap().leaf(0), Some(">"));
    assert_eq!(obx.container(5).unwrap().leaf(1), Some("240"));
    Ok(())
}

//! Integration test: cross-segment navigation
//!
//! Comments, parent orders and result runs resolved by scanning message
//! order.

use hl7_ir::Document;
use hl7_parser::parse;
use hl7_schema::SchemaRegistry;
use hl7_transform::{FieldValue, Message};

const RESULT_RUN: &str = "MSH|^~\\&|LAB||||||ORU^R01|1|P|2.4\n\
                          ORC|RE||F-1\n\
                          OBR|1||F-1\n\
                          OBX|1|NM|GLU||5.4\n\
                          OBX|2|NM|K||4.1\n\
                          NTE|1||after second\n\
                          OBX|3|TX|C||note\n\
                          PID|1||42\n\
                          OBX|1|NM|X||1";

fn positions(segments: &[hl7_transform::SegmentAccessor<'_>]) -> Vec<usize> {
    segments.iter().map(|segment| segment.position()).collect()
}

fn run_document() -> Document {
    parse(RESULT_RUN).unwrap()
}

#[test]
fn test_result_run_stops_at_first_other_segment() {
    let doc = run_document();
    let registry = SchemaRegistry::builtin();
    let message = Message::from_document(&doc, &registry).unwrap();

    let request = message.requests()[0];
    let run = request.obx();
    assert_eq!(positions(&run), vec![3, 4, 6]);
    assert_eq!(
        run.iter()
            .map(|obx| obx.text("set_id").unwrap().unwrap())
            .collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );

    // The order starts its run from the request it is paired with
    let order = message.orders()[0];
    assert_eq!(positions(&order.obx()), vec![3, 4, 6]);
}

#[test]
fn test_nte_is_the_immediately_following_segment() {
    let doc = run_document();
    let registry = SchemaRegistry::builtin();
    let message = Message::from_document(&doc, &registry).unwrap();
    let results = message.observations();

    assert!(results[0].nte().is_none());

    let comment = results[1].nte().unwrap();
    assert_eq!(comment.position(), 5);
    assert_eq!(comment.get("comment").unwrap(), Some(FieldValue::Text("after second")));

    // NTE followed by nothing at the end of the message
    assert!(results[3].nte().is_none());
}

#[test]
fn test_parent_lookup_scans_backwards() {
    let doc = run_document();
    let registry = SchemaRegistry::builtin();
    let message = Message::from_document(&doc, &registry).unwrap();
    let stray = message.segment_at(8).unwrap();

    assert_eq!(stray.code(), "OBX");
    assert_eq!(stray.obr().unwrap().position(), 2);
    assert_eq!(stray.orc().unwrap().position(), 1);

    let header = message.header().unwrap();
    assert!(header.obr().is_none());
    assert!(header.orc().is_none());
}

#[test]
fn test_order_and_request_pair_by_filler_order_number() {
    let text = "MSH|^~\\&|LAB||||||ORU^R01|2|P|2.4\n\
                ORC|RE|P-1|F-1\n\
                ORC|RE|P-2|F-2\n\
                OBR|1|P-1|F-1\n\
                OBX|1|NM|A||1\n\
                OBR|2|P-2|F-2\n\
                OBX|1|NM|B||2";
    let doc = parse(text).unwrap();
    let registry = SchemaRegistry::builtin();
    let message = Message::from_document(&doc, &registry).unwrap();
    let orders = message.orders();

    assert_eq!(orders[0].obr().unwrap().position(), 3);
    assert_eq!(orders[1].obr().unwrap().position(), 5);
    assert_eq!(message.requests()[1].orc().unwrap().position(), 2);

    assert_eq!(positions(&orders[1].obx()), vec![6]);

    // An OBX resolves its order through the nearest preceding ORC
    let second_result = message.observations()[1];
    assert_eq!(second_result.orc().unwrap().position(), 2);
}

#[test]
fn test_unmatched_order_falls_back_to_reverse_scan() {
    let text = "MSH|^~\\&|LAB||||||ORU^R01|3|P|2.4\n\
                OBR|1||F-9\n\
                ORC|RE||F-1\n\
                OBX|1|NM|A||1";
    let doc = parse(text).unwrap();
    let registry = SchemaRegistry::builtin();
    let message = Message::from_document(&doc, &registry).unwrap();
    let order = message.orders()[0];

    assert_eq!(order.obr().unwrap().position(), 1);

    // A preceding request never starts the order's result run
    assert_eq!(positions(&order.obx()), vec![3]);
}

//! Integration test: overlay files merged over the built-in registry

use hl7_schema::{Decoder, SchemaLoader, SchemaRegistry, Version};
use std::fs;
use tempfile::TempDir;

const LAB_OVERLAY: &str = r#"
version: "2.3.1"
segments:
  - code: ZLI
    fields:
      - { index: 1, description: "Set ID - ZLI", datatype: SI }
      - { index: 2, description: "Lab Test Code", datatype: CE }
      - { index: 3, description: "Collected Date/Time", datatype: TS }
      - { index: 4, description: "Dilution Factor", datatype: NM }
  - code: OBX
    fields:
      - { index: 6, description: "Units", datatype: ST }
composites:
  - code: ZQ
    fields:
      - { index: 1, description: "Quantity", datatype: NM }
      - { index: 2, description: "Unit #", datatype: ST }
"#;

#[test]
fn test_yaml_overlay_extends_builtin_registry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("lab.yaml");
    fs::write(&path, LAB_OVERLAY)?;

    let overlay = SchemaLoader::new().load_from_file(&path)?;
    let registry = SchemaRegistry::builder()
        .with_builtin()
        .overlay(overlay)?
        .build();

    let schema = registry.get(Version::V231)?;
    let zli = schema.segment("ZLI")?;
    assert_eq!(
        zli.names().collect::<Vec<_>>(),
        vec!["set_id_zli", "lab_test_code", "collected_datetime", "dilution_factor"]
    );
    assert_eq!(zli.field("set_id_zli").unwrap().decoder, None);
    assert_eq!(
        zli.field("collected_datetime").unwrap().decoder,
        Some(Decoder::Timestamp)
    );
    assert_eq!(zli.field("dilution_factor").unwrap().decoder, Some(Decoder::Numeric));

    // Replaced in place, the rest of the built-in table survives
    let obx = schema.segment("OBX")?;
    assert_eq!(obx.field("units").unwrap().decoder, None);
    assert_eq!(obx.field("units").unwrap().index, 6);
    assert_eq!(obx.field("observation_value").unwrap().index, 5);

    let zq = schema.composite("ZQ")?;
    assert_eq!(zq.field("quantity").unwrap().index, 0);
    assert_eq!(zq.field("unit_num").unwrap().index, 1);

    // Other versions are untouched
    assert!(registry.get(Version::V24)?.segment("ZLI").is_err());
    Ok(())
}

#[test]
fn test_json_overlay_for_new_version_entry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nte.json");
    fs::write(
        &path,
        r#"{
            "version": "2.5",
            "segments": [
                {"code": "NTE", "fields": [
                    {"index": 3, "description": "Comment", "datatype": "FT", "name": "text"}
                ]}
            ]
        }"#,
    )?;

    let overlay = SchemaLoader::new().load_from_file(&path)?;
    let registry = SchemaRegistry::builder().overlay(overlay)?.build();

    assert_eq!(registry.versions(), vec![Version::V25]);
    let nte = registry.get(Version::V25)?.segment("NTE")?;
    assert_eq!(nte.len(), 1);
    assert_eq!(nte.field("text").unwrap().index, 3);
    Ok(())
}

#[test]
fn test_overlay_with_unknown_version_is_rejected() {
    let overlay = SchemaLoader::new()
        .load_from_yaml("version: \"2.6\"\nsegments: []\n")
        .unwrap();

    let result = SchemaRegistry::builder().with_builtin().overlay(overlay);
    assert!(matches!(result, Err(hl7_schema::Error::UnknownVersion(v)) if v == "2.6"));
}

#[test]
fn test_missing_overlay_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = SchemaLoader::new().load_from_file(dir.path().join("absent.json"));

    assert!(matches!(result, Err(hl7_schema::Error::Io(_))));
}

#[test]
fn test_builtin_tables_cover_result_segments_only() -> anyhow::Result<()> {
    let registry = SchemaRegistry::builtin();

    for version in registry.versions() {
        let schema = registry.get(version)?;
        assert_eq!(
            schema.segment_codes(),
            vec!["MSH", "NTE", "OBR", "OBX", "ORC", "PID"],
            "segments for v{version}"
        );
        assert!(schema.composite("CE").is_ok(), "CE composite for v{version}");
    }

    let result = registry.get(Version::V24)?.segment("PV1");
    assert!(matches!(
        result,
        Err(hl7_schema::Error::UnknownSegment { version: Version::V24, ref code }) if code == "PV1"
    ));
    Ok(())
}

#[test]
fn test_overlay_fills_missing_segment() -> anyhow::Result<()> {
    let overlay = SchemaLoader::new().load_from_yaml(
        "version: \"2.4\"\nsegments:\n  - code: PV1\n    fields:\n      \
         - { index: 1, description: \"Set ID - PV1\", datatype: SI }\n      \
         - { index: 2, description: \"Patient Class\", datatype: IS }\n      \
         - { index: 3, description: \"Assigned Patient Location\", datatype: PL }\n",
    )?;
    let registry = SchemaRegistry::builder()
        .with_builtin()
        .overlay(overlay)?
        .build();

    let pv1 = registry.get(Version::V24)?.segment("PV1")?;
    assert_eq!(
        pv1.names().collect::<Vec<_>>(),
        vec!["set_id_pv1", "patient_class", "assigned_patient_location"]
    );
    assert_eq!(
        pv1.field("assigned_patient_location")
            .and_then(|f| f.decoder.as_ref())
            .and_then(Decoder::composite_code),
        Some("PL")
    );
    assert!(registry.get(Version::V25)?.segment("PV1").is_err());
    Ok(())
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_hl7") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("hl7{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_hl7 is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn testdata_path(name: &str) -> PathBuf {
    repo_root().join("testdata").join(name)
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("temporary file should be writable");
    path
}

fn run_hl7(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run hl7")
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn parse_command_outputs_json_to_stdout() {
    let input = testdata_path("oru_r01_v24.hl7");
    let output = run_hl7(&["parse", &arg(&input), "--pretty"]);
    assert_success(&output);

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should contain valid JSON");
    let documents = parsed.as_array().expect("parse output should be a JSON array");
    assert_eq!(documents.len(), 1);
    assert!(documents[0].get("root").is_some());
    assert_eq!(documents[0]["metadata"]["message_id"], "CNTRL-3456");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse summary: messages=1, failures=0"));
}

#[test]
fn parse_command_reads_xml_envelopes() {
    let input = testdata_path("results_envelope.xml");
    let output = run_hl7(&["parse", &arg(&input)]);
    assert_success(&output);

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    let documents = parsed.as_array().expect("parse output should be a JSON array");
    let ids: Vec<_> = documents
        .iter()
        .map(|document| document["metadata"]["message_id"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["1001", "1002", "3001"]);
    assert_eq!(documents[2]["metadata"]["version"], "2.3.1");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse summary: messages=3, failures=0"));
}

#[test]
fn configured_envelope_formats_replace_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_file(&dir, "hl7.yaml", "envelope_formats: [ADTA01]\n");
    let input = testdata_path("results_envelope.xml");

    let output = run_hl7(&["--config", &arg(&config), "parse", &arg(&input)]);
    assert_success(&output);

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    let documents = parsed.as_array().expect("parse output should be a JSON array");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["metadata"]["message_id"], "2001");
}

#[test]
fn parse_failure_sets_exit_code() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "broken.hl7", "PID|1||555\r");

    let output = run_hl7(&["parse", &arg(&input)]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR:"), "stderr: {stderr}");
    assert!(stderr.contains("Parse summary: messages=1, failures=1"));
}

#[test]
fn invalid_config_returns_fatal_exit_code() {
    let dir = TempDir::new().expect("temp dir");
    let bad_config = write_file(&dir, "bad.yaml", "color: neon");
    let input = testdata_path("oru_r01_v24.hl7");

    let output = run_hl7(&["--config", &arg(&bad_config), "parse", &arg(&input)]);

    assert_eq!(output.status.code(), Some(3));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("ERROR:"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn dump_command_prints_report() {
    let input = testdata_path("oru_r01_v24.hl7");
    let output = run_hl7(&["dump", &arg(&input)]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== Message (HL7 v2.4) =="));
    assert!(stdout.contains("Control ID: CNTRL-3456"));
    assert!(stdout.contains("Name: EVERYWOMAN^EVE^E^^^^L"));
    assert!(stdout.contains("Request ID: GRP-77"));
    assert!(stdout.contains("Result: 5.4"));
    assert!(stdout.contains("Comment: Fasting sample"));
    assert!(stdout.contains("Result: Repeat in 3 months"));
}

#[test]
fn dump_command_honours_version_override() {
    let input = testdata_path("results_envelope.xml");
    let output = run_hl7(&["dump", &arg(&input), "--hl7-version", "2.5"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("== Message (HL7 v2.5) ==").count(), 3);
    assert!(stdout.contains("Result: Specimen hemolysed"));
}

#[test]
fn dump_command_rejects_unknown_version_argument() {
    let input = testdata_path("oru_r01_v24.hl7");
    let output = run_hl7(&["dump", &arg(&input), "--hl7-version", "2.9"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn fields_command_lists_segment_table() {
    let output = run_hl7(&["fields", "obx", "--hl7-version", "2.4"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("OBX (HL7 v2.4)\n"));
    assert!(stdout.contains("units"));
    assert!(stdout.contains("timestamp"));
}

#[test]
fn fields_command_includes_overlays() {
    let dir = TempDir::new().expect("temp dir");
    write_file(
        &dir,
        "zli.yaml",
        "version: \"2.3.1\"\nsegments:\n  - code: ZLI\n    fields:\n      - { index: 1, description: \"Lab Test Code\", datatype: CE }\n",
    );
    let config = write_file(
        &dir,
        "hl7.yaml",
        &format!(
            "default_version: \"2.3.1\"\nschema_overlays:\n  - {}\n",
            dir.path().join("zli.yaml").display()
        ),
    );

    let output = run_hl7(&["--config", &arg(&config), "fields", "ZLI"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ZLI (HL7 v2.31)\n"));
    assert!(stdout.contains("lab_test_code"));
    assert!(stdout.contains("composite CE"));
}

#[test]
fn fields_command_without_version_fails() {
    let output = run_hl7(&["fields", "OBX"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR:"));
}

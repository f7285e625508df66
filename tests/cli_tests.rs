// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual tnetcodec binary and verify its behavior.

mod common;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use common::{nested_list_wire, temp_dir};

/// Get the path to the built tnetcodec binary
fn tnetcodec_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The tnetcodec binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("tnetcodec");
    path
}

/// Run tnetcodec with arguments
fn run(args: &[&str]) -> Output {
    let bin = tnetcodec_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TNETCODEC_MAX_DEPTH")
        .env_remove("TNETCODEC_STRICT_BOOLEANS")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run tnetcodec with bytes on stdin
fn run_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let bin = tnetcodec_bin();
    let mut child = Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin));
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

/// Run tnetcodec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run tnetcodec and assert failure
fn run_err(args: &[&str]) -> Output {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    output
}

/// Write `data` to `name` inside `dir` and return the path as a string
fn write_file(dir: &Path, name: &str, data: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path.to_string_lossy().to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("TNet"));
    assert!(output.contains("encode"));
    assert!(output.contains("decode"));
    assert!(output.contains("inspect"));
    assert!(output.contains("validate"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("tnetcodec"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let output = run_err(&["nonexistent"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized") || stderr.contains("unknown"));
}

// ============================================================================
// Encode / Decode
// ============================================================================

#[test]
fn test_encode_from_file() {
    let (dir, _guard) = temp_dir("encode");
    let input = write_file(&dir, "in.json", br#"{"a": 1, "list": [true, null]}"#);

    let output = run_ok(&["encode", &input]);
    assert_eq!(output, "29:1:a,1:1#4:list,10:4:true!0:~]}");
}

#[test]
fn test_encode_from_stdin() {
    let output = run_with_stdin(&["encode"], br#"["x", 2.5]"#);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"10:1:x,3:2.5^]");
}

#[test]
fn test_encode_infer_types() {
    let json = br#"["00000000-0000-0000-0000-000000000000"]"#;

    let plain = run_with_stdin(&["encode"], json);
    assert!(plain.stdout.ends_with(b",]"));

    let typed = run_with_stdin(&["encode", "--infer-types"], json);
    assert!(typed.stdout.ends_with(b"+]"));
}

#[test]
fn test_encode_invalid_json() {
    let output = run_with_stdin(&["encode"], b"{not json");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid JSON"));
}

#[test]
fn test_decode_each_unit_per_line() {
    let (dir, _guard) = temp_dir("decode");
    let input = write_file(&dir, "in.tnet", b"0:~8:1:a,1:1#}3:\x01\x02\x03*");

    let output = run_ok(&["decode", &input]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["null", r#"{"a":1}"#, r#""010203""#]);
}

#[test]
fn test_decode_reports_error() {
    let (dir, _guard) = temp_dir("decode_err");
    let input = write_file(&dir, "bad.tnet", b"3:abc%");

    let output = run_err(&["decode", &input]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown tag '%'"));
}

#[test]
fn test_encode_decode_pipeline() {
    let json = br#"{"name":"probe","values":[1,-2,3.5],"nested":{"ok":false}}"#;
    let encoded = run_with_stdin(&["encode"], json);
    assert!(encoded.status.success());

    let decoded = run_with_stdin(&["decode"], &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(
        String::from_utf8_lossy(&decoded.stdout).trim_end(),
        std::str::from_utf8(json).unwrap()
    );
}

// ============================================================================
// Inspect / Validate
// ============================================================================

#[test]
fn test_inspect_tree() {
    let (dir, _guard) = temp_dir("inspect");
    let input = write_file(&dir, "in.tnet", b"8:1:1#1:2#]");

    let output = run_ok(&["inspect", &input]);
    assert!(output.contains("@0 list ']' body=8 size=11"));
    assert!(output.contains("  @2 integer '#' body=1 size=4"));
    assert!(output.contains("  @6 integer '#' body=1 size=4"));
    assert!(output.contains("1 units, 11 bytes"));
}

#[test]
fn test_validate_ok() {
    let (dir, _guard) = temp_dir("validate");
    let input = write_file(&dir, "in.tnet", b"0:~4:true!0:]");

    let output = run_ok(&["validate", &input]);
    assert!(output.contains("ok: 3 units"));
}

#[test]
fn test_validate_failure_lists_fields() {
    let (dir, _guard) = temp_dir("validate_err");
    let input = write_file(&dir, "bad.tnet", b"0:~4:5:ab]");

    let output = run_err(&["validate", &input]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unit 2"));
    assert!(stdout.contains("declared: 4"));
    assert!(stdout.contains("required: 7"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_validate_nonexistent_file() {
    let output = run_err(&["validate", "/nonexistent/file.tnet"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_lenient_booleans_flag() {
    let (dir, _guard) = temp_dir("lenient");
    let input = write_file(&dir, "in.tnet", b"3:yes!");

    run_err(&["validate", &input]);
    let output = run_ok(&["decode", "--lenient-booleans", &input]);
    assert_eq!(output.trim_end(), "false");
}

#[test]
fn test_max_depth_flag() {
    let (dir, _guard) = temp_dir("depth");
    let input = write_file(&dir, "deep.tnet", &nested_list_wire(3));

    run_ok(&["validate", &input]);
    let output = run_err(&["validate", "--max-depth", "2", &input]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("limit: 2"));
}

#[test]
fn test_max_depth_above_supported_maximum() {
    let (dir, _guard) = temp_dir("depth_ceiling");
    let input = write_file(&dir, "deep.tnet", &nested_list_wire(3));

    let too_deep = (tnetcodec::MAX_SUPPORTED_DEPTH + 1).to_string();
    let output = run_err(&["validate", "--max-depth", &too_deep, &input]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("supported maximum"));

    let output = run_err(&["validate", "--max-depth", &usize::MAX.to_string(), &input]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("supported maximum"));
}

#[test]
fn test_config_file() {
    let (dir, _guard) = temp_dir("config");
    let config = write_file(&dir, "codec.toml", b"max_depth = 2\nstrict_booleans = false\n");
    let input = write_file(&dir, "deep.tnet", &nested_list_wire(3));

    let output = run_err(&["validate", "--config", &config, &input]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("limit: 2"));

    let bad = write_file(&dir, "bad.toml", b"max_depth = 0\n");
    let output = run_err(&["validate", "--config", &bad, &input]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_depth"));
}

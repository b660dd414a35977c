//! Integration tests for the `cmsite` CLI binary.
//!
//! These run the CLI as a subprocess. Nothing here needs a reachable
//! content API: pages are read from files and probes target a closed port.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Helper: locate the `cmsite` binary built by `cargo test`.
fn cmsite_bin() -> String {
    let path = env!("CARGO_BIN_EXE_cmsite");
    assert!(Path::new(path).exists(), "cmsite binary not found at {path}");
    path.to_owned()
}

/// Helper: run cmsite with args and return (`exit_code`, stdout, stderr).
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(cmsite_bin())
        .args(args)
        .env("CMSITE_API_BASE", "http://127.0.0.1:9/blogs/api/v2")
        .env_remove("CMSITE_ENV")
        .env_remove("CMSITE_FRONTEND_URL")
        .env_remove("CMSITE_DEV_ORIGIN")
        .output()
        .expect("failed to execute cmsite");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run_json(args: &[&str]) -> Value {
    let (code, stdout, stderr) = run(args);
    assert_eq!(code, 0, "cmsite {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

fn write_payload(dir: &Path, body: &str) -> String {
    let path = dir.join("page.json");
    fs::write(&path, body).expect("write failed");
    path.to_str().unwrap().to_owned()
}

// ── Version & help ───────────────────────────────────────────────────

#[test]
fn test_version_flag() {
    let (code, stdout, _) = run(&["--version"]);
    assert_eq!(code, 0, "cmsite --version should exit 0");
    assert!(stdout.contains("cmsite"), "version output: {stdout}");
}

#[test]
fn test_help_lists_commands() {
    let (code, stdout, _) = run(&["--help"]);
    assert_eq!(code, 0);
    for sub in ["route", "resolve", "sections", "probe"] {
        assert!(stdout.contains(sub), "help should list '{sub}': {stdout}");
    }
}

#[test]
fn test_unknown_environment_is_rejected() {
    let (code, _, stderr) = run(&["--env", "staging", "route", "/"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("staging"), "should name the bad value: {stderr}");
}

// ── route (offline) ──────────────────────────────────────────────────

#[test]
fn test_route_features_with_slug() {
    let value = run_json(&["route", "/features/pricing", "--json"]);
    assert_eq!(value["view"], "features");
    assert_eq!(value["slug"], "pricing");
    assert_eq!(value["resource"], "/features-pages/?slug=pricing");
    assert_eq!(
        value["url"],
        "http://127.0.0.1:9/blogs/api/v2/features-pages/?slug=pricing"
    );
}

#[test]
fn test_route_debug_hash_beats_features_path() {
    let value = run_json(&["route", "/features/pricing", "--hash", "debug-features", "--json"]);
    assert_eq!(value["view"], "debug_features");
    assert!(value["resource"].is_null());
}

#[test]
fn test_route_default_slug_and_landing() {
    assert_eq!(run_json(&["route", "/features/", "--json"])["slug"], "sales-marketing");
    assert_eq!(run_json(&["route", "/pricing", "--json"])["view"], "landing");
}

#[test]
fn test_route_pretty_output() {
    let (code, stdout, _) = run(&["route", "/", "--hash", "#api-debug"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("api_debug"), "{stdout}");
    assert!(stdout.contains("static view"), "{stdout}");
}

// ── resolve / sections from a file ───────────────────────────────────

const PAYLOAD: &str = r##"{
    "items": [{
        "title": "Sign Mary",
        "color_theme": { "background_color": "#6b7280" },
        "header_title": "Close deals faster",
        "faq_section": { "faqs": [{ "question": "Q?", "answer": "A." }] },
        "card_sections": { "cards": [{ "custom_title": "Sales" }] },
        "dynamic_content": [{ "type": "heading", "value": "Hello" }]
    }]
}"##;

#[test]
fn test_resolve_file_prints_model() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = write_payload(dir.path(), PAYLOAD);

    let value = run_json(&["resolve", "--file", &file, "--json"]);
    assert_eq!(value["identity"]["title"], "Sign Mary");
    assert_eq!(value["theme"]["background_color"], "#FFFFFF");
    assert_eq!(value["sections"]["cards"]["cards"][0]["title"], "Sales");
    assert!(value["sections"]["pricing"].is_null());
}

#[test]
fn test_sections_landing_order() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = write_payload(dir.path(), PAYLOAD);

    let value = run_json(&["sections", "--file", &file, "--json"]);
    let keys: Vec<&str> = value["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["navbar", "header", "cards", "dynamic-content", "faq"]);
    assert_eq!(value["sections"][2]["reveal"], "reveal-stagger");
    assert_eq!(value["meta"]["title"], "Sign Mary");
}

#[test]
fn test_sections_features_order() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = write_payload(dir.path(), PAYLOAD);

    let value = run_json(&["sections", "--file", &file, "--slug", "hr", "--json"]);
    let keys: Vec<&str> = value["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["navbar", "header", "cards", "dynamic-content", "faq"]);
}

#[test]
fn test_resolve_rejects_non_page_payload() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let file = write_payload(dir.path(), r#"{ "items": [] }"#);

    let (code, _, stderr) = run(&["resolve", "--file", &file]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not a page"), "{stderr}");
}

#[test]
fn test_resolve_missing_file() {
    let (code, _, stderr) = run(&["resolve", "--file", "/tmp/cmsite-test-nonexistent.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_resolve_unreachable_api_fails() {
    let (code, _, stderr) = run(&["resolve", "--slug", "hr"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("features-pages"), "should name the URL: {stderr}");
}

// ── probe ────────────────────────────────────────────────────────────

#[test]
fn test_probe_unknown_endpoint() {
    let (code, _, stderr) = run(&["probe", "--endpoint", "/secrets/"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown endpoint"), "{stderr}");
}

#[test]
fn test_probe_unreachable_reports_errors() {
    let (code, stdout, stderr) = run(&["probe", "--delay-ms", "0", "--json"]);
    assert_ne!(code, 0, "failed probes should exit non-zero");
    assert!(stderr.contains("5 of 5 endpoints failed"), "{stderr}");

    let reports: Value = serde_json::from_str(&stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 5);
    assert!(reports.iter().all(|r| r["outcome"] == "error"));
    assert_eq!(reports[4]["endpoint"], "/images/");
}

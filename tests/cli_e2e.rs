use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tokenpress"));
    cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

fn run_in(root: &Path, args: &[&str]) -> Output {
    bin()
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("run tokenpress")
}

fn project_with_tokens(content: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("tokens.json"), content).expect("write tokens");
    temp_dir
}

/// Golden test: verify exact output for a known input
#[test]
fn e2e_golden_css_output_exact() {
    let temp_dir = project_with_tokens(
        r##"{"colors": {"primary": "#007aff"}, "spacing": {"md": 16}, "font": {"family": "Inter"}}"##,
    );

    let output = run_in(temp_dir.path(), &["convert", "tokens.json", "-f", "css"]);
    assert!(output.status.success(), "{:?}", output);

    let css = std::fs::read_to_string(temp_dir.path().join("design-tokens/tokens.css"))
        .expect("read css");
    assert_eq!(
        css,
        ":root {\n  --colors-primary: #007aff;\n  --spacing-md: 16;\n  --font-family: \"Inter\";\n}"
    );
}

#[test]
fn e2e_convert_writes_all_formats_by_default() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::copy(fixture("tokens.json"), temp_dir.path().join("tokens.json")).expect("copy");

    let output = run_in(temp_dir.path(), &["convert", "tokens.json", "-o", "out"]);
    assert!(output.status.success(), "{:?}", output);

    let out = temp_dir.path().join("out");
    for name in ["tokens.css", "tokens.swift", "tokens.kt", "tokens.dart"] {
        assert!(out.join(name).exists(), "missing {}", name);
    }

    let kotlin = std::fs::read_to_string(out.join("tokens.kt")).expect("read kt");
    assert!(kotlin.contains("    val colorsPrimary = Color(0xFF007AFF)"), "Got:\n{}", kotlin);
    assert!(kotlin.contains("    val radiusMd = 1.5.dp"), "Got:\n{}", kotlin);

    let dart = std::fs::read_to_string(out.join("tokens.dart")).expect("read dart");
    assert!(dart.contains("  static const double spacingSm = 8.0;"), "Got:\n{}", dart);
    assert!(dart.contains("  static const Color colorsSurfaceDark = Color(0xFF1C1C1E);"));
}

#[test]
fn e2e_convert_is_deterministic_for_same_inputs() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::copy(fixture("tokens.json"), temp_dir.path().join("tokens.json")).expect("copy");

    assert!(run_in(temp_dir.path(), &["convert", "tokens.json"]).status.success());
    let first = std::fs::read_to_string(temp_dir.path().join("design-tokens/tokens.swift"))
        .expect("read first");

    std::fs::remove_dir_all(temp_dir.path().join("design-tokens")).expect("rm output");

    assert!(run_in(temp_dir.path(), &["convert", "tokens.json"]).status.success());
    let second = std::fs::read_to_string(temp_dir.path().join("design-tokens/tokens.swift"))
        .expect("read second");

    assert_eq!(first, second);
}

#[test]
fn e2e_dry_run_writes_nothing() {
    let temp_dir = project_with_tokens(r#"{"a": 1}"#);

    let output = run_in(temp_dir.path(), &["convert", "tokens.json", "--dry-run"]);
    assert!(output.status.success());
    assert!(!temp_dir.path().join("design-tokens").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would write:"), "Got:\n{}", stdout);
    assert!(stdout.contains("tokens.dart"));
}

#[test]
fn e2e_invalid_json_is_rejected() {
    let temp_dir = project_with_tokens("{not json");

    let output = run_in(temp_dir.path(), &["convert", "tokens.json"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please check the file format"), "Got:\n{}", stderr);
    assert!(!temp_dir.path().join("design-tokens").exists());
}

#[test]
fn e2e_config_file_controls_defaults() {
    let temp_dir = project_with_tokens(r#"{"spacing": {"md": 16}}"#);
    std::fs::write(
        temp_dir.path().join("tokenpress.toml"),
        "formats = [\"swift\"]\ntype_name = \"AppTokens\"\noutput_dir = \"generated\"\n",
    )
    .expect("write config");

    let output = run_in(temp_dir.path(), &["convert", "tokens.json"]);
    assert!(output.status.success(), "{:?}", output);

    let generated = temp_dir.path().join("generated");
    assert!(!generated.join("tokens.css").exists());
    let swift = std::fs::read_to_string(generated.join("tokens.swift")).expect("read swift");
    assert_eq!(
        swift,
        "import SwiftUI\n\nstruct AppTokens {\n    static let spacingMd: CGFloat = 16\n}"
    );
}

#[test]
fn e2e_extract_document() {
    let output = bin()
        .arg("extract")
        .arg(fixture("document.json"))
        .output()
        .expect("run extract");
    assert!(output.status.success(), "{:?}", output);

    let tokens: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("extract prints JSON");

    assert_eq!(
        tokens["colors"]["Primary"],
        serde_json::json!({
            "type": "themedColor",
            "light": "#007aff",
            "dark": "#0a84ff",
            "name": "Primary"
        })
    );
    assert_eq!(tokens["colors"]["Surface"]["name"], "Surface (Light)");
    assert_eq!(tokens["colors"]["Accent"]["value"], "#ff9500");
    assert!(tokens["colors"].get("HeroGradient").is_none());

    assert_eq!(tokens["spacing"]["xs"]["value"], 4.0);
    assert_eq!(tokens["spacing"]["xl"]["value"], 24.0);
    assert_eq!(tokens["radius"]["sm"]["value"], 12.0);

    assert_eq!(tokens["typography"]["HeadingH1"]["lineHeight"]["value"], "auto");
    assert_eq!(tokens["effects"]["ShadowCard"]["opacity"]["value"], 0.25);
}

#[test]
fn e2e_extract_then_convert_matches_document_convert() {
    let temp_dir = TempDir::new().expect("temp dir");
    let document = fixture("document.json");
    let document = document.to_string_lossy();

    let output = run_in(
        temp_dir.path(),
        &["extract", document.as_ref(), "-o", "tokens.json"],
    );
    assert!(output.status.success(), "{:?}", output);

    let from_json = run_in(
        temp_dir.path(),
        &["convert", "tokens.json", "-f", "css", "-o", "a"],
    );
    assert!(from_json.status.success());
    let from_document = run_in(
        temp_dir.path(),
        &["convert", document.as_ref(), "--document", "-f", "css", "-o", "b"],
    );
    assert!(from_document.status.success());

    let a = std::fs::read_to_string(temp_dir.path().join("a/tokens.css")).expect("read a");
    let b = std::fs::read_to_string(temp_dir.path().join("b/tokens.css")).expect("read b");
    assert_eq!(a, b);
    assert!(a.contains("--colors-primary-light: #007aff;"));
}

#[test]
fn e2e_extract_empty_document_uses_fallback() {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("doc.json"), "{}").expect("write doc");

    let output = run_in(temp_dir.path(), &["extract", "doc.json"]);
    assert!(output.status.success());
    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(tokens["colors"].as_object().map(|m| m.len()), Some(2));
    assert_eq!(tokens["spacing"].as_object().map(|m| m.len()), Some(4));

    let output = run_in(temp_dir.path(), &["extract", "doc.json", "--no-fallback"]);
    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(tokens["colors"].as_object().map(|m| m.len()), Some(0));
}

#[test]
fn e2e_export_stdout_bundle() {
    let temp_dir = project_with_tokens(r##"{"primaryColor": "#007aff"}"##);

    let output = run_in(
        temp_dir.path(),
        &["export", "tokens.json", "--stdout", "-f", "css,kotlin"],
    );
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("// tokens.css\n:root {\n  --primary-color: #007aff;\n}\n\n---\n\n// tokens.kt\n"));
}

#[test]
fn e2e_publish_requires_repository_and_token() {
    let temp_dir = project_with_tokens(r#"{"a": 1}"#);

    let output = run_in(temp_dir.path(), &["publish", "tokens.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a repository URL"), "Got:\n{}", stderr);

    let output = run_in(temp_dir.path(), &["publish", "tokens.json", "--repo", "acme/app"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a GitHub token"), "Got:\n{}", stderr);
}

#[test]
fn e2e_host_serves_json_lines() {
    let mut child = bin()
        .arg("host")
        .arg(fixture("document.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn host");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(
                b"{\"type\": \"extract-tokens\"}\nhello\n{\"type\": \"notify\", \"message\": \"hi\"}\n{\"type\": \"close-plugin\"}\n",
            )
            .expect("write requests");
    }

    let output = child.wait_with_output().expect("wait host");
    assert!(output.status.success(), "{:?}", output);

    let responses: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("response is JSON"))
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["type"], "tokens-extracted");
    assert_eq!(responses[0]["tokens"]["colors"]["Primary"]["type"], "themedColor");
    assert_eq!(responses[1]["type"], "error");
}

#[test]
fn e2e_unknown_format_is_rejected() {
    let temp_dir = project_with_tokens("{}");
    let output = run_in(temp_dir.path(), &["convert", "tokens.json", "-f", "yaml"]);
    assert!(!output.status.success());
    assert!(!temp_dir.path().join("design-tokens").exists());
}

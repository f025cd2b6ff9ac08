//! End-to-end tests for the `para` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn para_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("para");
    path
}

fn run_para(args: &[&str]) -> (String, String, bool) {
    run_para_with_stdin(args, None)
}

fn run_para_with_stdin(args: &[&str], stdin: Option<&str>) -> (String, String, bool) {
    let binary = para_binary();
    let mut child = Command::new(&binary)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to run para binary at {:?}: {}", binary, e));

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            // The binary may exit on bad arguments before reading stdin.
            let _ = pipe.write_all(input.as_bytes());
        }
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

/// Minimal docx (ZIP) whose word/document.xml holds one `<w:p>` per entry.
fn minimal_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
            body
        );
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn test_split_balances_sentences() {
    let tmp = TempDir::new().unwrap();
    let input = write_file(
        tmp.path(),
        "summary.txt",
        b"Hello world. This is great! What next?",
    );

    let (stdout, stderr, success) = run_para(&["split", &input, "--length", "medium"]);
    assert!(success, "split failed: stdout={}, stderr={}", stdout, stderr);
    assert_eq!(stdout, "Hello world. This is great!\n\nWhat next?\n");
}

#[test]
fn test_split_prefers_line_breaks() {
    let tmp = TempDir::new().unwrap();
    let input = write_file(
        tmp.path(),
        "notes.md",
        b"First line. It has two sentences.\nSecond line.\n",
    );

    let (stdout, _, success) = run_para(&["split", &input, "--length", "short"]);
    assert!(success);
    assert_eq!(stdout, "First line. It has two sentences.\n");
}

#[test]
fn test_split_reads_stdin() {
    let (stdout, stderr, success) =
        run_para_with_stdin(&["split", "--count", "5"], Some("A. B. C."));
    assert!(success, "stderr={}", stderr);
    assert_eq!(stdout, "A.\n\nB.\n\nC.\n");
}

#[test]
fn test_split_json_output() {
    let (stdout, _, success) = run_para_with_stdin(
        &["split", "-", "--count", "2", "--format", "json"],
        Some("One sentence only without caps after period. continues lowercase."),
    );
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["strategy"], "sentences");
    assert_eq!(json["count"], 2);
    assert_eq!(
        json["paragraphs"],
        serde_json::json!([
            "One sentence only without caps after period.",
            "continues lowercase."
        ])
    );
}

#[test]
fn test_split_explain() {
    let (stdout, _, success) = run_para_with_stdin(
        &["split", "--count", "1", "--explain"],
        Some("line one\nline two"),
    );
    assert!(success);
    assert!(stdout.starts_with("# strategy: lines"), "got: {}", stdout);
    assert!(stdout.contains("line one"));
    assert!(!stdout.contains("line two"));
}

#[test]
fn test_split_empty_input_prints_nothing() {
    let (stdout, _, success) = run_para_with_stdin(&["split"], Some(""));
    assert!(success);
    assert_eq!(stdout.trim(), "");
}

#[test]
fn test_split_zero_count_fails() {
    let (_, stderr, success) = run_para_with_stdin(&["split", "--count", "0"], Some("Text."));
    assert!(!success);
    assert!(stderr.contains("paragraph count"), "stderr={}", stderr);
}

#[test]
fn test_split_unknown_length_fails() {
    let (_, stderr, success) = run_para_with_stdin(&["split", "--length", "epic"], Some("x"));
    assert!(!success);
    assert!(stderr.contains("epic"), "stderr={}", stderr);
}

#[test]
fn test_split_docx_uses_word_paragraphs() {
    let tmp = TempDir::new().unwrap();
    let docx = minimal_docx(&["Opening paragraph.", "Middle paragraph.", "Closing paragraph."]);
    let input = write_file(tmp.path(), "report.docx", &docx);

    let (stdout, stderr, success) = run_para(&["split", &input, "--length", "medium"]);
    assert!(success, "stderr={}", stderr);
    assert_eq!(stdout, "Opening paragraph.\n\nMiddle paragraph.\n");
}

#[test]
fn test_split_broken_pdf_fails() {
    let tmp = TempDir::new().unwrap();
    let input = write_file(tmp.path(), "scan.pdf", b"not a pdf");

    let (_, stderr, success) = run_para(&["split", &input]);
    assert!(!success);
    assert!(stderr.contains("PDF extraction failed"), "stderr={}", stderr);
}

#[test]
fn test_split_respects_max_bytes() {
    let tmp = TempDir::new().unwrap();
    let config = write_file(tmp.path(), "para.toml", b"[extract]\nmax_bytes = 10\n");
    let input = write_file(tmp.path(), "big.txt", b"This file is longer than ten bytes.");

    let (_, stderr, success) = run_para(&["--config", &config, "split", &input]);
    assert!(!success);
    assert!(stderr.contains("byte limit"), "stderr={}", stderr);
}

#[test]
fn test_config_changes_length_mapping() {
    let tmp = TempDir::new().unwrap();
    let config = write_file(
        tmp.path(),
        "para.toml",
        b"[paragraphs]\ndefault_length = \"long\"\n\n[lengths]\nlong = 4\n",
    );

    let (stdout, _, success) =
        run_para_with_stdin(&["--config", &config, "split"], Some("a\nb\nc\nd\ne"));
    assert!(success);
    assert_eq!(stdout, "a\n\nb\n\nc\n\nd\n");
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config = write_file(tmp.path(), "para.toml", b"[lengths]\nmedium = 0\n");

    let (_, stderr, success) = run_para(&["--config", &config, "lengths"]);
    assert!(!success);
    assert!(stderr.contains("lengths"), "stderr={}", stderr);
}

#[test]
fn test_lengths_lists_mapping() {
    let (stdout, _, success) = run_para(&["lengths"]);
    assert!(success);
    assert_eq!(stdout, "short   1\nmedium  2 (default)\nlong    3\n");
}

#[test]
fn test_render_summary_response() {
    let tmp = TempDir::new().unwrap();
    let response = write_file(
        tmp.path(),
        "response.json",
        br#"{
            "summary": "The report covers sales. Revenue grew. Costs fell.",
            "raw_text": "Page one text.\nPage two text.\nPage three text.",
            "message": "Summarized"
        }"#,
    );

    let (stdout, stderr, success) = run_para(&["render", &response, "--length", "medium"]);
    assert!(success, "stderr={}", stderr);
    assert_eq!(
        stdout,
        "Summary\n\nThe report covers sales. Revenue grew.\n\nCosts fell.\n\n\
         Raw Extracted Text\n\nPage one text.\n\nPage two text.\n"
    );
}

#[test]
fn test_render_json_from_stdin() {
    let (stdout, _, success) = run_para_with_stdin(
        &["render", "-", "--count", "1", "--format", "json"],
        Some(r#"{ "summary": "Only this.", "raw_text": "" }"#),
    );
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["summary"], serde_json::json!(["Only this."]));
    assert_eq!(json["raw_text"], serde_json::json!([]));
}

#[test]
fn test_render_invalid_json_fails() {
    let (_, stderr, success) = run_para_with_stdin(&["render", "-"], Some("not json"));
    assert!(!success);
    assert!(stderr.contains("summarizer JSON"), "stderr={}", stderr);
}

#[test]
fn test_render_respects_max_bytes() {
    let tmp = TempDir::new().unwrap();
    let config = write_file(tmp.path(), "para.toml", b"[extract]\nmax_bytes = 16\n");
    let response = r#"{ "summary": "A summary that is well past sixteen bytes." }"#;
    let file = write_file(tmp.path(), "response.json", response.as_bytes());

    let (_, stderr, success) = run_para(&["--config", &config, "render", &file]);
    assert!(!success);
    assert!(stderr.contains("byte limit"), "stderr={}", stderr);

    let (_, stderr, success) =
        run_para_with_stdin(&["--config", &config, "render", "-"], Some(response));
    assert!(!success);
    assert!(stderr.contains("byte limit"), "stderr={}", stderr);
    assert!(!stderr.contains("summarizer JSON"), "stderr={}", stderr);
}

#[test]
fn test_completions() {
    let (stdout, _, success) = run_para(&["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("para"));
}

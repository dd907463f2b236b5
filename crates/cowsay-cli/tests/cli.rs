use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const HELLO: &str = include_str!("../../cowsay-core/tests/golden/hello_w40.txt");

fn cowsay() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cowsay"));
    cmd.env_remove("COWSAY_WIDTH");
    cmd
}

fn run_cowsay(args: &[&str]) -> Output {
    cowsay().args(args).output().expect("run cowsay")
}

fn run_cowsay_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = cowsay()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cowsay");
    child
        .stdin
        .take()
        .expect("stdin pipe")
        .write_all(input)
        .expect("write stdin");
    child.wait_with_output().expect("wait cowsay")
}

fn stdout_str(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("utf-8 stdout")
}

fn assert_ok(out: &Output) {
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn no_args_prints_default_message() {
    let out = run_cowsay(&[]);
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);
    assert!(out.stderr.is_empty());
}

#[test]
fn words_are_joined_with_spaces() {
    let out = run_cowsay(&["Hello,", "World!"]);
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);
}

#[test]
fn width_flag_wraps() {
    let out = run_cowsay(&[
        "-w",
        "10",
        "The quick brown fox jumps over the lazy dog",
    ]);
    assert_ok(&out);
    assert_eq!(
        stdout_str(&out),
        include_str!("../../cowsay-core/tests/golden/fox_w10.txt")
    );

    let words = run_cowsay(&[
        "--width", "10", "The", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog",
    ]);
    assert_eq!(words.stdout, out.stdout);
}

#[test]
fn negative_numbers_are_message_words() {
    let out = run_cowsay(&["Temperature", "is", "-5", "degrees"]);
    assert_ok(&out);
    assert!(
        stdout_str(&out).contains("< Temperature is -5 degrees >\n"),
        "stdout:\n{}",
        stdout_str(&out)
    );
}

#[test]
fn empty_argument_gives_empty_bubble() {
    let out = run_cowsay(&[""]);
    assert_ok(&out);
    assert!(stdout_str(&out).starts_with(" __\n<  >\n --\n"));
}

#[test]
fn invalid_width_is_a_usage_error() {
    for bad in ["0", "-4", "abc"] {
        let out = run_cowsay(&["-w", bad, "moo"]);
        assert_eq!(out.status.code(), Some(2), "width {bad:?}");
        assert!(out.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("CWS0001"), "width {bad:?} stderr:\n{stderr}");
    }
}

#[test]
fn width_from_environment() {
    let out = cowsay()
        .env("COWSAY_WIDTH", "10")
        .arg("The quick brown fox jumps over the lazy dog")
        .output()
        .expect("run cowsay");
    assert_ok(&out);
    assert_eq!(
        stdout_str(&out),
        include_str!("../../cowsay-core/tests/golden/fox_w10.txt")
    );

    // The flag wins over the environment.
    let out = cowsay()
        .env("COWSAY_WIDTH", "10")
        .args(["-w", "40", "Hello, World!"])
        .output()
        .expect("run cowsay");
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);
}

#[test]
fn invalid_width_in_environment_fails() {
    let out = cowsay()
        .env("COWSAY_WIDTH", "zero")
        .output()
        .expect("run cowsay");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("COWSAY_WIDTH"), "stderr:\n{stderr}");
    assert!(stderr.contains("CWS0001"), "stderr:\n{stderr}");
}

#[test]
fn stdin_reads_first_line() {
    let out = run_cowsay_stdin(&["--stdin"], b"Hello, World!\nignored\n");
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);
}

#[test]
fn stdin_at_eof_uses_default_message() {
    let out = run_cowsay_stdin(&["--stdin"], b"");
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);
}

#[test]
fn stdin_conflicts_with_words() {
    let out = run_cowsay(&["--stdin", "moo"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn long_arguments_are_truncated_with_warning() {
    let a = "a".repeat(1000);
    let b = "b".repeat(100);
    let out = run_cowsay(&[a.as_str(), b.as_str(), "c"]);
    assert_ok(&out);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("warning: CWS0100"), "stderr:\n{stderr}");
    assert!(stderr.contains("kept 1 of 3 arguments"), "stderr:\n{stderr}");
    let stdout = stdout_str(&out);
    assert!(!stdout.contains('b'));
    assert_eq!(stdout.matches('a').count(), 1000);
}

#[test]
fn long_stdin_line_is_truncated_with_warning() {
    let line = format!("{}\n", "z".repeat(2000));
    let out = run_cowsay_stdin(&["--stdin"], line.as_bytes());
    assert_ok(&out);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("CWS0100"), "stderr:\n{stderr}");
    assert_eq!(stdout_str(&out).matches('z').count(), 1023);
}

#[test]
fn report_out_describes_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("nested/report.json");
    let out = run_cowsay(&[
        "--report-out",
        report_path.to_str().expect("utf-8 path"),
        "Hello,",
        "World!",
    ]);
    assert_ok(&out);
    assert_eq!(stdout_str(&out), HELLO);

    let bytes = std::fs::read(&report_path).expect("read report");
    let v: Value = serde_json::from_slice(&bytes).expect("parse report JSON");
    assert_eq!(v["schema_version"], "cowsay.report@0.1.0");
    assert_eq!(v["ok"], true);
    assert_eq!(v["source"], "args");
    assert_eq!(v["width"], 40);
    assert_eq!(v["message_chars"], 13);
    assert_eq!(v["message_bytes"], 13);
    assert_eq!(v["truncated"], false);
    assert_eq!(v["wrapped"], false);
    assert_eq!(v["lines"], 1);
    assert_eq!(v["border_len"], 15);
    assert_eq!(v["output_bytes"], out.stdout.len());
    assert_eq!(v["output_sha256"].as_str().map(str::len), Some(64));
    assert_eq!(v["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn report_out_records_truncation_and_wrapping() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("report.json");
    let line = format!("{}\n", "q".repeat(1500));
    let out = run_cowsay_stdin(
        &[
            "--stdin",
            "-w",
            "50",
            "--report-out",
            report_path.to_str().expect("utf-8 path"),
        ],
        line.as_bytes(),
    );
    assert_ok(&out);

    let bytes = std::fs::read(&report_path).expect("read report");
    let v: Value = serde_json::from_slice(&bytes).expect("parse report JSON");
    assert_eq!(v["source"], "stdin");
    assert_eq!(v["truncated"], true);
    assert_eq!(v["wrapped"], true);
    assert_eq!(v["message_chars"], 1023);
    assert_eq!(v["lines"], 21);
    assert_eq!(v["border_len"], 52);
    let diags = v["diagnostics"].as_array().expect("diagnostics[]");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["code"], "CWS0100MessageTruncated");
    assert_eq!(diags[0]["severity"], "Warning");
}

#[test]
fn output_is_identical_across_runs() {
    let a = run_cowsay(&["-w", "7", "same", "input", "same", "bytes"]);
    let b = run_cowsay(&["-w", "7", "same", "input", "same", "bytes"]);
    assert_ok(&a);
    assert_eq!(a.stdout, b.stdout);
}

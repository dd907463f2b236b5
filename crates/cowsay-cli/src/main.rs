use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cowsay_core::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use cowsay_core::message::{self, Assembled, Source};
use cowsay_core::{Layout, Width};
use serde::Serialize;

const COWSAY_REPORT_SCHEMA_VERSION: &str = "cowsay.report@0.1.0";
const WIDTH_ENV: &str = "COWSAY_WIDTH";

#[derive(Parser, Debug)]
#[command(name = "cowsay")]
#[command(about = "Print a message in a speech bubble above a cow.", long_about = None)]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Message words, joined with single spaces.
    #[arg(value_name = "WORD", conflicts_with = "stdin")]
    message: Vec<String>,

    /// Wrap width in characters (default 40, or $COWSAY_WIDTH).
    #[arg(short = 'w', long, value_name = "N", value_parser = parse_width)]
    width: Option<Width>,

    /// Read the message from the first line of stdin.
    #[arg(long, default_value_t = false)]
    stdin: bool,

    /// Also write a JSON report describing the rendered bubble.
    #[arg(long, value_name = "PATH")]
    report_out: Option<PathBuf>,
}

fn parse_width(s: &str) -> std::result::Result<Width, String> {
    Width::parse(s).map_err(|e| format!("{e:#}"))
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    schema_version: &'static str,
    ok: bool,
    source: Source,
    width: usize,
    message_chars: usize,
    message_bytes: usize,
    truncated: bool,
    wrapped: bool,
    lines: usize,
    border_len: usize,
    output_bytes: usize,
    output_sha256: String,
    diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    fn new(msg: &'a Assembled, layout: Layout, output: &[u8]) -> Self {
        Report {
            schema_version: COWSAY_REPORT_SCHEMA_VERSION,
            ok: !msg.diagnostics.iter().any(|d| d.severity == Severity::Error),
            source: msg.source,
            width: layout.width,
            message_chars: layout.message_chars,
            message_bytes: msg.text.len(),
            truncated: msg.truncated(),
            wrapped: layout.wrapped,
            lines: layout.lines,
            border_len: layout.border_len,
            output_bytes: output.len(),
            output_sha256: cowsay_core::util::sha256_hex(output),
            diagnostics: &msg.diagnostics,
        }
    }
}

fn main() -> Result<()> {
    try_main().map_err(|err| {
        eprintln!("{err:#}");
        err
    })
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let width = match cli.width {
        Some(w) => w,
        None => width_from_env()?,
    };

    let msg = if cli.stdin {
        message::from_reader(std::io::stdin().lock()).context("read message from stdin")?
    } else {
        message::from_args(&cli.message)
    };
    for d in &msg.diagnostics {
        eprintln!("warning: {d}");
    }

    let out = cowsay_core::render(&msg.text, width);
    write_stdout(out.as_bytes())?;

    if let Some(path) = &cli.report_out {
        let report = Report::new(&msg, cowsay_core::layout(&msg.text, width), out.as_bytes());
        write_report(path, &report)?;
    }
    Ok(())
}

fn width_from_env() -> Result<Width> {
    match std::env::var(WIDTH_ENV) {
        Ok(v) => Width::parse(&v).with_context(|| format!("parse ${WIDTH_ENV}")),
        Err(std::env::VarError::NotPresent) => Ok(Width::DEFAULT),
        Err(e) => Err(e).with_context(|| format!("read ${WIDTH_ENV}")),
    }
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| {
            anyhow::anyhow!(
                "{}",
                Diagnostic::error(DiagnosticCode::CWS0300OutputWrite, format!("stdout: {e}"))
            )
        })
}

fn write_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report JSON")?;
    bytes.push(b'\n');
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create report dir: {}", parent.display()))?;
        }
    }
    std::fs::write(path, &bytes).map_err(|e| {
        anyhow::anyhow!(
            "{}",
            Diagnostic::error(
                DiagnosticCode::CWS0300OutputWrite,
                format!("report {}: {e}", path.display())
            )
        )
    })
}

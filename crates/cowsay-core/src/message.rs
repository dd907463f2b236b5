use std::io::{BufRead, Read};

use anyhow::Result;
use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// Largest message kept, in bytes. Longer input is truncated with a warning.
pub const MAX_MESSAGE_BYTES: usize = 1023;

/// Bytes read from a stdin line before giving up on finding its end: the message budget plus
/// room for a split UTF-8 tail and `\r\n`.
const MAX_LINE_READ: usize = MAX_MESSAGE_BYTES + 4;

pub const DEFAULT_MESSAGE: &str = "Hello, World!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Default,
    Args,
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub text: String,
    pub source: Source,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembled {
    fn default_message() -> Self {
        Assembled {
            text: DEFAULT_MESSAGE.to_string(),
            source: Source::Default,
            diagnostics: Vec::new(),
        }
    }

    pub fn truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::CWS0100MessageTruncated)
    }
}

/// Joins positional arguments with single spaces.
///
/// Stops at the first argument that does not fit in [`MAX_MESSAGE_BYTES`]; that argument and
/// everything after it are dropped.
pub fn from_args<S: AsRef<str>>(args: &[S]) -> Assembled {
    if args.is_empty() {
        return Assembled::default_message();
    }

    let mut text = String::new();
    let mut diagnostics = Vec::new();
    for (idx, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        let sep = usize::from(idx > 0);
        if text.len() + sep + arg.len() > MAX_MESSAGE_BYTES {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::CWS0100MessageTruncated,
                format!(
                    "message truncated due to length limit: kept {idx} of {} arguments ({} bytes, limit {MAX_MESSAGE_BYTES})",
                    args.len(),
                    text.len()
                ),
            ));
            break;
        }
        if sep == 1 {
            text.push(' ');
        }
        text.push_str(arg);
    }

    Assembled {
        text,
        source: Source::Args,
        diagnostics,
    }
}

/// Reads one line as the message.
///
/// A reader at EOF yields [`DEFAULT_MESSAGE`]. The trailing line terminator is stripped and
/// invalid UTF-8 is replaced. At most `MAX_LINE_READ` bytes are consumed; the rest of an
/// overlong line is left unread.
pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Assembled> {
    let mut buf = Vec::with_capacity(MAX_LINE_READ);
    let n = (&mut reader)
        .take(MAX_LINE_READ as u64)
        .read_until(b'\n', &mut buf)
        .map_err(|e| {
            anyhow::anyhow!(
                "{}",
                Diagnostic::error(DiagnosticCode::CWS0200StdinRead, e.to_string())
            )
        })?;
    if n == 0 {
        return Ok(Assembled::default_message());
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let mut text = String::from_utf8_lossy(&buf).into_owned();

    let mut diagnostics = Vec::new();
    if text.len() > MAX_MESSAGE_BYTES {
        let cut = floor_char_boundary(&text, MAX_MESSAGE_BYTES);
        text.truncate(cut);
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::CWS0100MessageTruncated,
            format!(
                "message truncated due to length limit: kept {cut} bytes (limit {MAX_MESSAGE_BYTES})"
            ),
        ));
    }

    Ok(Assembled {
        text,
        source: Source::Stdin,
        diagnostics,
    })
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    let mut i = max.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

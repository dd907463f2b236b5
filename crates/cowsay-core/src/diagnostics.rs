use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Args,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    CWS0001InvalidWidth,
    CWS0100MessageTruncated,
    CWS0200StdinRead,
    CWS0300OutputWrite,
}

impl DiagnosticCode {
    pub fn code_str(self) -> &'static str {
        match self {
            DiagnosticCode::CWS0001InvalidWidth => "CWS0001",
            DiagnosticCode::CWS0100MessageTruncated => "CWS0100",
            DiagnosticCode::CWS0200StdinRead => "CWS0200",
            DiagnosticCode::CWS0300OutputWrite => "CWS0300",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            DiagnosticCode::CWS0001InvalidWidth => "invalid wrap width",
            DiagnosticCode::CWS0100MessageTruncated => "message truncated due to length limit",
            DiagnosticCode::CWS0200StdinRead => "failed to read message from stdin",
            DiagnosticCode::CWS0300OutputWrite => "failed to write output",
        }
    }

    pub fn default_help(self) -> Option<&'static str> {
        match self {
            DiagnosticCode::CWS0001InvalidWidth => {
                Some("Pass a positive decimal integer, e.g. `-w 40`.")
            }
            DiagnosticCode::CWS0100MessageTruncated => {
                Some("Shorten the message or split it across several invocations.")
            }
            _ => None,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            DiagnosticCode::CWS0001InvalidWidth => Phase::Args,
            DiagnosticCode::CWS0100MessageTruncated | DiagnosticCode::CWS0200StdinRead => {
                Phase::Input
            }
            DiagnosticCode::CWS0300OutputWrite => Phase::Output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Diagnostic::new(code, Severity::Error, message)
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Diagnostic::new(code, Severity::Warning, message)
    }

    /// An empty `message` falls back to the code's default message.
    fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = code.default_message().to_string();
        }
        Diagnostic {
            code,
            phase: code.phase(),
            severity,
            message,
            help: code.default_help().map(|s| s.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?}: {}",
            self.code.code_str(),
            self.phase,
            self.severity,
            self.message
        )?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

use std::fmt;
use std::num::NonZeroUsize;

use anyhow::Result;

use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// Wrap width of the bubble, in characters. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Width(NonZeroUsize);

impl Width {
    pub const DEFAULT: Width = match NonZeroUsize::new(40) {
        Some(n) => Width(n),
        None => unreachable!(),
    };

    pub fn new(n: usize) -> Result<Self> {
        match NonZeroUsize::new(n) {
            Some(n) => Ok(Width(n)),
            None => anyhow::bail!(
                "{}",
                Diagnostic::error(DiagnosticCode::CWS0001InvalidWidth, "width must be >= 1, got 0")
            ),
        }
    }

    /// Parses a decimal width. Zero, negative, and non-numeric values are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let t = s.trim();
        if t.starts_with('-') {
            anyhow::bail!(
                "{}",
                Diagnostic::error(
                    DiagnosticCode::CWS0001InvalidWidth,
                    format!("width must be >= 1, got {t:?}")
                )
            );
        }
        let n: usize = t.parse().map_err(|e| {
            anyhow::anyhow!(
                "{}",
                Diagnostic::error(
                    DiagnosticCode::CWS0001InvalidWidth,
                    format!("width is not a positive integer: {t:?} ({e})")
                )
            )
        })?;
        Width::new(n)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Width {
    fn default() -> Self {
        Width::DEFAULT
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Width {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Width::parse(s)
    }
}

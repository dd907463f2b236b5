//! Speech-bubble formatting for `cowsay`.
//!
//! [`bubble::render`] is the whole formatter; the other modules turn command-line input into its
//! arguments and describe what went wrong when they cannot.

pub mod bubble;
pub mod diagnostics;
pub mod message;
pub mod util;
pub mod width;

pub use bubble::{layout, render, Layout, COW_ART};
pub use width::Width;

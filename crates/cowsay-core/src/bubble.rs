//! Speech bubble layout and rendering.
//!
//! The bubble is a pure function of `(message, width)`: a top border of underscores, the framed
//! message, a bottom border of dashes, then [`COW_ART`]. Message length and chunking are counted
//! in `char`s so multi-byte text is never split.

use serde::Serialize;

use crate::width::Width;

/// Appended verbatim after the bottom border. Starts with the newline that ends the border.
pub const COW_ART: &str = concat!(
    "\n",
    "        \\   ^__^\n",
    "         \\  (oo)\\_______\n",
    "            (__)\\       )\\/\\\n",
    "                ||----w |\n",
    "                ||     ||\n",
);

/// Derived frame dimensions for one `(message, width)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub message_chars: usize,
    pub width: usize,
    /// Length of the top and bottom borders, excluding the leading space.
    pub border_len: usize,
    /// Number of framed message lines.
    pub lines: usize,
    pub wrapped: bool,
}

pub fn layout(message: &str, width: Width) -> Layout {
    let w = width.get();
    let len = message.chars().count();
    let wrapped = len > w;
    Layout {
        message_chars: len,
        width: w,
        border_len: len.min(w) + 2,
        lines: if wrapped { len.div_ceil(w) } else { 1 },
        wrapped,
    }
}

pub fn render(message: &str, width: Width) -> String {
    let lay = layout(message, width);
    let w = lay.width;

    let line_len = if lay.wrapped { w + 4 } else { message.len() + 4 };
    let mut out =
        String::with_capacity(2 * (lay.border_len + 2) + lay.lines * (line_len + 8) + COW_ART.len());

    out.push(' ');
    fill(&mut out, '_', lay.border_len);
    out.push('\n');

    if !lay.wrapped {
        out.push_str("< ");
        out.push_str(message);
        out.push_str(" >\n");
    } else {
        for (idx, chunk) in chunks(message, w).enumerate() {
            let (c1, c2) = if idx == 0 {
                ('/', '\\')
            } else if idx + 1 == lay.lines {
                ('\\', '/')
            } else {
                ('|', '|')
            };
            out.push(c1);
            out.push(' ');
            out.push_str(chunk);
            fill(&mut out, ' ', w - chunk.chars().count());
            out.push(' ');
            out.push(c2);
            out.push('\n');
        }
    }

    out.push(' ');
    fill(&mut out, '-', lay.border_len);
    out.push_str(COW_ART);
    out
}

fn fill(out: &mut String, c: char, n: usize) {
    out.extend(std::iter::repeat(c).take(n));
}

/// Splits `s` into consecutive slices of `w` chars; the last one may be shorter.
fn chunks(s: &str, w: usize) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(w)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(head)
    })
}

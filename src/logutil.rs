//! Helpers for putting player-supplied text into logs.
//! Player input arrives as raw socket bytes and may hold line breaks or
//! control characters; these helpers keep every log record on one line.

use std::fmt::Write;

/// Longest preview kept before the text is cut with an ellipsis.
const MAX_PREVIEW: usize = 200;

/// Escape player text for a single log line, cut at `MAX_PREVIEW` chars.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    push_escaped(&mut out, s);
    out
}

/// Render received bytes as `"<escaped text>" (<n> bytes)`, decoding lossily.
pub fn preview_bytes(bytes: &[u8]) -> String {
    let mut out = String::from("\"");
    push_escaped(&mut out, &String::from_utf8_lossy(bytes));
    let _ = write!(out, "\" ({} bytes)", bytes.len());
    out
}

fn push_escaped(out: &mut String, text: &str) {
    let mut chars = text.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
}

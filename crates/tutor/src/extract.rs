//! Tolerant extraction of structured data from model output.
//!
//! Models wrap JSON in code fences, prepend chatter ("Here are your
//! questions:") and append notes. Extraction runs in three steps:
//!
//! 1. strip fence markers
//! 2. strict parse of what remains
//! 3. parse each balanced top-level `[...]` / `{...}` span in order, found
//!    with a character state machine that respects string literals
//!
//! If nothing parses the result is `None`; callers degrade to empty.

use serde::de::DeserializeOwned;
use tracing::debug;

const FENCE: &str = "```";

/// Remove every code-fence marker together with its language tag.
///
/// A word right after a fence is only a tag when whitespace follows it, so
/// "```true```" keeps its content.
pub fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        if tag_len > 0 && rest[tag_len..].starts_with(char::is_whitespace) {
            rest = &rest[tag_len..];
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Top-level balanced JSON array/object spans of `text`, in order.
///
/// Brackets inside string literals are ignored, and escapes inside strings
/// are honoured. A mismatched closer abandons the current span.
pub fn balanced_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut closers: Vec<u8> = Vec::new();
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &byte) in text.as_bytes().iter().enumerate() {
        if closers.is_empty() {
            match byte {
                b'{' => closers.push(b'}'),
                b'[' => closers.push(b']'),
                _ => continue,
            }
            start = idx;
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => closers.push(b'}'),
            b'[' => closers.push(b']'),
            b'}' | b']' => {
                if closers.last() == Some(&byte) {
                    closers.pop();
                    if closers.is_empty() {
                        spans.push(&text[start..=idx]);
                    }
                } else {
                    closers.clear();
                }
            }
            _ => {}
        }
    }

    spans
}

/// Parse `raw` as `T`, tolerating fences and surrounding prose.
pub fn parse_lenient<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let cleaned = strip_fences(raw);

    if let Ok(value) = serde_json::from_str::<T>(&cleaned) {
        return Some(value);
    }

    let parsed = balanced_spans(&cleaned)
        .into_iter()
        .find_map(|span| serde_json::from_str::<T>(span).ok());

    if parsed.is_none() {
        debug!(len = raw.len(), "No parseable JSON in model output");
    }
    parsed
}

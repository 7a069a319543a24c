use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Outcome of salvaging JSON out of a raw model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedValue {
    /// A JSON object, the shape the content stage asks for.
    Object(serde_json::Map<String, Value>),
    /// A JSON array, the shape the structure stage asks for.
    Array(Vec<Value>),
    /// Nothing recoverable.
    Empty,
}

impl ExtractedValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, ExtractedValue::Empty)
    }

    pub fn into_object(self) -> Option<serde_json::Map<String, Value>> {
        match self {
            ExtractedValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            ExtractedValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

fn marker_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)START OF JSON\s*(.*?)\s*END OF JSON").expect("valid marker regex")
    })
}

fn object_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy on purpose: the widest brace span keeps nested objects whole.
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object span regex"))
}

fn array_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("valid array span regex"))
}

/// Salvages a JSON document from a raw model response.
///
/// Candidate selection runs through an ordered strategy chain: the
/// marker block, the whole trimmed response when it already starts like
/// JSON, the widest `{...}` span, the widest `[...]` span. The first
/// strategy that yields a slice wins; its slice is parsed strictly and,
/// failing that, once more with raw control characters escaped.
/// Anything unrecoverable comes back as [`ExtractedValue::Empty`].
pub fn extract_json(response: &str) -> ExtractedValue {
    let Some(candidate) = candidate_slice(response) else {
        log::error!("could not find any JSON structure in the response");
        log::error!("full response:\n{response}");
        return ExtractedValue::Empty;
    };
    let Some(value) = parse_candidate(candidate) else {
        return ExtractedValue::Empty;
    };
    match value {
        Value::Object(map) => ExtractedValue::Object(map),
        Value::Array(items) => ExtractedValue::Array(items),
        other => {
            log::warn!(
                "parsed JSON is a bare {}, expected an object or array",
                json_type_name(&other)
            );
            ExtractedValue::Empty
        }
    }
}

fn candidate_slice(response: &str) -> Option<&str> {
    if let Some(caps) = marker_block_re().captures(response) {
        return caps.get(1).map(|m| m.as_str().trim());
    }
    let trimmed = response.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(trimmed);
    }
    if let Some(m) = object_span_re().find(response) {
        return Some(m.as_str().trim());
    }
    if let Some(m) = array_span_re().find(response) {
        return Some(m.as_str().trim());
    }
    None
}

fn parse_candidate(candidate: &str) -> Option<Value> {
    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(first) => {
            log::warn!("strict JSON parse failed: {first}. Retrying with control characters escaped.");
            let relaxed = escape_control_chars_in_strings(candidate);
            match serde_json::from_str(&relaxed) {
                Ok(value) => Some(value),
                Err(second) => {
                    log_parse_failure(&relaxed, &second);
                    None
                }
            }
        }
    }
}

/// Rewrites raw C0 control characters inside string literals as escape
/// sequences, so text a model forgot to escape still parses.
fn escape_control_chars_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn log_parse_failure(text: &str, err: &serde_json::Error) {
    let offset = byte_offset_of(text, err.line(), err.column());
    let narrow_start = floor_char_boundary(text, offset.saturating_sub(30));
    let narrow_end = ceil_char_boundary(text, offset.saturating_add(30));
    let wide_start = floor_char_boundary(text, offset.saturating_sub(150));
    let wide_end = ceil_char_boundary(text, offset.saturating_add(150));

    log::error!("failed to parse JSON even after control-character cleanup: {err}");
    log::error!(
        "error near byte {offset}: ...{}...",
        printable_window(&text[narrow_start..narrow_end])
    );
    log::error!(
        "snippet around the error:\n---\n{}\n---",
        &text[wide_start..wide_end]
    );
}

/// serde_json reports 1-based line/column; turn that back into a byte
/// offset into the parsed text.
fn byte_offset_of(text: &str, line: usize, column: usize) -> usize {
    let mut offset = 0usize;
    for (idx, l) in text.split('\n').enumerate() {
        if idx + 1 == line {
            return (offset + column.saturating_sub(1)).min(text.len());
        }
        offset += l.len() + 1;
    }
    text.len()
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn printable_window(window: &str) -> String {
    let mut out = String::with_capacity(window.len());
    for c in window.chars() {
        if c.is_control() && !matches!(c, '\n' | '\r' | '\t') {
            let _ = write!(out, "\\x{:02x}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

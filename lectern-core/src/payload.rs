use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::SlideKind;

/// Standing text of the parse-failure sentinel.
pub const FAILED_PARSE_TEXT: &str = "Error: Could not generate content.";
/// Standing reason of the parse-failure sentinel.
pub const FAILED_PARSE_REASON: &str = "Failed to generate or parse content";

/// Typed content for one slide, decoded from a content-stage response.
///
/// `Failed` is a first-class variant rather than an error: a slide whose
/// content could not be produced still occupies its position in the
/// deck, it just renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlidePayload {
    Title {
        /// Deck-facing title; `None` falls back to the structural title.
        title: Option<String>,
        subtitle: String,
        presenter: String,
        date: String,
    },
    Content {
        body: Vec<String>,
    },
    Bullets {
        points: Vec<String>,
    },
    Conclusion {
        takeaways: Vec<String>,
    },
    Image {
        caption: Vec<String>,
        description: Option<String>,
        needs_image: bool,
        image_url: Option<String>,
    },
    Failed {
        message: Vec<String>,
        reason: String,
    },
}

impl SlidePayload {
    /// Decodes the content-stage object for a slide of the given kind.
    ///
    /// An object carrying a truthy `error` key is the wire form of a
    /// failed slide and decodes to [`SlidePayload::Failed`] regardless
    /// of kind.
    pub fn decode(kind: SlideKind, entry: &Map<String, Value>) -> SlidePayload {
        if truthy(entry.get("error")) {
            let mut message = text_fragments(entry, "main_content");
            if message.is_empty() {
                message.push(FAILED_PARSE_TEXT.to_string());
            }
            let reason = match entry.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return SlidePayload::Failed { message, reason };
        }

        match kind {
            SlideKind::Title => SlidePayload::Title {
                title: text_field(entry, "title"),
                subtitle: text_field(entry, "subtitle").unwrap_or_default(),
                presenter: text_field(entry, "presenter").unwrap_or_default(),
                date: text_field(entry, "date").unwrap_or_default(),
            },
            SlideKind::Content => SlidePayload::Content {
                body: text_fragments(entry, "main_content"),
            },
            SlideKind::BulletPoints => SlidePayload::Bullets {
                points: text_fragments(entry, "main_content"),
            },
            SlideKind::Conclusion => SlidePayload::Conclusion {
                takeaways: text_fragments(entry, "main_content"),
            },
            SlideKind::Image => SlidePayload::Image {
                caption: text_fragments(entry, "main_content"),
                description: text_field(entry, "image_description"),
                needs_image: truthy(entry.get("needs_image")),
                image_url: None,
            },
        }
    }

    /// Sentinel for a response that produced no usable JSON object.
    pub fn failed_parse() -> SlidePayload {
        SlidePayload::Failed {
            message: vec![FAILED_PARSE_TEXT.to_string()],
            reason: FAILED_PARSE_REASON.to_string(),
        }
    }

    /// Sentinel for a generation call that failed outright.
    pub fn failed_request(reason: impl Into<String>) -> SlidePayload {
        let reason = reason.into();
        SlidePayload::Failed {
            message: vec![format!("Error generating content: {reason}")],
            reason,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SlidePayload::Failed { .. })
    }

    /// Body text fragments, whatever the variant calls them.
    pub fn fragments(&self) -> &[String] {
        match self {
            SlidePayload::Title { .. } => &[],
            SlidePayload::Content { body } => body,
            SlidePayload::Bullets { points } => points,
            SlidePayload::Conclusion { takeaways } => takeaways,
            SlidePayload::Image { caption, .. } => caption,
            SlidePayload::Failed { message, .. } => message,
        }
    }
}

fn text_field(entry: &Map<String, Value>, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads a text list leniently: a bare string becomes a single
/// fragment, non-string scalars are stringified, nulls are dropped.
fn text_fragments(entry: &Map<String, Value>, key: &str) -> Vec<String> {
    match entry.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(fragment_text).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.to_string()],
    }
}

fn fragment_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Loose truthiness: models emit `true`, `"true"`, and `1`
/// interchangeably for flags like `needs_image`.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

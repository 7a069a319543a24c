use serde::{Deserialize, Serialize};

/// The five slide roles the structure model is allowed to emit.
///
/// The serde names double as the wire vocabulary used in prompts and in
/// the model's JSON output. Anything outside this set gets coerced to
/// [`SlideKind::Content`] during outline validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideKind {
    #[serde(rename = "title_slide")]
    Title,
    #[serde(rename = "content_slide")]
    Content,
    #[serde(rename = "bullet_point_slide")]
    BulletPoints,
    #[serde(rename = "image_slide")]
    Image,
    #[serde(rename = "conclusion_slide")]
    Conclusion,
}

impl SlideKind {
    pub const ALL: [SlideKind; 5] = [
        SlideKind::Title,
        SlideKind::Content,
        SlideKind::BulletPoints,
        SlideKind::Image,
        SlideKind::Conclusion,
    ];

    /// Wire name, e.g. `"bullet_point_slide"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SlideKind::Title => "title_slide",
            SlideKind::Content => "content_slide",
            SlideKind::BulletPoints => "bullet_point_slide",
            SlideKind::Image => "image_slide",
            SlideKind::Conclusion => "conclusion_slide",
        }
    }

    pub fn from_wire(name: &str) -> Option<SlideKind> {
        SlideKind::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

/// One entry of the deck structure: where a slide sits, what it is
/// called, and what role it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    /// 1-based position within the deck.
    #[serde(rename = "slide_number")]
    pub number: u32,
    #[serde(rename = "slide_title")]
    pub title: String,
    #[serde(rename = "slide_type")]
    pub kind: SlideKind,
}

/// How the lecture is delivered. Interpolated verbatim into the
/// structure prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMedium {
    InPersonLecture,
    OnlineLecture,
    Workshop,
    TutorialSession,
}

impl DeliveryMedium {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryMedium::InPersonLecture => "In-person Lecture",
            DeliveryMedium::OnlineLecture => "Online Lecture",
            DeliveryMedium::Workshop => "Workshop",
            DeliveryMedium::TutorialSession => "Tutorial Session",
        }
    }

    /// Accepts the display name or a short keyword, case-insensitively.
    pub fn parse(input: &str) -> Option<DeliveryMedium> {
        match input.trim().to_ascii_lowercase().as_str() {
            "in-person lecture" | "in-person" | "in_person" => Some(DeliveryMedium::InPersonLecture),
            "online lecture" | "online" => Some(DeliveryMedium::OnlineLecture),
            "workshop" => Some(DeliveryMedium::Workshop),
            "tutorial session" | "tutorial" => Some(DeliveryMedium::TutorialSession),
            _ => None,
        }
    }
}

/// Target audience depth. The prompts use the lowercased form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Basic => "Basic",
            Complexity::Intermediate => "Intermediate",
            Complexity::Advanced => "Advanced",
        }
    }

    /// Lowercased form as it appears inside prompt text.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Complexity::Basic => "basic",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
        }
    }

    pub fn parse(input: &str) -> Option<Complexity> {
        match input.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Complexity::Basic),
            "intermediate" => Some(Complexity::Intermediate),
            "advanced" => Some(Complexity::Advanced),
            _ => None,
        }
    }
}

/// A single text-generation call, fully specified by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Everything the pipeline needs to produce one deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckRequest {
    pub topic: String,
    pub medium: DeliveryMedium,
    pub complexity: Complexity,
    /// Optional source material excerpted into the structure prompt.
    pub reference_text: Option<String>,
    /// Human-readable date stamped on the title slide, e.g. `August 23, 2026`.
    pub date: String,
}

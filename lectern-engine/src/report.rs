use lectern_core::outline::SlideOutline;
use lectern_core::payload::SlidePayload;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckStage {
    Outline,
    Content,
    Assembling,
    Done,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTimings {
    pub outline_ms: Option<u64>,
    pub content_ms: Option<u64>,
    pub assemble_ms: Option<u64>,
}

/// Everything a run produced, including partial results when a stage
/// degraded or failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckResult {
    pub stage: DeckStage,

    // A stable string label for progress display.
    // This is intentionally not derived from `Debug`.
    pub stage_label: Option<String>,

    pub outline: SlideOutline,
    /// Payloads in deck order; a position that never received content
    /// stays `None` and is skipped at assembly.
    pub payloads: Vec<Option<SlidePayload>>,
    pub slides_planned: usize,
    /// Payloads that carry real content rather than a failure sentinel.
    pub slides_generated: usize,
    /// Slides that made it into the serialized deck.
    pub slides_rendered: usize,
    pub timings: DeckTimings,
    /// Serialized deck bytes. Not serialized with the report; the
    /// caller persists the file separately.
    #[serde(skip)]
    pub document: Vec<u8>,
    pub error: Option<String>,
}

impl DeckResult {
    /// Fresh result shell for a validated outline, before any content
    /// has been generated.
    pub fn planned(outline: SlideOutline) -> DeckResult {
        let slides_planned = outline.len();
        DeckResult {
            stage: DeckStage::Outline,
            stage_label: Some("outline".into()),
            outline,
            payloads: Vec::new(),
            slides_planned,
            slides_generated: 0,
            slides_rendered: 0,
            timings: DeckTimings::default(),
            document: Vec::new(),
            error: None,
        }
    }
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

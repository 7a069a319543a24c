use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{SlideDescriptor, SlideKind};

/// Validated deck structure: descriptors in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideOutline {
    slides: Vec<SlideDescriptor>,
}

impl SlideOutline {
    /// Builds an outline from the raw array the structure model produced.
    ///
    /// Entries that are not objects, or that lack a string `slide_title`
    /// or a `slide_type`, are dropped with a warning. A present but
    /// unknown `slide_type` keeps the slide and coerces it to
    /// [`SlideKind::Content`]. Survivors are renumbered 1-based, so
    /// numbers always match positions here.
    pub fn from_extracted(items: &[Value]) -> SlideOutline {
        let mut slides: Vec<SlideDescriptor> = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let Some(entry) = item.as_object() else {
                log::warn!("skipping structure item at index {idx}: not a JSON object");
                continue;
            };
            let Some(title) = entry.get("slide_title").and_then(Value::as_str) else {
                log::warn!("skipping structure item at index {idx}: no usable slide_title");
                continue;
            };
            let kind = match entry.get("slide_type") {
                Some(value) => match value.as_str().and_then(SlideKind::from_wire) {
                    Some(kind) => kind,
                    None => {
                        log::warn!(
                            "slide {:?} has invalid type {value}, replacing with content_slide",
                            title
                        );
                        SlideKind::Content
                    }
                },
                None => {
                    log::warn!("skipping structure item at index {idx}: no slide_type");
                    continue;
                }
            };
            slides.push(SlideDescriptor {
                number: slides.len() as u32 + 1,
                title: title.to_string(),
                kind,
            });
        }
        SlideOutline { slides }
    }

    /// Rebuilds an outline from descriptors, renumbering them 1-based.
    pub fn from_descriptors(descriptors: Vec<SlideDescriptor>) -> SlideOutline {
        let slides = descriptors
            .into_iter()
            .enumerate()
            .map(|(idx, mut slide)| {
                slide.number = idx as u32 + 1;
                slide
            })
            .collect();
        SlideOutline { slides }
    }

    /// Adopts descriptors exactly as given, numbers included.
    ///
    /// Entry point for externally edited structures. When numbers drift
    /// from positions, [`SlideOutline::next_after`] follows positions,
    /// so lead-in detection degrades; renumber via
    /// [`SlideOutline::from_descriptors`] unless the caller needs the
    /// original numbering preserved.
    pub fn from_edited(slides: Vec<SlideDescriptor>) -> SlideOutline {
        SlideOutline { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.slides
    }

    /// The slide stored directly after the slide numbered `number`.
    ///
    /// Numbers are 1-based and positions 0-based, so the follower of
    /// slide `n` sits at index `n`.
    pub fn next_after(&self, number: u32) -> Option<&SlideDescriptor> {
        self.slides.get(number as usize)
    }

    /// True when `slide` is a content slide that sets up an image slide
    /// with the same title coming directly after it.
    pub fn is_lead_in(&self, slide: &SlideDescriptor) -> bool {
        if slide.kind != SlideKind::Content {
            return false;
        }
        match self.next_after(slide.number) {
            Some(next) => next.kind == SlideKind::Image && next.title == slide.title,
            None => false,
        }
    }
}

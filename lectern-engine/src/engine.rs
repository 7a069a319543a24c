use crate::assemble::assemble_deck;
use crate::report::{DeckResult, DeckStage, ms};
use crate::traits::{ImageFetcher, TextGenerator};
use lectern_core::extract::extract_json;
use lectern_core::outline::SlideOutline;
use lectern_core::payload::SlidePayload;
use lectern_core::prompts::{build_content_request, build_outline_request};
use lectern_core::types::{DeckRequest, SlideDescriptor};
use lectern_providers::images::{DEFAULT_IMAGE_BASE_URL, resolve_image_url, unix_seed};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

const STAGE_OUTLINE: &str = "outline";
const STAGE_CONTENT: &str = "content";
const STAGE_ASSEMBLING: &str = "assembling";
const STAGE_DONE: &str = "done";
const STAGE_FAILED: &str = "failed";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("structure generation returned no usable slides")]
    EmptyOutline,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base of the prompt-to-image endpoint; slide image URLs are
    /// composed against it.
    pub image_base_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

pub struct DeckEngine {
    cfg: EngineConfig,
    generator: Arc<dyn TextGenerator>,
    fetcher: Arc<dyn ImageFetcher>,
}

impl DeckEngine {
    pub fn new(
        cfg: EngineConfig,
        generator: Arc<dyn TextGenerator>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            cfg,
            generator,
            fetcher,
        }
    }

    /// Runs the structure stage: one generation call, extracted and
    /// validated into an outline.
    ///
    /// This is the pipeline's one hard stop. A response that yields no
    /// array, or an array with no usable slides, fails the whole run;
    /// everything downstream degrades per slide instead.
    pub async fn generate_outline(&self, request: &DeckRequest) -> anyhow::Result<SlideOutline> {
        let response = self
            .generator
            .generate(&build_outline_request(request))
            .await?;
        let Some(items) = extract_json(&response).into_array() else {
            log::error!("structure response did not contain a JSON array");
            return Err(EngineError::EmptyOutline.into());
        };
        let outline = SlideOutline::from_extracted(&items);
        if outline.is_empty() {
            return Err(EngineError::EmptyOutline.into());
        }
        Ok(outline)
    }

    /// Runs the content stage for one slide. Failures land in the
    /// payload as a sentinel, never in a `Result`, so one bad slide
    /// cannot abort its siblings.
    pub async fn generate_slide_content(
        &self,
        slide: &SlideDescriptor,
        request: &DeckRequest,
        outline: &SlideOutline,
    ) -> SlidePayload {
        let response = match self
            .generator
            .generate(&build_content_request(slide, request, outline))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::error!("content generation for slide {} failed: {e:#}", slide.number);
                return SlidePayload::failed_request(e.to_string());
            }
        };

        let payload = match extract_json(&response).into_object() {
            Some(entry) if !entry.is_empty() => SlidePayload::decode(slide.kind, &entry),
            _ => {
                log::error!("no usable content object for slide {}", slide.number);
                SlidePayload::failed_parse()
            }
        };

        self.attach_image_url(slide, request, payload)
    }

    /// Resolves an image URL for payloads that asked for one. The
    /// description falls back to a title-derived default when the model
    /// omitted it.
    fn attach_image_url(
        &self,
        slide: &SlideDescriptor,
        request: &DeckRequest,
        payload: SlidePayload,
    ) -> SlidePayload {
        match payload {
            SlidePayload::Image {
                caption,
                description,
                needs_image: true,
                image_url: _,
            } => {
                let prompt = description
                    .clone()
                    .unwrap_or_else(|| format!("Illustration for {}", slide.title));
                let url =
                    resolve_image_url(&self.cfg.image_base_url, &prompt, &request.topic, unix_seed());
                SlidePayload::Image {
                    caption,
                    description,
                    needs_image: true,
                    image_url: Some(url),
                }
            }
            other => other,
        }
    }

    /// Generates content for every outline slide, strictly in order.
    ///
    /// Results are placed at `slide_number - 1`; a number outside the
    /// deck is logged and the payload placed by iteration position so
    /// nothing is lost. Positions that never received a payload stay
    /// `None`.
    pub async fn generate_contents(
        &self,
        request: &DeckRequest,
        outline: &SlideOutline,
    ) -> Vec<Option<SlidePayload>> {
        let total = outline.len();
        let mut contents: Vec<Option<SlidePayload>> = vec![None; total];
        for (idx, slide) in outline.slides().iter().enumerate() {
            let payload = self.generate_slide_content(slide, request, outline).await;
            let number = slide.number as usize;
            if (1..=total).contains(&number) {
                contents[number - 1] = Some(payload);
            } else {
                log::error!("slide number {number} is outside the deck of {total} slides");
                if idx < total {
                    contents[idx] = Some(payload);
                } else {
                    contents.push(Some(payload));
                }
            }
        }
        contents
    }

    /// Runs the full pipeline (outline -> per-slide content -> assembly).
    pub async fn run(&self, request: &DeckRequest) -> anyhow::Result<DeckResult> {
        self.run_with_hook(request, |_stage| async {}).await
    }

    /// Same as `run`, but emits a stage hook as the pipeline progresses.
    ///
    /// The hook is intended for progress display and must be fast.
    pub async fn run_with_hook<F, Fut>(
        &self,
        request: &DeckRequest,
        on_stage: F,
    ) -> anyhow::Result<DeckResult>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        on_stage(STAGE_OUTLINE).await;
        let t0 = Instant::now();
        let outline = self.generate_outline(request).await?;
        let outline_ms = ms(t0.elapsed());

        let mut result = DeckResult::planned(outline);
        result.timings.outline_ms = Some(outline_ms);

        result.stage = DeckStage::Content;
        result.stage_label = Some(STAGE_CONTENT.into());
        on_stage(STAGE_CONTENT).await;

        let c0 = Instant::now();
        result.payloads = self.generate_contents(request, &result.outline).await;
        result.timings.content_ms = Some(ms(c0.elapsed()));

        result.slides_generated = result
            .payloads
            .iter()
            .flatten()
            .filter(|p| !p.is_failed())
            .count();
        if result.slides_generated < result.slides_planned {
            log::warn!(
                "generated {} of {} planned slides",
                result.slides_generated,
                result.slides_planned
            );
        }

        result.stage = DeckStage::Assembling;
        result.stage_label = Some(STAGE_ASSEMBLING.into());
        on_stage(STAGE_ASSEMBLING).await;

        let a0 = Instant::now();
        match assemble_deck(
            &result.outline,
            &result.payloads,
            &request.topic,
            self.fetcher.as_ref(),
        )
        .await
        {
            Ok((document, rendered)) => {
                result.timings.assemble_ms = Some(ms(a0.elapsed()));
                result.document = document;
                result.slides_rendered = rendered;
                result.stage = DeckStage::Done;
                result.stage_label = Some(STAGE_DONE.into());
            }
            Err(e) => {
                result.timings.assemble_ms = Some(ms(a0.elapsed()));
                result.stage = DeckStage::Failed;
                result.stage_label = Some(STAGE_FAILED.into());
                result.error = Some(e.to_string());
            }
        }
        Ok(result)
    }
}

use crate::traits::ImageFetcher;
use lectern_core::outline::SlideOutline;
use lectern_core::payload::SlidePayload;
use lectern_core::types::SlideKind;
use lectern_pptx::deck::{DeckBuilder, ImageBlock};

/// Renders outline/payload pairs into a finished deck.
///
/// Pairs are walked positionally over the shorter of the two sequences;
/// a length mismatch is logged, not fatal. A missing or failed payload
/// contributes no slide at all. Returns the serialized bytes and how
/// many slides were rendered.
pub async fn assemble_deck(
    outline: &SlideOutline,
    payloads: &[Option<SlidePayload>],
    topic: &str,
    fetcher: &dyn ImageFetcher,
) -> anyhow::Result<(Vec<u8>, usize)> {
    if outline.len() != payloads.len() {
        log::warn!(
            "outline has {} slides but {} payloads; rendering the shorter run",
            outline.len(),
            payloads.len()
        );
    }

    let mut deck = DeckBuilder::new(topic);
    for (slide, payload) in outline.slides().iter().zip(payloads) {
        let Some(payload) = payload else {
            log::warn!(
                "slide {} ({:?}) never received content, skipping",
                slide.number,
                slide.title
            );
            continue;
        };
        if payload.is_failed() {
            log::warn!(
                "slide {} ({:?}) has no usable content, skipping",
                slide.number,
                slide.title
            );
            continue;
        }

        match slide.kind {
            SlideKind::Title => {
                let (title, subtitle, presenter, date) = match payload {
                    SlidePayload::Title {
                        title,
                        subtitle,
                        presenter,
                        date,
                    } => (
                        title.as_deref().unwrap_or(&slide.title),
                        subtitle.as_str(),
                        presenter.as_str(),
                        date.as_str(),
                    ),
                    _ => {
                        log::warn!(
                            "slide {} is a title slide but its content is not; using defaults",
                            slide.number
                        );
                        (slide.title.as_str(), "", "", "")
                    }
                };
                deck.add_title_slide(title, subtitle, presenter, date);
            }
            SlideKind::Content | SlideKind::BulletPoints | SlideKind::Conclusion => {
                deck.add_body_slide(
                    &slide.title,
                    payload.fragments(),
                    slide.kind == SlideKind::BulletPoints,
                );
            }
            SlideKind::Image => {
                let block = image_block(slide.number, payload, fetcher).await;
                deck.add_image_slide(&slide.title, block);
            }
        }
    }

    let rendered = deck.slide_count();
    let document = deck.finish()?;
    Ok((document, rendered))
}

async fn image_block(
    slide_number: u32,
    payload: &SlidePayload,
    fetcher: &dyn ImageFetcher,
) -> ImageBlock {
    let SlidePayload::Image {
        caption, image_url, ..
    } = payload
    else {
        log::warn!("image slide {slide_number} carries non-image content");
        return ImageBlock::MissingSource;
    };

    let Some(url) = image_url else {
        log::warn!("image slide {slide_number} never resolved an image url");
        return ImageBlock::MissingSource;
    };

    match fetcher.fetch(url).await {
        Ok(bytes) => {
            let caption = if caption.is_empty() {
                None
            } else {
                Some(caption.join("\n"))
            };
            ImageBlock::Picture { bytes, caption }
        }
        Err(e) => {
            log::error!("downloading visual for slide {slide_number}: {e:#}");
            ImageBlock::FetchFailed {
                detail: e.to_string(),
            }
        }
    }
}

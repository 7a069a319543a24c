use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

/// Default base of the prompt-to-image endpoint.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai/prompt/";
/// Static placeholder used when no real image URL can be composed.
pub const FALLBACK_IMAGE_URL: &str = "https://placehold.co/1024x576/eee/ccc?text=Image+Gen+Error";
/// Descriptions are cut to this many characters before encoding.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

const IMAGE_WIDTH: u32 = 1024;
// 16:9, matching the deck's slide aspect.
const IMAGE_HEIGHT: u32 = 576;

/// Composes the image URL for one slide.
///
/// The description is truncated, wrapped in a fixed educational framing
/// together with the deck topic, percent-encoded, and suffixed with
/// sizing and a seed. An unusable `base_url` falls back to
/// [`FALLBACK_IMAGE_URL`] so the slide still gets a picture.
pub fn resolve_image_url(base_url: &str, description: &str, context: &str, seed: u64) -> String {
    if Url::parse(base_url).is_err() {
        log::warn!("image base url {base_url:?} is not a valid URL, using placeholder");
        return FALLBACK_IMAGE_URL.to_string();
    }

    let description = truncate_description(description);
    let prompt = format!(
        "Educational illustration: {description}. Context: {context}. Style: clean, professional, clear, high resolution."
    );
    let encoded = urlencoding::encode(&prompt);

    format!("{base_url}{encoded}?width={IMAGE_WIDTH}&height={IMAGE_HEIGHT}&seed={seed}&nologo=true")
}

/// Cache-busting seed: seconds since the epoch.
pub fn unix_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

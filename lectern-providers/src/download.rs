use std::time::Duration;

use futures_util::StreamExt;
use thiserror::Error;

/// Hard cap on a single image download.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

// Some image hosts reject clients without a browser-looking agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("image request timed out")]
    Timeout,
    #[error("image transfer failed: {0}")]
    Transfer(String),
    #[error("image endpoint returned HTTP {0}")]
    Status(u16),
    #[error("image exceeded the {limit_bytes} byte download limit")]
    TooLarge { limit_bytes: usize },
    #[error("image download resulted in empty content")]
    Empty,
}

/// Downloads an image, streaming the body so an oversized response is
/// cut off at [`MAX_IMAGE_BYTES`] instead of buffered whole.
pub async fn fetch_image(url: &str) -> Result<Vec<u8>, DownloadError> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| DownloadError::Transfer(e.to_string()))?;

    let resp = client
        .get(url)
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(classify)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status.as_u16()));
    }

    if let Some(content_type) = resp.headers().get(reqwest::header::CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or("");
        if !content_type.contains("image") {
            log::warn!("image url returned content type {content_type:?}, which might not be an image");
        }
    }

    let mut body: Vec<u8> = Vec::new();
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(classify)?;
        if body.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(DownloadError::TooLarge {
                limit_bytes: MAX_IMAGE_BYTES,
            });
        }
        body.extend_from_slice(&chunk);
    }

    if body.is_empty() {
        return Err(DownloadError::Empty);
    }
    Ok(body)
}

fn classify(err: reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::Timeout
    } else {
        DownloadError::Transfer(err.to_string())
    }
}

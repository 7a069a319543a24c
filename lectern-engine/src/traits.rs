use async_trait::async_trait;
use lectern_core::types::GenerationRequest;

/// Text-completion backend behind both generation stages.
///
/// The engine only ever sends a prompt and reads back the raw response
/// text; extraction and validation happen on this side of the seam.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;
}

/// Fetches resolved image URLs during deck assembly.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

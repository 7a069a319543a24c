use lectern_core::GenerationRequest;
use serde_json::json;

use crate::request::{Body, HttpRequest};

/// Connection details for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEndpoint {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Builds the chat completions call for one generation request.
///
/// The prompt travels as a single user message; token budget and
/// temperature come from the request so each pipeline stage keeps its
/// own limits.
pub fn build_chat_request(endpoint: &ChatEndpoint, request: &GenerationRequest) -> HttpRequest {
    let url = join_url(&endpoint.base_url, "/chat/completions");

    let payload = json!({
        "model": endpoint.model,
        "messages": [{"role": "user", "content": request.prompt}],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Authorization".into(), format!("Bearer {}", endpoint.api_key)),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

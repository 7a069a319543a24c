use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lectern_core::{Complexity, DeckRequest, DeliveryMedium, GenerationRequest};
use lectern_engine::{DeckEngine, DeckStage, EngineConfig, ImageFetcher, TextGenerator};
use lectern_providers::images::DEFAULT_IMAGE_BASE_URL;
use lectern_providers::{ChatEndpoint, build_chat_request, fetch_image, parse_chat_completion};
use lectern_providers::runtime;

#[derive(Parser)]
#[command(
    name = "lectern",
    version,
    about = "Generates a lecture slide deck from a topic: outline, per-slide content, visuals, PPTX"
)]
struct Cli {
    /// Lecture topic, e.g. "Photosynthesis".
    topic: String,

    /// Delivery medium: in-person | online | workshop | tutorial.
    #[arg(long, default_value = "in-person", value_parser = parse_medium)]
    medium: DeliveryMedium,

    /// Audience level: basic | intermediate | advanced.
    #[arg(long, default_value = "basic", value_parser = parse_level)]
    level: Complexity,

    /// Where to write the finished deck.
    #[arg(long, default_value = "deck.pptx")]
    out: PathBuf,

    /// Plain-text file with source material to ground the outline in.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Chat model name.
    #[arg(long, env = "GROQ_MODEL", default_value = "llama-3.1-70b-versatile")]
    model: String,

    /// Base URL of the OpenAI-compatible chat completions API.
    #[arg(long, env = "GROQ_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
    base_url: String,

    /// Base URL of the prompt-to-image endpoint.
    #[arg(long, env = "POLLINATIONS_API_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    image_base_url: String,
}

fn parse_medium(input: &str) -> Result<DeliveryMedium, String> {
    DeliveryMedium::parse(input).ok_or_else(|| {
        format!("unknown medium {input:?}; expected in-person, online, workshop or tutorial")
    })
}

fn parse_level(input: &str) -> Result<Complexity, String> {
    Complexity::parse(input)
        .ok_or_else(|| format!("unknown level {input:?}; expected basic, intermediate or advanced"))
}

/// Chat completions over the configured OpenAI-compatible endpoint.
struct GroqGenerator {
    endpoint: ChatEndpoint,
}

#[async_trait::async_trait]
impl TextGenerator for GroqGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let req = build_chat_request(&self.endpoint, request);
        let resp = runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!(
                "chat completions request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            ));
        }
        parse_chat_completion(&resp.body)
    }
}

struct HttpImageFetcher;

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        Ok(fetch_image(url).await?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Checked before any network call so a missing key fails fast.
    let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
    if api_key.trim().is_empty() {
        anyhow::bail!("GROQ_API_KEY is not set; deck generation needs a chat completions key");
    }

    let reference_text = match &cli.reference {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading reference file {}", path.display()))?,
        ),
        None => None,
    };

    let request = DeckRequest {
        topic: cli.topic.clone(),
        medium: cli.medium,
        complexity: cli.level,
        reference_text,
        date: chrono::Local::now().format("%B %d, %Y").to_string(),
    };

    let engine = DeckEngine::new(
        EngineConfig {
            image_base_url: cli.image_base_url.clone(),
        },
        Arc::new(GroqGenerator {
            endpoint: ChatEndpoint {
                base_url: cli.base_url.clone(),
                api_key,
                model: cli.model.clone(),
            },
        }),
        Arc::new(HttpImageFetcher),
    );

    let result = engine
        .run_with_hook(&request, |stage| async move {
            println!("stage={stage}");
        })
        .await?;

    if result.stage == DeckStage::Failed {
        anyhow::bail!(
            "deck assembly failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    std::fs::write(&cli.out, &result.document)
        .with_context(|| format!("writing {}", cli.out.display()))?;

    println!(
        "wrote {}: {} of {} planned slides generated, {} rendered",
        cli.out.display(),
        result.slides_generated,
        result.slides_planned,
        result.slides_rendered
    );
    println!(
        "timings: outline={:?}ms content={:?}ms assemble={:?}ms",
        result.timings.outline_ms, result.timings.content_ms, result.timings.assemble_ms
    );

    Ok(())
}

use std::collections::VecDeque;
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

use lectern_core::outline::SlideOutline;
use lectern_core::types::{
    Complexity, DeckRequest, DeliveryMedium, GenerationRequest, SlideDescriptor, SlideKind,
};
use lectern_engine::engine::{DeckEngine, EngineConfig};
use lectern_engine::report::DeckStage;
use lectern_engine::traits::{ImageFetcher, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

fn deck_request() -> DeckRequest {
    DeckRequest {
        topic: "Photosynthesis".into(),
        medium: DeliveryMedium::InPersonLecture,
        complexity: Complexity::Basic,
        reference_text: None,
        date: "May 1, 2026".into(),
    }
}

/// Chat completion body carrying `content` as the assistant message.
fn chat_body(content: &str) -> String {
    json!({"choices": [{"message": {"content": content}}]}).to_string()
}

/// Wraps a JSON value in the delimiters the prompts ask for, padded
/// with the kind of prose models actually produce.
fn marked(value: serde_json::Value) -> String {
    format!("Sure! Here is the JSON you asked for.\nSTART OF JSON\n{value}\nEND OF JSON\nLet me know if you need changes.")
}

fn four_slide_outline() -> serde_json::Value {
    json!([
        {"slide_number": 1, "slide_title": "Introduction to Photosynthesis", "slide_type": "title_slide"},
        {"slide_number": 2, "slide_title": "How Light Becomes Sugar", "slide_type": "content_slide"},
        {"slide_number": 3, "slide_title": "How Light Becomes Sugar", "slide_type": "image_slide"},
        {"slide_number": 4, "slide_title": "Conclusion", "slide_type": "conclusion_slide"}
    ])
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut out = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn has_part(bytes: &[u8], name: &str) -> bool {
    zip::ZipArchive::new(Cursor::new(bytes.to_vec()))
        .unwrap()
        .by_name(name)
        .is_ok()
}

/// Replays canned responses in order and records every prompt it saw.
struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(responses: impl IntoIterator<Item = String>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted response left"))
    }
}

/// Generator backed by a real chat completions call.
struct ChatGenerator {
    endpoint: lectern_providers::chat::ChatEndpoint,
}

#[async_trait::async_trait]
impl TextGenerator for ChatGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let req = lectern_providers::chat::build_chat_request(&self.endpoint, request);
        let resp = lectern_providers::runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!("bad status {}", resp.status));
        }
        lectern_providers::parse::parse_chat_completion(&resp.body)
    }
}

/// Fetcher backed by the real bounded download.
struct HttpFetcher;

#[async_trait::async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        Ok(lectern_providers::download::fetch_image(url).await?)
    }
}

struct PngFetcher;

#[async_trait::async_trait]
impl ImageFetcher for PngFetcher {
    async fn fetch(&self, _url: &str) -> anyhow::Result<Vec<u8>> {
        Ok(PNG_BYTES.to_vec())
    }
}

struct FailingFetcher;

#[async_trait::async_trait]
impl ImageFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> anyhow::Result<Vec<u8>> {
        Err(anyhow::anyhow!("image request timed out"))
    }
}

#[tokio::test]
async fn end_to_end_deck_over_http_with_lead_in_framing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("lecture slide deck outline"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body(&marked(four_slide_outline())),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("Create content for the title slide"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body(&marked(json!({
                "title": "Photosynthesis",
                "subtitle": "From Light to Life",
                "presenter": "Plant Biology 101",
                "date": "May 1, 2026"
            }))),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    // This mock only matches when the prompt carries the lead-in
    // framing, so a missed lookahead fails the whole test.
    Mock::given(method("POST"))
        .and(body_string_contains("(type: content_slide)"))
        .and(body_string_contains("*next* image slide"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body(&marked(json!({
                "main_content": [
                    "Light energy splits water.",
                    "Electrons ride the transport chain."
                ],
                "needs_image": false
            }))),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("(type: image_slide)"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body(&marked(json!({
                "main_content": ["Caption: The light reactions at a glance"],
                "needs_image": true,
                "image_description": "A chloroplast with labeled thylakoids"
            }))),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("final conclusion slide"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            chat_body(&marked(json!({
                "main_content": ["Key Takeaway 1: Light drives it all.", "Questions?"],
                "needs_image": false
            }))),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/prompt/.+"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = DeckEngine::new(
        EngineConfig {
            image_base_url: format!("{}/prompt/", server.uri()),
        },
        Arc::new(ChatGenerator {
            endpoint: lectern_providers::chat::ChatEndpoint {
                base_url: server.uri(),
                api_key: "k".into(),
                model: "llama-3.1-70b-versatile".into(),
            },
        }),
        Arc::new(HttpFetcher),
    );

    let seen: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_hook = seen.clone();
    let result = engine
        .run_with_hook(&deck_request(), move |stage| {
            let seen = seen_in_hook.clone();
            async move {
                seen.lock().unwrap().push(stage);
            }
        })
        .await
        .unwrap();

    assert_eq!(result.stage, DeckStage::Done);
    assert_eq!(result.slides_planned, 4);
    assert_eq!(result.slides_generated, 4);
    assert_eq!(result.slides_rendered, 4);
    assert_eq!(*seen.lock().unwrap(), ["outline", "content", "assembling"]);

    let doc = &result.document;
    assert!(has_part(doc, "ppt/slides/slide4.xml"));
    assert!(has_part(doc, "ppt/media/image1.png"));
    assert!(!has_part(doc, "ppt/slides/slide5.xml"));

    let title = read_part(doc, "ppt/slides/slide1.xml");
    assert!(title.contains("<a:t>From Light to Life</a:t>"));

    let lead_in = read_part(doc, "ppt/slides/slide2.xml");
    assert!(lead_in.contains("<a:t>Light energy splits water.</a:t>"));

    let image_slide = read_part(doc, "ppt/slides/slide3.xml");
    assert!(image_slide.contains("r:embed=\"rId2\""));
    assert!(image_slide.contains("Caption: The light reactions at a glance"));
}

#[tokio::test]
async fn failed_slide_is_skipped_without_aborting_siblings() {
    let generator = ScriptedGenerator::new([
        marked(four_slide_outline()),
        marked(json!({
            "title": "Photosynthesis",
            "subtitle": "From Light to Life",
            "presenter": "Plant Biology 101",
            "date": "May 1, 2026"
        })),
        "I'm sorry, I cannot produce JSON right now.".to_string(),
        marked(json!({
            "main_content": ["Caption: A chloroplast"],
            "needs_image": true,
            "image_description": "A chloroplast"
        })),
        marked(json!({"main_content": ["Takeaway."], "needs_image": false})),
    ]);

    let engine = DeckEngine::new(
        EngineConfig::default(),
        generator.clone(),
        Arc::new(PngFetcher),
    );

    let result = engine.run(&deck_request()).await.unwrap();
    assert_eq!(result.stage, DeckStage::Done);
    assert_eq!(result.slides_planned, 4);
    assert_eq!(result.payloads.len(), 4);
    assert_eq!(result.slides_generated, 3);
    assert_eq!(result.slides_rendered, 3);
    assert!(result.payloads[1].as_ref().unwrap().is_failed());

    // The deck renumbers the survivors; the failed content slide left
    // no gap behind.
    assert!(has_part(&result.document, "ppt/slides/slide3.xml"));
    assert!(!has_part(&result.document, "ppt/slides/slide4.xml"));

    // The content slide still asked for lead-in framing before failing.
    assert!(generator.prompt(2).contains("*next* image slide"));
    assert!(generator.prompt(3).contains("(type: image_slide)"));
}

#[tokio::test]
async fn unusable_structure_response_is_a_hard_stop() {
    let generator = ScriptedGenerator::new(["There is no JSON in this reply.".to_string()]);
    let engine = DeckEngine::new(EngineConfig::default(), generator, Arc::new(PngFetcher));

    let err = engine.run(&deck_request()).await.unwrap_err();
    assert!(err.to_string().contains("no usable slides"));
}

#[tokio::test]
async fn object_structure_response_is_a_hard_stop() {
    let generator = ScriptedGenerator::new([marked(
        json!({"slide_title": "Not a list", "slide_type": "content_slide"}),
    )]);
    let engine = DeckEngine::new(EngineConfig::default(), generator, Arc::new(PngFetcher));

    assert!(engine.run(&deck_request()).await.is_err());
}

#[tokio::test]
async fn out_of_range_slide_numbers_place_by_position() {
    let outline = SlideOutline::from_edited(vec![
        SlideDescriptor {
            number: 7,
            title: "Edited".into(),
            kind: SlideKind::Content,
        },
        SlideDescriptor {
            number: 2,
            title: "Kept".into(),
            kind: SlideKind::Content,
        },
    ]);

    let generator = ScriptedGenerator::new([
        marked(json!({"main_content": ["from the edited slide"], "needs_image": false})),
        marked(json!({"main_content": ["from the kept slide"], "needs_image": false})),
    ]);
    let engine = DeckEngine::new(
        EngineConfig::default(),
        generator,
        Arc::new(PngFetcher),
    );

    let contents = engine.generate_contents(&deck_request(), &outline).await;
    assert_eq!(contents.len(), 2);
    assert_eq!(
        contents[0].as_ref().unwrap().fragments(),
        ["from the edited slide"]
    );
    assert_eq!(
        contents[1].as_ref().unwrap().fragments(),
        ["from the kept slide"]
    );
}

#[tokio::test]
async fn image_download_failure_becomes_an_inline_notice() {
    let generator = ScriptedGenerator::new([
        marked(json!([
            {"slide_number": 1, "slide_title": "Rainbows", "slide_type": "content_slide"},
            {"slide_number": 2, "slide_title": "Rainbows", "slide_type": "image_slide"}
        ])),
        marked(json!({"main_content": ["Light refracts."], "needs_image": false})),
        marked(json!({
            "main_content": ["Caption: A rainbow"],
            "needs_image": true,
            "image_description": "A rainbow over a field"
        })),
    ]);

    let engine = DeckEngine::new(
        EngineConfig::default(),
        generator,
        Arc::new(FailingFetcher),
    );

    let result = engine.run(&deck_request()).await.unwrap();
    assert_eq!(result.stage, DeckStage::Done);
    assert_eq!(result.slides_rendered, 2);

    let slide = read_part(&result.document, "ppt/slides/slide2.xml");
    assert!(slide.contains("(Error adding visual: image request timed out)"));
    assert!(slide.contains("<a:srgbClr val=\"FF0000\"/>"));
    assert!(!slide.contains("r:embed"));
}

use crate::outline::SlideOutline;
use crate::types::{DeckRequest, GenerationRequest, SlideDescriptor, SlideKind};

/// Token budget for the structure call; outlines for deep topics run long.
pub const STRUCTURE_MAX_TOKENS: u32 = 2500;
/// Token budget for one slide's content call.
pub const CONTENT_MAX_TOKENS: u32 = 1000;
/// Sampling temperature shared by both stages.
pub const GENERATION_TEMPERATURE: f64 = 0.7;
/// Reference material is cut down to this many characters before it
/// enters the structure prompt.
pub const REFERENCE_EXCERPT_MAX_CHARS: usize = 3000;

const OBJECT_JSON_RULES: &str = "Your response MUST follow these rules STRICTLY:\n\
1. Provide ONLY JSON output strictly between START OF JSON and END OF JSON markers. Do NOT include any text before START OF JSON or after END OF JSON.\n\
2. The JSON MUST be a valid JSON object.\n\
3. Ensure all strings in the JSON use double quotes (\"\") and escape special characters if needed (e.g., \\n, \\\").";

/// Builds the structure-stage request: a single call that should return
/// the entire deck outline as a JSON array between the markers.
pub fn build_outline_request(request: &DeckRequest) -> GenerationRequest {
    let topic = &request.topic;
    let level = request.complexity.prompt_label();

    let mut prompt = format!(
        "Create a well-structured lecture slide deck outline on: \"{topic}\"\n\
The lecture is for {level} level students, delivered {medium}.\n",
        medium = request.medium.as_str(),
    );

    if let Some(excerpt) = reference_excerpt(request) {
        prompt.push_str(&format!(
            "\nGround the outline in the following reference material:\n\
<REFERENCE_MATERIAL>\n{excerpt}\n</REFERENCE_MATERIAL>\n"
        ));
    }

    prompt.push_str(&format!(
        "\nYour response MUST follow these rules STRICTLY:\n\
1. Provide ONLY JSON output strictly between START OF JSON and END OF JSON markers. Do NOT include any text before START OF JSON or after END OF JSON.\n\
2. The JSON MUST be a valid list of JSON objects.\n\
3. Each object MUST represent a slide and contain 'slide_number' (int), 'slide_title' (string), and 'slide_type' (string).\n\
4. Use ONLY these exact slide types: \"title_slide\", \"content_slide\", \"bullet_point_slide\", \"image_slide\", \"conclusion_slide\".\n\
5. Use \"image_slide\" for general illustrative images (generated by Pollinations) that help visualize a concept. Consider topics that can be easily represented by a single, clear image.\n\
6. Ensure all strings in the JSON use double quotes (\"\") and any special characters within strings are correctly escaped (e.g., \\n, \\\").\n\
7. IMPORTANT: If an \"image_slide\" is required to explain a topic, consider if a preceding \"content_slide\" with the same \"slide_title\" is needed to explain the concept verbally first. Pair them logically.\n\
\n\
START OF JSON\n\
[\n\
{{\n\
\"slide_number\": 1,\n\
\"slide_title\": \"Introduction to {topic}\",\n\
\"slide_type\": \"title_slide\"\n\
}},\n\
{{\n\
\"slide_number\": 2,\n\
\"slide_title\": \"[Specific Content-Driven Title]\",\n\
\"slide_type\": \"content_slide\"\n\
}},\n\
{{\n\
\"slide_number\": 3,\n\
\"slide_title\": \"[Concept Needing Visual Example]\",\n\
\"slide_type\": \"content_slide\"\n\
}},\n\
{{\n\
\"slide_number\": 4,\n\
\"slide_title\": \"[Concept Needing Visual Example]\",\n\
\"slide_type\": \"image_slide\"\n\
}},\n\
... more slides based on topic and complexity ...\n\
{{\n\
\"slide_number\": N,\n\
\"slide_title\": \"Conclusion\",\n\
\"slide_type\": \"conclusion_slide\"\n\
}}\n\
]\n\
END OF JSON\n\
\n\
Decide the total number of slides based on {level} complexity and the depth needed for \"{topic}\".\n\
Make titles specific. Use \"image_slide\" for illustrations of concepts that Pollinations AI can generally depict (e.g., objects, scenes, abstract representations).\n\
Create paired content/visual slides where appropriate. Generate valid JSON according to the rules above."
    ));

    GenerationRequest {
        prompt,
        max_tokens: STRUCTURE_MAX_TOKENS,
        temperature: GENERATION_TEMPERATURE,
    }
}

/// Builds the content-stage request for one slide. The template depends
/// on the slide kind; content slides additionally look one slide ahead
/// so a lead-in to an image slide gets its own guidance.
pub fn build_content_request(
    slide: &SlideDescriptor,
    request: &DeckRequest,
    outline: &SlideOutline,
) -> GenerationRequest {
    let prompt = match slide.kind {
        SlideKind::Title => title_prompt(slide, request),
        SlideKind::Content => content_prompt(slide, request, outline),
        SlideKind::BulletPoints => bullet_prompt(slide, request),
        SlideKind::Image => image_prompt(slide, request),
        SlideKind::Conclusion => conclusion_prompt(slide, request),
    };
    GenerationRequest {
        prompt,
        max_tokens: CONTENT_MAX_TOKENS,
        temperature: GENERATION_TEMPERATURE,
    }
}

fn title_prompt(slide: &SlideDescriptor, request: &DeckRequest) -> String {
    format!(
        "Create content for the title slide of a {level} lecture on \"{topic}\".\n\
Slide title: \"{title}\"\n\
{rules}\n\
START OF JSON\n\
{{\n\
\"title\": \"{title}\",\n\
\"subtitle\": \"An Engaging Subtitle Relevant to {topic}\",\n\
\"presenter\": \"Your Name / Affiliation\",\n\
\"date\": \"{date}\"\n\
}}\n\
END OF JSON",
        level = request.complexity.prompt_label(),
        topic = request.topic,
        title = slide.title,
        date = request.date,
        rules = OBJECT_JSON_RULES,
    )
}

fn content_prompt(slide: &SlideDescriptor, request: &DeckRequest, outline: &SlideOutline) -> String {
    let guidance = if outline.is_lead_in(slide) {
        "This slide explains the concept that will be visualized in the *next* image slide. \
Focus on setting up the visual explanation. Keep text concise."
    } else {
        "Explain the core concept clearly and concisely."
    };
    format!(
        "Create concise text content for slide {number}, titled \"{title}\" (type: {kind}), for a {level} lecture on \"{topic}\".\n\
{guidance} Aim for 2-3 short paragraphs or key points.\n\
{rules}\n\
START OF JSON\n\
{{\n\
\"main_content\": [\n\
\"Paragraph 1: Introduce the core idea of '{title}'.\",\n\
\"Paragraph 2: Elaborate with key details or context relevant to {topic}.\",\n\
\"Paragraph 3 (Optional): Add significance or a brief example.\"\n\
],\n\
\"needs_image\": false\n\
}}\n\
END OF JSON",
        number = slide.number,
        title = slide.title,
        kind = slide.kind.as_str(),
        level = request.complexity.prompt_label(),
        topic = request.topic,
        rules = OBJECT_JSON_RULES,
    )
}

fn bullet_prompt(slide: &SlideDescriptor, request: &DeckRequest) -> String {
    format!(
        "Create 3-6 concise bullet points for slide {number}, titled \"{title}\" (type: {kind}), for a {level} lecture on \"{topic}\".\n\
Each point should be short and impactful (under ~150 characters).\n\
{rules}\n\
START OF JSON\n\
{{\n\
\"main_content\": [\n\
\"Key point 1 about '{title}'.\",\n\
\"Key point 2, distinct and clear.\",\n\
\"Key point 3, adding another facet.\",\n\
\"Key point 4 (if necessary).\",\n\
\"Key point 5 (if necessary).\"\n\
],\n\
\"needs_image\": false\n\
}}\n\
END OF JSON",
        number = slide.number,
        title = slide.title,
        kind = slide.kind.as_str(),
        level = request.complexity.prompt_label(),
        topic = request.topic,
        rules = OBJECT_JSON_RULES,
    )
}

fn image_prompt(slide: &SlideDescriptor, request: &DeckRequest) -> String {
    format!(
        "Create content for slide {number}, titled \"{title}\" (type: {kind}), for a {level} lecture on \"{topic}\".\n\
This slide needs a general illustrative image from Pollinations.ai.\n\
Generate a descriptive prompt for Pollinations.ai to create a relevant and professional image.\n\
Also include a short caption for the slide. If any text is included in image strictly make sure the spelling is correct.\n\
{rules}\n\
START OF JSON\n\
{{\n\
\"main_content\": [\n\
\"Caption: Visual illustration related to {title}\"\n\
],\n\
\"needs_image\": true,\n\
\"image_description\": \"A clear, professional illustration depicting [concept related to '{title}'] for a {level} lecture on '{topic}'. Style: educational, clean background, high resolution.\"\n\
}}\n\
END OF JSON",
        number = slide.number,
        title = slide.title,
        kind = slide.kind.as_str(),
        level = request.complexity.prompt_label(),
        topic = request.topic,
        rules = OBJECT_JSON_RULES,
    )
}

fn conclusion_prompt(slide: &SlideDescriptor, request: &DeckRequest) -> String {
    format!(
        "Create content for the final conclusion slide {number}, titled \"{title}\" (type: {kind}), for a {level} lecture on \"{topic}\".\n\
Summarize 2-4 key takeaways concisely.\n\
{rules}\n\
START OF JSON\n\
{{\n\
\"main_content\": [\n\
\"Key Takeaway 1: [Summarize main point from lecture]\",\n\
\"Key Takeaway 2: [Summarize another crucial concept]\",\n\
\"Key Takeaway 3: [Summarize application or implication]\",\n\
\"Next Steps / Questions?\"\n\
],\n\
\"needs_image\": false\n\
}}\n\
END OF JSON",
        number = slide.number,
        title = slide.title,
        kind = slide.kind.as_str(),
        level = request.complexity.prompt_label(),
        topic = request.topic,
        rules = OBJECT_JSON_RULES,
    )
}

fn reference_excerpt(request: &DeckRequest) -> Option<String> {
    let text = request.reference_text.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    match text.char_indices().nth(REFERENCE_EXCERPT_MAX_CHARS) {
        Some((cut, _)) => {
            let mut excerpt = text[..cut].to_string();
            excerpt.push_str("...");
            Some(excerpt)
        }
        None => Some(text.to_string()),
    }
}

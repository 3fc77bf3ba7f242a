//! Prompt construction for the AI operations.

use pitchdesk_core::clients::Client;
use pitchdesk_core::notes::Note;

use crate::client::CompletionRequest;

pub const AD_SYSTEM_PROMPT: &str = "You are an expert marketing copywriter. Generate compelling ad content based on the user's prompt and any relevant context about the client.";
pub const CHAT_SYSTEM_PROMPT: &str = "You are an AI assistant for a multi-channel marketing platform. Help users with marketing tasks, client management, and campaign strategies. Use the provided context about clients and notes to give personalized advice.";
pub const HASHTAG_SYSTEM_PROMPT: &str = "You are a social media marketing expert. Generate relevant, engaging hashtags for social media posts.";

const AD_MAX_TOKENS: u32 = 500;
const CHAT_MAX_TOKENS: u32 = 500;
const HASHTAG_MAX_TOKENS: u32 = 200;
const HASHTAG_TEMPERATURE: f32 = 0.7;

pub fn ad_request(prompt: &str, notes: &[Note]) -> CompletionRequest {
    let context = notes
        .iter()
        .map(|note| format!("{}: {}", note.title, note.content))
        .collect::<Vec<_>>()
        .join("\n");

    let user = if context.is_empty() {
        format!("Generate ad content for: {}", prompt)
    } else {
        format!(
            "Client Context:\n{}\n\nGenerate ad content for: {}",
            context, prompt
        )
    };

    CompletionRequest {
        system: AD_SYSTEM_PROMPT.to_string(),
        user,
        max_tokens: AD_MAX_TOKENS,
        temperature: None,
    }
}

/// Client facts and notes rendered as a context block. Empty when there is
/// nothing to say.
pub fn chat_context(client: Option<&Client>, notes: &[Note]) -> String {
    let mut context = String::new();

    if let Some(client) = client {
        context.push_str("Client Information:\n");
        context.push_str(&format!("Name: {}\n", client.name));
        if let Some(business) = client.business_name.as_deref().filter(|b| !b.is_empty()) {
            context.push_str(&format!("Business: {}\n", business));
        }
        if !client.email.is_empty() {
            context.push_str(&format!("Email: {}\n", client.email));
        }
        if !client.phone_number.is_empty() {
            context.push_str(&format!("Phone: {}\n", client.phone_number));
        }
        let city = client.location.city.as_deref().unwrap_or_default();
        let country = client.location.country.as_deref().unwrap_or_default();
        if !city.is_empty() || !country.is_empty() {
            context.push_str(&format!("Location: {}, {}\n", city, country));
        }
        context.push('\n');
    }

    if !notes.is_empty() {
        context.push_str("Relevant Notes:\n");
        for note in notes {
            context.push_str(&format!("- {}: {}\n", note.title, note.content));
        }
        context.push('\n');
    }

    context
}

pub fn chat_request(message: &str, context: &str) -> CompletionRequest {
    let user = if context.is_empty() {
        message.to_string()
    } else {
        format!("{}User Question: {}", context, message)
    };

    CompletionRequest {
        system: CHAT_SYSTEM_PROMPT.to_string(),
        user,
        max_tokens: CHAT_MAX_TOKENS,
        temperature: None,
    }
}

fn platform_hint(platform: Option<&str>) -> &'static str {
    match platform.map(str::to_ascii_lowercase).as_deref() {
        Some("instagram") => "Instagram (focus on visual, lifestyle, trending hashtags)",
        Some("facebook") => "Facebook (focus on engagement, community, business hashtags)",
        Some("twitter") => "Twitter/X (focus on trending, news, conversation hashtags)",
        Some("linkedin") => "LinkedIn (focus on professional, industry, business hashtags)",
        _ => "social media",
    }
}

pub fn hashtag_request(content: &str, platform: Option<&str>, count: usize) -> CompletionRequest {
    let user = format!(
        "Generate {count} relevant hashtags for the following content, optimized for {hint}.\n\
         Return only the hashtags, one per line, without numbers or bullet points.\n\
         Make them specific, relevant, and mix popular with niche hashtags.\n\n\
         Content: {content}",
        count = count,
        hint = platform_hint(platform),
        content = content
    );

    CompletionRequest {
        system: HASHTAG_SYSTEM_PROMPT.to_string(),
        user,
        max_tokens: HASHTAG_MAX_TOKENS,
        temperature: Some(HASHTAG_TEMPERATURE),
    }
}

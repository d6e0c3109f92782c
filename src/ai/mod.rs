//! Generative-text collaborator for blog drafting.
//!
//! Talks to a hosted generative-language API and turns a topic/category
//! pair into a complete blog draft. The upstream is not guaranteed to
//! return clean JSON, so the response text is clipped to its outermost
//! braces before decoding, and the caller walks an ordered fallback model
//! list, aborting early on quota- or safety-class failures.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Models tried in order until one produces a usable draft.
const FALLBACK_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-flash-8b"];

/// A generated blog draft. Never partially applied: either all three
/// fields parsed or the generation failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
}

/// Request body for the admin draft-generation endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDraftRequest {
    pub topic: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the generative-text API.
#[derive(Clone)]
pub struct Generator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Generator {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Generate a blog draft about `topic`.
    ///
    /// Iterates the fallback model list; a quota- or safety-class failure
    /// aborts the iteration instead of burning through the remaining
    /// models. The final failure carries the last error message.
    pub async fn generate(&self, topic: &str, category: Option<&str>) -> Result<BlogDraft, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Generation("No generative-text API key configured".to_string())
        })?;

        let prompt = build_prompt(topic, category);
        let mut last_error = String::new();

        for model in FALLBACK_MODELS {
            match self.call_model(model, api_key, &prompt).await {
                Ok(text) => match parse_draft(&text) {
                    Ok(draft) => return Ok(draft),
                    Err(e) => {
                        tracing::warn!("Model {} returned an unusable draft: {}", model, e);
                        last_error = e;
                    }
                },
                Err(message) => {
                    tracing::warn!("Model {} failed: {}", model, message);
                    if is_fatal(&message) {
                        return Err(AppError::Generation(message));
                    }
                    last_error = message;
                }
            }
        }

        Err(AppError::Generation(last_error))
    }

    /// One generateContent call; returns the candidate text or an error
    /// message usable for the fatal-failure classification.
    async fn call_model(&self, model: &str, api_key: &str, prompt: &str) -> Result<String, String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;

        if !status.is_success() {
            return Err(format!("{}: {}", status, text));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| e.to_string())?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| "Empty response from model".to_string())
    }
}

fn build_prompt(topic: &str, category: Option<&str>) -> String {
    let category = category.unwrap_or("marketing digital");
    format!(
        "Escreva um artigo de blog em português sobre \"{}\" para uma agência de \
         marketing, na categoria \"{}\". Responda APENAS com um objeto JSON com \
         exatamente estes campos: \"title\" (título chamativo), \"excerpt\" (resumo \
         de até 2 frases) e \"content\" (artigo completo em HTML com <h2> e <p>).",
        topic, category
    )
}

/// Quota and safety failures abort the model iteration early.
fn is_fatal(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("quota")
        || lowered.contains("resource_exhausted")
        || lowered.contains("rate limit")
        || lowered.contains("safety")
        || lowered.contains("blocked")
}

/// Clip the response text to its outermost braces before decoding.
///
/// Models wrap JSON in prose or markdown fences often enough that decoding
/// the raw text directly would fail; a parse failure after clipping is a
/// generation failure, not a panic.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_draft(text: &str) -> Result<BlogDraft, String> {
    let clipped =
        extract_json_object(text).ok_or_else(|| "No JSON object in response".to_string())?;
    let draft: BlogDraft = serde_json::from_str(clipped).map_err(|e| e.to_string())?;

    if draft.title.trim().is_empty() || draft.content.trim().is_empty() {
        return Err("Generated draft has empty fields".to_string());
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let draft = parse_draft(
            r#"{"title": "T", "excerpt": "E", "content": "<p>C</p>"}"#,
        )
        .unwrap();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.excerpt, "E");
        assert_eq!(draft.content, "<p>C</p>");
    }

    #[test]
    fn test_parse_json_wrapped_in_markdown_fence() {
        let text = "```json\n{\"title\": \"T\", \"excerpt\": \"E\", \"content\": \"C\"}\n```";
        let draft = parse_draft(text).unwrap();
        assert_eq!(draft.title, "T");
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let text = "Claro! Aqui está o artigo:\n{\"title\": \"T\", \"excerpt\": \"E\", \"content\": \"C\"}\nEspero que ajude.";
        assert!(parse_draft(text).is_ok());
    }

    #[test]
    fn test_parse_without_braces_fails() {
        assert!(parse_draft("nenhum json aqui").is_err());
    }

    #[test]
    fn test_parse_invalid_json_after_clipping_fails() {
        assert!(parse_draft("{title: sem aspas}").is_err());
    }

    #[test]
    fn test_parse_empty_fields_fail() {
        assert!(parse_draft(r#"{"title": "", "excerpt": "E", "content": "C"}"#).is_err());
    }

    #[test]
    fn test_fatal_failure_classification() {
        assert!(is_fatal("429 Too Many Requests: quota exceeded"));
        assert!(is_fatal("RESOURCE_EXHAUSTED"));
        assert!(is_fatal("Candidate blocked by SAFETY settings"));
        assert!(!is_fatal("500 Internal Server Error"));
        assert!(!is_fatal("connection reset by peer"));
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\": 1} y"), Some("{\"a\": 1}"));
        assert_eq!(extract_json_object("{}"), Some("{}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("}{"), None);
    }
}

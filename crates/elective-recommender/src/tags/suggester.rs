//! LLM-backed tag suggestion
//!
//! Posts a fixed Spanish prompt to a chat-completions endpoint and parses
//! the reply as a comma-separated tag list. The suggester is strictly
//! best-effort: any transport, HTTP or parsing failure is logged and
//! collapsed into an empty list so registration and editing never block on
//! the external service.

use crate::config::Config;
use crate::tags::lemmatizer::lemmatize_phrase;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[async_trait]
pub trait TagSuggester: Send + Sync {
    /// Suggest up to `n` tags for a course description. Never fails: the
    /// implementation absorbs its own errors and returns an empty list.
    async fn suggest_tags(&self, description: &str, name: Option<&str>, n: usize) -> Vec<String>;
}

/// Suggester that never suggests. Used when AI tagging is disabled.
pub struct NullTagSuggester;

#[async_trait]
impl TagSuggester for NullTagSuggester {
    async fn suggest_tags(&self, _description: &str, _name: Option<&str>, _n: usize) -> Vec<String> {
        Vec::new()
    }
}

/// Suggester backed by an OpenRouter-compatible chat-completions endpoint.
pub struct HttpTagSuggester {
    url: String,
    model: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpTagSuggester {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(
            config.suggester_url.clone(),
            config.suggester_model.clone(),
            config.suggester_api_key.clone(),
            config.suggester_timeout_seconds,
        )
    }

    pub fn with_endpoint(
        url: String,
        model: String,
        api_key: Option<String>,
        timeout_seconds: u64,
    ) -> Self {
        Self {
            url,
            model,
            api_key,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_seconds))
                .build()
                .unwrap_or_default(),
        }
    }

    fn build_prompt(description: &str, name: Option<&str>, n: usize) -> String {
        let mut prompt = format!(
            "Dada la siguiente información de un curso universitario, sugiere {} etiquetas (tags) \
             relevantes y concisas (palabras o frases cortas, en Español) que resuman los temas \
             principales. Devuelve solo una lista separada por comas.\n\n",
            n
        );
        if let Some(name) = name {
            prompt.push_str(&format!("Nombre del curso: {}\n", name));
        }
        prompt.push_str(&format!("Descripción: {}", description));
        prompt
    }

    async fn request_tags(&self, description: &str, name: Option<&str>, n: usize) -> anyhow::Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: Self::build_prompt(description, name, n),
            }],
        };

        let mut builder = self.http_client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Tag suggestion request failed: {}", e))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Suggestion endpoint returned {}: {}", status, body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse suggestion response: {}", e))?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| anyhow::anyhow!("Suggestion response contained no message"))
    }
}

#[async_trait]
impl TagSuggester for HttpTagSuggester {
    async fn suggest_tags(&self, description: &str, name: Option<&str>, n: usize) -> Vec<String> {
        match self.request_tags(description, name, n).await {
            Ok(raw) => {
                let tags = parse_tag_list(&raw, n);
                debug!("Suggester produced {} tag(s) from reply '{}'", tags.len(), raw.trim());
                tags
            }
            Err(e) => {
                warn!("Tag suggestion failed, continuing without AI tags: {}", e);
                Vec::new()
            }
        }
    }
}

/// Split a natural-language reply on commas, clean and lemmatize each entry
/// into a single phrase, dedup preserving first-seen order and cap at `n`.
fn parse_tag_list(raw: &str, n: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for candidate in raw.split(',') {
        let lemma = lemmatize_phrase(candidate);
        if lemma.is_empty() || tags.contains(&lemma) {
            continue;
        }
        tags.push(lemma);
        if tags.len() >= n {
            break;
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggester_for(url: String) -> HttpTagSuggester {
        HttpTagSuggester::with_endpoint(url, "test-model".into(), Some("test-key".into()), 5)
    }

    #[test]
    fn test_parse_tag_list_cleans_and_caps() {
        let tags = parse_tag_list("Redes Neuronales, Seguridad, redes neuronales, IA, extra", 3);

        assert_eq!(tags, vec!["red neuronal", "seguridad", "ia"]);
    }

    #[test]
    fn test_parse_tag_list_skips_empty_entries() {
        assert!(parse_tag_list(" , ,, ", 5).is_empty());
    }

    #[tokio::test]
    async fn test_suggest_tags_parses_completion() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"bases de datos, seguridad, redes"}}]}"#,
            )
            .create_async()
            .await;

        let tags = suggester_for(server.url())
            .suggest_tags("curso de bases de datos", Some("Optativa A"), 3)
            .await;

        mock.assert_async().await;
        assert_eq!(tags, vec!["base de dato", "seguridad", "red"]);
    }

    #[tokio::test]
    async fn test_suggest_tags_collapses_http_error_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let tags = suggester_for(server.url())
            .suggest_tags("curso", None, 3)
            .await;

        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_tags_collapses_garbage_body_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let tags = suggester_for(server.url())
            .suggest_tags("curso", None, 3)
            .await;

        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_tags_unreachable_endpoint() {
        let suggester = HttpTagSuggester::with_endpoint(
            "http://127.0.0.1:1/v1/chat/completions".into(),
            "test-model".into(),
            None,
            1,
        );

        let tags = suggester.suggest_tags("curso", None, 3).await;

        assert!(tags.is_empty());
    }
}

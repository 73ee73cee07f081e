use serde_json::json;

use crate::clients::provider_client::ProviderClient;
use crate::clients::transport::ProviderRequest;
use crate::models::Mode;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible `/chat/completions` endpoint, shared by Groq and OpenAI.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    name: &'static str,
    api_key: String,
    base_url: String,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn groq(api_key: String, base_url: String, max_tokens: u32) -> Self {
        Self::new("groq", api_key, base_url, max_tokens)
    }

    pub fn openai(api_key: String, base_url: String, max_tokens: u32) -> Self {
        Self::new("openai", api_key, base_url, max_tokens)
    }

    fn new(name: &'static str, api_key: String, base_url: String, max_tokens: u32) -> Self {
        Self {
            name,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
        }
    }
}

impl ProviderClient for ChatCompletionsClient {
    fn name(&self) -> &'static str {
        self.name
    }

    fn build_request(&self, model: &str, _mode: Mode, prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: format!("{}/chat/completions", self.base_url),
            bearer_token: self.api_key.clone(),
            body: json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": self.max_tokens,
            }),
        }
    }
}

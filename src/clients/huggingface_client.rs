use serde_json::json;

use crate::clients::provider_client::ProviderClient;
use crate::clients::transport::ProviderRequest;
use crate::models::Mode;

pub const HUGGINGFACE_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Hugging Face Inference API. Summarization models answer with
/// `[{"summary_text": ...}]`, generation models with `[{"generated_text": ...}]`.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    base_url: String,
    max_new_tokens: u32,
}

impl HuggingFaceClient {
    pub fn new(api_key: String, base_url: String, max_new_tokens: u32) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_new_tokens,
        }
    }
}

impl ProviderClient for HuggingFaceClient {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn build_request(&self, model: &str, mode: Mode, prompt: &str) -> ProviderRequest {
        let body = match mode {
            Mode::Summarize => json!({ "inputs": prompt }),
            _ => json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": self.max_new_tokens,
                    "return_full_text": false,
                },
            }),
        };

        ProviderRequest {
            url: format!("{}/models/{}", self.base_url, model),
            bearer_token: self.api_key.clone(),
            body,
        }
    }
}

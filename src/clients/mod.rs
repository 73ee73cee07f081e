pub mod chat_completions_client;
pub mod huggingface_client;
pub mod provider_client;
pub mod transport;

pub use chat_completions_client::*;
pub use huggingface_client::*;
pub use provider_client::*;
pub use transport::*;

use std::sync::Arc;

use crate::config::settings::{ProviderConfig, ProviderKind};

/// Build the client for the provider selected in configuration.
pub fn provider_client_from_config(config: &ProviderConfig) -> Arc<dyn ProviderClient> {
    let api_key = config.api_key.clone();
    let base_url = config.base_url.clone();

    match config.kind {
        ProviderKind::HuggingFace => {
            Arc::new(HuggingFaceClient::new(api_key, base_url, config.max_new_tokens))
        }
        ProviderKind::Groq => {
            Arc::new(ChatCompletionsClient::groq(api_key, base_url, config.max_new_tokens))
        }
        ProviderKind::OpenAI => {
            Arc::new(ChatCompletionsClient::openai(api_key, base_url, config.max_new_tokens))
        }
    }
}

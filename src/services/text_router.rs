use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::clients::{provider_client_from_config, HttpTransport, ProviderClient, ProviderTransport};
use crate::config::settings::{AppSettings, ProviderKind};
use crate::error::AppError;
use crate::models::Mode;
use crate::utils::response_normalizer::{normalize_reply, NormalizerOptions};
use crate::utils::text_excerpt::bounded_excerpt;

/// How the user's text is turned into the prompt sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRule {
    /// Task-specific models take the text as-is.
    Identity,
    /// Prefix the text with an instruction line.
    Instruction(&'static str),
}

impl PromptRule {
    pub fn render(&self, text: &str) -> String {
        match self {
            PromptRule::Identity => text.to_string(),
            PromptRule::Instruction(instruction) => format!("{}\n{}", instruction, text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeRoute {
    pub model: String,
    pub prompt: PromptRule,
}

impl ModeRoute {
    fn new(model: &str, prompt: PromptRule) -> Self {
        Self {
            model: model.to_string(),
            prompt,
        }
    }
}

const REWRITE_INSTRUCTION: &str = "Rewrite this in clearer English:";
const EXPAND_INSTRUCTION: &str =
    "Expand on the following text with more detail while keeping its meaning:";
const PARAPHRASE_INSTRUCTION: &str = "Paraphrase the following text:";
const SUMMARIZE_INSTRUCTION: &str = "Summarize the following text concisely:";
const CORRECT_INSTRUCTION: &str =
    "Correct the grammar and spelling of the following text. Reply with the corrected text only:";

/// Built-in mode table for a provider.
pub fn default_routes(kind: ProviderKind) -> HashMap<Mode, ModeRoute> {
    let routes = match kind {
        ProviderKind::HuggingFace => [
            (Mode::Summarize, ModeRoute::new("facebook/bart-large-cnn", PromptRule::Identity)),
            (Mode::Rewrite, ModeRoute::new("gpt2", PromptRule::Instruction(REWRITE_INSTRUCTION))),
            (
                Mode::Correct,
                ModeRoute::new("vennify/t5-base-grammar-correction", PromptRule::Identity),
            ),
            (Mode::Expand, ModeRoute::new("gpt2", PromptRule::Instruction(EXPAND_INSTRUCTION))),
            (
                Mode::Paraphrase,
                ModeRoute::new(
                    "humarin/chatgpt_paraphraser_on_T5_base",
                    PromptRule::Instruction(PARAPHRASE_INSTRUCTION),
                ),
            ),
        ],
        ProviderKind::Groq | ProviderKind::OpenAI => {
            let model = if kind == ProviderKind::Groq {
                "llama-3.1-8b-instant"
            } else {
                "gpt-4o-mini"
            };
            [
                (Mode::Summarize, ModeRoute::new(model, PromptRule::Instruction(SUMMARIZE_INSTRUCTION))),
                (Mode::Rewrite, ModeRoute::new(model, PromptRule::Instruction(REWRITE_INSTRUCTION))),
                (Mode::Correct, ModeRoute::new(model, PromptRule::Instruction(CORRECT_INSTRUCTION))),
                (Mode::Expand, ModeRoute::new(model, PromptRule::Instruction(EXPAND_INSTRUCTION))),
                (
                    Mode::Paraphrase,
                    ModeRoute::new(model, PromptRule::Instruction(PARAPHRASE_INSTRUCTION)),
                ),
            ]
        }
    };

    routes.into_iter().collect()
}

/// Maps a mode and text to a provider call and returns the normalized output.
///
/// Built once at startup and shared read-only between requests.
pub struct TextRouter {
    client: Arc<dyn ProviderClient>,
    transport: Arc<dyn ProviderTransport>,
    routes: HashMap<Mode, ModeRoute>,
    options: NormalizerOptions,
    max_text_length: usize,
}

impl TextRouter {
    pub fn new(
        client: Arc<dyn ProviderClient>,
        transport: Arc<dyn ProviderTransport>,
        routes: HashMap<Mode, ModeRoute>,
        options: NormalizerOptions,
        max_text_length: usize,
    ) -> Self {
        Self {
            client,
            transport,
            routes,
            options,
            max_text_length,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, AppError> {
        let provider = &settings.provider;

        let mut routes = default_routes(provider.kind);
        for (mode, model) in &provider.models {
            if let Some(route) = routes.get_mut(mode) {
                info!("Model override for {}: {}", mode, model);
                route.model = model.clone();
            }
        }

        let transport = HttpTransport::new(Duration::from_secs(provider.timeout_secs))?;

        Ok(Self::new(
            provider_client_from_config(provider),
            Arc::new(transport),
            routes,
            NormalizerOptions {
                trim: settings.normalizer.trim_output,
                excerpt_limit: settings.normalizer.excerpt_limit,
            },
            settings.limits.max_text_length,
        ))
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.name()
    }

    pub fn route(&self, mode: Mode) -> Result<&ModeRoute, AppError> {
        self.routes
            .get(&mode)
            .ok_or_else(|| AppError::Internal(format!("No route configured for mode '{}'", mode)))
    }

    pub fn validate_text(&self, text: &str) -> Result<(), AppError> {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        let length = text.chars().count();
        if length > self.max_text_length {
            return Err(AppError::BadRequest(format!(
                "Text too long ({} characters, max {})",
                length, self.max_text_length
            )));
        }

        Ok(())
    }

    #[instrument(skip(self, text), fields(provider = self.client.name(), text_length = text.len()))]
    pub async fn process(&self, mode: Mode, text: &str) -> Result<String, AppError> {
        self.validate_text(text)?;

        let route = self.route(mode)?;
        let prompt = route.prompt.render(text);
        let request = self.client.build_request(&route.model, mode, &prompt);

        info!(model = %route.model, "Forwarding {} request to provider", mode);

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("Provider call failed: {}", e);
            AppError::from(e)
        })?;

        debug!(
            status = response.status,
            body = %bounded_excerpt(&response.body, self.options.excerpt_limit),
            "Raw provider response"
        );

        normalize_reply(response.status, &response.body, &self.options).map_err(|e| {
            warn!("Provider response rejected: {}", e);
            AppError::from(e)
        })
    }
}

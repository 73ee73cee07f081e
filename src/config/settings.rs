use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::clients::{GROQ_BASE_URL, HUGGINGFACE_BASE_URL, OPENAI_BASE_URL};
use crate::error::AppError;
use crate::models::Mode;
use crate::utils::http_client::DEFAULT_PROVIDER_TIMEOUT_SECS;
use crate::utils::response_normalizer::DEFAULT_EXCERPT_LIMIT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSettings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub normalizer: NormalizerConfig,
    pub limits: LimitsConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    HuggingFace,
    Groq,
    OpenAI,
}

impl ProviderKind {
    /// Environment variable holding this provider's credential.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => "HF_TOKEN",
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::HuggingFace => HUGGINGFACE_BASE_URL,
            ProviderKind::Groq => GROQ_BASE_URL,
            ProviderKind::OpenAI => OPENAI_BASE_URL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "groq" => Ok(ProviderKind::Groq),
            "openai" => Ok(ProviderKind::OpenAI),
            other => Err(AppError::Configuration(format!(
                "PROVIDER must be one of huggingface, groq, openai (got '{}')",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_new_tokens: u32,
    /// Per-mode model overrides from `MODEL_<MODE>`.
    pub models: HashMap<Mode, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub trim_output: bool,
    pub excerpt_limit: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_text_length: usize,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
    expected: &str,
) -> Result<T, AppError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::Configuration(format!("{} must be {}", key, expected)))
}

impl AppSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        // App config
        let app_name = lookup("APP_NAME").unwrap_or_else(|| "textcraft-server".to_string());
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        // Server config
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port: u16 = parse_var(&lookup, "SERVER_PORT", "8080", "a valid port number")?;

        // CORS origins
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Provider selection and credential
        let kind: ProviderKind = lookup("PROVIDER")
            .unwrap_or_else(|| "huggingface".to_string())
            .parse()?;

        let api_key = lookup(kind.api_key_var())
            .or_else(|| lookup("PROVIDER_API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!("{} must be set", kind.api_key_var()))
            })?;

        let base_url = lookup("PROVIDER_BASE_URL")
            .unwrap_or_else(|| kind.default_base_url().to_string());
        Url::parse(&base_url).map_err(|e| {
            AppError::Configuration(format!("PROVIDER_BASE_URL is not a valid URL: {}", e))
        })?;

        let timeout_secs: u64 = parse_var(
            &lookup,
            "PROVIDER_TIMEOUT_SECS",
            &DEFAULT_PROVIDER_TIMEOUT_SECS.to_string(),
            "a valid number of seconds",
        )?;
        if timeout_secs == 0 {
            return Err(AppError::Configuration(
                "PROVIDER_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let max_new_tokens: u32 =
            parse_var(&lookup, "PROVIDER_MAX_NEW_TOKENS", "200", "a valid number")?;

        let models = Mode::ALL
            .iter()
            .filter_map(|mode| {
                lookup(&format!("MODEL_{}", mode.env_suffix()))
                    .map(|model| model.trim().to_string())
                    .filter(|model| !model.is_empty())
                    .map(|model| (*mode, model))
            })
            .collect();

        // Normalizer
        let trim_output: bool = parse_var(&lookup, "TRIM_OUTPUT", "false", "true or false")?;
        let excerpt_limit: usize = parse_var(
            &lookup,
            "ERROR_EXCERPT_LIMIT",
            &DEFAULT_EXCERPT_LIMIT.to_string(),
            "a valid number",
        )?;

        // Limits
        let max_text_length: usize =
            parse_var(&lookup, "MAX_TEXT_LENGTH", "50000", "a valid number")?;

        Ok(Self {
            app: AppConfig {
                name: app_name,
                environment,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
                cors_origins,
            },
            provider: ProviderConfig {
                kind,
                api_key,
                base_url,
                timeout_secs,
                max_new_tokens,
                models,
            },
            normalizer: NormalizerConfig {
                trim_output,
                excerpt_limit,
            },
            limits: LimitsConfig { max_text_length },
        })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Mode;

/// Body of `POST /process`. The mode stays untyped so a missing, null or
/// non-string value surfaces as a client error listing the valid modes
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessRequest {
    pub text: String,
    #[serde(default)]
    pub mode: Option<Value>,
}

/// Body of the per-mode endpoints (`POST /summarize`, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessResponse {
    pub mode: Mode,
    pub output: String,
}

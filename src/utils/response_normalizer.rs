//! Provider response normalization.
//!
//! Turns a raw provider reply (status + body) into either the generated text
//! or a [`ClassifiedError`]. This is a pure function: logging of the raw
//! exchange happens in the caller.

use serde_json::Value;

use crate::models::ProviderReply;
use crate::utils::text_excerpt::bounded_excerpt;

pub const DEFAULT_EXCERPT_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifiedError {
    #[error("provider returned a non-JSON body (status {status}): {excerpt}")]
    BadGatewayResponse { status: u16, excerpt: String },

    #[error("provider reported an error (status {status}): {payload}")]
    ProviderError { status: u16, payload: Value },

    #[error("unexpected provider response shape: {0}")]
    UnexpectedShape(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    pub trim: bool,
    pub excerpt_limit: usize,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            trim: false,
            excerpt_limit: DEFAULT_EXCERPT_LIMIT,
        }
    }
}

pub fn normalize_reply(
    status: u16,
    body: &[u8],
    options: &NormalizerOptions,
) -> Result<String, ClassifiedError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| {
        ClassifiedError::BadGatewayResponse {
            status,
            excerpt: bounded_excerpt(body, options.excerpt_limit),
        }
    })?;

    // A non-2xx status is a provider failure even when the body looks usable.
    if !(200..300).contains(&status) {
        let payload = match value {
            Value::Object(mut map) => match map.remove("error") {
                Some(error) => error,
                None => Value::Object(map),
            },
            other => other,
        };
        return Err(ClassifiedError::ProviderError { status, payload });
    }

    let text = match ProviderReply::classify(value) {
        ProviderReply::Error { payload } => {
            return Err(ClassifiedError::ProviderError { status, payload });
        }
        ProviderReply::Sequence { text } => text,
        ProviderReply::Mapping { text } => text,
        ProviderReply::ChatCompletion { text } => text,
        ProviderReply::Unrecognized(value) => {
            return Err(ClassifiedError::UnexpectedShape(value));
        }
    };

    if options.trim {
        Ok(text.trim().to_string())
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn normalize(status: u16, body: &str) -> Result<String, ClassifiedError> {
        normalize_reply(status, body.as_bytes(), &NormalizerOptions::default())
    }

    #[test]
    fn test_sequence_summary_text() {
        assert_eq!(normalize(200, r#"[{"summary_text": "X"}]"#).unwrap(), "X");
    }

    #[test]
    fn test_mapping_generated_text() {
        assert_eq!(normalize(200, r#"{"generated_text": "Y"}"#).unwrap(), "Y");
    }

    #[test]
    fn test_chat_completion_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "Z"}}]}"#;
        assert_eq!(normalize(200, body).unwrap(), "Z");
    }

    #[test]
    fn test_error_field_with_503() {
        assert_eq!(
            normalize(503, r#"{"error": "rate limited"}"#).unwrap_err(),
            ClassifiedError::ProviderError {
                status: 503,
                payload: json!("rate limited")
            }
        );
    }

    #[test]
    fn test_error_field_with_success_status() {
        let err = normalize(200, r#"{"error": {"message": "quota"}}"#).unwrap_err();
        assert_eq!(
            err,
            ClassifiedError::ProviderError {
                status: 200,
                payload: json!({"message": "quota"})
            }
        );
    }

    #[test]
    fn test_failure_status_without_error_field() {
        let err = normalize(500, r#"{"generated_text": "stale"}"#).unwrap_err();
        assert_eq!(
            err,
            ClassifiedError::ProviderError {
                status: 500,
                payload: json!({"generated_text": "stale"})
            }
        );
    }

    #[test]
    fn test_html_body_is_bad_gateway_with_bounded_excerpt() {
        let options = NormalizerOptions {
            trim: false,
            excerpt_limit: 10,
        };
        let err = normalize_reply(502, b"<html>502 Bad Gateway</html>", &options).unwrap_err();
        assert_eq!(
            err,
            ClassifiedError::BadGatewayResponse {
                status: 502,
                excerpt: "<html>502 ".to_string()
            }
        );
    }

    #[test]
    fn test_long_body_excerpt_uses_default_bound() {
        let body = "x".repeat(5000);
        match normalize(200, &body).unwrap_err() {
            ClassifiedError::BadGatewayResponse { excerpt, .. } => {
                assert_eq!(excerpt.len(), DEFAULT_EXCERPT_LIMIT)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_shape_carries_value() {
        assert_eq!(
            normalize(200, r#"{"label": "POSITIVE"}"#).unwrap_err(),
            ClassifiedError::UnexpectedShape(json!({"label": "POSITIVE"}))
        );
    }

    #[test]
    fn test_trim_option() {
        let body = r#"[{"generated_text": "  padded \n"}]"#;
        assert_eq!(normalize(200, body).unwrap(), "  padded \n");
        let trimmed = normalize_reply(
            200,
            body.as_bytes(),
            &NormalizerOptions {
                trim: true,
                ..NormalizerOptions::default()
            },
        )
        .unwrap();
        assert_eq!(trimmed, "padded");
    }
}

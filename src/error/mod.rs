use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::fmt;

use crate::clients::transport::TransportError;
use crate::utils::response_normalizer::ClassifiedError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Configuration(String),
    BadGatewayResponse { status: u16, excerpt: String },
    ProviderError { status: u16, payload: Value },
    UnexpectedShape(Value),
    Transport(String),
    Timeout(String),
    Internal(String),
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    detail: Value,
    error_type: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(e) => write!(f, "Bad request: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::BadGatewayResponse { status, excerpt } => write!(
                f,
                "Provider returned a non-JSON response ({}): {}",
                status, excerpt
            ),
            AppError::ProviderError { status, payload } => {
                write!(f, "Provider error ({}): {}", status, payload)
            }
            AppError::UnexpectedShape(v) => write!(f, "Unexpected provider response shape: {}", v),
            AppError::Transport(e) => write!(f, "Provider request failed: {}", e),
            AppError::Timeout(e) => write!(f, "Provider request timed out: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl StdError for AppError {}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Configuration(_) => "configuration_error",
            AppError::BadGatewayResponse { .. } => "bad_gateway_response",
            AppError::ProviderError { .. } => "provider_error",
            AppError::UnexpectedShape(_) => "unexpected_shape",
            AppError::Transport(_) => "transport_failure",
            AppError::Timeout(_) => "transport_timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Diagnostic payload returned to the caller under `detail`.
    fn detail(&self) -> Value {
        match self {
            AppError::BadRequest(message) => Value::String(message.clone()),
            AppError::BadGatewayResponse { status, excerpt } => json!({
                "message": "Provider returned a non-JSON response",
                "status": status,
                "excerpt": excerpt,
            }),
            AppError::ProviderError { payload, .. } => payload.clone(),
            AppError::UnexpectedShape(reply) => json!({
                "message": "Unexpected provider response shape",
                "reply": reply,
            }),
            _ => Value::String(self.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            detail: self.detail(),
            error_type: self.error_type().to_string(),
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadGatewayResponse { .. } => StatusCode::BAD_GATEWAY,
            AppError::ProviderError { .. } => StatusCode::BAD_GATEWAY,
            AppError::UnexpectedShape(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ClassifiedError> for AppError {
    fn from(error: ClassifiedError) -> Self {
        match error {
            ClassifiedError::BadGatewayResponse { status, excerpt } => {
                AppError::BadGatewayResponse { status, excerpt }
            }
            ClassifiedError::ProviderError { status, payload } => {
                AppError::ProviderError { status, payload }
            }
            ClassifiedError::UnexpectedShape(value) => AppError::UnexpectedShape(value),
        }
    }
}

impl From<TransportError> for AppError {
    fn from(error: TransportError) -> Self {
        match &error {
            TransportError::Timeout(_) => AppError::Timeout(error.to_string()),
            TransportError::Request(message) => AppError::Transport(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use std::time::Duration;

    async fn body_json(error: AppError) -> Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes_follow_failure_class() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ProviderError { status: 503, payload: json!("busy") }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::BadGatewayResponse { status: 502, excerpt: String::new() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::UnexpectedShape(json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Transport("refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(TransportError::Timeout(Duration::from_secs(60))).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[actix_web::test]
    async fn test_provider_payload_is_passed_through() {
        let body = body_json(AppError::ProviderError {
            status: 503,
            payload: json!({"message": "rate limited"}),
        })
        .await;
        assert_eq!(body["detail"], json!({"message": "rate limited"}));
        assert_eq!(body["error_type"], "provider_error");
    }

    #[actix_web::test]
    async fn test_bad_request_detail_is_plain_message() {
        let body = body_json(AppError::BadRequest("Text cannot be empty".into())).await;
        assert_eq!(body["detail"], "Text cannot be empty");
    }
}

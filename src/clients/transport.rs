use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::utils::http_client::new_api_client;

/// A fully built outbound call to a text-generation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub url: String,
    pub bearer_token: String,
    pub body: Value,
}

/// Status and untouched body of a provider reply, before normalization.
#[derive(Debug, Clone)]
pub struct RawProviderResponse {
    pub status: u16,
    pub body: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no response from provider within {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Request(String),
}

/// Sends provider requests. Injected into the router so tests can swap the
/// network for a fake.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> Result<RawProviderResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: new_api_client(timeout)?,
            timeout,
        })
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl ProviderTransport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send(&self, request: ProviderRequest) -> Result<RawProviderResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(&request.bearer_token)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        debug!(status, body_len = body.len(), "Provider responded");

        Ok(RawProviderResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;
    use std::net::TcpListener;

    fn request_to(url: String) -> ProviderRequest {
        ProviderRequest {
            url,
            bearer_token: "test-token".to_string(),
            body: json!({"inputs": "hello"}),
        }
    }

    #[tokio::test]
    async fn test_sends_bearer_and_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gpt2")
            .match_header("authorization", "Bearer test-token")
            .match_body(mockito::Matcher::Json(json!({"inputs": "hello"})))
            .with_status(200)
            .with_body(r#"[{"generated_text": "hi"}]"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .send(request_to(format!("{}/models/gpt2", server.url())))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(&response.body[..], br#"[{"generated_text": "hi"}]"#);
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gpt2")
            .with_status(502)
            .with_body("<html>502 Bad Gateway</html>")
            .create_async()
            .await;

        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .send(request_to(format!("{}/models/gpt2", server.url())))
            .await
            .unwrap();
        assert_eq!(response.status, 502);
    }

    #[tokio::test]
    async fn test_silent_upstream_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            // Accept and read but never answer.
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                std::thread::sleep(Duration::from_secs(5));
            }
        });

        let transport = HttpTransport::new(Duration::from_millis(300)).unwrap();
        let err = transport
            .send(request_to(format!("http://{}/models/gpt2", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_refused_connection_is_request_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        let err = transport
            .send(request_to(format!("http://{}/models/gpt2", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)), "got {:?}", err);
    }
}

use reqwest::Client;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Build the outbound client used for provider calls. `timeout` bounds the
/// whole exchange, from connect until the response body has been read.
pub fn new_api_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        // Below the usual 5-minute upstream keep-alive to avoid reusing stale connections
        .pool_idle_timeout(Some(Duration::from_secs(240)))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("textcraft-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

pub mod settings;

use tracing::info;

use crate::error::AppError;

pub use settings::{AppSettings, ProviderKind};

/// Initialize application configuration
pub fn init_config() -> Result<settings::AppSettings, AppError> {
    info!("Initializing application configuration from environment");
    let config = settings::AppSettings::from_env()?;
    info!(
        "Provider: {:?} at {} (timeout {}s)",
        config.provider.kind, config.provider.base_url, config.provider.timeout_secs
    );
    Ok(config)
}

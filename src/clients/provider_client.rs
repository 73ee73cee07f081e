use crate::clients::transport::ProviderRequest;
use crate::models::Mode;

/// Knows how a particular provider expects a generation request to look.
pub trait ProviderClient: Send + Sync {
    fn name(&self) -> &'static str;

    fn build_request(&self, model: &str, mode: Mode, prompt: &str) -> ProviderRequest;
}

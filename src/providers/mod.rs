//! Upstream provider implementations and the provider factory

pub mod gemini;
pub mod local;

use std::sync::Arc;

use crate::config::{ClientConfig, ProviderKind};
use crate::error::AfriError;
use crate::traits::GenerationProvider;

pub use gemini::GeminiProvider;
pub use local::LocalModelProvider;

/// Build the provider selected by `config.provider`.
pub fn create_provider(config: &ClientConfig) -> Result<Arc<dyn GenerationProvider>, AfriError> {
    let provider: Arc<dyn GenerationProvider> = match config.provider {
        ProviderKind::Google => {
            tracing::info!(base_url = %config.base_url, "initializing google provider");
            Arc::new(GeminiProvider::from_config(config)?)
        }
        ProviderKind::Local => {
            tracing::info!(url = %config.local_model_url, "using local model provider");
            Arc::new(LocalModelProvider::new(&config.local_model_url, config.timeout)?)
        }
    };
    Ok(provider)
}

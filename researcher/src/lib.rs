pub mod assistant;
pub mod server;

pub use assistant::configuration::Configuration;
pub use assistant::gemini::{GeminiClient, LanguageModel, ModelError};
pub use assistant::research::Researcher;
pub use assistant::state::{ResearchRequest, ResearchResult};

use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Loads `.env` and installs the global tracing subscriber.
pub fn init() {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Builds the researcher for `config`, leaving it unconfigured when no usable
/// Gemini client can be created.
pub fn build_researcher(config: &Configuration) -> Researcher {
    let Some(api_key) = config.google_api_key.clone() else {
        return Researcher::unconfigured();
    };

    match GeminiClient::new(api_key, &config.model, &config.api_base) {
        Ok(client) => {
            tracing::info!(model = %config.model, endpoint = %client.endpoint(), "Gemini client configured");
            Researcher::new(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to configure Gemini client");
            Researcher::unconfigured()
        }
    }
}

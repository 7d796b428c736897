use std::sync::Arc;
use thiserror::Error;

use super::gemini::{LanguageModel, ModelError};
use super::prompts::{format_research_prompt, DEFAULT_QUERY};
use super::state::ResearchResult;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "GOOGLE_API_KEY is not configured - set it in the environment or a .env file";

#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Runs research queries against the configured model.
///
/// The model is optional so the service can start without an API key.
#[derive(Clone)]
pub struct Researcher {
    model: Option<Arc<dyn LanguageModel>>,
}

impl Researcher {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn research(&self, query: &str) -> Result<String, ResearchError> {
        let model = self.model.as_ref().ok_or(ResearchError::NotConfigured)?;
        let prompt = format_research_prompt(query);
        Ok(model.generate(&prompt).await?)
    }

    pub async fn run(&self, query: &str) -> ResearchResult {
        tracing::info!(%query, "Starting research");

        match self.research(query).await {
            Ok(text) => {
                tracing::info!(chars = text.len(), "Research completed");
                ResearchResult::success(text, query.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "Research failed");
                ResearchResult::failure(e.to_string())
            }
        }
    }

    pub async fn run_default(&self) -> ResearchResult {
        self.run(DEFAULT_QUERY).await
    }
}

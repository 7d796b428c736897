use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to model API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("prompt was blocked by the model API: {0}")]
    Blocked(String),
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    #[error("invalid model endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

pub struct GeminiClient {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: &str, api_base: &str) -> Result<Self, ModelError> {
        let endpoint = Url::parse(&format!(
            "{}/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model
        ))?;

        Ok(Self {
            api_key,
            endpoint,
            client: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [
                    {
                        "parts": [
                            { "text": prompt }
                        ]
                    }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        parse_generate_response(&body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Joins the text parts of the first candidate.
pub fn parse_generate_response(body: &str) -> Result<String, ModelError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ModelError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::MalformedResponse("response contained no candidates".to_string()))?;

    let finish_reason = candidate.finish_reason;
    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ModelError::MalformedResponse(format!(
            "candidate contained no text (finish reason: {})",
            finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

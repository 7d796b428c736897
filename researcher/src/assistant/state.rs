use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prompts::DEFAULT_QUERY;

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl ResearchRequest {
    /// Accepts only a JSON object body; arrays, scalars and `null` are rejected.
    pub fn from_json(body: Value) -> Option<Self> {
        if !body.is_object() {
            return None;
        }
        serde_json::from_value(body).ok()
    }

    pub fn query_or_default(self) -> String {
        self.query.unwrap_or_else(|| DEFAULT_QUERY.to_string())
    }
}

/// Envelope returned for every research call.
///
/// `result` and `query` are set only on success, `error` only on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ResearchResult {
    pub fn success(result: String, query: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            timestamp: now_timestamp(),
            query: Some(query),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            timestamp: now_timestamp(),
            query: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub api_status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticInfo {
    pub message: String,
    pub timestamp: String,
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error() {
        let json = serde_json::to_value(ResearchResult::success("text".into(), "q".into())).unwrap();
        assert_eq!(json["success"], Value::Bool(true));
        assert_eq!(json["result"], "text");
        assert_eq!(json["query"], "q");
        assert!(json.get("error").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn failure_envelope_omits_result_and_query() {
        let json = serde_json::to_value(ResearchResult::failure("boom")).unwrap();
        assert_eq!(json["success"], Value::Bool(false));
        assert_eq!(json["error"], "boom");
        assert!(json.get("result").is_none());
        assert!(json.get("query").is_none());
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let result = ResearchResult::failure("x");
        assert!(chrono::DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[test]
    fn request_query_defaults() {
        let request: ResearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.query_or_default(), DEFAULT_QUERY);

        let request: ResearchRequest = serde_json::from_str(r#"{"query": null}"#).unwrap();
        assert_eq!(request.query_or_default(), DEFAULT_QUERY);

        let request: ResearchRequest =
            serde_json::from_str(r#"{"query": "robotic surgery", "extra": 1}"#).unwrap();
        assert_eq!(request.query_or_default(), "robotic surgery");
    }

    #[test]
    fn request_requires_a_json_object() {
        assert!(ResearchRequest::from_json(json!([])).is_none());
        assert!(ResearchRequest::from_json(json!(["robots"])).is_none());
        assert!(ResearchRequest::from_json(json!("robots")).is_none());
        assert!(ResearchRequest::from_json(Value::Null).is_none());
        assert!(ResearchRequest::from_json(json!({ "query": 42 })).is_none());

        let request = ResearchRequest::from_json(json!({ "query": "robots" })).unwrap();
        assert_eq!(request.query_or_default(), "robots");
    }
}

//! REST client for the hosted suggestion service.
//!
//! Wraps the suggestion HTTP API (task breakdown, subtask breakdown) using
//! [`reqwest`]. Every request carries a UUID correlation id so provider-side
//! logs can be matched to platform logs.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use sprintpilot_core::suggestion::{validate_suggestions, SuggestedTask};

use crate::error::AiError;
use crate::provider::{AiProvider, SubtaskSuggestionRequest, TaskSuggestionRequest};

/// Default per-request timeout. Callers treat a timed-out call like any
/// other provider failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the suggestion service.
pub struct HttpAiProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Response envelope returned by the suggestion endpoints.
#[derive(Debug, Deserialize)]
struct TaskSuggestionResponse {
    suggestions: Vec<SuggestedTask>,
}

#[derive(Debug, Deserialize)]
struct SubtaskSuggestionResponse {
    subtasks: Vec<String>,
}

impl HttpAiProvider {
    /// Create a new provider client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `https://api.example.com`.
    /// * `api_key` - Bearer token for the suggestion service.
    pub fn new(api_url: String, api_key: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("HTTP client construction failed");
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Create a provider client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AiError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let response = self
            .client
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.api_key)
            .header("x-request-id", &request_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                "Suggestion service returned an error"
            );
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AiProvider for HttpAiProvider {
    async fn suggest_tasks(
        &self,
        request: &TaskSuggestionRequest,
    ) -> Result<Vec<SuggestedTask>, AiError> {
        let response: TaskSuggestionResponse =
            self.post_json("/v1/task-suggestions", request).await?;

        // Minimal shape check before anything downstream trusts the batch.
        validate_suggestions(&response.suggestions)
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            count = response.suggestions.len(),
            project = %request.project_name,
            "Received task suggestions"
        );
        Ok(response.suggestions)
    }

    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> Result<Vec<String>, AiError> {
        let response: SubtaskSuggestionResponse =
            self.post_json("/v1/subtask-suggestions", request).await?;

        if response.subtasks.iter().any(|s| s.trim().is_empty()) {
            return Err(AiError::InvalidResponse(
                "subtask suggestion with an empty title".to_string(),
            ));
        }
        Ok(response.subtasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_envelope_uses_camel_case_fields() {
        let json = r#"{
            "suggestions": [
                {"title": "Set up CI", "storyPoints": 2, "suggestedSprintNumber": 1},
                {"title": "Ship it", "suggestedSprintNumber": 2, "subtasks": ["tag", "deploy"]}
            ]
        }"#;
        let envelope: TaskSuggestionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.suggestions.len(), 2);
        assert_eq!(envelope.suggestions[0].story_points, Some(2));
        assert_eq!(envelope.suggestions[1].subtasks, vec!["tag", "deploy"]);
    }

    #[test]
    fn subtask_envelope_is_a_plain_title_list() {
        let json = r#"{"subtasks": ["design", "implement"]}"#;
        let envelope: SubtaskSuggestionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.subtasks, vec!["design", "implement"]);
    }
}

//! HTTP implementation of [`AssistantBackend`] for the meeting-assistant API.
//!
//! Plain JSON request/response, no streaming: the backend answers each
//! question in one body, either from its FAQ dataset or from a model.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::assistant::{Answer, AssistantBackend, BackendError};
use super::types::{AskRequest, AskResponse, HealthResponse, SummaryRequest, SummaryResponse};

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::Config("backend URL is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::decode(endpoint, response).await
    }

    async fn decode<R: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<R, BackendError> {
        let status = response.status();
        debug!("{} response status: {}", endpoint, status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error on {}: {} - {}", endpoint, status, err_body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, question: &str, session_id: &str) -> Result<Answer, BackendError> {
        info!(
            "Asking backend: session={}, question_len={}",
            session_id,
            question.len()
        );
        let resp: AskResponse = self
            .post_json(
                "/ask",
                &AskRequest {
                    question,
                    session_id,
                },
            )
            .await?;
        let source = resp.answer_source();
        debug!("Answer received: {} bytes from {:?}", resp.answer.len(), source);
        Ok(Answer {
            text: resp.answer,
            source,
        })
    }

    async fn summarize(&self, session_id: &str, duration: &str) -> Result<String, BackendError> {
        info!("Requesting summary: session={}, duration={}", session_id, duration);
        let resp: SummaryResponse = self
            .post_json(
                "/summary",
                &SummaryRequest {
                    session_id,
                    duration,
                },
            )
            .await?;
        Ok(resp.summary)
    }

    async fn health(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let health: HealthResponse = Self::decode("/health", response).await?;
        if health.status == "healthy" {
            Ok(())
        } else {
            Err(BackendError::Api {
                status: 200,
                message: format!("backend reports status '{}'", health.status),
            })
        }
    }
}

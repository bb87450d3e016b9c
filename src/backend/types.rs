//! Wire types for the meeting-assistant REST API.
//!
//! ```text
//! POST /ask      {question, session_id}  →  {answer, source}
//! POST /summary  {session_id, duration}  →  {summary}
//! GET  /health                           →  {status, timestamp}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::message::Source;

#[derive(Serialize, Debug)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub session_id: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct AskResponse {
    pub answer: String,
    /// `"dataset"` for FAQ hits, `"llm"` (older servers) or `"model"` otherwise.
    #[serde(default)]
    pub source: Option<String>,
}

impl AskResponse {
    /// Anything that isn't an FAQ hit was generated by the model.
    pub fn answer_source(&self) -> Source {
        match self.source.as_deref() {
            Some("dataset") => Source::Dataset,
            _ => Source::Model,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SummaryRequest<'a> {
    pub session_id: &'a str,
    pub duration: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

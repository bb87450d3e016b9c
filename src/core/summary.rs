//! # Meeting Summary
//!
//! Statistics about the current session, shown in the summary panel.
//! Everything here is computed locally from the message list; the only
//! remote piece is the optional narrative `notes` text, which arrives later
//! from the backend and replaces the locally composed note.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::content::count_code_blocks;
use crate::core::message::{Message, Role};

/// Keyword rules for topic extraction, evaluated in this order.
/// A topic applies when any keyword occurs as a substring of a lowercased question.
const TOPIC_RULES: &[(&str, &[&str])] = &[
    ("Programming & Development", &["code", "programming", "function", "api"]),
    ("Meeting Management", &["meeting", "presentation", "demo"]),
    ("Project Management", &["project", "team", "workflow"]),
    ("Database & Data", &["database", "sql", "data"]),
    ("Explanations & Learning", &["explain", "how", "what", "why"]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSummary {
    pub generated_at: DateTime<Local>,
    pub total_messages: usize,
    pub duration: String,
    /// Fenced code blocks across all assistant answers.
    pub code_snippets: usize,
    pub key_topics: Vec<&'static str>,
    /// Narrative notes from the backend, once they arrive.
    pub notes: Option<String>,
}

impl MeetingSummary {
    pub fn from_messages(messages: &[Message], elapsed: Duration) -> Self {
        let code_snippets = messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| count_code_blocks(&m.content))
            .sum();
        let key_topics = extract_key_topics(
            messages
                .iter()
                .filter(|m| m.is_user())
                .map(|m| m.content.as_str()),
        );

        Self {
            generated_at: Local::now(),
            total_messages: messages.len(),
            duration: format_duration(elapsed),
            code_snippets,
            key_topics,
            notes: None,
        }
    }

    /// The backend's notes if they arrived, otherwise a locally composed note.
    pub fn notes_text(&self) -> String {
        match &self.notes {
            Some(notes) => notes.clone(),
            None => self.local_notes(),
        }
    }

    fn local_notes(&self) -> String {
        let code = match self.code_snippets {
            0 => String::new(),
            1 => " and 1 code example".to_string(),
            n => format!(" and {n} code examples"),
        };
        format!(
            "This meeting session included {} messages with the AI assistant. \
             The assistant provided helpful responses with clear formatting{}. \
             All conversations were handled professionally to support your meeting objectives.",
            self.total_messages, code
        )
    }
}

/// `MM:SS` under an hour, `H:MM:SS` from then on.
pub fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Topics touched by the given questions, in rule order, each at most once.
pub fn extract_key_topics<'a>(questions: impl IntoIterator<Item = &'a str>) -> Vec<&'static str> {
    let lowered: Vec<String> = questions.into_iter().map(str::to_lowercase).collect();
    TOPIC_RULES
        .iter()
        .filter(|(_, keywords)| {
            lowered
                .iter()
                .any(|q| keywords.iter().any(|k| q.contains(k)))
        })
        .map(|(topic, _)| *topic)
        .collect()
}

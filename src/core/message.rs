//! # Chat Messages
//!
//! One entry in the meeting conversation. Messages are immutable once
//! created; anything that changes over time (selection, copy feedback)
//! lives in presentation state keyed by position.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{Segment, segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI Assistant",
        }
    }
}

/// Where an assistant answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Matched an entry in the backend's FAQ dataset.
    Dataset,
    /// Generated by the language model.
    Model,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::Dataset => "Dataset",
            Source::Model => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Only set on assistant answers.
    pub source: Option<Source>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), None)
    }

    pub fn assistant(content: impl Into<String>, source: Source) -> Self {
        Self::new(Role::Assistant, content.into(), Some(source))
    }

    fn new(role: Role, content: String, source: Option<Source>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Local::now(),
            source,
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        segment(&self.content)
    }

    /// 12-hour clock, e.g. `02:05 PM`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn constructors_set_role_and_source() {
        let q = Message::user("hi");
        assert!(q.is_user());
        assert_eq!(q.source, None);

        let a = Message::assistant("hello", Source::Dataset);
        assert_eq!(a.role, Role::Assistant);
        assert_eq!(a.source, Some(Source::Dataset));
        assert_ne!(q.id, a.id);
    }

    #[test]
    fn labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Assistant.label(), "AI Assistant");
        assert_eq!(Source::Dataset.label(), "Dataset");
        assert_eq!(Source::Model.label(), "AI");
    }

    #[test]
    fn time_label_is_twelve_hour() {
        let mut msg = Message::user("q");
        msg.timestamp = Local.with_ymd_and_hms(2024, 3, 1, 14, 5, 0).unwrap();
        assert_eq!(msg.time_label(), "02:05 PM");
        msg.timestamp = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(msg.time_label(), "09:30 AM");
    }

    #[test]
    fn segments_follow_content() {
        let msg = Message::assistant("Run:\n```sh\nls\n```", Source::Model);
        let segs = msg.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1].as_code().unwrap().code, "ls");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Source::Model).unwrap(), "\"model\"");
    }
}

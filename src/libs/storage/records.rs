use crate::libs::core::models::{MessageContent, Sender};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct MessageRecord {
    pub message_id: Uuid,
    pub content: MessageContent,
    pub from: Sender,
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    pub fn new(content: MessageContent, from: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            message_id: Uuid::now_v7(),
            content,
            from,
            timestamp,
        }
    }

    /// ISO-8601 with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Hour and minute shown under a bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

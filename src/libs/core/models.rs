use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a conversation. Users and groups share the key space, the
/// message store is keyed by it so renaming never moves history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationKey {
    pub uuid: Uuid,
}

impl ConversationKey {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::now_v7(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(|uuid| Self { uuid })
    }
}

impl Default for ConversationKey {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u8; 16]> for ConversationKey {
    fn from(bytes: [u8; 16]) -> ConversationKey {
        Self {
            uuid: Uuid::from_bytes(bytes),
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Online,
    Offline,
}

impl Presence {
    pub fn label(&self) -> &'static str {
        match self {
            Presence::Online => "Online",
            Presence::Offline => "Offline",
        }
    }
}

/// Terminal local flag set from the profile panel. There is no way back to `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModerationStatus {
    #[default]
    None,
    Blocked,
    Reported,
}

impl ModerationStatus {
    pub fn is_flagged(&self) -> bool {
        !matches!(self, ModerationStatus::None)
    }

    pub fn status_line(&self) -> Option<&'static str> {
        match self {
            ModerationStatus::None => None,
            ModerationStatus::Blocked => Some("User is blocked."),
            ModerationStatus::Reported => Some("User has been reported."),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub key: ConversationKey,
    pub name: String,
    pub presence: Presence,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub moderation: ModerationStatus,
}

impl User {
    pub fn new(name: impl Into<String>, presence: Presence) -> Self {
        Self {
            key: ConversationKey::new(),
            name: name.into(),
            presence,
            avatar: None,
            email: None,
            bio: None,
            moderation: ModerationStatus::None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: ConversationKey,
    pub name: String,
    members: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: ConversationKey::new(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Builds a group from a member list, collapsing duplicate names.
    pub fn with_members<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self::new(name);
        for member in members {
            group.insert_member(member.into());
        }
        group
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Returns false when the name is already a member.
    pub(crate) fn insert_member(&mut self, name: String) -> bool {
        if self.is_member(&name) {
            return false;
        }
        self.members.push(name);
        true
    }

    pub(crate) fn remove_member(&mut self, name: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != name);
        before != self.members.len()
    }

    pub fn member_count_label(&self) -> String {
        format!("{} members", self.member_count())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    Me,
    Participant(String),
}

impl Sender {
    pub fn is_me(&self) -> bool {
        matches!(self, Sender::Me)
    }

    pub fn marker(&self) -> &str {
        match self {
            Sender::Me => "me",
            Sender::Participant(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    File(FileAttachment),
    Audio(AudioClip),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::File(_) => "file",
            MessageContent::Audio(_) => "audio",
        }
    }

    /// Text with nothing but whitespace carries no content.
    pub fn is_blank(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// A composed message before the store stamps it.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingMessage {
    pub content: MessageContent,
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl OutgoingMessage {
    pub fn new(content: MessageContent) -> Self {
        Self {
            content,
            timestamp: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MessageContent::text(text))
    }

    pub fn at(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CallKind {
    #[default]
    Audio,
    Video,
}

impl CallKind {
    pub fn label(&self) -> &'static str {
        match self {
            CallKind::Audio => "audio",
            CallKind::Video => "video",
        }
    }
}

/// Up to two uppercase initials, "John Doe" -> "JD".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// First character of the name, used by the directory avatars.
pub fn initial(name: &str) -> char {
    name.chars().next().unwrap_or('?')
}

//! Read-only view models handed to the rendering layer.
//!
//! Views never own state. They are rebuilt from [`ChatApp`] on every render and
//! every change goes back through a `ChatApp` operation.

use crate::libs::app::ChatApp;
use crate::libs::core::directory::{Entry, NO_GROUPS_AVAILABLE, NO_USERS_FOUND};
use crate::libs::core::models::{
    initial, initials, CallKind, ConversationKey, MessageContent, Presence,
};
use crate::libs::media::capture::AudioSource;
use crate::libs::storage::records::MessageRecord;
use crate::libs::storage::storage_traits::MessageStore;
use chrono::{DateTime, Utc};

pub const SELECT_CHAT_PLACEHOLDER: &str = "Select a chat to start messaging";
pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

#[derive(Clone, Debug, PartialEq)]
pub struct ContactEntry {
    pub key: ConversationKey,
    pub name: String,
    pub initial: char,
    pub presence: Presence,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupEntry {
    pub key: ConversationKey,
    pub name: String,
    pub initial: char,
    pub member_count_label: String,
    pub selected: bool,
}

/// Sidebar contents for the current search. A placeholder replaces an empty section.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryView {
    pub users: Vec<ContactEntry>,
    pub groups: Vec<GroupEntry>,
    pub users_placeholder: Option<&'static str>,
    pub groups_placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BubbleBody {
    Text(String),
    Image { name: String, mime_type: String, data: Vec<u8> },
    Download { name: String, mime_type: String, data: Vec<u8> },
    Audio { mime_type: String, data: Vec<u8> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub message_id: String,
    pub mine: bool,
    pub sender: String,
    pub body: BubbleBody,
    pub timestamp: String,
    pub time_label: String,
}

impl From<&MessageRecord> for Bubble {
    fn from(record: &MessageRecord) -> Self {
        let body = match &record.content {
            MessageContent::Text(text) => BubbleBody::Text(text.clone()),
            MessageContent::File(file) if file.is_image() => BubbleBody::Image {
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
            MessageContent::File(file) => BubbleBody::Download {
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                data: file.data.clone(),
            },
            MessageContent::Audio(clip) => BubbleBody::Audio {
                mime_type: clip.mime_type.clone(),
                data: clip.data.clone(),
            },
        };
        Self {
            message_id: record.message_id.to_string(),
            mine: record.from.is_me(),
            sender: record.from.marker().to_string(),
            body,
            timestamp: record.iso_timestamp(),
            time_label: record.time_label(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComposerView {
    pub draft: String,
    pub emoji_picker_open: bool,
    pub recording: bool,
    /// A finished clip waits; the send-audio button replaces the mic.
    pub has_pending_audio: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatView {
    pub key: ConversationKey,
    pub title: String,
    pub subtitle: Option<String>,
    pub bubbles: Vec<Bubble>,
    pub composer: ComposerView,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupInfoPanel {
    pub heading: String,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupChatView {
    pub key: ConversationKey,
    pub title: String,
    pub member_count_label: String,
    pub bubbles: Vec<Bubble>,
    pub info_panel: Option<GroupInfoPanel>,
    pub composer: ComposerView,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MainView {
    Placeholder(&'static str),
    Chat(ChatView),
    GroupChat(GroupChatView),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub key: ConversationKey,
    pub name: String,
    pub email: Option<String>,
    pub avatar: String,
    pub bio: Option<String>,
    pub mutual_groups: Vec<String>,
    /// Replaces the block/report buttons once the user is flagged.
    pub status_line: Option<&'static str>,
}

impl ProfileView {
    pub fn can_moderate(&self) -> bool {
        self.status_line.is_none()
    }
}

/// Simulated call. Nothing is transported; only the timer moves.
#[derive(Clone, Debug, PartialEq)]
pub struct CallOverlay {
    pub kind: CallKind,
    pub peer: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl CallOverlay {
    pub fn new(kind: CallKind, peer: Option<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            peer,
            started_at,
        }
    }

    pub fn title(&self) -> String {
        match &self.peer {
            Some(peer) => format!("{} call with {}", self.kind.label(), peer),
            None => format!("{} call", self.kind.label()),
        }
    }

    pub fn initials(&self) -> String {
        self.peer.as_deref().map(initials).unwrap_or_default()
    }

    pub fn offers_video_toggle(&self) -> bool {
        self.kind == CallKind::Video
    }

    /// `MM:SS` since the call started; minutes keep counting past 59.
    pub fn elapsed_label(&self, now: DateTime<Utc>) -> String {
        let seconds = (now - self.started_at).num_seconds().max(0);
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

impl<S: AudioSource, M: MessageStore> ChatApp<S, M> {
    pub fn directory_view(&self) -> DirectoryView {
        let results = self.directory.search(&self.search);
        let selected = self.selection.map(|entry| entry.key());
        let users: Vec<ContactEntry> = results
            .users
            .iter()
            .map(|user| ContactEntry {
                key: user.key,
                name: user.name.clone(),
                initial: initial(&user.name),
                presence: user.presence,
                selected: selected == Some(user.key),
            })
            .collect();
        let groups: Vec<GroupEntry> = results
            .groups
            .iter()
            .map(|group| GroupEntry {
                key: group.key,
                name: group.name.clone(),
                initial: initial(&group.name),
                member_count_label: group.member_count_label(),
                selected: selected == Some(group.key),
            })
            .collect();
        DirectoryView {
            users_placeholder: users.is_empty().then_some(NO_USERS_FOUND),
            groups_placeholder: groups.is_empty().then_some(NO_GROUPS_AVAILABLE),
            users,
            groups,
        }
    }

    fn composer_view(&self) -> ComposerView {
        ComposerView {
            draft: self.composer.draft().to_string(),
            emoji_picker_open: self.composer.emoji_picker_open(),
            recording: self.composer.recorder().is_recording(),
            has_pending_audio: self.composer.recorder().pending().is_some(),
        }
    }

    fn bubbles(&self, key: &ConversationKey) -> Vec<Bubble> {
        self.store.messages(key).iter().map(Bubble::from).collect()
    }

    pub fn main_view(&self) -> MainView {
        match self.selection {
            Some(Entry::User(key)) => match self.directory.user(&key) {
                Some(user) => MainView::Chat(ChatView {
                    key,
                    title: user.name.clone(),
                    subtitle: user.email.clone(),
                    bubbles: self.bubbles(&key),
                    composer: self.composer_view(),
                }),
                None => MainView::Placeholder(SELECT_CHAT_PLACEHOLDER),
            },
            Some(Entry::Group(key)) => match self.directory.group(&key) {
                Some(group) => MainView::GroupChat(GroupChatView {
                    key,
                    title: group.name.clone(),
                    member_count_label: group.member_count_label(),
                    bubbles: self.bubbles(&key),
                    info_panel: self.group_info_open.then(|| GroupInfoPanel {
                        heading: format!("Members ({}):", group.member_count()),
                        members: group.members().to_vec(),
                    }),
                    composer: self.composer_view(),
                }),
                None => MainView::Placeholder(SELECT_CHAT_PLACEHOLDER),
            },
            None => MainView::Placeholder(SELECT_CHAT_PLACEHOLDER),
        }
    }

    pub fn profile_view(&self) -> Option<ProfileView> {
        if !self.profile_visible() {
            return None;
        }
        let key = self.selection?.key();
        let user = self.directory.user(&key)?;
        Some(ProfileView {
            key,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user
                .avatar
                .clone()
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            bio: user.bio.clone(),
            mutual_groups: self
                .directory
                .mutual_groups(&user.name)
                .iter()
                .map(|g| g.name.clone())
                .collect(),
            status_line: user.moderation.status_line(),
        })
    }
}

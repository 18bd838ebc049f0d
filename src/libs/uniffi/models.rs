// Rust models for the records handed to the front-end

use crate::libs::core::models::{CallKind, Presence};
use crate::libs::views::{
    Bubble, BubbleBody, CallOverlay, ContactEntry, DirectoryView, GroupEntry, MainView,
    ProfileView,
};
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Hash, Eq, PartialEq, uniffi::Enum, Debug)]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl From<Presence> for PresenceStatus {
    fn from(presence: Presence) -> Self {
        match presence {
            Presence::Online => PresenceStatus::Online,
            Presence::Offline => PresenceStatus::Offline,
        }
    }
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, uniffi::Enum, Debug)]
pub enum CallType {
    Audio,
    Video,
}

impl From<CallType> for CallKind {
    fn from(call_type: CallType) -> Self {
        match call_type {
            CallType::Audio => CallKind::Audio,
            CallType::Video => CallKind::Video,
        }
    }
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, uniffi::Enum, Debug)]
pub enum MessageKind {
    Text,
    Image,
    File,
    Audio,
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ContactItem {
    pub key: String,
    pub name: String,
    pub initial: String,
    pub status: PresenceStatus,
    pub selected: bool,
}

impl From<ContactEntry> for ContactItem {
    fn from(entry: ContactEntry) -> Self {
        Self {
            key: entry.key.to_string(),
            name: entry.name,
            initial: entry.initial.to_string(),
            status: entry.presence.into(),
            selected: entry.selected,
        }
    }
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct GroupItem {
    pub key: String,
    pub name: String,
    pub initial: String,
    pub member_count_label: String,
    pub selected: bool,
}

impl From<GroupEntry> for GroupItem {
    fn from(entry: GroupEntry) -> Self {
        Self {
            key: entry.key.to_string(),
            name: entry.name,
            initial: entry.initial.to_string(),
            member_count_label: entry.member_count_label,
            selected: entry.selected,
        }
    }
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct DirectoryListing {
    pub users: Vec<ContactItem>,
    pub groups: Vec<GroupItem>,
    pub users_placeholder: Option<String>,
    pub groups_placeholder: Option<String>,
}

impl From<DirectoryView> for DirectoryListing {
    fn from(view: DirectoryView) -> Self {
        Self {
            users: view.users.into_iter().map(ContactItem::from).collect(),
            groups: view.groups.into_iter().map(GroupItem::from).collect(),
            users_placeholder: view.users_placeholder.map(str::to_string),
            groups_placeholder: view.groups_placeholder.map(str::to_string),
        }
    }
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct MessageItem {
    pub message_id: String,
    pub is_from_user: bool,
    pub sender: String,
    pub kind: MessageKind,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
    pub timestamp: String,
    pub time_label: String,
}

impl From<Bubble> for MessageItem {
    fn from(bubble: Bubble) -> Self {
        let (kind, text, file_name, mime_type, data) = match bubble.body {
            BubbleBody::Text(text) => (MessageKind::Text, Some(text), None, None, Vec::new()),
            BubbleBody::Image {
                name,
                mime_type,
                data,
            } => (MessageKind::Image, None, Some(name), Some(mime_type), data),
            BubbleBody::Download {
                name,
                mime_type,
                data,
            } => (MessageKind::File, None, Some(name), Some(mime_type), data),
            BubbleBody::Audio { mime_type, data } => {
                (MessageKind::Audio, None, None, Some(mime_type), data)
            }
        };
        Self {
            message_id: bubble.message_id,
            is_from_user: bubble.mine,
            sender: bubble.sender,
            kind,
            text,
            file_name,
            mime_type,
            data,
            timestamp: bubble.timestamp,
            time_label: bubble.time_label,
        }
    }
}

/// The active chat, one-to-one or group. `members` is empty for one-to-one chats.
#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ConversationPanel {
    pub key: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub is_group: bool,
    pub members: Vec<String>,
    pub info_panel_open: bool,
    pub messages: Vec<MessageItem>,
    pub draft: String,
    pub emoji_picker_open: bool,
    pub recording: bool,
    pub has_pending_audio: bool,
}

impl ConversationPanel {
    pub fn from_view(view: MainView) -> Option<Self> {
        match view {
            MainView::Placeholder(_) => None,
            MainView::Chat(chat) => Some(Self {
                key: chat.key.to_string(),
                title: chat.title,
                subtitle: chat.subtitle,
                is_group: false,
                members: Vec::new(),
                info_panel_open: false,
                messages: chat.bubbles.into_iter().map(MessageItem::from).collect(),
                draft: chat.composer.draft,
                emoji_picker_open: chat.composer.emoji_picker_open,
                recording: chat.composer.recording,
                has_pending_audio: chat.composer.has_pending_audio,
            }),
            MainView::GroupChat(group) => {
                let info_panel_open = group.info_panel.is_some();
                Some(Self {
                    key: group.key.to_string(),
                    title: group.title,
                    subtitle: Some(group.member_count_label),
                    is_group: true,
                    members: group.info_panel.map(|p| p.members).unwrap_or_default(),
                    info_panel_open,
                    messages: group.bubbles.into_iter().map(MessageItem::from).collect(),
                    draft: group.composer.draft,
                    emoji_picker_open: group.composer.emoji_picker_open,
                    recording: group.composer.recording,
                    has_pending_audio: group.composer.has_pending_audio,
                })
            }
        }
    }
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct ProfileCard {
    pub key: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: String,
    pub bio: Option<String>,
    pub mutual_groups: Vec<String>,
    pub status_line: Option<String>,
    pub can_moderate: bool,
}

impl From<ProfileView> for ProfileCard {
    fn from(view: ProfileView) -> Self {
        let can_moderate = view.can_moderate();
        Self {
            key: view.key.to_string(),
            name: view.name,
            email: view.email,
            avatar: view.avatar,
            bio: view.bio,
            mutual_groups: view.mutual_groups,
            status_line: view.status_line.map(str::to_string),
            can_moderate,
        }
    }
}

#[derive(Clone, uniffi::Record, Debug, PartialEq)]
pub struct CallCard {
    pub title: String,
    pub initials: String,
    pub timer: String,
    pub video_toggle: bool,
}

impl CallCard {
    pub fn at(overlay: &CallOverlay, now: DateTime<Utc>) -> Self {
        Self {
            title: overlay.title(),
            initials: overlay.initials(),
            timer: overlay.elapsed_label(now),
            video_toggle: overlay.offers_video_toggle(),
        }
    }
}

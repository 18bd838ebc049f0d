use crate::libs::app::ChatApp;
use crate::libs::config::ChatConfig;
use crate::libs::core::confirmation::{ConfirmationRequest, Decision};
use crate::libs::core::directory::Entry;
use crate::libs::core::models::{ConversationKey, FileAttachment, MessageContent, OutgoingMessage};
use crate::libs::logging;
use crate::libs::media::capture::{AudioSource, CaptureError};
use crate::libs::uniffi::models::{
    CallCard, CallType, ConversationPanel, DirectoryListing, MessageItem, ProfileCard,
};
use crate::libs::views::{Bubble, SELECT_CHAT_PLACEHOLDER};
use crate::ChatError;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Microphone implemented by the host platform.
#[uniffi::export(with_foreign)]
pub trait Microphone: Send + Sync {
    /// Acquire the input device. `false` means denied or unavailable.
    fn open_microphone(&self) -> bool;
    fn next_chunk(&self) -> Option<Vec<u8>>;
    fn close_microphone(&self);
}

/// Adapts the host microphone to the recorder. Without one every request is refused.
pub struct ForeignMicrophone {
    microphone: Option<Arc<dyn Microphone>>,
}

impl AudioSource for ForeignMicrophone {
    fn open(&mut self) -> Result<(), CaptureError> {
        match &self.microphone {
            Some(mic) if mic.open_microphone() => Ok(()),
            _ => Err(CaptureError::DeviceUnavailable),
        }
    }

    fn next_chunk(&mut self) -> Option<Vec<u8>> {
        self.microphone.as_ref().and_then(|mic| mic.next_chunk())
    }

    fn close(&mut self) {
        if let Some(mic) = &self.microphone {
            mic.close_microphone();
        }
    }
}

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SessionError {
    /// Shown to the user as an alert.
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Invalid(String),
    #[error("Nothing is awaiting confirmation")]
    NothingPending,
    #[error("Chat session state is unavailable")]
    Poisoned,
}

impl From<ChatError> for SessionError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(_)
            | ChatError::Capture(_)
            | ChatError::EmptyMessage
            | ChatError::NoPendingAudio => SessionError::Rejected(err.to_string()),
            other => SessionError::Invalid(other.to_string()),
        }
    }
}

struct SessionState {
    app: ChatApp<ForeignMicrophone>,
    pending: Option<ConfirmationRequest>,
}

#[derive(uniffi::Object)]
pub struct ChatSession {
    state: Mutex<SessionState>,
}

fn parse_key(key: &str) -> Result<ConversationKey, SessionError> {
    ConversationKey::parse(key).ok_or_else(|| SessionError::Invalid(format!("Malformed key {}", key)))
}

fn message_item(record: &crate::libs::storage::records::MessageRecord) -> MessageItem {
    MessageItem::from(Bubble::from(record))
}

impl ChatSession {
    fn build(
        config_json: Option<String>,
        microphone: Option<Arc<dyn Microphone>>,
    ) -> Result<Arc<Self>, SessionError> {
        let config = match config_json {
            Some(json) => ChatConfig::from_json_str(&json).map_err(ChatError::from)?,
            None => ChatConfig::default(),
        }
        .apply_env();
        logging::init_logging(&config.log_filter);
        let app = ChatApp::new(config, ForeignMicrophone { microphone })?;
        Ok(Arc::new(Self {
            state: Mutex::new(SessionState { app, pending: None }),
        }))
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut SessionState) -> Result<T, ChatError>,
    ) -> Result<T, SessionError> {
        let mut state = self.state.lock().map_err(|_| {
            warn!("chat session lock poisoned");
            SessionError::Poisoned
        })?;
        f(&mut state).map_err(SessionError::from)
    }

    fn selected_user(state: &SessionState) -> Result<ConversationKey, ChatError> {
        match state.app.selection() {
            Some(Entry::User(key)) => Ok(key),
            _ => Err(ChatError::NoActiveConversation),
        }
    }

    fn selected_group(state: &SessionState) -> Result<ConversationKey, ChatError> {
        match state.app.selection() {
            Some(Entry::Group(key)) => Ok(key),
            _ => Err(ChatError::NoActiveConversation),
        }
    }

    fn hold(state: &mut SessionState, request: ConfirmationRequest) -> String {
        let prompt = request.prompt.clone();
        state.pending = Some(request);
        prompt
    }
}

#[uniffi::export]
impl ChatSession {
    #[uniffi::constructor]
    pub fn new(config_json: Option<String>) -> Result<Arc<Self>, SessionError> {
        Self::build(config_json, None)
    }

    #[uniffi::constructor]
    pub fn with_microphone(
        config_json: Option<String>,
        microphone: Arc<dyn Microphone>,
    ) -> Result<Arc<Self>, SessionError> {
        Self::build(config_json, Some(microphone))
    }

    pub fn placeholder_text(&self) -> String {
        SELECT_CHAT_PLACEHOLDER.to_string()
    }

    pub fn directory(&self) -> Result<DirectoryListing, SessionError> {
        self.with_state(|state| Ok(state.app.directory_view().into()))
    }

    pub fn set_search(&self, query: String) -> Result<DirectoryListing, SessionError> {
        self.with_state(|state| {
            state.app.set_search(query);
            Ok(state.app.directory_view().into())
        })
    }

    pub fn select(&self, key: String) -> Result<(), SessionError> {
        let key = parse_key(&key)?;
        self.with_state(|state| {
            state.pending = None;
            state.app.select(&key).map(|_| ())
        })
    }

    pub fn select_by_name(&self, name: String) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.pending = None;
            state.app.select_by_name(&name).map(|_| ())
        })
    }

    pub fn back(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.pending = None;
            state.app.back();
            Ok(())
        })
    }

    pub fn create_group(&self, name: String) -> Result<String, SessionError> {
        self.with_state(|state| state.app.create_group(&name).map(|key| key.to_string()))
    }

    pub fn main_panel(&self) -> Result<Option<ConversationPanel>, SessionError> {
        self.with_state(|state| Ok(ConversationPanel::from_view(state.app.main_view())))
    }

    pub fn set_draft(&self, text: String) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.composer_mut().set_draft(text);
            Ok(())
        })
    }

    pub fn toggle_emoji_picker(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.composer_mut().toggle_emoji_picker();
            Ok(())
        })
    }

    pub fn insert_emoji(&self, emoji: String) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.composer_mut().insert_emoji(&emoji);
            Ok(())
        })
    }

    pub fn send_draft(&self) -> Result<MessageItem, SessionError> {
        self.with_state(|state| state.app.send_draft().map(message_item))
    }

    pub fn send_file(
        &self,
        name: String,
        mime_type: String,
        data: Vec<u8>,
    ) -> Result<MessageItem, SessionError> {
        let message =
            OutgoingMessage::new(MessageContent::File(FileAttachment::new(name, mime_type, data)));
        self.with_state(|state| state.app.send_to_selected(message).map(message_item))
    }

    pub fn toggle_recording(&self) -> Result<bool, SessionError> {
        self.with_state(|state| state.app.toggle_recording())
    }

    pub fn pump_audio(&self) -> Result<u32, SessionError> {
        self.with_state(|state| Ok(u32::try_from(state.app.pump_audio()).unwrap_or(u32::MAX)))
    }

    pub fn send_audio(&self) -> Result<MessageItem, SessionError> {
        self.with_state(|state| state.app.send_audio().map(message_item))
    }

    pub fn discard_audio(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.composer_mut().recorder_mut().discard();
            Ok(())
        })
    }

    pub fn toggle_group_info(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.toggle_group_info();
            Ok(())
        })
    }

    pub fn add_member(&self, name: String) -> Result<String, SessionError> {
        self.with_state(|state| {
            let group = Self::selected_group(state)?;
            state.app.add_member(&group, &name).map(|n| n.message())
        })
    }

    /// Exits as the configured current user. Returns the prompt to confirm.
    pub fn request_exit_group(&self) -> Result<String, SessionError> {
        self.with_state(|state| {
            let group = Self::selected_group(state)?;
            let request = state
                .app
                .request_exit_group(&group, state.app.config().current_user.as_deref())?;
            Ok(Self::hold(state, request))
        })
    }

    pub fn report_group(&self, reason: String) -> Result<String, SessionError> {
        self.with_state(|state| {
            let group = Self::selected_group(state)?;
            state.app.report_group(&group, &reason).map(|n| n.message())
        })
    }

    pub fn open_profile(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.open_profile();
            Ok(())
        })
    }

    pub fn close_profile(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.close_profile();
            Ok(())
        })
    }

    pub fn profile(&self) -> Result<Option<ProfileCard>, SessionError> {
        self.with_state(|state| Ok(state.app.profile_view().map(ProfileCard::from)))
    }

    pub fn request_block(&self) -> Result<String, SessionError> {
        self.with_state(|state| {
            let user = Self::selected_user(state)?;
            let request = state.app.request_block(&user)?;
            Ok(Self::hold(state, request))
        })
    }

    pub fn request_report(&self) -> Result<String, SessionError> {
        self.with_state(|state| {
            let user = Self::selected_user(state)?;
            let request = state.app.request_report(&user)?;
            Ok(Self::hold(state, request))
        })
    }

    /// Answers the outstanding prompt. Returns the notice, or `None` when declined.
    pub fn resolve_pending(&self, confirmed: bool) -> Result<Option<String>, SessionError> {
        let mut state = self.state.lock().map_err(|_| SessionError::Poisoned)?;
        let request = state.pending.take().ok_or(SessionError::NothingPending)?;
        let decision = if confirmed {
            Decision::Confirm
        } else {
            Decision::Cancel
        };
        let notice = state.app.resolve(&request, decision)?;
        Ok(notice.map(|n| n.message()))
    }

    pub fn start_call(&self, call_type: Option<CallType>) -> Result<CallCard, SessionError> {
        self.with_state(|state| {
            let overlay = match call_type {
                Some(call_type) => state.app.start_call(call_type.into()),
                None => state.app.start_default_call(),
            };
            Ok(CallCard::at(overlay, Utc::now()))
        })
    }

    pub fn call(&self) -> Result<Option<CallCard>, SessionError> {
        self.with_state(|state| Ok(state.app.call().map(|c| CallCard::at(c, Utc::now()))))
    }

    pub fn end_call(&self) -> Result<(), SessionError> {
        self.with_state(|state| {
            state.app.end_call();
            Ok(())
        })
    }
}

#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let filter = filter.unwrap_or_else(|| ChatConfig::default().apply_env().log_filter);
    logging::init_logging(&filter);
}

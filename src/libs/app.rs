use crate::libs::compose::Composer;
use crate::libs::config::ChatConfig;
use crate::libs::core::confirmation::{
    Confirm, ConfirmationRequest, Decision, Notice, PendingAction,
};
use crate::libs::core::directory::{Directory, Entry};
use crate::libs::core::models::{CallKind, ConversationKey, Group, ModerationStatus, OutgoingMessage, Sender};
use crate::libs::media::attachment::FilePicker;
use crate::libs::media::capture::{AudioRecorder, AudioSource};
use crate::libs::storage::memory_store::InMemoryMessageStore;
use crate::libs::storage::records::MessageRecord;
use crate::libs::storage::storage_traits::MessageStore;
use crate::libs::views::CallOverlay;
use crate::{ChatError, ValidationError};
use chrono::Utc;
use tracing::{debug, info, warn};

/// The whole chat front-end state. Every transition is a synchronous `&mut self` call.
pub struct ChatApp<S: AudioSource, M: MessageStore = InMemoryMessageStore> {
    pub(crate) config: ChatConfig,
    pub(crate) directory: Directory,
    pub(crate) store: M,
    pub(crate) selection: Option<Entry>,
    pub(crate) search: String,
    pub(crate) profile_open: bool,
    pub(crate) group_info_open: bool,
    pub(crate) call: Option<CallOverlay>,
    pub(crate) composer: Composer<S>,
}

impl<S: AudioSource> ChatApp<S> {
    pub fn new(config: ChatConfig, source: S) -> Result<Self, ChatError> {
        Self::with_store(config, source, InMemoryMessageStore::new())
    }
}

impl<S: AudioSource, M: MessageStore> ChatApp<S, M> {
    pub fn with_store(config: ChatConfig, source: S, store: M) -> Result<Self, ChatError> {
        let directory = config.build_directory()?;
        let recorder = AudioRecorder::with_mime_type(source, config.audio_mime_type.clone());
        info!(
            users = directory.users().len(),
            groups = directory.groups().len(),
            "chat state initialised"
        );
        Ok(Self {
            config,
            directory,
            store,
            selection: None,
            search: String::new(),
            profile_open: false,
            group_info_open: false,
            call: None,
            composer: Composer::new(recorder),
        })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn store(&self) -> &M {
        &self.store
    }

    pub fn composer(&self) -> &Composer<S> {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer<S> {
        &mut self.composer
    }

    pub fn messages(&self, key: &ConversationKey) -> &[MessageRecord] {
        self.store.messages(key)
    }

    // ---- directory & selection ----

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        debug!(query = %self.search, "directory search updated");
    }

    pub fn selection(&self) -> Option<Entry> {
        self.selection
    }

    pub fn active_key(&self) -> Result<ConversationKey, ChatError> {
        self.selection
            .map(|entry| entry.key())
            .ok_or(ChatError::NoActiveConversation)
    }

    pub fn selected_group(&self) -> Option<&Group> {
        match self.selection {
            Some(Entry::Group(key)) => self.directory.group(&key),
            _ => None,
        }
    }

    /// Users open the profile panel, groups close it. The composer starts blank.
    pub fn select(&mut self, key: &ConversationKey) -> Result<Entry, ChatError> {
        let entry = self
            .directory
            .entry(key)
            .ok_or(ChatError::UnknownConversation(*key))?;
        self.selection = Some(entry);
        self.profile_open = matches!(entry, Entry::User(_));
        self.group_info_open = false;
        self.composer.reset();
        debug!(conversation = %key, "conversation selected");
        Ok(entry)
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<Entry, ChatError> {
        let entry = self
            .directory
            .find_by_name(name)
            .ok_or_else(|| ChatError::UnknownName(name.to_string()))?;
        self.select(&entry.key())
    }

    /// Leaves the chat view. Its composer goes with it, releasing the microphone.
    pub fn back(&mut self) {
        self.selection = None;
        self.group_info_open = false;
        self.composer.reset();
        debug!("returned to directory");
    }

    pub fn create_group(&mut self, name: &str) -> Result<ConversationKey, ChatError> {
        let key = self.directory.create_group(name).inspect_err(|err| {
            warn!(error = %err, "group creation rejected");
        })?;
        info!(group = %key, "group created");
        Ok(key)
    }

    // ---- messaging ----

    /// Stamps the message with its timestamp (now if unset) and the `Me` marker and appends it.
    pub fn send(
        &mut self,
        key: &ConversationKey,
        message: OutgoingMessage,
    ) -> Result<&MessageRecord, ChatError> {
        if self.directory.entry(key).is_none() {
            warn!(conversation = %key, "send to unknown conversation rejected");
            return Err(ChatError::UnknownConversation(*key));
        }
        if message.content.is_blank() {
            warn!(conversation = %key, "empty message rejected");
            return Err(ChatError::EmptyMessage);
        }
        let timestamp = message.timestamp.unwrap_or_else(Utc::now);
        let record = MessageRecord::new(message.content, Sender::Me, timestamp);
        info!(conversation = %key, kind = record.content.kind(), "message sent");
        Ok(self.store.append(key, record))
    }

    pub fn send_to_selected(&mut self, message: OutgoingMessage) -> Result<&MessageRecord, ChatError> {
        let key = self.active_key()?;
        self.send(&key, message)
    }

    /// Sends the trimmed draft and clears it. A blank draft is refused and kept.
    pub fn send_draft(&mut self) -> Result<&MessageRecord, ChatError> {
        let key = self.active_key()?;
        let message = self.composer.text_message().ok_or(ChatError::EmptyMessage)?;
        self.composer.clear_draft();
        self.send(&key, message)
    }

    /// `Ok(None)` when the picker was dismissed.
    pub fn attach_file(
        &mut self,
        picker: &mut impl FilePicker,
    ) -> Result<Option<&MessageRecord>, ChatError> {
        let key = self.active_key()?;
        match self.composer.attach(picker) {
            Some(message) => self.send(&key, message).map(Some),
            None => {
                debug!("file pick dismissed");
                Ok(None)
            }
        }
    }

    pub fn toggle_recording(&mut self) -> Result<bool, ChatError> {
        self.active_key()?;
        Ok(self.composer.toggle_recording()?)
    }

    pub fn pump_audio(&mut self) -> usize {
        self.composer.recorder_mut().pump()
    }

    pub fn send_audio(&mut self) -> Result<&MessageRecord, ChatError> {
        let key = self.active_key()?;
        let message = self.composer.audio_message().ok_or(ChatError::NoPendingAudio)?;
        self.send(&key, message)
    }

    // ---- group membership ----

    pub fn group_info_open(&self) -> bool {
        self.group_info_open && self.selected_group().is_some()
    }

    pub fn toggle_group_info(&mut self) {
        self.group_info_open = !self.group_info_open;
    }

    fn group_mut(&mut self, key: &ConversationKey) -> Result<&mut Group, ChatError> {
        self.directory
            .group_mut(key)
            .ok_or(ChatError::UnknownConversation(*key))
    }

    pub fn add_member(&mut self, group: &ConversationKey, name: &str) -> Result<Notice, ChatError> {
        let trimmed = name.trim().to_string();
        let target = self.group_mut(group)?;
        if trimmed.is_empty() {
            warn!(group = %group, "blank member name rejected");
            return Err(ValidationError::EmptyMemberName.into());
        }
        if !target.insert_member(trimmed.clone()) {
            warn!(group = %group, member = %trimmed, "duplicate member rejected");
            return Err(ValidationError::DuplicateMember(trimmed).into());
        }
        info!(group = %group, member = %trimmed, "member added");
        Ok(Notice::MemberAdded(trimmed))
    }

    pub fn request_exit_group(
        &self,
        group: &ConversationKey,
        current_user: Option<&str>,
    ) -> Result<ConfirmationRequest, ChatError> {
        let target = self
            .directory
            .group(group)
            .ok_or(ChatError::UnknownConversation(*group))?;
        let member = current_user.ok_or(ValidationError::MissingCurrentUser)?;
        if !target.is_member(member) {
            warn!(group = %group, member, "exit by non-member rejected");
            return Err(ValidationError::NotAMember(member.to_string()).into());
        }
        Ok(ConfirmationRequest::new(PendingAction::ExitGroup {
            group: *group,
            member: member.to_string(),
        }))
    }

    pub fn exit_group(
        &mut self,
        group: &ConversationKey,
        current_user: Option<&str>,
        confirmer: &mut impl Confirm,
    ) -> Result<Option<Notice>, ChatError> {
        let request = self.request_exit_group(group, current_user)?;
        let decision = confirmer.confirm(&request);
        self.resolve(&request, decision)
    }

    /// Acknowledgement only; nothing is recorded.
    pub fn report_group(&mut self, group: &ConversationKey, reason: &str) -> Result<Notice, ChatError> {
        if self.directory.group(group).is_none() {
            return Err(ChatError::UnknownConversation(*group));
        }
        if reason.trim().is_empty() {
            warn!(group = %group, "report without reason rejected");
            return Err(ValidationError::EmptyReportReason.into());
        }
        if self.selected_group().is_some_and(|g| &g.key == group) {
            self.group_info_open = false;
        }
        info!(group = %group, "group reported");
        Ok(Notice::GroupReported)
    }

    // ---- profile panel ----

    pub fn profile_visible(&self) -> bool {
        self.profile_open && matches!(self.selection, Some(Entry::User(_)))
    }

    pub fn open_profile(&mut self) {
        self.profile_open = true;
    }

    pub fn close_profile(&mut self) {
        self.profile_open = false;
    }

    fn moderation_request(
        &self,
        user: &ConversationKey,
        block: bool,
    ) -> Result<ConfirmationRequest, ChatError> {
        let target = self
            .directory
            .user(user)
            .ok_or(ChatError::UnknownConversation(*user))?;
        if target.moderation.is_flagged() {
            return Err(ValidationError::AlreadyModerated(target.name.clone()).into());
        }
        let name = target.name.clone();
        let action = if block {
            PendingAction::BlockUser { user: *user, name }
        } else {
            PendingAction::ReportUser { user: *user, name }
        };
        Ok(ConfirmationRequest::new(action))
    }

    pub fn request_block(&self, user: &ConversationKey) -> Result<ConfirmationRequest, ChatError> {
        self.moderation_request(user, true)
    }

    pub fn request_report(&self, user: &ConversationKey) -> Result<ConfirmationRequest, ChatError> {
        self.moderation_request(user, false)
    }

    pub fn block_user(
        &mut self,
        user: &ConversationKey,
        confirmer: &mut impl Confirm,
    ) -> Result<Option<Notice>, ChatError> {
        let request = self.request_block(user)?;
        let decision = confirmer.confirm(&request);
        self.resolve(&request, decision)
    }

    pub fn report_user(
        &mut self,
        user: &ConversationKey,
        confirmer: &mut impl Confirm,
    ) -> Result<Option<Notice>, ChatError> {
        let request = self.request_report(user)?;
        let decision = confirmer.confirm(&request);
        self.resolve(&request, decision)
    }

    fn set_moderation(
        &mut self,
        user: &ConversationKey,
        status: ModerationStatus,
    ) -> Result<String, ChatError> {
        let target = self
            .directory
            .user_mut(user)
            .ok_or(ChatError::UnknownConversation(*user))?;
        if target.moderation.is_flagged() {
            return Err(ValidationError::AlreadyModerated(target.name.clone()).into());
        }
        target.moderation = status;
        Ok(target.name.clone())
    }

    /// Applies a confirmed request after checking it still holds. `Ok(None)` on cancel.
    pub fn resolve(
        &mut self,
        request: &ConfirmationRequest,
        decision: Decision,
    ) -> Result<Option<Notice>, ChatError> {
        if decision == Decision::Cancel {
            debug!(prompt = %request.prompt, "confirmation declined");
            return Ok(None);
        }
        let notice = match &request.action {
            PendingAction::ExitGroup { group, member } => {
                let target = self.group_mut(group)?;
                if !target.remove_member(member) {
                    return Err(ValidationError::NotAMember(member.clone()).into());
                }
                self.back();
                info!(group = %group, member = %member, "member exited group");
                Notice::ExitedGroup
            }
            PendingAction::BlockUser { user, .. } => {
                let name = self.set_moderation(user, ModerationStatus::Blocked)?;
                self.profile_open = false;
                info!(user = %user, "user blocked");
                Notice::UserBlocked(name)
            }
            PendingAction::ReportUser { user, .. } => {
                let name = self.set_moderation(user, ModerationStatus::Reported)?;
                self.profile_open = false;
                info!(user = %user, "user reported");
                Notice::UserReported(name)
            }
        };
        Ok(Some(notice))
    }

    // ---- call overlay ----

    pub fn call(&self) -> Option<&CallOverlay> {
        self.call.as_ref()
    }

    /// Opens the overlay for the active conversation, or with no peer when nothing is selected.
    pub fn start_call(&mut self, kind: CallKind) -> &CallOverlay {
        let peer = self
            .selection
            .and_then(|entry| self.directory.display_name(&entry.key()))
            .map(str::to_string);
        info!(kind = kind.label(), peer = peer.as_deref().unwrap_or("-"), "call overlay opened");
        self.call.insert(CallOverlay::new(kind, peer, Utc::now()))
    }

    pub fn start_default_call(&mut self) -> &CallOverlay {
        let kind = self.config.default_call_kind;
        self.start_call(kind)
    }

    pub fn end_call(&mut self) {
        if self.call.take().is_some() {
            info!("call overlay closed");
        }
    }
}

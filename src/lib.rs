pub mod libs;

use crate::libs::config::ConfigError;
use crate::libs::core::models::ConversationKey;
use crate::libs::media::capture::CaptureError;
use thiserror::Error;

pub use crate::libs::app::ChatApp;
pub use crate::libs::config::ChatConfig;

uniffi::setup_scaffolding!();

/// Input the user can fix. Messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid user name or email.")]
    EmptyMemberName,
    #[error("User already in group.")]
    DuplicateMember(String),
    #[error("Current user info not provided.")]
    MissingCurrentUser,
    #[error("You are not part of this group.")]
    NotAMember(String),
    #[error("Please enter a reason to report.")]
    EmptyReportReason,
    #[error("Please enter a group name.")]
    EmptyGroupName,
    #[error("Please enter a user name.")]
    EmptyUserName,
    #[error("The name {0} is already in use.")]
    NameTaken(String),
    #[error("{0} has already been blocked or reported.")]
    AlreadyModerated(String),
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("No conversation with key {0}")]
    UnknownConversation(ConversationKey),
    #[error("No user or group named {0}")]
    UnknownName(String),
    #[error("No conversation is selected")]
    NoActiveConversation,
    #[error("Cannot send an empty message")]
    EmptyMessage,
    #[error("There is no recorded audio to send")]
    NoPendingAudio,
}

use crate::libs::core::models::ConversationKey;

/// Guarded action awaiting an explicit yes/no from the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    ExitGroup {
        group: ConversationKey,
        member: String,
    },
    BlockUser {
        user: ConversationKey,
        name: String,
    },
    ReportUser {
        user: ConversationKey,
        name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub action: PendingAction,
    pub prompt: String,
}

impl ConfirmationRequest {
    pub fn new(action: PendingAction) -> Self {
        let prompt = match &action {
            PendingAction::ExitGroup { .. } => "Are you sure you want to exit the group?".to_string(),
            PendingAction::BlockUser { name, .. } => format!("Are you sure you want to block {}?", name),
            PendingAction::ReportUser { name, .. } => {
                format!("Are you sure you want to report {}?", name)
            }
        };
        Self { action, prompt }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// Interactive confirmation capability, injected by the presentation layer.
pub trait Confirm {
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmationRequest) -> Decision,
{
    fn confirm(&mut self, request: &ConfirmationRequest) -> Decision {
        self(request)
    }
}

/// User-facing acknowledgement returned by a successful operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    MemberAdded(String),
    ExitedGroup,
    GroupReported,
    UserBlocked(String),
    UserReported(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::MemberAdded(name) => format!("{} added to the group.", name),
            Notice::ExitedGroup => "You have exited the group.".to_string(),
            Notice::GroupReported => {
                "Thank you for reporting this group. Our team will review your report.".to_string()
            }
            Notice::UserBlocked(name) => format!("{} has been blocked.", name),
            Notice::UserReported(name) => format!("{} has been reported.", name),
        }
    }
}

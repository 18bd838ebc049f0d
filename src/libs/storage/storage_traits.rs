use crate::libs::core::models::ConversationKey;
use crate::libs::storage::records::MessageRecord;

/// Append-only message history keyed by conversation.
pub trait MessageStore {
    /// Appends to the sequence for `key`, creating it if absent.
    fn append(&mut self, key: &ConversationKey, record: MessageRecord) -> &MessageRecord;

    /// Messages in insertion order. Unknown keys yield an empty slice.
    fn messages(&self, key: &ConversationKey) -> &[MessageRecord];

    fn conversation_count(&self) -> usize;

    fn last_message(&self, key: &ConversationKey) -> Option<&MessageRecord> {
        self.messages(key).last()
    }

    fn message_count(&self, key: &ConversationKey) -> usize {
        self.messages(key).len()
    }
}

use crate::libs::core::models::ConversationKey;
use crate::libs::storage::records::MessageRecord;
use crate::libs::storage::storage_traits::MessageStore;
use std::collections::HashMap;

// Never pruned; history lives as long as the app.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    conversations: HashMap<ConversationKey, Vec<MessageRecord>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for InMemoryMessageStore {
    fn append(&mut self, key: &ConversationKey, record: MessageRecord) -> &MessageRecord {
        let sequence = self.conversations.entry(*key).or_default();
        sequence.push(record);
        &sequence[sequence.len() - 1]
    }

    fn messages(&self, key: &ConversationKey) -> &[MessageRecord] {
        self.conversations
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn conversation_count(&self) -> usize {
        self.conversations.len()
    }
}

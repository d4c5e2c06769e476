//! Append-only conversation history for one client session

use crate::request::{Role, Turn};

/// Ordered, append-only list of turns
///
/// Turns are never edited or removed. A new store is created for every
/// session; nothing is persisted. Growth is unbounded.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn at the end
    ///
    /// # Examples
    ///
    /// ```
    /// use flashgate::client::ConversationStore;
    /// use flashgate::request::Role;
    ///
    /// let mut store = ConversationStore::new();
    /// store.append(Role::User, "Hi");
    /// store.append(Role::Model, "Hello!");
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push(Turn {
            role,
            text: text.into(),
        });
    }

    /// Owned copy of the full history, in order
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Borrowed view of the history
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True before the first append
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

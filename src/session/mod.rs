//! Ephemeral per-conversation state for the boundary layer.
//!
//! A conversation accumulates its inputs over several messages: first the
//! task, then the image, then (for some tasks) a text phrase or region.
//! The store holds that partial state keyed by conversation id until one
//! request is assembled, then the entry is taken and dropped.
//!
//! The store is deliberately modest: entries are single-use, nothing is
//! persisted across process restarts, and [`MemorySessionStore`] is not
//! safe for concurrent mutation of the same id. Callers that allow
//! concurrent messages within one conversation must serialize access per
//! id at the boundary. Core interpretation functions never touch the
//! store; they receive only the data they need as parameters.

use std::collections::HashMap;
use std::fmt;

use crate::task::Task;

/// A unique identifier for one conversation with the front end.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a new ConversationId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConversationId({})", self.0)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// The inputs gathered so far for one pending request.
#[derive(Clone, Debug, Default)]
pub struct PendingRequest {
    /// The selected task, once the user has chosen one.
    pub task: Option<Task>,

    /// Raw uploaded image bytes, once provided.
    pub image: Option<Vec<u8>>,

    /// Extra text input for tasks that need it.
    pub text_input: Option<String>,
}

impl PendingRequest {
    /// Returns true once every input the task needs has been provided.
    pub fn is_complete(&self) -> bool {
        let Some(task) = self.task else {
            return false;
        };
        if self.image.is_none() {
            return false;
        }
        if (task.requires_text_input() || task.requires_region()) && self.text_input.is_none() {
            return false;
        }
        true
    }
}

/// Storage for pending requests, keyed by conversation id.
///
/// Implementations own the lifecycle: `take` must remove the entry so a
/// conversation id is single-use per request, whether the request
/// completed or errored.
pub trait SessionStore {
    /// Returns the pending request for a conversation, if any.
    fn get(&self, id: &ConversationId) -> Option<&PendingRequest>;

    /// Returns a mutable pending request, creating an empty one if absent.
    fn entry(&mut self, id: &ConversationId) -> &mut PendingRequest;

    /// Removes and returns the pending request for a conversation.
    fn take(&mut self, id: &ConversationId) -> Option<PendingRequest>;
}

/// An in-memory session store.
///
/// Not thread-safe and not persistent; see the module docs for the
/// boundary obligations this implies.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<ConversationId, PendingRequest>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of conversations with pending state.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no conversation has pending state.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &ConversationId) -> Option<&PendingRequest> {
        self.sessions.get(id)
    }

    fn entry(&mut self, id: &ConversationId) -> &mut PendingRequest {
        self.sessions.entry(id.clone()).or_default()
    }

    fn take(&mut self, id: &ConversationId) -> Option<PendingRequest> {
        self.sessions.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creates_and_updates() {
        let mut store = MemorySessionStore::new();
        let id = ConversationId::from("conv-1");

        store.entry(&id).task = Some(Task::Caption);
        store.entry(&id).image = Some(vec![1, 2, 3]);

        let pending = store.get(&id).expect("pending request");
        assert_eq!(pending.task, Some(Task::Caption));
        assert!(pending.is_complete());
    }

    #[test]
    fn test_take_removes_the_entry() {
        let mut store = MemorySessionStore::new();
        let id = ConversationId::from("conv-2");
        store.entry(&id).task = Some(Task::ObjectDetection);

        assert!(store.take(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.take(&id).is_none());
    }

    #[test]
    fn test_completeness_tracks_task_requirements() {
        let mut pending = PendingRequest {
            task: Some(Task::CaptionToPhraseGrounding),
            image: Some(vec![0]),
            text_input: None,
        };
        assert!(!pending.is_complete());

        pending.text_input = Some("a red car".into());
        assert!(pending.is_complete());
    }

    #[test]
    fn test_incomplete_without_image() {
        let pending = PendingRequest {
            task: Some(Task::Caption),
            image: None,
            text_input: None,
        };
        assert!(!pending.is_complete());
    }
}

//! State for the assistant chat column.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held in an `RwSignal<ChatState>` provided through context. The chat panel
//! renders it and `net::chat` mutates it while a turn is in flight.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Opening message from the assistant.
pub const GREETING: &str = "Hello!  My name is Rose, and I am here to help!  I am unique from other AI Agents because of my spatial awareness - try uploading an image and we can discuss it!";

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sender {
    #[default]
    User,
    Bot,
    System,
}

impl Sender {
    /// Map a backend reply role; anything but `system` renders as the bot.
    #[must_use]
    pub fn from_role(role: Option<&str>) -> Self {
        match role {
            Some(role) if role.eq_ignore_ascii_case("system") => Self::System,
            _ => Self::Bot,
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            content: content.into(),
        }
    }
}

/// Chat transcript plus in-flight flags.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Backend conversation id, remembered across turns.
    pub session_id: Option<String>,
    /// A turn is in flight; the input is locked.
    pub sending: bool,
    /// The assistant typing indicator is shown.
    pub typing: bool,
}

impl ChatState {
    /// Fresh transcript opening with the assistant greeting.
    #[must_use]
    pub fn with_greeting() -> Self {
        let mut state = Self::default();
        state.push(Sender::Bot, GREETING);
        state
    }

    pub fn push(&mut self, sender: Sender, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(sender, content));
    }

    /// Clear both in-flight flags once a turn ends, whatever its outcome.
    pub fn finish_turn(&mut self) {
        self.sending = false;
        self.typing = false;
    }
}

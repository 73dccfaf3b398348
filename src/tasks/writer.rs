//! Kurdish writing assistant conversation

use crate::api::{Dispatcher, Feature};
use log::error;

/// Opening message of every conversation
pub const GREETING: &str = "سڵاو! من یارمەتیدەری نووسینی تۆم. دەتوانیت لێرە شیعری کوردی، چیرۆک، یان هەر دەقێکی تر بنووسیت و من یارمەتیت بدەم.";

/// Reply when the model returned nothing
pub const EMPTY_REPLY: &str = "ببوورە، هەڵەیەک ڕوویدا.";

/// Reply when the request failed
pub const UNAVAILABLE_REPLY: &str = "ببوورە، ناتوانم ئێستا وەڵام بدەمەوە.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

/// Conversation transcript with the writing assistant
///
/// Each user message is sent on its own; the transcript is kept for
/// display only.
#[derive(Debug, Clone)]
pub struct Writer {
    messages: Vec<Message>,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Role::Bot,
                text: GREETING.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Send a message and append the assistant's reply
    ///
    /// Failures are answered with an apology rather than an error. Returns
    /// `None` for blank input.
    pub fn send(&mut self, dispatcher: &Dispatcher, text: &str) -> Option<&Message> {
        if text.trim().is_empty() {
            return None;
        }

        self.messages.push(Message {
            role: Role::User,
            text: text.to_string(),
        });

        let reply = match dispatcher.dispatch(Feature::Write, &[("text", text)], Vec::new()) {
            Ok(response) => response.text().unwrap_or_else(|| EMPTY_REPLY.to_string()),
            Err(e) => {
                error!("Writer request failed: {}", e);
                UNAVAILABLE_REPLY.to_string()
            }
        };

        self.messages.push(Message {
            role: Role::Bot,
            text: reply,
        });
        self.messages.last()
    }

    /// Start over with only the greeting
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

use crate::config::{INITIAL_GREETING, RESET_GREETING, TITLE_MAX_CHARS};
use crate::models::{Attachment, Conversation, Message, Role};
use crate::providers::{ModelContext, ModelError};
use crate::services::prompt;

/// Owns the conversation state and drives the request/response lifecycle:
/// append the user message, gate on the busy flag, await the model, append
/// the reply or surface the error.
pub struct ChatController {
    pub conversation: Conversation,
    model: ModelContext,
    title: Option<String>,
}

impl ChatController {
    pub fn new(model: ModelContext) -> Self {
        Self {
            conversation: Conversation::seeded(INITIAL_GREETING),
            model,
            title: None,
        }
    }

    /// Title derived from the first completed exchange, for history display.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Send a user message and wait for the assistant's reply.
    ///
    /// A no-op when `text` is blank or a call is already in flight. On
    /// failure the user's message stays in the conversation, the busy flag
    /// is cleared and the error is returned for the caller to surface; the
    /// user retries manually. Attachments are rendered locally only — the
    /// model call carries just the text.
    pub async fn submit(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<(), ModelError> {
        if text.trim().is_empty() || self.conversation.busy {
            return Ok(());
        }

        let id = self.conversation.next_id();
        let mut message = Message::new(id, Role::User, text);
        if let Some(attachment) = attachment {
            message = message.with_attachment(attachment);
        }
        self.conversation.push(message);
        self.conversation.busy = true;

        let prompt = prompt::build_prompt(text);
        match self.model.generate(&prompt).await {
            Ok(reply) => {
                let id = self.conversation.next_id();
                self.conversation.push(Message::new(id, Role::Assistant, reply));
                self.conversation.busy = false;
                if self.title.is_none() {
                    self.title = Some(derive_title(text));
                }
                Ok(())
            }
            Err(e) => {
                self.conversation.busy = false;
                tracing::error!("model call failed: {}", e);
                Err(e)
            }
        }
    }

    /// Discard the conversation and start over with a fresh greeting.
    pub fn reset(&mut self) {
        self.conversation = Conversation::seeded(RESET_GREETING);
        self.title = None;
    }
}

/// Truncate the first user message to a short history title: at most
/// `TITLE_MAX_CHARS` characters, with "..." appended only when the
/// original is longer.
fn derive_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

//! Chat-completion interface and grounding prompt assembly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::NO_RELEVANT_CONTENT;
use crate::error::Result;

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions to the model.
    System,
    /// A user turn.
    User,
    /// A model turn.
    Assistant,
}

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a response for the given conversation.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// System prompt used when retrieval produced no usable context.
const EMPTY_KB_PROMPT: &str = "You are a helpful AI assistant for a knowledge base system.\n\n\
The knowledge base has no content matching this conversation. Clearly tell the user \
that no source material is available, suggest uploading documents to get accurate \
answers, and do not invent or guess information. Be helpful but honest about the \
lack of source material.";

/// System prompt prefix used when retrieval produced grounding context.
const GROUNDED_PROMPT: &str = "You are a helpful AI assistant for a knowledge base system.\n\n\
Use ONLY the provided context to answer questions. If the answer is not in the \
context, say that you do not have that information in the uploaded documents. \
Always cite the source document when providing information, and do not invent \
information that is not present in the context. If the context does not contain \
enough information to answer fully, be honest about it.";

/// Build the message list for a grounded completion.
///
/// Prepends a system message to the conversation: when `context` is empty
/// or the [`NO_RELEVANT_CONTENT`] sentinel, the system message says the
/// knowledge base has nothing to offer and forbids fabrication; otherwise
/// it instructs the model to answer only from the embedded context, with
/// source citations.
pub fn grounded_messages(history: &[ChatMessage], context: &str) -> Vec<ChatMessage> {
    let system = if context.is_empty() || context == NO_RELEVANT_CONTENT {
        EMPTY_KB_PROMPT.to_string()
    } else {
        format!("{GROUNDED_PROMPT}\n\nContext from uploaded documents:\n{context}")
    };

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system));
    messages.extend_from_slice(history);
    messages
}

//! Text-analysis request/response types
//!
//! Provider-independent shapes for a single request/response exchange. A
//! response is a list of typed content blocks; callers that only care about
//! prose use [`LLMResponse::first_text`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// One block of a service response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Natural-language output
    Text { text: String },
    /// A tool invocation requested by the model; never consumed here
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::ToolUse { .. } => None,
        }
    }
}

/// Returns the first text block's content, or `""` when there is none.
pub fn first_text_block(blocks: &[ContentBlock]) -> &str {
    blocks.iter().find_map(ContentBlock::as_text).unwrap_or("")
}

/// Request to send to the text-analysis service
#[derive(Debug, Clone)]
pub struct LLMRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response generation (0.0 - 1.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LLMRequest {
    /// Creates a new request with messages
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Single user-role prompt, the only shape the orchestrators send
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::user(prompt)])
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from the text-analysis service
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// Content blocks in the order the service returned them
    pub blocks: Vec<ContentBlock>,
    /// Time taken for the request
    pub response_time: Duration,
}

impl LLMResponse {
    /// Creates a response holding a single text block
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            blocks: vec![ContentBlock::text(content)],
            response_time,
        }
    }

    pub fn with_blocks(blocks: Vec<ContentBlock>, response_time: Duration) -> Self {
        Self {
            blocks,
            response_time,
        }
    }

    /// First text block, ignoring tool-use blocks; `""` if absent
    pub fn first_text(&self) -> &str {
        first_text_block(&self.blocks)
    }
}

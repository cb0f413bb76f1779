//! Text-analysis client abstraction layer
//!
//! The orchestrators depend only on the [`LLMClient`] trait so that the
//! hosted backend ([`GenAIClient`]) and the scripted test double
//! ([`MockLLMClient`]) are interchangeable.

mod client;
mod error;
mod genai;
mod mock;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use types::{first_text_block, ChatMessage, ContentBlock, LLMRequest, LLMResponse, MessageRole};

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ContentBlock, LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted text-analysis client for tests.
///
/// Responses are served either from prompt-keyed rules (first rule whose
/// marker occurs in the prompt wins, and it may be hit repeatedly) or, when
/// no rule matches, from a FIFO queue. Every prompt is recorded.
pub struct MockLLMClient {
    responses: Mutex<VecDeque<MockResponse>>,
    rules: Mutex<Vec<(String, MockResponse)>>,
    prompts: Mutex<Vec<String>>,
    name: String,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub blocks: Vec<ContentBlock>,
    pub error: Option<BackendError>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::text(content)],
            error: None,
        }
    }

    pub fn with_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            blocks,
            error: None,
        }
    }

    pub fn error(error: BackendError) -> Self {
        Self {
            blocks: Vec::new(),
            error: Some(error),
        }
    }
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::with_name("MockLLM")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            rules: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            name: name.into(),
        }
    }

    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap();
        for response in responses {
            queue.push_back(response);
        }
    }

    /// Answers any prompt containing `marker` with `response`
    pub fn when_prompt_contains(&self, marker: impl Into<String>, response: MockResponse) {
        self.rules.lock().unwrap().push((marker.into(), response));
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn next_response(&self, prompt: &str) -> Option<MockResponse> {
        let ruled = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, response)| response.clone());

        ruled.or_else(|| self.responses.lock().unwrap().pop_front())
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt.clone());

        let response = self
            .next_response(&prompt)
            .ok_or_else(|| BackendError::Other {
                message: "MockLLMClient: No more responses in queue".to_string(),
            })?;

        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(LLMResponse::with_blocks(
            response.blocks,
            Duration::from_millis(10),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_info(&self) -> Option<String> {
        Some("mock-model".to_string())
    }
}

impl std::fmt::Debug for MockLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLLMClient")
            .field("name", &self.name)
            .field("remaining_responses", &self.remaining_responses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_basic() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::text("Hello!"));

        let response = client.chat(LLMRequest::prompt("hi")).await.unwrap();

        assert_eq!(response.first_text(), "Hello!");
        assert_eq!(client.prompts(), vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::error(BackendError::TimeoutError {
            seconds: 30,
        }));

        let result = client.chat(LLMRequest::prompt("x")).await;

        assert!(result.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_no_responses() {
        let client = MockLLMClient::new();

        let result = client.chat(LLMRequest::prompt("x")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rules_take_precedence_over_queue() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::text("queued"));
        client.when_prompt_contains("CACHING", MockResponse::text("ruled"));

        let a = client.chat(LLMRequest::prompt("CACHING data")).await.unwrap();
        let b = client.chat(LLMRequest::prompt("CACHING again")).await.unwrap();
        let c = client.chat(LLMRequest::prompt("other")).await.unwrap();

        assert_eq!(a.first_text(), "ruled");
        assert_eq!(b.first_text(), "ruled");
        assert_eq!(c.first_text(), "queued");
        assert_eq!(client.remaining_responses(), 0);
    }

    #[test]
    fn test_custom_name() {
        let client = MockLLMClient::with_name("TestClient");
        assert_eq!(client.name(), "TestClient");
    }
}

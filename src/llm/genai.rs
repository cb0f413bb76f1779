//! GenAI-based text-analysis client
//!
//! Talks to the hosted model through the `genai` crate. The credential comes
//! from [`AdvisorConfig`](crate::config::AdvisorConfig) rather than from the
//! adapter's default environment lookup, so a missing key is caught before
//! the first request.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ChatMessage, ContentBlock, LLMRequest, LLMResponse, MessageRole};
use async_trait::async_trait;
use genai::chat::{ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ServiceTarget};
use std::time::Duration;
use tracing::{debug, error};

pub struct GenAIClient {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenAIClient {
    /// Creates a client for `model` authenticating with `api_key`.
    ///
    /// `base_url` overrides the provider endpoint (proxies, gateways).
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Self {
        let model = model.into();
        let api_key = api_key.into();

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |mut target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                target.auth = AuthData::from_single(api_key.clone());
                if let Some(url) = &base_url {
                    target.endpoint = Endpoint::from_owned(url.clone());
                }
                Ok(target)
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!("Creating GenAI client: model={}", model);

        Self {
            client,
            model,
            timeout,
        }
    }

    fn convert_message(msg: &ChatMessage) -> GenAIChatMessage {
        match msg.role {
            MessageRole::System => GenAIChatMessage::system(&msg.content),
            MessageRole::User => GenAIChatMessage::user(&msg.content),
            MessageRole::Assistant => GenAIChatMessage::assistant(&msg.content),
        }
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = std::time::Instant::now();

        let messages: Vec<GenAIChatMessage> =
            request.messages.iter().map(Self::convert_message).collect();
        let genai_request = GenAIChatRequest::new(messages);

        let mut options = ChatOptions::default();
        if let Some(temp) = request.temperature {
            options = options.with_temperature(temp as f64);
        }
        if let Some(max_tokens) = request.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        let response = match tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", self.model, e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.model, e),
                    status_code: None,
                });
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    self.model,
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let mut blocks = Vec::new();
        if let Some(text) = response.first_text() {
            blocks.push(ContentBlock::text(text));
        }
        blocks.extend(response.tool_calls().into_iter().map(|tc| {
            ContentBlock::ToolUse {
                id: tc.call_id.clone(),
                name: tc.fn_name.clone(),
                input: tc.fn_arguments.clone(),
            }
        }));

        Ok(LLMResponse::with_blocks(blocks, start.elapsed()))
    }

    fn name(&self) -> &str {
        "genai"
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

use std::time::Duration;
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use super::{Completion, CompletionClient};

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Debug)]
pub struct ChatCompletionsClient {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
    /// API key for bearer authentication
    api_key: String,
    /// Model name
    model: String,
    /// Maximum output tokens per completion
    max_output_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling top-p
    top_p: f32,
    /// Additional attempts after a failed request
    max_retries: u32,
    /// Fixed delay between attempts
    retry_delay: Duration,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    /// Model name to use for the completion
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate
    max_tokens: u32,
    /// Temperature for generation
    temperature: f32,
    /// Top probability mass to consider (nucleus sampling)
    top_p: f32,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    /// Completion choices, at least one expected
    pub choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    /// The completion message
    pub message: ChatMessage,
}

impl ChatCompletionsClient {
    /// Create a new client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        }
    }

    /// Build the request body for one prompt
    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    /// Send one prompt, retrying transport and HTTP failures with a fixed
    /// delay up to the configured bound.
    async fn complete(&self, prompt: &str) -> Result<Completion, ProviderError> {
        let request = self.build_request(prompt);

        let mut attempt: u32 = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            if attempt > 0 {
                info!(
                    "Retrying in {}s (attempt {}/{})",
                    self.retry_delay.as_secs(),
                    attempt + 1,
                    self.max_retries + 1
                );
                tokio::time::sleep(self.retry_delay).await;
            }

            let response_result = self.client.post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.json::<ChatResponse>().await {
                            Ok(parsed) => {
                                match parsed.choices.first() {
                                    Some(choice) => {
                                        let completion = Completion::from_raw(&choice.message.content);
                                        if completion.maybe_truncated {
                                            warn!("Response may be truncated (does not end with '}}')");
                                        }
                                        return Ok(completion);
                                    },
                                    None => {
                                        // No choices in a 200 response; a fresh
                                        // attempt may fare better
                                        last_error = Some(ProviderError::EmptyResponse);
                                        error!(
                                            "API returned no completion choices - attempt {}/{}",
                                            attempt + 1,
                                            self.max_retries + 1
                                        );
                                    }
                                }
                            },
                            Err(e) => {
                                last_error = Some(ProviderError::ParseError(e.to_string()));
                                error!(
                                    "Failed to parse API response: {} - attempt {}/{}",
                                    e,
                                    attempt + 1,
                                    self.max_retries + 1
                                );
                            }
                        }
                    } else {
                        let error_text = response.text().await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        error!(
                            "API error ({}): {} - attempt {}/{}",
                            status,
                            error_text,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message: error_text,
                        });
                    }
                },
                Err(e) => {
                    error!(
                        "Network error sending completion request: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }
}

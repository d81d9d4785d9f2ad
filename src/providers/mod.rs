/*!
 * Completion client for the remote translation endpoint.
 *
 * A single OpenAI-compatible chat-completions client is provided; the
 * `CompletionClient` trait is the seam that lets tests substitute stub
 * clients without touching the network.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One completion returned by the remote endpoint
#[derive(Debug, Clone)]
pub struct Completion {
    /// Trimmed completion text
    pub text: String,

    /// Heuristic truncation signal: the trimmed text did not end with a
    /// closing brace. Surfaced to the caller, never fatal on its own.
    pub maybe_truncated: bool,
}

impl Completion {
    /// Build a completion from raw endpoint text, applying the trim and the
    /// truncation heuristic.
    pub fn from_raw(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let maybe_truncated = !text.ends_with('}');
        Completion { text, maybe_truncated }
    }
}

/// Common interface for completion endpoints
///
/// Any endpoint implementing "accept one text prompt, return one text
/// completion" satisfies this contract.
#[async_trait]
pub trait CompletionClient: Send + Sync + Debug {
    /// Send one prompt and return the completion text
    ///
    /// # Arguments
    /// * `prompt` - The full instruction message for the model
    ///
    /// # Returns
    /// * `Result<Completion, ProviderError>` - The completion or a terminal
    ///   failure after the client's own retry budget is exhausted
    async fn complete(&self, prompt: &str) -> Result<Completion, ProviderError>;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<Completion, ProviderError> {
        (**self).complete(prompt).await
    }
}

pub mod chat_completions;


//! Generation engine access
//!
//! The brain talks to the text-generation engine exclusively through the
//! [`ChatEngine`] trait. The only production implementation is
//! [`OllamaEngine`], which speaks the local Ollama HTTP API.

mod error;
mod message;
mod ollama;
#[cfg(test)]
pub(crate) mod testing;

pub use error::{LlmError, LlmResult};
pub use message::{Message, Role};
pub use ollama::OllamaEngine;

use async_trait::async_trait;

/// Trait for text-generation engines
#[async_trait]
pub trait ChatEngine: Send + Sync {
    /// Get the model being used
    fn model(&self) -> &str;

    /// Get the endpoint the engine talks to
    fn endpoint(&self) -> &str;

    /// Send an ordered list of role-tagged messages and return the generated text
    async fn chat(&self, messages: &[Message]) -> LlmResult<String>;

    /// List the models the engine can serve
    async fn list_models(&self) -> LlmResult<Vec<String>>;
}

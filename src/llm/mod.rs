pub mod openai;
pub mod prompt_builder;
mod prompts;
pub mod tokens;

use crate::error::Error;

/// Trait for talking to a chat-completion backend.
pub trait LlmClient {
    /// Send `prompt` as a single user message and return the trimmed reply.
    fn complete(&self, prompt: &str) -> Result<String, Error>;
}

//! Error taxonomy for a single commitgen run.
//!
//! Every variant is terminal: `main` prints it once with a failure glyph and
//! exits with status 1.

use thiserror::Error;

use crate::llm::tokens::TokenUsage;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "OPENAI_API_KEY is not set. Create a key at https://platform.openai.com/api-keys and run: export OPENAI_API_KEY=\"sk-...\""
    )]
    MissingCredential,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load tokenizer for {model}: {reason}")]
    Tokenizer { model: String, reason: String },

    #[error("failed to read staged diff: {0}")]
    DiffRetrieval(String),

    #[error("{}", context_too_large_message(.usage.as_ref()))]
    ContextTooLarge { usage: Option<TokenUsage> },

    #[error("OpenAI API error: HTTP {status} - {body}")]
    CompletionHttp { status: u16, body: String },

    #[error("unexpected error while contacting OpenAI: {0}")]
    CompletionRequest(String),

    #[error("git commit failed: {0}")]
    CommitExecution(String),
}

fn context_too_large_message(usage: Option<&TokenUsage>) -> String {
    let advice = "Split your staged changes into smaller commits and try again.";
    match usage {
        Some(u) => format!(
            "the staged diff is too large for the model: prompt {} + diff {} = {} tokens, limit is {}. {advice}",
            u.template_tokens, u.diff_tokens, u.total, u.limit
        ),
        None => format!("the staged diff is too large for the model's context window. {advice}"),
    }
}

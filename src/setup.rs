use log::debug;
use crate::config::Config;
use crate::error::Error;
use crate::llm::LlmClient;
use crate::llm::openai::OpenAiClient;

/// Build the LLM client from the resolved config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>, Error> {
    debug!(
        "Using OpenAiClient with model {} (context window {} tokens)",
        cfg.model, cfg.max_context_tokens
    );

    let client = OpenAiClient::new(
        cfg.openai_api_key.clone(),
        cfg.model.clone(),
        cfg.api_base_url.clone(),
        cfg.temperature,
    )?;

    Ok(Box::new(client))
}

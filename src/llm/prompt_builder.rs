use crate::llm::prompts;

/// The fixed instructional part of every prompt.
pub fn template() -> &'static str {
    prompts::COMMIT_TEMPLATE
}

/// Assemble the user prompt: template followed by the raw diff.
pub fn build_prompt(diff: &str) -> String {
    let mut prompt = String::with_capacity(prompts::COMMIT_TEMPLATE.len() + diff.len());
    prompt.push_str(prompts::COMMIT_TEMPLATE);
    prompt.push_str(diff);
    prompt
}

use tiktoken_rs::CoreBPE;

use crate::error::Error;

/// Token counts computed before the request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub template_tokens: usize,
    pub diff_tokens: usize,
    pub total: usize,
    pub limit: usize,
}

/// Rejects prompts that cannot fit in the model's context window.
pub struct ContextGuard {
    bpe: CoreBPE,
    limit: usize,
}

impl ContextGuard {
    /// Load the tokenizer for `model`. Models tiktoken does not know fall back to `cl100k_base`.
    pub fn for_model(model: &str, limit: usize) -> Result<Self, Error> {
        let bpe = match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => bpe,
            Err(e) => {
                log::warn!("No tokenizer for model {:?} ({}), using cl100k_base", model, e);
                tiktoken_rs::cl100k_base().map_err(|e| Error::Tokenizer {
                    model: model.to_string(),
                    reason: format!("{e:#}"),
                })?
            }
        };

        Ok(ContextGuard { bpe, limit })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Count template and diff separately and fail if their sum exceeds the limit.
    pub fn check(&self, template: &str, diff: &str) -> Result<TokenUsage, Error> {
        let template_tokens = self.count(template);
        let diff_tokens = self.count(diff);
        let usage = TokenUsage {
            template_tokens,
            diff_tokens,
            total: template_tokens + diff_tokens,
            limit: self.limit,
        };

        log::info!(
            "Token estimate: template={}, diff={}, total={}, limit={}",
            usage.template_tokens,
            usage.diff_tokens,
            usage.total,
            usage.limit
        );

        if usage.total > usage.limit {
            return Err(Error::ContextTooLarge { usage: Some(usage) });
        }

        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_known_text() {
        let guard = ContextGuard::for_model("gpt-4", 8192).unwrap();
        assert_eq!(guard.count(""), 0);
        assert_eq!(guard.count("hello world"), 2);
    }

    #[test]
    fn unknown_model_falls_back() {
        let guard: Result<ContextGuard, Error> = ContextGuard::for_model("not-a-real-model", 100);
        let guard = guard.unwrap();
        assert!(guard.count("hello world") > 0);
        assert_eq!(guard.check("", "").unwrap().limit, 100);
    }

    #[test]
    fn small_prompt_passes() {
        let guard = ContextGuard::for_model("gpt-4o-mini", 128_000).unwrap();
        let usage = guard.check("template", "+console.log('x')").unwrap();
        assert_eq!(usage.total, usage.template_tokens + usage.diff_tokens);
        assert_eq!(usage.limit, 128_000);
    }

    #[test]
    fn oversized_prompt_is_rejected_with_counts() {
        let guard = ContextGuard::for_model("gpt-4", 50).unwrap();
        let template = "Write a commit message for this diff:";
        let diff = "+let value = compute(42);\n".repeat(20);

        let expected_template = guard.count(template);
        let expected_diff = guard.count(&diff);

        match guard.check(template, &diff) {
            Err(Error::ContextTooLarge { usage: Some(usage) }) => {
                assert_eq!(usage.template_tokens, expected_template);
                assert_eq!(usage.diff_tokens, expected_diff);
                assert_eq!(usage.total, expected_template + expected_diff);
                assert_eq!(usage.limit, 50);
            }
            other => panic!("expected ContextTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn exactly_at_limit_passes() {
        let template = "abc";
        let diff = "+x";
        let probe = ContextGuard::for_model("gpt-4", usize::MAX).unwrap();
        let total = probe.count(template) + probe.count(diff);

        let guard = ContextGuard::for_model("gpt-4", total).unwrap();
        assert!(guard.check(template, diff).is_ok());
    }
}

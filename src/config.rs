use crate::error::Error;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const TEMPERATURE: f32 = 0.3;

/// Final resolved configuration for commitgen.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f32,
    /// Context window of `model`, in tokens.
    pub max_context_tokens: usize,
    pub context_window: ContextWindow,
}

/// Where `max_context_tokens` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextWindow {
    /// Set explicitly through env or the config file.
    Override,
    /// Looked up from tiktoken's model table.
    Known,
    /// tiktoken does not know the model; its fallback size is a guess.
    Assumed,
}

impl Config {
    /// Build the config from the process environment and `~/.config/commitgen.toml`.
    pub fn from_env() -> Result<Self, Error> {
        let file_cfg = load_file_config().unwrap_or_default();
        Self::from_sources(|key| env::var(key).ok(), file_cfg)
    }

    /// Precedence:
    ///   1. Env vars (`COMMITGEN_MODEL`, `OPENAI_BASE_URL`, `COMMITGEN_MAX_CONTEXT_TOKENS`)
    ///   2. TOML `~/.config/commitgen.toml`
    ///   3. Hardcoded defaults
    ///
    /// The API key only ever comes from `OPENAI_API_KEY`.
    pub fn from_sources<F>(lookup: F, file_cfg: FileConfig) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingCredential)?;

        let model = lookup("COMMITGEN_MODEL")
            .filter(|m| !m.trim().is_empty())
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base_url = lookup("OPENAI_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .or(file_cfg.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let override_tokens = match lookup("COMMITGEN_MAX_CONTEXT_TOKENS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(parse_context_tokens(&raw)?),
            None => file_cfg.max_context_tokens,
        };

        let (max_context_tokens, context_window) = match override_tokens {
            Some(0) => {
                return Err(Error::Config("max_context_tokens must be greater than zero".into()));
            }
            Some(n) => (n, ContextWindow::Override),
            None if tiktoken_rs::tokenizer::get_tokenizer(&model).is_some() => {
                (tiktoken_rs::model::get_context_size(&model), ContextWindow::Known)
            }
            None => (tiktoken_rs::model::get_context_size(&model), ContextWindow::Assumed),
        };

        Ok(Config {
            openai_api_key,
            model,
            api_base_url,
            temperature: TEMPERATURE,
            max_context_tokens,
            context_window,
        })
    }

    /// A user-facing warning when the context window is only a guess.
    pub fn context_window_warning(&self) -> Option<String> {
        if self.context_window != ContextWindow::Assumed {
            return None;
        }

        Some(format!(
            "Model {:?} is not recognised; assuming a {}-token context window. \
             Set COMMITGEN_MAX_CONTEXT_TOKENS or `max_context_tokens` in ~/.config/commitgen.toml to override.",
            self.model, self.max_context_tokens
        ))
    }
}

fn parse_context_tokens(raw: &str) -> Result<usize, Error> {
    raw.trim().parse::<usize>().map_err(|e| {
        Error::Config(format!("COMMITGEN_MAX_CONTEXT_TOKENS={raw:?} is not a token count: {e}"))
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Model to use when `COMMITGEN_MODEL` is not set.
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    /// Context window to enforce instead of the one tiktoken reports for `model`.
    pub max_context_tokens: Option<usize>,
}

/// Return `~/.config/commitgen.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("commitgen.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str::<FileConfig>(&data) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::warn!("Ignoring unreadable config {:?}: {}", path, e);
            None
        }
    }
}

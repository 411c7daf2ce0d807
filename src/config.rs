use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How `-h`/`--help` is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpMode {
    /// One-line usage string, no network.
    Static,
    /// Ask the model to describe the program from its own source.
    Generated,
}

/// Everything `llm` reads from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// `API_KEY`, `None` when unset or empty.
    pub api_key: Option<String>,
    /// `HOME`, falling back to `USERPROFILE`.
    pub home: Option<PathBuf>,
    pub help_mode: HelpMode,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    pub fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let api_key = non_empty(get_var("API_KEY"));
        let home = non_empty(get_var("HOME"))
            .or_else(|| non_empty(get_var("USERPROFILE")))
            .map(PathBuf::from);
        let help_mode = parse_help_mode(get_var("INNOVATE").as_deref());
        let base_url = non_empty(get_var("LLM_BASE_URL"))
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            home,
            help_mode,
            base_url,
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

fn parse_help_mode(raw: Option<&str>) -> HelpMode {
    match raw {
        Some(value) if !value.is_empty() => HelpMode::Generated,
        _ => HelpMode::Static,
    }
}

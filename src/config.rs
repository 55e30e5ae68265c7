// src/config.rs
use tracing::warn;

pub const DEFAULT_INDENT: usize = 4;
pub const INDENT_ENV: &str = "SORT_JSON_INDENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

impl Config {
    /// Environment first, then the command-line override.
    pub fn load(indent_flag: Option<usize>) -> Self {
        let env_indent = std::env::var(INDENT_ENV).ok();
        Self::resolve(env_indent.as_deref(), indent_flag)
    }

    fn resolve(env_indent: Option<&str>, indent_flag: Option<usize>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = env_indent {
            match raw.trim().parse() {
                Ok(indent) => config.indent = indent,
                Err(e) => warn!("ignoring {INDENT_ENV}={raw:?}: {e}"),
            }
        }
        if let Some(indent) = indent_flag {
            config.indent = indent;
        }
        config
    }
}

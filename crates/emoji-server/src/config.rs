//! Server configuration.
//!
//! Populated from command-line flags with environment fallbacks (see
//! `main.rs`); library users and tests build it directly.

use std::fmt;
use std::path::PathBuf;

use emoji_core::AssetStore;
use emoji_llm::providers::anthropic::DEFAULT_BASE_URL;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `assets/<category>/<id>.svg`.
    pub public_dir: PathBuf,
    pub api_key: String,
    pub anthropic_base_url: String,
    /// Actix worker count; `None` keeps the actix default.
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            api_key: api_key.into(),
            anthropic_base_url: DEFAULT_BASE_URL.to_string(),
            workers: None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn asset_store(&self) -> AssetStore {
        AssetStore::new(self.public_dir.clone())
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("public_dir", &self.public_dir)
            .field("api_key", &"<redacted>")
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally() {
        let config = ServerConfig::new("sk-test");

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.anthropic_base_url, "https://api.anthropic.com/v1");
        assert!(config.workers.is_none());
    }

    #[test]
    fn asset_store_is_rooted_at_public_dir() {
        let mut config = ServerConfig::new("sk-test");
        config.public_dir = PathBuf::from("/srv/emoji/public");

        assert_eq!(config.asset_store().root(), PathBuf::from("/srv/emoji/public"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ServerConfig::new("sk-very-secret");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

//! Connection configuration for escli
//!
//! Holds the host/port pair taken from the command line and derives the
//! normalized base endpoint and the prompt text from it. Normalization
//! happens exactly once here; request handlers never touch schemes.

/// Default document-store host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default document-store port.
pub const DEFAULT_PORT: &str = "9200";

/// Immutable connection settings, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    authority: String,
}

impl Config {
    /// Build a config from raw host/port values. A `http://` prefix on the
    /// host is stripped so the endpoint never ends up with a doubled scheme.
    pub fn new(host: &str, port: &str) -> Self {
        let host = host.strip_prefix("http://").unwrap_or(host);
        Self {
            authority: format!("{host}:{port}"),
        }
    }

    /// Fully-qualified base endpoint, e.g. `http://127.0.0.1:9200`.
    pub fn base_endpoint(&self) -> String {
        format!("http://{}", self.authority)
    }

    /// Prompt text shown before each input line, e.g. `127.0.0.1:9200> `.
    pub fn prompt(&self) -> String {
        format!("{}> ", self.authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_endpoint_plain_host() {
        let config = Config::new("127.0.0.1", "9200");
        assert_eq!(config.base_endpoint(), "http://127.0.0.1:9200");
    }

    #[test]
    fn test_base_endpoint_strips_existing_scheme() {
        let config = Config::new("http://es.local", "9201");
        assert_eq!(config.base_endpoint(), "http://es.local:9201");
    }

    #[test]
    fn test_prompt_has_no_scheme() {
        let config = Config::new("http://127.0.0.1", "9200");
        assert_eq!(config.prompt(), "127.0.0.1:9200> ");
    }
}

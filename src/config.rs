use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file with the movie catalog; the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// JSON file overriding the query vocabulary (stop words, genre tables, ...)
    #[serde(default)]
    pub vocabulary_path: Option<String>,

    /// Script implementing the trained recommendation model
    #[serde(default)]
    pub model_script_path: Option<String>,

    /// Interpreter used to run the model script
    #[serde(default = "default_model_interpreter")]
    pub model_interpreter: String,

    /// Upper bound for one model invocation, in seconds
    #[serde(default = "default_model_timeout_secs")]
    pub model_timeout_secs: u64,

    /// OMDb API key for poster lookups; placeholders are served when unset
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Maximum number of cached poster URLs
    #[serde(default = "default_poster_cache_capacity")]
    pub poster_cache_capacity: usize,

    /// Log output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model_interpreter() -> String {
    "python3".to_string()
}

fn default_model_timeout_secs() -> u64 {
    30
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_poster_cache_capacity() -> usize {
    1024
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.model_interpreter, "python3");
        assert_eq!(config.model_timeout_secs, 30);
        assert!(config.catalog_path.is_none());
        assert!(config.omdb_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vec![
            ("PORT".to_string(), "8080".to_string()),
            ("MODEL_SCRIPT_PATH".to_string(), "lib/run_recommendation.py".to_string()),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.model_script_path.as_deref(),
            Some("lib/run_recommendation.py")
        );
    }
}

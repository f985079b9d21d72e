//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Request configuration section
    #[serde(default)]
    pub request: RequestSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Transport configuration
    #[serde(default)]
    pub wire: WireSection,
}

/// Request configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestSection {
    /// Target URL
    pub url: Option<String>,

    /// HTTP method (default: GET)
    pub method: Option<String>,

    /// HTTP headers in 'Key: Value' or 'Key=Value' format, sent in order
    #[serde(default)]
    pub headers: Vec<String>,

    /// Request body
    pub body: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Whether failed exchanges are retried (default: true)
    pub enabled: Option<bool>,

    /// Maximum number of attempts
    pub max_attempts: Option<u32>,

    /// Delay before the first retry in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,

    /// Whether delays are randomized (default: true)
    pub jitter: Option<bool>,

    /// Budget in milliseconds spanning all attempts
    pub deadline_ms: Option<u64>,
}

/// Transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireSection {
    /// Timeout for one exchange in seconds
    pub timeout_secs: Option<u64>,

    /// Log every request and response in full
    #[serde(default)]
    pub verbose: bool,

    /// Send each cookie name once
    #[serde(default)]
    pub optimize_cookies: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# rexsl-fetch Configuration File

[request]
# Target URL (required unless given on the command line)
# url = "https://api.example.com/users"

# HTTP method (default: GET, can be overridden by -X)
# method = "GET"

# HTTP headers, sent in this order before any -H headers
# headers = ["Accept: application/json", "X-Custom-Header=value"]

# Request body (overridden by -d or --form)
# body = '{"name": "John"}'

[retry]
# Retry failed exchanges (default: true, --no-retry disables)
# enabled = true

# Maximum number of attempts, including the first one (default: 3)
# max_attempts = 3

# Delay before the first retry in milliseconds (default: 100)
# initial_delay_ms = 100

# Maximum delay between retries in milliseconds (default: 2000)
# max_delay_ms = 2000

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

# Randomize delays between half and full value (default: true)
# jitter = true

# Give up once this many milliseconds have passed (default: none)
# deadline_ms = 10000

[wire]
# Timeout for one exchange in seconds (default: 30)
# timeout_secs = 30

# Log every request and response in full
# verbose = false

# Send each cookie name once, last value wins
# optimize_cookies = false
"#
    .to_string()
}

//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::Method;
use url::Url;

use crate::header::Header;
use crate::request::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Body to send with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// No body
    Empty,
    /// Verbatim text
    Text(String),
    /// Form parameters, encoded as `name=value&` in order
    Form(Vec<(String, String)>),
}

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Target URL (required)
    pub url: Url,

    /// HTTP method
    pub method: Method,

    /// HTTP headers, TOML first then CLI, duplicates kept
    pub headers: Vec<Header>,

    /// Path segments appended to the URL, in order
    pub paths: Vec<String>,

    /// Query parameters appended to the URL, in order
    pub query: Vec<(String, String)>,

    /// Request body
    pub payload: Payload,

    /// Retry policy; `None` sends the request exactly once
    pub retry_policy: Option<RetryPolicy>,

    /// Timeout for one exchange
    pub timeout: Duration,

    /// Log every exchange in full
    pub verbose_wire: bool,

    /// Merge repeated cookies before sending
    pub optimize_cookies: bool,

    /// Print status line and headers before the body
    pub include: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let retry = self.retry_policy.as_ref().map_or_else(
            || "off".to_string(),
            |p| format!("{}x/{}ms", p.max_attempts, p.initial_delay.as_millis()),
        );

        write!(
            f,
            "Config {{ url: {}, method: {}, headers: {}, retry: {}, timeout: {}s, \
             verbose_wire: {}, optimize_cookies: {} }}",
            self.url.host_str().unwrap_or_default(),
            self.method,
            self.headers.len(),
            retry,
            self.timeout.as_secs(),
            self.verbose_wire,
            self.optimize_cookies,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - The method is not a valid HTTP token
    /// - A header, query or form parameter is malformed
    /// - Retry or timeout values are out of range
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let method = Self::resolve_method(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let query = parse_params("query", &cli.query)?;
        let payload = Self::resolve_payload(cli, toml)?;
        let retry_policy = Self::build_retry_policy(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        // Flags only enable
        let wire = toml.map(|t| &t.wire);
        let verbose_wire = cli.verbose_wire || wire.is_some_and(|w| w.verbose);
        let optimize_cookies = wire.is_some_and(|w| w.optimize_cookies);

        Ok(Self {
            url,
            method,
            headers,
            paths: cli.paths.clone(),
            query,
            payload,
            retry_policy,
            timeout,
            verbose_wire,
            optimize_cookies,
            include: cli.include,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Pass a URL or set request.url in config file")
            })?;

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_method(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = cli
            .method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Vec<Header>, ConfigError> {
        let from_toml = toml.map(|t| t.request.headers.as_slice()).unwrap_or_default();

        from_toml
            .iter()
            .chain(&cli.headers)
            .map(|line| -> Result<Header, ConfigError> {
                let (name, value) = parse_header_string(line)?;
                Ok(Header::new(&name, value)?)
            })
            .collect()
    }

    fn resolve_payload(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Payload, ConfigError> {
        if !cli.form.is_empty() {
            return Ok(Payload::Form(parse_params("form", &cli.form)?));
        }

        let text = cli
            .data
            .clone()
            .or_else(|| toml.and_then(|t| t.request.body.clone()));

        Ok(text.map_or(Payload::Empty, Payload::Text))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<RetryPolicy>, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        let enabled = !cli.no_retry && retry.and_then(|r| r.enabled).unwrap_or(true);
        if !enabled {
            return Ok(None);
        }

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_ms = cli
            .retry_delay_ms
            .or_else(|| retry.and_then(|r| r.initial_delay_ms))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS)
            .max(initial_delay_ms);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        let jitter = retry.and_then(|r| r.jitter).unwrap_or(true);
        let deadline_ms = retry.and_then(|r| r.deadline_ms);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if let Some(max) = retry.and_then(|r| r.max_delay_ms) {
            if max < initial_delay_ms {
                return Err(ConfigError::InvalidRetry(format!(
                    "max_delay_ms ({max}) must be >= initial_delay_ms ({initial_delay_ms})"
                )));
            }
        }

        let mut policy = RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(initial_delay_ms))
            .with_max_delay(Duration::from_millis(max_delay_ms))
            .with_multiplier(multiplier)
            .with_jitter(jitter);

        if let Some(ms) = deadline_ms {
            policy = policy.with_deadline(Duration::from_millis(ms));
        }

        Ok(Some(policy))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.wire.timeout_secs))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Whichever of ':' and '=' comes first separates name from value
    let split = s.find([':', '=']).ok_or_else(|| ConfigError::InvalidHeader {
        value: s.to_string(),
    })?;

    Ok((s[..split].trim().to_string(), s[split + 1..].trim().to_string()))
}

fn parse_params(kind: &'static str, raw: &[String]) -> Result<Vec<(String, String)>, ConfigError> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| ConfigError::InvalidParam {
                    kind,
                    value: pair.clone(),
                })
        })
        .collect()
}

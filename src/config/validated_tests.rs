//! Tests for validated configuration.

use std::time::Duration;

use http::Method;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{Payload, ValidatedConfig};
use crate::header::Header;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["rexsl-fetch"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod required_fields {
    use super::*;

    #[test]
    fn missing_url_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "url", .. })
        ));
    }

    #[test]
    fn url_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["https://example.com"]), None).unwrap();

        assert_eq!(config.url.as_str(), "https://example.com/");
    }

    #[test]
    fn url_from_toml() {
        let toml = toml(
            r#"
            [request]
            url = "https://example.com/api"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert_eq!(config.url.as_str(), "https://example.com/api");
    }

    #[test]
    fn invalid_url_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["not a url"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod defaults {
    use super::*;

    #[test]
    fn defaults_applied() {
        let config = ValidatedConfig::from_raw(&cli(&["https://example.com"]), None).unwrap();

        assert_eq!(config.method, Method::GET);
        assert!(config.headers.is_empty());
        assert!(config.paths.is_empty());
        assert!(config.query.is_empty());
        assert_eq!(config.payload, Payload::Empty);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.verbose_wire);
        assert!(!config.optimize_cookies);
        assert!(!config.include);

        let policy = config.retry_policy.unwrap();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
        assert!(policy.jitter);
        assert_eq!(policy.deadline, None);
    }
}

mod precedence {
    use super::*;

    const TOML: &str = r#"
        [request]
        url = "https://toml.example.com"
        method = "PUT"
        body = "from toml"

        [retry]
        max_attempts = 7
        initial_delay_ms = 300

        [wire]
        timeout_secs = 9
    "#;

    #[test]
    fn toml_values_used_without_cli() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(TOML))).unwrap();

        assert_eq!(config.url.host_str(), Some("toml.example.com"));
        assert_eq!(config.method, Method::PUT);
        assert_eq!(config.payload, Payload::Text("from toml".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(9));
        let policy = config.retry_policy.unwrap();
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.initial_delay, Duration::from_millis(300));
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&[
            "https://cli.example.com",
            "-X",
            "DELETE",
            "-d",
            "from cli",
            "--retry-max",
            "2",
            "--retry-delay-ms",
            "10",
            "--timeout",
            "4",
        ]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML))).unwrap();

        assert_eq!(config.url.host_str(), Some("cli.example.com"));
        assert_eq!(config.method, Method::DELETE);
        assert_eq!(config.payload, Payload::Text("from cli".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(4));
        let policy = config.retry_policy.unwrap();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.initial_delay, Duration::from_millis(10));
    }

    #[test]
    fn form_replaces_toml_body() {
        let cli = cli(&["--form", "name=John Doe", "--form", "age=42"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML))).unwrap();

        assert_eq!(
            config.payload,
            Payload::Form(vec![
                ("name".to_string(), "John Doe".to_string()),
                ("age".to_string(), "42".to_string()),
            ])
        );
    }

    #[test]
    fn verbose_wire_from_either_source() {
        let from_toml = toml("[request]\nurl = \"http://h/\"\n[wire]\nverbose = true");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&from_toml)).unwrap();
        assert!(config.verbose_wire);

        let config =
            ValidatedConfig::from_raw(&cli(&["http://h/", "--verbose-wire"]), None).unwrap();
        assert!(config.verbose_wire);
    }

    #[test]
    fn optimize_cookies_from_toml() {
        let toml = toml("[request]\nurl = \"http://h/\"\n[wire]\noptimize_cookies = true");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.optimize_cookies);
    }
}

mod headers {
    use super::*;

    #[test]
    fn both_formats_accepted() {
        let cli = cli(&[
            "http://h/",
            "-H",
            "X-Api-Key=secret",
            "-H",
            "content-type: application/json",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(
            config.headers,
            [
                Header::new("X-Api-Key", "secret").unwrap(),
                Header::new("Content-Type", "application/json").unwrap(),
            ]
        );
    }

    #[test]
    fn first_separator_wins() {
        let cli = cli(&["http://h/", "-H", "X-A: b=c", "-H", "X-B=c:d"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.headers[0].value(), "b=c");
        assert_eq!(config.headers[1].value(), "c:d");
    }

    #[test]
    fn toml_headers_come_first_and_duplicates_kept() {
        let toml = toml(
            r#"
            [request]
            url = "http://h/"
            headers = ["Accept: text/html", "X-Id: 1"]
        "#,
        );
        let cli = cli(&["-H", "Accept: text/xml"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        let rendered: Vec<String> = config.headers.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["Accept: text/html", "X-Id: 1", "Accept: text/xml"]
        );
    }

    #[test]
    fn header_without_separator_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "-H", "Broken"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn invalid_header_name_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "-H", "Bad Name: x"]), None);
        assert!(matches!(result, Err(ConfigError::Request(_))));
    }
}

mod params {
    use super::*;

    #[test]
    fn query_params_kept_in_order() {
        let cli = cli(&["http://h/", "--query", "a=1", "--query", "b=x=y"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(
            config.query,
            [
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x=y".to_string()),
            ]
        );
    }

    #[test]
    fn query_without_equals_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "--query", "flag"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidParam { kind: "query", .. })
        ));
    }

    #[test]
    fn form_with_empty_name_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "--form", "=v"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidParam { kind: "form", .. })
        ));
    }

    #[test]
    fn paths_kept_in_order() {
        let cli = cli(&["http://h/", "--path", "api", "--path", "v1/users"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.paths, ["api", "v1/users"]);
    }
}

mod retry_policy {
    use super::*;

    #[test]
    fn no_retry_flag_disables() {
        let config = ValidatedConfig::from_raw(&cli(&["http://h/", "--no-retry"]), None).unwrap();
        assert!(config.retry_policy.is_none());
    }

    #[test]
    fn toml_can_disable() {
        let toml = toml("[request]\nurl = \"http://h/\"\n[retry]\nenabled = false");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(config.retry_policy.is_none());
    }

    #[test]
    fn toml_only_options_applied() {
        let toml = toml(
            r#"
            [request]
            url = "http://h/"

            [retry]
            max_delay_ms = 900
            multiplier = 3.0
            jitter = false
            deadline_ms = 5000
        "#,
        );
        let policy = ValidatedConfig::from_raw(&cli(&[]), Some(&toml))
            .unwrap()
            .retry_policy
            .unwrap();

        assert_eq!(policy.max_delay, Duration::from_millis(900));
        assert!((policy.multiplier - 3.0).abs() < f64::EPSILON);
        assert!(!policy.jitter);
        assert_eq!(policy.deadline, Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_max_attempts_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "--retry-max", "0"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn non_positive_multiplier_returns_error() {
        let toml = toml("[request]\nurl = \"http://h/\"\n[retry]\nmultiplier = 0.0");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn infinite_multiplier_returns_error() {
        let toml = toml("[request]\nurl = \"http://h/\"\n[retry]\nmultiplier = inf");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn max_delay_below_initial_returns_error() {
        let toml = toml(
            "[request]\nurl = \"http://h/\"\n[retry]\ninitial_delay_ms = 500\nmax_delay_ms = 100",
        );
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn large_initial_delay_raises_default_max() {
        let config =
            ValidatedConfig::from_raw(&cli(&["http://h/", "--retry-delay-ms", "5000"]), None)
                .unwrap();
        let policy = config.retry_policy.unwrap();

        assert_eq!(policy.max_delay, Duration::from_secs(5));
    }
}

mod validation {
    use super::*;

    #[test]
    fn invalid_method_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "-X", "GE T"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidMethod(_))));
    }

    #[test]
    fn extension_method_accepted() {
        let config = ValidatedConfig::from_raw(&cli(&["http://h/", "-X", "PROPFIND"]), None).unwrap();
        assert_eq!(config.method.as_str(), "PROPFIND");
    }

    #[test]
    fn zero_timeout_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["http://h/", "--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn display_hides_path_and_credentials() {
        let config =
            ValidatedConfig::from_raw(&cli(&["http://user:pw@h.example/secret"]), None).unwrap();
        let text = config.to_string();

        assert!(text.contains("h.example"));
        assert!(!text.contains("pw"));
        assert!(!text.contains("secret"));
    }
}

mod config_load {
    use std::io::Write;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::write_default_config;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [request]
            url = "https://example.com/from-file"
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.url.as_str(), "https://example.com/from-file");
    }

    #[test]
    fn load_without_config_file() {
        let config = ValidatedConfig::load(&cli(&["https://example.com"])).unwrap();
        assert_eq!(config.url.as_str(), "https://example.com/");
    }

    #[test]
    fn load_nonexistent_config_file_returns_error() {
        let cli = cli(&["--config", "nonexistent_file_12345.toml"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn written_template_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rexsl-fetch.toml");
        write_default_config(&path).unwrap();

        let cli = cli(&["https://example.com", "--config", path.to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.method, Method::GET);
    }

    #[test]
    fn write_to_missing_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.toml");

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::FileWrite { .. })
        ));
    }
}

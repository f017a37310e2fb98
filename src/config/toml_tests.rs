//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.credentials.identity_key.is_none());
        assert!(config.client.environment.is_none());
        assert!(config.base_urls.oauth.is_none());
    }

    #[test]
    fn parse_credentials_section() {
        let toml = r#"
            [credentials]
            identity_key = "idk"
            secret_key = "sk"
            client_id = "cid"
            client_secret = "csecret"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.credentials.identity_key.as_deref(), Some("idk"));
        assert_eq!(config.credentials.secret_key.as_deref(), Some("sk"));
        assert_eq!(config.credentials.client_id.as_deref(), Some("cid"));
        assert_eq!(
            config.credentials.client_secret.as_deref(),
            Some("csecret")
        );
    }

    #[test]
    fn parse_client_section() {
        let toml = r#"
            [client]
            environment = "production"
            timeout_ms = 5000
            retries = 3
            retry_delay_ms = 200
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.client.environment.as_deref(), Some("production"));
        assert_eq!(config.client.timeout_ms, Some(5000));
        assert_eq!(config.client.retries, Some(3));
        assert_eq!(config.client.retry_delay_ms, Some(200));
    }

    #[test]
    fn parse_base_urls_section() {
        let toml = r#"
            [base_urls]
            integrations = "http://localhost:8080"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(
            config.base_urls.integrations.as_deref(),
            Some("http://localhost:8080")
        );
        assert!(config.base_urls.payments.is_none());
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_rejected() {
        let result = TomlConfig::parse("[webhook]\nurl = \"https://example.com\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_rejected() {
        let result = TomlConfig::parse("[client]\ntimeout = 10");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_rejected() {
        let result = TomlConfig::parse("[client]\nretries = \"three\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn negative_retries_rejected() {
        let result = TomlConfig::parse("[client]\nretries = -1");

        assert!(result.is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.client.environment.as_deref(), Some("sandbox"));
        assert!(config.credentials.identity_key.is_none());
    }

    #[test]
    fn template_mentions_every_key() {
        let template = default_config_template();

        for key in [
            "identity_key",
            "secret_key",
            "client_id",
            "client_secret",
            "timeout_ms",
            "retries",
            "retry_delay_ms",
            "integrations",
            "payments",
            "oauth",
        ] {
            assert!(template.contains(key), "template lacks {key}");
        }
    }
}

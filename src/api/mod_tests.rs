//! Tests for `Bold` construction, URL building, OAuth and terminals.

use super::*;
use crate::http::test_fixtures::{MockClient, Reply, respond, respond_json};
use crate::time::InstantSleeper;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub(super) type MockBold = Bold<Arc<MockClient>, InstantSleeper>;

/// Builds a client over a scripted transport.
pub(super) fn mock_bold(
    options: BoldOptions,
    replies: impl IntoIterator<Item = Reply>,
) -> (MockBold, Arc<MockClient>) {
    let client = Arc::new(MockClient::new(replies));
    let bold = Bold::with_client(options, Arc::clone(&client))
        .unwrap()
        .with_sleeper(InstantSleeper);
    (bold, client)
}

pub(super) fn options() -> BoldOptions {
    BoldOptions::new("idk_test")
        .with_secret_key("sk_test")
        .with_retry_delay(Duration::from_millis(10))
}

fn terminals_body(errors: serde_json::Value) -> serde_json::Value {
    json!({
        "payload": {"available_terminals": [{
            "terminal_model": "N86",
            "terminal_serial": "N860W000000",
            "status": "BINDED",
            "name": "Caja 1"
        }]},
        "errors": errors
    })
}

mod construction {
    use super::*;

    #[test]
    fn defaults_follow_sandbox() {
        let options = BoldOptions::new("key");

        assert_eq!(options.environment, Environment::Sandbox);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.retries, 0);
        assert_eq!(options.retry_delay, Duration::from_secs(1));
        assert!(options.secret_key.is_empty());
    }

    #[test]
    fn sandbox_and_production_differ_only_in_oauth_host() {
        let sandbox = BaseUrls::for_environment(Environment::Sandbox);
        let production = BaseUrls::for_environment(Environment::Production);

        assert_eq!(sandbox.oauth.as_str(), "https://api.sandbox.bold.co/");
        assert_eq!(production.oauth.as_str(), "https://api.bold.co/");
        assert_eq!(sandbox.integrations, production.integrations);
        assert_eq!(sandbox.payments, production.payments);
        assert_eq!(
            sandbox.integrations.as_str(),
            "https://integrations.api.bold.co/"
        );
        assert_eq!(sandbox.payments.as_str(), "https://payments.api.bold.co/");
    }

    #[test]
    fn injected_base_urls_override_environment() {
        let custom = BaseUrls {
            oauth: Url::parse("http://localhost:9000").unwrap(),
            integrations: Url::parse("http://localhost:9001/api/").unwrap(),
            payments: Url::parse("http://localhost:9002").unwrap(),
        };
        let (bold, _) = mock_bold(
            options()
                .with_environment(Environment::Production)
                .with_base_urls(custom.clone()),
            [],
        );

        assert_eq!(bold.base_urls(), &custom);
    }

    #[test]
    fn identity_key_with_newline_is_config_error() {
        let result = Bold::with_client(BoldOptions::new("bad\nkey"), MockClient::default());

        assert!(matches!(
            result,
            Err(BoldError::Config {
                field: Some("identity_key"),
                ..
            })
        ));
    }

    #[test]
    fn zero_retry_delay_is_config_error() {
        let result = Bold::with_client(
            BoldOptions::new("key").with_retry_delay(Duration::ZERO),
            MockClient::default(),
        );

        assert!(matches!(
            result,
            Err(BoldError::Config {
                field: Some("retry_delay"),
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_is_config_error() {
        let result = Bold::with_client(
            BoldOptions::new("key").with_timeout(Duration::ZERO),
            MockClient::default(),
        );

        assert!(matches!(
            result,
            Err(BoldError::Config {
                field: Some("timeout"),
                ..
            })
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let (bold, _) = mock_bold(options().with_oauth_credentials("cid", "csecret"), []);

        let debug = format!("{bold:?} {:?}", options().with_oauth_credentials("cid", "csecret"));

        assert!(!debug.contains("sk_test"));
        assert!(!debug.contains("idk_test"));
        assert!(!debug.contains("csecret"));
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert!("staging".parse::<Environment>().is_err());
    }
}

mod endpoints {
    use super::*;

    #[test]
    fn segments_are_appended_to_base_path() {
        let base = Url::parse("http://localhost:9001/api/").unwrap();

        let url = endpoint(&base, &["payments", "app-checkout"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:9001/api/payments/app-checkout");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let base = Url::parse("https://payments.api.bold.co").unwrap();

        let url = endpoint(&base, &["v2", "payment-voucher", "sale/1 2?x"]).unwrap();

        assert_eq!(
            url.as_str(),
            "https://payments.api.bold.co/v2/payment-voucher/sale%2F1%202%3Fx"
        );
    }

    #[test]
    fn opaque_base_is_config_error() {
        let base = Url::parse("mailto:ops@example.com").unwrap();

        assert!(matches!(
            endpoint(&base, &["x"]),
            Err(BoldError::Config { .. })
        ));
    }
}

mod oauth {
    use super::*;

    #[tokio::test]
    async fn missing_client_id_is_config_error_without_request() {
        let (bold, client) = mock_bold(options(), []);

        let err = bold.oauth().get_token(RequestConfig::new()).await.unwrap_err();

        assert!(matches!(
            err,
            BoldError::Config {
                field: Some("client_id"),
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "clientId and clientSecret are required for OAuth token"
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn missing_client_secret_names_secret() {
        let mut opts = options();
        opts.client_id = Some("cid".into());
        let (bold, client) = mock_bold(opts, []);

        let err = bold.oauth().get_token(RequestConfig::new()).await.unwrap_err();

        assert!(matches!(
            err,
            BoldError::Config {
                field: Some("client_secret"),
                ..
            }
        ));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn token_request_is_form_post_without_api_key() {
        let (bold, client) = mock_bold(
            options().with_oauth_credentials("cid", "c&secret"),
            [respond_json(
                200,
                &json!({"access_token": "tok", "token_type": "Bearer", "expires_in": 3600}),
            )],
        );

        let token = bold.oauth().get_token(RequestConfig::new()).await.unwrap();

        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, Some(3600));
        let request = client.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "https://api.sandbox.bold.co/oauth/token");
        assert_eq!(
            request.headers[http::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert!(request.headers.get(AUTHORIZATION).is_none());
        assert_eq!(
            request.body.as_deref(),
            Some(b"grant_type=client_credentials&client_id=cid&client_secret=c%26secret".as_slice())
        );
    }

    #[tokio::test]
    async fn production_uses_production_oauth_host() {
        let (bold, client) = mock_bold(
            options()
                .with_environment(Environment::Production)
                .with_oauth_credentials("cid", "cs"),
            [respond_json(
                200,
                &json!({"access_token": "tok", "token_type": "Bearer"}),
            )],
        );

        bold.oauth().get_token(RequestConfig::new()).await.unwrap();

        assert_eq!(
            client.last_request().url.as_str(),
            "https://api.bold.co/oauth/token"
        );
    }
}

mod terminals {
    use super::*;

    #[tokio::test]
    async fn list_sends_api_key_and_decodes() {
        let (bold, client) = mock_bold(options(), [respond_json(200, &terminals_body(json!([])))]);

        let response = bold.terminals().list(RequestConfig::new()).await.unwrap();

        assert_eq!(response.payload.available_terminals[0].name, "Caja 1");
        let request = client.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://integrations.api.bold.co/payments/binded-terminals"
        );
        assert_eq!(request.headers[AUTHORIZATION], "x-api-key idk_test");
    }

    #[tokio::test]
    async fn envelope_errors_become_api_error() {
        let (bold, _) = mock_bold(
            options(),
            [respond_json(
                200,
                &terminals_body(json!([{"code": "T-404", "message": "no terminals"}])),
            )],
        );

        let err = bold.terminals().list(RequestConfig::new()).await.unwrap_err();

        match err {
            BoldError::Api { errors } => assert_eq!(errors[0]["code"], "T-404"),
            other => panic!("expected api_error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_retry_defaults_apply() {
        let (bold, client) = mock_bold(
            options().with_retries(1),
            [respond(503, ""), respond_json(200, &terminals_body(json!([])))],
        );

        bold.terminals().list(RequestConfig::new()).await.unwrap();

        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn per_call_retries_override_defaults() {
        let (bold, client) = mock_bold(options().with_retries(3), [respond(503, "")]);

        let err = bold
            .terminals()
            .list(RequestConfig::new().with_retries(0))
            .await
            .unwrap_err();

        assert!(matches!(err, BoldError::Http { .. }));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn per_call_zero_retry_delay_is_config_error() {
        let (bold, client) = mock_bold(options(), []);

        let err = bold
            .terminals()
            .list(RequestConfig::new().with_retry_delay(Duration::ZERO))
            .await
            .unwrap_err();

        assert!(matches!(err, BoldError::Config { .. }));
        assert_eq!(client.calls(), 0);
    }
}

//! Tests for the webhooks resource.

use super::mod_tests::{mock_bold, options};
use super::*;
use crate::http::test_fixtures::respond_json;
use crate::models::WebhookEventType;
use crate::signature::{SIGNATURE_HEADER, generate_signature};
use serde_json::json;

const PAYLOAD: &str = r#"{"id":"evt_1","type":"SALE_APPROVED","subject":"PAY_1","source":"/payments","spec_version":"1.0","time":1732000000000,"data":{"payment_id":"PAY_1","merchant_id":"M1","created_at":"2024-11-19T10:00:00Z","amount":{"total":5000}},"datacontenttype":"application/json"}"#;

mod signatures {
    use super::*;

    #[test]
    fn verify_uses_client_secret() {
        let (bold, _) = mock_bold(options(), []);
        let signature = generate_signature(PAYLOAD, "sk_test");

        assert!(bold.webhooks().verify(PAYLOAD, &signature).valid);
    }

    #[test]
    fn verify_with_overrides_secret() {
        let (bold, _) = mock_bold(options(), []);
        let signature = generate_signature(PAYLOAD, "rotated");

        assert!(!bold.webhooks().verify(PAYLOAD, &signature).valid);
        assert!(bold.webhooks().verify_with(PAYLOAD, &signature, "rotated").valid);
    }

    #[test]
    fn generate_signature_matches_free_function() {
        let (bold, _) = mock_bold(options(), []);

        assert_eq!(
            bold.webhooks().generate_signature(PAYLOAD),
            generate_signature(PAYLOAD, "sk_test")
        );
        assert_eq!(
            bold.webhooks().generate_signature_with(PAYLOAD, ""),
            generate_signature(PAYLOAD, "")
        );
    }

    #[test]
    fn verify_headers_reads_signature_header() {
        let (bold, _) = mock_bold(options(), []);
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&generate_signature(PAYLOAD, "sk_test")).unwrap(),
        );

        assert!(bold.webhooks().verify_headers(&headers, PAYLOAD).valid);
    }

    #[test]
    fn verify_headers_without_header_is_invalid() {
        let (bold, _) = mock_bold(options(), []);

        let result = bold.webhooks().verify_headers(&HeaderMap::new(), PAYLOAD);

        assert_eq!(result.error.as_deref(), Some("Signature is required"));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn parse_returns_none_for_malformed() {
        let (bold, _) = mock_bold(options(), []);

        assert!(bold.webhooks().parse::<serde_json::Value>("{").is_none());
        assert_eq!(
            bold.webhooks().parse::<serde_json::Value>(r#"{"a":1}"#),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn parse_notification_validates() {
        let (bold, _) = mock_bold(options(), []);

        let notification = bold.webhooks().parse_notification(PAYLOAD).unwrap();

        assert_eq!(notification.event_type, WebhookEventType::SaleApproved);
        assert_eq!(notification.data.payment_id, "PAY_1");
    }

    #[test]
    fn parse_notification_reports_malformed_json_as_root_issue() {
        let (bold, _) = mock_bold(options(), []);

        let err = bold.webhooks().parse_notification("{").unwrap_err();

        match err {
            BoldError::InvalidResponse { issues, raw } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].path, "");
                assert_eq!(raw, "{");
            }
            other => panic!("expected invalid_response, got {other:?}"),
        }
    }

    #[test]
    fn parse_notification_rejects_wrong_shape() {
        let (bold, _) = mock_bold(options(), []);

        let err = bold
            .webhooks()
            .parse_notification(r#"{"id":"evt_1"}"#)
            .unwrap_err();

        assert!(matches!(err, BoldError::InvalidResponse { .. }));
    }
}

mod notifications {
    use super::*;

    fn notifications_reply() -> crate::http::test_fixtures::Reply {
        let notification: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        respond_json(200, &json!({"notifications": [notification]}))
    }

    #[tokio::test]
    async fn fetches_by_payment_id() {
        let (bold, client) = mock_bold(options(), [notifications_reply()]);

        let response = bold
            .webhooks()
            .notifications("PAY_1", false, RequestConfig::new())
            .await
            .unwrap();

        assert_eq!(response.notifications.len(), 1);
        let request = client.last_request();
        assert_eq!(
            request.url.as_str(),
            "https://integrations.api.bold.co/payments/webhook/notifications/PAY_1"
        );
        assert_eq!(request.headers[AUTHORIZATION], "x-api-key idk_test");
    }

    #[tokio::test]
    async fn external_reference_adds_query_flag() {
        let (bold, client) = mock_bold(options(), [notifications_reply()]);

        bold.webhooks()
            .notifications("ORD 42", true, RequestConfig::new())
            .await
            .unwrap();

        assert_eq!(
            client.last_request().url.as_str(),
            "https://integrations.api.bold.co/payments/webhook/notifications/ORD%2042?is_external_reference=true"
        );
    }
}

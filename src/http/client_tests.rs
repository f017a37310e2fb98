//! Tests for `ReqwestClient`.
//!
//! Request/response behavior of the SDK is covered with the scripted
//! mock transport in the executor and facade tests; these only pin down
//! construction and how reqwest failures are classified.

use super::client::classify;
use super::*;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

mod construction {
    use super::*;

    #[test]
    fn user_agent_carries_crate_version() {
        assert!(USER_AGENT.starts_with("bold-sdk/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn default_and_custom_clients_build() {
        let custom = reqwest::Client::builder()
            .user_agent("bold-sdk-tests")
            .build()
            .unwrap();

        for client in [
            ReqwestClient::new(),
            ReqwestClient::default(),
            ReqwestClient::from_client(custom),
        ] {
            assert!(format!("{client:?}").contains("ReqwestClient"));
        }
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod classification {
    use super::*;

    #[test]
    fn builder_error_is_invalid_url_and_final() {
        let error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();

        let mapped = classify(error);

        assert!(matches!(mapped, TransportError::InvalidUrl(_)));
        assert!(!mapped.is_retryable());
    }

    #[tokio::test]
    async fn unreachable_host_is_retryable_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

        let result = client
            .request(HttpRequest::new(http::Method::GET, url))
            .await;

        // Behind a proxy the failure comes back as a 5xx instead.
        match result {
            Err(error @ TransportError::Connection(_)) => {
                assert!(error.is_retryable(), "{error:?}");
            }
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }

    /// Sends response headers promising 1000 bytes, writes five, then resets.
    #[allow(deprecated)]
    async fn serve_truncated_then_reset(listener: TcpListener) {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request).await.unwrap();

        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nhello")
            .await
            .unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        stream.set_linger(Some(Duration::ZERO)).unwrap();
        drop(stream);
    }

    #[tokio::test]
    async fn reset_while_reading_body_is_retryable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = url::Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let server = tokio::spawn(serve_truncated_then_reset(listener));
        let direct = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ReqwestClient::from_client(direct);

        let result = client
            .request(HttpRequest::new(http::Method::GET, url))
            .await;
        server.await.unwrap();

        match result {
            Err(error @ (TransportError::Protocol(_) | TransportError::Connection(_))) => {
                assert!(error.is_retryable(), "{error:?}");
            }
            other => panic!("Expected a reset to surface as a transport error, got {other:?}"),
        }
    }
}

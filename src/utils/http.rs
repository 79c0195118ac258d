//! Shared HTTP response handling

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Maps a status and raw body to the expected shape. Non-success statuses and
/// undecodable success bodies both become `Error::Api`.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(Error::api(status.as_u16(), error_message(body)));
    }

    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        Error::api(
            status.as_u16(),
            format!("Failed to decode response: {}", e),
        )
    })
}

/// Pulls `error.message` or `message` out of a JSON error body, falling back
/// to the raw text.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
            .or_else(|| v.get("message"))
            .and_then(|m| m.as_str())
    });

    match message {
        Some(m) => m.to_string(),
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchanges::kalshi::{Balance, MarketResponse, MarketsResponse};
    use tokio_test::assert_ok;

    #[test]
    fn decodes_success_body() {
        let balance: Balance = assert_ok!(decode_response(StatusCode::OK, r#"{"balance": 5000}"#));
        assert_eq!(balance.balance, 5000);
    }

    #[test]
    fn malformed_success_body_is_api_error() {
        let err = decode_response::<Balance>(StatusCode::OK, "<html>oops</html>").unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 200);
                assert!(message.starts_with("Failed to decode response"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn wrong_shape_success_body_is_api_error() {
        let result = decode_response::<Balance>(StatusCode::OK, r#"{"markets": []}"#);
        assert!(matches!(result, Err(Error::Api { status: 200, .. })));
    }

    #[test]
    fn empty_success_body_decodes_as_empty_object() {
        let markets: MarketsResponse = assert_ok!(decode_response(StatusCode::OK, ""));
        assert!(markets.markets.is_empty());
    }

    #[test]
    fn empty_markets_list_is_not_an_error() {
        let resp: MarketsResponse =
            assert_ok!(decode_response(StatusCode::OK, r#"{"markets": [], "cursor": ""}"#));
        assert!(resp.markets.is_empty());
    }

    #[test]
    fn error_status_uses_server_message() {
        let body = r#"{"error": {"code": "not_found", "message": "market not found"}}"#;
        let err = decode_response::<MarketResponse>(StatusCode::NOT_FOUND, body).unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "market not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_status_with_top_level_message() {
        let body = r#"{"message": "rate limited"}"#;
        let err = decode_response::<Balance>(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        assert_eq!(err.to_string(), "API error (429): rate limited");
    }

    #[test]
    fn error_status_with_plain_body() {
        let err = decode_response::<Balance>(StatusCode::UNAUTHORIZED, "unauthorized\n").unwrap_err();
        assert_eq!(err.to_string(), "API error (401): unauthorized");
    }

    #[test]
    fn error_status_with_empty_body() {
        let err = decode_response::<Balance>(StatusCode::BAD_GATEWAY, "").unwrap_err();
        assert_eq!(err.to_string(), "API error (502): empty response body");
    }
}

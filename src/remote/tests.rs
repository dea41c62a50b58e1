use super::{Connectivity, RemoteConfig, RemoteError, RestRemote};
use anyhow::Result;
use reqwest::StatusCode;

#[test]
fn test_error_mapping_follows_status_codes() {
    assert!(matches!(RemoteError::from_response(StatusCode::BAD_REQUEST, "bad"), RemoteError::BadRequest(_)));
    assert!(matches!(RemoteError::from_response(StatusCode::UNAUTHORIZED, ""), RemoteError::Unauthorized(_)));
    assert!(matches!(RemoteError::from_response(StatusCode::FORBIDDEN, ""), RemoteError::Forbidden(_)));
    assert!(matches!(RemoteError::from_response(StatusCode::NOT_FOUND, ""), RemoteError::NotFound(_)));
    assert!(matches!(RemoteError::from_response(StatusCode::TOO_MANY_REQUESTS, ""), RemoteError::RateLimited(_)));
    assert!(matches!(RemoteError::from_response(StatusCode::BAD_GATEWAY, ""), RemoteError::ServerError(502, _)));
    assert!(matches!(RemoteError::from_response(StatusCode::IM_A_TEAPOT, ""), RemoteError::HttpError(418, _)));
}

#[test]
fn test_error_mapping_extracts_json_messages() {
    let body = r#"{"code":"42P01","message":"relation \"transactions\" does not exist"}"#;

    match RemoteError::from_response(StatusCode::NOT_FOUND, body) {
        RemoteError::NotFound(message) => assert_eq!(message, "relation \"transactions\" does not exist"),
        other => panic!("unexpected error {other:?}"),
    }

    match RemoteError::from_response(StatusCode::BAD_REQUEST, "plain text") {
        RemoteError::BadRequest(message) => assert_eq!(message, "plain text"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_rest_remote_builds_table_url() -> Result<()> {
    let remote = RestRemote::new(&RemoteConfig {
        url: "https://example.supabase.co/".to_string(),
        token: "anon-token".to_string(),
    })?;

    assert_eq!(remote.table_url(), "https://example.supabase.co/rest/v1/transactions");

    Ok(())
}

#[test]
fn test_rest_remote_rejects_tokens_that_are_not_header_safe() {
    let result = RestRemote::new(&RemoteConfig {
        url: "https://example.supabase.co".to_string(),
        token: "line\nbreak".to_string(),
    });

    assert!(matches!(result, Err(RemoteError::InvalidConfig(_))));
}

#[test]
fn test_connectivity_reflects_last_outcome() {
    let connectivity = Connectivity::new(true);

    assert!(connectivity.is_online());

    connectivity.set_online(false);

    assert!(!connectivity.is_online());
}

use crate::cli::api_client::*;
use serial_test::serial;
use std::env;

#[test]
fn test_new_with_explicit_url() {
    let client = ApiClient::new(Some("http://custom:8080".to_string()));
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let client = ApiClient::new(Some("http://custom:8080/".to_string()));
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
#[serial]
fn test_new_with_default() {
    let previous = env::var(API_URL_ENV).ok();
    unsafe {
        env::remove_var(API_URL_ENV);
    }

    let client = ApiClient::new(None);
    assert_eq!(client.base_url(), DEFAULT_API_URL);

    unsafe {
        if let Some(v) = previous {
            env::set_var(API_URL_ENV, v);
        }
    }
}

#[test]
#[serial]
fn test_env_var_is_used_when_no_flag() {
    unsafe {
        env::set_var(API_URL_ENV, "http://from-env:9000");
    }

    let client = ApiClient::new(None);
    assert_eq!(client.base_url(), "http://from-env:9000");

    // Flag wins over env var
    let client = ApiClient::new(Some("http://explicit:7777".to_string()));
    assert_eq!(client.base_url(), "http://explicit:7777");

    // Cleanup
    unsafe {
        env::remove_var(API_URL_ENV);
    }
}

#[tokio::test]
async fn test_connection_refused_is_connection_failed() {
    // Port 9 (discard) is not expected to be listening locally
    let client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));

    let result = client.get("/categories").send().await;
    let err = crate::cli::error::CliError::from(result.unwrap_err());
    assert!(matches!(
        err,
        crate::cli::error::CliError::ConnectionFailed { .. }
    ));
}

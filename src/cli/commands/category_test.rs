use crate::cli::api_client::ApiClient;
use crate::cli::commands::category::*;
use crate::cli::commands::test_server::spawn_test_server;
use crate::cli::error::CliError;

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_json() {
    let (url, _handle) = spawn_test_server(&[]).await;
    let api_client = ApiClient::new(Some(url));

    let output = list_categories(&api_client, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed.as_object().unwrap().len(), 6);
    assert_eq!(parsed["1"], "Science");
    assert_eq!(parsed["6"], "Sports");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_table() {
    let (url, _handle) = spawn_test_server(&[]).await;
    let api_client = ApiClient::new(Some(url));

    let output = list_categories(&api_client, "table").await.unwrap();

    assert!(output.contains("ID"));
    assert!(output.contains("Type"));
    assert!(output.contains("Geography"));
    assert!(output.contains("Entertainment"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_categories_keys_are_ids() {
    let (url, _handle) = spawn_test_server(&[]).await;
    let api_client = ApiClient::new(Some(url));

    let categories = fetch_categories(&api_client).await.unwrap();
    assert_eq!(categories.get(&4).map(String::as_str), Some("History"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_categories_without_server() {
    let api_client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));

    let result = list_categories(&api_client, "table").await;
    assert!(matches!(result, Err(CliError::ConnectionFailed { .. })));
}

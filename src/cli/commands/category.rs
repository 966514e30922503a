use std::collections::BTreeMap;

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use serde::Deserialize;
use tabled::{Table, Tabled};

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

#[derive(Tabled)]
struct CategoryDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Fetch the category id → type mapping
pub async fn fetch_categories(api_client: &ApiClient) -> CliResult<BTreeMap<i64, String>> {
    let response = api_client.get("/categories").send().await?;
    let body: CategoriesResponse = ApiClient::handle_response(response).await?;
    Ok(body.categories)
}

/// List all categories
pub async fn list_categories(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let categories = fetch_categories(api_client).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&categories)?),
        _ => Ok(format_table(&categories)),
    }
}

fn format_table(categories: &BTreeMap<i64, String>) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let rows: Vec<CategoryDisplay> = categories
        .iter()
        .map(|(id, kind)| CategoryDisplay {
            id: *id,
            kind: kind.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

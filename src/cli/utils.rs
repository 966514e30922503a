//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

use crate::cli::error::{CliError, CliResult};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Parse a comma-separated id list such as `1,4, 7`
pub fn parse_id_list(ids: Option<&str>) -> CliResult<Vec<i64>> {
    let Some(ids) = ids else {
        return Ok(vec![]);
    };

    ids.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|_| CliError::InvalidArgument {
                message: format!("'{}' is not a question id", s),
            })
        })
        .collect()
}

/// Compare a typed answer with the expected one, ignoring case and surrounding whitespace
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

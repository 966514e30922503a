use crate::cli::error::CliError;
use crate::cli::utils::*;
use tabled::{Table, Tabled};

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate_with_ellipsis("Paris", 10), "Paris");
    assert_eq!(truncate_with_ellipsis("exactly10!", 10), "exactly10!");
}

#[test]
fn test_truncate_long_string_adds_ellipsis() {
    let result = truncate_with_ellipsis("What is the capital of France?", 10);
    assert_eq!(result, "What is...");
    assert_eq!(result.chars().count(), 10);
}

#[test]
fn test_truncate_counts_characters_not_bytes() {
    let result = truncate_with_ellipsis("Qu'est-ce que c'était ça?", 12);
    assert_eq!(result, "Qu'est-ce...");
}

#[test]
fn test_truncate_tiny_max_does_not_panic() {
    assert_eq!(truncate_with_ellipsis("abcdef", 2), "...");
}

#[test]
fn test_parse_id_list() {
    assert_eq!(parse_id_list(None).unwrap(), Vec::<i64>::new());
    assert_eq!(parse_id_list(Some("")).unwrap(), Vec::<i64>::new());
    assert_eq!(parse_id_list(Some("1")).unwrap(), vec![1]);
    assert_eq!(parse_id_list(Some("1, 4,7,")).unwrap(), vec![1, 4, 7]);
}

#[test]
fn test_parse_id_list_rejects_garbage() {
    let err = parse_id_list(Some("1,two,3")).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument { .. }));
    assert!(err.to_string().contains("two"));
}

#[test]
fn test_answers_match_ignores_case_and_whitespace() {
    assert!(answers_match("  paris ", "Paris"));
    assert!(answers_match("DA VINCI", "Da Vinci"));
    assert!(!answers_match("London", "Paris"));
    assert!(!answers_match("", "Paris"));
}

#[derive(Tabled)]
struct Row {
    id: i64,
}

#[test]
fn test_apply_table_style_uses_rounded_corners() {
    let mut table = Table::new(vec![Row { id: 1 }]);
    apply_table_style(&mut table);
    let rendered = table.to_string();
    assert!(rendered.contains('╭'));
}

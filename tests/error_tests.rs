// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_review::{
    error::{
        AppError, ReviewError, config_error, file_read_error, output_error, policy_parse_error,
        query_parse_error
    },
    schema::ComponentKind
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/file.sql", io_error);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_query_parse_error() {
    let error = query_parse_error("Unexpected token");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_query_parse_error_with_position() {
    let error = query_parse_error("Expected end of statement at Line: 3, Column 25");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_position_extraction_large_numbers() {
    let error = query_parse_error("Error at Line: 999, Column 12345");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_policy_parse_error() {
    let error = policy_parse_error("policy.yaml", "missing field `id`");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_config_and_output_errors() {
    assert!(!config_error("Invalid configuration value").to_string().is_empty());
    assert!(!output_error("serialization failed").to_string().is_empty());
}

#[test]
fn test_review_error_messages() {
    assert_eq!(
        ReviewError::UnknownRuleType("naming.unknown".to_string()).to_string(),
        "unknown SQL review rule type: naming.unknown"
    );
    assert_eq!(
        ReviewError::MissingComponent {
            rule_type: "naming.table".to_string(),
            kind:      ComponentKind::StringArray
        }
        .to_string(),
        "rule naming.table requires a STRING_ARRAY component"
    );
    assert_eq!(
        ReviewError::AdvisorNotFound {
            dialect:   "MYSQL".to_string(),
            rule_type: "table.comment".to_string()
        }
        .to_string(),
        "no advisor registered for rule table.comment on MYSQL"
    );
    assert_eq!(
        ReviewError::InvalidFormat {
            pattern: "([a-z".to_string(),
            message: "unclosed group".to_string()
        }
        .to_string(),
        "invalid naming format \"([a-z\": unclosed group"
    );
}

#[test]
fn test_review_error_converts_to_app_error() {
    let error: AppError = ReviewError::UnknownPreset("staging".to_string()).into();
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_review_error_is_comparable() {
    let a = ReviewError::UnknownDialect("oracle".to_string());
    assert_eq!(a.clone(), a);
    assert_ne!(a, ReviewError::UnknownDialect("db2".to_string()));
}

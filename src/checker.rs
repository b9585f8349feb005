//! @ai:module:intent Check extracted query names for problems in the generated code
//! @ai:module:layer application
//! @ai:module:public_api check_queries, CheckResult, CheckIssue, Severity
//! @ai:module:depends_on annotation, render
//! @ai:module:stateless true

use crate::annotation::{Location, QueryAnnotation};
use crate::render::{constant_name, RenderConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// @ai:intent Severity level for check issues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Info,
}

/// @ai:intent A single problem found in the extracted names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub location: Location,
    pub suggestion: Option<String>,
}

/// @ai:intent Result of checking a list of query names
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckResult {
    pub queries_checked: usize,
    pub issues: Vec<CheckIssue>,
    pub warnings: usize,
}

impl CheckResult {
    /// @ai:intent Count warnings, ignoring informational notes
    pub fn problem_count(&self) -> usize {
        self.warnings
    }

    /// @ai:intent Check if nothing at all was reported
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: CheckIssue) {
        if issue.severity == Severity::Warning {
            self.warnings += 1;
        }
        self.issues.push(issue);
    }
}

/// @ai:intent Report duplicate names and constant names that are not valid identifiers
/// @ai:post input is never modified; issues are reported in annotation order
/// @ai:effects pure
pub fn check_queries(queries: &[QueryAnnotation], config: &RenderConfig) -> CheckResult {
    let mut result = CheckResult {
        queries_checked: queries.len(),
        ..Default::default()
    };

    if queries.is_empty() {
        result.push(CheckIssue {
            severity: Severity::Info,
            code: "I001".to_string(),
            message: "No `-- name:` annotations found".to_string(),
            location: Location::default(),
            suggestion: Some("Annotate queries with `-- name: QueryName :one`".to_string()),
        });
        return result;
    }

    let mut first_seen: HashMap<&str, &Location> = HashMap::new();

    for query in queries {
        let ident = constant_name(&config.prefix, &query.name);

        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            result.push(CheckIssue {
                severity: Severity::Warning,
                code: "W002".to_string(),
                message: format!("Constant `{}` is not a valid identifier", ident),
                location: query.location.clone(),
                suggestion: Some("Use a non-empty prefix or rename the query".to_string()),
            });
        }

        match first_seen.get(query.name.as_str()) {
            Some(first) => result.push(CheckIssue {
                severity: Severity::Warning,
                code: "W001".to_string(),
                message: format!("Duplicate query name `{}` redefines `{}`", query.name, ident),
                location: query.location.clone(),
                suggestion: Some(format!(
                    "First defined at {}:{}",
                    first.file.display(),
                    first.line
                )),
            }),
            None => {
                first_seen.insert(&query.name, &query.location);
            }
        }
    }

    for issue in &result.issues {
        tracing::debug!(
            "{}:{} {} {}",
            issue.location.file.display(),
            issue.location.line,
            issue.code,
            issue.message
        );
    }
    tracing::info!(
        "Checked {} query name(s): {} warning(s)",
        result.queries_checked,
        result.warnings
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn query(name: &str, line: usize) -> QueryAnnotation {
        QueryAnnotation::new(name, Location::new(PathBuf::from("query.sql"), line))
    }

    #[test]
    fn test_clean_queries() {
        let queries = vec![query("GetUser", 1), query("ListUsers", 4)];
        let result = check_queries(&queries, &RenderConfig::default());

        assert!(result.is_clean());
        assert_eq!(result.problem_count(), 0);
        assert_eq!(result.queries_checked, 2);
    }

    #[test]
    fn test_duplicate_reported_once_per_repeat() {
        let queries = vec![query("GetUser", 1), query("GetUser", 5), query("GetUser", 9)];
        let result = check_queries(&queries, &RenderConfig::default());

        assert_eq!(result.warnings, 2);
        assert!(result.issues.iter().all(|i| i.code == "W001"));
        assert_eq!(result.issues[0].location.line, 5);
        assert_eq!(
            result.issues[1].suggestion.as_deref(),
            Some("First defined at query.sql:1")
        );
    }

    #[test]
    fn test_leading_digit_with_prefix_is_fine() {
        let result = check_queries(&[query("2fa", 1)], &RenderConfig::new("db", "sql"));
        assert!(result.is_clean());
    }

    #[test]
    fn test_leading_digit_without_prefix() {
        let result = check_queries(&[query("2fa", 3)], &RenderConfig::new("db", ""));
        assert_eq!(result.warnings, 1);
        assert_eq!(result.issues[0].code, "W002");
        assert_eq!(result.problem_count(), 1);
    }

    #[test]
    fn test_empty_input_is_info() {
        let result = check_queries(&[], &RenderConfig::default());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Info);
        assert_eq!(result.problem_count(), 0);
        assert!(!result.is_clean());
    }

    #[test]
    fn test_duplicates_across_files() {
        let queries = vec![
            query("GetUser", 1),
            QueryAnnotation::new("GetUser", Location::new(PathBuf::from("users.sql"), 3)),
        ];
        let result = check_queries(&queries, &RenderConfig::default());

        assert_eq!(result.warnings, 1);
        assert_eq!(result.issues[0].location.file, PathBuf::from("users.sql"));
    }
}

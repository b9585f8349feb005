//! @ai:module:intent Format check reports and run summaries for the terminal
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportFormat, format_check_result, format_query_list
//! @ai:module:depends_on checker, annotation
//! @ai:module:stateless true

use crate::annotation::QueryAnnotation;
use crate::checker::{CheckResult, Severity};
use crate::error::Result;
use colored::Colorize;

/// @ai:intent Report format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// @ai:intent Format check results as a string
/// @ai:effects pure
pub fn format_check_result(result: &CheckResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Text => Ok(format_check_result_text(result)),
    }
}

/// @ai:intent Format check results as human-readable text
/// @ai:effects pure
fn format_check_result_text(result: &CheckResult) -> String {
    let mut output = String::new();

    for issue in &result.issues {
        let severity_str = match issue.severity {
            Severity::Warning => "WARN".yellow().bold(),
            Severity::Info => "INFO".blue(),
        };

        if issue.location.line > 0 {
            let location = format!(
                "{}:{}",
                issue.location.file.display(),
                issue.location.line
            );
            output.push_str(&format!(
                "{} {} - {} ({})\n",
                severity_str,
                location.dimmed(),
                issue.message,
                issue.code.dimmed()
            ));
        } else {
            output.push_str(&format!(
                "{} {} ({})\n",
                severity_str,
                issue.message,
                issue.code.dimmed()
            ));
        }

        if let Some(suggestion) = &issue.suggestion {
            output.push_str(&format!("  {} {}\n", "hint:".cyan(), suggestion));
        }
    }

    output.push_str(&format!("Checked {} query names: ", result.queries_checked));

    if result.warnings > 0 {
        output.push_str(&format!(
            "{} warnings\n",
            result.warnings.to_string().yellow()
        ));
    } else {
        output.push_str(&format!("{}\n", "OK".green().bold()));
    }

    output
}

/// @ai:intent List extracted query names with their source locations
/// @ai:effects pure
pub fn format_query_list(queries: &[QueryAnnotation]) -> String {
    let mut output = String::new();

    for query in queries {
        output.push_str(&format!(
            "  {} {}\n",
            query.name.cyan(),
            format!("({}:{})", query.location.file.display(), query.location.line).dimmed()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Location;
    use crate::checker::check_queries;
    use crate::render::RenderConfig;
    use std::path::PathBuf;

    fn queries(names: &[&str]) -> Vec<QueryAnnotation> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| QueryAnnotation::new(*n, Location::new(PathBuf::from("q.sql"), i + 1)))
            .collect()
    }

    #[test]
    fn test_text_report_mentions_issue() {
        colored::control::set_override(false);
        let result = check_queries(&queries(&["A", "A"]), &RenderConfig::default());
        let text = format_check_result(&result, ReportFormat::Text).unwrap();

        assert!(text.contains("WARN q.sql:2 - Duplicate query name `A`"));
        assert!(text.contains("hint: First defined at q.sql:1"));
        assert!(text.ends_with("Checked 2 query names: 1 warnings\n"));
    }

    #[test]
    fn test_text_report_clean() {
        colored::control::set_override(false);
        let result = check_queries(&queries(&["A"]), &RenderConfig::default());
        let text = format_check_result(&result, ReportFormat::Text).unwrap();
        assert_eq!(text, "Checked 1 query names: OK\n");
    }

    #[test]
    fn test_json_report() {
        let result = check_queries(&queries(&["A", "A"]), &RenderConfig::default());
        let json = format_check_result(&result, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["warnings"], 1);
        assert_eq!(value["issues"][0]["code"], "W001");
        assert_eq!(value["issues"][0]["severity"], "warning");
    }

    #[test]
    fn test_query_list() {
        colored::control::set_override(false);
        let list = format_query_list(&queries(&["GetUser"]));
        assert_eq!(list, "  GetUser (q.sql:1)\n");
    }
}

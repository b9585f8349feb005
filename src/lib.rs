//! @ai:module:intent Generate string constants from sqlc `-- name:` query annotations
//! @ai:module:layer application
//! @ai:module:public_api annotation, checker, config, error, extractor, language, output, render, generate
//! @ai:module:stateless true
//!
//! # sqlc-query-consts
//!
//! Reads an sqlc query file, collects every `-- name: QueryName` annotation in
//! file order and writes a source file with one string constant per name.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sqlc_query_consts::{generate, GenerateOptions, RenderConfig};
//! use std::path::PathBuf;
//!
//! let options = GenerateOptions {
//!     input: PathBuf::from("db/queries.sql"),
//!     output: PathBuf::from("db/querynames.go"),
//!     render: RenderConfig::new("db", "sql"),
//!     strict: false,
//! };
//! let report = generate(&options).unwrap();
//! println!("{} constants", report.names.len());
//! ```

pub mod annotation;
pub mod checker;
pub mod config;
pub mod error;
pub mod extractor;
pub mod language;
pub mod output;
pub mod render;

pub use annotation::{Location, ParsedQueryFile, QueryAnnotation};
pub use checker::{check_queries, CheckIssue, CheckResult, Severity};
pub use config::{CliOverrides, ToolConfig};
pub use error::{Error, ErrorStage, Result};
pub use extractor::{extract_file, extract_path, parse_query_names};
pub use language::{detect_language, Language};
pub use output::{format_check_result, ReportFormat};
pub use render::{render_constants, write_output, RenderConfig};

use std::path::PathBuf;

/// @ai:intent Inputs for one generator run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub render: RenderConfig,
    pub strict: bool,
}

/// @ai:intent Outcome of a successful generator run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub queries: Vec<QueryAnnotation>,
    pub names: Vec<String>,
    pub check: CheckResult,
}

/// @ai:intent Run load, extract, check, render and write in sequence
/// @ai:pre options.input exists
/// @ai:post on error before the write step the output file is untouched
/// @ai:effects fs:read, fs:write
pub fn generate(options: &GenerateOptions) -> Result<GenerateReport> {
    let files = extractor::extract_path(&options.input)?;
    let queries = annotation::collect_annotations(&files);
    let names: Vec<String> = queries.iter().map(|q| q.name.clone()).collect();

    tracing::info!(
        "Extracted {} query name(s) from {}",
        names.len(),
        options.input.display()
    );

    let check = checker::check_queries(&queries, &options.render);
    if options.strict && check.problem_count() > 0 {
        return Err(Error::Check {
            report: Box::new(check),
        });
    }

    let code = render::render_constants(&names, &options.render);
    render::write_output(&options.output, &code)?;

    tracing::info!(
        "Wrote {} constant(s) for {} to {}",
        names.len(),
        options.render.language,
        options.output.display()
    );

    Ok(GenerateReport {
        output: options.output.clone(),
        queries,
        names,
        check,
    })
}

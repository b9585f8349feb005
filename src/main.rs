//! @ai:module:intent CLI entry point for generating query name constants
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, output, generate

use clap::{Parser, ValueEnum};
use sqlc_query_consts::{
    config::{CliOverrides, ToolConfig},
    generate, output, CheckResult, Error, GenerateOptions, Language, ReportFormat,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlc-query-consts")]
#[command(author, version, about = "Generate constants from sqlc query names")]
struct Cli {
    /// Path to the sqlc query file e.g. db/queries.sql (a directory reads every .sql file in it)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file name e.g. querynames.go
    #[arg(short, long)]
    output: PathBuf,

    /// Package name for the generated file [default: main]
    #[arg(short, long)]
    package: Option<String>,

    /// Prefix for the generated constants [default: SQL]
    #[arg(short = 'c', long)]
    prefix: Option<String>,

    /// Target language (detected from the output extension when omitted)
    #[arg(short, long, value_enum)]
    lang: Option<Lang>,

    /// Config file with default settings [default: sqlc-consts.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail instead of generating when query names are duplicated or invalid
    #[arg(long)]
    strict: bool,

    /// Format of the query name report
    #[arg(long, value_enum, default_value = "text")]
    report: Format,

    /// Enable debug logging and list every generated constant
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    Go,
    Rust,
    #[value(alias = "ts")]
    Typescript,
}

impl From<Lang> for Language {
    fn from(l: Lang) -> Self {
        match l {
            Lang::Go => Language::Go,
            Lang::Rust => Language::Rust,
            Lang::Typescript => Language::TypeScript,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqlc_query_consts={}", level)));

    // A subscriber may already be installed when `run` is called more than once.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn print_report(result: &CheckResult, format: ReportFormat) {
    match output::format_check_result(result, format) {
        Ok(text) => print!("{}", text),
        Err(e) => println!("{}", failure_message(&e)),
    }
}

/// @ai:intent Build the single line printed when a run fails
/// @ai:effects pure
fn failure_message(err: &Error) -> String {
    format!("{}: {}", err.stage().message(), err)
}

/// @ai:intent Parse arguments, run the generator and return the process exit code
/// @ai:post 0 on success or help/version, 1 on any argument, config or pipeline failure
/// @ai:post argument errors return before any file is read or written
/// @ai:effects fs:read, fs:write, stdout
fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            if let Err(io_err) = e.print() {
                eprintln!("Error: {}", io_err);
            }
            return code;
        }
    };

    init_logging(cli.verbose);
    let report_format: ReportFormat = cli.report.into();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let file_config = match ToolConfig::discover(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", failure_message(&e));
            return 1;
        }
    };

    let overrides = CliOverrides {
        package: cli.package,
        prefix: cli.prefix,
        language: cli.lang.map(Language::from),
        strict: cli.strict,
    };

    let options = GenerateOptions {
        render: file_config.resolve(&overrides, &cli.output),
        strict: file_config.strict(&overrides),
        input: cli.input,
        output: cli.output,
    };

    match generate(&options) {
        Ok(report) => {
            if !report.check.is_clean() || report_format == ReportFormat::Json {
                print_report(&report.check, report_format);
            }

            if cli.verbose {
                print!("{}", output::format_query_list(&report.queries));
            }

            println!(
                "Constants generated successfully in {}",
                report.output.display()
            );
            0
        }
        Err(e) => {
            if let Error::Check { report } = &e {
                print_report(report, report_format);
            }
            println!("{}", failure_message(&e));
            1
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(run(std::env::args_os()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn argv(pairs: &[(&str, PathBuf)]) -> Vec<OsString> {
        let mut list = vec![OsString::from("sqlc-query-consts")];
        for (flag, value) in pairs {
            list.push(OsString::from(*flag));
            list.push(value.clone().into_os_string());
        }
        list
    }

    #[test]
    fn test_missing_input_fails_before_io() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("querynames.go");

        assert_eq!(run(argv(&[("-o", out.clone())])), 1);
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_is_a_parse_error() {
        let err = Cli::try_parse_from(["sqlc-query-consts", "-o", "out.go"])
            .err()
            .unwrap();
        assert!(err.use_stderr());
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_help_is_success() {
        assert_eq!(run(["sqlc-query-consts", "--help"]), 0);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sqlc-query-consts", "-i", "q.sql", "-o", "q.go"]).unwrap();
        assert_eq!(cli.package, None);
        assert_eq!(cli.prefix, None);
        assert!(!cli.strict);

        let cli = Cli::try_parse_from([
            "sqlc-query-consts", "-i", "q.sql", "-o", "q.go", "-p", "db", "-c", "q", "-l", "ts",
        ])
        .unwrap();
        assert_eq!(cli.package.as_deref(), Some("db"));
        assert_eq!(cli.prefix.as_deref(), Some("q"));
        assert_eq!(cli.lang.map(Language::from), Some(Language::TypeScript));
    }

    #[test]
    fn test_run_generates_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("query.sql"), "-- name: GetUser :one\n").unwrap();

        let args = argv(&[
            ("-i", dir.path().join("query.sql")),
            ("-o", dir.path().join("querynames.go")),
            ("-c", PathBuf::from("q")),
        ]);

        assert_eq!(run(args), 0);
        let code = fs::read_to_string(dir.path().join("querynames.go")).unwrap();
        assert!(code.contains("    QGetUser = \"GetUser\"\n"));
    }

    #[test]
    fn test_run_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("querynames.go");

        let args = argv(&[("-i", dir.path().join("missing.sql")), ("-o", out.clone())]);

        assert_eq!(run(args), 1);
        assert!(!out.exists());
    }

    #[test]
    fn test_failure_message_prefix() {
        let err = Error::FileRead {
            path: PathBuf::from("db/queries.sql"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(failure_message(&err).starts_with("Error reading file: failed to read db/queries.sql"));
    }
}

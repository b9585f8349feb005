//! @ai:module:intent Define error types for query name extraction and code generation
//! @ai:module:layer domain
//! @ai:module:public_api Error, ErrorStage, Result
//! @ai:module:stateless true

use crate::checker::CheckResult;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all generator operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan {file} at line {line}: {source}")]
    Scan {
        file: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{} issue(s) found in query names", .report.problem_count())]
    Check { report: Box<CheckResult> },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// @ai:intent Pipeline stage an error belongs to, used to prefix CLI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Read,
    Parse,
    Write,
    Config,
    Report,
}

impl Error {
    /// @ai:intent Classify the error by the pipeline stage that produced it
    /// @ai:effects pure
    pub fn stage(&self) -> ErrorStage {
        match self {
            Error::FileRead { .. } => ErrorStage::Read,
            Error::Scan { .. } | Error::Check { .. } => ErrorStage::Parse,
            Error::FileWrite { .. } => ErrorStage::Write,
            Error::Json(_) => ErrorStage::Report,
            Error::ConfigRead { .. } | Error::Config { .. } => ErrorStage::Config,
        }
    }
}

impl ErrorStage {
    /// @ai:intent Human readable prefix for a failed stage
    pub fn message(&self) -> &'static str {
        match self {
            ErrorStage::Read => "Error reading file",
            ErrorStage::Parse => "Error parsing query names",
            ErrorStage::Write => "Error writing code to file",
            ErrorStage::Config => "Error loading config",
            ErrorStage::Report => "Error formatting report",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_stage_classification() {
        let read = Error::FileRead {
            path: PathBuf::from("queries.sql"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(read.stage(), ErrorStage::Read);
        assert_eq!(read.stage().message(), "Error reading file");

        let write = Error::FileWrite {
            path: PathBuf::from("out.go"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(write.stage(), ErrorStage::Write);

        let check = Error::Check {
            report: Box::new(CheckResult {
                warnings: 2,
                ..Default::default()
            }),
        };
        assert_eq!(check.stage(), ErrorStage::Parse);
        assert_eq!(check.to_string(), "2 issue(s) found in query names");
    }

    #[test]
    fn test_json_error_is_not_a_write_error() {
        let json = Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(json.stage(), ErrorStage::Report);
        assert_eq!(json.stage().message(), "Error formatting report");
    }

    #[test]
    fn test_display_includes_path() {
        let err = Error::FileRead {
            path: PathBuf::from("db/queries.sql"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("db/queries.sql"));
    }
}

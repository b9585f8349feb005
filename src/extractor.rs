//! @ai:module:intent Load query files and extract `-- name:` annotations from them
//! @ai:module:layer application
//! @ai:module:public_api load_source, match_query_name, scan_annotations, parse_query_names, extract_annotations, extract_file, extract_path
//! @ai:module:depends_on annotation, error
//! @ai:module:stateless true

use crate::annotation::{Location, ParsedQueryFile, QueryAnnotation};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whitespace is `[\t\n\f\r ]` (no vertical tab), `\w` is ASCII. Unanchored, first match only.
static QUERY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)--[\t\n\f\r ]*name:[\t\n\f\r ]*(\w+)").expect("Invalid regex")
});

/// @ai:intent Read a query file fully into memory
/// @ai:pre path exists and is readable
/// @ai:post bytes that are not valid UTF-8 become U+FFFD; ASCII annotations are unaffected
/// @ai:effects fs:read
pub fn load_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// @ai:intent Return the query name annotated on a single line, if any
/// @ai:example ("-- name: GetUser :one") -> Some("GetUser")
/// @ai:example ("--name:ListUsers") -> Some("ListUsers")
/// @ai:example ("-- name:") -> None
/// @ai:example ("SELECT 1;") -> None
/// @ai:effects pure
pub fn match_query_name(line: &str) -> Option<&str> {
    QUERY_NAME_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// @ai:intent Scan a line reader and collect every query name annotation in order
/// @ai:post one entry per matching line, duplicates kept, line numbers are 1-based
/// @ai:effects io:read
pub fn scan_annotations<R: BufRead>(reader: R, file: &Path) -> Result<Vec<QueryAnnotation>> {
    let mut annotations = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_number = line_idx + 1;
        let line = line.map_err(|e| Error::Scan {
            file: file.to_path_buf(),
            line: line_number,
            source: e,
        })?;

        if let Some(name) = match_query_name(&line) {
            annotations.push(QueryAnnotation::new(
                name,
                Location::new(file.to_path_buf(), line_number),
            ));
        }
    }

    Ok(annotations)
}

/// @ai:intent Extract annotations from in-memory query text
/// @ai:effects pure
pub fn extract_annotations(content: &str, file: &Path) -> Result<Vec<QueryAnnotation>> {
    scan_annotations(Cursor::new(content), file)
}

/// @ai:intent Extract the ordered list of query names from in-memory query text
/// @ai:post result.len() equals the number of annotated lines
/// @ai:effects pure
pub fn parse_query_names(content: &str) -> Result<Vec<String>> {
    let annotations = extract_annotations(content, Path::new(""))?;
    Ok(annotations.into_iter().map(|a| a.name).collect())
}

/// @ai:intent Load a single query file and extract its annotations
/// @ai:effects fs:read
pub fn extract_file(path: &Path) -> Result<ParsedQueryFile> {
    let content = load_source(path)?;
    let queries = extract_annotations(&content, path)?;

    tracing::debug!("Scanned {}: {} query name(s)", path.display(), queries.len());

    Ok(ParsedQueryFile {
        path: path.to_path_buf(),
        queries,
    })
}

/// @ai:intent Extract annotations from a file, or from every `.sql` file under a directory
/// @ai:post directory entries are visited sorted by file name
/// @ai:effects fs:read
pub fn extract_path(path: &Path) -> Result<Vec<ParsedQueryFile>> {
    if !path.is_dir() {
        return Ok(vec![extract_file(path)?]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(path, e))?;
        if entry.file_type().is_file() && is_query_file(entry.path()) {
            files.push(extract_file(entry.path())?);
        }
    }

    if files.is_empty() {
        tracing::warn!("No .sql files found under {}", path.display());
    }

    Ok(files)
}

/// @ai:intent Check if a path looks like an sqlc query file
/// @ai:effects pure
pub fn is_query_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("sql"))
        .unwrap_or(false)
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(root));
    Error::FileRead {
        path,
        source: err.into(),
    }
}

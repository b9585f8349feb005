//! @ai:module:intent Define data structures for extracted query name annotations
//! @ai:module:layer domain
//! @ai:module:public_api QueryAnnotation, Location, ParsedQueryFile, collect_annotations
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Represents a source code location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    /// @ai:intent Create a new Location
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

/// @ai:intent A single `-- name:` annotation found in a query file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryAnnotation {
    pub name: String,
    pub location: Location,
}

impl QueryAnnotation {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// @ai:intent Complete extraction result for one query file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParsedQueryFile {
    pub path: PathBuf,
    pub queries: Vec<QueryAnnotation>,
}

impl ParsedQueryFile {
    /// @ai:intent Query names in file order, duplicates included
    /// @ai:effects pure
    pub fn names(&self) -> Vec<String> {
        self.queries.iter().map(|q| q.name.clone()).collect()
    }
}

/// @ai:intent Flatten several parsed files into one ordered annotation list
/// @ai:post result order is file order, then line order within each file
/// @ai:effects pure
pub fn collect_annotations(files: &[ParsedQueryFile]) -> Vec<QueryAnnotation> {
    files
        .iter()
        .flat_map(|f| f.queries.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(path: &str, names: &[&str]) -> ParsedQueryFile {
        ParsedQueryFile {
            path: PathBuf::from(path),
            queries: names
                .iter()
                .enumerate()
                .map(|(i, n)| QueryAnnotation::new(*n, Location::new(PathBuf::from(path), i + 1)))
                .collect(),
        }
    }

    #[test]
    fn test_names_keep_duplicates() {
        let file = parsed("a.sql", &["GetUser", "GetUser", "ListUsers"]);
        assert_eq!(file.names(), vec!["GetUser", "GetUser", "ListUsers"]);
    }

    #[test]
    fn test_collect_annotations_preserves_file_order() {
        let files = vec![parsed("a.sql", &["B", "A"]), parsed("b.sql", &["C"])];
        let all = collect_annotations(&files);
        let names: Vec<&str> = all.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(all[2].location.file, PathBuf::from("b.sql"));
    }
}

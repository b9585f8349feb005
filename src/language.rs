//! @ai:module:intent Define the target languages constants can be generated for
//! @ai:module:layer domain
//! @ai:module:public_api Language, detect_language
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// @ai:intent Represents a supported output language with its declaration syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Rust,
    #[serde(alias = "ts")]
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Go, Language::Rust, Language::TypeScript];

    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::TypeScript => &["ts", "mts", "cts"],
        }
    }

    /// @ai:intent Get language name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
        }
    }

    /// @ai:intent Quote a value as a string literal in this language
    /// @ai:effects pure
    pub fn string_literal(&self, value: &str) -> String {
        // Go, Rust and TypeScript share double-quoted literals with backslash escapes.
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// @ai:intent Detect the target language from an output file path
/// @ai:post result is Some if extension is recognized
/// @ai:example ("querynames.go") -> Some(Go)
/// @ai:example ("queries.rs") -> Some(Rust)
/// @ai:example ("queries.txt") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;

    Language::ALL
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}

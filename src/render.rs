//! @ai:module:intent Render query names as constant definitions and write them to disk
//! @ai:module:layer infrastructure
//! @ai:module:public_api RenderConfig, render_constants, constant_name, write_output
//! @ai:module:depends_on language, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_NAMESPACE: &str = "main";
pub const DEFAULT_PREFIX: &str = "SQL";

const HEADER_COMMENT: &str = "// Query names as constants";

/// @ai:intent Options controlling the generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub namespace: String,
    pub prefix: String,
    pub language: Language,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            language: Language::Go,
        }
    }
}

impl RenderConfig {
    pub fn new(namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// @ai:intent Build the constant identifier for a query name
/// @ai:example ("sql", "GetUser") -> "SQLGetUser"
/// @ai:effects pure
pub fn constant_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix.to_uppercase(), name)
}

/// @ai:intent Render the full source file defining one constant per query name
/// @ai:post one definition line per input name, in input order, duplicates kept
/// @ai:post config is not modified; the prefix is uppercased locally
/// @ai:effects pure
pub fn render_constants(names: &[String], config: &RenderConfig) -> String {
    let prefix = config.prefix.to_uppercase();
    let lang = config.language;
    let mut output = String::new();

    match lang {
        Language::Go => {
            output.push_str(&format!("package {}\n\n", config.namespace));
            output.push_str(HEADER_COMMENT);
            output.push_str("\nconst (\n");
        }
        Language::Rust => {
            output.push_str(&format!("pub mod {} {{\n", config.namespace));
            output.push_str(&format!("    {}\n", HEADER_COMMENT));
        }
        Language::TypeScript => {
            output.push_str(&format!("export namespace {} {{\n", config.namespace));
            output.push_str(&format!("    {}\n", HEADER_COMMENT));
        }
    }

    for name in names {
        let ident = format!("{}{}", prefix, name);
        let value = lang.string_literal(name);
        let line = match lang {
            Language::Go => format!("    {} = {}\n", ident, value),
            Language::Rust => format!("    pub const {}: &str = {};\n", ident, value),
            Language::TypeScript => format!("    export const {} = {};\n", ident, value),
        };
        output.push_str(&line);
    }

    match lang {
        Language::Go => output.push_str(")\n"),
        Language::Rust | Language::TypeScript => output.push_str("}\n"),
    }

    output
}

/// @ai:intent Write generated code to a file, replacing any previous content
/// @ai:post on unix a newly created file has mode 0644
/// @ai:effects fs:write
pub fn write_output(path: &Path, code: &str) -> Result<()> {
    let to_write_error = |e: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path).map_err(to_write_error)?;
    file.write_all(code.as_bytes()).map_err(to_write_error)?;

    tracing::debug!("Wrote {} bytes to {}", code.len(), path.display());
    Ok(())
}

//! Error types for symbol loading and interface matching.
//!
//! Every failure the matcher can report names the declaration it concerns,
//! using the declaration's qualified name rather than a file position, so a
//! presentation layer can attach the message wherever that symbol is shown.
//!
//! Errors are grouped by category and carry a stable code:
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Signature syntax errors
//! - E020-E029: Configuration and input format errors
//! - E030-E039: Matching errors (composition, duplicates, resolution)
//!
//! # Example
//!
//! ```rust
//! use implens::errors::{Error, ErrorCode};
//!
//! let err = Error::duplicate("Writer");
//! assert_eq!(err.code(), ErrorCode::DUPLICATE_DECLARATION);
//! assert_eq!(err.to_string(), "duplicate declaration of `Writer`");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");

    /// Syntax error in a signature or type descriptor
    pub const SYNTAX: ErrorCode = ErrorCode("E010");

    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Symbol table could not be decoded
    pub const INPUT_FORMAT: ErrorCode = ErrorCode("E021");

    /// Interface composition cycle
    pub const CYCLIC_COMPOSITION: ErrorCode = ErrorCode("E030");
    /// Two declarations share a qualified name
    pub const DUPLICATE_DECLARATION: ErrorCode = ErrorCode("E031");
    /// A referenced type could not be resolved
    pub const UNRESOLVED_TYPE: ErrorCode = ErrorCode("E032");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for implens operations
#[derive(Debug, Error)]
pub enum Error {
    /// Interface embedding does not terminate.
    ///
    /// `cycle` lists the interfaces on the cycle in embedding order, with the
    /// first interface repeated at the end.
    #[error("cyclic interface composition: {}", .cycle.join(" -> "))]
    CyclicComposition { interface: String, cycle: Vec<String> },

    /// Two declarations claim the same qualified name
    #[error("duplicate declaration of `{name}`")]
    DuplicateDeclaration { name: String },

    /// A type referenced by a declaration is not known to the program
    #[error("unresolved type `{type_name}` referenced by `{declaration}`")]
    UnresolvedType {
        type_name: String,
        declaration: String,
    },

    /// Signature or type text that does not parse
    #[error("syntax error in `{input}` at offset {offset}: {message}")]
    Syntax {
        input: String,
        offset: usize,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system related errors
    #[error("failed to read {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Symbol table with an extension we do not know how to decode
    #[error("unsupported symbol table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a duplicate declaration error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateDeclaration { name: name.into() }
    }

    /// Create an unresolved type error
    pub fn unresolved(type_name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self::UnresolvedType {
            type_name: type_name.into(),
            declaration: declaration.into(),
        }
    }

    /// Create a syntax error at a byte offset of `input`
    pub fn syntax(input: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            input: input.into(),
            offset,
            message: message.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::CyclicComposition { .. } => ErrorCode::CYCLIC_COMPOSITION,
            Self::DuplicateDeclaration { .. } => ErrorCode::DUPLICATE_DECLARATION,
            Self::UnresolvedType { .. } => ErrorCode::UNRESOLVED_TYPE,
            Self::Syntax { .. } => ErrorCode::SYNTAX,
            Self::Configuration(_) => ErrorCode::CONFIG_INVALID,
            Self::FileSystem { .. } => ErrorCode::IO_GENERIC,
            Self::UnsupportedFormat(_) | Self::Json(_) | Self::Toml(_) | Self::Yaml(_) => {
                ErrorCode::INPUT_FORMAT
            }
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

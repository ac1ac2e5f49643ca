//! Error types for the splitter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while splitting a source file.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The source file is missing or unreadable.
    #[error("failed to read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The parser could not recover from malformed input.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// No type aliases, enums or interfaces at the top level.
    #[error("No types, enums, or interfaces found.")]
    NoDeclarations,

    /// The output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A declaration file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    /// True for failures that happen on the output side, after parsing succeeded.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::CreateDir { .. } | Self::WriteFile { .. })
    }
}

//! Oxc-backed TypeScript parser wrapper.
//!
//! Owns the arena allocator so the returned program stays valid while the
//! classifier walks its top-level statements.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::classify::classify_program;
use crate::declaration::Declarations;
use crate::error::SplitError;

/// Thin wrapper owning the Oxc allocator and the source type to parse as.
pub struct TsParser {
    allocator: Allocator,
    source_type: SourceType,
}

impl Default for TsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TsParser {
    /// Parser for plain `.ts` modules.
    pub fn new() -> Self {
        Self {
            allocator: Allocator::default(),
            source_type: SourceType::ts(),
        }
    }

    /// Parser whose source type is inferred from `path` (`.tsx`, `.d.ts`, `.mts`, ...).
    pub fn for_path(path: &Path) -> Self {
        Self {
            allocator: Allocator::default(),
            source_type: source_type_for(path),
        }
    }

    /// Parse with default options; returns Oxc's AST plus accumulated errors.
    pub fn parse<'a>(&'a self, source: &'a str) -> ParserReturn<'a> {
        Parser::new(&self.allocator, source, self.source_type).parse()
    }
}

/// Infer the source type from a file name, defaulting to TypeScript.
pub fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts())
}

/// Declarations found in one source file plus any recoverable diagnostics.
#[derive(Debug, Default)]
pub struct ParsedSource {
    pub declarations: Declarations,
    pub diagnostics: Vec<String>,
}

/// Parse `source` and collect its top-level type aliases, enums and interfaces.
///
/// Recoverable syntax errors are returned as diagnostics alongside whatever the
/// parser managed to produce; an unrecoverable parse is an error.
pub fn parse_declarations(source: &str, path: &Path) -> Result<ParsedSource, SplitError> {
    let parser = TsParser::for_path(path);
    let ret = parser.parse(source);

    let diagnostics: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();

    if ret.panicked {
        return Err(SplitError::Parse {
            path: path.to_path_buf(),
            message: diagnostics.join("; "),
        });
    }

    Ok(ParsedSource {
        declarations: classify_program(&ret.program, source),
        diagnostics,
    })
}

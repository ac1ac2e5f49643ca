//! Drive the full split: read, parse, render and write one file per declaration.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::codegen::render_declaration;
use crate::declaration::{Declaration, Declarations};
use crate::deps::MatchMode;
use crate::error::SplitError;
use crate::observer::SplitObserver;
use crate::parser::parse_declarations;

/// Knobs for a split run.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Recorded for the caller. Files are always overwritten by the core.
    pub overwrite: bool,
    pub match_mode: MatchMode,
    /// Output extension without the dot. Derived from the input when `None`.
    pub extension: Option<String>,
}

impl SplitOptions {
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Extension used for files split out of `input`. An override that is
    /// empty once its leading dots are removed falls back to the input's.
    pub fn extension_for(&self, input: &Path) -> String {
        match self.extension.as_deref().map(|ext| ext.trim_start_matches('.')) {
            Some(ext) if !ext.is_empty() => ext.to_string(),
            _ => output_extension(input).to_string(),
        }
    }
}

/// Outcome of a split: how many declarations were found and where each went.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    pub count: usize,
    pub types: IndexMap<String, PathBuf>,
}

/// A file the driver is about to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile<'a> {
    pub declaration: &'a Declaration,
    pub path: PathBuf,
    pub contents: String,
    pub imports: usize,
}

/// Split the declarations of `filename` into `output_dir`.
///
/// Without an output directory this is a dry run: the source is parsed and
/// counted but nothing touches the filesystem.
pub fn process_types(
    filename: &Path,
    output_dir: Option<&Path>,
    options: &SplitOptions,
    observer: &dyn SplitObserver,
) -> Result<SplitResult, SplitError> {
    let decls = load_declarations(filename, observer)?;
    write_declarations(&decls, filename, output_dir, options, observer)
}

/// Same as [`process_types`] for source text already in memory. `filename` is
/// used for source-type inference, the output extension and error messages.
pub fn process_source(
    source: &str,
    filename: &Path,
    output_dir: Option<&Path>,
    options: &SplitOptions,
    observer: &dyn SplitObserver,
) -> Result<SplitResult, SplitError> {
    let decls = declarations_from_source(source, filename, observer)?;
    write_declarations(&decls, filename, output_dir, options, observer)
}

/// Read and classify `filename` without writing anything.
pub fn load_declarations(
    filename: &Path,
    observer: &dyn SplitObserver,
) -> Result<Declarations, SplitError> {
    let source = fs::read_to_string(filename).map_err(|source| SplitError::InputRead {
        path: filename.to_path_buf(),
        source,
    })?;
    declarations_from_source(&source, filename, observer)
}

/// Parse `source`, forward recoverable diagnostics to `observer` and fail
/// with [`SplitError::NoDeclarations`] when nothing splittable is found.
pub fn declarations_from_source(
    source: &str,
    filename: &Path,
    observer: &dyn SplitObserver,
) -> Result<Declarations, SplitError> {
    let parsed = parse_declarations(source, filename)?;
    for diagnostic in &parsed.diagnostics {
        observer.parse_diagnostic(filename, diagnostic);
    }

    let decls = parsed.declarations;
    if decls.is_empty() {
        return Err(SplitError::NoDeclarations);
    }
    observer.declarations_found(decls.len());
    Ok(decls)
}

fn write_declarations(
    decls: &Declarations,
    filename: &Path,
    output_dir: Option<&Path>,
    options: &SplitOptions,
    observer: &dyn SplitObserver,
) -> Result<SplitResult, SplitError> {
    let mut result = SplitResult {
        count: decls.len(),
        types: IndexMap::new(),
    };

    let Some(dir) = output_dir else {
        return Ok(result);
    };

    let created = !dir.exists();
    fs::create_dir_all(dir).map_err(|source| SplitError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    observer.directory_ready(dir, created);

    let extension = options.extension_for(filename);
    for file in plan_files(decls, dir, &extension, options.match_mode) {
        fs::write(&file.path, &file.contents).map_err(|source| SplitError::WriteFile {
            path: file.path.clone(),
            source,
        })?;
        observer.file_written(file.declaration, &file.path, file.imports);
        result.types.insert(file.declaration.name.clone(), file.path);
    }

    Ok(result)
}

/// Render every declaration into the file it will be written to, in write
/// order: enums, then type aliases, then interfaces.
pub fn plan_files<'a>(
    decls: &'a Declarations,
    dir: &Path,
    extension: &str,
    mode: MatchMode,
) -> Vec<PlannedFile<'a>> {
    decls
        .iter()
        .map(|decl| {
            let rendered = render_declaration(decl, decls, mode);
            PlannedFile {
                declaration: decl,
                path: dir.join(format!("{}.{extension}", decl.name)),
                contents: rendered.contents,
                imports: rendered.imports,
            }
        })
        .collect()
}

/// Output extension matching the input's module flavour.
pub fn output_extension(input: &Path) -> &'static str {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("mts") => "mts",
        Some("cts") => "cts",
        _ => "ts",
    }
}

//! Progress hooks for the splitting pipeline.
//!
//! The core never prints. Callers that want progress output pass an observer;
//! `()` is the silent one.

use std::path::Path;

use crate::declaration::Declaration;

/// Receives pipeline events. Every hook defaults to doing nothing.
pub trait SplitObserver {
    /// A recoverable parser diagnostic.
    fn parse_diagnostic(&self, _path: &Path, _message: &str) {}

    /// Parsing finished with `count` declarations.
    fn declarations_found(&self, _count: usize) {}

    /// The output directory exists; `created` is true if this run made it.
    fn directory_ready(&self, _dir: &Path, _created: bool) {}

    /// A declaration file was written.
    fn file_written(&self, _decl: &Declaration, _path: &Path, _imports: usize) {}
}

impl SplitObserver for () {}

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SplitObserver for TracingObserver {
    fn parse_diagnostic(&self, path: &Path, message: &str) {
        tracing::warn!(path = %path.display(), "{message}");
    }

    fn declarations_found(&self, count: usize) {
        tracing::debug!(count, "declarations found");
    }

    fn directory_ready(&self, dir: &Path, created: bool) {
        if created {
            tracing::info!(dir = %dir.display(), "created output directory");
        } else {
            tracing::debug!(dir = %dir.display(), "output directory exists");
        }
    }

    fn file_written(&self, decl: &Declaration, path: &Path, imports: usize) {
        tracing::debug!(
            name = %decl.name,
            kind = %decl.kind,
            imports,
            path = %path.display(),
            "wrote declaration"
        );
    }
}

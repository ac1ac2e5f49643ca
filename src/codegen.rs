//! Render the contents of one emitted declaration file.

use std::borrow::Cow;

use crate::declaration::{Declaration, DeclarationKind, Declarations};
use crate::deps::{find_dependencies, MatchMode};

const EXPORT_MARKER: &str = "export ";

/// Prefix `raw` with `export ` unless the declaration already carries it.
pub fn ensure_exported(raw: &str, is_exported: bool) -> Cow<'_, str> {
    if is_exported {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("{EXPORT_MARKER}{raw}"))
    }
}

/// One named import per dependency, from a sibling module of the same name.
pub fn import_block<S: AsRef<str>>(dependencies: &[S]) -> String {
    let mut out = String::new();
    for dep in dependencies {
        let dep = dep.as_ref();
        out.push_str(&format!("import {{ {dep} }} from './{dep}';\n"));
    }
    out
}

/// Contents of one emitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub contents: String,
    /// Number of import lines at the top of `contents`.
    pub imports: usize,
}

/// Full file contents for `decl`: its import block followed by the exported body.
///
/// Enums are leaves and never get imports.
pub fn render_declaration(decl: &Declaration, all: &Declarations, mode: MatchMode) -> RenderedFile {
    let body = ensure_exported(&decl.raw_text, decl.is_exported);
    match decl.kind {
        DeclarationKind::Enum => RenderedFile {
            contents: body.into_owned(),
            imports: 0,
        },
        DeclarationKind::TypeAlias | DeclarationKind::Interface => {
            let deps = find_dependencies(decl, all, mode);
            let mut contents = import_block(&deps);
            contents.push_str(&body);
            RenderedFile {
                contents,
                imports: deps.len(),
            }
        }
    }
}

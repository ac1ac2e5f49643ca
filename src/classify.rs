//! Classify top-level Oxc statements into [`Declaration`]s.
//!
//! Purely structural: we look at statement shape and modifiers only, never at
//! what the declared types resolve to.

use oxc_ast::ast as oxc;
use oxc_span::Span;

use crate::declaration::{Declaration, DeclarationKind, Declarations};

/// Walk the program body and collect every top-level alias, enum and interface.
pub fn classify_program(program: &oxc::Program<'_>, source: &str) -> Declarations {
    program
        .body
        .iter()
        .filter_map(|stmt| classify_statement(stmt, source))
        .collect()
}

/// Classify a single statement. Anything other than a type alias, enum or
/// interface (optionally behind `export` / `export default`) yields `None`.
pub fn classify_statement(stmt: &oxc::Statement<'_>, source: &str) -> Option<Declaration> {
    match stmt {
        oxc::Statement::TSTypeAliasDeclaration(alias) => Some(make(
            DeclarationKind::TypeAlias,
            alias.id.name.to_string(),
            alias.span,
            false,
            source,
        )),
        oxc::Statement::TSEnumDeclaration(en) => Some(make(
            DeclarationKind::Enum,
            en.id.name.to_string(),
            en.span,
            false,
            source,
        )),
        oxc::Statement::TSInterfaceDeclaration(iface) => Some(make(
            DeclarationKind::Interface,
            iface.id.name.to_string(),
            iface.span,
            false,
            source,
        )),
        // The export statement's span starts at the `export` keyword, so the
        // raw text keeps the marker.
        oxc::Statement::ExportNamedDeclaration(export) => {
            let (kind, name) = match export.declaration.as_ref()? {
                oxc::Declaration::TSTypeAliasDeclaration(alias) => {
                    (DeclarationKind::TypeAlias, alias.id.name.to_string())
                }
                oxc::Declaration::TSEnumDeclaration(en) => {
                    (DeclarationKind::Enum, en.id.name.to_string())
                }
                oxc::Declaration::TSInterfaceDeclaration(iface) => {
                    (DeclarationKind::Interface, iface.id.name.to_string())
                }
                _ => return None,
            };
            Some(make(kind, name, export.span, true, source))
        }
        oxc::Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            oxc::ExportDefaultDeclarationKind::TSInterfaceDeclaration(iface) => Some(make(
                DeclarationKind::Interface,
                iface.id.name.to_string(),
                export.span,
                true,
                source,
            )),
            _ => None,
        },
        _ => None,
    }
}

fn make(
    kind: DeclarationKind,
    name: String,
    span: Span,
    is_exported: bool,
    source: &str,
) -> Declaration {
    let range = span.start as usize..span.end as usize;
    Declaration {
        name,
        kind,
        raw_text: source[range.clone()].to_string(),
        is_exported,
        span: range,
    }
}

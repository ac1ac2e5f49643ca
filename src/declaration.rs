//! Top-level declarations discovered in a source file.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// The three declaration shapes the splitter moves into their own files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    TypeAlias,
    Enum,
    Interface,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::TypeAlias => "type",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single top-level type alias, enum or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Verbatim source text, modifiers included.
    pub raw_text: String,
    pub is_exported: bool,
    /// Byte range of `raw_text` within the source.
    pub span: Range<usize>,
}

/// Declarations grouped by kind, each list in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub aliases: Vec<Declaration>,
    pub enums: Vec<Declaration>,
    pub interfaces: Vec<Declaration>,
}

impl Declarations {
    pub fn push(&mut self, decl: Declaration) {
        match decl.kind {
            DeclarationKind::TypeAlias => self.aliases.push(decl),
            DeclarationKind::Enum => self.enums.push(decl),
            DeclarationKind::Interface => self.interfaces.push(decl),
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len() + self.enums.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All declarations in emission order: enums, then aliases, then interfaces.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.enums
            .iter()
            .chain(self.aliases.iter())
            .chain(self.interfaces.iter())
    }

    /// All declarations in dependency lookup order: aliases, enums, interfaces.
    pub fn lookup_order(&self) -> impl Iterator<Item = &Declaration> {
        self.aliases
            .iter()
            .chain(self.enums.iter())
            .chain(self.interfaces.iter())
    }
}

impl FromIterator<Declaration> for Declarations {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut decls = Declarations::default();
        for decl in iter {
            decls.push(decl);
        }
        decls
    }
}

//! Split a TypeScript file's top-level type aliases, enums and interfaces into
//! one module per declaration.
//!
//! Each emitted file gets an `export` marker and a named import for every
//! other declaration its text references, so the files stay independently
//! valid:
//!
//! ```no_run
//! use std::path::Path;
//! use typesplit::{process_types, SplitOptions, TracingObserver};
//!
//! let result = process_types(
//!     Path::new("types.ts"),
//!     Some(Path::new("src/types")),
//!     &SplitOptions::default(),
//!     &TracingObserver,
//! )?;
//! println!("split {} declarations", result.count);
//! # Ok::<(), typesplit::SplitError>(())
//! ```

pub mod classify;
pub mod codegen;
pub mod config;
pub mod conflicts;
pub mod declaration;
pub mod deps;
pub mod emit;
pub mod error;
pub mod observer;
pub mod parser;

pub use codegen::{ensure_exported, import_block, render_declaration, RenderedFile};
pub use config::SplitConfig;
pub use conflicts::existing_outputs;
pub use declaration::{Declaration, DeclarationKind, Declarations};
pub use deps::{find_dependencies, MatchMode};
pub use emit::{
    declarations_from_source, load_declarations, output_extension, process_source, process_types,
    SplitOptions, SplitResult,
};
pub use error::SplitError;
pub use observer::{SplitObserver, TracingObserver};
pub use parser::{parse_declarations, ParsedSource, TsParser};

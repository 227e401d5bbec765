//! Tree printing for the Groovy formatter
//!
//!     This crate turns a Groovy concrete syntax tree into a layout-neutral document (the
//!     [`Doc`] IR) and renders that document to text. Width-aware line breaking is done by
//!     the `pretty` crate; this crate only decides what each node looks like.
//!
//!     It is a pure lib: nothing here reads files, environment variables or prints. The
//!     `groovy-fmt` binary is the shell around it.
//!
//! Architecture
//!
//!     - doc.rs        the Doc IR and its builders
//!     - printer.rs    CST node → Doc, one rule per node kind
//!     - render.rs     Doc → text through `pretty`, with FormatOptions
//!     - format.rs     Format trait: the host registration surface (name, extensions,
//!                     parse, print)
//!     - registry.rs   FormatRegistry: lookup by name or by file extension
//!     - formats/      Format implementations (groovy)
//!
//! Coverage
//!
//!     The printer knows a handful of node kinds: compilation units, statement lists,
//!     command expressions, argument lists, identifiers, literals and the single-child
//!     wrappers between them. Every other node kind prints as an empty document, so
//!     formatting always completes and unsupported code is dropped from the output.

pub mod doc;
pub mod error;
pub mod format;
pub mod formats;
pub mod printer;
pub mod registry;
pub mod render;

pub use doc::Doc;
pub use error::FormatError;
pub use format::Format;
pub use formats::groovy::GroovyFormat;
pub use printer::{print, print_with};
pub use registry::FormatRegistry;
pub use render::{render, FormatOptions};

//! Debug output formats
//!
//!     Views of the lexer and parser output used by the `tokens` and `cst` stages of the
//!     command line: a one-line-per-node tree rendering and JSON.

pub mod json;
pub mod treeviz;

pub use json::{node_to_json, tokens_to_json};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params};

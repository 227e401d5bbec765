//! # groovy-parser
//!
//! Front end of the Groovy formatter: character classification, the disambiguation
//! predicates consulted while lexing and parsing, and the concrete syntax tree.
//!
//! Layout
//!
//!     src/groovy
//!       ├── character    identifier character classes
//!       ├── stream       character and token lookahead
//!       ├── predicates   context-sensitive decisions for the recognizer
//!       ├── token        token kinds and their categories
//!       ├── lexing       logos tokenizer
//!       ├── cst          concrete syntax tree
//!       ├── parsing      recursive descent recognizer
//!       ├── error        syntax errors
//!       └── formats      debug views of tokens and trees
//!
//! The recognizer only covers the part of the language the printer knows about. Inputs
//! outside it are reported as syntax errors rather than guessed at.

pub mod groovy;

//! Main module for groovy-parser functionality

pub mod character;
pub mod cst;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod predicates;
pub mod stream;
pub mod testing;
pub mod token;

pub use cst::{Element, Node, NodeKind, PathTrailer};
pub use error::SyntaxError;
pub use lexing::tokenize;
pub use parsing::{parse, parse_tokens};
pub use token::{Token, TokenKind};

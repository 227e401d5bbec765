//! Error types for formatting

use groovy_parser::groovy::SyntaxError;
use std::fmt;

#[derive(Debug)]
pub enum FormatError {
    /// The source did not parse
    Syntax(SyntaxError),
    /// No format registered under this name
    FormatNotFound(String),
    /// No format claims this file extension
    UnsupportedExtension(String),
    /// The document could not be rendered
    Render(String),
    Io(std::io::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Syntax(err) => write!(f, "{err}"),
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::UnsupportedExtension(ext) => {
                write!(f, "No format handles '.{ext}' files")
            }
            FormatError::Render(msg) => write!(f, "Render error: {msg}"),
            FormatError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Syntax(err) => Some(err),
            FormatError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SyntaxError> for FormatError {
    fn from(err: SyntaxError) -> Self {
        FormatError::Syntax(err)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err)
    }
}

//! Token kinds and tokens
//!
//!     The lexer produces `Token`s tagged with a `TokenKind`. The set of kinds is closed;
//!     predicates and the parser only ever ask category questions (`is_modifier`,
//!     `is_primitive_type`, ...) so nothing downstream depends on how the lexer happens to
//!     number or spell its tokens.
//!
//!     Keywords are not separate lexer rules: identifiers are scanned first and then
//!     classified with [`TokenKind::from_word`].

use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Names
    Identifier,
    CapitalizedIdentifier,

    // Literals
    IntegerLiteral,
    FloatingLiteral,
    StringLiteral,
    GStringLiteral,
    BooleanLiteral,
    NullLiteral,

    // Keywords
    Package,
    Import,
    As,
    Return,
    BuiltInPrimitiveType,

    // Modifiers
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Strictfp,
    Default,
    Def,
    Var,
    Native,
    Synchronized,
    Transient,
    Volatile,

    // Separators
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Semi,
    Comma,
    Dot,
    SafeDot,

    // Operators
    Assign,
    Lt,
    Gt,
    Arrow,
    Mul,
    Inc,
    Dec,

    Nl,
    Eof,
}

impl TokenKind {
    /// Classify a scanned word as a keyword or identifier.
    pub fn from_word(word: &str) -> TokenKind {
        match word {
            "package" => TokenKind::Package,
            "import" => TokenKind::Import,
            "as" => TokenKind::As,
            "return" => TokenKind::Return,
            "true" | "false" => TokenKind::BooleanLiteral,
            "null" => TokenKind::NullLiteral,
            "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" => {
                TokenKind::BuiltInPrimitiveType
            }
            "public" => TokenKind::Public,
            "protected" => TokenKind::Protected,
            "private" => TokenKind::Private,
            "static" => TokenKind::Static,
            "abstract" => TokenKind::Abstract,
            "final" => TokenKind::Final,
            "strictfp" => TokenKind::Strictfp,
            "default" => TokenKind::Default,
            "def" => TokenKind::Def,
            "var" => TokenKind::Var,
            "native" => TokenKind::Native,
            "synchronized" => TokenKind::Synchronized,
            "transient" => TokenKind::Transient,
            "volatile" => TokenKind::Volatile,
            _ if word.starts_with(|c: char| c.is_ascii_uppercase()) => {
                TokenKind::CapitalizedIdentifier
            }
            _ => TokenKind::Identifier,
        }
    }

    /// Declaration modifiers, including `def` and `var`.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Abstract
                | TokenKind::Final
                | TokenKind::Strictfp
                | TokenKind::Default
                | TokenKind::Def
                | TokenKind::Var
                | TokenKind::Native
                | TokenKind::Synchronized
                | TokenKind::Transient
                | TokenKind::Volatile
        )
    }

    pub fn is_primitive_type(self) -> bool {
        self == TokenKind::BuiltInPrimitiveType
    }

    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::CapitalizedIdentifier
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::StringLiteral
                | TokenKind::GStringLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        )
    }

    /// `<` or `[`: the start of type arguments or of an array/index bracket.
    pub fn opens_type_arguments_or_brackets(self) -> bool {
        matches!(self, TokenKind::Lt | TokenKind::LBrack)
    }

    pub fn is_member_access(self) -> bool {
        matches!(self, TokenKind::Dot | TokenKind::SafeDot)
    }

    /// Statement separators.
    pub fn is_separator(self) -> bool {
        matches!(self, TokenKind::Nl | TokenKind::Semi)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrack => "'['",
            TokenKind::RBrack => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::SafeDot => "'?.'",
            TokenKind::Assign => "'='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Arrow => "'->'",
            TokenKind::Mul => "'*'",
            TokenKind::Inc => "'++'",
            TokenKind::Dec => "'--'",
            TokenKind::Nl => "newline",
            TokenKind::Eof => "end of input",
            other => return write!(f, "{:?}", other),
        };
        f.write_str(text)
    }
}

/// A lexed token: kind, source text and location.
///
/// `line` and `column` are 1-based; `span` is the byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            line: 1,
            column: 1,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Nl | TokenKind::Eof => write!(f, "{}", self.kind),
            _ => write!(f, "{:?}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_classification() {
        assert_eq!(TokenKind::from_word("package"), TokenKind::Package);
        assert_eq!(TokenKind::from_word("def"), TokenKind::Def);
        assert_eq!(TokenKind::from_word("int"), TokenKind::BuiltInPrimitiveType);
        assert_eq!(TokenKind::from_word("true"), TokenKind::BooleanLiteral);
        assert_eq!(TokenKind::from_word("null"), TokenKind::NullLiteral);
        assert_eq!(TokenKind::from_word("String"), TokenKind::CapitalizedIdentifier);
        assert_eq!(TokenKind::from_word("println"), TokenKind::Identifier);
        assert_eq!(TokenKind::from_word("_private"), TokenKind::Identifier);
    }

    #[test]
    fn test_categories() {
        assert!(TokenKind::Volatile.is_modifier());
        assert!(TokenKind::Def.is_modifier());
        assert!(!TokenKind::Identifier.is_modifier());
        assert!(TokenKind::Lt.opens_type_arguments_or_brackets());
        assert!(TokenKind::LBrack.opens_type_arguments_or_brackets());
        assert!(!TokenKind::LParen.opens_type_arguments_or_brackets());
        assert!(TokenKind::GStringLiteral.is_literal());
        assert!(TokenKind::CapitalizedIdentifier.is_identifier());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::LParen.to_string(), "'('");
        assert_eq!(TokenKind::Identifier.to_string(), "Identifier");
        let token = Token::new(TokenKind::Identifier, "foo", 0..3);
        assert_eq!(token.to_string(), "\"foo\"");
    }
}

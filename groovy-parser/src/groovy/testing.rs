//! Testing helpers
//!
//!     Factories for tokens, token streams and CST nodes, shared by the unit tests here and
//!     by the integration tests of downstream crates. Hand-built inputs keep predicate and
//!     printer tests independent of the lexer and parser.

pub mod factories {
    use crate::groovy::cst::{Element, Node, NodeKind};
    use crate::groovy::stream::TokenStream;
    use crate::groovy::token::{Token, TokenKind};

    /// A representative source text for a token kind.
    pub fn sample_text(kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::Identifier => "name",
            TokenKind::CapitalizedIdentifier => "Name",
            TokenKind::IntegerLiteral => "1",
            TokenKind::FloatingLiteral => "1.5",
            TokenKind::StringLiteral => "'text'",
            TokenKind::GStringLiteral => "\"$text\"",
            TokenKind::BooleanLiteral => "true",
            TokenKind::NullLiteral => "null",
            TokenKind::Package => "package",
            TokenKind::Import => "import",
            TokenKind::As => "as",
            TokenKind::Return => "return",
            TokenKind::BuiltInPrimitiveType => "int",
            TokenKind::Public => "public",
            TokenKind::Protected => "protected",
            TokenKind::Private => "private",
            TokenKind::Static => "static",
            TokenKind::Abstract => "abstract",
            TokenKind::Final => "final",
            TokenKind::Strictfp => "strictfp",
            TokenKind::Default => "default",
            TokenKind::Def => "def",
            TokenKind::Var => "var",
            TokenKind::Native => "native",
            TokenKind::Synchronized => "synchronized",
            TokenKind::Transient => "transient",
            TokenKind::Volatile => "volatile",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::SafeDot => "?.",
            TokenKind::Assign => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Arrow => "->",
            TokenKind::Mul => "*",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::Nl => "\n",
            TokenKind::Eof => "",
        }
    }

    /// Build tokens from `(kind, text)` pairs with contiguous spans.
    pub fn mk_tokens(items: &[(TokenKind, &str)]) -> Vec<Token> {
        let mut offset = 0;
        let mut column = 1;
        items
            .iter()
            .map(|(kind, text)| {
                let token = Token::new(*kind, *text, offset..offset + text.len()).at(1, column);
                offset += text.len() + 1;
                column += text.chars().count() + 1;
                token
            })
            .collect()
    }

    /// Build a token stream from kinds alone, using [`sample_text`] for the text.
    pub fn mk_token_stream(kinds: &[TokenKind]) -> TokenStream {
        let items: Vec<_> = kinds.iter().map(|k| (*k, sample_text(*k))).collect();
        TokenStream::new(mk_tokens(&items))
    }

    pub fn token(kind: TokenKind, text: &str) -> Element {
        Element::Token(Token::new(kind, text, 0..text.len()))
    }

    pub fn node(kind: NodeKind, children: Vec<Element>) -> Element {
        Element::Node(Node::new(kind, children))
    }

    /// `Identifier` node wrapping a single name token.
    pub fn identifier(name: &str) -> Element {
        node(
            NodeKind::Identifier,
            vec![token(TokenKind::from_word(name), name)],
        )
    }

    /// `Literal` node wrapping a single literal token.
    pub fn literal(kind: TokenKind, text: &str) -> Element {
        node(NodeKind::Literal, vec![token(kind, text)])
    }
}

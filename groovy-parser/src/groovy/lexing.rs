//! Lexer
//!
//!     Tokenization runs a logos lexer over the source and maps each raw token to a
//!     [`Token`] carrying its [`TokenKind`], text, byte span and 1-based line/column.
//!
//!     Fixed punctuation and numbers are plain logos rules. The context-sensitive parts are
//!     callbacks that consult the character classifier and the character predicates:
//!         - identifiers are scanned with `is_identifier_part`, then classified as keywords;
//!         - `'''`/`"""` openings are detected with `is_followed_by_any_of`;
//!         - every `$` in a double-quoted string asks
//!           `is_followed_by_identifier_start_in_interpolation`, deciding between
//!           `StringLiteral` and `GStringLiteral`;
//!         - a backslash is a line continuation only when `is_followed_by_whitespace`.
//!
//!     Block comments are a callback too: logos cannot backtrack out of a `*` run, so the
//!     body is found with a plain search for `*/`.
//!
//! Lexer State
//!
//!     Newlines are statement separators except inside parentheses or brackets. Tracking
//!     that needs a stack of open delimiters, kept in [`LexerState`] as the logos extras.
//!     Each [`tokenize`] call builds a new logos lexer, so the state starts empty for every
//!     input and nothing carries over between files.

use crate::groovy::character::is_identifier_part;
use crate::groovy::error::{LineIndex, SyntaxError};
use crate::groovy::predicates::{
    is_followed_by_any_of, is_followed_by_identifier_start_in_interpolation,
    is_followed_by_whitespace,
};
use crate::groovy::stream::{CharStream, SourceChars};
use crate::groovy::token::{Token, TokenKind};
use logos::{Filter, FilterResult, Lexer, Logos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Paren,
    Bracket,
    Brace,
}

/// Per-input lexer state: the stack of currently open delimiters.
#[derive(Debug, Default, Clone)]
pub struct LexerState {
    open: Vec<Delimiter>,
}

impl LexerState {
    /// Newlines are dropped when the innermost open delimiter is `(` or `[`. A closure
    /// brace inside parentheses turns them back on.
    pub fn suppresses_newlines(&self) -> bool {
        matches!(
            self.open.last(),
            Some(Delimiter::Paren | Delimiter::Bracket)
        )
    }

    fn open(&mut self, delimiter: Delimiter) {
        self.open.push(delimiter);
    }

    fn close(&mut self) {
        self.open.pop();
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum LexFault {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
    MisplacedShebang,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(extras = LexerState)]
#[logos(error = LexFault)]
#[logos(skip r"[ \t\f]+")]
#[logos(skip r"//[^\r\n]*")]
enum RawToken {
    #[token("\u{FEFF}", byte_order_mark)]
    ByteOrderMark,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#![^\r\n]*", shebang)]
    Shebang,

    #[token("\\", line_continuation)]
    LineContinuation,

    #[regex(r"\r\n?|\n", newline)]
    Newline,

    #[regex(r"[A-Za-z_]", identifier)]
    Word,

    #[regex(r"[0-9][0-9_]*[lLgGiI]?")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*[lLgGiI]?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDgG]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdDgG]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    Floating,

    #[token("'", single_quoted)]
    SingleQuoted,

    /// Payload: whether the string interpolates.
    #[token("\"", double_quoted)]
    DoubleQuoted(bool),

    #[token("(", |lex| lex.extras.open(Delimiter::Paren))]
    LParen,
    #[token(")", |lex| lex.extras.close())]
    RParen,
    #[token("[", |lex| lex.extras.open(Delimiter::Bracket))]
    LBrack,
    #[token("]", |lex| lex.extras.close())]
    RBrack,
    #[token("{", |lex| lex.extras.open(Delimiter::Brace))]
    LBrace,
    #[token("}", |lex| lex.extras.close())]
    RBrace,

    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?.")]
    SafeDot,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("->")]
    Arrow,
    #[token("*")]
    Mul,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
}

impl RawToken {
    /// `None` for tokens that never reach the token stream.
    fn kind(self, text: &str) -> Option<TokenKind> {
        let kind = match self {
            RawToken::ByteOrderMark
            | RawToken::BlockComment
            | RawToken::Shebang
            | RawToken::LineContinuation => return None,
            RawToken::Newline => TokenKind::Nl,
            RawToken::Word => TokenKind::from_word(text),
            RawToken::Integer => TokenKind::IntegerLiteral,
            RawToken::Floating => TokenKind::FloatingLiteral,
            RawToken::SingleQuoted | RawToken::DoubleQuoted(false) => TokenKind::StringLiteral,
            RawToken::DoubleQuoted(true) => TokenKind::GStringLiteral,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrack => TokenKind::LBrack,
            RawToken::RBrack => TokenKind::RBrack,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::SafeDot => TokenKind::SafeDot,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Mul => TokenKind::Mul,
            RawToken::Inc => TokenKind::Inc,
            RawToken::Dec => TokenKind::Dec,
        };
        Some(kind)
    }
}

fn byte_order_mark(lex: &mut Lexer<RawToken>) -> FilterResult<(), LexFault> {
    if lex.span().start == 0 {
        FilterResult::Skip
    } else {
        FilterResult::Error(LexFault::UnexpectedCharacter)
    }
}

fn block_comment(lex: &mut Lexer<RawToken>) -> FilterResult<(), LexFault> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(LexFault::UnterminatedComment),
    }
}

fn shebang(lex: &mut Lexer<RawToken>) -> FilterResult<(), LexFault> {
    if lex.span().start == 0 {
        FilterResult::Skip
    } else {
        FilterResult::Error(LexFault::MisplacedShebang)
    }
}

fn line_continuation(lex: &mut Lexer<RawToken>) -> FilterResult<(), LexFault> {
    let rest = lex.remainder();
    if !is_followed_by_whitespace(&SourceChars::new(rest)) {
        return FilterResult::Error(LexFault::UnexpectedCharacter);
    }
    let line_end = match rest.find(['\r', '\n']) {
        Some(i) if rest[i..].starts_with("\r\n") => i + 2,
        Some(i) => i + 1,
        None => rest.len(),
    };
    lex.bump(line_end);
    FilterResult::Skip
}

fn newline(lex: &mut Lexer<RawToken>) -> Filter<()> {
    if lex.extras.suppresses_newlines() {
        Filter::Skip
    } else {
        Filter::Emit(())
    }
}

fn identifier(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder();
    let len = rest
        .find(|c: char| !is_identifier_part(c))
        .unwrap_or(rest.len());
    lex.bump(len);
}

fn is_line_end(unit: u16) -> bool {
    unit == u16::from(b'\n') || unit == u16::from(b'\r')
}

fn is_unit(chars: &SourceChars, ascii: u8) -> bool {
    chars.la(1) == Some(u16::from(ascii))
}

/// After the opening quote: true if two more quotes follow, consuming them.
fn opens_triple_quote(chars: &mut SourceChars, quote: char) -> bool {
    let mut ahead = chars.clone();
    if !is_followed_by_any_of(&ahead, &[quote]) {
        return false;
    }
    ahead.consume();
    if !is_followed_by_any_of(&ahead, &[quote]) {
        return false;
    }
    ahead.consume();
    *chars = ahead;
    true
}

/// At a quote character: true if it closes the literal, consuming the closing quotes.
fn closes_quote(chars: &mut SourceChars, quote: u8, triple: bool) -> bool {
    if !triple {
        chars.consume();
        return true;
    }
    let mut ahead = chars.clone();
    for _ in 0..3 {
        if !is_unit(&ahead, quote) {
            return false;
        }
        ahead.consume();
    }
    *chars = ahead;
    true
}

fn single_quoted(lex: &mut Lexer<RawToken>) -> Result<(), LexFault> {
    let mut chars = SourceChars::new(lex.remainder());
    let triple = opens_triple_quote(&mut chars, '\'');
    loop {
        match chars.la(1) {
            None => return Err(LexFault::UnterminatedString),
            Some(unit) if unit == u16::from(b'\\') => {
                chars.consume();
                chars.consume();
            }
            Some(unit) if unit == u16::from(b'\'') => {
                if closes_quote(&mut chars, b'\'', triple) {
                    break;
                }
                chars.consume();
            }
            Some(unit) if is_line_end(unit) && !triple => {
                return Err(LexFault::UnterminatedString)
            }
            Some(_) => chars.consume(),
        }
    }
    lex.bump(chars.offset());
    Ok(())
}

fn double_quoted(lex: &mut Lexer<RawToken>) -> Result<bool, LexFault> {
    let mut chars = SourceChars::new(lex.remainder());
    let triple = opens_triple_quote(&mut chars, '"');
    let mut interpolated = false;
    loop {
        match chars.la(1) {
            None => return Err(LexFault::UnterminatedString),
            Some(unit) if unit == u16::from(b'\\') => {
                chars.consume();
                chars.consume();
            }
            Some(unit) if unit == u16::from(b'"') => {
                if closes_quote(&mut chars, b'"', triple) {
                    break;
                }
                chars.consume();
            }
            Some(unit) if unit == u16::from(b'$') => {
                chars.consume();
                if is_followed_by_identifier_start_in_interpolation(&chars) {
                    interpolated = true;
                    if is_unit(&chars, b'{') {
                        skip_interpolation_block(&mut chars)?;
                    }
                } else if is_unit(&chars, b'$') {
                    chars.consume();
                }
            }
            Some(unit) if is_line_end(unit) && !triple => {
                return Err(LexFault::UnterminatedString)
            }
            Some(_) => chars.consume(),
        }
    }
    lex.bump(chars.offset());
    Ok(interpolated)
}

/// Skip a `${ ... }` body by brace counting. The stream is positioned at the `{`.
fn skip_interpolation_block(chars: &mut SourceChars) -> Result<(), LexFault> {
    let mut depth = 0usize;
    loop {
        match chars.la(1) {
            None => return Err(LexFault::UnterminatedString),
            Some(unit) if unit == u16::from(b'{') => depth += 1,
            Some(unit) if unit == u16::from(b'}') => {
                depth -= 1;
                if depth == 0 {
                    chars.consume();
                    return Ok(());
                }
            }
            Some(_) => {}
        }
        chars.consume();
    }
}

fn describe(fault: &LexFault, slice: &str) -> String {
    match fault {
        LexFault::UnexpectedCharacter => match slice.chars().next() {
            Some(c) => format!("unexpected character {:?}", c),
            None => "unexpected end of input".to_string(),
        },
        LexFault::UnterminatedString => "unterminated string literal".to_string(),
        LexFault::UnterminatedComment => "unterminated block comment".to_string(),
        LexFault::MisplacedShebang => "'#!' is only allowed on the first line".to_string(),
    }
}

/// Tokenize Groovy source into a token list terminated by `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = RawToken::lexer(source);
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                if let Some(kind) = raw.kind(lexer.slice()) {
                    let (line, column) = lines.locate(span.start);
                    tokens.push(Token::new(kind, lexer.slice(), span).at(line, column));
                }
            }
            Err(fault) => {
                return Err(SyntaxError::at_offset(
                    describe(&fault, lexer.slice()),
                    &lines,
                    span.start,
                ));
            }
        }
    }

    let (line, column) = lines.locate(source.len());
    tokens.push(Token::new(TokenKind::Eof, "", source.len()..source.len()).at(line, column));

    tracing::debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_command_expression_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("println 1, 'two'"),
            vec![Identifier, IntegerLiteral, Comma, StringLiteral, Eof]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            kinds("def String x_1 = null"),
            vec![Def, CapitalizedIdentifier, Identifier, Assign, NullLiteral, Eof]
        );
    }

    #[test]
    fn test_numbers() {
        use TokenKind::*;
        assert_eq!(
            kinds("1 1_000L 0xFF 1.5 2e10 3f 1.foo"),
            vec![
                IntegerLiteral,
                IntegerLiteral,
                IntegerLiteral,
                FloatingLiteral,
                FloatingLiteral,
                FloatingLiteral,
                IntegerLiteral,
                Dot,
                Identifier,
                Eof
            ]
        );
    }

    #[test]
    fn test_string_interpolation_decides_kind() {
        use TokenKind::*;
        assert_eq!(kinds(r#""plain""#), vec![StringLiteral, Eof]);
        assert_eq!(kinds(r#""hi $name""#), vec![GStringLiteral, Eof]);
        assert_eq!(kinds(r#""sum ${a + b}""#), vec![GStringLiteral, Eof]);
        assert_eq!(kinds(r#""cost $$5""#), vec![StringLiteral, Eof]);
        assert_eq!(kinds(r#""price $5""#), vec![StringLiteral, Eof]);
        assert_eq!(kinds(r#""end $""#), vec![StringLiteral, Eof]);
        assert_eq!(kinds("'$name'"), vec![StringLiteral, Eof]);
    }

    #[test]
    fn test_triple_quoted_strings() {
        let tokens = tokenize("'''a\n'b'\n''' \"\"\"x \"y\" $z\"\"\" ''").expect("tokenize");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "'''a\n'b'\n'''");
        assert_eq!(tokens[1].kind, TokenKind::GStringLiteral);
        assert_eq!(tokens[1].text, "\"\"\"x \"y\" $z\"\"\"");
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text, "''");
    }

    #[test]
    fn test_newlines_suppressed_inside_parens_and_brackets() {
        use TokenKind::*;
        assert_eq!(
            kinds("foo(1,\n2)\nbar [\n3]"),
            vec![
                Identifier, LParen, IntegerLiteral, Comma, IntegerLiteral, RParen, Nl,
                Identifier, LBrack, IntegerLiteral, RBrack, Eof
            ]
        );
        assert_eq!(
            kinds("foo({\nx\n})"),
            vec![Identifier, LParen, LBrace, Nl, Identifier, Nl, RBrace, RParen, Eof]
        );
    }

    #[test]
    fn test_lexer_state_does_not_leak_between_inputs() {
        use TokenKind::*;
        assert_eq!(kinds("foo(((\n"), vec![Identifier, LParen, LParen, LParen, Eof]);
        assert_eq!(kinds("a\nb"), vec![Identifier, Nl, Identifier, Eof]);
    }

    #[test]
    fn test_comments_shebang_and_continuations_are_skipped() {
        use TokenKind::*;
        assert_eq!(
            kinds("#!/usr/bin/env groovy\nfoo // trailing\n/* block\n */ bar \\  \n 1"),
            vec![Nl, Identifier, Nl, Identifier, IntegerLiteral, Eof]
        );
    }

    #[rstest]
    #[case::single_line("foo /* x */ 1")]
    #[case::multi_line("foo /* a\n b */ 1")]
    #[case::doc_comment("foo /** doc */ 1")]
    #[case::stars_inside("foo /* a * b */ 1")]
    #[case::empty("foo /**/ 1")]
    #[case::byte_order_mark("\u{FEFF}foo 1")]
    fn test_block_comments_and_bom_are_skipped(#[case] source: &str) {
        use TokenKind::*;
        assert_eq!(kinds(source), vec![Identifier, IntegerLiteral, Eof]);
    }

    #[test]
    fn test_leading_block_comment() {
        use TokenKind::*;
        assert_eq!(kinds("/* c */\nfoo"), vec![Nl, Identifier, Eof]);
    }

    #[rstest]
    #[case::unterminated("foo /* open", "unterminated block comment", 5)]
    #[case::slash_only("/*/", "unterminated block comment", 1)]
    #[case::bom_after_start("foo \u{FEFF}", "unexpected character", 5)]
    fn test_comment_and_bom_errors(
        #[case] source: &str,
        #[case] message: &str,
        #[case] column: usize,
    ) {
        let error = tokenize(source).expect_err("should not tokenize");
        assert!(error.message.starts_with(message), "{}", error.message);
        assert_eq!((error.line, error.column), (1, column));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        use TokenKind::*;
        let tokens = tokenize("foo 1\rbar 2\r\nbaz").expect("tokenize");
        let located: Vec<_> = tokens.iter().map(|t| (t.kind, t.line, t.column)).collect();
        assert_eq!(
            located,
            vec![
                (Identifier, 1, 1),
                (IntegerLiteral, 1, 5),
                (Nl, 1, 6),
                (Identifier, 2, 1),
                (IntegerLiteral, 2, 5),
                (Nl, 2, 6),
                (Identifier, 3, 1),
                (Eof, 3, 4),
            ]
        );
        assert_eq!(kinds("foo \\\r1"), vec![Identifier, IntegerLiteral, Eof]);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a\n  'é' c").expect("tokenize");
        let located: Vec<_> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.line, t.column))
            .collect();
        assert_eq!(
            located,
            vec![("a", 1, 1), ("\n", 1, 2), ("'é'", 2, 3), ("c", 2, 7), ("", 2, 8)]
        );
    }

    #[test]
    fn test_errors_are_located() {
        let error = tokenize("foo\n  bar @").expect_err("'@' is not a token");
        assert_eq!(error.message, "unexpected character '@'");
        assert_eq!((error.line, error.column, error.offset), (2, 7, 10));

        let error = tokenize("x = 'open").expect_err("unterminated");
        assert_eq!(error.message, "unterminated string literal");
        assert_eq!(error.column, 5);

        assert!(tokenize("foo \\ bar").is_err());
        assert!(tokenize("foo\n#!bash").is_err());
    }
}

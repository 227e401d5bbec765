//! Lookahead streams
//!
//!     Both streams follow the same contract: lookahead is 1-based (`la(1)` / `lt(1)` is the
//!     next, not yet consumed, item), looking ahead never moves the cursor, and only
//!     `consume` advances it. Cursors never move backwards.
//!
//!     Character streams hand out UTF-16 code units rather than `char`s. String
//!     interpolation has to reason about surrogate halves, and a `char` view would hide
//!     them.

use crate::groovy::token::{Token, TokenKind};

/// Character lookahead over UTF-16 code units. `None` marks the end of the stream.
pub trait CharStream {
    fn la(&self, k: usize) -> Option<u16>;
    fn consume(&mut self);
}

/// Token lookahead. Past the end of input, `lt` keeps returning the `Eof` token.
pub trait TokenLookahead {
    fn lt(&self, k: usize) -> &Token;

    fn kind(&self, k: usize) -> TokenKind {
        self.lt(k).kind
    }
}

/// A [`CharStream`] over a borrowed string.
///
/// The cursor is a byte offset plus a flag for having consumed only the high half of a
/// surrogate pair.
#[derive(Debug, Clone)]
pub struct SourceChars<'a> {
    source: &'a str,
    pos: usize,
    split: bool,
}

impl<'a> SourceChars<'a> {
    pub fn new(source: &'a str) -> Self {
        SourceChars {
            source,
            pos: 0,
            split: false,
        }
    }

    /// Byte offset of the cursor in the underlying string.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl CharStream for SourceChars<'_> {
    fn la(&self, k: usize) -> Option<u16> {
        if k == 0 {
            return None;
        }
        let mut units = self.source[self.pos..].encode_utf16();
        if self.split {
            units.next();
        }
        units.nth(k - 1)
    }

    fn consume(&mut self) {
        let Some(c) = self.source[self.pos..].chars().next() else {
            return;
        };
        if c.len_utf16() == 2 && !self.split {
            self.split = true;
        } else {
            self.pos += c.len_utf8();
            self.split = false;
        }
    }
}

/// A [`TokenLookahead`] over lexed tokens, terminated by `Eof`.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Wrap tokens, appending an `Eof` token if the input lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.column + t.text.chars().count()))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", end..end).at(line, column));
        }
        TokenStream { tokens, cursor: 0 }
    }

    pub fn consume(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl TokenLookahead for TokenStream {
    fn lt(&self, k: usize) -> &Token {
        let index = self.cursor + k.saturating_sub(1);
        &self.tokens[index.min(self.tokens.len() - 1)]
    }
}

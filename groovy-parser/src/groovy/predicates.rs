//! Disambiguation predicates
//!
//!     Groovy cannot be recognised by a context-free grammar alone. At a handful of decision
//!     points the lexer or parser asks one of these oracles which alternative to take. Each
//!     one inspects a bounded amount of lookahead, never consumes input and always answers;
//!     `false` rules out the alternative being tried.
//!
//!     Character predicates (lexer side):
//!         is_followed_by_whitespace                         line continuations
//!         is_followed_by_any_of                             triple-quote openings
//!         is_followed_by_identifier_start_in_interpolation  `$` inside double quotes
//!
//!     Token predicates (parser side):
//!         is_invalid_local_variable_declaration             `a b` vs `Type name`
//!         is_invalid_method_declaration                     `foo(..)` call vs declaration
//!         is_following_arguments_or_closure                 `foo(1) 2` is not a command

use crate::groovy::character::is_identifier_part;
use crate::groovy::cst::{Node, NodeKind, PathTrailer};
use crate::groovy::stream::{CharStream, TokenLookahead};
use crate::groovy::token::TokenKind;

const DOLLAR: u16 = b'$' as u16;
const LEFT_CURLY: u16 = b'{' as u16;

fn is_line_terminator(unit: u16) -> bool {
    unit == u16::from(b'\n') || unit == u16::from(b'\r')
}

/// The ECMAScript `\s` class minus line terminators. Unlike `char::is_whitespace` it
/// includes U+FEFF and excludes U+0085.
fn is_space(unit: u16) -> bool {
    matches!(
        unit,
        0x09 | 0x0B | 0x0C | 0x20 | 0xA0 | 0x1680 | 0x2000..=0x200A
            | 0x2028 | 0x2029 | 0x202F | 0x205F | 0x3000 | 0xFEFF
    )
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// True iff only whitespace remains before the next line terminator or end of stream.
pub fn is_followed_by_whitespace(stream: &impl CharStream) -> bool {
    let mut k = 1;
    while let Some(unit) = stream.la(k) {
        if is_line_terminator(unit) {
            break;
        }
        if !is_space(unit) {
            return false;
        }
        k += 1;
    }
    true
}

/// True iff the next character is one of `candidates`.
///
/// Candidates outside the Basic Multilingual Plane span two code units and never match.
pub fn is_followed_by_any_of(stream: &impl CharStream, candidates: &[char]) -> bool {
    let Some(next) = stream.la(1) else {
        return false;
    };
    candidates
        .iter()
        .any(|c| u16::try_from(u32::from(*c)).is_ok_and(|unit| unit == next))
}

/// Decide whether the `$` just consumed inside a string literal starts an interpolation.
///
/// The stream must be positioned right after the `$`.
pub fn is_followed_by_identifier_start_in_interpolation(stream: &impl CharStream) -> bool {
    let Some(first) = stream.la(1) else {
        return false;
    };

    // `$$` is a literal dollar
    if first == DOLLAR {
        return false;
    }

    if first == LEFT_CURLY
        || u8::try_from(first).is_ok_and(|b| b.is_ascii_alphabetic() || b == b'_')
    {
        return true;
    }

    if first >= 0x80 && !is_high_surrogate(first) && is_identifier_part(first) {
        return true;
    }

    if let Some(second) = stream.la(2) {
        if is_high_surrogate(first) && is_low_surrogate(second) {
            let combined = char::decode_utf16([first, second]).next().and_then(Result::ok);
            if combined.is_some_and(is_identifier_part) {
                return true;
            }
        }
    }

    false
}

/// Disambiguate `Identifier Identifier ...`: true means "not a declaration, parse it as a
/// command expression".
///
/// A dotted path followed by `<` or `[` is never rejected here, nor is anything led by a
/// primitive type or a modifier. Otherwise the statement is rejected when its first name
/// is not upper-case led, no `=` follows the would-be variable name, and the first name is
/// not followed by `<` or `[`.
pub fn is_invalid_local_variable_declaration(tokens: &impl TokenLookahead) -> bool {
    if tokens.kind(2) == TokenKind::Dot {
        let mut k = 2;
        while tokens.kind(k) == TokenKind::Dot {
            k += 2;
        }
        if tokens.kind(k).opens_type_arguments_or_brackets() {
            return false;
        }
    }

    let first = tokens.lt(1);
    if first.kind.is_primitive_type() || first.kind.is_modifier() {
        return false;
    }

    let not_upper_led = first
        .text
        .chars()
        .next()
        .is_some_and(|c| c.to_lowercase().eq(std::iter::once(c)));

    not_upper_led
        && tokens.kind(3) != TokenKind::Assign
        && !tokens.kind(2).opens_type_arguments_or_brackets()
}

/// True iff the statement starts like a call (`name(` or `'name'(`), which rules out a
/// method declaration.
pub fn is_invalid_method_declaration(tokens: &impl TokenLookahead) -> bool {
    matches!(
        tokens.kind(1),
        TokenKind::Identifier | TokenKind::CapitalizedIdentifier | TokenKind::StringLiteral
    ) && tokens.kind(2) == TokenKind::LParen
}

/// True iff `expression` is a plain path expression already ending in arguments or a
/// closure, i.e. a method call that cannot take a further command argument list.
///
/// Only the exact shape `PostfixExprAlt[PostfixExpression[PathExpression]]`, each layer
/// with a single child, qualifies.
pub fn is_following_arguments_or_closure(expression: &Node) -> bool {
    fn sole_child(node: &Node) -> Option<&Node> {
        match node.children() {
            [only] => only.as_node(),
            _ => None,
        }
    }

    if expression.kind() != NodeKind::PostfixExprAlt {
        return false;
    }
    let Some(postfix) = sole_child(expression) else {
        return false;
    };
    if postfix.kind() != NodeKind::PostfixExpression {
        return false;
    }
    let Some(path) = sole_child(postfix) else {
        return false;
    };
    matches!(
        path.kind(),
        NodeKind::PathExpression(PathTrailer::Arguments | PathTrailer::Closure)
    )
}

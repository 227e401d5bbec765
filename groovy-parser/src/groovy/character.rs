//! Identifier character classes
//!
//!     Groovy identifiers are recognised with ASCII-only classes: a letter or underscore
//!     starts one, and digits may follow. Anything else, including non-ASCII letters,
//!     is rejected. The predicates accept characters, UTF-16 code units and raw code
//!     points alike, since lookahead streams hand out code units while the lexer works
//!     on `char`s.

/// Anything that can be viewed as a code point.
///
/// Values that are not valid code points (negative numbers, lone surrogates seen as
/// `u16`) still convert; they simply fail every class check.
pub trait CodePoint: Copy {
    fn code_point(self) -> Option<u32>;
}

impl CodePoint for char {
    fn code_point(self) -> Option<u32> {
        Some(self as u32)
    }
}

impl CodePoint for u32 {
    fn code_point(self) -> Option<u32> {
        Some(self)
    }
}

impl CodePoint for u16 {
    fn code_point(self) -> Option<u32> {
        Some(u32::from(self))
    }
}

impl CodePoint for i32 {
    fn code_point(self) -> Option<u32> {
        u32::try_from(self).ok()
    }
}

fn ascii(c: impl CodePoint) -> Option<u8> {
    c.code_point()
        .filter(|cp| *cp < 0x80)
        .and_then(|cp| u8::try_from(cp).ok())
}

/// True iff `c` is an ASCII letter or `_`.
pub fn is_identifier_start(c: impl CodePoint) -> bool {
    ascii(c).is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// True iff `c` may continue an identifier: an identifier start or an ASCII digit.
pub fn is_identifier_part(c: impl CodePoint) -> bool {
    is_identifier_start(c) || ascii(c).is_some_and(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_start() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('Z'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('$'));
        assert!(!is_identifier_start('é'));
    }

    #[test]
    fn test_identifier_part() {
        assert!(is_identifier_part('a'));
        assert!(is_identifier_part('_'));
        assert!(is_identifier_part('9'));
        assert!(!is_identifier_part('-'));
        assert!(!is_identifier_part(' '));
    }

    #[test]
    fn test_numeric_inputs() {
        assert!(is_identifier_start(0x61u32));
        assert!(is_identifier_part(0x30u16));
        assert!(!is_identifier_start(-1i32));
        assert!(!is_identifier_part(0xD800u16));
        assert!(!is_identifier_part(0x1F600u32));
        assert!(!is_identifier_part(u32::MAX));
    }
}

//! Disambiguation predicates over lexed input

use groovy_parser::groovy::predicates::{
    is_followed_by_any_of, is_followed_by_identifier_start_in_interpolation,
    is_followed_by_whitespace, is_invalid_local_variable_declaration,
    is_invalid_method_declaration,
};
use groovy_parser::groovy::stream::{CharStream, SourceChars, TokenStream};
use groovy_parser::groovy::tokenize;
use rstest::rstest;

fn lookahead(source: &str) -> TokenStream {
    TokenStream::new(tokenize(source).expect("source should tokenize"))
}

#[rstest]
#[case("   \nrest", true)]
#[case("", true)]
#[case("\t \r\n", true)]
#[case("a ", false)]
#[case("  // comment", false)]
fn test_followed_by_whitespace(#[case] rest: &str, #[case] expected: bool) {
    assert_eq!(is_followed_by_whitespace(&SourceChars::new(rest)), expected);
}

#[test]
fn test_followed_by_any_of_does_not_consume() {
    let mut chars = SourceChars::new("xy");
    assert!(is_followed_by_any_of(&chars, &['x']));
    assert!(is_followed_by_any_of(&chars, &['x']));
    chars.consume();
    assert!(!is_followed_by_any_of(&chars, &['x']));
    assert!(is_followed_by_any_of(&chars, &['x', 'y']));
}

#[rstest]
#[case("name}", true)]
#[case("_under", true)]
#[case("{a}", true)]
#[case("Capital", true)]
#[case("$", false)]
#[case("$name", false)]
#[case("", false)]
#[case("9", false)]
#[case("-", false)]
#[case("\"", false)]
fn test_interpolation_after_dollar(#[case] rest: &str, #[case] expected: bool) {
    assert_eq!(
        is_followed_by_identifier_start_in_interpolation(&SourceChars::new(rest)),
        expected
    );
}

#[rstest]
#[case("foo bar", true)]
#[case("_foo bar", true)]
#[case("a.b c", true)]
#[case("foo bar = 1", false)]
#[case("Foo bar", false)]
#[case("public x", false)]
#[case("private static foo", false)]
#[case("def x", false)]
#[case("var x", false)]
#[case("volatile x", false)]
#[case("int x", false)]
#[case("a.b<C> d", false)]
#[case("a.b.c[] d", false)]
#[case("foo<T> bar", false)]
#[case("foo[0]", false)]
fn test_invalid_local_variable_declaration(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(
        is_invalid_local_variable_declaration(&lookahead(source)),
        expected,
        "{source}"
    );
}

#[rstest]
#[case("foo(1)", true)]
#[case("Foo()", true)]
#[case("'quoted'()", true)]
#[case("\"$g\"()", false)]
#[case("foo = 1", false)]
#[case("foo (1)", true)]
#[case("def foo()", false)]
#[case("foo.bar()", false)]
#[case("", false)]
fn test_invalid_method_declaration(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(
        is_invalid_method_declaration(&lookahead(source)),
        expected,
        "{source}"
    );
}

#[test]
fn test_predicates_leave_cursor_in_place() {
    let tokens = lookahead("foo bar");
    let before = tokens.position();
    is_invalid_local_variable_declaration(&tokens);
    is_invalid_method_declaration(&tokens);
    assert_eq!(tokens.position(), before);
}

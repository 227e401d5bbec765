//! JSON serialization of tokens and trees

use crate::groovy::cst::Node;
use crate::groovy::token::Token;

/// Pretty-printed JSON array of tokens, one object per token.
pub fn tokens_to_json(tokens: &[Token]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}

pub fn node_to_json(node: &Node) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groovy::testing::factories::mk_tokens;
    use crate::groovy::token::TokenKind;

    #[test]
    fn test_tokens_to_json() {
        let tokens = mk_tokens(&[(TokenKind::Identifier, "foo"), (TokenKind::IntegerLiteral, "1")]);
        let json = tokens_to_json(&tokens).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value[0]["kind"], "Identifier");
        assert_eq!(value[0]["text"], "foo");
        assert_eq!(value[1]["kind"], "IntegerLiteral");
        assert_eq!(value[1]["span"]["start"], 4);
        assert_eq!(value[1]["column"], 5);
    }
}

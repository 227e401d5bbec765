//! Pipeline stages exposed by the CLI
//!
//! Each stage stops the pipeline at one point and prints what it has: the token stream,
//! the concrete syntax tree (as a tree view or as JSON), the document IR, or the formatted
//! text.

use groovy_parser::groovy::formats::{node_to_json, to_treeviz_str, tokens_to_json};
use groovy_parser::groovy::tokenize;
use groovy_printer::{Format, FormatError, FormatOptions};

/// All available stages, `format` first as the default
pub const AVAILABLE_STAGES: &[&str] = &["format", "tokens", "cst", "cst-json", "doc"];

/// Run `source` through `format` up to the named stage.
pub fn execute_stage(
    source: &str,
    stage: &str,
    format: &dyn Format,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    match stage {
        "format" => format.format(source, options),
        "tokens" => {
            let tokens = tokenize(source)?;
            tokens_to_json(&tokens).map_err(|e| FormatError::Render(e.to_string()))
        }
        "cst" => {
            let tree = format.parse(source)?;
            Ok(to_treeviz_str(&tree))
        }
        "cst-json" => {
            let tree = format.parse(source)?;
            node_to_json(&tree).map_err(|e| FormatError::Render(e.to_string()))
        }
        "doc" => {
            let tree = format.parse(source)?;
            serde_json::to_string_pretty(&format.to_doc(&tree))
                .map_err(|e| FormatError::Render(e.to_string()))
        }
        _ => Err(FormatError::Render(format!("Unknown stage: {}", stage))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_printer::GroovyFormat;

    fn run(source: &str, stage: &str) -> Result<String, FormatError> {
        execute_stage(source, stage, &GroovyFormat, &FormatOptions::default())
    }

    #[test]
    fn test_format_stage() {
        assert_eq!(run("foo  1,2", "format").unwrap(), "foo 1, 2\n");
    }

    #[test]
    fn test_tokens_stage() {
        let json = run("foo 1", "tokens").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "Identifier");
        assert_eq!(value[1]["kind"], "IntegerLiteral");
        assert_eq!(value[2]["kind"], "Eof");
    }

    #[test]
    fn test_cst_stage() {
        let tree = run("foo 1", "cst").unwrap();
        assert!(tree.starts_with("⧉ CompilationUnit\n"));
        assert!(tree.contains("• foo"));
    }

    #[test]
    fn test_cst_json_stage() {
        let json = run("foo 1", "cst-json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "CompilationUnit");
        assert_eq!(value["children"][0]["Node"]["kind"], "Statements");
    }

    #[test]
    fn test_doc_stage() {
        let json = run("foo", "doc").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Concat"][1], "Hardline");
    }

    #[test]
    fn test_syntax_error_surfaces() {
        assert!(matches!(run("foo(", "cst"), Err(FormatError::Syntax(_))));
        assert!(matches!(run("'open", "tokens"), Err(FormatError::Syntax(_))));
    }

    #[test]
    fn test_unknown_stage() {
        assert!(run("foo", "ast").is_err());
    }
}

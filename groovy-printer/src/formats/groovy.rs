//! Groovy format
//!
//! Parsing goes through `groovy_parser`, printing through [`crate::printer`].

use crate::doc::Doc;
use crate::error::FormatError;
use crate::format::Format;
use crate::printer::print_with;
use groovy_parser::groovy::{parse, Node};

/// Format implementation for Groovy sources and Gradle build scripts
pub struct GroovyFormat;

impl Format for GroovyFormat {
    fn name(&self) -> &str {
        "groovy"
    }

    fn description(&self) -> &str {
        "Groovy source and Gradle build scripts"
    }

    fn extensions(&self) -> &[&str] {
        &["groovy", "gradle", "gvy", "gy", "gsh"]
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        Ok(parse(source)?)
    }

    fn print(&self, node: &Node, print_child: &dyn Fn(&Node) -> Doc) -> Doc {
        print_with(node, print_child)
    }
    // Semicolons are statement separators, and formatting turns them into newlines.
    fn is_lossless(&self, source: &str, output: &str) -> bool {
        let significant = |text: &str| -> String {
            text.chars()
                .filter(|c| !c.is_whitespace() && *c != ';')
                .collect()
        };
        significant(source) == significant(output)
    }
}

//! Format trait definition
//!
//! A format is what a formatting host registers: a language name, the file extensions it
//! claims, a parser from source text to a tree, and a printer from tree nodes to [`Doc`].
//! The host drives the recursion: [`Format::print`] handles one node and calls back into
//! the host for each child.

use crate::doc::Doc;
use crate::error::FormatError;
use crate::render::{render, FormatOptions};
use groovy_parser::groovy::Node;

/// Trait for source formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["my"]
///     }
///
///     fn parse(&self, source: &str) -> Result<Node, FormatError> {
///         todo!()
///     }
///
///     fn print(&self, node: &Node, print_child: &dyn Fn(&Node) -> Doc) -> Doc {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "groovy")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions this format claims, without the leading dot
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Parse source text into a tree
    fn parse(&self, source: &str) -> Result<Node, FormatError>;

    /// Print one node, handing each child to `print_child`
    fn print(&self, node: &Node, print_child: &dyn Fn(&Node) -> Doc) -> Doc;

    /// Print a whole tree, recursing through [`Format::print`]
    fn to_doc(&self, node: &Node) -> Doc {
        self.print(node, &|child: &Node| self.to_doc(child))
    }

    /// Parse, print and render in one go
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        let tree = self.parse(source)?;
        render(&self.to_doc(&tree), options)
    }
    /// True if `output` keeps every character of `source` that is not layout.
    ///
    /// Printers drop what they have no rule for; hosts use this to avoid writing such
    /// output back over the source. By default only whitespace counts as layout.
    fn is_lossless(&self, source: &str, output: &str) -> bool {
        let significant = |text: &str| -> String {
            text.chars().filter(|c| !c.is_whitespace()).collect()
        };
        significant(source) == significant(output)
    }
}

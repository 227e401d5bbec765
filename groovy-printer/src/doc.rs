//! Document IR
//!
//!     A closed set of layout primitives. Printing a tree builds a fresh `Doc` value; nothing
//!     is shared between documents or changed after construction. The renderer maps each
//!     variant onto the matching `pretty` combinator.
//!
//!         Text      literal text
//!         Concat    sequence of documents
//!         Hardline  a line break that always breaks
//!         Line      a space, or a line break when the enclosing group does not fit
//!         Softline  nothing, or a line break when the enclosing group does not fit
//!         Group     try to lay the inner document out flat
//!         Indent    nest line breaks inside by one indentation level
//!         Join      items with a separator between each pair

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Doc {
    Text(String),
    Concat(Vec<Doc>),
    Hardline,
    Line,
    Softline,
    Group(Box<Doc>),
    Indent(Box<Doc>),
    Join { separator: Box<Doc>, items: Vec<Doc> },
}

impl Doc {
    /// The empty document: prints nothing.
    pub fn empty() -> Doc {
        Doc::Concat(Vec::new())
    }

    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn concat(parts: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::Concat(parts.into_iter().collect())
    }

    pub fn hardline() -> Doc {
        Doc::Hardline
    }

    pub fn line() -> Doc {
        Doc::Line
    }

    pub fn softline() -> Doc {
        Doc::Softline
    }

    pub fn group(inner: Doc) -> Doc {
        Doc::Group(Box::new(inner))
    }

    pub fn indent(inner: Doc) -> Doc {
        Doc::Indent(Box::new(inner))
    }

    pub fn join(separator: Doc, items: impl IntoIterator<Item = Doc>) -> Doc {
        Doc::Join {
            separator: Box::new(separator),
            items: items.into_iter().collect(),
        }
    }

    /// True if the document renders to nothing at any width.
    pub fn is_empty(&self) -> bool {
        match self {
            Doc::Text(text) => text.is_empty(),
            Doc::Concat(parts) => parts.iter().all(Doc::is_empty),
            Doc::Hardline | Doc::Line => false,
            Doc::Softline => true,
            Doc::Group(inner) | Doc::Indent(inner) => inner.is_empty(),
            Doc::Join { separator, items } => {
                items.iter().all(Doc::is_empty) && (items.len() < 2 || separator.is_empty())
            }
        }
    }

    /// Render with every group laid out flat and no indentation. Hard lines still break.
    pub fn to_flat_string(&self) -> String {
        let mut out = String::new();
        self.write_flat(&mut out);
        out
    }

    fn write_flat(&self, out: &mut String) {
        match self {
            Doc::Text(text) => out.push_str(text),
            Doc::Concat(parts) => parts.iter().for_each(|p| p.write_flat(out)),
            Doc::Hardline => out.push('\n'),
            Doc::Line => out.push(' '),
            Doc::Softline => {}
            Doc::Group(inner) | Doc::Indent(inner) => inner.write_flat(out),
            Doc::Join { separator, items } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        separator.write_flat(out);
                    }
                    item.write_flat(out);
                }
            }
        }
    }
}

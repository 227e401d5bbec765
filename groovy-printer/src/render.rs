//! Rendering
//!
//!     Lays a [`Doc`] out at a target width. Each IR variant maps onto one `pretty`
//!     combinator, and `pretty` picks the line breaks.

use crate::doc::Doc;
use crate::error::FormatError;
use pretty::{Arena, DocAllocator, DocBuilder};
use serde::Serialize;

/// Layout settings for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatOptions {
    /// Column limit groups try to fit within
    pub print_width: usize,
    /// Spaces per indentation level
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            print_width: 80,
            indent_width: 4,
        }
    }
}

/// Render a document to text.
pub fn render(doc: &Doc, options: &FormatOptions) -> Result<String, FormatError> {
    let allocator: Arena<'_, ()> = Arena::new();
    let indent = options.indent_width as isize;
    let builder = to_builder::<_, ()>(doc, indent, 0, &allocator);

    let mut output = Vec::new();
    builder.render(options.print_width, &mut output)?;
    String::from_utf8(output).map_err(|err| FormatError::Render(err.to_string()))
}

/// `depth` is the indentation the enclosing `Indent`s have accumulated.
fn to_builder<'a, D, A>(
    doc: &Doc,
    indent: isize,
    depth: isize,
    allocator: &'a D,
) -> DocBuilder<'a, D, A>
where
    D: DocAllocator<'a, A>,
    D::Doc: Clone,
    A: Clone,
{
    match doc {
        Doc::Text(text) => text_to_builder(text, depth, allocator),
        Doc::Concat(parts) => allocator.concat(
            parts
                .iter()
                .map(|part| to_builder::<D, A>(part, indent, depth, allocator)),
        ),
        Doc::Hardline => allocator.hardline(),
        Doc::Line => allocator.line(),
        Doc::Softline => allocator.line_(),
        Doc::Group(inner) => to_builder::<D, A>(inner, indent, depth, allocator).group(),
        Doc::Indent(inner) => {
            to_builder::<D, A>(inner, indent, depth + indent, allocator).nest(indent)
        }
        Doc::Join { separator, items } => allocator.intersperse(
            items
                .iter()
                .map(|item| to_builder::<D, A>(item, indent, depth, allocator)),
            to_builder::<D, A>(separator, indent, depth, allocator),
        ),
    }
}

// `pretty` text must not contain line breaks; multi-line literals go out line by line.
// Continuation lines belong to the literal, so they start at column 0 whatever the nesting.
fn text_to_builder<'a, D, A>(text: &str, depth: isize, allocator: &'a D) -> DocBuilder<'a, D, A>
where
    D: DocAllocator<'a, A>,
    D::Doc: Clone,
    A: Clone,
{
    if !text.contains('\n') {
        return allocator.text(text.to_string());
    }
    allocator
        .intersperse(
            text.split('\n').map(|line| allocator.text(line.to_string())),
            allocator.hardline(),
        )
        .nest(-depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Doc {
        Doc::concat([
            Doc::text("call("),
            Doc::group(Doc::concat([
                Doc::indent(Doc::concat([
                    Doc::softline(),
                    Doc::join(
                        Doc::concat([Doc::text(","), Doc::line()]),
                        items.iter().map(|item| Doc::text(*item)),
                    ),
                ])),
                Doc::softline(),
            ])),
            Doc::text(")"),
        ])
    }

    #[test]
    fn test_fits_on_one_line() {
        let out = render(&args(&["alpha", "beta"]), &FormatOptions::default());
        assert_eq!(out.ok().as_deref(), Some("call(alpha, beta)"));
    }

    #[test]
    fn test_breaks_when_too_wide() {
        let options = FormatOptions {
            print_width: 12,
            indent_width: 2,
        };
        let out = render(&args(&["alpha", "beta"]), &options).expect("renders");
        assert_eq!(out, "call(\n  alpha,\n  beta\n)");
    }

    #[test]
    fn test_hardline_and_empty() {
        let doc = Doc::concat([
            Doc::join(Doc::hardline(), [Doc::text("a"), Doc::text("b")]),
            Doc::hardline(),
        ]);
        assert_eq!(render(&doc, &FormatOptions::default()).expect("renders"), "a\nb\n");
        assert_eq!(render(&Doc::empty(), &FormatOptions::default()).expect("renders"), "");
    }

    #[test]
    fn test_multiline_text_is_kept() {
        let doc = Doc::text("'''one\ntwo'''");
        assert_eq!(
            render(&doc, &FormatOptions::default()).expect("renders"),
            "'''one\ntwo'''"
        );
    }

    #[test]
    fn test_multiline_text_ignores_indentation() {
        let doc = Doc::concat([
            Doc::text("task {"),
            Doc::indent(Doc::concat([
                Doc::hardline(),
                Doc::text("'''one\n  two\n\n'''"),
                Doc::hardline(),
                Doc::text("next"),
            ])),
            Doc::hardline(),
            Doc::text("}"),
        ]);
        assert_eq!(
            render(&doc, &FormatOptions::default()).expect("renders"),
            "task {\n    '''one\n  two\n\n'''\n    next\n}"
        );
    }
}

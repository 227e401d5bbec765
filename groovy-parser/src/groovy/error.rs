//! Error types for lexing and parsing

use std::fmt;

/// A lexical or grammar error, located in the source.
///
/// `offset` is a byte offset; `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize, line: usize, column: usize) -> Self {
        SyntaxError {
            message: message.into(),
            offset,
            line,
            column,
        }
    }

    /// Build an error at a byte offset, located through `lines`.
    pub fn at_offset(message: impl Into<String>, lines: &LineIndex, offset: usize) -> Self {
        let (line, column) = lines.locate(offset);
        SyntaxError::new(message, offset, line, column)
    }

    /// The error message followed by a numbered excerpt of the surrounding source.
    pub fn render_with_source(&self, source: &str) -> String {
        format!("{}\n\n{}", self, format_source_context(source, self.line))
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Byte offsets of line starts, for offset to line/column conversion.
///
/// A line ends at `\n`, at `\r\n`, or at a lone `\r`.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let starts = std::iter::once(0)
            .chain(bytes.iter().enumerate().filter_map(|(i, b)| match b {
                b'\n' => Some(i + 1),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => Some(i + 1),
                _ => None,
            }))
            .collect();
        LineIndex { source, starts }
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = self.starts.partition_point(|start| *start <= offset);
        let line_start = self.starts[line - 1];
        let column = self
            .source
            .get(line_start..offset)
            .map(|text| text.chars().count())
            .unwrap_or(0)
            + 1;
        (line, column)
    }
}

/// Format source code context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// `error_line` is 1-based.
pub fn format_source_context(source: &str, error_line: usize) -> String {
    let lines: Vec<&str> = source.lines().flat_map(|line| line.split('\r')).collect();
    let error_index = error_line.saturating_sub(1);

    let start = error_index.saturating_sub(2);
    let end = (error_index + 3).min(lines.len());

    let mut context = String::new();
    for (index, line) in lines.iter().enumerate().take(end).skip(start) {
        let marker = if index == error_index { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, index + 1, line));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let source = "ab\ncd\n\nxé";
        let lines = LineIndex::new(source);
        assert_eq!(lines.locate(0), (1, 1));
        assert_eq!(lines.locate(1), (1, 2));
        assert_eq!(lines.locate(3), (2, 1));
        assert_eq!(lines.locate(6), (3, 1));
        assert_eq!(lines.locate(8), (4, 2));
        assert_eq!(lines.locate(source.len()), (4, 3));
        assert_eq!(lines.locate(source.len() + 5), (4, 3));
    }

    #[test]
    fn test_line_index_carriage_returns() {
        let lines = LineIndex::new("a\r\nb\rc");
        assert_eq!(lines.locate(1), (1, 2));
        assert_eq!(lines.locate(3), (2, 1));
        assert_eq!(lines.locate(5), (3, 1));
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let context = format_source_context(source, 4);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 1"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_format_source_context_lone_carriage_returns() {
        let context = format_source_context("a\rb\r\nc", 2);
        assert!(context.contains(">>   2 | b"));
        assert!(context.contains("     3 | c"));
    }

    #[test]
    fn test_render_with_source() {
        let source = "foo 1\nbar @\n";
        let error = SyntaxError::at_offset("unexpected character '@'", &LineIndex::new(source), 10);
        assert_eq!((error.line, error.column), (2, 5));

        let rendered = error.render_with_source(source);
        assert!(rendered.starts_with("Syntax error at 2:5: unexpected character '@'"));
        assert!(rendered.contains(">>   2 | bar @"));
    }
}

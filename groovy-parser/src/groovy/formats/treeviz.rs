//! Treeviz formatter for concrete syntax trees
//!
//! Treeviz renders one line per node, with the nesting drawn by box connectors. It is meant
//! for scanning a tree by eye and for snapshot tests.
//!
//! The format is:
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example, for `println 'hi'`:
//!
//! ⧉ CompilationUnit
//! └─ ☰ Statements
//!   └─ § ExpressionStatement
//!     └─ ○ CommandExprAlt
//!       ...
//!
//! Identifier and literal leaves carry their source text as label; path expressions show
//! their trailer. Terminal tokens (punctuation, separators, keywords) are hidden unless the
//! `show-tokens` parameter is set.
//!
//! Icons
//!     CompilationUnit: ⧉
//!     Lists (statements, arguments, parameters): ☰
//!     Statements: §
//!     MethodDeclaration: ƒ
//!     Declarators and assignments: ≔
//!     Closure: λ
//!     Identifier: •
//!     Literal: #
//!     Token: ◦
//!     Anything else: ○

use crate::groovy::cst::{Element, Node, NodeKind, PathTrailer};
use crate::groovy::token::Token;
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::CompilationUnit => "⧉",
        NodeKind::Statements
        | NodeKind::EnhancedArgumentList
        | NodeKind::ExpressionList
        | NodeKind::FormalParameters => "☰",
        NodeKind::MethodDeclaration => "ƒ",
        NodeKind::LocalVariableDeclaration
        | NodeKind::VariableDeclarator
        | NodeKind::AssignmentExprAlt => "≔",
        NodeKind::Closure => "λ",
        NodeKind::Identifier => "•",
        NodeKind::Literal => "#",
        kind if kind.is_statement() => "§",
        _ => "○",
    }
}

fn node_label(node: &Node) -> String {
    match node.kind() {
        NodeKind::Identifier | NodeKind::Literal => {
            let text = node.first_token().map(|t| t.text.as_str()).unwrap_or("");
            truncate(&escape(text), 30)
        }
        NodeKind::PathExpression(PathTrailer::None) => "PathExpression".to_string(),
        NodeKind::PathExpression(trailer) => format!("PathExpression({:?})", trailer),
        kind => kind.name().to_string(),
    }
}

fn token_label(token: &Token) -> String {
    format!("{:?} {}", token.kind, truncate(&escape(&token.text), 30))
}

fn escape(text: &str) -> String {
    text.replace('\n', "\\n").replace('\r', "\\r")
}

struct Options {
    show_tokens: bool,
    show_linum: bool,
}

fn visible_children<'a>(node: &'a Node, options: &Options) -> Vec<&'a Element> {
    // leaf nodes already print their token as label
    if matches!(node.kind(), NodeKind::Identifier | NodeKind::Literal) {
        return Vec::new();
    }
    node.children()
        .iter()
        .filter(|child| options.show_tokens || child.as_node().is_some())
        .collect()
}

fn line_of(element: &Element) -> Option<usize> {
    match element {
        Element::Token(token) => Some(token.line),
        Element::Node(node) => node.tokens().first().map(|t| t.line),
    }
}

fn format_element(
    element: &Element,
    prefix: &str,
    is_last: bool,
    options: &Options,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let (icon, label) = match element {
        Element::Node(node) => (get_icon(node.kind()), node_label(node)),
        Element::Token(token) => ("◦", token_label(token)),
    };

    let linum_prefix = match (options.show_linum, line_of(element)) {
        (true, Some(line)) => format!("{:02} ", line),
        (true, None) => "   ".to_string(),
        (false, _) => String::new(),
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix, prefix, connector, icon, label
    ));

    if let Element::Node(node) = element {
        let children = visible_children(node, options);
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            format_element(child, &child_prefix, i == count - 1, options, output);
        }
    }
}

pub fn to_treeviz_str(node: &Node) -> String {
    to_treeviz_str_with_params(node, &HashMap::new())
}

/// Parameters: `show-tokens` and `show-linum`, both off unless set to anything but "false".
pub fn to_treeviz_str_with_params(node: &Node, params: &HashMap<String, String>) -> String {
    let flag = |name: &str| params.get(name).map(|v| v != "false").unwrap_or(false);
    let options = Options {
        show_tokens: flag("show-tokens"),
        show_linum: flag("show-linum"),
    };

    let mut output = format!("{} {}\n", get_icon(node.kind()), node_label(node));
    let children = visible_children(node, &options);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_element(child, "", i == count - 1, &options, &mut output);
    }
    output
}

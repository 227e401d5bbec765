//! Tree printer
//!
//!     Maps each CST node to a [`Doc`]. Dispatch is one exhaustive match over [`NodeKind`]:
//!     every kind either has a rule or is listed among the placeholders that print as an
//!     empty document. The printer never fails. A node kind without a rule drops its subtree
//!     from the output, so formatting always completes.
//!
//!     Rules:
//!         CompilationUnit        package declaration and statement list, joined by hard
//!                                lines, plus one trailing hard line
//!         Statements             statement children joined by hard lines
//!         CommandExpression      expression, one space, argument list
//!         EnhancedArgumentList   elements joined by ", "
//!         Identifier, Literal    token text, verbatim
//!         PackageDeclaration     "package " and the qualified name
//!         QualifiedName          identifiers joined by "."
//!         single-child wrappers  the first child node
//!
//!     [`print_with`] handles one level and hands children to a callback, the shape a
//!     host formatter expects. [`print`] recurses into itself.

use crate::doc::Doc;
use groovy_parser::groovy::{Node, NodeKind};
use tracing::trace;

/// Print a whole tree.
pub fn print(node: &Node) -> Doc {
    print_with(node, &print)
}

/// Print one node, delegating every child to `print_child`.
pub fn print_with(node: &Node, print_child: &dyn Fn(&Node) -> Doc) -> Doc {
    match node.kind() {
        NodeKind::CompilationUnit => {
            let parts = node
                .child_nodes()
                .filter(|child| {
                    matches!(
                        child.kind(),
                        NodeKind::PackageDeclaration | NodeKind::Statements
                    )
                })
                .map(print_child);
            Doc::concat([Doc::join(Doc::hardline(), parts), Doc::hardline()])
        }

        NodeKind::Statements => Doc::join(
            Doc::hardline(),
            node.child_nodes()
                .filter(|child| child.kind().is_statement())
                .map(print_child),
        ),

        NodeKind::CommandExpression => {
            let mut children = node.child_nodes();
            match (children.next(), children.next()) {
                (Some(expression), Some(arguments)) => Doc::concat([
                    print_child(expression),
                    Doc::text(" "),
                    print_child(arguments),
                ]),
                (Some(expression), None) => print_child(expression),
                (None, _) => Doc::empty(),
            }
        }

        NodeKind::ExpressionStatement
        | NodeKind::CommandExprAlt
        | NodeKind::PostfixExprAlt
        | NodeKind::PostfixExpression
        | NodeKind::PathExpression(_)
        | NodeKind::IdentifierPrimary
        | NodeKind::LiteralPrimary
        | NodeKind::EnhancedArgumentListElement
        | NodeKind::ExpressionListElement => passthrough(node, print_child),

        NodeKind::Identifier | NodeKind::Literal => match node.first_token() {
            Some(token) => Doc::text(token.text.clone()),
            None => Doc::empty(),
        },

        NodeKind::EnhancedArgumentList => Doc::join(
            Doc::text(", "),
            node.child_nodes()
                .filter(|child| child.kind() == NodeKind::EnhancedArgumentListElement)
                .map(print_child),
        ),

        NodeKind::PackageDeclaration => match node.first_node() {
            Some(name) => Doc::concat([Doc::text("package "), print_child(name)]),
            None => Doc::empty(),
        },

        NodeKind::QualifiedName => Doc::join(
            Doc::text("."),
            node.child_nodes()
                .filter(|child| child.kind() == NodeKind::Identifier)
                .map(print_child),
        ),

        NodeKind::ImportStatement
        | NodeKind::MethodDeclarationStatement
        | NodeKind::LocalVariableDeclarationStatement
        | NodeKind::ReturnStatement
        | NodeKind::ImportDeclaration
        | NodeKind::MethodDeclaration
        | NodeKind::LocalVariableDeclaration
        | NodeKind::Modifiers
        | NodeKind::Type
        | NodeKind::TypeArguments
        | NodeKind::FormalParameters
        | NodeKind::FormalParameter
        | NodeKind::VariableDeclarator
        | NodeKind::Block
        | NodeKind::AssignmentExprAlt
        | NodeKind::PathElement
        | NodeKind::Arguments
        | NodeKind::ParenPrimary
        | NodeKind::ClosurePrimary
        | NodeKind::ListPrimary
        | NodeKind::Closure
        | NodeKind::ExpressionList => {
            trace!(kind = node.kind().name(), "no print rule, printing nothing");
            Doc::empty()
        }
    }
}

fn passthrough(node: &Node, print_child: &dyn Fn(&Node) -> Doc) -> Doc {
    node.first_node().map(print_child).unwrap_or_else(Doc::empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovy_parser::groovy::testing::factories::{identifier, literal, node, token};
    use groovy_parser::groovy::{Element, PathTrailer, TokenKind};

    fn as_node(element: Element) -> Node {
        match element {
            Element::Node(node) => node,
            Element::Token(_) => unreachable!("factory built a token"),
        }
    }

    fn expression(primary: Element) -> Element {
        node(
            NodeKind::PostfixExprAlt,
            vec![node(
                NodeKind::PostfixExpression,
                vec![node(NodeKind::PathExpression(PathTrailer::None), vec![primary])],
            )],
        )
    }

    fn argument(text: &str) -> Element {
        node(
            NodeKind::EnhancedArgumentListElement,
            vec![expression(node(
                NodeKind::LiteralPrimary,
                vec![literal(TokenKind::IntegerLiteral, text)],
            ))],
        )
    }

    fn command(name: &str, arguments: &[&str]) -> Node {
        let mut children = vec![expression(node(
            NodeKind::IdentifierPrimary,
            vec![identifier(name)],
        ))];
        if !arguments.is_empty() {
            let mut list = Vec::new();
            for (i, text) in arguments.iter().enumerate() {
                if i > 0 {
                    list.push(token(TokenKind::Comma, ","));
                }
                list.push(argument(text));
            }
            children.push(node(NodeKind::EnhancedArgumentList, list));
        }
        as_node(node(NodeKind::CommandExpression, children))
    }

    #[test]
    fn test_command_expression() {
        let doc = print(&command("foo", &["1", "2"]));
        assert_eq!(doc.to_flat_string(), "foo 1, 2");
    }

    #[test]
    fn test_command_expression_without_arguments() {
        assert_eq!(print(&command("foo", &[])).to_flat_string(), "foo");
    }

    #[test]
    fn test_argument_list_has_no_trailing_separator() {
        let doc = print(&command("f", &["1"]));
        assert_eq!(doc.to_flat_string(), "f 1");
    }

    #[test]
    fn test_leaves_print_verbatim() {
        let literal = as_node(literal(TokenKind::StringLiteral, "'  spaced  '"));
        assert_eq!(print(&literal), Doc::text("'  spaced  '"));
        let name = as_node(identifier("println"));
        assert_eq!(print(&name), Doc::text("println"));
    }

    #[test]
    fn test_unrecognized_kind_prints_empty() {
        let closure = as_node(node(
            NodeKind::Closure,
            vec![token(TokenKind::LBrace, "{"), token(TokenKind::RBrace, "}")],
        ));
        let doc = print(&closure);
        assert_eq!(doc, Doc::empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_passthrough_without_children_is_empty() {
        let wrapper = as_node(node(NodeKind::PostfixExprAlt, vec![]));
        assert!(print(&wrapper).is_empty());
    }

    #[test]
    fn test_print_with_delegates_children() {
        let unit = command("foo", &["1", "2"]);
        let doc = print_with(&unit, &|child: &Node| Doc::text(child.kind().name()));
        assert_eq!(
            doc.to_flat_string(),
            "PostfixExprAlt EnhancedArgumentList"
        );
    }
}

//! Concrete syntax tree
//!
//!     The tree keeps every grammar-rule layer the parser went through, including the
//!     single-child wrappers (`ExpressionStatement` → `CommandExprAlt` → `CommandExpression`
//!     → `PostfixExprAlt` → ...). The printer and the `is_following_arguments_or_closure`
//!     predicate both depend on that exact nesting, so the parser never collapses layers.
//!
//!     Children are ordered and mix nodes with terminal tokens (separators, keywords,
//!     punctuation). Nodes are immutable once built: fields are private and only readable
//!     through accessors.

use crate::groovy::token::Token;
use serde::Serialize;

/// What a path expression ends with, recorded while parsing its last path element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathTrailer {
    /// A bare primary, no path elements.
    None,
    /// `.name` or `?.name`
    Member,
    /// `(args)`
    Arguments,
    /// `{ ... }`
    Closure,
    /// `[index]`
    Index,
}

/// Grammar-rule alternatives. Closed: the printer matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    CompilationUnit,
    PackageDeclaration,
    QualifiedName,
    Statements,

    // Statement alternatives
    ImportStatement,
    MethodDeclarationStatement,
    LocalVariableDeclarationStatement,
    ReturnStatement,
    ExpressionStatement,

    // Declarations
    ImportDeclaration,
    MethodDeclaration,
    LocalVariableDeclaration,
    Modifiers,
    Type,
    TypeArguments,
    FormalParameters,
    FormalParameter,
    VariableDeclarator,
    Block,

    // Command expressions
    CommandExprAlt,
    CommandExpression,

    // Expression alternatives
    PostfixExprAlt,
    AssignmentExprAlt,

    PostfixExpression,
    PathExpression(PathTrailer),
    PathElement,
    Arguments,

    // Primary alternatives
    IdentifierPrimary,
    LiteralPrimary,
    ParenPrimary,
    ClosurePrimary,
    ListPrimary,

    Closure,
    ExpressionList,
    EnhancedArgumentList,
    EnhancedArgumentListElement,
    ExpressionListElement,

    Identifier,
    Literal,
}

impl NodeKind {
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::ImportStatement
                | NodeKind::MethodDeclarationStatement
                | NodeKind::LocalVariableDeclarationStatement
                | NodeKind::ReturnStatement
                | NodeKind::ExpressionStatement
        )
    }

    /// Short name without payload, used in debug views.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "CompilationUnit",
            NodeKind::PackageDeclaration => "PackageDeclaration",
            NodeKind::QualifiedName => "QualifiedName",
            NodeKind::Statements => "Statements",
            NodeKind::ImportStatement => "ImportStatement",
            NodeKind::MethodDeclarationStatement => "MethodDeclarationStatement",
            NodeKind::LocalVariableDeclarationStatement => "LocalVariableDeclarationStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::ImportDeclaration => "ImportDeclaration",
            NodeKind::MethodDeclaration => "MethodDeclaration",
            NodeKind::LocalVariableDeclaration => "LocalVariableDeclaration",
            NodeKind::Modifiers => "Modifiers",
            NodeKind::Type => "Type",
            NodeKind::TypeArguments => "TypeArguments",
            NodeKind::FormalParameters => "FormalParameters",
            NodeKind::FormalParameter => "FormalParameter",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::Block => "Block",
            NodeKind::CommandExprAlt => "CommandExprAlt",
            NodeKind::CommandExpression => "CommandExpression",
            NodeKind::PostfixExprAlt => "PostfixExprAlt",
            NodeKind::AssignmentExprAlt => "AssignmentExprAlt",
            NodeKind::PostfixExpression => "PostfixExpression",
            NodeKind::PathExpression(_) => "PathExpression",
            NodeKind::PathElement => "PathElement",
            NodeKind::Arguments => "Arguments",
            NodeKind::IdentifierPrimary => "IdentifierPrimary",
            NodeKind::LiteralPrimary => "LiteralPrimary",
            NodeKind::ParenPrimary => "ParenPrimary",
            NodeKind::ClosurePrimary => "ClosurePrimary",
            NodeKind::ListPrimary => "ListPrimary",
            NodeKind::Closure => "Closure",
            NodeKind::ExpressionList => "ExpressionList",
            NodeKind::EnhancedArgumentList => "EnhancedArgumentList",
            NodeKind::EnhancedArgumentListElement => "EnhancedArgumentListElement",
            NodeKind::ExpressionListElement => "ExpressionListElement",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
        }
    }
}

/// A child of a node: either a nested rule or a terminal token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    Node(Node),
    Token(Token),
}

impl Element {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Element::Token(token) => Some(token),
            Element::Node(_) => None,
        }
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

impl From<Token> for Element {
    fn from(token: Token) -> Self {
        Element::Token(token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Element>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Element>) -> Self {
        Node { kind, children }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Child nodes only, skipping terminal tokens.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Element::as_node)
    }

    pub fn first_node(&self) -> Option<&Node> {
        self.child_nodes().next()
    }

    /// The first terminal token directly under this node.
    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(Element::as_token)
    }

    /// All tokens of the subtree in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        collect_tokens(self, &mut tokens);
        tokens
    }

    /// Source text of the subtree, tokens joined by single spaces where the source had
    /// a gap.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut last_end: Option<usize> = None;
        for token in self.tokens() {
            if token.text.is_empty() {
                continue;
            }
            if last_end.is_some_and(|end| token.span.start > end) {
                out.push(' ');
            }
            out.push_str(&token.text);
            last_end = Some(token.span.end);
        }
        out
    }
}

fn collect_tokens<'a>(node: &'a Node, out: &mut Vec<&'a Token>) {
    for child in &node.children {
        match child {
            Element::Node(inner) => collect_tokens(inner, out),
            Element::Token(token) => out.push(token),
        }
    }
}

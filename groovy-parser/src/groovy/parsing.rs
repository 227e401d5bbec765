//! Parser
//!
//!     A recursive-descent parser over a [`TokenStream`]. Every decision is made by looking
//!     ahead with `lt(k)`; the cursor never moves backwards. Where the grammar alone cannot
//!     decide, the parser consults the disambiguation predicates:
//!
//!         statement start   is_invalid_method_declaration, then a declaration shape scan
//!                           is_invalid_local_variable_declaration, then a shape scan
//!         command arguments is_following_arguments_or_closure on the parsed expression
//!
//!     The tree keeps every rule layer, so an identifier statement like `foo 1, 2` comes out
//!     as `ExpressionStatement > CommandExprAlt > CommandExpression > [PostfixExprAlt >
//!     PostfixExpression > PathExpression > IdentifierPrimary > Identifier, EnhancedArgumentList]`.
//!     Separators, keywords and punctuation stay in the tree as token children.
//!
//! Grammar
//!
//!     compilationUnit    := nls (packageDeclaration sep)? statements? EOF
//!     statements         := statement (sep statement)* sep?
//!     statement          := importDeclaration | methodDeclaration
//!                         | localVariableDeclaration | 'return' expression?
//!                         | commandExpression
//!     commandExpression  := expression enhancedArgumentList?
//!     expression         := postfixExpression ('=' expression)?
//!     postfixExpression  := pathExpression ('++' | '--')?
//!     pathExpression     := primary pathElement*
//!     pathElement        := ('.' | '?.') identifier | arguments | closure | '[' expressionList ']'
//!     primary            := identifier | literal | '(' expression ')' | closure | '[' expressionList? ']'

use crate::groovy::cst::{Element, Node, NodeKind, PathTrailer};
use crate::groovy::error::SyntaxError;
use crate::groovy::lexing::tokenize;
use crate::groovy::predicates::{
    is_following_arguments_or_closure, is_invalid_local_variable_declaration,
    is_invalid_method_declaration,
};
use crate::groovy::stream::{TokenLookahead, TokenStream};
use crate::groovy::token::{Token, TokenKind};
use tracing::{debug, trace};

type ParseResult<T> = Result<T, SyntaxError>;

/// Parse Groovy source into a `CompilationUnit` tree.
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    let tokens = tokenize(source)?;
    parse_tokens(tokens)
}

/// Parse an already lexed token list.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, SyntaxError> {
    let count = tokens.len();
    let mut parser = Parser::new(tokens);
    let unit = parser.compilation_unit()?;
    debug!(tokens = count, statements = statement_count(&unit), "parsed compilation unit");
    Ok(unit)
}

fn statement_count(unit: &Node) -> usize {
    unit.child_nodes()
        .filter(|n| n.kind() == NodeKind::Statements)
        .map(|n| n.child_nodes().count())
        .sum()
}

struct Parser {
    tokens: TokenStream,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: TokenStream::new(tokens),
        }
    }

    // Cursor helpers

    fn peek(&self) -> TokenKind {
        self.tokens.kind(1)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.tokens.lt(1).is(kind)
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens.lt(1).clone();
        self.tokens.consume();
        token
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = self.tokens.lt(1);
        SyntaxError::new(
            format!("expected {}, found {}", expected, found),
            found.span.start,
            found.line,
            found.column,
        )
    }

    fn separators(&mut self, children: &mut Vec<Element>) {
        while self.peek().is_separator() {
            children.push(self.bump().into());
        }
    }

    fn can_start_expression(&self) -> bool {
        let kind = self.peek();
        kind.is_identifier()
            || kind.is_literal()
            || matches!(kind, TokenKind::LParen | TokenKind::LBrace | TokenKind::LBrack)
    }

    // Compilation unit and statements

    fn compilation_unit(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        self.separators(&mut children);

        if self.at(TokenKind::Package) {
            children.push(self.package_declaration()?.into());
            if !self.at(TokenKind::Eof) && !self.peek().is_separator() {
                return Err(self.unexpected("newline or ';'"));
            }
            self.separators(&mut children);
        }

        if !self.at(TokenKind::Eof) {
            children.push(self.statements(TokenKind::Eof)?.into());
        }
        children.push(self.expect(TokenKind::Eof)?.into());
        Ok(Node::new(NodeKind::CompilationUnit, children))
    }

    fn package_declaration(&mut self) -> ParseResult<Node> {
        let keyword = self.bump();
        let name = self.qualified_name()?;
        Ok(Node::new(
            NodeKind::PackageDeclaration,
            vec![keyword.into(), name.into()],
        ))
    }

    fn qualified_name(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.identifier()?.into()];
        while self.at(TokenKind::Dot) && self.tokens.kind(2).is_identifier() {
            children.push(self.bump().into());
            children.push(self.identifier()?.into());
        }
        Ok(Node::new(NodeKind::QualifiedName, children))
    }

    /// Statements up to (not including) `end`, with the separators between them.
    fn statements(&mut self, end: TokenKind) -> ParseResult<Node> {
        let mut children = Vec::new();
        loop {
            children.push(self.statement()?.into());
            if self.at(end) {
                break;
            }
            if !self.peek().is_separator() {
                return Err(self.unexpected("newline or ';'"));
            }
            self.separators(&mut children);
            if self.at(end) {
                break;
            }
        }
        Ok(Node::new(NodeKind::Statements, children))
    }

    fn statement(&mut self) -> ParseResult<Node> {
        match self.peek() {
            TokenKind::Import => {
                let declaration = self.import_declaration()?;
                return Ok(Node::new(
                    NodeKind::ImportStatement,
                    vec![declaration.into()],
                ));
            }
            TokenKind::Return => return self.return_statement(),
            _ => {}
        }

        if self.is_method_declaration_ahead() {
            let declaration = self.method_declaration()?;
            return Ok(Node::new(
                NodeKind::MethodDeclarationStatement,
                vec![declaration.into()],
            ));
        }

        if self.is_local_variable_declaration_ahead() {
            let declaration = self.local_variable_declaration()?;
            return Ok(Node::new(
                NodeKind::LocalVariableDeclarationStatement,
                vec![declaration.into()],
            ));
        }

        let command = self.command_expression()?;
        let alt = Node::new(NodeKind::CommandExprAlt, vec![command.into()]);
        Ok(Node::new(NodeKind::ExpressionStatement, vec![alt.into()]))
    }

    fn return_statement(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.bump().into()];
        if self.can_start_expression() {
            children.push(self.expression()?.into());
        }
        Ok(Node::new(NodeKind::ReturnStatement, children))
    }

    fn import_declaration(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.bump().into()];
        if self.at(TokenKind::Static) {
            children.push(self.bump().into());
        }
        children.push(self.qualified_name()?.into());
        if self.at(TokenKind::Dot) && self.tokens.kind(2) == TokenKind::Mul {
            children.push(self.bump().into());
            children.push(self.bump().into());
        } else if self.at(TokenKind::As) {
            children.push(self.bump().into());
            children.push(self.identifier()?.into());
        }
        Ok(Node::new(NodeKind::ImportDeclaration, children))
    }

    // Declaration lookahead

    fn is_method_declaration_ahead(&self) -> bool {
        let invalid = is_invalid_method_declaration(&self.tokens);
        trace!(
            predicate = "is_invalid_method_declaration",
            result = invalid,
            at = %self.tokens.lt(1),
            "statement lookahead"
        );
        !invalid && self.scan_method_declaration()
    }

    fn is_local_variable_declaration_ahead(&self) -> bool {
        let invalid = is_invalid_local_variable_declaration(&self.tokens);
        trace!(
            predicate = "is_invalid_local_variable_declaration",
            result = invalid,
            at = %self.tokens.lt(1),
            "statement lookahead"
        );
        !invalid && self.scan_local_variable_declaration()
    }

    /// `modifiers* type? name '(' ... ')' '{'`, with a type or at least one modifier.
    fn scan_method_declaration(&self) -> bool {
        let (start, modifiers) = self.scan_modifiers(1);
        let name = match self.scan_type(start) {
            Some(after) if self.is_method_name(after) && self.kind(after + 1) == TokenKind::LParen => {
                after
            }
            _ if modifiers > 0
                && self.is_method_name(start)
                && self.kind(start + 1) == TokenKind::LParen =>
            {
                start
            }
            _ => return false,
        };

        let mut depth = 0usize;
        let mut k = name + 1;
        loop {
            match self.kind(k) {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.kind(k + 1) == TokenKind::LBrace;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            k += 1;
        }
    }

    /// `modifiers* type? name` followed by `=`, `,` or the end of the statement, with a type
    /// or at least one modifier.
    fn scan_local_variable_declaration(&self) -> bool {
        let (start, modifiers) = self.scan_modifiers(1);
        if let Some(after) = self.scan_type(start) {
            if self.kind(after).is_identifier() && self.ends_declarator_name(after + 1) {
                return true;
            }
        }
        modifiers > 0 && self.kind(start).is_identifier() && self.ends_declarator_name(start + 1)
    }

    fn kind(&self, k: usize) -> TokenKind {
        self.tokens.kind(k)
    }

    fn scan_modifiers(&self, start: usize) -> (usize, usize) {
        let mut k = start;
        while self.kind(k).is_modifier() {
            k += 1;
        }
        (k, k - start)
    }

    fn is_method_name(&self, k: usize) -> bool {
        self.kind(k).is_identifier() || self.kind(k) == TokenKind::StringLiteral
    }

    fn ends_declarator_name(&self, k: usize) -> bool {
        matches!(
            self.kind(k),
            TokenKind::Assign
                | TokenKind::Comma
                | TokenKind::Nl
                | TokenKind::Semi
                | TokenKind::RBrace
                | TokenKind::Eof
        )
    }

    /// Position just past a type starting at `start`, if one is there.
    fn scan_type(&self, start: usize) -> Option<usize> {
        let mut k = start;
        let kind = self.kind(k);
        if kind.is_primitive_type() {
            k += 1;
        } else if kind.is_identifier() {
            k += 1;
            while self.kind(k) == TokenKind::Dot && self.kind(k + 1).is_identifier() {
                k += 2;
            }
            if self.kind(k) == TokenKind::Lt {
                k = self.scan_type_arguments(k)?;
            }
        } else {
            return None;
        }
        while self.kind(k) == TokenKind::LBrack && self.kind(k + 1) == TokenKind::RBrack {
            k += 2;
        }
        Some(k)
    }

    fn scan_type_arguments(&self, open: usize) -> Option<usize> {
        let mut k = open + 1;
        loop {
            k = self.scan_type(k)?;
            match self.kind(k) {
                TokenKind::Comma => k += 1,
                TokenKind::Gt => return Some(k + 1),
                _ => return None,
            }
        }
    }

    /// `{ a, b -> ...`: identifiers (optionally typed) separated by commas, then `->`.
    fn scan_closure_parameters(&self) -> bool {
        if self.at(TokenKind::Arrow) {
            return true;
        }
        let mut k = 1;
        loop {
            let Some(after) = self.scan_type(k) else {
                return false;
            };
            k = if self.kind(after).is_identifier() {
                after + 1
            } else {
                after
            };
            match self.kind(k) {
                TokenKind::Comma => k += 1,
                TokenKind::Arrow => return true,
                _ => return false,
            }
        }
    }

    // Declarations

    fn modifiers(&mut self) -> Option<Node> {
        let mut children = Vec::new();
        while self.peek().is_modifier() {
            children.push(self.bump().into());
        }
        (!children.is_empty()).then(|| Node::new(NodeKind::Modifiers, children))
    }

    fn method_declaration(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        if let Some(modifiers) = self.modifiers() {
            children.push(modifiers.into());
        }
        let typed = self
            .scan_type(1)
            .is_some_and(|after| self.is_method_name(after) && self.kind(after + 1) == TokenKind::LParen);
        if typed {
            children.push(self.type_()?.into());
        }
        children.push(self.method_name()?.into());
        children.push(self.formal_parameters()?.into());
        children.push(self.block()?.into());
        Ok(Node::new(NodeKind::MethodDeclaration, children))
    }

    fn method_name(&mut self) -> ParseResult<Node> {
        if self.at(TokenKind::StringLiteral) {
            let token = self.bump();
            return Ok(Node::new(NodeKind::Literal, vec![token.into()]));
        }
        self.identifier()
    }

    fn formal_parameters(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        if !self.at(TokenKind::RParen) {
            children.push(self.formal_parameter()?.into());
            while self.at(TokenKind::Comma) {
                children.push(self.bump().into());
                children.push(self.formal_parameter()?.into());
            }
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(Node::new(NodeKind::FormalParameters, children))
    }

    fn formal_parameter(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        if let Some(modifiers) = self.modifiers() {
            children.push(modifiers.into());
        }
        let typed = self
            .scan_type(1)
            .is_some_and(|after| self.kind(after).is_identifier());
        if typed {
            children.push(self.type_()?.into());
        }
        children.push(self.identifier()?.into());
        if self.at(TokenKind::Assign) {
            children.push(self.bump().into());
            children.push(self.expression()?.into());
        }
        Ok(Node::new(NodeKind::FormalParameter, children))
    }

    fn local_variable_declaration(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        if let Some(modifiers) = self.modifiers() {
            children.push(modifiers.into());
        }
        let typed = self
            .scan_type(1)
            .is_some_and(|after| self.kind(after).is_identifier());
        if typed {
            children.push(self.type_()?.into());
        }
        children.push(self.variable_declarator()?.into());
        while self.at(TokenKind::Comma) {
            children.push(self.bump().into());
            children.push(self.variable_declarator()?.into());
        }
        Ok(Node::new(NodeKind::LocalVariableDeclaration, children))
    }

    fn variable_declarator(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.identifier()?.into()];
        if self.at(TokenKind::Assign) {
            children.push(self.bump().into());
            children.push(self.expression()?.into());
        }
        Ok(Node::new(NodeKind::VariableDeclarator, children))
    }

    fn type_(&mut self) -> ParseResult<Node> {
        let mut children = Vec::new();
        if self.peek().is_primitive_type() {
            children.push(self.bump().into());
        } else {
            children.push(self.identifier_token()?.into());
            while self.at(TokenKind::Dot) && self.kind(2).is_identifier() {
                children.push(self.bump().into());
                children.push(self.bump().into());
            }
            if self.at(TokenKind::Lt) {
                children.push(self.type_arguments()?.into());
            }
        }
        while self.at(TokenKind::LBrack) && self.kind(2) == TokenKind::RBrack {
            children.push(self.bump().into());
            children.push(self.bump().into());
        }
        Ok(Node::new(NodeKind::Type, children))
    }

    fn type_arguments(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.expect(TokenKind::Lt)?.into()];
        children.push(self.type_()?.into());
        while self.at(TokenKind::Comma) {
            children.push(self.bump().into());
            children.push(self.type_()?.into());
        }
        children.push(self.expect(TokenKind::Gt)?.into());
        Ok(Node::new(NodeKind::TypeArguments, children))
    }

    fn block(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.expect(TokenKind::LBrace)?.into()];
        self.separators(&mut children);
        if !self.at(TokenKind::RBrace) {
            children.push(self.statements(TokenKind::RBrace)?.into());
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(Node::new(NodeKind::Block, children))
    }

    // Expressions

    fn command_expression(&mut self) -> ParseResult<Node> {
        let expression = self.expression()?;
        let mut children = Vec::new();
        if self.can_start_expression() {
            let follows = is_following_arguments_or_closure(&expression);
            trace!(
                predicate = "is_following_arguments_or_closure",
                result = follows,
                at = %self.tokens.lt(1),
                "command arguments lookahead"
            );
            children.push(expression.into());
            if !follows {
                children.push(self.enhanced_argument_list()?.into());
            }
        } else {
            children.push(expression.into());
        }
        Ok(Node::new(NodeKind::CommandExpression, children))
    }

    fn expression(&mut self) -> ParseResult<Node> {
        let postfix = self.postfix_expression()?;
        if self.at(TokenKind::Assign) {
            let assign = self.bump();
            let right = self.expression()?;
            return Ok(Node::new(
                NodeKind::AssignmentExprAlt,
                vec![postfix.into(), assign.into(), right.into()],
            ));
        }
        Ok(Node::new(NodeKind::PostfixExprAlt, vec![postfix.into()]))
    }

    fn postfix_expression(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.path_expression()?.into()];
        if matches!(self.peek(), TokenKind::Inc | TokenKind::Dec) {
            children.push(self.bump().into());
        }
        Ok(Node::new(NodeKind::PostfixExpression, children))
    }

    fn path_expression(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.primary()?.into()];
        let mut trailer = PathTrailer::None;
        loop {
            let element = match self.peek() {
                kind if kind.is_member_access() && self.kind(2).is_identifier() => {
                    trailer = PathTrailer::Member;
                    vec![self.bump().into(), self.identifier()?.into()]
                }
                TokenKind::LParen => {
                    trailer = PathTrailer::Arguments;
                    vec![self.arguments()?.into()]
                }
                TokenKind::LBrace => {
                    trailer = PathTrailer::Closure;
                    vec![self.closure()?.into()]
                }
                TokenKind::LBrack => {
                    trailer = PathTrailer::Index;
                    let open = self.bump();
                    let list = self.expression_list()?;
                    let close = self.expect(TokenKind::RBrack)?;
                    vec![open.into(), list.into(), close.into()]
                }
                _ => break,
            };
            children.push(Node::new(NodeKind::PathElement, element).into());
        }
        Ok(Node::new(NodeKind::PathExpression(trailer), children))
    }

    fn arguments(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.expect(TokenKind::LParen)?.into()];
        if !self.at(TokenKind::RParen) {
            children.push(self.enhanced_argument_list()?.into());
        }
        children.push(self.expect(TokenKind::RParen)?.into());
        Ok(Node::new(NodeKind::Arguments, children))
    }

    fn enhanced_argument_list(&mut self) -> ParseResult<Node> {
        let element = |parser: &mut Parser| -> ParseResult<Element> {
            let expression = parser.expression()?;
            Ok(Node::new(NodeKind::EnhancedArgumentListElement, vec![expression.into()]).into())
        };
        let mut children = vec![element(self)?];
        while self.at(TokenKind::Comma) {
            children.push(self.bump().into());
            children.push(element(self)?);
        }
        Ok(Node::new(NodeKind::EnhancedArgumentList, children))
    }

    fn expression_list(&mut self) -> ParseResult<Node> {
        let element = |parser: &mut Parser| -> ParseResult<Element> {
            let expression = parser.expression()?;
            Ok(Node::new(NodeKind::ExpressionListElement, vec![expression.into()]).into())
        };
        let mut children = vec![element(self)?];
        while self.at(TokenKind::Comma) {
            children.push(self.bump().into());
            children.push(element(self)?);
        }
        Ok(Node::new(NodeKind::ExpressionList, children))
    }

    fn primary(&mut self) -> ParseResult<Node> {
        let kind = self.peek();
        if kind.is_identifier() {
            let identifier = self.identifier()?;
            return Ok(Node::new(NodeKind::IdentifierPrimary, vec![identifier.into()]));
        }
        if kind.is_literal() {
            let literal = Node::new(NodeKind::Literal, vec![self.bump().into()]);
            return Ok(Node::new(NodeKind::LiteralPrimary, vec![literal.into()]));
        }
        match kind {
            TokenKind::LParen => {
                let open = self.bump();
                let inner = self.expression()?;
                let close = self.expect(TokenKind::RParen)?;
                Ok(Node::new(
                    NodeKind::ParenPrimary,
                    vec![open.into(), inner.into(), close.into()],
                ))
            }
            TokenKind::LBrace => {
                let closure = self.closure()?;
                Ok(Node::new(NodeKind::ClosurePrimary, vec![closure.into()]))
            }
            TokenKind::LBrack => {
                let mut children = vec![self.bump().into()];
                if !self.at(TokenKind::RBrack) {
                    children.push(self.expression_list()?.into());
                }
                children.push(self.expect(TokenKind::RBrack)?.into());
                Ok(Node::new(NodeKind::ListPrimary, children))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn closure(&mut self) -> ParseResult<Node> {
        let mut children = vec![self.expect(TokenKind::LBrace)?.into()];
        self.separators(&mut children);
        if self.scan_closure_parameters() {
            while !self.at(TokenKind::Arrow) {
                children.push(self.formal_parameter()?.into());
                if self.at(TokenKind::Comma) {
                    children.push(self.bump().into());
                }
            }
            children.push(self.bump().into());
            self.separators(&mut children);
        }
        if !self.at(TokenKind::RBrace) {
            children.push(self.statements(TokenKind::RBrace)?.into());
        }
        children.push(self.expect(TokenKind::RBrace)?.into());
        Ok(Node::new(NodeKind::Closure, children))
    }

    fn identifier_token(&mut self) -> ParseResult<Token> {
        if self.peek().is_identifier() {
            Ok(self.bump())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn identifier(&mut self) -> ParseResult<Node> {
        let token = self.identifier_token()?;
        Ok(Node::new(NodeKind::Identifier, vec![token.into()]))
    }
}

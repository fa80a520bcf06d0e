//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Declarations and statements are dispatched through lookup tables keyed by
//! their leading token; expressions use NUD/LED handlers with binding powers.
//!
//! It maintains lookup tables for:
//! - Declaration handlers
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_declaration,
};

/// Deepest nesting of statements and expressions accepted before the parse
/// fails with `NestingTooDeep`. Keeps recursion well inside a default thread
/// stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the current position in it and the handler
/// tables. The stream always ends with an `EOF` token and the position
/// never moves past it.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Number of nested statements and expressions currently being parsed
    depth: usize,
    /// Lookup table for declaration parsing handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended if the stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let span = match tokens.last() {
                Some(token) => token.span.clone(),
                None => Span {
                    start: Position::null(),
                    end: Position::null(),
                },
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token before the current one, if any.
    pub fn previous_token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|index| &self.tokens[index])
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// Stays on `EOF` once it is reached.
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if current + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Builds an `UnexpectedToken` error for the current token.
    pub fn unexpected_token(&self, expected: Vec<TokenKind>) -> Error {
        let token = self.current_token();
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                kind: token.kind,
                token: token.value.clone(),
                expected,
            },
            token.span.start.clone(),
        );

        debug!("syntax error: {}", error);
        error
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns
    /// `error` or, when none is given, an `UnexpectedToken` error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(error.unwrap_or_else(|| self.unexpected_token(vec![expected_kind])));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Binding powers belong to the infix role only, so a token such as `-`
    /// can be both a prefix and an infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Runs `parse_fn` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` at the current token instead of recursing
    /// past `MAX_NESTING_DEPTH`.
    pub fn nested<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            let error = Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            );
            debug!("syntax error: {}", error);
            return Err(error);
        }

        self.depth += 1;
        let result = parse_fn(self);
        self.depth -= 1;

        result
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses declarations until EOF. The
/// first error aborts the parse; no partial tree is returned.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Error> {
    info!("parsing {} tokens", tokens.len());

    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut declarations = vec![];

    while parser.has_tokens() {
        declarations.push(parse_declaration(&mut parser)?);
    }

    info!("parsed {} top-level declarations", declarations.len());
    Ok(Program { declarations })
}

use log::{debug, trace};

use crate::{
    ast::{
        ast::{Declaration, Expr, Identifier, Stmt},
        statements::{
            BlockStmt, ClassDecl, ExpressionStmt, FunctionDecl, IfStmt, MethodDecl, PrintStmt,
            ReturnStmt, VarDecl, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses a class, function or variable declaration, falling back to a
/// statement for any other leading token.
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    let kind = parser.current_token_kind();
    trace!("declaration starting with {}", kind);

    if let Some(decl_fn) = parser.get_decl_lookup().get(&kind).copied() {
        return decl_fn(parser);
    }

    Ok(Declaration::Stmt(parse_stmt(parser)?))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(|parser| {
        if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
            return stmt_fn(parser);
        }

        parse_expression_stmt(parser)
    })
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

/// Expects an identifier, explaining what the name was for when it is missing.
fn expect_name(parser: &mut Parser, context: &str) -> Result<Identifier, Error> {
    let token = parser.current_token();
    let message = if token.kind.is_reserved() {
        format!("expected {}, `{}` is a reserved word", context, token.value)
    } else {
        format!("expected {}", context)
    };
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: token.value.clone(),
            message,
        },
        token.span.start.clone(),
    );

    Ok(parser.expect_error(TokenKind::Identifier, Some(error))?.value)
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<Declaration, Error> {
    parser.advance();

    let name = expect_name(parser, "identifier during variable declaration")?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Declaration::Var(VarDecl { name, initializer }))
}

/// Parses `( params ) { body }`, shared by functions and methods.
fn parse_callable(parser: &mut Parser) -> Result<(Vec<Identifier>, BlockStmt), Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params: Vec<Identifier> = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let position = parser.get_position();
            let name = expect_name(parser, "parameter name")?;

            if params.contains(&name) {
                return Err(Error::new(
                    ErrorImpl::DuplicateParameter { parameter: name },
                    position,
                ));
            }
            params.push(name);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok((params, body))
}

pub fn parse_fn_decl(parser: &mut Parser) -> Result<Declaration, Error> {
    parser.advance();

    let name = expect_name(parser, "function name")?;
    let (params, body) = parse_callable(parser)?;

    Ok(Declaration::Function(FunctionDecl { name, params, body }))
}

/// Methods are written without the `fun` keyword.
fn parse_method_decl(parser: &mut Parser) -> Result<MethodDecl, Error> {
    let name = expect_name(parser, "method name")?;
    let (params, body) = parse_callable(parser)?;

    Ok(MethodDecl { name, params, body })
}

pub fn parse_class_decl(parser: &mut Parser) -> Result<Declaration, Error> {
    parser.advance();

    let name = expect_name(parser, "class name")?;

    let superclass = if parser.current_token_kind() == TokenKind::Less {
        parser.advance();
        Some(expect_name(parser, "superclass name")?)
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly)?;

    let mut methods = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        methods.push(parse_method_decl(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Declaration::Class(ClassDecl {
        name,
        superclass,
        methods,
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let expression = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt { expression }))
}

fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

/// The `else` is claimed by the innermost `if` that is still open, since the
/// nested `if` checks for it before returning to its parent.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_condition(parser)?;
    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_stmt(parser)?
    } else {
        Stmt::Block(BlockStmt::default())
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_condition(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let initializer = match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            None
        }
        TokenKind::Var => Some(parse_var_decl(parser)?),
        _ => Some(Declaration::Stmt(parse_expression_stmt(parser)?)),
    };

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let increment = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(desugar_for(initializer, condition, increment, body))
}

/// Rewrites a `for` loop into
/// `{ initializer; while (condition) { body; increment; } }`.
///
/// A missing condition becomes `true`; a missing initializer or increment
/// is simply left out of its block.
pub fn desugar_for(
    initializer: Option<Declaration>,
    condition: Option<Expr>,
    increment: Option<Expr>,
    body: Stmt,
) -> Stmt {
    let mut loop_body = vec![Declaration::Stmt(body)];
    if let Some(increment) = increment {
        loop_body.push(Declaration::Stmt(Stmt::from(increment)));
    }

    let while_loop = Stmt::While(WhileStmt {
        condition: condition.unwrap_or(Expr::Bool(true)),
        body: Box::new(Stmt::Block(BlockStmt::new(loop_body))),
    });

    let mut outer = Vec::new();
    outer.extend(initializer);
    outer.push(Declaration::Stmt(while_loop));

    let desugared = Stmt::Block(BlockStmt::new(outer));
    debug!("desugared for loop into {}", desugared);
    desugared
}

/// Parses `{ declaration* }`. Also the body of every function and method,
/// so nested declarations count towards the nesting limit here.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.nested(parse_block_body)
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut declarations = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        declarations.push(parse_declaration(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt::new(declarations))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt { value }))
}

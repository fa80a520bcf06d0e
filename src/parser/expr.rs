use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, GetAttrExpr, LogicalExpr,
            SetAttrExpr, SuperGetAttrExpr, UnaryExpr, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| parse_expr_at(parser, bp))
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    kind: token_kind,
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than the caller, keep extending lhs
    while let Some(&token_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()) {
        if token_bp <= bp {
            break;
        }

        let led_fn = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected_token(vec![])),
        };

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let expr = match token.kind {
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(value) => Expr::Number(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => Expr::String(token.value),
        TokenKind::Identifier => Expr::Var(token.value),
        TokenKind::True => Expr::Bool(true),
        TokenKind::False => Expr::Bool(false),
        TokenKind::Nil => Expr::Nil,
        TokenKind::This => Expr::This,
        _ => {
            return Err(parser.unexpected_token(vec![
                TokenKind::Number,
                TokenKind::String,
                TokenKind::Identifier,
            ]))
        }
    };

    parser.advance();
    Ok(expr)
}

/// Left-associative binary operators: the right operand is parsed at the
/// operator's own binding power, so an equal operator ends it.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_kind = parser.current_token_kind();
    let operator = match BinaryOperator::from_token_kind(operator_kind) {
        Some(operator) => operator,
        None => return Err(parser.unexpected_token(vec![])),
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_logical_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let make_expr: fn(LogicalExpr) -> Expr = match parser.current_token_kind() {
        TokenKind::And => Expr::And,
        TokenKind::Or => Expr::Or,
        _ => return Err(parser.unexpected_token(vec![TokenKind::And, TokenKind::Or])),
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(make_expr(LogicalExpr {
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// Prefix `-` and `!`. The operand is parsed at unary power, so operators
/// stack (`!!x`) while calls and attribute accesses stay inside the operand.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = match UnaryOperator::from_token_kind(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(parser.unexpected_token(vec![TokenKind::Dash, TokenKind::Not])),
    };
    parser.advance();

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        operand: Box::new(operand),
    }))
}

/// Right-associative assignment. Only a variable or an attribute access may
/// appear on the left, written directly before the `=`; a parenthesized
/// target such as `(a) = 1` is rejected even though grouping leaves no node.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let ends_with_name = parser.previous_token().map(|token| token.kind) == Some(TokenKind::Identifier);
    let operator_position = parser.advance().span.start.clone();
    let value = Box::new(parse_expr(parser, BindingPower::Default)?);

    match left {
        Expr::Var(target) if ends_with_name => Ok(Expr::Assign(AssignmentExpr { target, value })),
        Expr::GetAttr(GetAttrExpr { object, name }) if ends_with_name => {
            Ok(Expr::SetAttr(SetAttrExpr { object, name, value }))
        }
        target => Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                target: target.to_string(),
            },
            operator_position,
        )),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(Expr::GetAttr(GetAttrExpr {
        object: Box::new(left),
        name,
    }))
}

/// `super` is only valid as `super.name`.
pub fn parse_super_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    parser.expect(TokenKind::Dot)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    Ok(Expr::SuperGetAttr(SuperGetAttrExpr { name }))
}

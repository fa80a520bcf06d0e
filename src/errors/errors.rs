use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// Phase that rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    SyntaxError,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::UnterminatedString { .. }
            | ErrorImpl::SourceTooLarge { .. } => ErrorKind::LexError,
            _ => ErrorKind::SyntaxError,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, numbers cannot have leading zeros or run into names",
                token
            )),
            ErrorImpl::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("String is missing its closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { token, expected, .. } => match expected.as_slice() {
                [TokenKind::Semicolon] => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    token
                )),
                [] => ErrorTip::Suggestion(format!("Unexpected token: `{}`", token)),
                _ => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, expected one of {}",
                    token,
                    expected
                        .iter()
                        .map(|kind| kind.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )),
            },
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedExpression { token, .. } => {
                ErrorTip::Suggestion(format!("Expected an expression, found `{}`", token))
            }
            ErrorImpl::InvalidAssignmentTarget { target } => ErrorTip::Suggestion(format!(
                "Cannot assign to `{}`, only variables and attributes can be assigned",
                target
            )),
            ErrorImpl::DuplicateParameter { parameter } => {
                ErrorTip::Suggestion(format!("Parameter `{}` is declared twice", parameter))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::SourceTooLarge { .. } => {
                ErrorTip::Suggestion(String::from("Split the source into smaller files"))
            }
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting is limited to {} levels, move inner parts into functions or variables",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("unterminated string: {token:?}")]
    UnterminatedString { token: String },
    #[error("unexpected token {kind}: {token:?}")]
    UnexpectedToken {
        kind: TokenKind,
        token: String,
        expected: Vec<TokenKind>,
    },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected expression, found {kind}: {token:?}")]
    ExpectedExpression { kind: TokenKind, token: String },
    #[error("invalid assignment target: {target}")]
    InvalidAssignmentTarget { target: String },
    #[error("duplicate parameter {parameter:?}")]
    DuplicateParameter { parameter: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("source of {size} bytes is too large")]
    SourceTooLarge { size: usize },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::{ast::ast::Program, errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a source, tagged with the source name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (offset {})", self.1, self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes and parses a whole program.
///
/// `file` names the source in every reported position and defaults to
/// `<input>` when absent.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    let tokens = tokenize(String::from(source), file)?;
    parse(tokens)
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text (including its newline) and
/// the offset of `position` within that line, or `None` when the offset lies
/// past the end of the source.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= source.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

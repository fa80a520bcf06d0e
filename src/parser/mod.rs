//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with operator
//! precedence encoded as binding powers, and handles:
//!
//! - Declaration parsing (classes, functions, variables)
//! - Statement parsing (control flow, blocks, print, return)
//! - `for` loop desugaring into `while`
//! - Expression parsing (assignment, logic, binary ops, calls, attributes)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;

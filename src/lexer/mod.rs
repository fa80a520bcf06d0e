//! Lexical analysis for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization through an ordered table of regex patterns
//! - Keywords outranking identifiers, literals and operators
//! - Token position tracking for error reporting
//! - Skipping comments and whitespace before the grammar sees them

pub mod lexer;
pub mod tokens;

//! Error types for the front end.
//!
//! - Error structures with source position information
//! - Lexical and syntactic error variants
//! - Tips that callers can use when presenting an error

pub mod errors;

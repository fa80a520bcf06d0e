//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a token whose text never varies.
///
/// The generated handler emits a token of the given kind spanning the literal
/// text and advances the lexer past it.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal text of the token
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("\\A\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _len: usize| -> Result<Option<Token>, Error> {
            let token = MK_TOKEN!($kind, String::from($value), lexer.span($value.len()));
            lexer.advance_n($value.len());
            Ok(Some(token))
        }
    };
}

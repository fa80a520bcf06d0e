use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Source name used when the caller does not provide one.
pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Largest source whose byte offsets fit in a `Position`.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Consumes `len` bytes of a pattern match, returning the token it produced
/// or `None` for skipped text.
pub type RegexHandler = fn(&mut Lexer, usize) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Ordered pattern table. Earlier entries win, so keywords are tried
    /// before identifiers and two-character operators before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("\\A\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\\A//[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(&keyword_pattern()).unwrap(), handler: keyword_handler },
        RegexPattern { regex: Regex::new("\\A[a-zA-Z_]\\w*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("\\A(?:0|[1-9][0-9]*)(?:\\.[0-9]+)?\\b").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\A[0-9][\\w.]*").unwrap(), handler: malformed_number_handler },
        RegexPattern { regex: Regex::new("\\A\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("\\A\"[^\"]*").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new("\\A==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("\\A!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("\\A<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("\\A>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("\\A!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("\\A=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("\\A<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("\\A>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("\\A\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\A\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\A\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\A\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("\\A,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("\\A\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("\\A;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("\\A\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("\\A-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("\\A\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("\\A/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
    ];
}

fn keyword_pattern() -> String {
    let mut keywords = RESERVED_LOOKUP.keys().copied().collect::<Vec<&str>>();
    keywords.sort_unstable();
    format!("\\A(?:{})\\b", keywords.join("|"))
}

/// Lazy token stream over a single source.
///
/// Yields every token followed by a final `EOF` token. The stream stops after
/// the first error and cannot be rewound; lex the source again instead.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Arc<String>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Arc::new(file.unwrap_or_else(|| String::from(DEFAULT_SOURCE_NAME)));

        Lexer {
            source,
            pos: 0,
            file: file_name,
            finished: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Position of the next unread byte.
    ///
    /// Offsets fit in a `u32` because `next` refuses sources longer than
    /// `MAX_SOURCE_LEN` before producing any token.
    pub fn current_position(&self) -> Position {
        Position(self.pos as u32, Arc::clone(&self.file))
    }

    /// Span of the next `len` bytes.
    pub fn span(&self, len: usize) -> Span {
        Span {
            start: self.current_position(),
            end: Position((self.pos + len) as u32, Arc::clone(&self.file)),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(self.remainder())
                .map(|found| (pattern.handler, found.end()))
        });

        match matched {
            Some((handler, len)) => handler(self, len),
            None => {
                let token = self.remainder().chars().next().map(String::from).unwrap_or_default();
                Err(Error::new(ErrorImpl::UnrecognisedToken { token }, self.current_position()))
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Err(error) = check_source_len(self.source.len(), &self.file) {
            debug!("lexing {} refused: {}", self.file, error);
            self.finished = true;
            return Some(Err(error));
        }

        while !self.at_eof() {
            match self.next_token() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(error) => {
                    debug!("lexing {} stopped: {}", self.file, error);
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }

        self.finished = true;
        Some(Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span(0))))
    }
}

/// Rejects sources whose offsets would not fit in a `Position`.
pub fn check_source_len(len: usize, file: &Arc<String>) -> Result<(), Error> {
    if len > MAX_SOURCE_LEN {
        return Err(Error::new(
            ErrorImpl::SourceTooLarge { size: len },
            Position(0, Arc::clone(file)),
        ));
    }

    Ok(())
}

fn skip_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    lexer.advance_n(len);
    Ok(None)
}

fn keyword_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let value = String::from(&lexer.remainder()[..len]);
    let kind = RESERVED_LOOKUP.get(value.as_str()).copied().unwrap_or(TokenKind::Identifier);
    let token = MK_TOKEN!(kind, value, lexer.span(len));

    lexer.advance_n(len);
    Ok(Some(token))
}

fn symbol_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let value = String::from(&lexer.remainder()[..len]);
    let token = MK_TOKEN!(TokenKind::Identifier, value, lexer.span(len));

    lexer.advance_n(len);
    Ok(Some(token))
}

fn number_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let value = String::from(&lexer.remainder()[..len]);
    let token = MK_TOKEN!(TokenKind::Number, value, lexer.span(len));

    lexer.advance_n(len);
    Ok(Some(token))
}

// Reached only when the well-formed number pattern failed: a leading zero
// followed by more digits, or digits running into an identifier.
fn malformed_number_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let token = String::from(&lexer.remainder()[..len]);
    Err(Error::new(ErrorImpl::MalformedNumber { token }, lexer.current_position()))
}

fn string_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    // No escape processing; the value is the text between the quotes.
    let value = String::from(&lexer.remainder()[1..len - 1]);
    let token = MK_TOKEN!(TokenKind::String, value, lexer.span(len));

    lexer.advance_n(len);
    Ok(Some(token))
}

fn unterminated_string_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let token = String::from(&lexer.remainder()[..len]);
    Err(Error::new(ErrorImpl::UnterminatedString { token }, lexer.current_position()))
}

/// Tokenizes a whole source, ending with an `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let lexer = Lexer::new(source, file);
    let file_name = Arc::clone(&lexer.file);
    let tokens = lexer.collect::<Result<Vec<Token>, Error>>()?;

    debug!("tokenized {} tokens from {}", tokens.len(), file_name);
    Ok(tokens)
}

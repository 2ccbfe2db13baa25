//! Lexer module - source text to token stream

mod token;

pub use token::*;

#[cfg(test)]
mod tests;

use crate::error::{LexResult, LexerError};
use std::io::Read;

/// One indent level is exactly two leading spaces.
const SPACES_PER_INDENT: usize = 2;

/// Tokenizer for the language.
///
/// Construction consumes the whole input and materializes the token vector;
/// the parser then walks it through the cursor methods. The stream always
/// terminates with `Eof`, preceded by `Newline` unless the input was empty,
/// and every `Indent` is balanced by a `Dedent`.
pub struct Lexer {
    tokens: Vec<Token>,
    pos: usize,
}

impl Lexer {
    /// Tokenize a full source text.
    pub fn new(source: &str) -> LexResult<Self> {
        let tokens = Scanner::new(source.as_bytes()).scan()?;
        Ok(Self { tokens, pos: 0 })
    }

    /// Tokenize everything a reader yields.
    pub fn from_reader(mut input: impl Read) -> LexResult<Self> {
        let mut source = String::new();
        input.read_to_string(&mut source)?;
        Self::new(&source)
    }

    /// The full token stream.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// The token under the cursor.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Advance the cursor and return the new current token. Once the cursor
    /// reaches the final `Eof` it stays there.
    pub fn next_token(&mut self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[self.pos]
    }

    /// Assert that the current token equals `expected`.
    pub fn expect(&self, expected: &Token) -> LexResult<()> {
        let found = self.current_token();
        if found == expected {
            Ok(())
        } else {
            Err(unexpected(&expected.to_string(), found))
        }
    }

    /// Advance, then assert that the new current token equals `expected`.
    pub fn expect_next(&mut self, expected: &Token) -> LexResult<()> {
        self.next_token();
        self.expect(expected)
    }

    /// Assert that the current token is an identifier and return its name.
    pub fn expect_id(&self) -> LexResult<&str> {
        match self.current_token() {
            Token::Id(name) => Ok(name),
            other => Err(unexpected("Id", other)),
        }
    }

    pub fn expect_next_id(&mut self) -> LexResult<&str> {
        self.next_token();
        self.expect_id()
    }

    /// Assert that the current token is a number literal and return its value.
    pub fn expect_number(&self) -> LexResult<i64> {
        match self.current_token() {
            Token::Number(value) => Ok(*value),
            other => Err(unexpected("Number", other)),
        }
    }

    pub fn expect_next_number(&mut self) -> LexResult<i64> {
        self.next_token();
        self.expect_number()
    }

    /// Assert that the current token is a string literal and return its contents.
    pub fn expect_string(&self) -> LexResult<&str> {
        match self.current_token() {
            Token::String(value) => Ok(value),
            other => Err(unexpected("String", other)),
        }
    }

    pub fn expect_next_string(&mut self) -> LexResult<&str> {
        self.next_token();
        self.expect_string()
    }
}

fn unexpected(expected: &str, found: &Token) -> LexerError {
    LexerError::UnexpectedToken {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Single pass over the raw source bytes.
struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    indent_depth: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            tokens: Vec::new(),
            indent_depth: 0,
        }
    }

    fn scan(mut self) -> LexResult<Vec<Token>> {
        // Leading spaces on the very first line carry no block structure.
        self.skip_spaces();
        while let Some(b) = self.peek() {
            match b {
                b'\n' => {
                    self.pos += 1;
                    self.push_newline();
                    self.line_start();
                }
                b'\'' | b'"' => self.string_literal()?,
                b'#' => self.skip_comment(),
                b' ' => self.skip_spaces(),
                _ if b == b'_' || b.is_ascii_alphabetic() => self.word(),
                _ if b.is_ascii_digit() => self.number()?,
                _ if b.is_ascii_punctuation() => self.operator(),
                other => return Err(LexerError::UnexpectedCharacter(other as char)),
            }
        }
        Ok(self.finish())
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn count_spaces(&mut self) -> usize {
        let start = self.pos;
        self.skip_spaces();
        self.pos - start
    }

    /// Comment runs to the end of the line; the newline itself is left for
    /// line handling.
    fn skip_comment(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.pos += 1;
        }
    }

    /// Blank lines collapse: a `Newline` is emitted only when the previous
    /// token is not already one.
    fn push_newline(&mut self) {
        if !matches!(self.tokens.last(), None | Some(Token::Newline)) {
            self.tokens.push(Token::Newline);
        }
    }

    /// Indentation bookkeeping after a newline. Blank and comment-only lines
    /// carry no block structure and emit nothing.
    fn line_start(&mut self) {
        loop {
            let spaces = self.count_spaces();
            match self.peek() {
                None => return,
                Some(b'\n') => {
                    self.pos += 1;
                }
                Some(b'#') => {
                    self.skip_comment();
                    if self.peek() == Some(b'\n') {
                        self.pos += 1;
                    }
                }
                Some(_) => {
                    self.adjust_indent(spaces / SPACES_PER_INDENT);
                    return;
                }
            }
        }
    }

    fn adjust_indent(&mut self, level: usize) {
        while self.indent_depth < level {
            self.tokens.push(Token::Indent);
            self.indent_depth += 1;
        }
        while self.indent_depth > level {
            self.tokens.push(Token::Dedent);
            self.indent_depth -= 1;
        }
    }

    fn string_literal(&mut self) -> LexResult<()> {
        let quote = self.src[self.pos];
        self.pos += 1;
        let mut value = Vec::new();
        loop {
            let Some(b) = self.bump() else {
                return Err(LexerError::UnterminatedString);
            };
            match b {
                _ if b == quote => break,
                b'\\' => {
                    let Some(esc) = self.bump() else {
                        return Err(LexerError::UnterminatedString);
                    };
                    value.push(match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        b'"' => b'"',
                        b'\'' => b'\'',
                        b'\\' => b'\\',
                        other => return Err(LexerError::UnknownEscape(other as char)),
                    });
                }
                b'\n' | b'\r' => return Err(LexerError::LineBreakInString),
                other => value.push(other),
            }
        }
        let value = String::from_utf8(value).map_err(|_| LexerError::InvalidUtf8)?;
        self.tokens.push(Token::String(value));
        Ok(())
    }

    fn word(&mut self) {
        let mut word = String::new();
        while let Some(b) = self.peek() {
            if b == b'_' || b.is_ascii_alphanumeric() {
                word.push(b as char);
                self.pos += 1;
            } else {
                break;
            }
        }
        let token = match Keyword::lookup(&word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Id(word),
        };
        self.tokens.push(token);
    }

    fn number(&mut self) -> LexResult<()> {
        let mut digits = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                digits.push(b as char);
                self.pos += 1;
            } else {
                break;
            }
        }
        match digits.parse() {
            Ok(value) => {
                self.tokens.push(Token::Number(value));
                Ok(())
            }
            Err(_) => Err(LexerError::NumberOutOfRange(digits)),
        }
    }

    /// `== != <= >=` combine via one byte of lookahead; every other
    /// punctuation byte stands alone.
    fn operator(&mut self) {
        let b = self.src[self.pos];
        self.pos += 1;
        let compound = if self.peek() == Some(b'=') {
            match b {
                b'=' => Some(Token::Eq),
                b'!' => Some(Token::NotEq),
                b'<' => Some(Token::LessOrEq),
                b'>' => Some(Token::GreaterOrEq),
                _ => None,
            }
        } else {
            None
        };
        match compound {
            Some(token) => {
                self.pos += 1;
                self.tokens.push(token);
            }
            None => self.tokens.push(Token::Char(b as char)),
        }
    }

    /// End-of-stream finalization: close the last logical line, unwind the
    /// indent stack, terminate with `Eof`.
    fn finish(mut self) -> Vec<Token> {
        self.push_newline();
        while self.indent_depth > 0 {
            self.tokens.push(Token::Dedent);
            self.indent_depth -= 1;
        }
        self.tokens.push(Token::Eof);
        self.tokens
    }
}

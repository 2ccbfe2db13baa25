//! lexer module tests

use super::*;
use crate::error::LexerError;

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).unwrap().into_tokens()
}

fn id(name: &str) -> Token {
    Token::Id(name.to_string())
}

fn string(value: &str) -> Token {
    Token::String(value.to_string())
}

#[test]
fn test_empty_input() {
    assert_eq!(lex(""), vec![Token::Eof]);
}

#[test]
fn test_simple_assignment() {
    assert_eq!(
        lex("x = 42\n"),
        vec![
            id("x"),
            Token::Char('='),
            Token::Number(42),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_missing_trailing_newline_is_appended() {
    assert_eq!(lex("x = 42"), lex("x = 42\n"));
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        lex("if ifx _tmp x1 return\n"),
        vec![
            Token::Keyword(Keyword::If),
            id("ifx"),
            id("_tmp"),
            id("x1"),
            Token::Keyword(Keyword::Return),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_indented_block() {
    assert_eq!(
        lex("if x:\n  y = 1\n"),
        vec![
            Token::Keyword(Keyword::If),
            id("x"),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("y"),
            Token::Char('='),
            Token::Number(1),
            Token::Newline,
            Token::Dedent,
            Token::Eof,
        ]
    );
}

#[test]
fn test_multi_level_indent_jump() {
    // Four leading spaces rise two levels at once.
    assert_eq!(
        lex("a:\n    b\n"),
        vec![
            id("a"),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            Token::Indent,
            id("b"),
            Token::Newline,
            Token::Dedent,
            Token::Dedent,
            Token::Eof,
        ]
    );
}

#[test]
fn test_misaligned_indent_rounds_down() {
    assert_eq!(
        lex("a\n   b\n"),
        vec![
            id("a"),
            Token::Newline,
            Token::Indent,
            id("b"),
            Token::Newline,
            Token::Dedent,
            Token::Eof,
        ]
    );
}

#[test]
fn test_first_line_indent_is_ignored() {
    assert_eq!(lex("  x\n"), vec![id("x"), Token::Newline, Token::Eof]);
}

#[test]
fn test_leading_blank_lines() {
    assert_eq!(lex("\n\nx\n"), vec![id("x"), Token::Newline, Token::Eof]);
}

#[test]
fn test_blank_lines_collapse() {
    assert_eq!(
        lex("a\n\n   \n\nb\n"),
        vec![id("a"), Token::Newline, id("b"), Token::Newline, Token::Eof]
    );
}

#[test]
fn test_comment_lines_are_invisible() {
    let source = "a = 1\n  # indented comment\n# top comment\nb = 2\n";
    assert_eq!(
        lex(source),
        vec![
            id("a"),
            Token::Char('='),
            Token::Number(1),
            Token::Newline,
            id("b"),
            Token::Char('='),
            Token::Number(2),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_trailing_comment() {
    assert_eq!(
        lex("a = 1 # note\nb\n"),
        vec![
            id("a"),
            Token::Char('='),
            Token::Number(1),
            Token::Newline,
            id("b"),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_comment_at_eof_without_newline() {
    assert_eq!(lex("a # note"), vec![id("a"), Token::Newline, Token::Eof]);
}

#[test]
fn test_dedents_emitted_at_eof() {
    assert_eq!(
        lex("if a:\n  if b:\n    c = 1"),
        vec![
            Token::Keyword(Keyword::If),
            id("a"),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            Token::Keyword(Keyword::If),
            id("b"),
            Token::Char(':'),
            Token::Newline,
            Token::Indent,
            id("c"),
            Token::Char('='),
            Token::Number(1),
            Token::Newline,
            Token::Dedent,
            Token::Dedent,
            Token::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        lex("s = \"a\\nb\"\n"),
        vec![
            id("s"),
            Token::Char('='),
            string("a\nb"),
            Token::Newline,
            Token::Eof,
        ]
    );
    assert_eq!(
        lex(r"t = '\t\r\\'"),
        vec![
            id("t"),
            Token::Char('='),
            string("\t\r\\"),
            Token::Newline,
            Token::Eof,
        ]
    );
    assert_eq!(
        lex(r"q = 'it\'s'"),
        vec![
            id("q"),
            Token::Char('='),
            string("it's"),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_both_quote_styles() {
    assert_eq!(
        lex("\"double\" 'single'\n"),
        vec![string("double"), string("single"), Token::Newline, Token::Eof]
    );
    // A quote of the other kind passes through unescaped.
    assert_eq!(
        lex("\"don't\"\n"),
        vec![string("don't"), Token::Newline, Token::Eof]
    );
}

#[test]
fn test_compound_operators() {
    assert_eq!(
        lex("a <= b != c\n"),
        vec![
            id("a"),
            Token::LessOrEq,
            id("b"),
            Token::NotEq,
            id("c"),
            Token::Newline,
            Token::Eof,
        ]
    );
    assert_eq!(
        lex("a<b>=c==d\n"),
        vec![
            id("a"),
            Token::Char('<'),
            id("b"),
            Token::GreaterOrEq,
            id("c"),
            Token::Eq,
            id("d"),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_punctuation_chars() {
    assert_eq!(
        lex("p.x(-1)\n"),
        vec![
            id("p"),
            Token::Char('.'),
            id("x"),
            Token::Char('('),
            Token::Char('-'),
            Token::Number(1),
            Token::Char(')'),
            Token::Newline,
            Token::Eof,
        ]
    );
}

#[test]
fn test_number_bounds() {
    assert_eq!(lex("9223372036854775807\n")[0], Token::Number(i64::MAX));
    assert!(matches!(
        Lexer::new("9223372036854775808\n"),
        Err(LexerError::NumberOutOfRange(_))
    ));
}

#[test]
fn test_string_errors() {
    assert!(matches!(
        Lexer::new("'abc"),
        Err(LexerError::UnterminatedString)
    ));
    assert!(matches!(
        Lexer::new("'abc\\"),
        Err(LexerError::UnterminatedString)
    ));
    assert!(matches!(
        Lexer::new(r"'a\qb'"),
        Err(LexerError::UnknownEscape('q'))
    ));
    assert!(matches!(
        Lexer::new("'a\nb'"),
        Err(LexerError::LineBreakInString)
    ));
}

#[test]
fn test_unexpected_character() {
    assert!(matches!(
        Lexer::new("a\tb"),
        Err(LexerError::UnexpectedCharacter('\t'))
    ));
}

#[test]
fn test_cursor_walks_the_stream() {
    let mut lexer = Lexer::new("x = 1\n").unwrap();
    assert_eq!(*lexer.current_token(), id("x"));
    // Peeking does not advance.
    assert_eq!(*lexer.current_token(), id("x"));
    assert_eq!(*lexer.next_token(), Token::Char('='));
    assert_eq!(*lexer.next_token(), Token::Number(1));
    assert_eq!(*lexer.next_token(), Token::Newline);
    assert_eq!(*lexer.next_token(), Token::Eof);
    // Sticky at the end.
    assert_eq!(*lexer.next_token(), Token::Eof);
    assert_eq!(*lexer.current_token(), Token::Eof);
}

#[test]
fn test_expectations() {
    let mut lexer = Lexer::new("x = 1\n").unwrap();
    assert_eq!(lexer.expect_id().unwrap(), "x");
    assert!(lexer.expect_number().is_err());
    lexer.expect(&id("x")).unwrap();
    lexer.expect_next(&Token::Char('=')).unwrap();
    assert_eq!(lexer.expect_next_number().unwrap(), 1);
    // Newline comes before Eof.
    assert!(lexer.expect_next(&Token::Eof).is_err());
}

#[test]
fn test_expect_string_payload() {
    let lexer = Lexer::new("'hi'\n").unwrap();
    assert_eq!(lexer.expect_string().unwrap(), "hi");
    assert!(lexer.expect_id().is_err());
}

#[test]
fn test_from_reader() {
    let lexer = Lexer::from_reader("x\n".as_bytes()).unwrap();
    assert_eq!(lexer.tokens(), &[id("x"), Token::Newline, Token::Eof]);
}

#[test]
fn test_stream_invariants_on_larger_program() {
    let source = "\
class Rect(Shape):
  def __init__(w, h):
    self.w = w
    self.h = h

  def area():
    return self.w * self.h

r = Rect(3, 4)
print r.area()
";
    let tokens = lex(source);

    assert_eq!(tokens.last(), Some(&Token::Eof));
    assert_eq!(tokens[tokens.len() - 2], Token::Newline);
    assert_eq!(tokens.iter().filter(|t| **t == Token::Eof).count(), 1);

    let indents = tokens.iter().filter(|t| **t == Token::Indent).count();
    let dedents = tokens.iter().filter(|t| **t == Token::Dedent).count();
    assert_eq!(indents, dedents);

    assert!(!tokens
        .windows(2)
        .any(|pair| pair[0] == Token::Newline && pair[1] == Token::Newline));
}

#[test]
fn test_flat_token_round_trip() {
    let source = "total = price + 12 <= limit != True";
    let tokens = lex(source);

    let mut rebuilt = String::new();
    for token in &tokens {
        let text = match token {
            Token::Number(value) => value.to_string(),
            Token::Id(name) => name.clone(),
            Token::String(value) => format!("'{value}'"),
            Token::Char(c) => c.to_string(),
            Token::Keyword(keyword) => keyword.as_str().to_string(),
            Token::Eq => "==".to_string(),
            Token::NotEq => "!=".to_string(),
            Token::LessOrEq => "<=".to_string(),
            Token::GreaterOrEq => ">=".to_string(),
            Token::Newline | Token::Indent | Token::Dedent | Token::Eof => continue,
        };
        rebuilt.push_str(&text);
        rebuilt.push(' ');
    }

    assert_eq!(lex(&rebuilt), tokens);
}

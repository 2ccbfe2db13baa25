//! mamushi - lexer and runtime object model for a small Python-like language
//!
//! # Overview
//! The lexer turns indentation-structured source text into a flat token
//! stream with a cursor API for the parser. The runtime models the dynamic
//! object system - values behind shared handles, classes with single
//! inheritance, method dispatch, truthiness and the comparison protocol -
//! that a tree-walking executor operates on.

pub mod error;
pub mod lexer;
pub mod runtime;

use anyhow::Result;
use std::path::Path;

use crate::error::LexResult;
use crate::lexer::{Lexer, Token};

/// Tokenize source text into a flat token stream
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Ok(Lexer::new(source)?.into_tokens())
}

/// Tokenize a source file
pub fn tokenize_file(input: &Path) -> Result<Vec<Token>> {
    let source = std::fs::read_to_string(input)?;
    Ok(tokenize(&source)?)
}

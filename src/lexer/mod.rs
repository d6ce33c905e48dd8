//! Lexical analysis module.
//!
//! This module contains the line-buffered lexer that turns source text into
//! a stream of positioned tokens for a recursive-descent parser. It handles:
//!
//! - Greedy resolution of one- to three-character operators
//! - Keywords, recognized only when followed by a space
//! - Identifiers, numbers and the invalid spans between them
//! - Comments, tabs and line breaks as explicit tokens
//! - Peeking at the next token without consuming it

pub mod lexer;
pub mod tokens;

//! Utility macros for the lexer.
//!
//! This module defines helper macros used by the scanner and its tables:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_EXTENSION!` - Creates one step of a multi-character operator chain
//!
//! These macros reduce boilerplate in the token tables and the scanner.

/// Creates a Token instance.
///
/// Fixed-text kinds take no text; their spelling comes from the canonical
/// table. Identifiers, numbers, comments and invalid spans pass their lexeme.
///
/// # Example
///
/// ```ignore
/// let plus = MK_TOKEN!(TokenKind::Plus, 5, 1);
/// let name = MK_TOKEN!(TokenKind::Identifier, 5, 0, String::from("a"));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $line:expr, $column:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            line: $line,
            column: $column,
            text: String::new(),
        }
    };
    ($kind:expr, $line:expr, $column:expr, $text:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            line: $line,
            column: $column,
            text: $text,
        }
    };
}

/// Creates an operator extension: if the next byte is `$continuation`, the
/// scanner consumes it and switches to `$kind`, then keeps trying `$then`.
///
/// # Example
///
/// ```ignore
/// // `*` -> `**` -> `**=`
/// MK_EXTENSION!(b'*' => TokenKind::Power, [MK_EXTENSION!(b'=' => TokenKind::PowerEquals)])
/// ```
#[macro_export]
macro_rules! MK_EXTENSION {
    ($continuation:literal => $kind:expr) => {
        $crate::lexer::tokens::Extension {
            continuation: $continuation,
            kind: $kind,
            then: &[],
        }
    };
    ($continuation:literal => $kind:expr, [$($then:expr),* $(,)?]) => {
        $crate::lexer::tokens::Extension {
            continuation: $continuation,
            kind: $kind,
            then: &[$($then),*],
        }
    };
}

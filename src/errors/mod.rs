//! Error types and error handling for the lexer.
//!
//! This module defines the error types surfaced by the token stream:
//!
//! - Construction-time failures (the source file cannot be opened)
//! - Mid-stream read failures, distinct from the `EOF` token
//! - A reporting-only variant for `Invalid` tokens, used by the driver

pub mod errors;

use std::{fmt::Display, io};

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

// The I/O cause is reported through the chain, never in the message itself.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.internal_error)
    }
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Reporting form of an `Invalid` token. The lexer itself never fails on
    /// malformed input.
    pub fn unrecognised(token: &Token, position: Position) -> Self {
        Error::new(
            ErrorImpl::UnrecognisedToken {
                token: token.text.clone(),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::FileOpen { .. } => "FileOpen",
            ErrorImpl::Read { .. } => "Read",
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::FileOpen { path, source } => match source.kind() {
                io::ErrorKind::NotFound => {
                    ErrorTip::Suggestion(format!("File `{}` does not exist", path))
                }
                io::ErrorKind::PermissionDenied => {
                    ErrorTip::Suggestion(format!("File `{}` is not readable", path))
                }
                _ => ErrorTip::None,
            },
            ErrorImpl::Read { .. } => ErrorTip::Suggestion(format!(
                "Reading stopped after line {}",
                self.position.line
            )),
            ErrorImpl::UnrecognisedToken { token } => {
                if token.starts_with(|c: char| c.is_ascii_digit()) {
                    ErrorTip::Suggestion(format!(
                        "`{}` starts like a number, identifiers cannot start with a digit",
                        token
                    ))
                } else {
                    ErrorTip::None
                }
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug)]
pub enum ErrorImpl {
    #[error("file didn't open: {path}")]
    FileOpen { path: String, source: io::Error },
    #[error("error reading source")]
    Read { source: io::Error },
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
}

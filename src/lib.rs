#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// A point in a source file: 1-based line, 0-based byte column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Arc<String>,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position before the first line of `file` has been read.
    pub fn start(file: Arc<String>) -> Self {
        Position {
            file,
            line: 0,
            column: 0,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Renders `error` against the source line it points into.
pub fn render_error(error: &Error, line_text: &str) -> String {
    /*
        Error: UnrecognisedToken
        -> final.yay
           |
        20 | let a = 3232sad
           | --------^
    */

    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();
    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    rendered.push_str(&format!("-> {}\n", position.file));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.column.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .bytes()
        .take_while(|byte| *byte == b' ' || *byte == b'\t')
        .count();

    (&string[start..], start)
}

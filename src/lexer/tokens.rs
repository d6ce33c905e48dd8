use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::MK_EXTENSION;

lazy_static! {
    /// Keywords grouped by their leading byte, in the order they are tried.
    pub static ref RESERVED_LOOKUP: HashMap<u8, Vec<TokenKind>> = {
        let mut map: HashMap<u8, Vec<TokenKind>> = HashMap::new();
        for kind in TokenKind::ALL.iter().copied().filter(|kind| kind.is_keyword()) {
            map.entry(kind.canonical().as_bytes()[0]).or_default().push(kind);
        }
        map
    };

    /// Single-byte entry points of every punctuation and operator chain.
    pub static ref SYMBOL_LOOKUP: HashMap<u8, &'static Symbol> = {
        let mut map = HashMap::new();
        for symbol in SYMBOLS {
            map.insert(symbol.lead, symbol);
        }
        map
    };

    /// Canonical spelling back to kind, for fixed-text kinds only.
    pub static ref CANONICAL_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        for kind in TokenKind::ALL.iter().copied().filter(|kind| kind.is_fixed_text()) {
            map.insert(kind.canonical(), kind);
        }
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    LineBreak,
    Indent,
    Identifier,
    Number,

    Assignment, // =
    Plus,
    Dash,
    Slash,
    Star,
    Caret,
    Tilde,
    Not, // !
    Ampersand,
    Pipe,
    Dot,
    Comma,
    Colon,
    Question,
    Backtick,
    Quote,
    DoubleQuote,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Less,
    Greater,

    ShiftLeft,
    ShiftRight,
    Equals, // ==
    GreaterEquals,
    LessEquals,
    And,
    Or,
    Power, // **
    Arrow,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    CaretEquals,
    AmpersandEquals,
    PipeEquals,
    NotEquals,
    TildeEquals,

    PowerEquals,
    ShiftLeftEquals,
    ShiftRightEquals,
    Backslash,

    // Reserved
    While,
    For,
    If,
    Else,
    EOF,
    Let,
    Fn,
    Struct,
    Include,

    Comment,
    Invalid,
}

/// Canonical spelling of every kind, indexed by discriminant.
///
/// Keywords carry the trailing space they must be followed by in source.
const CANONICAL_TEXT: [&str; TokenKind::COUNT] = [
    "\n",
    "\t",
    "(identifier)",
    "(number)",
    "=",
    "+",
    "-",
    "/",
    "*",
    "^",
    "~",
    "!",
    "&",
    "|",
    ".",
    ",",
    ":",
    "?",
    "`",
    "'",
    "\"",
    "(",
    ")",
    "[",
    "]",
    "<",
    ">",
    "<<",
    ">>",
    "==",
    ">=",
    "<=",
    "&&",
    "||",
    "**",
    "->",
    "+=",
    "-=",
    "*=",
    "/=",
    "^=",
    "&=",
    "|=",
    "!=",
    "~=",
    "**=",
    "<<=",
    ">>=",
    "\\",
    "while ",
    "for ",
    "if ",
    "else ",
    "(eof)",
    "let ",
    "fn ",
    "struct ",
    "include ",
    "(comment)",
    "(invalid)",
];

impl TokenKind {
    pub const COUNT: usize = 60;

    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; TokenKind::COUNT] = [
        TokenKind::LineBreak,
        TokenKind::Indent,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::Assignment,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Slash,
        TokenKind::Star,
        TokenKind::Caret,
        TokenKind::Tilde,
        TokenKind::Not,
        TokenKind::Ampersand,
        TokenKind::Pipe,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::Question,
        TokenKind::Backtick,
        TokenKind::Quote,
        TokenKind::DoubleQuote,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::ShiftLeft,
        TokenKind::ShiftRight,
        TokenKind::Equals,
        TokenKind::GreaterEquals,
        TokenKind::LessEquals,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Power,
        TokenKind::Arrow,
        TokenKind::PlusEquals,
        TokenKind::MinusEquals,
        TokenKind::StarEquals,
        TokenKind::SlashEquals,
        TokenKind::CaretEquals,
        TokenKind::AmpersandEquals,
        TokenKind::PipeEquals,
        TokenKind::NotEquals,
        TokenKind::TildeEquals,
        TokenKind::PowerEquals,
        TokenKind::ShiftLeftEquals,
        TokenKind::ShiftRightEquals,
        TokenKind::Backslash,
        TokenKind::While,
        TokenKind::For,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::EOF,
        TokenKind::Let,
        TokenKind::Fn,
        TokenKind::Struct,
        TokenKind::Include,
        TokenKind::Comment,
        TokenKind::Invalid,
    ];

    /// The source spelling of this kind, or a parenthesised placeholder for
    /// kinds whose text is carried by the token itself.
    pub fn canonical(self) -> &'static str {
        CANONICAL_TEXT[self as usize]
    }

    pub fn from_canonical(text: &str) -> Option<TokenKind> {
        CANONICAL_LOOKUP.get(text).copied()
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::While
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Let
                | TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Include
        )
    }

    /// Kinds whose token carries the scanned lexeme in `Token::text`.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Number | TokenKind::Comment | TokenKind::Invalid
        )
    }

    /// Kinds spelled exactly by their canonical text in source.
    pub fn is_fixed_text(self) -> bool {
        !self.is_literal() && !matches!(self, TokenKind::LineBreak | TokenKind::EOF)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One step of a multi-character operator: consuming `continuation` turns the
/// current kind into `kind`, after which `then` is tried.
#[derive(Debug)]
pub struct Extension {
    pub continuation: u8,
    pub kind: TokenKind,
    pub then: &'static [Extension],
}

/// A byte that starts a punctuation or operator token.
#[derive(Debug)]
pub struct Symbol {
    pub lead: u8,
    pub base: TokenKind,
    pub extensions: &'static [Extension],
}

static SYMBOLS: &[Symbol] = &[
    Symbol { lead: b'\t', base: TokenKind::Indent, extensions: &[] },
    Symbol { lead: b'=', base: TokenKind::Assignment, extensions: &[MK_EXTENSION!(b'=' => TokenKind::Equals)] },
    Symbol { lead: b'+', base: TokenKind::Plus, extensions: &[MK_EXTENSION!(b'=' => TokenKind::PlusEquals)] },
    Symbol {
        lead: b'-',
        base: TokenKind::Dash,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::MinusEquals),
            MK_EXTENSION!(b'>' => TokenKind::Arrow),
        ],
    },
    Symbol { lead: b'/', base: TokenKind::Slash, extensions: &[MK_EXTENSION!(b'=' => TokenKind::SlashEquals)] },
    Symbol {
        lead: b'*',
        base: TokenKind::Star,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::StarEquals),
            MK_EXTENSION!(b'*' => TokenKind::Power, [MK_EXTENSION!(b'=' => TokenKind::PowerEquals)]),
        ],
    },
    Symbol { lead: b'^', base: TokenKind::Caret, extensions: &[MK_EXTENSION!(b'=' => TokenKind::CaretEquals)] },
    Symbol { lead: b'~', base: TokenKind::Tilde, extensions: &[MK_EXTENSION!(b'=' => TokenKind::TildeEquals)] },
    Symbol { lead: b'!', base: TokenKind::Not, extensions: &[MK_EXTENSION!(b'=' => TokenKind::NotEquals)] },
    Symbol {
        lead: b'&',
        base: TokenKind::Ampersand,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::AmpersandEquals),
            MK_EXTENSION!(b'&' => TokenKind::And),
        ],
    },
    Symbol {
        lead: b'|',
        base: TokenKind::Pipe,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::PipeEquals),
            MK_EXTENSION!(b'|' => TokenKind::Or),
        ],
    },
    Symbol { lead: b'.', base: TokenKind::Dot, extensions: &[] },
    Symbol { lead: b',', base: TokenKind::Comma, extensions: &[] },
    Symbol { lead: b':', base: TokenKind::Colon, extensions: &[] },
    Symbol { lead: b'?', base: TokenKind::Question, extensions: &[] },
    Symbol { lead: b'`', base: TokenKind::Backtick, extensions: &[] },
    Symbol { lead: b'\'', base: TokenKind::Quote, extensions: &[] },
    Symbol { lead: b'"', base: TokenKind::DoubleQuote, extensions: &[] },
    Symbol { lead: b'(', base: TokenKind::OpenParen, extensions: &[] },
    Symbol { lead: b')', base: TokenKind::CloseParen, extensions: &[] },
    Symbol { lead: b'[', base: TokenKind::OpenBracket, extensions: &[] },
    Symbol { lead: b']', base: TokenKind::CloseBracket, extensions: &[] },
    Symbol {
        lead: b'>',
        base: TokenKind::Greater,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::GreaterEquals),
            MK_EXTENSION!(b'>' => TokenKind::ShiftRight, [MK_EXTENSION!(b'=' => TokenKind::ShiftRightEquals)]),
        ],
    },
    Symbol {
        lead: b'<',
        base: TokenKind::Less,
        extensions: &[
            MK_EXTENSION!(b'=' => TokenKind::LessEquals),
            MK_EXTENSION!(b'<' => TokenKind::ShiftLeft, [MK_EXTENSION!(b'=' => TokenKind::ShiftLeftEquals)]),
        ],
    },
    Symbol { lead: b'\\', base: TokenKind::Backslash, extensions: &[] },
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
    pub text: String,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::Invalid => write!(f, "{}", self.text),
            TokenKind::Comment => write!(f, "/*{}*/", self.text),
            _ => write!(f, "{}", self.kind.canonical()),
        }
    }
}

impl Token {
    /// `{ Kind, line, column, "text" }`, the one-record-per-token debug form.
    pub fn debug_string(&self) -> String {
        format!("{{ {}, {}, {}, \"{}\" }}", self.kind, self.line, self.column, self.text)
    }
}

//! Integration tests for scanning whole files.
//!
//! These tests write source files to disk and verify the complete token
//! stream through `Lexer::open`, both with plain `get_token` calls and with a
//! `peek_token` before every `get_token`.

use std::{io::Write, thread};

use tempfile::NamedTempFile;
use yaylex::lexer::{
    lexer::{tokenize, Lexer},
    tokens::{Token, TokenKind},
};

fn token(kind: TokenKind, line: usize, column: usize, text: &str) -> Token {
    Token {
        kind,
        line,
        column,
        text: text.to_string(),
    }
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn fixtures() -> Vec<(&'static str, Vec<Token>)> {
    use TokenKind::*;

    vec![
        (
            "what\nthe\nfaku\n\na+b=c\n2*2 + 434* cs342  = if 5 = 4\n",
            vec![
                token(LineBreak, 0, 0, ""),
                token(Identifier, 1, 0, "what"),
                token(LineBreak, 1, 4, ""),
                token(Identifier, 2, 0, "the"),
                token(LineBreak, 2, 3, ""),
                token(Identifier, 3, 0, "faku"),
                token(LineBreak, 3, 4, ""),
                token(LineBreak, 4, 0, ""),
                token(Identifier, 5, 0, "a"),
                token(Plus, 5, 1, ""),
                token(Identifier, 5, 2, "b"),
                token(Assignment, 5, 3, ""),
                token(Identifier, 5, 4, "c"),
                token(LineBreak, 5, 5, ""),
                token(Number, 6, 0, "2"),
                token(Star, 6, 1, ""),
                token(Number, 6, 2, "2"),
                token(Plus, 6, 4, ""),
                token(Number, 6, 6, "434"),
                token(Star, 6, 9, ""),
                token(Identifier, 6, 11, "cs342"),
                token(Assignment, 6, 18, ""),
                token(If, 6, 20, ""),
                token(Number, 6, 23, "5"),
                token(Assignment, 6, 25, ""),
                token(Number, 6, 27, "4"),
                token(EOF, 6, 28, ""),
            ],
        ),
        (
            "\ta a_b3 323=+-/(*)[]<>'\"`?:.|&!~^\\while for if else fn let struct include }\n",
            vec![
                token(LineBreak, 0, 0, ""),
                token(Indent, 1, 0, ""),
                token(Identifier, 1, 1, "a"),
                token(Identifier, 1, 3, "a_b3"),
                token(Number, 1, 8, "323"),
                token(Assignment, 1, 11, ""),
                token(Plus, 1, 12, ""),
                token(Dash, 1, 13, ""),
                token(Slash, 1, 14, ""),
                token(OpenParen, 1, 15, ""),
                token(Star, 1, 16, ""),
                token(CloseParen, 1, 17, ""),
                token(OpenBracket, 1, 18, ""),
                token(CloseBracket, 1, 19, ""),
                token(Less, 1, 20, ""),
                token(Greater, 1, 21, ""),
                token(Quote, 1, 22, ""),
                token(DoubleQuote, 1, 23, ""),
                token(Backtick, 1, 24, ""),
                token(Question, 1, 25, ""),
                token(Colon, 1, 26, ""),
                token(Dot, 1, 27, ""),
                token(Pipe, 1, 28, ""),
                token(Ampersand, 1, 29, ""),
                token(Not, 1, 30, ""),
                token(Tilde, 1, 31, ""),
                token(Caret, 1, 32, ""),
                token(Backslash, 1, 33, ""),
                token(While, 1, 34, ""),
                token(For, 1, 40, ""),
                token(If, 1, 44, ""),
                token(Else, 1, 47, ""),
                token(Fn, 1, 52, ""),
                token(Let, 1, 55, ""),
                token(Struct, 1, 59, ""),
                token(Include, 1, 66, ""),
                token(Invalid, 1, 74, "}"),
                token(EOF, 1, 75, ""),
            ],
        ),
        (
            "whilefor letif elsefn str uct lEt fore lse ElsE fne lett",
            vec![
                token(LineBreak, 0, 0, ""),
                token(Identifier, 1, 0, "whilefor"),
                token(Identifier, 1, 9, "letif"),
                token(Identifier, 1, 15, "elsefn"),
                token(Identifier, 1, 22, "str"),
                token(Identifier, 1, 26, "uct"),
                token(Identifier, 1, 30, "lEt"),
                token(Identifier, 1, 34, "fore"),
                token(Identifier, 1, 39, "lse"),
                token(Identifier, 1, 43, "ElsE"),
                token(Identifier, 1, 48, "fne"),
                token(Identifier, 1, 52, "lett"),
                token(EOF, 1, 56, ""),
            ],
        ),
        (
            "->**+=-=/=*=<=>===&=|=!=~=&&>>=||<<=**>><<->\n",
            vec![
                token(LineBreak, 0, 0, ""),
                token(Arrow, 1, 0, ""),
                token(Power, 1, 2, ""),
                token(PlusEquals, 1, 4, ""),
                token(MinusEquals, 1, 6, ""),
                token(SlashEquals, 1, 8, ""),
                token(StarEquals, 1, 10, ""),
                token(LessEquals, 1, 12, ""),
                token(GreaterEquals, 1, 14, ""),
                token(Equals, 1, 16, ""),
                token(AmpersandEquals, 1, 18, ""),
                token(PipeEquals, 1, 20, ""),
                token(NotEquals, 1, 22, ""),
                token(TildeEquals, 1, 24, ""),
                token(And, 1, 26, ""),
                token(ShiftRightEquals, 1, 28, ""),
                token(Or, 1, 31, ""),
                token(ShiftLeftEquals, 1, 33, ""),
                token(Power, 1, 36, ""),
                token(ShiftRight, 1, 38, ""),
                token(ShiftLeft, 1, 40, ""),
                token(Arrow, 1, 42, ""),
                token(EOF, 1, 44, ""),
            ],
        ),
        (
            "3232sad\n// that is an invalid token!\n  /*\n",
            vec![
                token(LineBreak, 0, 0, ""),
                token(Invalid, 1, 0, "3232sad"),
                token(LineBreak, 1, 7, ""),
                token(Comment, 2, 0, " that is an invalid token!"),
                token(LineBreak, 2, 28, ""),
                token(Comment, 3, 2, ""),
                token(EOF, 3, 4, ""),
            ],
        ),
    ]
}

#[test]
fn test_open_existing_file() {
    let file = write_fixture("x\n");
    assert!(Lexer::open(file.path()).is_ok());
}

#[test]
fn test_open_missing_file() {
    let directory = tempfile::tempdir().unwrap();
    let result = Lexer::open(directory.path().join("i_don't_exist"));

    assert!(result.is_err());
}

#[test]
fn test_fixtures_get_only() {
    for (index, (source, expected)) in fixtures().into_iter().enumerate() {
        let file = write_fixture(source);
        let mut lexer = Lexer::open(file.path()).unwrap();

        for (position, want) in expected.iter().enumerate() {
            let got = lexer.get_token().unwrap();
            assert_eq!(&got, want, "fixture {} token {}", index + 1, position);
        }
    }
}

#[test]
fn test_fixtures_peek_then_get() {
    for (index, (source, expected)) in fixtures().into_iter().enumerate() {
        let file = write_fixture(source);
        let mut lexer = Lexer::open(file.path()).unwrap();

        for (position, want) in expected.iter().enumerate() {
            let peeked = lexer.peek_token().unwrap();
            assert_eq!(&peeked, want, "fixture {} peek {}", index + 1, position);

            let got = lexer.get_token().unwrap();
            assert_eq!(&got, want, "fixture {} get {}", index + 1, position);
        }
    }
}

#[test]
fn test_file_and_memory_sources_agree() {
    for (source, _) in fixtures() {
        let file = write_fixture(source);
        let from_file: Vec<Token> = Lexer::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(from_file, tokenize(source, None).unwrap());
    }
}

#[test]
fn test_independent_lexers_on_threads() {
    let handles: Vec<_> = fixtures()
        .into_iter()
        .map(|(source, expected)| {
            let file = write_fixture(source);
            thread::spawn(move || {
                let tokens: Vec<Token> = Lexer::open(file.path())
                    .unwrap()
                    .collect::<Result<_, _>>()
                    .unwrap();
                assert_eq!(tokens, expected);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

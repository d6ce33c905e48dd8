use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_TOKEN};

use super::tokens::{Extension, Token, TokenKind, RESERVED_LOOKUP, SYMBOL_LOOKUP};

/// Line-buffered scanner producing one token per call.
///
/// The lexer holds a single physical line at a time and only pulls the next
/// one from `source` once every byte of the current line has been consumed.
/// Every line transition is reported as a `LineBreak` token, starting with a
/// `LineBreak` on line 0 before the first line is read.
pub struct Lexer<R> {
    source: R,
    file: Arc<String>,
    line_buffer: Vec<u8>,
    // A line pulled by `peek_token` at end of buffer, swapped in by the next `get_token`.
    pending: Option<Vec<u8>>,
    exhausted: bool,
    line: usize,
    column: usize,
    rewind: usize,
    finished: bool,
}

impl Lexer<BufReader<File>> {
    /// Opens `path` for line-oriented reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file_name = path.to_string_lossy().into_owned();

        let open_error = |source: io::Error| {
            Error::new(
                ErrorImpl::FileOpen { path: file_name.clone(), source },
                Position::start(Arc::new(file_name.clone())),
            )
        };

        let file = File::open(path).map_err(open_error)?;
        let metadata = file.metadata().map_err(open_error)?;
        if metadata.is_dir() {
            return Err(open_error(io::Error::other("is a directory")));
        }

        debug!(file = %file_name, "opened source file");
        Ok(Lexer::new(BufReader::new(file), Some(file_name)))
    }
}

impl<R: BufRead> Lexer<R> {
    pub fn new(source: R, file: Option<String>) -> Lexer<R> {
        let file_name = file.unwrap_or_else(|| String::from("<input>"));

        Lexer {
            source,
            file: Arc::new(file_name),
            line_buffer: Vec::new(),
            pending: None,
            exhausted: false,
            line: 0,
            column: 0,
            rewind: 0,
            finished: false,
        }
    }

    /// Consumes and returns the next token.
    pub fn get_token(&mut self) -> Result<Token, Error> {
        self.skip_spaces();
        if self.at_line_end() {
            return self.next_line();
        }

        let start = self.column;
        let token = self.scan_token();
        self.rewind = self.column - start;
        Ok(token)
    }

    /// Returns the token the next `get_token` call will return, without
    /// consuming it.
    pub fn peek_token(&mut self) -> Result<Token, Error> {
        self.skip_spaces();
        if self.at_line_end() {
            return self.peek_line();
        }

        let token = self.get_token()?;
        self.column -= self.rewind;
        Ok(token)
    }

    /// Position of the next byte to scan.
    pub fn current_position(&self) -> Position {
        Position {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column,
        }
    }

    /// The physical line currently being scanned.
    pub fn line_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.line_buffer)
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    fn at_line_end(&self) -> bool {
        self.column >= self.line_buffer.len()
    }

    fn current(&self) -> Option<u8> {
        self.line_buffer.get(self.column).copied()
    }

    fn skip_spaces(&mut self) {
        self.skip_while(|byte| byte == b' ');
    }

    fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.current().is_some_and(&predicate) {
            self.column += 1;
        }
    }

    fn lexeme(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.line_buffer[start..self.column]).into_owned()
    }

    fn next_line(&mut self) -> Result<Token, Error> {
        let next = match self.pending.take() {
            Some(line) => Some(line),
            None => self.read_line()?,
        };

        let Some(line) = next else {
            return Ok(MK_TOKEN!(TokenKind::EOF, self.line, self.column));
        };

        let token = MK_TOKEN!(TokenKind::LineBreak, self.line, self.column);
        self.line_buffer = line;
        self.line += 1;
        self.column = 0;
        self.rewind = 0;
        Ok(token)
    }

    fn peek_line(&mut self) -> Result<Token, Error> {
        if self.pending.is_none() {
            self.pending = self.read_line()?;
        }

        let kind = if self.pending.is_some() {
            TokenKind::LineBreak
        } else {
            TokenKind::EOF
        };
        Ok(MK_TOKEN!(kind, self.line, self.column))
    }

    fn read_line(&mut self) -> Result<Option<Vec<u8>>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        let mut line = Vec::new();
        let read = self
            .source
            .read_until(b'\n', &mut line)
            .map_err(|source| Error::new(ErrorImpl::Read { source }, self.current_position()))?;

        if read == 0 {
            trace!(file = %self.file, line = self.line, "end of input");
            self.exhausted = true;
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        trace!(file = %self.file, line = self.line + 1, length = line.len(), "pulled line");
        Ok(Some(line))
    }

    fn scan_token(&mut self) -> Token {
        let start = self.column;
        let lead = self.line_buffer[start];
        self.column += 1;

        if lead == b'/' && matches!(self.current(), Some(b'/') | Some(b'*')) {
            return self.scan_comment(start);
        }

        let kind = match SYMBOL_LOOKUP.get(&lead) {
            Some(symbol) => Some(self.resolve_operator(symbol.base, symbol.extensions)),
            None => self.match_keyword(start, lead),
        };

        match kind {
            Some(kind) => MK_TOKEN!(kind, self.line, start),
            None => self.scan_literal(start, lead),
        }
    }

    /// Walks the extension chain greedily; a consumed continuation is never
    /// given back.
    fn resolve_operator(&mut self, base: TokenKind, extensions: &'static [Extension]) -> TokenKind {
        let mut kind = base;
        let mut candidates = extensions;

        while let Some(extension) = self.try_extend(candidates) {
            kind = extension.kind;
            candidates = extension.then;
        }

        kind
    }

    fn try_extend(&mut self, candidates: &'static [Extension]) -> Option<&'static Extension> {
        let next = self.current()?;
        let extension = candidates.iter().find(|extension| extension.continuation == next)?;
        self.column += 1;
        Some(extension)
    }

    // Keywords only match with their trailing space, e.g. `while `.
    fn match_keyword(&mut self, start: usize, lead: u8) -> Option<TokenKind> {
        let candidates = RESERVED_LOOKUP.get(&lead)?;
        let rest = &self.line_buffer[start..];
        let kind = candidates
            .iter()
            .copied()
            .find(|kind| rest.starts_with(kind.canonical().as_bytes()))?;

        self.column = start + kind.canonical().len();
        Some(kind)
    }

    // `//` runs to the end of the physical line. `/*` is just the two-byte
    // marker; there is no `*/` matching and scanning resumes right after it.
    fn scan_comment(&mut self, start: usize) -> Token {
        if self.line_buffer[start + 1] == b'*' {
            self.column = start + 2;
            return MK_TOKEN!(TokenKind::Comment, self.line, start);
        }

        self.column = self.line_buffer.len();
        let text = self.lexeme(start + 2);
        MK_TOKEN!(TokenKind::Comment, self.line, start, text)
    }

    fn scan_literal(&mut self, start: usize, lead: u8) -> Token {
        if is_word_start(lead) {
            self.skip_while(is_word_byte);
            return MK_TOKEN!(TokenKind::Identifier, self.line, start, self.lexeme(start));
        }

        if lead.is_ascii_digit() {
            self.skip_while(|byte| byte.is_ascii_digit());
            if !self.current().is_some_and(is_word_start) {
                return MK_TOKEN!(TokenKind::Number, self.line, start, self.lexeme(start));
            }
            self.skip_while(is_word_byte);
        } else if !lead.is_ascii() {
            self.skip_while(is_utf8_continuation);
        }

        let token = MK_TOKEN!(TokenKind::Invalid, self.line, start, self.lexeme(start));
        debug!(file = %self.file, line = token.line, column = token.column, text = %token.text, "invalid token");
        token
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, Error>;

    /// Yields every token up to and including the first `EOF`. Iteration
    /// stops after an error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.get_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::EOF,
            Err(_) => true,
        };
        Some(result)
    }
}

fn is_word_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_word_byte(byte: u8) -> bool {
    is_word_start(byte) || byte.is_ascii_digit()
}

fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Scans an in-memory source to completion. The last token is always `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source.as_bytes(), file).collect()
}

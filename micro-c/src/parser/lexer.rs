use crate::span::Span;

/// Whitespace skipped before a lexeme. Never becomes a token.
pub const ZONE_DELIMITERS: &[u8] = b" \r\t\n";
/// Characters that end a lexeme. The structural ones are lexemes themselves.
pub const DELIMITERS: &[u8] = b" \r\t\n(){};,";

pub fn is_zone_delimiter(byte: u8) -> bool {
    ZONE_DELIMITERS.contains(&byte)
}

pub fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&byte)
}

pub fn is_structural(byte: u8) -> bool {
    is_delimiter(byte) && !is_zone_delimiter(byte)
}

/// Restartable scanner producing lexeme spans. Each call resumes where the previous span ended.
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset where the next call to `next_span` starts scanning.
    pub fn cursor(&self) -> usize {
        self.position
    }

    /// Returns `None` once only zone delimiters remain.
    pub fn next_span(&mut self) -> Option<Span> {
        let bytes = self.source.as_bytes();

        while self.position < bytes.len() && is_zone_delimiter(bytes[self.position]) {
            self.bump();
        }

        if self.position >= bytes.len() {
            return None;
        }

        let start = self.position;
        let (line, column) = (self.line, self.column);

        if is_structural(bytes[start]) {
            self.bump();
        } else {
            while self.position < bytes.len() && !is_delimiter(bytes[self.position]) {
                self.bump();
            }
        }

        Some(Span::new(line, column, start, self.position))
    }

    fn bump(&mut self) {
        let byte = self.source.as_bytes()[self.position];
        self.position += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if byte & 0xC0 != 0x80 {
            // UTF-8 continuation bytes do not start a new column
            self.column += 1;
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.next_span()
    }
}

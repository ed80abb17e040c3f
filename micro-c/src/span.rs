/// A lexeme boundary in the source buffer. Never owns text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, start: usize, end: usize) -> Self {
        Self { line, column, start, end }
    }

    /// Zero-width span pointing just past the last byte, used for "unexpected end" errors.
    pub fn end_of(source: &str) -> Self {
        let line = source.matches('\n').count() + 1;
        let column = match source.rfind('\n') {
            Some(pos) => source.len() - pos,
            None => source.len() + 1,
        };
        Self::new(line, column, source.len(), source.len())
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start..self.end]
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

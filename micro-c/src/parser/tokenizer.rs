use log::debug;

use crate::error::CompileError;
use crate::span::Span;
use super::lexer::Lexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl Width {
    pub fn bits(&self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
            Self::W128 => 128,
        }
    }
}

/// Suffix lookup is by exact text, so `u08` is not a width.
const WIDTHS: &[(&str, Width)] = &[
    ("8", Width::W8),
    ("16", Width::W16),
    ("32", Width::W32),
    ("64", Width::W64),
    ("128", Width::W128),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub signedness: Signedness,
    pub width: Width,
}

impl Type {
    pub const U8: Type = Type {
        signedness: Signedness::Unsigned,
        width: Width::W8,
    };
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.signedness {
            Signedness::Signed => 'i',
            Signedness::Unsigned => 'u',
        };
        write!(f, "{}{}", prefix, self.width.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'src> {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    Return,
    Type(Type),
    Identifier(&'src str),
    Number(&'src str),
}

/// Fixed keyword and punctuation table. Matched before any structural rule.
const KEYWORDS: &[(&str, TokenKind<'static>)] = &[
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    ("return", TokenKind::Return),
];

impl<'src> TokenKind<'src> {
    /// Canonical source text for table entries, `None` for tokens carrying a payload.
    pub fn text(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(text, _)| *text)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenParen => "OPEN_PAREN",
            Self::CloseParen => "CLOSE_PAREN",
            Self::OpenBrace => "OPEN_BRACE",
            Self::CloseBrace => "CLOSE_BRACE",
            Self::Semicolon => "SEMICOLON",
            Self::Comma => "COMMA",
            Self::Return => "RETURN",
            Self::Type(_) => "TYPE",
            Self::Identifier(_) => "IDENTIFIER",
            Self::Number(_) => "NUMBER_LITERAL",
        }
    }
}

impl std::fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(ty) => write!(f, "type '{}'", ty),
            Self::Identifier(name) => write!(f, "identifier '{}'", name),
            Self::Number(text) => write!(f, "number '{}'", text),
            other => write!(f, "'{}'", other.text().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<16}", self.kind.name())?;
        match self.kind {
            TokenKind::Type(ty) => write!(f, "{}", ty),
            TokenKind::Identifier(text) | TokenKind::Number(text) => write!(f, "{}", text),
            _ => write!(f, "{}", self.kind.text().unwrap_or_default()),
        }
    }
}

/// Lexes and classifies the whole buffer.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let mut tokens = Vec::new();
    let mut lexer = Lexer::new(source);

    while let Some(span) = lexer.next_span() {
        let token = classify(source, span)?;
        debug!("{}: {}", span, token);
        tokens.push(token);
    }

    Ok(tokens)
}

/// Classifies a single lexeme span. First match wins: table, type, number, identifier.
pub fn classify(source: &str, span: Span) -> Result<Token<'_>, CompileError> {
    let text = span.text(source);

    if let Some((_, kind)) = KEYWORDS.iter().find(|(keyword, _)| *keyword == text) {
        return Ok(Token { kind: *kind, span });
    }

    if looks_like_type(text) {
        return match parse_type(text) {
            Some(ty) => Ok(Token { kind: TokenKind::Type(ty), span }),
            None => Err(CompileError::UnsupportedWidth {
                span,
                text: text.to_string(),
            }),
        };
    }

    if is_number(text) {
        return Ok(Token { kind: TokenKind::Number(text), span });
    }

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Ok(Token { kind: TokenKind::Identifier(text), span });
    }

    Err(CompileError::LexerError {
        span,
        text: text.to_string(),
    })
}

/// `i`/`u` followed by one to three digits.
fn looks_like_type(text: &str) -> bool {
    let bytes = text.as_bytes();
    (2..=4).contains(&bytes.len())
        && matches!(bytes[0], b'i' | b'u')
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

fn parse_type(text: &str) -> Option<Type> {
    let signedness = match text.as_bytes().first()? {
        b'i' => Signedness::Signed,
        b'u' => Signedness::Unsigned,
        _ => return None,
    };
    let (_, width) = WIDTHS.iter().find(|(suffix, _)| *suffix == &text[1..])?;
    Some(Type { signedness, width: *width })
}

fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

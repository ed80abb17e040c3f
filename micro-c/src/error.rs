use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{span}: unrecognized token '{text}'")]
    LexerError { span: Span, text: String },

    #[error("{span}: unsupported integer width in type '{text}' (expected 8, 16, 32, 64 or 128)")]
    UnsupportedWidth { span: Span, text: String },

    #[error("{span}: syntax error: {message}")]
    SyntaxError { span: Span, message: String },

    #[error("{span}: unexpected end of input, {expected}")]
    UnexpectedEnd { span: Span, expected: String },

    #[error("{span}: main function has to return u8, found {found}")]
    MainReturnType { span: Span, found: String },

    #[error("{span}: main function takes no arguments, found {count}")]
    MainArguments { span: Span, count: usize },

    #[error("{span}: literal {literal} does not fit in {target}")]
    LiteralOutOfRange { span: Span, literal: String, target: String },

    #[error("no main function defined")]
    MissingMain,

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Assembler error: {message}")]
    AssemblerError { message: String },
}

impl CompileError {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::LexerError { span, .. }
            | Self::UnsupportedWidth { span, .. }
            | Self::SyntaxError { span, .. }
            | Self::UnexpectedEnd { span, .. }
            | Self::MainReturnType { span, .. }
            | Self::MainArguments { span, .. }
            | Self::LiteralOutOfRange { span, .. } => Some(*span),
            Self::MissingMain
            | Self::IoError { .. }
            | Self::AssemblerError { .. } => None,
        }
    }

    /// Renders `path:message` followed by the offending source line and a caret under the span.
    pub fn report(&self, path: &str, source: &str) -> String {
        let Some(span) = self.span() else {
            return format!("{}: {}", path, self);
        };

        let line_text = source.lines().nth(span.line - 1).unwrap_or("");
        let width = span.len().max(1);
        let marker = format!("{}{}", " ".repeat(span.column - 1), "^".repeat(width));
        format!("{}:{}\n    {}\n    {}", path, self, line_text, marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_starts_with_locator() {
        let err = CompileError::SyntaxError {
            span: Span::new(2, 5, 10, 11),
            message: "expected ';'".to_string(),
        };
        assert_eq!(err.to_string(), "2:5: syntax error: expected ';'");
    }

    #[test]
    fn report_points_at_span() {
        let source = "u16 main() {\n    return 0;\n}";
        let err = CompileError::MainReturnType {
            span: Span::new(1, 1, 0, 3),
            found: "u16".to_string(),
        };
        let report = err.report("first.c", source);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "first.c:1:1: main function has to return u8, found u16");
        assert_eq!(lines[1], "    u16 main() {");
        assert_eq!(lines[2], "    ^^^");
    }

    #[test]
    fn report_without_span() {
        let err = CompileError::MissingMain;
        assert_eq!(err.report("a.c", ""), "a.c: no main function defined");
    }
}

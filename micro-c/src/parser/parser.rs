use log::{debug, warn};

use crate::error::CompileError;
use crate::ir::ast;
use crate::span::Span;
use super::tokenizer::{Token, TokenKind, Type};

/// Builds the unit from a classified token list. The first structural mismatch aborts.
pub fn parse_tokens<'src>(
    tokens: Vec<Token<'src>>,
    source: &'src str,
) -> Result<ast::Unit<'src>, CompileError> {
    let mut parser = Parser::new(tokens, Span::end_of(source));
    parser.parse_unit()
}

struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    position: usize,
    eof: Span,
}

impl<'src> Parser<'src> {
    fn new(tokens: Vec<Token<'src>>, eof: Span) -> Self {
        Self {
            tokens,
            position: 0,
            eof,
        }
    }

    fn parse_unit(&mut self) -> Result<ast::Unit<'src>, CompileError> {
        let function = self.parse_function()?;

        if let Some(extra) = self.peek() {
            warn!(
                "{}: ignoring {} token(s) after the body of '{}'",
                extra.span,
                self.tokens.len() - self.position,
                function.name
            );
        }

        Ok(ast::Unit { function })
    }

    fn parse_function(&mut self) -> Result<ast::Function<'src>, CompileError> {
        let (return_type, type_span) = self.expect_type("expected a return type to start the function")?;
        let (name, span) = self.expect_identifier("expected a function name")?;

        let kind = if name == "main" {
            if return_type != Type::U8 {
                return Err(CompileError::MainReturnType {
                    span: type_span,
                    found: return_type.to_string(),
                });
            }
            ast::FunctionKind::Main
        } else {
            ast::FunctionKind::Regular
        };

        self.expect(TokenKind::OpenParen, "expected '(' to open the argument list")?;
        let args = self.parse_args()?;
        self.expect(TokenKind::CloseParen, "expected ')' to close the argument list")?;

        if kind == ast::FunctionKind::Main && !args.is_empty() {
            return Err(CompileError::MainArguments { span, count: args.len() });
        }

        self.expect(TokenKind::OpenBrace, "expected '{' to open the function body")?;
        let body = self.parse_program()?;

        debug!(
            "{}: parsed function '{}' -> {} ({} args, {} statements)",
            span,
            name,
            return_type,
            args.len(),
            body.len()
        );

        Ok(ast::Function {
            kind,
            name,
            span,
            return_type,
            args,
            body,
        })
    }

    /// Zero or more `Type Identifier` pairs separated by commas, stopping before `)`.
    fn parse_args(&mut self) -> Result<Vec<ast::Arg<'src>>, CompileError> {
        let mut args = Vec::new();

        if matches!(self.peek_kind(), Some(TokenKind::CloseParen)) {
            return Ok(args);
        }

        loop {
            let (ty, type_span) = self.expect_type("expected an argument type")?;
            let (name, name_span) = self.expect_identifier("expected an argument name")?;
            args.push(ast::Arg {
                ty,
                name,
                span: Span::new(type_span.line, type_span.column, type_span.start, name_span.end),
            });

            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(args)
    }

    /// Statements up to and including the closing `}`.
    fn parse_program(&mut self) -> Result<Vec<ast::Statement<'src>>, CompileError> {
        let mut body = Vec::new();

        loop {
            let token = self.advance_or_end("expected a statement or '}'")?;
            match token.kind {
                TokenKind::Return => {
                    let statement = self.parse_return()?;
                    debug!("{}: {}", token.span, statement);
                    body.push(statement);
                }
                TokenKind::CloseBrace => return Ok(body),
                other => {
                    return Err(CompileError::SyntaxError {
                        span: token.span,
                        message: format!("expected a statement or '}}', found {}", other),
                    });
                }
            }
        }
    }

    fn parse_return(&mut self) -> Result<ast::Statement<'src>, CompileError> {
        let token = self.advance_or_end("expected a number literal after 'return'")?;
        let expr = match token.kind {
            TokenKind::Number(text) => text,
            other => {
                return Err(CompileError::SyntaxError {
                    span: token.span,
                    message: format!("expected a number literal after 'return', found {}", other),
                });
            }
        };

        self.expect(TokenKind::Semicolon, "expected ';' after the return expression")?;
        Ok(ast::Statement::Return { expr, span: token.span })
    }

    // Helpers

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.position).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind<'src>> {
        self.peek().map(|token| token.kind)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn advance_or_end(&mut self, expected: &str) -> Result<Token<'src>, CompileError> {
        self.advance().ok_or_else(|| CompileError::UnexpectedEnd {
            span: self.eof,
            expected: expected.to_string(),
        })
    }

    fn expect(&mut self, expected: TokenKind<'src>, message: &str) -> Result<Token<'src>, CompileError> {
        let token = self.advance_or_end(message)?;
        if token.kind == expected {
            Ok(token)
        } else {
            Err(CompileError::SyntaxError {
                span: token.span,
                message: format!("{}, found {}", message, token.kind),
            })
        }
    }

    fn expect_type(&mut self, message: &str) -> Result<(Type, Span), CompileError> {
        let token = self.advance_or_end(message)?;
        match token.kind {
            TokenKind::Type(ty) => Ok((ty, token.span)),
            other => Err(CompileError::SyntaxError {
                span: token.span,
                message: format!("{}, found {}", message, other),
            }),
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<(&'src str, Span), CompileError> {
        let token = self.advance_or_end(message)?;
        match token.kind {
            TokenKind::Identifier(name) => Ok((name, token.span)),
            other => Err(CompileError::SyntaxError {
                span: token.span,
                message: format!("{}, found {}", message, other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::{tokenize, Signedness, Width};

    fn parse(source: &str) -> Result<ast::Unit<'_>, CompileError> {
        parse_tokens(tokenize(source)?, source)
    }

    fn returns<'a>(unit: &ast::Unit<'a>) -> Vec<&'a str> {
        unit.function
            .body
            .iter()
            .map(|statement| match statement {
                ast::Statement::Return { expr, .. } => *expr,
            })
            .collect()
    }

    #[test]
    fn main_returning_literal() {
        let unit = parse("u8 main() { return 5; }").unwrap();
        let function = &unit.function;
        assert_eq!(function.kind, ast::FunctionKind::Main);
        assert_eq!(function.name, "main");
        assert_eq!(function.return_type, Type::U8);
        assert!(function.args.is_empty());
        assert_eq!(returns(&unit), vec!["5"]);
    }

    #[test]
    fn statements_keep_source_order() {
        let unit = parse("u8 main() { return 1; return 2; }").unwrap();
        assert_eq!(returns(&unit), vec!["1", "2"]);
    }

    #[test]
    fn empty_body() {
        let unit = parse("u8 main(){}").unwrap();
        assert!(unit.function.body.is_empty());
    }

    #[test]
    fn main_must_return_u8() {
        for source in ["u16 main() { return 0; }", "i8 main() { return 0; }"] {
            match parse(source) {
                Err(CompileError::MainReturnType { span, .. }) => assert_eq!(span.start, 0),
                other => panic!("{:?} parsed to {:?}", source, other),
            }
        }
    }

    #[test]
    fn other_functions_take_any_type() {
        let unit = parse("i64 answer() { return -42; }").unwrap();
        assert_eq!(unit.function.kind, ast::FunctionKind::Regular);
        assert_eq!(
            unit.function.return_type,
            Type { signedness: Signedness::Signed, width: Width::W64 }
        );
        assert_eq!(returns(&unit), vec!["-42"]);
    }

    #[test]
    fn missing_semicolon() {
        let err = parse("u8 main() { return 5 }").unwrap_err();
        match err {
            CompileError::SyntaxError { span, message } => {
                assert_eq!(span.column, 22);
                assert!(message.contains("';'"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn return_needs_number() {
        let err = parse("u8 main() { return x; }").unwrap_err();
        assert!(matches!(err, CompileError::SyntaxError { .. }));
    }

    #[test]
    fn unknown_statement() {
        let err = parse("u8 main() { main; }").unwrap_err();
        match err {
            CompileError::SyntaxError { message, .. } => assert!(message.contains("identifier 'main'")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn must_start_with_type() {
        assert!(matches!(parse("main() {}"), Err(CompileError::SyntaxError { .. })));
        assert!(matches!(parse(""), Err(CompileError::UnexpectedEnd { .. })));
    }

    #[test]
    fn unterminated_body() {
        assert!(matches!(
            parse("u8 main() { return 1;"),
            Err(CompileError::UnexpectedEnd { .. })
        ));
        assert!(matches!(parse("u8 main() {"), Err(CompileError::UnexpectedEnd { .. })));
    }

    #[test]
    fn parses_arguments() {
        let unit = parse("u32 add(u8 a, i16 b) { return 0; }").unwrap();
        let args = &unit.function.args;
        assert_eq!(args.len(), 2);
        assert_eq!((args[0].ty, args[0].name), (Type::U8, "a"));
        assert_eq!(args[1].name, "b");
        assert_eq!(args[1].ty.signedness, Signedness::Signed);
        assert_eq!(args[1].ty.width, Width::W16);
        assert_eq!(args[1].span.start, 14);
        assert_eq!(args[1].span.end, 19);
    }

    #[test]
    fn rejects_malformed_arguments() {
        for source in [
            "u8 f(u8 a,) {}",
            "u8 f(u8) {}",
            "u8 f(a) {}",
            "u8 f(u8 a u8 b) {}",
        ] {
            assert!(matches!(parse(source), Err(CompileError::SyntaxError { .. })), "{}", source);
        }
    }

    #[test]
    fn main_takes_no_arguments() {
        assert!(matches!(
            parse("u8 main(u8 argc) { return 0; }"),
            Err(CompileError::MainArguments { count: 1, .. })
        ));
    }

    #[test]
    fn tokens_after_body_are_not_consumed() {
        let unit = parse("u8 main() { return 3; } u8 other() {}").unwrap();
        assert_eq!(unit.function.name, "main");
        assert_eq!(returns(&unit), vec!["3"]);
    }
}

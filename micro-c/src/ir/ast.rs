use std::fmt;

use crate::parser::tokenizer::Type;
use crate::span::Span;

/// The single top-level entity of a compiled file.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit<'src> {
    pub function: Function<'src>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `main`, the program entry point. Always returns `u8`.
    Main,
    Regular,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function<'src> {
    pub kind: FunctionKind,
    pub name: &'src str,
    pub span: Span,
    pub return_type: Type,
    pub args: Vec<Arg<'src>>,
    pub body: Vec<Statement<'src>>,
}

impl Function<'_> {
    pub fn is_main(&self) -> bool {
        self.kind == FunctionKind::Main
    }
}

/// `u8 count` inside a parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct Arg<'src> {
    pub ty: Type,
    pub name: &'src str,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'src> {
    /// return 5;
    Return {
        expr: &'src str,
        span: Span,
    },
}

impl fmt::Display for Unit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)
    }
}

impl fmt::Display for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            FunctionKind::Main => "MainFunction",
            FunctionKind::Regular => "Function",
        };
        writeln!(f, "{} {}", label, self.name)?;
        writeln!(f, "    Args")?;
        for arg in &self.args {
            writeln!(f, "        {} {}", arg.ty, arg.name)?;
        }
        writeln!(f, "    Return Type {}", self.return_type)?;
        writeln!(f, "    Program")?;
        for statement in &self.body {
            writeln!(f, "        {}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Return { expr, .. } => write!(f, "Return {}", expr),
        }
    }
}

pub mod lexer;
pub mod parser;
pub mod tokenizer;

use crate::error::CompileError;
use crate::ir::ast;

/// Source text to AST: lexing, classification, then recursive descent.
pub fn parse(source: &str) -> Result<ast::Unit<'_>, CompileError> {
    let tokens = tokenizer::tokenize(source)?;
    let unit = parser::parse_tokens(tokens, source)?;
    Ok(unit)
}

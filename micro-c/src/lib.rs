//! micro-c: a tiny C-like language compiled to x86-64 assembly.
//!
//! Source text flows through `parser` (lexer, tokenizer, recursive descent),
//! `analysis` and finally a `backends` target that emits assembly text.

pub mod analysis;
pub mod assembler;
pub mod backends;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

use log::info;

use backends::Backend;
pub use backends::BackendType;
pub use error::CompileError;

/// Compiles a whole source buffer for the default target.
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    compile_source_for(source, BackendType::FasmX86_64)
}

pub fn compile_source_for(source: &str, target: BackendType) -> Result<String, CompileError> {
    let unit = parser::parse(source)?;
    analysis::check(&unit)?;

    let mut backend = target.create();
    let asm = backend.compile(&unit)?;
    info!("generated {} lines for {}", asm.lines().count(), target.name());
    Ok(asm)
}

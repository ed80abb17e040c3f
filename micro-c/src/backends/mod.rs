pub mod fasm;

use crate::ir::ast;
use crate::error::CompileError;

pub trait Backend {
    /// Lowers a checked unit into assembly source text.
    fn compile(&mut self, unit: &ast::Unit) -> Result<String, CompileError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    FasmX86_64,
}

impl BackendType {
    pub fn all() -> Vec<Self> {
        vec![Self::FasmX86_64]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|backend| backend.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FasmX86_64 => "fasm-x86_64",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FasmX86_64 => "x86-64 Linux ELF64, flat assembler syntax",
        }
    }

    /// Extension of the assembly file this backend writes.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::FasmX86_64 => "asm",
        }
    }

    pub fn create(&self) -> Box<dyn Backend> {
        match self {
            Self::FasmX86_64 => Box::new(fasm::FasmBackend::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(BackendType::from_name("fasm-x86_64"), Some(BackendType::FasmX86_64));
        assert_eq!(BackendType::from_name("aarch64"), None);
    }

    #[test]
    fn every_backend_is_reachable_by_name() {
        for backend in BackendType::all() {
            assert_eq!(BackendType::from_name(backend.name()), Some(backend));
        }
    }
}

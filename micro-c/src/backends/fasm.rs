use log::debug;

use crate::ir::ast;
use crate::error::CompileError;

use super::Backend;

/// Linux `exit` syscall number.
const SYS_EXIT: u32 = 60;
const SYSCALL_REGISTER: &str = "rax";
const ARGUMENT_REGISTER: &str = "rdi";

const HEADER: [&str; 3] = [
    "format ELF64 executable",
    "entry main",
    "segment readable executable",
];

pub struct FasmBackend {
    output: String,
}

impl Backend for FasmBackend {
    fn compile(&mut self, unit: &ast::Unit) -> Result<String, CompileError> {
        self.compile_unit(unit)
    }
}

impl FasmBackend {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn compile_unit(&mut self, unit: &ast::Unit) -> Result<String, CompileError> {
        self.output.clear();

        for line in HEADER {
            self.emit_line(line);
        }
        self.emit_line("");

        self.compile_function(&unit.function);

        Ok(std::mem::take(&mut self.output))
    }

    fn compile_function(&mut self, function: &ast::Function) {
        debug!("emitting '{}' ({} statements)", function.name, function.body.len());
        self.emit_line(&format!("{}:", function.name));

        for statement in &function.body {
            self.compile_statement(statement);
        }
    }

    fn compile_statement(&mut self, statement: &ast::Statement) {
        match statement {
            ast::Statement::Return { expr, .. } => {
                self.emit_instruction(&format!("mov {}, {}", SYSCALL_REGISTER, SYS_EXIT));
                self.emit_instruction(&format!("mov {}, {}", ARGUMENT_REGISTER, expr));
                self.emit_instruction("syscall");
            }
        }
    }

    fn emit_instruction(&mut self, instruction: &str) {
        self.output.push_str("    ");
        self.emit_line(instruction);
    }

    fn emit_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

impl Default for FasmBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn compile(source: &str) -> String {
        let unit = parser::parse(source).unwrap();
        FasmBackend::new().compile_unit(&unit).unwrap()
    }

    #[test]
    fn single_return() {
        let asm = compile("u8 main() { return 5; }");
        assert_eq!(
            asm,
            "format ELF64 executable\n\
             entry main\n\
             segment readable executable\n\
             \n\
             main:\n    \
             mov rax, 60\n    \
             mov rdi, 5\n    \
             syscall\n"
        );
    }

    #[test]
    fn every_return_is_emitted_in_order() {
        let asm = compile("u8 main() { return 1; return 2; }");
        let body: Vec<&str> = asm.lines().skip(5).map(str::trim).collect();
        assert_eq!(
            body,
            vec![
                "mov rax, 60",
                "mov rdi, 1",
                "syscall",
                "mov rax, 60",
                "mov rdi, 2",
                "syscall",
            ]
        );
    }

    #[test]
    fn empty_body_emits_only_label() {
        let asm = compile("u8 main() {}");
        assert!(asm.ends_with("\nmain:\n"));
    }

    #[test]
    fn label_uses_function_name() {
        let asm = compile("i32 helper() { return -3; }");
        assert!(asm.contains("\nhelper:\n"));
        assert!(asm.contains("    mov rdi, -3\n"));
    }

    #[test]
    fn backend_is_reusable() {
        let unit = parser::parse("u8 main() { return 7; }").unwrap();
        let mut backend = FasmBackend::new();
        let first = backend.compile(&unit).unwrap();
        let second = backend.compile(&unit).unwrap();
        assert_eq!(first, second);
    }
}

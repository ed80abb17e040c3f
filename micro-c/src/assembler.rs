use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::CompileError;

/// Runs the external assembler on `asm_path`. fasm names the executable after the
/// source file with its extension dropped.
pub fn assemble(asm_path: &Path, assembler: &str) -> Result<PathBuf, CompileError> {
    info!("{} {}", assembler, asm_path.display());

    let output = Command::new(assembler)
        .arg(asm_path)
        .output()
        .map_err(|e| CompileError::AssemblerError {
            message: format!("could not start '{}': {}", assembler, e),
        })?;

    if !output.status.success() {
        return Err(CompileError::AssemblerError {
            message: format!(
                "'{}' failed with {}: {}",
                assembler,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(executable_path(asm_path))
}

pub fn executable_path(asm_path: &Path) -> PathBuf {
    asm_path.with_extension("")
}

/// Runs the produced program and returns its exit code.
pub fn run(binary: &Path) -> Result<i32, CompileError> {
    // a bare file name would be looked up in PATH
    let binary = if binary.parent() == Some(Path::new("")) {
        Path::new(".").join(binary)
    } else {
        binary.to_path_buf()
    };
    info!("running {}", binary.display());

    let status = Command::new(&binary).status()?;
    status.code().ok_or_else(|| CompileError::AssemblerError {
        message: format!("'{}' was terminated by a signal", binary.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_drops_extension() {
        assert_eq!(executable_path(Path::new("build/first.asm")), PathBuf::from("build/first"));
        assert_eq!(executable_path(Path::new("out")), PathBuf::from("out"));
    }

    #[test]
    fn missing_assembler_is_reported() {
        let err = assemble(Path::new("first.asm"), "definitely-not-an-assembler-binary").unwrap_err();
        match err {
            CompileError::AssemblerError { message } => {
                assert!(message.starts_with("could not start"), "{}", message)
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

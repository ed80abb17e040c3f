//! Checks run between parsing and code generation.
//!
//! The backend copies return literals verbatim into `mov` operands, so every
//! literal is bounded here: first by the function's declared return type,
//! then by the 64-bit argument register.

use log::debug;

use crate::error::CompileError;
use crate::ir::ast;
use crate::parser::tokenizer::{Signedness, Type};

pub fn check(unit: &ast::Unit) -> Result<(), CompileError> {
    let function = &unit.function;

    if !function.is_main() {
        return Err(CompileError::MissingMain);
    }

    for statement in &function.body {
        match statement {
            ast::Statement::Return { expr, span } => {
                if !fits_type(expr, &function.return_type) {
                    return Err(CompileError::LiteralOutOfRange {
                        span: *span,
                        literal: expr.to_string(),
                        target: function.return_type.to_string(),
                    });
                }
                if !fits_register(expr) {
                    return Err(CompileError::LiteralOutOfRange {
                        span: *span,
                        literal: expr.to_string(),
                        target: "a 64-bit register".to_string(),
                    });
                }
            }
        }
    }

    debug!("'{}' passed checks", function.name);
    Ok(())
}

/// Splits a decimal literal into sign and magnitude. `None` if the magnitude overflows u128.
fn magnitude(literal: &str) -> Option<(bool, u128)> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, literal),
    };
    digits.parse::<u128>().ok().map(|value| (negative, value))
}

pub fn fits_type(literal: &str, ty: &Type) -> bool {
    let Some((negative, value)) = magnitude(literal) else {
        return false;
    };
    let bits = ty.width.bits();

    match ty.signedness {
        Signedness::Unsigned => {
            let max = if bits == 128 { u128::MAX } else { (1u128 << bits) - 1 };
            (!negative || value == 0) && value <= max
        }
        Signedness::Signed => {
            let limit = 1u128 << (bits - 1);
            if negative { value <= limit } else { value < limit }
        }
    }
}

/// Anything from `i64::MIN` to `u64::MAX` encodes as a 64-bit immediate.
pub fn fits_register(literal: &str) -> bool {
    match magnitude(literal) {
        Some((true, value)) => value <= 1u128 << 63,
        Some((false, value)) => value <= u64::MAX as u128,
        None => false,
    }
}

//! Program Loader.
//!
//! This module turns assembly source into a [`Program`]. It performs:
//! 1. **Comment stripping:** Everything after `//` on a line is ignored.
//! 2. **Splitting:** One instruction per line, or several separated by `;`.
//! 3. **Decoding:** Each instruction is decoded with its 1-based source line for errors.

use std::fs;
use std::path::Path;

use crate::common::error::ProgramError;
use crate::isa::decode::parse_instruction;
use crate::isa::instruction::Program;

/// Parses assembly source into a program laid out from the code base.
///
/// # Arguments
///
/// * `source` - Assembly text.
///
/// # Returns
///
/// The decoded program.
///
/// # Errors
///
/// Returns [`ProgramError::Empty`] when the source holds no instruction, or
/// the first decode error encountered.
pub fn parse_program(source: &str) -> Result<Program, ProgramError> {
    let mut code = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let text = raw.split_once("//").map_or(raw, |(code, _)| code);
        for part in text.split(';') {
            if part.trim().is_empty() {
                continue;
            }
            code.push(parse_instruction(part, idx + 1)?);
        }
    }
    Program::new(code)
}

/// Reads and parses an assembly file from disk.
///
/// # Errors
///
/// Returns [`ProgramError::Io`] when the file cannot be read, otherwise the
/// result of [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, ProgramError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|e| ProgramError::Io(format!("{}: {e}", path.display())))?;
    parse_program(&source)
}

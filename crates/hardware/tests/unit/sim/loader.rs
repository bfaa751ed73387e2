//! Program Loader Tests.
//!
//! Verifies layout from the code base, comment and separator handling, and
//! file loading.

use std::io::Write;

use oosim_core::common::constants::{CODE_BASE, INSTRUCTION_SIZE};
use oosim_core::common::error::ProgramError;
use oosim_core::isa::Opcode;
use oosim_core::sim::loader::{load_program, parse_program};

#[test]
fn layout_from_code_base() {
    let program = parse_program("MOVC R0,#1\nNOP\nHALT").unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program.lookup(CODE_BASE).map(|i| i.opcode), Some(Opcode::Movc));
    assert_eq!(
        program.lookup(CODE_BASE + 2 * INSTRUCTION_SIZE).map(|i| i.opcode),
        Some(Opcode::Halt)
    );
    assert_eq!(program.lookup(CODE_BASE + 3 * INSTRUCTION_SIZE), None);
    assert_eq!(program.lookup(CODE_BASE + 2), None);
    assert_eq!(program.lookup(CODE_BASE - INSTRUCTION_SIZE), None);
}

#[test]
fn comments_blank_lines_and_separators() {
    let source = "// header\n\nMOVC R0,#1 // first\n   \nADD R1,R0,R0 ; HALT ;\n";
    let program = parse_program(source).unwrap();
    let ops: Vec<_> = program.iter().map(|(_, i)| i.opcode).collect();
    assert_eq!(ops, vec![Opcode::Movc, Opcode::Add, Opcode::Halt]);
}

#[test]
fn error_line_numbers_count_source_lines() {
    let err = parse_program("NOP\n// c\nNOP ; MOVC R0\n").unwrap_err();
    assert!(matches!(err, ProgramError::OperandCount { line: 3, .. }));
}

#[test]
fn empty_program_rejected() {
    assert_eq!(parse_program("// nothing here").unwrap_err(), ProgramError::Empty);
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "MOVC R0,#5").unwrap();
    writeln!(file, "HALT").unwrap();

    let program = load_program(file.path()).unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_program(dir.path().join("missing.asm")).unwrap_err();
    assert!(matches!(err, ProgramError::Io(_)));
}

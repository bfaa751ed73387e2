//! Disassembler Tests.

use oosim_core::isa::Opcode;
use oosim_core::isa::decode::parse_instruction;

#[test]
fn canonical_forms() {
    for (input, want) in [
        ("movc r1, #3", "MOVC R1,#3"),
        ("STORE R0 , R1, #-4", "STORE R0,R1,#-4"),
        ("jump r2,#8", "JUMP R2,#8"),
        ("nop", "NOP"),
    ] {
        assert_eq!(parse_instruction(input, 1).unwrap().to_string(), want);
    }
}

#[test]
fn mnemonics_are_case_insensitive() {
    for op in Opcode::ALL {
        let lower = op.mnemonic().to_ascii_lowercase();
        assert_eq!(Opcode::from_mnemonic(&lower), Some(op));
    }
    assert_eq!(Opcode::from_mnemonic("MOVE"), None);
}

//! Simulator error definitions.
//!
//! This module defines every error the simulator surfaces to its caller. It provides:
//! 1. **Program Errors:** Malformed or empty instruction streams, rejected before the run starts.
//! 2. **Configuration Errors:** Machine descriptions that cannot be built.
//! 3. **Run-time Faults:** Arithmetic and addressing faults raised precisely at commit.
//!
//! Resource exhaustion (full queues, empty free list) is not an error: it is
//! handled by backpressure inside the pipeline and only shows up in statistics.

use thiserror::Error;

/// Errors found while loading or validating a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The program contains no instructions.
    #[error("program is empty")]
    Empty,

    /// A line names an opcode the machine does not implement.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        mnemonic: String,
    },

    /// An operand could not be parsed or has the wrong kind for its slot.
    #[error("line {line}: bad operand `{operand}` for {mnemonic}")]
    BadOperand {
        /// 1-based source line.
        line: usize,
        /// Mnemonic of the instruction being parsed.
        mnemonic: String,
        /// The offending token.
        operand: String,
    },

    /// The instruction has the wrong number of operands.
    #[error("line {line}: {mnemonic} expects {expected} operands, found {found}")]
    OperandCount {
        /// 1-based source line.
        line: usize,
        /// Mnemonic of the instruction being parsed.
        mnemonic: String,
        /// Number of operands the format requires.
        expected: usize,
        /// Number of operands present.
        found: usize,
    },

    /// The program file could not be read.
    #[error("cannot read program: {0}")]
    Io(String),
}

/// Errors in a machine configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A structure was configured with zero entries.
    #[error("{0} must have at least one entry")]
    ZeroCapacity(&'static str),

    /// The BTB size is not a power of two.
    #[error("btb_size must be a power of two, got {0}")]
    BtbSize(usize),

    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Errors returned by the simulator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The program was rejected before the run started.
    #[error("invalid program: {0}")]
    InvalidProgram(#[from] ProgramError),

    /// The configuration was rejected before the run started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A DIV with a zero divisor reached the head of the reorder buffer.
    #[error("division by zero at pc {pc}")]
    DivideByZero {
        /// Address of the faulting instruction.
        pc: u32,
    },

    /// A memory instruction computed an address outside data memory.
    #[error("data address {addr} out of range at pc {pc}")]
    AddressOutOfRange {
        /// Address of the faulting instruction.
        pc: u32,
        /// The computed effective address.
        addr: i64,
    },
}

//! Pipeline control signals and operation types.
//!
//! This module is the per-opcode handler table consulted by every stage. It performs:
//! 1. **Operation Classification:** Maps each opcode to the functional unit that executes it.
//! 2. **Operand Selection:** Records whether the ALU's second input is a register or the immediate.
//! 3. **Destination Kind:** Distinguishes register writers, flag writers and instructions with no result.
//! 4. **Memory Control:** Marks loads and stores that also occupy the load-store queue.

use crate::isa::instruction::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition. Also used for address generation.
    #[default]
    Add,

    /// Integer subtraction. Also computes the `CMP` difference.
    Sub,

    /// Integer multiply (low 32 bits).
    Mul,

    /// Integer divide (signed, truncating).
    Div,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,

    /// Forwards operand B unchanged (`MOVC`).
    PassB,
}

/// Functional unit class an instruction issues to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FuncUnit {
    /// Integer/AGEN unit: arithmetic, address generation, branches and jumps.
    Integer,
    /// Logical unit: AND, OR, XOR.
    Logical,
    /// Four-stage pipelined multiplier.
    Multiplier,
}

impl FuncUnit {
    /// Every unit class, in the order the scheduler visits them.
    pub const ALL: [Self; 3] = [Self::Integer, Self::Logical, Self::Multiplier];
}

/// What an instruction's renamed destination represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DestKind {
    /// No renamed result.
    #[default]
    None,
    /// An architectural register.
    Gpr,
    /// The zero flag only (`CMP`).
    Flag,
    /// An architectural register and the zero flag (`SUB`, `SUBL`).
    GprAndFlag,
}

impl DestKind {
    /// Whether a physical register is allocated at decode.
    pub const fn allocates(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the architectural register file is written at commit.
    pub const fn writes_gpr(self) -> bool {
        matches!(self, Self::Gpr | Self::GprAndFlag)
    }

    /// Whether the zero flag is written at commit.
    pub const fn writes_flag(self) -> bool {
        matches!(self, Self::Flag | Self::GprAndFlag)
    }
}

/// Memory behaviour of an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemOp {
    /// Not a memory instruction.
    #[default]
    None,
    /// Reads data memory into the destination.
    Load,
    /// Writes the data operand to data memory.
    Store,
}

/// Control signals for one opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlSignals {
    /// Unit the instruction issues to; `None` for instructions that only occupy the ROB.
    pub unit: Option<FuncUnit>,
    /// ALU operation performed by the unit.
    pub alu: AluOp,
    /// Operand B is the immediate rather than the second source register.
    pub b_imm: bool,
    /// Renamed destination kind.
    pub dest: DestKind,
    /// Memory behaviour.
    pub mem: MemOp,
    /// Instruction is a conditional branch reading the zero flag.
    pub branch: bool,
    /// Instruction is an unconditional jump.
    pub jump: bool,
    /// Instruction is `HALT`.
    pub halt: bool,
}

impl ControlSignals {
    const NONE: Self = Self {
        unit: None,
        alu: AluOp::Add,
        b_imm: false,
        dest: DestKind::None,
        mem: MemOp::None,
        branch: false,
        jump: false,
        halt: false,
    };

    const fn int(alu: AluOp, b_imm: bool, dest: DestKind) -> Self {
        Self {
            unit: Some(FuncUnit::Integer),
            alu,
            b_imm,
            dest,
            ..Self::NONE
        }
    }

    /// Generates the control signals for an opcode.
    pub const fn for_opcode(op: Opcode) -> Self {
        match op {
            Opcode::Movc => Self::int(AluOp::PassB, true, DestKind::Gpr),
            Opcode::Add => Self::int(AluOp::Add, false, DestKind::Gpr),
            Opcode::Sub => Self::int(AluOp::Sub, false, DestKind::GprAndFlag),
            Opcode::Div => Self::int(AluOp::Div, false, DestKind::Gpr),
            Opcode::Addl => Self::int(AluOp::Add, true, DestKind::Gpr),
            Opcode::Subl => Self::int(AluOp::Sub, true, DestKind::GprAndFlag),
            Opcode::Cmp => Self::int(AluOp::Sub, false, DestKind::Flag),
            Opcode::Mul => Self {
                unit: Some(FuncUnit::Multiplier),
                alu: AluOp::Mul,
                dest: DestKind::Gpr,
                ..Self::NONE
            },
            Opcode::And | Opcode::Or | Opcode::Xor => Self {
                unit: Some(FuncUnit::Logical),
                alu: match op {
                    Opcode::And => AluOp::And,
                    Opcode::Or => AluOp::Or,
                    _ => AluOp::Xor,
                },
                dest: DestKind::Gpr,
                ..Self::NONE
            },
            Opcode::Load => Self {
                mem: MemOp::Load,
                ..Self::int(AluOp::Add, true, DestKind::Gpr)
            },
            Opcode::Ldr => Self {
                mem: MemOp::Load,
                ..Self::int(AluOp::Add, false, DestKind::Gpr)
            },
            Opcode::Store => Self {
                mem: MemOp::Store,
                ..Self::int(AluOp::Add, true, DestKind::None)
            },
            Opcode::Str => Self {
                mem: MemOp::Store,
                ..Self::int(AluOp::Add, false, DestKind::None)
            },
            Opcode::Bz | Opcode::Bnz => Self {
                branch: true,
                ..Self::int(AluOp::Add, true, DestKind::None)
            },
            Opcode::Jump => Self {
                jump: true,
                ..Self::int(AluOp::Add, true, DestKind::None)
            },
            Opcode::Halt => Self {
                halt: true,
                ..Self::NONE
            },
            Opcode::Nop => Self::NONE,
        }
    }

    /// Whether the instruction needs an issue queue slot.
    pub const fn needs_iq(&self) -> bool {
        self.unit.is_some()
    }

    /// Whether the instruction needs a load-store queue slot.
    pub const fn needs_lsq(&self) -> bool {
        !matches!(self.mem, MemOp::None)
    }

    /// Whether commit waits on the destination register becoming ready.
    pub const fn commits_on_value(&self) -> bool {
        self.dest.allocates()
    }
}
